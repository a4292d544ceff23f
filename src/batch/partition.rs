//! Batch Partitioner Module
//!
//! Splits an ordered collection into consecutive, fixed-size groups.
//! The last group holds the remainder and may be shorter.

use crate::BatchError;
use serde_json::Value;

/// Split `tasks` into groups of `batch_size`, preserving order.
///
/// # Returns
/// * `Ok(batches)` where every batch except possibly the last has exactly
///   `batch_size` elements; an empty input yields no batches
/// * `Err(BatchError::InvalidArgument)` if `batch_size` is zero
pub fn partition<T>(tasks: Vec<T>, batch_size: usize) -> Result<Vec<Vec<T>>, BatchError> {
    if batch_size == 0 {
        return Err(BatchError::zero_batch_size());
    }

    let mut batches: Vec<Vec<T>> = Vec::with_capacity(tasks.len().div_ceil(batch_size));
    let mut remaining = tasks.into_iter().peekable();
    while remaining.peek().is_some() {
        batches.push(remaining.by_ref().take(batch_size).collect());
    }

    Ok(batches)
}

/// Partition an untyped value, which must be a JSON array.
///
/// The input kind is checked before the batch size.
pub fn partition_value(value: Value, batch_size: usize) -> Result<Vec<Vec<Value>>, BatchError> {
    let items = into_sequence(value)?;
    partition(items, batch_size)
}

/// Unwrap a JSON array into its items.
///
/// Fails with `BatchError::InvalidInput` for any other JSON kind.
pub fn into_sequence(value: Value) -> Result<Vec<Value>, BatchError> {
    match value {
        Value::Array(items) => Ok(items),
        other => Err(BatchError::InvalidInput {
            found: kind_name(&other),
        }),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
