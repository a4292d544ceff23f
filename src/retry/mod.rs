//! Retry Module
//!
//! Bounded retry with exponential backoff for a single asynchronous operation:
//! - RetryPolicy: attempt budget and delay schedule
//! - RetryExecutor: drives one operation until success or the budget runs out

mod executor;
mod policy;

#[cfg(test)]
mod tests;

pub use executor::{RetryExecutor, run_with_retry};
pub use policy::RetryPolicy;
