//! Cancellation Module
//!
//! A shared signal that lets a caller stop an in-progress run. Pending and
//! in-flight tasks resolve to `TaskError::Cancelled` once it fires.

mod token;


pub use token::CancelToken;
pub(crate) use token::wait_cancelled;
