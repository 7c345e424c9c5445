mod onair;

pub use onair::{ApiErrorBody, ApiErrorObject, OnairError};

pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}
