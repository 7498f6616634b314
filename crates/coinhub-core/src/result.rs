//! Convenience result type alias for CoinHub.

use crate::error::AppError;

/// A specialized `Result` type for CoinHub operations.
pub type AppResult<T> = Result<T, AppError>;
