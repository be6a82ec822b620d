//! Convenience result type alias for GreenTrace.

use crate::error::AppError;

/// A specialized `Result` type for GreenTrace operations.
pub type AppResult<T> = Result<T, AppError>;

/// Lets a caller treat an unknown identifier as "nothing happened".
///
/// Registry mutators report unknown ids as `ErrorKind::NotFound`. Callers that
/// want unknown ids to be a silent no-op chain
/// `.ignore_not_found()` and get `Ok(None)` instead.
pub trait NotFoundExt<T> {
    /// Map `Err(NotFound)` to `Ok(None)` and `Ok(v)` to `Ok(Some(v))`.
    fn ignore_not_found(self) -> AppResult<Option<T>>;
}

impl<T> NotFoundExt<T> for AppResult<T> {
    fn ignore_not_found(self) -> AppResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
