use crate::error::EnvelopeError;

pub type EResult<R> = Result<R, EnvelopeError>;

/// A helper trait for `EResult` that provides additional methods for error handling.
pub trait EResultHelper<T> {
    /// Sets the context for the error.
    ///
    /// # Errors
    ///
    /// Returns an `EResult` with the specified context if the original result is an error.
    fn context(self, context: &str) -> EResult<T>;

    /// Sets the context for the error using a closure.
    ///
    /// # Errors
    ///
    /// Returns an `EResult` with the context returned by the closure if the original result is an error.
    fn with_context<O>(self, op: O) -> EResult<T>
    where
        O: FnOnce() -> String;
}

impl<T, E> EResultHelper<T> for Result<T, E>
where
    E: std::error::Error,
{
    fn context(self, context: &str) -> EResult<T> {
        self.map_err(|e| EnvelopeError::ServerError(format!("{context}: {e}")))
    }

    fn with_context<O>(self, op: O) -> EResult<T>
    where
        O: FnOnce() -> String,
    {
        self.map_err(|e| EnvelopeError::ServerError(format!("{}: {e}", op())))
    }
}

impl<T> EResultHelper<T> for Option<T> {
    fn context(self, context: &str) -> EResult<T> {
        self.ok_or_else(|| EnvelopeError::ServerError(context.to_owned()))
    }

    fn with_context<O>(self, op: O) -> EResult<T>
    where
        O: FnOnce() -> String,
    {
        self.ok_or_else(|| EnvelopeError::ServerError(op()))
    }
}
