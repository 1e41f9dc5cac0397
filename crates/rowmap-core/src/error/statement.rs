use super::Error;

/// Error from the external connection while preparing, binding, or executing
/// a statement.
#[derive(Debug)]
pub(super) struct StatementError {
    pub(super) inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for StatementError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for StatementError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        core::fmt::Display::fmt(&self.inner, f)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates an error from a driver-side statement failure.
    ///
    /// This is the preferred way to convert connection-specific errors into
    /// rowmap errors; the originating message is always preserved.
    pub fn statement(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Statement(StatementError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error is a statement error.
    pub fn is_statement(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Statement(_))
    }
}
