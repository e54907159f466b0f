//! Error types for loading members and touching config/log files.
//!
//! Failures are boxed into [`DynError`]. [`Context::with_ctx`] records what was
//! being attempted; [`report`] flattens the cause chain into one line for the
//! status bar and the log.
//!
use std::error::Error;
use std::fmt;

pub type DynError = Box<dyn Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

pub trait Context<T> {
    fn with_ctx<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> Context<T> for std::result::Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    fn with_ctx<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            Box::new(ContextError {
                action: f().to_string(),
                cause: Box::new(e),
            }) as DynError
        })
    }
}

/// The operation that failed; the underlying error is its `source()`.
#[derive(Debug)]
pub struct ContextError {
    pub action: String,
    cause: DynError,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.action)
    }
}

impl Error for ContextError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.cause)
    }
}

/// The member endpoint answered with a non-success status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpStatusError {
    pub url: String,
    pub status: u16,
    pub reason: Option<&'static str>,
}

impl fmt::Display for HttpStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {} returned {}", self.url, self.status)?;
        if let Some(reason) = self.reason {
            write!(f, " {reason}")?;
        }
        Ok(())
    }
}

impl Error for HttpStatusError {}

/// Join an error and all of its causes with `": "`.
pub fn report(err: &(dyn Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(e) = cause {
        out.push_str(": ");
        out.push_str(&e.to_string());
        cause = e.source();
    }
    out
}
