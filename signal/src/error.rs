use core::fmt;
use core::sync::atomic::{AtomicI32, Ordering};
use signal_defs::Errno;

/// Failure of a signal-layer operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Rejected locally, the kernel was never called.
    InvalidArgument,
    /// Deliberately unimplemented operation.
    NotSupported,
    /// Negative status returned by a kernel primitive.
    Kernel(isize),
    /// The process-wide context has not been created yet.
    Uninitialized,
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// The errno value this error is reported as.
    pub fn errno(&self) -> i32 {
        match self {
            Error::InvalidArgument => Errno::EINVAL as i32,
            Error::NotSupported | Error::Uninitialized => Errno::ENOSYS as i32,
            Error::Kernel(status) => status.unsigned_abs() as i32,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "invalid argument"),
            Error::NotSupported => write!(f, "operation not supported"),
            Error::Kernel(status) => write!(f, "kernel error {}", status),
            Error::Uninitialized => write!(f, "signal layer not initialized"),
        }
    }
}

/// Maps a kernel status to `Ok` when non-negative.
#[inline]
pub(crate) fn check(status: isize) -> Result<isize> {
    if status < 0 {
        Err(Error::Kernel(status))
    } else {
        Ok(status)
    }
}

static ERRNO: AtomicI32 = AtomicI32::new(0);

/// Process-wide error code of the last failed call.
#[inline]
pub fn errno() -> i32 {
    ERRNO.load(Ordering::Relaxed)
}

#[inline]
pub fn set_errno(code: i32) {
    ERRNO.store(code, Ordering::Relaxed);
}

/// Stores the errno of a failed result, passing the result through.
#[inline]
pub(crate) fn record<T>(result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        set_errno(e.errno());
    }
    result
}
