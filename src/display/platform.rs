//! Process-scoped windowing platform state
//!
//! Replaces one-time global library setup and a global error callback: the
//! platform is created once by the caller and passed to every surface.

use std::cell::Cell;

/// Receives (error kind, description) for errors raised by the platform
pub type ErrorCallback = Box<dyn Fn(PlatformError, &str)>;

/// Kinds of error a platform hands to its [`ErrorCallback`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    /// The platform was terminated before the call
    NotRunning,
    /// No graphics context could be created
    ContextUnavailable,
    /// An argument was outside the accepted range
    InvalidValue,
}

pub struct Platform {
    error_callback: ErrorCallback,
    running: bool,
    errors_reported: Cell<u32>,
}

impl Platform {
    /// Start the platform, logging errors through `log::error!`
    pub fn init() -> Self {
        Self::with_error_callback(Box::new(|code, description| {
            log::error!("Platform error {:?}: {}", code, description);
        }))
    }

    pub fn with_error_callback(error_callback: ErrorCallback) -> Self {
        log::debug!("Platform initialized");
        Self {
            error_callback,
            running: true,
            errors_reported: Cell::new(0),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Forward an error to the callback
    pub fn report_error(&self, code: PlatformError, description: &str) {
        self.errors_reported.set(self.errors_reported.get() + 1);
        (self.error_callback)(code, description);
    }

    pub fn errors_reported(&self) -> u32 {
        self.errors_reported.get()
    }

    /// Shut the platform down; surfaces can no longer be initialized
    pub fn terminate(&mut self) {
        if self.running {
            self.running = false;
            log::debug!("Platform terminated");
        }
    }
}

impl Drop for Platform {
    fn drop(&mut self) {
        self.terminate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_error_callback_receives_errors() {
        let seen = Rc::new(Cell::new(None));
        let seen_in_callback = Rc::clone(&seen);
        let platform = Platform::with_error_callback(Box::new(move |code, _| {
            seen_in_callback.set(Some(code));
        }));

        platform.report_error(PlatformError::InvalidValue, "bad value");
        assert_eq!(seen.get(), Some(PlatformError::InvalidValue));
        assert_eq!(platform.errors_reported(), 1);
    }

    #[test]
    fn test_terminate() {
        let mut platform = Platform::init();
        assert!(platform.is_running());
        platform.terminate();
        assert!(!platform.is_running());
    }
}
