//! Failure reports shared by every box, plock and display operation
//!
//! A [`Report`] carries a bitset of [`ErrorFlags`] plus a static message.
//! Flags are combinable: a wrapping failure (e.g. `PLOCKS_INIT_FAILED`) keeps
//! the flags of the report it wraps.

use bitflags::bitflags;
use thiserror::Error;

bitflags! {
    /// Error kinds raised by sandbox operations
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ErrorFlags: u64 {
        // Common
        /// A required argument was set to an unset value (0 or empty)
        const MISSING_ARGUMENT = 1 << 0;
        /// Storage could not be allocated or reallocated
        const MEMORY_FAILURE = 1 << 1;

        // Display surface
        const WINDOW_NOT_INIT = 1 << 2;
        const WINDOW_NOT_DEINIT = 1 << 3;
        const WINDOW_ALREADY_INIT = 1 << 4;
        const WINDOW_ALREADY_DEINIT = 1 << 5;
        /// Process-wide platform setup failed
        const PLATFORM_INIT_FAILED = 1 << 6;
        /// Creating the native window handle failed
        const HANDLE_INIT_FAILED = 1 << 7;
        /// Creating the graphics context failed
        const CONTEXT_INIT_FAILED = 1 << 8;
        const GET_SIZE_FAILED = 1 << 9;
        const SET_SIZE_FAILED = 1 << 10;
        const GET_TITLE_FAILED = 1 << 11;
        const SET_TITLE_FAILED = 1 << 12;

        // Box
        const BOX_NOT_INIT = 1 << 13;
        const BOX_NOT_DEINIT = 1 << 14;
        const BOX_ALREADY_INIT = 1 << 15;
        const BOX_ALREADY_DEINIT = 1 << 16;
        /// Sizing the plock array failed during box init/resize
        const PLOCKS_INIT_FAILED = 1 << 17;
        /// Sizing the plock-ID matrix failed during box init/resize
        const PLOCK_IDS_INIT_FAILED = 1 << 18;

        // Plock storage
        /// Coordinates or index outside the current dimensions
        const OUT_OF_BOUNDS = 1 << 19;
        /// No plock type ids left to hand out
        const TYPE_REGISTRY_FULL = 1 << 20;
    }
}

/// Report messages
pub mod messages {
    pub const MISSING_ARGUMENT: &str =
        "One or more required arguments set to an invalid value (NULL or 0)";
    pub const MEMORY_FAILURE: &str =
        "Error executing a memory operation (allocation, reallocation, and deallocation)";
    pub const OUT_OF_BOUNDS: &str = "Position is outside the current dimensions";
    pub const TYPE_REGISTRY_FULL: &str = "No plock type ids left";

    pub const WINDOW_ALREADY_INIT: &str = "Window already initialized";
    pub const WINDOW_ALREADY_DEINIT: &str = "Window already deinitialized";
    pub const WINDOW_NOT_INIT: &str = "Window not initialized";
    pub const WINDOW_NOT_DEINIT: &str = "Window not deinitialized";
    pub const PLATFORM_INIT_FAILED: &str = "Platform failed to initialize";
    pub const HANDLE_INIT_FAILED: &str = "Failed to create window handle";
    pub const CONTEXT_INIT_FAILED: &str = "Failed to initialize graphics context";
    pub const GET_SIZE_FAILED: &str = "Getting window size failed";
    pub const SET_SIZE_FAILED: &str = "Setting window size failed";
    pub const GET_TITLE_FAILED: &str = "Getting window title failed";
    pub const SET_TITLE_FAILED: &str = "Setting window title failed";

    pub const BOX_ALREADY_INIT: &str = "Box already initialized";
    pub const BOX_ALREADY_DEINIT: &str = "Box already deinitialized";
    pub const BOX_NOT_INIT: &str = "Box not initialized";
    pub const BOX_NOT_DEINIT: &str = "Box not deinitialized";
    pub const PLOCKS_INIT_FAILED: &str = "Failed to size the plock array";
    pub const PLOCK_IDS_INIT_FAILED: &str = "Failed to size the plock ID matrix";
}

/// Failure value returned by every fallible sandbox operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Report {
    pub flags: ErrorFlags,
    pub message: &'static str,
    #[source]
    pub source: Option<Box<Report>>,
}

impl Report {
    pub fn new(flags: ErrorFlags, message: &'static str) -> Self {
        Self {
            flags,
            message,
            source: None,
        }
    }

    /// Wrap `cause`, keeping its flags alongside the new ones
    pub fn wrap(flags: ErrorFlags, message: &'static str, cause: Report) -> Self {
        Self {
            flags: flags | cause.flags,
            message,
            source: Some(Box::new(cause)),
        }
    }

    pub fn missing_argument() -> Self {
        Self::new(ErrorFlags::MISSING_ARGUMENT, messages::MISSING_ARGUMENT)
    }

    pub fn memory_failure() -> Self {
        Self::new(ErrorFlags::MEMORY_FAILURE, messages::MEMORY_FAILURE)
    }

    pub fn out_of_bounds() -> Self {
        Self::new(ErrorFlags::OUT_OF_BOUNDS, messages::OUT_OF_BOUNDS)
    }

    /// Whether every flag in `flags` is set on this report
    pub fn has(&self, flags: ErrorFlags) -> bool {
        self.flags.contains(flags)
    }

    /// The innermost report in the wrapping chain
    pub fn root_cause(&self) -> &Report {
        let mut report = self;
        while let Some(source) = &report.source {
            report = source;
        }
        report
    }
}

pub type Result<T> = std::result::Result<T, Report>;
