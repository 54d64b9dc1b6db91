//! In-memory surface for tests and display-less runs

use glam::Vec4;

use super::{DisplaySurface, Platform, PlatformError, SurfaceDimension};
use crate::report::{messages, ErrorFlags, Report, Result};

/// Surface with no native window behind it
///
/// Requests close once `max_frames` frames have been presented.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    initialized: bool,
    title: Option<String>,
    width: SurfaceDimension,
    height: SurfaceDimension,
    max_frames: Option<u64>,
    frames_presented: u64,
    clear_color: Vec4,
    close_requested: bool,
    fail_context: bool,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_frames(max_frames: u64) -> Self {
        Self {
            max_frames: Some(max_frames),
            ..Self::default()
        }
    }

    /// Make the next `init` fail while creating the graphics context
    pub fn fail_context_creation(mut self) -> Self {
        self.fail_context = true;
        self
    }

    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn clear_color(&self) -> Vec4 {
        self.clear_color
    }

    fn ensure_initialized(&self) -> Result<()> {
        if !self.initialized {
            return Err(Report::new(
                ErrorFlags::WINDOW_NOT_INIT,
                messages::WINDOW_NOT_INIT,
            ));
        }
        Ok(())
    }
}

impl DisplaySurface for HeadlessSurface {
    fn init(
        &mut self,
        platform: &Platform,
        title: &str,
        width: SurfaceDimension,
        height: SurfaceDimension,
    ) -> Result<()> {
        if title.is_empty() || width == 0 || height == 0 {
            return Err(Report::missing_argument());
        }
        if self.initialized {
            return Err(Report::new(
                ErrorFlags::WINDOW_ALREADY_INIT,
                messages::WINDOW_ALREADY_INIT,
            ));
        }
        if !platform.is_running() {
            platform.report_error(PlatformError::NotRunning, "Platform is not running");
            return Err(Report::new(
                ErrorFlags::PLATFORM_INIT_FAILED,
                messages::PLATFORM_INIT_FAILED,
            ));
        }
        if self.fail_context {
            platform.report_error(
                PlatformError::ContextUnavailable,
                "No graphics context available",
            );
            return Err(Report::new(
                ErrorFlags::CONTEXT_INIT_FAILED,
                messages::CONTEXT_INIT_FAILED,
            ));
        }

        self.title = Some(title.to_owned());
        self.width = width;
        self.height = height;
        self.frames_presented = 0;
        self.close_requested = false;
        self.initialized = true;

        log::debug!("Initialized headless surface '{}' {}x{}", title, width, height);
        Ok(())
    }

    fn deinit(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(Report::new(
                ErrorFlags::WINDOW_ALREADY_DEINIT,
                messages::WINDOW_ALREADY_DEINIT,
            ));
        }

        self.title = None;
        self.width = 0;
        self.height = 0;
        self.initialized = false;

        log::debug!("Deinitialized headless surface");
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn size(&self) -> Result<(SurfaceDimension, SurfaceDimension)> {
        self.ensure_initialized()?;
        if self.width == 0 || self.height == 0 {
            return Err(Report::new(
                ErrorFlags::GET_SIZE_FAILED,
                messages::GET_SIZE_FAILED,
            ));
        }
        Ok((self.width, self.height))
    }

    fn set_size(&mut self, width: SurfaceDimension, height: SurfaceDimension) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Report::missing_argument());
        }
        self.ensure_initialized()?;

        self.width = width;
        self.height = height;
        Ok(())
    }

    fn title(&self) -> Result<String> {
        self.ensure_initialized()?;
        self.title.clone().ok_or_else(|| {
            Report::new(ErrorFlags::GET_TITLE_FAILED, messages::GET_TITLE_FAILED)
        })
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        if title.is_empty() {
            return Err(Report::missing_argument());
        }
        self.ensure_initialized()?;

        self.title = Some(title.to_owned());
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.close_requested
            || self
                .max_frames
                .is_some_and(|max| self.frames_presented >= max)
    }

    fn poll_events(&mut self) {}

    fn clear(&mut self, color: Vec4) -> Result<()> {
        self.ensure_initialized()?;
        self.clear_color = color;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        self.frames_presented += 1;
        Ok(())
    }
}
