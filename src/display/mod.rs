//! Display surface - window and graphics context collaborator
//!
//! The box never touches a surface; the render loop polls the surface each
//! frame and reads box state separately.

mod headless;
mod platform;

pub use headless::HeadlessSurface;
pub use platform::{ErrorCallback, Platform, PlatformError};

use glam::Vec4;

use crate::report::{messages, ErrorFlags, Report, Result};

/// Surface dimension in pixels (0 = unset)
pub type SurfaceDimension = u32;

/// A window with a graphics context
///
/// Construction is the "create" step; [`DisplaySurface::init`] opens the
/// window and [`DisplaySurface::deinit`] closes it again.
pub trait DisplaySurface {
    fn init(
        &mut self,
        platform: &Platform,
        title: &str,
        width: SurfaceDimension,
        height: SurfaceDimension,
    ) -> Result<()>;

    fn deinit(&mut self) -> Result<()>;

    fn is_initialized(&self) -> bool;

    fn size(&self) -> Result<(SurfaceDimension, SurfaceDimension)>;

    fn set_size(&mut self, width: SurfaceDimension, height: SurfaceDimension) -> Result<()>;

    fn title(&self) -> Result<String>;

    fn set_title(&mut self, title: &str) -> Result<()>;

    /// Whether the user (or the platform) asked the window to close
    fn should_close(&self) -> bool;

    fn poll_events(&mut self);

    /// Clear the framebuffer to `color` (RGBA)
    fn clear(&mut self, color: Vec4) -> Result<()>;

    /// Swap buffers
    fn present(&mut self) -> Result<()>;

    /// Release the surface. An initialized surface is handed back untouched.
    #[allow(clippy::result_large_err)]
    fn destroy(self) -> std::result::Result<(), (Self, Report)>
    where
        Self: Sized,
    {
        if self.is_initialized() {
            return Err((
                self,
                Report::new(ErrorFlags::WINDOW_NOT_DEINIT, messages::WINDOW_NOT_DEINIT),
            ));
        }
        Ok(())
    }
}
