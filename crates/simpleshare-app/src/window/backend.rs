//! The seam between the lifecycle controller and the OS window system.
//!
//! The controller only speaks these traits, so lifecycle behavior is
//! testable against fake windows without a display server.

use simpleshare_common::PlatformError;
use simpleshare_config::schema::WindowParams;

/// The kinds of window the host can show. At most one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowKind {
    Startup,
    Main,
    Update,
}

/// Creation-time parameters for one window kind.
#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub min_size: Option<(u32, u32)>,
}

impl From<&WindowParams> for WindowOptions {
    fn from(params: &WindowParams) -> Self {
        Self {
            title: params.title.clone(),
            width: params.width,
            height: params.height,
            resizable: params.resizable,
            min_size: match (params.min_width, params.min_height) {
                (Some(w), Some(h)) => Some((w, h)),
                _ => None,
            },
        }
    }
}

/// Operations the bus commands need from a live window.
pub trait WindowHandle: Send {
    fn show(&mut self);
    fn close(&mut self);
    fn is_visible(&self) -> bool;

    fn set_resizable(&mut self, resizable: bool);
    fn set_movable(&mut self, movable: bool);
    fn set_min_size(&mut self, width: u32, height: u32);
    fn set_max_size(&mut self, width: u32, height: u32);

    fn set_position(&mut self, x: i32, y: i32);
    fn center(&mut self);
    fn set_size(&mut self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);
    fn position(&self) -> (i32, i32);

    fn maximize(&mut self);
    fn unmaximize(&mut self);
    fn is_maximized(&self) -> bool;
    fn minimize(&mut self);
    fn restore(&mut self);
}

/// Creates windows for the controller. Windows are created hidden; the
/// controller shows them once handler rebinding is complete.
pub trait WindowBackend {
    fn create(
        &mut self,
        kind: WindowKind,
        options: &WindowOptions,
    ) -> Result<Box<dyn WindowHandle>, PlatformError>;
}
