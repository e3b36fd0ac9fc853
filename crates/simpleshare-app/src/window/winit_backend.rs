//! winit-backed window implementation.

use tracing::debug;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use simpleshare_common::PlatformError;

use super::backend::{WindowBackend, WindowHandle, WindowKind, WindowOptions};

/// Short-lived adapter over the live event loop. winit only lends out the
/// `ActiveEventLoop` inside event-loop callbacks, so the host constructs one
/// of these per loop turn and hands it to the controller.
pub struct WinitBackend<'a> {
    event_loop: &'a ActiveEventLoop,
}

impl<'a> WinitBackend<'a> {
    pub fn new(event_loop: &'a ActiveEventLoop) -> Self {
        Self { event_loop }
    }
}

impl WindowBackend for WinitBackend<'_> {
    fn create(
        &mut self,
        kind: WindowKind,
        options: &WindowOptions,
    ) -> Result<Box<dyn WindowHandle>, PlatformError> {
        let mut attrs = Window::default_attributes()
            .with_title(options.title.as_str())
            .with_inner_size(LogicalSize::new(options.width, options.height))
            .with_resizable(options.resizable)
            .with_visible(false);
        if let Some((width, height)) = options.min_size {
            attrs = attrs.with_min_inner_size(LogicalSize::new(width, height));
        }

        let window = self
            .event_loop
            .create_window(attrs)
            .map_err(|e| PlatformError::WindowError(e.to_string()))?;
        debug!(?kind, title = %options.title, "window created");

        Ok(Box::new(WinitWindow { window }))
    }
}

struct WinitWindow {
    window: Window,
}

impl WindowHandle for WinitWindow {
    fn show(&mut self) {
        self.window.set_visible(true);
        self.window.focus_window();
    }

    fn close(&mut self) {
        // The OS window is destroyed when the handle drops; hide it now so
        // there is no dead-window flash while the successor is wired up.
        self.window.set_visible(false);
    }

    fn is_visible(&self) -> bool {
        self.window.is_visible().unwrap_or(false)
    }

    fn set_resizable(&mut self, resizable: bool) {
        self.window.set_resizable(resizable);
    }

    fn set_movable(&mut self, _movable: bool) {
        debug!("movable flag not supported by this backend");
    }

    fn set_min_size(&mut self, width: u32, height: u32) {
        self.window
            .set_min_inner_size(Some(LogicalSize::new(width, height)));
    }

    fn set_max_size(&mut self, width: u32, height: u32) {
        self.window
            .set_max_inner_size(Some(LogicalSize::new(width, height)));
    }

    fn set_position(&mut self, x: i32, y: i32) {
        self.window.set_outer_position(PhysicalPosition::new(x, y));
    }

    fn center(&mut self) {
        let Some(monitor) = self.window.current_monitor() else {
            debug!("center ignored: no monitor");
            return;
        };
        let monitor_size = monitor.size();
        let monitor_position = monitor.position();
        let window_size = self.window.outer_size();
        let x = monitor_position.x + (monitor_size.width.saturating_sub(window_size.width) / 2) as i32;
        let y = monitor_position.y + (monitor_size.height.saturating_sub(window_size.height) / 2) as i32;
        self.window.set_outer_position(PhysicalPosition::new(x, y));
    }

    fn set_size(&mut self, width: u32, height: u32) {
        let _ = self
            .window
            .request_inner_size(LogicalSize::new(width, height));
    }

    fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn position(&self) -> (i32, i32) {
        self.window
            .outer_position()
            .map(|p| (p.x, p.y))
            .unwrap_or((0, 0))
    }

    fn maximize(&mut self) {
        self.window.set_maximized(true);
    }

    fn unmaximize(&mut self) {
        self.window.set_maximized(false);
    }

    fn is_maximized(&self) -> bool {
        self.window.is_maximized()
    }

    fn minimize(&mut self) {
        self.window.set_minimized(true);
    }

    fn restore(&mut self) {
        self.window.set_minimized(false);
    }
}
