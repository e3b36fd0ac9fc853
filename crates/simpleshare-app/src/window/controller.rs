//! The window lifecycle controller.
//!
//! Owns the single active window and interprets bus commands against it.
//! Transitions (show startup/main/update, quit) are not applied inline by
//! channel handlers; handlers queue a request here and the host loop applies
//! it, so a transition never races another transition or a command against
//! a half-swapped window.

use tracing::debug;

use simpleshare_common::PlatformError;
use simpleshare_config::AppConfig;
use simpleshare_ipc::{ConfigureArgs, MoveArgs, ResizeArgs};

use super::backend::{WindowBackend, WindowHandle, WindowKind, WindowOptions};

// =============================================================================
// WINDOW CATALOG
// =============================================================================

/// Per-kind creation options, resolved from config once at startup.
#[derive(Debug, Clone)]
pub struct WindowCatalog {
    startup: WindowOptions,
    main: WindowOptions,
    update: WindowOptions,
}

impl WindowCatalog {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            startup: WindowOptions::from(&config.window.startup),
            main: WindowOptions::from(&config.window.main),
            update: WindowOptions::from(&config.window.update),
        }
    }

    fn options_for(&self, kind: WindowKind) -> &WindowOptions {
        match kind {
            WindowKind::Startup => &self.startup,
            WindowKind::Main => &self.main,
            WindowKind::Update => &self.update,
        }
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

struct ActiveWindow {
    kind: WindowKind,
    window: Box<dyn WindowHandle>,
}

pub struct WindowController {
    catalog: WindowCatalog,
    current: Option<ActiveWindow>,
    pending: Option<WindowKind>,
    quit: bool,
}

impl WindowController {
    pub fn new(catalog: WindowCatalog) -> Self {
        Self {
            catalog,
            current: None,
            pending: None,
            quit: false,
        }
    }

    pub fn current_kind(&self) -> Option<WindowKind> {
        self.current.as_ref().map(|active| active.kind)
    }

    pub fn is_current_visible(&self) -> bool {
        self.current
            .as_ref()
            .map(|active| active.window.is_visible())
            .unwrap_or(false)
    }

    /// Queue a transition to `kind`. A newer request supersedes an
    /// unapplied older one.
    pub fn request(&mut self, kind: WindowKind) {
        if let Some(superseded) = self.pending.replace(kind) {
            debug!(?superseded, ?kind, "pending window request superseded");
        }
    }

    pub fn take_pending(&mut self) -> Option<WindowKind> {
        self.pending.take()
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Close the previous window and create the new one, hidden. The caller
    /// rebinds dispatcher handlers before calling [`Self::show_current`].
    pub fn transition(
        &mut self,
        kind: WindowKind,
        backend: &mut dyn WindowBackend,
    ) -> Result<(), PlatformError> {
        if let Some(mut previous) = self.current.take() {
            debug!(from = ?previous.kind, to = ?kind, "closing previous window");
            previous.window.close();
        }
        let options = self.catalog.options_for(kind).clone();
        let window = backend.create(kind, &options)?;
        self.current = Some(ActiveWindow { kind, window });
        Ok(())
    }

    pub fn show_current(&mut self) {
        if let Some(active) = &mut self.current {
            active.window.show();
        }
    }

    /// Tear down the active window on application quit.
    pub fn quit(&mut self) {
        if let Some(mut active) = self.current.take() {
            active.window.close();
        }
    }

    pub fn configure(&mut self, args: &ConfigureArgs) {
        let Some(window) = self.active("configure") else {
            return;
        };
        if let Some(resizable) = args.resizable {
            window.set_resizable(resizable);
        }
        if let Some(movable) = args.movable {
            window.set_movable(movable);
        }
        if let Some(min) = args.min_size {
            window.set_min_size(min.min_width, min.min_height);
        }
        if let Some(max) = args.max_size {
            window.set_max_size(max.max_width, max.max_height);
        }
    }

    pub fn move_window(&mut self, args: &MoveArgs) {
        let Some(window) = self.active("move") else {
            return;
        };
        if args.center.unwrap_or(false) {
            window.center();
            return;
        }
        // Presence, not truthiness: (0, 0) is a legal target.
        match (args.x, args.y) {
            (Some(x), Some(y)) => window.set_position(x, y),
            _ => debug!("move ignored: both x and y required"),
        }
    }

    pub fn resize(&mut self, args: &ResizeArgs) {
        let Some(window) = self.active("resize") else {
            return;
        };
        if args.around_center.unwrap_or(false) {
            let (x, y) = window.position();
            let (width, height) = window.size();
            let shifted_x = x + (width as i32 - args.width as i32) / 2;
            let shifted_y = y + (height as i32 - args.height as i32) / 2;
            window.set_position(shifted_x, shifted_y);
        }
        if args.override_minimum_size.unwrap_or(false) {
            // Widen the constraint first so the resize is not clamped.
            window.set_min_size(args.width, args.height);
        }
        window.set_size(args.width, args.height);
    }

    pub fn maximize_or_restore(&mut self) {
        let Some(window) = self.active("maximize_or_restore") else {
            return;
        };
        if window.is_maximized() {
            window.unmaximize();
        } else {
            window.maximize();
        }
    }

    pub fn minimize(&mut self) {
        if let Some(window) = self.active("minimize") {
            window.minimize();
        }
    }

    pub fn restore(&mut self) {
        if let Some(window) = self.active("restore") {
            window.restore();
        }
    }

    /// A command arriving with no live window is a stale-window race; it is
    /// dropped, never a crash.
    fn active(&mut self, op: &str) -> Option<&mut dyn WindowHandle> {
        match &mut self.current {
            Some(active) => Some(active.window.as_mut()),
            None => {
                debug!(op, "window command ignored: no active window");
                None
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
