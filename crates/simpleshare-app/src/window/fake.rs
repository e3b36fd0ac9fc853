//! Fake window backend for lifecycle tests. Records every operation so
//! tests can assert on window state without a display server.

use std::sync::{Arc, Mutex};

use simpleshare_common::PlatformError;

use super::backend::{WindowBackend, WindowHandle, WindowKind, WindowOptions};

#[derive(Debug, Clone, Default)]
pub struct FakeWindowState {
    pub visible: bool,
    pub closed: bool,
    pub resizable: Option<bool>,
    pub movable: Option<bool>,
    pub min_size: Option<(u32, u32)>,
    pub max_size: Option<(u32, u32)>,
    pub position: (i32, i32),
    pub moved: bool,
    pub centered: bool,
    pub size: (u32, u32),
    pub maximized: bool,
    pub minimized: bool,
    pub minimize_calls: u32,
}

pub struct FakeWindow {
    state: Arc<Mutex<FakeWindowState>>,
}

impl WindowHandle for FakeWindow {
    fn show(&mut self) {
        self.state.lock().unwrap().visible = true;
    }

    fn close(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.visible = false;
        state.closed = true;
    }

    fn is_visible(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.visible && !state.closed
    }

    fn set_resizable(&mut self, resizable: bool) {
        self.state.lock().unwrap().resizable = Some(resizable);
    }

    fn set_movable(&mut self, movable: bool) {
        self.state.lock().unwrap().movable = Some(movable);
    }

    fn set_min_size(&mut self, width: u32, height: u32) {
        self.state.lock().unwrap().min_size = Some((width, height));
    }

    fn set_max_size(&mut self, width: u32, height: u32) {
        self.state.lock().unwrap().max_size = Some((width, height));
    }

    fn set_position(&mut self, x: i32, y: i32) {
        let mut state = self.state.lock().unwrap();
        state.position = (x, y);
        state.moved = true;
        state.centered = false;
    }

    fn center(&mut self) {
        self.state.lock().unwrap().centered = true;
    }

    fn set_size(&mut self, width: u32, height: u32) {
        let mut state = self.state.lock().unwrap();
        // Honor the minimum-size constraint like a real window manager.
        let (min_w, min_h) = state.min_size.unwrap_or((0, 0));
        state.size = (width.max(min_w), height.max(min_h));
    }

    fn size(&self) -> (u32, u32) {
        self.state.lock().unwrap().size
    }

    fn position(&self) -> (i32, i32) {
        self.state.lock().unwrap().position
    }

    fn maximize(&mut self) {
        self.state.lock().unwrap().maximized = true;
    }

    fn unmaximize(&mut self) {
        self.state.lock().unwrap().maximized = false;
    }

    fn is_maximized(&self) -> bool {
        self.state.lock().unwrap().maximized
    }

    fn minimize(&mut self) {
        let mut state = self.state.lock().unwrap();
        state.minimized = true;
        state.minimize_calls += 1;
    }

    fn restore(&mut self) {
        self.state.lock().unwrap().minimized = false;
    }
}

/// Backend that records every window it creates, keeping a shared handle to
/// each window's state so tests can inspect windows the controller has
/// already dropped.
#[derive(Default)]
pub struct FakeBackend {
    pub created: Vec<(WindowKind, Arc<Mutex<FakeWindowState>>)>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, index: usize) -> FakeWindowState {
        self.created[index].1.lock().unwrap().clone()
    }

    pub fn visible_count(&self) -> usize {
        self.created
            .iter()
            .filter(|(_, state)| {
                let state = state.lock().unwrap();
                state.visible && !state.closed
            })
            .count()
    }
}

impl WindowBackend for FakeBackend {
    fn create(
        &mut self,
        kind: WindowKind,
        options: &WindowOptions,
    ) -> Result<Box<dyn WindowHandle>, PlatformError> {
        let state = Arc::new(Mutex::new(FakeWindowState {
            resizable: Some(options.resizable),
            min_size: options.min_size,
            size: (options.width, options.height),
            ..Default::default()
        }));
        self.created.push((kind, Arc::clone(&state)));
        Ok(Box::new(FakeWindow { state }))
    }
}
