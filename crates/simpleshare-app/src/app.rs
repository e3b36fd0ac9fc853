//! Top-level host application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop: each turn pumps the message bus, then applies whatever
//! window-lifecycle command the handlers queued.

use std::time::{Duration, Instant};

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::WindowId;

use simpleshare_ipc::{Bridge, HostDispatcher};

use crate::window::winit_backend::WinitBackend;
use crate::wiring::{self, HostContext};

/// How often the loop wakes to drain the bus when no window events arrive.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct ShareApp {
    dispatcher: HostDispatcher,
    ctx: HostContext,
    bridge: Bridge,
}

impl ShareApp {
    pub fn new(dispatcher: HostDispatcher, ctx: HostContext, bridge: Bridge) -> Self {
        Self {
            dispatcher,
            ctx,
            bridge,
        }
    }

    /// One loop turn: drain both bus directions, then apply any queued
    /// window transition with the live event loop.
    fn turn(&mut self, event_loop: &ActiveEventLoop) {
        self.dispatcher.pump();
        self.bridge.pump();

        let mut backend = WinitBackend::new(event_loop);
        match wiring::apply_pending(&mut self.dispatcher, &self.ctx, &mut backend) {
            Ok(true) => event_loop.exit(),
            Ok(false) => {}
            Err(e) => tracing::error!(error = %e, "window transition failed"),
        }
    }
}

impl ApplicationHandler for ShareApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.turn(event_loop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            tracing::info!("close requested from window manager");
            self.ctx.controller.lock().unwrap().request_quit();
            self.turn(event_loop);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.turn(event_loop);
        if !event_loop.exiting() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
        }
    }
}
