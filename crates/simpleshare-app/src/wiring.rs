//! Channel handler wiring.
//!
//! Registers one handler per registry channel against the Host Dispatcher.
//! Registration iterates `Channel::ALL` through an exhaustive match, so a
//! channel added to the registry without a handler is a compile error, not
//! a runtime surprise.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::runtime::Handle;

use simpleshare_common::ShareError;
use simpleshare_config::SettingsStore;
use simpleshare_ipc::{
    parse_args, Channel, ConfigureArgs, GetFileArgs, HostDispatcher, ItemKeyArgs, LogArgs,
    MoveArgs, ResizeArgs, SaveFileArgs, SetItemArgs,
};

use crate::services::{self, FilePicker};
use crate::window::backend::{WindowBackend, WindowKind};
use crate::window::controller::WindowController;

// =============================================================================
// CONTEXT
// =============================================================================

/// Everything the channel handlers close over.
pub struct HostContext {
    pub controller: Arc<Mutex<WindowController>>,
    pub settings: Arc<Mutex<dyn SettingsStore>>,
    pub picker: Arc<dyn FilePicker>,
    pub rt: Handle,
    pub cookies_file: PathBuf,
    pub downloads_dir: PathBuf,
}

// =============================================================================
// HANDLER REGISTRATION
// =============================================================================

/// Register a handler for every channel in the registry.
pub fn register_handlers(dispatcher: &mut HostDispatcher, ctx: &HostContext) {
    for channel in Channel::ALL {
        match channel {
            Channel::Configure => {
                let controller = Arc::clone(&ctx.controller);
                dispatcher.on(channel, move |payload| {
                    let args: ConfigureArgs = parse_args(channel, &payload)?;
                    controller.lock().unwrap().configure(&args);
                    Ok(())
                });
            }
            Channel::Move => {
                let controller = Arc::clone(&ctx.controller);
                dispatcher.on(channel, move |payload| {
                    let args: MoveArgs = parse_args(channel, &payload)?;
                    controller.lock().unwrap().move_window(&args);
                    Ok(())
                });
            }
            Channel::Resize => {
                let controller = Arc::clone(&ctx.controller);
                dispatcher.on(channel, move |payload| {
                    let args: ResizeArgs = parse_args(channel, &payload)?;
                    controller.lock().unwrap().resize(&args);
                    Ok(())
                });
            }
            Channel::ShowMainWindow => {
                register_show(dispatcher, ctx, channel, WindowKind::Main);
            }
            Channel::ShowStartupWindow => {
                register_show(dispatcher, ctx, channel, WindowKind::Startup);
            }
            Channel::ShowUpdateWindow => {
                register_show(dispatcher, ctx, channel, WindowKind::Update);
            }
            Channel::Quit => {
                let controller = Arc::clone(&ctx.controller);
                dispatcher.on(channel, move |_payload| {
                    controller.lock().unwrap().request_quit();
                    Ok(())
                });
            }
            Channel::MaximizeOrRestore => {
                let controller = Arc::clone(&ctx.controller);
                dispatcher.on(channel, move |_payload| {
                    controller.lock().unwrap().maximize_or_restore();
                    Ok(())
                });
            }
            Channel::Minimize => {
                let controller = Arc::clone(&ctx.controller);
                dispatcher.on(channel, move |_payload| {
                    controller.lock().unwrap().minimize();
                    Ok(())
                });
            }
            Channel::ClearCookies => {
                let path = ctx.cookies_file.clone();
                dispatcher.on(channel, move |_payload| {
                    services::clear_cookies(&path)?;
                    tracing::info!("session cookies cleared");
                    Ok(())
                });
            }
            Channel::Restore => {
                let controller = Arc::clone(&ctx.controller);
                dispatcher.on(channel, move |_payload| {
                    controller.lock().unwrap().restore();
                    Ok(())
                });
            }
            Channel::SetItem => {
                let settings = Arc::clone(&ctx.settings);
                dispatcher.on(channel, move |payload| {
                    let args: SetItemArgs = parse_args(channel, &payload)?;
                    settings.lock().unwrap().set(&args.key, &args.item)?;
                    Ok(())
                });
            }
            Channel::GetItem => {
                let settings = Arc::clone(&ctx.settings);
                dispatcher.handle(channel, move |payload| {
                    let settings = Arc::clone(&settings);
                    Box::pin(async move {
                        let args: ItemKeyArgs = parse_args(channel, &payload)?;
                        // Missing keys read as null, never as an error.
                        Ok(match settings.lock().unwrap().get(&args.key) {
                            Some(value) => json!(value),
                            None => Value::Null,
                        })
                    })
                });
            }
            Channel::RemoveItem => {
                let settings = Arc::clone(&ctx.settings);
                dispatcher.on(channel, move |payload| {
                    let args: ItemKeyArgs = parse_args(channel, &payload)?;
                    settings.lock().unwrap().remove(&args.key)?;
                    Ok(())
                });
            }
            Channel::Log => {
                dispatcher.on(channel, move |payload| {
                    let args: LogArgs = parse_args(channel, &payload)?;
                    if args.optional_params.is_empty() {
                        tracing::info!(target: "simpleshare::ui", "{}", args.message);
                    } else {
                        tracing::info!(target: "simpleshare::ui", params = ?args.optional_params, "{}", args.message);
                    }
                    Ok(())
                });
            }
            Channel::ErrorLog => {
                dispatcher.on(channel, move |payload| {
                    let args: LogArgs = parse_args(channel, &payload)?;
                    if args.optional_params.is_empty() {
                        tracing::error!(target: "simpleshare::ui", "{}", args.message);
                    } else {
                        tracing::error!(target: "simpleshare::ui", params = ?args.optional_params, "{}", args.message);
                    }
                    Ok(())
                });
            }
            Channel::GetFile => {
                let picker = Arc::clone(&ctx.picker);
                dispatcher.handle(channel, move |payload| {
                    let picker = Arc::clone(&picker);
                    Box::pin(async move {
                        let args: GetFileArgs = parse_args(channel, &payload)?;
                        let filters = args.filters.unwrap_or_default();
                        let picked =
                            tokio::task::spawn_blocking(move || picker.pick_file(&filters))
                                .await
                                .map_err(|e| {
                                    ShareError::Other(format!("file dialog task failed: {e}"))
                                })?;
                        Ok(match picked {
                            Some(path) => json!(path.to_string_lossy()),
                            None => Value::Null,
                        })
                    })
                });
            }
            Channel::SaveFile => {
                let rt = ctx.rt.clone();
                let dir = ctx.downloads_dir.clone();
                dispatcher.on(channel, move |payload| {
                    let args: SaveFileArgs = parse_args(channel, &payload)?;
                    services::spawn_download(&rt, args.url, dir.clone());
                    Ok(())
                });
            }
        }
    }
}

fn register_show(
    dispatcher: &mut HostDispatcher,
    ctx: &HostContext,
    channel: Channel,
    kind: WindowKind,
) {
    let controller = Arc::clone(&ctx.controller);
    dispatcher.on(channel, move |_payload| {
        controller.lock().unwrap().request(kind);
        Ok(())
    });
}

// =============================================================================
// WINDOW TRANSITIONS
// =============================================================================

/// Swap the active window. This is the bus's critical section: the handler
/// set is emptied and the window replaced before handlers are rebound, and
/// the new window is only shown once rebinding is complete, so no command
/// can race a stale window reference.
pub fn perform_transition(
    kind: WindowKind,
    dispatcher: &mut HostDispatcher,
    ctx: &HostContext,
    backend: &mut dyn WindowBackend,
) -> simpleshare_common::Result<()> {
    dispatcher.clear_listeners();
    ctx.controller.lock().unwrap().transition(kind, backend)?;
    register_handlers(dispatcher, ctx);
    ctx.controller.lock().unwrap().show_current();
    tracing::info!(?kind, "window transition complete");
    Ok(())
}

/// Apply whatever lifecycle command the handlers queued since the last loop
/// turn. Returns `true` when the host should exit.
pub fn apply_pending(
    dispatcher: &mut HostDispatcher,
    ctx: &HostContext,
    backend: &mut dyn WindowBackend,
) -> simpleshare_common::Result<bool> {
    let pending = ctx.controller.lock().unwrap().take_pending();
    if let Some(kind) = pending {
        perform_transition(kind, dispatcher, ctx, backend)?;
    }

    if ctx.controller.lock().unwrap().quit_requested() {
        ctx.controller.lock().unwrap().quit();
        dispatcher.clear_listeners();
        tracing::info!("quit requested, window closed");
        return Ok(true);
    }
    Ok(false)
}

// =============================================================================
// TESTS
// =============================================================================
