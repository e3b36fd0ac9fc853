mod app;
mod cli;
mod services;
mod window;
mod wiring;

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use simpleshare_config::{paths, AppConfig, FileSettings, MemorySettings, SettingsStore};
use simpleshare_ipc::{transport, Bridge, HostDispatcher};

use crate::services::NativeFilePicker;
use crate::window::controller::{WindowCatalog, WindowController};
use crate::wiring::HostContext;

fn main() {
    let args = cli::parse();

    // Initialize logging
    let log_directive = args.log_level.as_deref().unwrap_or("simpleshare=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "simpleshare=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Simple Share v{} starting...", env!("CARGO_PKG_VERSION"));

    // Load config
    let config = match &args.config {
        Some(path) => simpleshare_config::load_from_path(Path::new(path)),
        None => simpleshare_config::load_default(),
    }
    .unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        AppConfig::default()
    });

    if let Err(e) = paths::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to create async runtime");

    let settings: Arc<Mutex<dyn SettingsStore>> = match paths::settings_file() {
        Ok(path) => Arc::new(Mutex::new(FileSettings::load_or_default(path))),
        Err(e) => {
            tracing::warn!("Settings path unavailable, using in-memory store: {e}");
            Arc::new(Mutex::new(MemorySettings::new()))
        }
    };

    let cookies_file = paths::cookies_file().unwrap_or_else(|e| {
        tracing::warn!("Cookie path unavailable: {e}");
        PathBuf::from("cookies.dat")
    });
    let downloads_dir = paths::downloads_dir().unwrap_or_else(|e| {
        tracing::warn!("Downloads path unavailable: {e}");
        PathBuf::from(".")
    });

    // Wire the bus
    let (ui_endpoint, host_endpoint) = transport::pair();
    let bridge = Bridge::new(ui_endpoint);
    let mut dispatcher = HostDispatcher::new(host_endpoint, runtime.handle().clone());

    let controller = Arc::new(Mutex::new(WindowController::new(
        WindowCatalog::from_config(&config),
    )));
    let ctx = HostContext {
        controller,
        settings,
        picker: Arc::new(NativeFilePicker),
        rt: runtime.handle().clone(),
        cookies_file,
        downloads_dir,
    };

    // Initial wiring; every window transition clears and rebinds this set.
    wiring::register_handlers(&mut dispatcher, &ctx);

    // Launch goes through the bus like any later transition.
    if let Err(e) = bridge.send("APP_SHOW_STARTUP_WINDOW", serde_json::json!({})) {
        tracing::error!("failed to queue startup window: {e}");
    }

    let event_loop = EventLoop::new().expect("failed to create event loop");
    let mut share_app = app::ShareApp::new(dispatcher, ctx, bridge);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut share_app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
