//! Host-side services behind the file and session channels.

use std::path::{Path, PathBuf};

use tokio::runtime::Handle;
use tracing::{info, warn};

use simpleshare_common::{PlatformError, ShareError};
use simpleshare_ipc::FileFilter;

/// Presents the open-file dialog for `APP_GET_FILE`. A trait so tests can
/// script the selection instead of opening a native dialog.
pub trait FilePicker: Send + Sync {
    /// `None` means the user cancelled.
    fn pick_file(&self, filters: &[FileFilter]) -> Option<PathBuf>;
}

/// Native dialog via rfd. Blocking; callers run it on a blocking task.
pub struct NativeFilePicker;

impl FilePicker for NativeFilePicker {
    fn pick_file(&self, filters: &[FileFilter]) -> Option<PathBuf> {
        let mut dialog = rfd::FileDialog::new();
        for filter in filters {
            dialog = dialog.add_filter(filter.name.clone(), &filter.extensions);
        }
        dialog.pick_file()
    }
}

/// Start an `APP_SAVE_FILE` download. Fire-and-forget: the outcome is only
/// visible in the host log.
pub fn spawn_download(rt: &Handle, url: String, dir: PathBuf) {
    rt.spawn(async move {
        match download(&url, &dir).await {
            Ok(path) => info!(url = %url, path = %path.display(), "file saved"),
            Err(e) => warn!(url = %url, error = %e, "download failed"),
        }
    });
}

async fn download(url: &str, dir: &Path) -> Result<PathBuf, ShareError> {
    let response = reqwest::get(url)
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| PlatformError::DownloadError(e.to_string()))?;
    let bytes = response
        .bytes()
        .await
        .map_err(|e| PlatformError::DownloadError(e.to_string()))?;

    let path = dir.join(filename_for(url));
    tokio::fs::write(&path, &bytes).await?;
    Ok(path)
}

/// Derive a local filename from a URL's last path segment.
pub(crate) fn filename_for(url: &str) -> String {
    let base = url.split(['?', '#']).next().unwrap_or(url);
    let without_scheme = base.split_once("://").map_or(base, |(_, rest)| rest);
    let trimmed = without_scheme.trim_end_matches('/');
    match trimmed.split_once('/') {
        Some((_, path)) => {
            let segment = path.rsplit('/').next().unwrap_or("");
            if segment.is_empty() {
                "download".to_string()
            } else {
                segment.to_string()
            }
        }
        // No path segment at all, e.g. a bare host.
        None => "download".to_string(),
    }
}

/// Delete the persisted UI-session cookie file. A missing file counts as
/// already cleared.
pub fn clear_cookies(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
