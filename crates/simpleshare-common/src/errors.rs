#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("unknown channel: {0}")]
    UnknownChannel(String),

    #[error("invalid payload for {channel}: {reason}")]
    InvalidPayload {
        channel: &'static str,
        reason: String,
    },

    #[error("transport closed")]
    TransportClosed,

    #[error("handler failed: {0}")]
    Handler(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config write error: {0}")]
    WriteError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("path error: {0}")]
    PathError(String),

    #[error("window error: {0}")]
    WindowError(String),

    #[error("dialog error: {0}")]
    DialogError(String),

    #[error("download error: {0}")]
    DownloadError(String),

    #[error("not supported: {0}")]
    NotSupported(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error(transparent)]
    Ipc(#[from] IpcError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
