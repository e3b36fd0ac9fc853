pub mod errors;
pub mod id;

pub use errors::{ConfigError, IpcError, PlatformError, ShareError};
pub use id::new_correlation_id;

pub type Result<T> = std::result::Result<T, ShareError>;
