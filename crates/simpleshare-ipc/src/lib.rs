//! Message bus between the privileged host process and sandboxed UI
//! processes.
//!
//! Messages flow in both directions over a closed set of named channels:
//! - **UI -> Host**: the [`Bridge`] validates the channel name against the
//!   registry, then posts the message across the transport. Fire-and-forget
//!   channels use [`Bridge::send`]; request-response channels use
//!   [`Bridge::invoke`], which resolves with the host handler's result.
//! - **Host -> UI**: the [`HostDispatcher`] pushes events that the Bridge
//!   delivers to listeners registered with [`Bridge::on`].
//!
//! The transport owns request/response correlation; the Bridge and the
//! dispatcher only see `(channel, payload)` pairs, so the whole bus can be
//! exercised in tests over the in-memory [`transport::pair`].

pub mod bridge;
pub mod channel;
pub mod dispatcher;
pub mod payload;
pub mod transport;

pub use bridge::{Bridge, Subscription};
pub use channel::{Channel, Direction, CHANNEL_PREFIX};
pub use dispatcher::HostDispatcher;
pub use payload::{
    parse_args, ConfigureArgs, FileFilter, GetFileArgs, ItemKeyArgs, LogArgs, MaxSize, MinSize,
    MoveArgs, ResizeArgs, SaveFileArgs, SetItemArgs,
};
pub use transport::{pair, Envelope, HostEndpoint, Push, UiEndpoint};
