//! The channel registry: the closed set of message channels that may cross
//! the process boundary, shared by the Bridge and the Host Dispatcher.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved prefix identifying application channels. Names without it are
/// rejected before any registry lookup.
pub const CHANNEL_PREFIX: &str = "APP_";

/// Whether a channel's sender awaits a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// The sender does not await a result.
    FireAndForget,
    /// The sender awaits exactly one resolved value.
    RequestResponse,
}

/// Every channel in the protocol. The enum is the registry: an unlisted
/// name cannot be turned into a `Channel` value, so it can never reach the
/// transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Configure,
    Move,
    Resize,
    ShowMainWindow,
    ShowStartupWindow,
    ShowUpdateWindow,
    Quit,
    MaximizeOrRestore,
    Minimize,
    ClearCookies,
    Restore,
    SetItem,
    GetItem,
    RemoveItem,
    Log,
    ErrorLog,
    GetFile,
    SaveFile,
}

impl Channel {
    /// The full registry, in declaration order.
    pub const ALL: [Channel; 18] = [
        Channel::Configure,
        Channel::Move,
        Channel::Resize,
        Channel::ShowMainWindow,
        Channel::ShowStartupWindow,
        Channel::ShowUpdateWindow,
        Channel::Quit,
        Channel::MaximizeOrRestore,
        Channel::Minimize,
        Channel::ClearCookies,
        Channel::Restore,
        Channel::SetItem,
        Channel::GetItem,
        Channel::RemoveItem,
        Channel::Log,
        Channel::ErrorLog,
        Channel::GetFile,
        Channel::SaveFile,
    ];

    /// The literal wire name, case-sensitive.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Configure => "APP_CONFIGURE",
            Channel::Move => "APP_MOVE",
            Channel::Resize => "APP_RESIZE",
            Channel::ShowMainWindow => "APP_SHOW_MAIN_WINDOW",
            Channel::ShowStartupWindow => "APP_SHOW_STARTUP_WINDOW",
            Channel::ShowUpdateWindow => "APP_SHOW_UPDATE_WINDOW",
            Channel::Quit => "APP_QUIT",
            Channel::MaximizeOrRestore => "APP_MAXIMIZE_OR_RESTORE",
            Channel::Minimize => "APP_MINIMIZE",
            Channel::ClearCookies => "APP_CLEAR_COOKIES",
            Channel::Restore => "APP_RESTORE",
            Channel::SetItem => "APP_SET_ITEM",
            Channel::GetItem => "APP_GET_ITEM",
            Channel::RemoveItem => "APP_REMOVE_ITEM",
            Channel::Log => "APP_LOG",
            Channel::ErrorLog => "APP_ERROR",
            Channel::GetFile => "APP_GET_FILE",
            Channel::SaveFile => "APP_SAVE_FILE",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Channel::GetItem | Channel::GetFile => Direction::RequestResponse,
            _ => Direction::FireAndForget,
        }
    }

    /// Look up a channel by its wire name. This is the only path from an
    /// untrusted string to a `Channel` value.
    pub fn from_name(name: &str) -> Option<Channel> {
        if !name.starts_with(CHANNEL_PREFIX) {
            return None;
        }
        Channel::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
