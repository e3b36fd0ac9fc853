//! Argument shapes for each channel.
//!
//! Wire shapes are camelCase because they originate in the UI processes.
//! Only JSON-representable values cross the boundary: strings, numbers,
//! booleans, plain records, and arrays of these.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use simpleshare_common::IpcError;

use crate::channel::Channel;

/// Deserialize a channel payload, mapping failures to a protocol error
/// that names the channel.
pub fn parse_args<T: DeserializeOwned>(channel: Channel, payload: &Value) -> Result<T, IpcError> {
    serde_json::from_value(payload.clone()).map_err(|e| IpcError::InvalidPayload {
        channel: channel.name(),
        reason: e.to_string(),
    })
}

/// `APP_CONFIGURE`: window flags and size constraints. Absent fields
/// leave the corresponding constraint untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigureArgs {
    pub resizable: Option<bool>,
    pub movable: Option<bool>,
    pub min_size: Option<MinSize>,
    pub max_size: Option<MaxSize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinSize {
    pub min_width: u32,
    pub min_height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxSize {
    pub max_width: u32,
    pub max_height: u32,
}

/// `APP_MOVE`: reposition the window. `center` wins over coordinates;
/// otherwise both `x` and `y` must be present (zero is a legal coordinate).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveArgs {
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub center: Option<bool>,
    pub animate: Option<bool>,
}

/// `APP_RESIZE`: resize the window, optionally widening the minimum-size
/// constraint first so the resize is not clamped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeArgs {
    pub width: u32,
    pub height: u32,
    pub animate: Option<bool>,
    pub around_center: Option<bool>,
    pub override_minimum_size: Option<bool>,
}

/// `APP_SET_ITEM`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetItemArgs {
    pub key: String,
    pub item: String,
}

/// `APP_GET_ITEM` / `APP_REMOVE_ITEM`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemKeyArgs {
    pub key: String,
}

/// `APP_LOG` / `APP_ERROR`: a UI-side console line forwarded to the host
/// log sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogArgs {
    pub message: String,
    #[serde(default)]
    pub optional_params: Vec<Value>,
}

/// `APP_GET_FILE`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetFileArgs {
    pub filters: Option<Vec<FileFilter>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

/// `APP_SAVE_FILE`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFileArgs {
    pub url: String,
}
