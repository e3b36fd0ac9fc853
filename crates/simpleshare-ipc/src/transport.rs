//! In-memory duplex transport between a UI process and the host.
//!
//! The transport owns request/response correlation: every message gets a
//! correlation ID for log tracing, and a pending invocation is nothing more
//! than the oneshot sender riding its envelope. Per-direction ordering is
//! FIFO (unbounded mpsc); ordering across channels is not guaranteed beyond
//! that.

use std::sync::Mutex;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot};

use simpleshare_common::{new_correlation_id, IpcError};

use crate::channel::Channel;

/// The host handler's result as it crosses the boundary. Errors travel as
/// strings; the Bridge rehydrates them into [`IpcError::Handler`].
pub type InvokeReply = Result<Value, String>;

/// One UI-to-host message. `reply` is present iff the caller invoked rather
/// than sent; dropping it without sending rejects the caller.
#[derive(Debug)]
pub struct Envelope {
    pub correlation: String,
    pub channel: Channel,
    pub payload: Value,
    pub reply: Option<oneshot::Sender<InvokeReply>>,
}

/// One host-to-UI event message.
#[derive(Debug)]
pub struct Push {
    pub channel: Channel,
    pub payload: Value,
}

/// The UI process's end of the link. Held by the Bridge.
pub struct UiEndpoint {
    to_host: mpsc::UnboundedSender<Envelope>,
    from_host: Mutex<mpsc::UnboundedReceiver<Push>>,
}

/// The host's end of the link. Held by the Host Dispatcher.
pub struct HostEndpoint {
    from_ui: mpsc::UnboundedReceiver<Envelope>,
    to_ui: mpsc::UnboundedSender<Push>,
}

/// Create a linked endpoint pair.
pub fn pair() -> (UiEndpoint, HostEndpoint) {
    let (to_host, from_ui) = mpsc::unbounded_channel();
    let (to_ui, from_host) = mpsc::unbounded_channel();
    (
        UiEndpoint {
            to_host,
            from_host: Mutex::new(from_host),
        },
        HostEndpoint { from_ui, to_ui },
    )
}

impl UiEndpoint {
    /// Post a fire-and-forget message. Never suspends.
    pub fn post(&self, channel: Channel, payload: Value) -> Result<(), IpcError> {
        let envelope = Envelope {
            correlation: new_correlation_id(),
            channel,
            payload,
            reply: None,
        };
        tracing::trace!(channel = %channel, correlation = %envelope.correlation, "post");
        self.to_host
            .send(envelope)
            .map_err(|_| IpcError::TransportClosed)
    }

    /// Post a request-response message. Returns the receiver that resolves
    /// when the host handler replies (or is dropped).
    pub fn post_invoke(
        &self,
        channel: Channel,
        payload: Value,
    ) -> Result<oneshot::Receiver<InvokeReply>, IpcError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let envelope = Envelope {
            correlation: new_correlation_id(),
            channel,
            payload,
            reply: Some(reply_tx),
        };
        tracing::trace!(channel = %channel, correlation = %envelope.correlation, "invoke");
        self.to_host
            .send(envelope)
            .map_err(|_| IpcError::TransportClosed)?;
        Ok(reply_rx)
    }

    /// Drain all host-to-UI events queued since the last call.
    pub fn drain_pushes(&self) -> Vec<Push> {
        let mut pushes = Vec::new();
        if let Ok(mut rx) = self.from_host.lock() {
            while let Ok(push) = rx.try_recv() {
                pushes.push(push);
            }
        }
        pushes
    }
}

impl HostEndpoint {
    /// Take the next queued UI message, if any.
    pub fn try_next(&mut self) -> Option<Envelope> {
        self.from_ui.try_recv().ok()
    }

    /// Push an event to the UI process.
    pub fn push(&self, channel: Channel, payload: Value) -> Result<(), IpcError> {
        self.to_ui
            .send(Push { channel, payload })
            .map_err(|_| IpcError::TransportClosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn messages_arrive_in_send_order() {
        let (ui, mut host) = pair();
        ui.post(Channel::Minimize, json!({})).unwrap();
        ui.post(Channel::Restore, json!({})).unwrap();
        ui.post(Channel::Quit, json!({})).unwrap();

        let channels: Vec<Channel> = std::iter::from_fn(|| host.try_next())
            .map(|e| e.channel)
            .collect();
        assert_eq!(
            channels,
            vec![Channel::Minimize, Channel::Restore, Channel::Quit]
        );
    }

    #[tokio::test]
    async fn correlation_ids_are_assigned_per_message() {
        let (ui, mut host) = pair();
        ui.post(Channel::Quit, json!({})).unwrap();
        ui.post(Channel::Quit, json!({})).unwrap();

        let a = host.try_next().unwrap();
        let b = host.try_next().unwrap();
        assert_ne!(a.correlation, b.correlation);
        assert!(a.reply.is_none());
    }

    #[tokio::test]
    async fn invoke_reply_rides_the_envelope() {
        let (ui, mut host) = pair();
        let rx = ui.post_invoke(Channel::GetItem, json!({ "key": "k" })).unwrap();

        let envelope = host.try_next().unwrap();
        assert_eq!(envelope.channel, Channel::GetItem);
        envelope.reply.unwrap().send(Ok(json!("v"))).unwrap();

        assert_eq!(rx.await.unwrap().unwrap(), json!("v"));
    }

    #[tokio::test]
    async fn dropped_reply_rejects_the_caller() {
        let (ui, mut host) = pair();
        let rx = ui.post_invoke(Channel::GetItem, json!({ "key": "k" })).unwrap();

        let envelope = host.try_next().unwrap();
        drop(envelope);

        assert!(rx.await.is_err());
    }

    #[tokio::test]
    async fn post_after_host_gone_fails() {
        let (ui, host) = pair();
        drop(host);
        let err = ui.post(Channel::Quit, json!({})).unwrap_err();
        assert!(matches!(err, IpcError::TransportClosed));
    }

    #[tokio::test]
    async fn push_reaches_the_ui_side() {
        let (ui, host) = pair();
        host.push(Channel::Log, json!({ "message": "hello" })).unwrap();
        host.push(Channel::Log, json!({ "message": "again" })).unwrap();

        let pushes = ui.drain_pushes();
        assert_eq!(pushes.len(), 2);
        assert_eq!(pushes[0].payload["message"], "hello");
        assert!(ui.drain_pushes().is_empty());
    }
}
