//! The UI-process gateway onto the bus.
//!
//! The Bridge is the only surface a UI process may use to reach the host.
//! Every operation validates the channel name against the registry first;
//! an unrecognized name never reaches the transport. Beyond that the Bridge
//! holds no domain state, only the per-channel listener table for events
//! pushed from the host.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use serde_json::Value;

use simpleshare_common::IpcError;

use crate::channel::Channel;
use crate::transport::UiEndpoint;

type ListenerFn = Arc<dyn Fn(&Value) + Send + Sync>;

struct Listener {
    id: u64,
    callback: ListenerFn,
}

type ListenerTable = HashMap<Channel, Vec<Listener>>;

pub struct Bridge {
    endpoint: UiEndpoint,
    listeners: Arc<Mutex<ListenerTable>>,
    next_listener_id: AtomicU64,
}

impl Bridge {
    pub fn new(endpoint: UiEndpoint) -> Self {
        Self {
            endpoint,
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_listener_id: AtomicU64::new(0),
        }
    }

    fn resolve(name: &str) -> Result<Channel, IpcError> {
        Channel::from_name(name).ok_or_else(|| IpcError::UnknownChannel(name.to_string()))
    }

    /// Fire-and-forget send. Fails loudly on an unregistered channel name,
    /// before any transport activity.
    pub fn send(&self, channel: &str, payload: Value) -> Result<(), IpcError> {
        let channel = Self::resolve(channel)?;
        self.endpoint.post(channel, payload)
    }

    /// Request-response call. The message is posted immediately; the
    /// returned future resolves with the host handler's value, or with
    /// [`IpcError::Handler`] if the handler failed, or with the validation
    /// error if the channel name was rejected.
    pub fn invoke(
        &self,
        channel: &str,
        payload: Value,
    ) -> impl Future<Output = Result<Value, IpcError>> + 'static {
        let posted = Self::resolve(channel).and_then(|c| self.endpoint.post_invoke(c, payload));
        async move {
            match posted {
                Ok(reply_rx) => match reply_rx.await {
                    Ok(Ok(value)) => Ok(value),
                    Ok(Err(message)) => Err(IpcError::Handler(message)),
                    Err(_) => Err(IpcError::TransportClosed),
                },
                Err(e) => Err(e),
            }
        }
    }

    /// Subscribe to events the host pushes on `channel`. The returned
    /// [`Subscription`] removes exactly this listener when disposed or
    /// dropped; keep it alive for as long as the listener should fire.
    pub fn on(
        &self,
        channel: &str,
        listener: impl Fn(&Value) + Send + Sync + 'static,
    ) -> Result<Subscription, IpcError> {
        let channel = Self::resolve(channel)?;
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners
            .lock()
            .unwrap()
            .entry(channel)
            .or_default()
            .push(Listener {
                id,
                callback: Arc::new(listener),
            });
        Ok(Subscription {
            table: Arc::downgrade(&self.listeners),
            channel,
            id,
        })
    }

    /// Deliver queued host-to-UI events to their listeners. One call per
    /// UI event-loop turn. Returns the number of events delivered.
    pub fn pump(&self) -> usize {
        let pushes = self.endpoint.drain_pushes();
        let delivered = pushes.len();
        for push in pushes {
            // Snapshot the callbacks so a listener may subscribe or dispose
            // without deadlocking on the table.
            let callbacks: Vec<ListenerFn> = {
                let table = self.listeners.lock().unwrap();
                table
                    .get(&push.channel)
                    .map(|listeners| listeners.iter().map(|l| Arc::clone(&l.callback)).collect())
                    .unwrap_or_default()
            };
            for callback in callbacks {
                callback(&push.payload);
            }
        }
        delivered
    }
}

/// Disposer for one listener registration. Disposal is idempotent: the
/// listener is removed by its unique ID, and `dispose` consumes the
/// subscription so it cannot be invoked twice.
pub struct Subscription {
    table: Weak<Mutex<ListenerTable>>,
    channel: Channel,
    id: u64,
}

impl Subscription {
    /// Remove this listener now instead of at drop time.
    pub fn dispose(self) {}

    fn remove(&self) {
        if let Some(table) = self.table.upgrade() {
            if let Ok(mut table) = table.lock() {
                if let Some(listeners) = table.get_mut(&self.channel) {
                    listeners.retain(|l| l.id != self.id);
                }
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{self, HostEndpoint};
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    fn bridge_pair() -> (Bridge, HostEndpoint) {
        let (ui, host) = transport::pair();
        (Bridge::new(ui), host)
    }

    #[tokio::test]
    async fn send_rejects_unknown_channel_before_transport() {
        let (bridge, mut host) = bridge_pair();

        let err = bridge.send("APP_EVAL", json!({})).unwrap_err();
        assert!(matches!(err, IpcError::UnknownChannel(_)));
        let err = bridge.send("NOT_EVEN_PREFIXED", json!({})).unwrap_err();
        assert!(matches!(err, IpcError::UnknownChannel(_)));

        assert!(host.try_next().is_none());
    }

    #[tokio::test]
    async fn invoke_rejects_unknown_channel_before_transport() {
        let (bridge, mut host) = bridge_pair();

        let fut = bridge.invoke("APP_BOGUS", json!({}));
        assert!(host.try_next().is_none());
        assert!(matches!(fut.await, Err(IpcError::UnknownChannel(_))));
    }

    #[tokio::test]
    async fn on_rejects_unknown_channel() {
        let (bridge, _host) = bridge_pair();
        assert!(bridge.on("app_log", |_| {}).is_err());
    }

    #[tokio::test]
    async fn send_reaches_the_host() {
        let (bridge, mut host) = bridge_pair();
        bridge
            .send("APP_SET_ITEM", json!({ "key": "k", "item": "v" }))
            .unwrap();

        let envelope = host.try_next().unwrap();
        assert_eq!(envelope.channel, Channel::SetItem);
        assert_eq!(envelope.payload["key"], "k");
    }

    #[tokio::test]
    async fn invoke_resolves_with_handler_value() {
        let (bridge, mut host) = bridge_pair();

        let fut = bridge.invoke("APP_GET_ITEM", json!({ "key": "k" }));
        let envelope = host.try_next().unwrap();
        envelope.reply.unwrap().send(Ok(json!("stored"))).unwrap();

        assert_eq!(fut.await.unwrap(), json!("stored"));
    }

    #[tokio::test]
    async fn invoke_rejects_with_handler_error() {
        let (bridge, mut host) = bridge_pair();

        let fut = bridge.invoke("APP_GET_ITEM", json!({ "key": "k" }));
        let envelope = host.try_next().unwrap();
        envelope
            .reply
            .unwrap()
            .send(Err("store unavailable".into()))
            .unwrap();

        match fut.await {
            Err(IpcError::Handler(message)) => assert_eq!(message, "store unavailable"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn disposed_listener_stops_firing_while_others_continue() {
        let (bridge, host) = bridge_pair();

        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let first_count = Arc::clone(&first);
        let sub_a = bridge
            .on("APP_LOG", move |_| {
                first_count.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        let second_count = Arc::clone(&second);
        let _sub_b = bridge
            .on("APP_LOG", move |_| {
                second_count.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        host.push(Channel::Log, json!({ "message": "one" })).unwrap();
        bridge.pump();
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);

        sub_a.dispose();

        host.push(Channel::Log, json!({ "message": "two" })).unwrap();
        bridge.pump();
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn listeners_only_fire_for_their_channel() {
        let (bridge, host) = bridge_pair();

        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        let _sub = bridge
            .on("APP_LOG", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        host.push(Channel::ErrorLog, json!({ "message": "nope" }))
            .unwrap();
        host.push(Channel::Log, json!({ "message": "yes" })).unwrap();
        bridge.pump();

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dropping_the_subscription_unsubscribes() {
        let (bridge, host) = bridge_pair();

        let count = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&count);
        {
            let _sub = bridge
                .on("APP_LOG", move |_| {
                    counter.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }

        host.push(Channel::Log, json!({ "message": "late" })).unwrap();
        bridge.pump();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }
}
