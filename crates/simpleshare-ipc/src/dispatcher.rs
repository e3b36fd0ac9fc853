//! Host-side registration and routing of channel handlers.
//!
//! Handlers are keyed by [`Channel`] tag, one active handler per channel.
//! Registering over a bound channel replaces the previous handler and emits
//! a warning so duplicate-registration bugs are observable. A handler
//! failure never tears down the dispatcher: request-response failures
//! propagate to the caller's pending invoke, fire-and-forget failures go to
//! the log sink.

use std::collections::HashMap;

use futures_util::future::BoxFuture;
use serde_json::Value;
use tokio::runtime::Handle;

use simpleshare_common::{IpcError, ShareError};

use crate::channel::{Channel, Direction};
use crate::transport::{Envelope, HostEndpoint};

pub type EventHandler = Box<dyn FnMut(Value) -> Result<(), ShareError> + Send>;
pub type InvokeHandler =
    Box<dyn FnMut(Value) -> BoxFuture<'static, Result<Value, ShareError>> + Send>;

pub struct HostDispatcher {
    endpoint: HostEndpoint,
    rt: Handle,
    event_handlers: HashMap<Channel, EventHandler>,
    invoke_handlers: HashMap<Channel, InvokeHandler>,
}

impl HostDispatcher {
    pub fn new(endpoint: HostEndpoint, rt: Handle) -> Self {
        Self {
            endpoint,
            rt,
            event_handlers: HashMap::new(),
            invoke_handlers: HashMap::new(),
        }
    }

    /// Register a fire-and-forget handler for `channel`.
    pub fn on(
        &mut self,
        channel: Channel,
        handler: impl FnMut(Value) -> Result<(), ShareError> + Send + 'static,
    ) {
        if channel.direction() != Direction::FireAndForget {
            tracing::warn!(channel = %channel, "event handler registered on a request-response channel");
        }
        if self
            .event_handlers
            .insert(channel, Box::new(handler))
            .is_some()
        {
            tracing::warn!(channel = %channel, "handler replaced on already-bound channel");
        }
    }

    /// Register a request-response handler for `channel`. The handler's
    /// future is spawned on the dispatcher's runtime, so concurrent invokes
    /// on one channel may run concurrently.
    pub fn handle(
        &mut self,
        channel: Channel,
        handler: impl FnMut(Value) -> BoxFuture<'static, Result<Value, ShareError>> + Send + 'static,
    ) {
        if channel.direction() != Direction::RequestResponse {
            tracing::warn!(channel = %channel, "invoke handler registered on a fire-and-forget channel");
        }
        if self
            .invoke_handlers
            .insert(channel, Box::new(handler))
            .is_some()
        {
            tracing::warn!(channel = %channel, "handler replaced on already-bound channel");
        }
    }

    /// Remove every registered handler across all channels. Used on window
    /// teardown so a recreated window's wiring starts from empty state.
    pub fn clear_listeners(&mut self) {
        self.event_handlers.clear();
        self.invoke_handlers.clear();
        tracing::debug!("dispatcher handlers cleared");
    }

    /// Push an event to the UI process (consumed via `Bridge::on`).
    pub fn emit(&self, channel: Channel, payload: Value) -> Result<(), IpcError> {
        self.endpoint.push(channel, payload)
    }

    pub fn has_handler(&self, channel: Channel) -> bool {
        self.event_handlers.contains_key(&channel) || self.invoke_handlers.contains_key(&channel)
    }

    pub fn handler_count(&self) -> usize {
        self.event_handlers.len() + self.invoke_handlers.len()
    }

    /// Drain and dispatch every queued UI message. Returns the number
    /// dispatched.
    pub fn pump(&mut self) -> usize {
        let mut dispatched = 0;
        while let Some(envelope) = self.endpoint.try_next() {
            self.dispatch(envelope);
            dispatched += 1;
        }
        dispatched
    }

    fn dispatch(&mut self, envelope: Envelope) {
        let Envelope {
            correlation,
            channel,
            payload,
            reply,
        } = envelope;

        match reply {
            Some(reply) => {
                let Some(handler) = self.invoke_handlers.get_mut(&channel) else {
                    tracing::warn!(channel = %channel, correlation = %correlation, "invoke with no registered handler");
                    let _ = reply.send(Err(format!("no handler registered for {channel}")));
                    return;
                };
                let future = handler(payload);
                self.rt.spawn(async move {
                    let result = future.await.map_err(|e| e.to_string());
                    if let Err(ref message) = result {
                        tracing::warn!(channel = %channel, correlation = %correlation, error = %message, "invoke handler failed");
                    }
                    if reply.send(result).is_err() {
                        tracing::debug!(correlation = %correlation, "invoke caller gone before reply");
                    }
                });
            }
            None => match self.event_handlers.get_mut(&channel) {
                Some(handler) => {
                    if let Err(e) = handler(payload) {
                        // No caller to notify on a fire-and-forget channel.
                        tracing::warn!(channel = %channel, correlation = %correlation, error = %e, "handler failed");
                    }
                }
                None => {
                    tracing::warn!(channel = %channel, correlation = %correlation, "message with no registered handler");
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::Bridge;
    use crate::transport;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn bus() -> (Bridge, HostDispatcher) {
        let (ui, host) = transport::pair();
        (Bridge::new(ui), HostDispatcher::new(host, Handle::current()))
    }

    #[tokio::test]
    async fn later_registration_replaces_earlier() {
        let (bridge, mut dispatcher) = bus();

        let a = Arc::new(AtomicUsize::new(0));
        let b = Arc::new(AtomicUsize::new(0));

        let a_count = Arc::clone(&a);
        dispatcher.on(Channel::Minimize, move |_| {
            a_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });
        let b_count = Arc::clone(&b);
        dispatcher.on(Channel::Minimize, move |_| {
            b_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        bridge.send("APP_MINIMIZE", json!({})).unwrap();
        dispatcher.pump();

        assert_eq!(a.load(Ordering::SeqCst), 0);
        assert_eq!(b.load(Ordering::SeqCst), 1);
        assert_eq!(dispatcher.handler_count(), 1);
    }

    #[tokio::test]
    async fn clear_listeners_is_idempotent() {
        let (_bridge, mut dispatcher) = bus();

        dispatcher.on(Channel::Minimize, |_| Ok(()));
        dispatcher.handle(Channel::GetItem, |_| Box::pin(async { Ok(json!(null)) }));
        assert_eq!(dispatcher.handler_count(), 2);

        dispatcher.clear_listeners();
        assert_eq!(dispatcher.handler_count(), 0);

        dispatcher.clear_listeners();
        assert_eq!(dispatcher.handler_count(), 0);
        assert!(!dispatcher.has_handler(Channel::Minimize));
    }

    #[tokio::test]
    async fn invoke_without_handler_rejects() {
        let (bridge, mut dispatcher) = bus();

        let fut = bridge.invoke("APP_GET_ITEM", json!({ "key": "k" }));
        dispatcher.pump();

        match fut.await {
            Err(IpcError::Handler(message)) => {
                assert!(message.contains("no handler registered"));
                assert!(message.contains("APP_GET_ITEM"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn invoke_handler_error_propagates_to_caller() {
        let (bridge, mut dispatcher) = bus();

        dispatcher.handle(Channel::GetItem, |_| {
            Box::pin(async { Err(ShareError::Other("store offline".into())) })
        });

        let fut = bridge.invoke("APP_GET_ITEM", json!({ "key": "k" }));
        dispatcher.pump();

        match fut.await {
            Err(IpcError::Handler(message)) => assert_eq!(message, "store offline"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn event_handler_failure_does_not_stop_later_dispatch() {
        let (bridge, mut dispatcher) = bus();

        let delivered = Arc::new(AtomicUsize::new(0));
        dispatcher.on(Channel::Minimize, |_| {
            Err(ShareError::Other("window backend hiccup".into()))
        });
        let count = Arc::clone(&delivered);
        dispatcher.on(Channel::Restore, move |_| {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        bridge.send("APP_MINIMIZE", json!({})).unwrap();
        bridge.send("APP_RESTORE", json!({})).unwrap();
        assert_eq!(dispatcher.pump(), 2);

        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn invoke_handler_sees_the_payload() {
        let (bridge, mut dispatcher) = bus();

        dispatcher.handle(Channel::GetItem, |payload| {
            Box::pin(async move {
                let key = payload["key"].as_str().unwrap_or_default().to_string();
                Ok(json!(format!("value-of-{key}")))
            })
        });

        let fut = bridge.invoke("APP_GET_ITEM", json!({ "key": "token" }));
        dispatcher.pump();
        assert_eq!(fut.await.unwrap(), json!("value-of-token"));
    }

    #[tokio::test]
    async fn concurrent_invokes_each_get_their_own_reply() {
        let (bridge, mut dispatcher) = bus();

        dispatcher.handle(Channel::GetItem, |payload| {
            Box::pin(async move { Ok(payload["key"].clone()) })
        });

        let first = bridge.invoke("APP_GET_ITEM", json!({ "key": "a" }));
        let second = bridge.invoke("APP_GET_ITEM", json!({ "key": "b" }));
        dispatcher.pump();

        assert_eq!(first.await.unwrap(), json!("a"));
        assert_eq!(second.await.unwrap(), json!("b"));
    }

    #[tokio::test]
    async fn emit_reaches_bridge_listeners() {
        let (bridge, dispatcher) = bus();

        let seen = Arc::new(AtomicUsize::new(0));
        let count = Arc::clone(&seen);
        let _sub = bridge
            .on("APP_LOG", move |payload| {
                assert_eq!(payload["message"], "host says hi");
                count.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        dispatcher
            .emit(Channel::Log, json!({ "message": "host says hi" }))
            .unwrap();
        bridge.pump();

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
