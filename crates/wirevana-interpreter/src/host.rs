//! Host envelope protocol.
//!
//! A preview embedded in an iframe talks to its host through
//! `{source: "wirevana", type, payload}` envelopes. This module holds the
//! protocol: envelope shapes, origin and shape filtering, and a handler
//! registry. Delivering bytes (`postMessage`) is a [`HostSink`]'s job.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, trace};

use wirevana_core::errors::HostError;

/// Marks envelopes that belong to this protocol.
pub const ENVELOPE_SOURCE: &str = "wirevana";

/// Wire form of every message, in both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub source: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl Envelope {
    pub fn new(kind: impl Into<String>, payload: Option<Value>) -> Self {
        Self {
            source: ENVELOPE_SOURCE.to_string(),
            kind: kind.into(),
            payload,
        }
    }

    /// Read an envelope, rejecting anything without our `source` and a string `type`.
    pub fn from_value(data: &Value) -> Option<Self> {
        let object = data.as_object()?;
        if object.get("source").and_then(Value::as_str) != Some(ENVELOPE_SOURCE) {
            return None;
        }
        let kind = object.get("type")?.as_str()?;
        Some(Self::new(kind, object.get("payload").cloned()))
    }
}

/// Messages the preview sends to its host.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    Ready { timestamp: f64 },
    Resize { height: f64 },
    Navigate { to: String },
    WireframeRendered { name: String, timestamp: f64 },
}

impl Outbound {
    pub fn kind(&self) -> &'static str {
        match self {
            Outbound::Ready { .. } => "ready",
            Outbound::Resize { .. } => "resize",
            Outbound::Navigate { .. } => "navigate",
            Outbound::WireframeRendered { .. } => "wireframe-rendered",
        }
    }

    pub fn to_envelope(&self) -> Envelope {
        let payload = match self {
            Outbound::Ready { timestamp } => json!({ "timestamp": timestamp }),
            Outbound::Resize { height } => json!({ "height": height }),
            Outbound::Navigate { to } => json!({ "to": to }),
            Outbound::WireframeRendered { name, timestamp } => {
                json!({ "name": name, "timestamp": timestamp })
            }
        };
        Envelope::new(self.kind(), Some(payload))
    }
}

/// Messages from the host the preview acts on.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    /// Select the tab with this id.
    Navigate { to: String },
}

impl Inbound {
    pub fn from_envelope(envelope: &Envelope) -> Option<Self> {
        match envelope.kind.as_str() {
            "navigate" => {
                let to = envelope.payload.as_ref()?.get("to")?.as_str()?;
                Some(Inbound::Navigate { to: to.to_string() })
            }
            _ => None,
        }
    }
}

/// Where outbound envelopes go.
pub trait HostSink {
    fn post(&mut self, envelope: &Envelope) -> Result<(), HostError>;
}

/// Collects envelopes in memory. Used by tests and headless previews.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub sent: Vec<Envelope>,
}

impl HostSink for RecordingSink {
    fn post(&mut self, envelope: &Envelope) -> Result<(), HostError> {
        self.sent.push(envelope.clone());
        Ok(())
    }
}

/// A shared sink, so the caller keeps a handle on what was posted.
impl<S: HostSink> HostSink for Rc<RefCell<S>> {
    fn post(&mut self, envelope: &Envelope) -> Result<(), HostError> {
        self.borrow_mut().post(envelope)
    }
}

/// Handle returned by [`HostChannel::on`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    kind: String,
    id: u64,
}

type Handler = Box<dyn FnMut(&Envelope)>;

/// Registry of inbound handlers behind an origin filter.
pub struct HostChannel {
    trusted_origin: String,
    next_id: u64,
    handlers: IndexMap<String, Vec<(u64, Handler)>>,
}

impl HostChannel {
    pub fn new(trusted_origin: impl Into<String>) -> Self {
        Self {
            trusted_origin: trusted_origin.into(),
            next_id: 0,
            handlers: IndexMap::new(),
        }
    }

    /// Register `handler` for envelopes of type `kind`.
    pub fn on(&mut self, kind: impl Into<String>, handler: impl FnMut(&Envelope) + 'static) -> Subscription {
        let kind = kind.into();
        let id = self.next_id;
        self.next_id += 1;
        self.handlers
            .entry(kind.clone())
            .or_default()
            .push((id, Box::new(handler)));
        Subscription { kind, id }
    }

    /// Remove a handler. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, subscription: &Subscription) -> bool {
        let Some(handlers) = self.handlers.get_mut(&subscription.kind) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(id, _)| *id != subscription.id);
        let removed = handlers.len() != before;
        if handlers.is_empty() {
            self.handlers.shift_remove(&subscription.kind);
        }
        removed
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    /// The envelope in `data`, if it came from the trusted origin and has our shape.
    pub fn accept(&self, origin: &str, data: &Value) -> Option<Envelope> {
        if origin != self.trusted_origin {
            trace!(origin, "host message from untrusted origin ignored");
            return None;
        }
        let envelope = Envelope::from_value(data);
        if envelope.is_none() {
            trace!("host message without a wirevana envelope ignored");
        }
        envelope
    }

    /// Filter and hand a message to its handlers. Returns the envelope when accepted.
    pub fn receive(&mut self, origin: &str, data: &Value) -> Option<Envelope> {
        let envelope = self.accept(origin, data)?;
        match self.handlers.get_mut(&envelope.kind) {
            Some(handlers) => {
                for (_, handler) in handlers.iter_mut() {
                    handler(&envelope);
                }
            }
            None => debug!(kind = %envelope.kind, "no handler for host message"),
        }
        Some(envelope)
    }
}

impl std::fmt::Debug for HostChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostChannel")
            .field("trusted_origin", &self.trusted_origin)
            .field("handlers", &self.handler_count())
            .finish()
    }
}

/// Outbound sink plus inbound channel: the host adapter minus browser
/// plumbing. Until a sink is connected, outbound messages are dropped.
pub struct HostAdapter {
    sink: Option<Box<dyn HostSink>>,
    channel: HostChannel,
}

impl HostAdapter {
    pub fn new(trusted_origin: impl Into<String>) -> Self {
        Self {
            sink: None,
            channel: HostChannel::new(trusted_origin),
        }
    }

    /// Attach `sink` and announce readiness through it.
    pub fn connect(&mut self, sink: Box<dyn HostSink>, now_ms: f64) -> Result<(), HostError> {
        self.sink = Some(sink);
        self.send(&Outbound::Ready { timestamp: now_ms })
    }

    pub fn is_connected(&self) -> bool {
        self.sink.is_some()
    }

    pub fn send(&mut self, message: &Outbound) -> Result<(), HostError> {
        match self.sink.as_mut() {
            Some(sink) => {
                debug!(kind = message.kind(), "posting to host");
                sink.post(&message.to_envelope())
            }
            None => {
                trace!(kind = message.kind(), "no host connected, message dropped");
                Ok(())
            }
        }
    }

    pub fn channel_mut(&mut self) -> &mut HostChannel {
        &mut self.channel
    }

    /// Drop the sink and every handler.
    pub fn disconnect(&mut self) {
        self.sink = None;
        self.channel.clear();
    }
}

impl std::fmt::Debug for HostAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostAdapter")
            .field("connected", &self.is_connected())
            .field("channel", &self.channel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://host.example";

    fn navigate(to: &str) -> Value {
        json!({ "source": "wirevana", "type": "navigate", "payload": { "to": to } })
    }

    #[test]
    fn test_outbound_shapes() {
        let envelope = Outbound::WireframeRendered { name: "Loans".into(), timestamp: 12.0 }.to_envelope();
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            value,
            json!({ "source": "wirevana", "type": "wireframe-rendered", "payload": { "name": "Loans", "timestamp": 12.0 } })
        );
        assert_eq!(
            serde_json::to_value(Envelope::new("ping", None)).unwrap(),
            json!({ "source": "wirevana", "type": "ping" })
        );
        assert_eq!(Outbound::Resize { height: 844.0 }.to_envelope().payload, Some(json!({ "height": 844.0 })));
    }

    #[test]
    fn test_filtering() {
        let channel = HostChannel::new(ORIGIN);
        assert!(channel.accept(ORIGIN, &navigate("List")).is_some());
        assert!(channel.accept("https://evil.example", &navigate("List")).is_none());
        assert!(channel.accept(ORIGIN, &json!({ "source": "other", "type": "navigate" })).is_none());
        assert!(channel.accept(ORIGIN, &json!({ "source": "wirevana", "type": 3 })).is_none());
        assert!(channel.accept(ORIGIN, &json!("wirevana")).is_none());
    }

    #[test]
    fn test_handlers_and_idempotent_unsubscribe() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut channel = HostChannel::new(ORIGIN);
        let sink = Rc::clone(&seen);
        let subscription = channel.on("navigate", move |envelope| {
            if let Some(Inbound::Navigate { to }) = Inbound::from_envelope(envelope) {
                sink.borrow_mut().push(to);
            }
        });

        channel.receive(ORIGIN, &navigate("List"));
        channel.receive("https://evil.example", &navigate("Home"));
        assert_eq!(*seen.borrow(), vec!["List".to_string()]);

        assert!(channel.unsubscribe(&subscription));
        assert!(!channel.unsubscribe(&subscription));
        assert_eq!(channel.handler_count(), 0);

        channel.receive(ORIGIN, &navigate("Home"));
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_connect_posts_ready() {
        let sink = Rc::new(RefCell::new(RecordingSink::default()));
        let mut adapter = HostAdapter::new(ORIGIN);
        adapter.send(&Outbound::Resize { height: 10.0 }).unwrap();
        assert!(!adapter.is_connected());

        adapter.connect(Box::new(Rc::clone(&sink)), 42.0).unwrap();
        let sent = &sink.borrow().sent;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, "ready");
        assert_eq!(sent[0].payload, Some(json!({ "timestamp": 42.0 })));
    }

    #[test]
    fn test_disconnect_drops_sink_and_handlers() {
        let sink = Rc::new(RefCell::new(RecordingSink::default()));
        let mut adapter = HostAdapter::new(ORIGIN);
        adapter.connect(Box::new(Rc::clone(&sink)), 1.0).unwrap();
        adapter.channel_mut().on("navigate", |_| {});

        adapter.disconnect();
        adapter.send(&Outbound::Navigate { to: "x".into() }).unwrap();
        assert_eq!(sink.borrow().sent.len(), 1);
        assert_eq!(adapter.channel_mut().handler_count(), 0);
    }
}
