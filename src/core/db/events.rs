/// Notification sinks for session lifecycle events.

use std::fmt;

/// Kinds of events a session reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A connection was opened
    Connected,
    /// A query or update completed
    QueryExecuted,
    /// Something failed
    Error,
}

/// A caller-supplied callback receiving a descriptive message.
pub type Sink = Box<dyn FnMut(&str)>;

/// One optional sink per event kind. Setting a sink replaces the previous one.
#[derive(Default)]
pub struct Sinks {
    connected: Option<Sink>,
    query_executed: Option<Sink>,
    error: Option<Sink>,
}

impl Sinks {
    pub fn set(&mut self, event: SessionEvent, sink: Option<Sink>) {
        *self.slot(event) = sink;
    }

    pub fn is_set(&self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Connected => self.connected.is_some(),
            SessionEvent::QueryExecuted => self.query_executed.is_some(),
            SessionEvent::Error => self.error.is_some(),
        }
    }

    /// Invokes the sink for `event`, if any. Silently does nothing otherwise.
    pub fn emit(&mut self, event: SessionEvent, message: &str) {
        if let Some(sink) = self.slot(event) {
            sink(message);
        }
    }

    fn slot(&mut self, event: SessionEvent) -> &mut Option<Sink> {
        match event {
            SessionEvent::Connected => &mut self.connected,
            SessionEvent::QueryExecuted => &mut self.query_executed,
            SessionEvent::Error => &mut self.error,
        }
    }
}

impl fmt::Debug for Sinks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sinks")
            .field("connected", &self.connected.is_some())
            .field("query_executed", &self.query_executed.is_some())
            .field("error", &self.error.is_some())
            .finish()
    }
}
