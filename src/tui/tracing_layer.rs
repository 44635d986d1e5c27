use chrono::Local;
use std::fmt::Write as _;
use tokio::sync::mpsc;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;

/// One line in the logs panel.
#[derive(Clone, Debug)]
pub struct UILogEntry {
    pub timestamp: String, // Formatted when the event is recorded
    pub level: Level,
    pub target: String,
    pub message: String,
}

// Collects the message plus any structured fields as `key=value`.
#[derive(Default)]
struct LogEntryVisitor {
    message: Option<String>,
    fields: String,
}

impl LogEntryVisitor {
    fn push_field(&mut self, name: &str, value: &dyn std::fmt::Debug) {
        let _ = write!(self.fields, " {}={:?}", name, value);
    }

    fn finish(self) -> Option<String> {
        match (self.message, self.fields.is_empty()) {
            (Some(message), true) => Some(message),
            (Some(message), false) => Some(format!("{}{}", message, self.fields)),
            (None, false) => Some(self.fields.trim_start().to_string()),
            (None, true) => None,
        }
    }
}

impl tracing::field::Visit for LogEntryVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.push_field(field.name(), value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.push_field(field.name(), &value);
        }
    }
}

/// Forwards every event to the TUI over an unbounded channel.
pub struct TuiLogCollectorLayer {
    sender: mpsc::UnboundedSender<UILogEntry>,
}

impl TuiLogCollectorLayer {
    pub fn new(sender: mpsc::UnboundedSender<UILogEntry>) -> Self {
        Self { sender }
    }
}

impl<S: Subscriber> Layer<S> for TuiLogCollectorLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let meta = event.metadata();
        let mut visitor = LogEntryVisitor::default();
        event.record(&mut visitor);

        if let Some(message) = visitor.finish() {
            let entry = UILogEntry {
                timestamp: Local::now().format("%H:%M:%S").to_string(),
                level: *meta.level(),
                target: meta.target().to_string(),
                message,
            };
            // The receiver goes away when the TUI exits; later events are dropped.
            let _ = self.sender.send(entry);
        }
    }
}
