use serde::Serialize;
use tokio::sync::broadcast;

pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Something the UI layer should show the user outside the normal view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum UiEvent {
    /// A failed action. Shown as a modal alert.
    Alert { title: String, message: String },
    /// Informational feedback such as "Post shared successfully!".
    Notice { message: String },
}

/// Fan-out of [`UiEvent`]s to any number of UI subscribers.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: broadcast::Sender<UiEvent>,
}

impl EventSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }

    pub fn emit(&self, event: UiEvent) {
        if let Err(e) = self.tx.send(event) {
            tracing::debug!(event = ?e.0, "No UI subscriber for event");
        }
    }

    pub fn alert(&self, title: impl Into<String>, message: impl Into<String>) {
        self.emit(UiEvent::Alert {
            title: title.into(),
            message: message.into(),
        });
    }

    pub fn notice(&self, message: impl Into<String>) {
        self.emit(UiEvent::Notice {
            message: message.into(),
        });
    }
}

impl Default for EventSink {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}
