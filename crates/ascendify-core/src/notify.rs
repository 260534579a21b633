//! Notification port.
//!
//! The session never renders anything itself. Whatever presents reminders
//! (terminal, tray icon, web page) implements [`Notifier`] and receives every
//! event in order.

use tokio::sync::mpsc;

use crate::events::{Event, StatusLevel};

pub trait Notifier: Send + Sync {
    fn notify(&self, event: &Event);
}

impl<F> Notifier for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn notify(&self, event: &Event) {
        self(event)
    }
}

/// Forwards events into an unbounded channel.
///
/// Events sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Event>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, event: &Event) {
        let _ = self.tx.send(event.clone());
    }
}

/// Writes events to the `tracing` subscriber. Countdown ticks go to `trace`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: &Event) {
        match event {
            Event::Countdown { remaining_secs, .. } => {
                tracing::trace!(remaining_secs, "countdown")
            }
            Event::Status {
                level: StatusLevel::Warn,
                message,
                ..
            } => tracing::warn!("{message}"),
            other => tracing::debug!(?other, "session event"),
        }
    }
}

/// Sends each event to several notifiers in registration order.
#[derive(Default)]
pub struct FanOut {
    targets: Vec<Box<dyn Notifier>>,
}

impl FanOut {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, notifier: impl Notifier + 'static) -> Self {
        self.targets.push(Box::new(notifier));
        self
    }
}

impl Notifier for FanOut {
    fn notify(&self, event: &Event) {
        for target in &self.targets {
            target.notify(event);
        }
    }
}
