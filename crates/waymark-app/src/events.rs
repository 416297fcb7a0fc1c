//! Navigation event channel
//!
//! Platform back presses and incoming deep links arrive asynchronously. They
//! are queued on an unbounded FIFO channel and applied by the navigator's
//! owner, either in a batch (`drain_events`) or from a task (`run_events`).
//! Nothing is ever dropped.

use crate::navigator::Navigator;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use waymark_core::{NavError, NavResult, NavigationCommand};

/// Something that should turn into a navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavEvent {
    /// Platform back button or gesture
    Back,
    /// Incoming deep link URI
    DeepLink(String),
    /// A command produced outside the render layer
    Command(NavigationCommand),
}

/// Cloneable producer side of the event channel.
#[derive(Clone, Debug)]
pub struct NavEventSender {
    tx: UnboundedSender<NavEvent>,
}

impl NavEventSender {
    /// Queue an event.
    pub fn send(&self, event: NavEvent) -> NavResult<()> {
        self.tx.send(event).map_err(|_| NavError::ChannelClosed)
    }

    /// Queue a back press.
    pub fn back(&self) -> NavResult<()> {
        self.send(NavEvent::Back)
    }

    /// Queue a deep link.
    pub fn deep_link(&self, uri: impl Into<String>) -> NavResult<()> {
        self.send(NavEvent::DeepLink(uri.into()))
    }

    /// Queue a command.
    pub fn command(&self, command: NavigationCommand) -> NavResult<()> {
        self.send(NavEvent::Command(command))
    }

    /// Check if the receiver is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer side of the event channel.
#[derive(Debug)]
pub struct NavEventReceiver {
    rx: UnboundedReceiver<NavEvent>,
}

impl NavEventReceiver {
    /// Wait for the next event; `None` once every sender is dropped and the queue is empty.
    pub async fn recv(&mut self) -> Option<NavEvent> {
        self.rx.recv().await
    }

    /// Next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<NavEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

/// Create a connected sender/receiver pair.
pub fn event_channel() -> (NavEventSender, NavEventReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (NavEventSender { tx }, NavEventReceiver { rx })
}

impl Navigator {
    /// Apply one event.
    ///
    /// Returns `false` for a back press at the root (the host usually exits)
    /// and for an unrecognized deep link.
    pub fn handle_event(&self, event: NavEvent) -> bool {
        match event {
            NavEvent::Back => self.pop_if_can(|| {
                tracing::debug!("Back pressed at root");
            }),
            NavEvent::DeepLink(uri) => self.apply_deep_link(&uri),
            NavEvent::Command(command) => {
                self.dispatch(command);
                true
            }
        }
    }

    /// Apply every event already queued, in order. Returns how many were applied.
    pub fn drain_events(&self, events: &mut NavEventReceiver) -> usize {
        let mut applied = 0;
        while let Some(event) = events.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    /// Apply events as they arrive until every sender is dropped.
    pub async fn run_events(&self, mut events: NavEventReceiver) {
        while let Some(event) = events.recv().await {
            self.handle_event(event);
        }
        tracing::debug!("Navigation event channel closed");
    }
}
