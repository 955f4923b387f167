//! Engine - owns the TEA state, the message channel and the action context
//!
//! The TUI runner drives the engine: it feeds terminal events in, drains
//! background results, and renders `engine.state` between cycles.

use std::sync::Arc;

use simcon_client::ControlApi;
use tokio::sync::mpsc;
use tracing::info;

use crate::actions::ActionContext;
use crate::config::Settings;
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::{AppState, ViewKind};

/// Message channel capacity
const CHANNEL_CAPACITY: usize = 256;

pub struct Engine<A> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, background tasks).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    pub msg_rx: mpsc::Receiver<Message>,

    ctx: ActionContext<A>,
}

impl<A> Engine<A>
where
    A: ControlApi + Send + Sync + 'static,
{
    pub fn new(api: A, settings: Settings, base_url: impl Into<String>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
        let ctx = ActionContext::new(Arc::new(api), msg_tx.clone(), &settings);
        let state = AppState::new(settings, base_url);

        Self {
            state,
            msg_tx,
            msg_rx,
            ctx,
        }
    }

    /// Install the signal handler and mount the dashboard.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        info!("Connecting to control API at {}", self.state.base_url);
        signals::spawn_signal_handler(self.msg_tx.clone());
        self.process_message(Message::ShowView(ViewKind::Dashboard));
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        process::process_message(&mut self.state, msg, &self.ctx);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Wait for the next background message and process it.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Drop every mounted view, which stops the dashboard poller.
    pub fn shutdown(&mut self) {
        info!("Shutting down");
        self.state.unmount_all();
    }
}
