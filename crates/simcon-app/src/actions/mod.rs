//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every network call runs in its own tokio task and reports back to the
//! update loop as a [`Message`]. Mutating calls are bounded by the action
//! timeout so the action lock is always released.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use simcon_client::{ApiError, ControlApi};
use simcon_core::ControlResponse;
use tokio::sync::mpsc;
use tracing::debug;

use crate::config::Settings;
use crate::handler::ControlCommand;
use crate::message::Message;
use crate::UpdateAction;

pub mod poller;

pub use poller::{fetch_snapshot, PollPolicy};

/// Everything background tasks need from the engine
pub struct ActionContext<A> {
    pub api: Arc<A>,
    pub msg_tx: mpsc::Sender<Message>,
    /// Upper bound for a mutating call
    pub action_timeout: Duration,
    pub poll_policy: PollPolicy,
}

impl<A> Clone for ActionContext<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            msg_tx: self.msg_tx.clone(),
            action_timeout: self.action_timeout,
            poll_policy: self.poll_policy.clone(),
        }
    }
}

impl<A> ActionContext<A> {
    pub fn new(api: Arc<A>, msg_tx: mpsc::Sender<Message>, settings: &Settings) -> Self {
        Self {
            api,
            msg_tx,
            action_timeout: settings.api.action_timeout(),
            poll_policy: PollPolicy::from_settings(&settings.polling),
        }
    }
}

/// Execute an action by spawning a background task
pub fn handle_action<A>(action: UpdateAction, ctx: &ActionContext<A>)
where
    A: ControlApi + Send + Sync + 'static,
{
    let api = ctx.api.clone();
    let msg_tx = ctx.msg_tx.clone();

    match action {
        UpdateAction::StartPoller {
            view_id,
            shutdown_rx,
        } => {
            poller::spawn_snapshot_poller(
                api,
                view_id,
                ctx.poll_policy.clone(),
                msg_tx,
                shutdown_rx,
            );
        }

        UpdateAction::FetchSnapshot { view_id } => {
            tokio::spawn(async move {
                let result = fetch_snapshot(api.as_ref()).await;
                let _ = msg_tx
                    .send(Message::SnapshotFetched { view_id, result })
                    .await;
            });
        }

        UpdateAction::DispatchControl { token, command } => {
            let timeout = ctx.action_timeout;
            tokio::spawn(async move {
                let kind = command.kind();
                let result = with_timeout(timeout, run_control(api.as_ref(), command)).await;
                let _ = msg_tx
                    .send(Message::ControlCompleted {
                        token,
                        kind,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::FetchActivity { view_id, request } => {
            tokio::spawn(async move {
                let result = api
                    .get_activity(request.limit, request.offset, request.filter)
                    .await;
                let _ = msg_tx
                    .send(Message::ActivityPageLoaded {
                        view_id,
                        request_id: request.request_id,
                        result,
                    })
                    .await;
            });
        }

        UpdateAction::FetchConfig { view_id, delay } => {
            tokio::spawn(async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                if msg_tx.is_closed() {
                    return;
                }
                let result = api.get_config().await;
                let _ = msg_tx.send(Message::ConfigFetched { view_id, result }).await;
            });
        }

        UpdateAction::SaveConfig {
            view_id,
            token,
            config,
        } => {
            let timeout = ctx.action_timeout;
            tokio::spawn(async move {
                let result = with_timeout(timeout, api.update_config(config)).await;
                let _ = msg_tx
                    .send(Message::ConfigSaved {
                        view_id,
                        token,
                        result,
                    })
                    .await;
            });
        }
    }
}

async fn run_control<A: ControlApi>(
    api: &A,
    command: ControlCommand,
) -> Result<ControlResponse, ApiError> {
    match command {
        ControlCommand::Start => api.start_simulator().await,
        ControlCommand::Stop => api.stop_simulator().await,
        ControlCommand::Reset(confirmed) => api.reset_simulator(confirmed.clear_data()).await,
    }
}

/// Run `call`, turning an overrun of `limit` into [`ApiError::TimedOut`].
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => {
            debug!("Action exceeded {:?}", limit);
            Err(ApiError::TimedOut)
        }
    }
}
