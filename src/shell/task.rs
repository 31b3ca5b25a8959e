use std::future::Future;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::{AbortHandle, JoinHandle};

/// Lifecycle of one user-triggered action.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ActionState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> ActionState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ActionState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ActionState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// An external call running off the interaction loop.
pub struct PendingAction<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> PendingAction<T> {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        Self { handle: tokio::spawn(future) }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub async fn wait(self) -> ActionState<T> {
        match self.handle.await {
            Ok(value) => ActionState::Ready(value),
            Err(e) if e.is_cancelled() => ActionState::Failed("cancelled".to_string()),
            Err(e) => ActionState::Failed(format!("action panicked: {}", e)),
        }
    }
}

/// Waits for `action` behind a spinner; Ctrl-C cancels it.
pub async fn wait_interruptible<T: Send + 'static>(
    action: PendingAction<T>,
    message: &'static str,
) -> ActionState<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let abort = action.abort_handle();
    let state = tokio::select! {
        state = action.wait() => state,
        _ = tokio::signal::ctrl_c() => {
            abort.abort();
            tracing::info!("action cancelled by user");
            ActionState::Failed("cancelled".to_string())
        }
    };
    spinner.finish_and_clear();
    state
}
