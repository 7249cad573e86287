//! Per-question countdown.
//!
//! A started timer runs its callback once after the duration unless it is
//! cancelled first. Starting a new timer cancels the previous one, and so does
//! dropping the timer. Resolving a question exactly once is still the
//! session's job: the callback must tolerate arriving after an answer.

use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
pub struct QuestionTimer {
  handle: Option<JoinHandle<()>>,
}

impl QuestionTimer {
  pub fn new() -> Self {
    Self::default()
  }

  /// Schedule `on_expire` after `duration`. Must be called inside a tokio runtime.
  pub fn start<F>(&mut self, duration: Duration, on_expire: F)
  where
    F: FnOnce() + Send + 'static,
  {
    self.cancel();
    self.handle = Some(tokio::spawn(async move {
      tokio::time::sleep(duration).await;
      on_expire();
    }));
  }

  pub fn cancel(&mut self) {
    if let Some(handle) = self.handle.take() {
      handle.abort();
    }
  }
}

impl Drop for QuestionTimer {
  fn drop(&mut self) {
    self.cancel();
  }
}
