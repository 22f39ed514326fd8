// SPDX-License-Identifier: MIT OR Apache-2.0
//! Async playback driver.
//!
//! While the composition is playing, a tokio task ticks the playback clock on
//! a fixed interval through the shared editor handle. The task exists only
//! while playback is on: [`PlaybackDriver::sync`] spawns or aborts it to
//! match `is_playing`, and dropping the driver aborts it.

use crate::editor::Editor;
use crate::error::{EngineError, Result};
use crate::playback::TickOutcome;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Shared handle to the editor state, used by timer and event callbacks
pub type SharedEditor = Arc<Mutex<Editor>>;

/// Owns the playback tick task
#[derive(Debug)]
pub struct PlaybackDriver {
    store: SharedEditor,
    task: Option<JoinHandle<()>>,
}

impl PlaybackDriver {
    /// Create a driver; nothing runs until [`sync`](Self::sync)
    pub fn new(store: SharedEditor) -> Self {
        Self { store, task: None }
    }

    /// The shared editor this driver ticks
    pub fn store(&self) -> &SharedEditor {
        &self.store
    }

    /// Start or stop the tick task to match the playing flag.
    ///
    /// Must be called from within a tokio runtime when playback is on.
    pub fn sync(&mut self) -> Result<()> {
        let (is_playing, period) = {
            let editor = self.store.lock();
            let composition = &editor.composition;
            (composition.timeline.is_playing, composition.config.tick_period)
        };

        if !is_playing {
            self.stop();
            return Ok(());
        }
        if self.is_running() {
            return Ok(());
        }

        let handle = Handle::try_current().map_err(|_| EngineError::RuntimeUnavailable)?;
        let period = period.max(Duration::from_millis(1));
        self.task = Some(handle.spawn(run_ticks(Arc::clone(&self.store), period)));
        tracing::debug!("Playback driver started ({:?} period)", period);
        Ok(())
    }

    /// Abort the tick task, if any
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Playback driver stopped");
        }
    }

    /// Whether the tick task is alive
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for PlaybackDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_ticks(store: SharedEditor, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let outcome = {
            let mut editor = store.lock();
            editor.composition.playback_tick()
        };
        if outcome == TickOutcome::Idle {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::Composition;

    fn playing_store() -> SharedEditor {
        let mut composition = Composition::new();
        composition.play();
        Editor::new(composition).into_shared()
    }

    fn current_time(store: &SharedEditor) -> f32 {
        store.lock().composition.timeline.current_time
    }

    #[tokio::test(start_paused = true)]
    async fn test_driver_ticks_until_paused() {
        crate::test_support::init_tracing();
        let store = playing_store();
        let mut driver = PlaybackDriver::new(Arc::clone(&store));
        driver.sync().expect("sync");
        assert!(driver.is_running());

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!((current_time(&store) - 0.3).abs() < 1e-5);

        store.lock().composition.pause();
        driver.sync().expect("sync");
        assert!(!driver.is_running());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!((current_time(&store) - 0.3).abs() < 1e-5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_exits_when_playback_stops() {
        let store = playing_store();
        let mut driver = PlaybackDriver::new(Arc::clone(&store));
        driver.sync().expect("sync");

        tokio::time::sleep(Duration::from_millis(150)).await;
        store.lock().composition.pause();
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(!driver.is_running());
        assert!((current_time(&store) - 0.1).abs() < 1e-5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_is_idempotent_and_drop_aborts() {
        let store = playing_store();
        let mut driver = PlaybackDriver::new(Arc::clone(&store));
        driver.sync().expect("sync");
        driver.sync().expect("sync");

        tokio::time::sleep(Duration::from_millis(250)).await;
        assert!((current_time(&store) - 0.2).abs() < 1e-5);

        drop(driver);
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!((current_time(&store) - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_sync_outside_runtime() {
        let store = playing_store();
        let mut driver = PlaybackDriver::new(Arc::clone(&store));
        assert_eq!(driver.sync(), Err(EngineError::RuntimeUnavailable));

        store.lock().composition.pause();
        assert_eq!(driver.sync(), Ok(()));
        assert!(!driver.is_running());
    }
}
