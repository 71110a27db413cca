//! Periodic drivers feeding the session's command queue.
//!
//! Each driver is a spawned task wrapped in a [`TimerTask`] that aborts it on
//! drop, so no timer outlives the session or the toggle that started it.

use super::runtime::Command;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Owns a spawned task and aborts it when dropped.
#[derive(Debug)]
pub struct TimerTask {
    handle: JoinHandle<()>,
}

impl TimerTask {
    pub fn spawn<F>(future: F) -> Self
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: tokio::spawn(future),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TimerTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Posts `command()` every `period`, skipping ticks while `skip_while` is set.
///
/// Stops by itself once the session's queue is gone.
fn spawn_ticker<F>(
    period: Duration,
    commands: mpsc::WeakSender<Command>,
    skip_while: Option<Arc<AtomicBool>>,
    command: F,
) -> TimerTask
where
    F: Fn() -> Command + Send + 'static,
{
    TimerTask::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if skip_while
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Acquire))
            {
                continue;
            }
            let Some(tx) = commands.upgrade() else {
                break;
            };
            if tx.send(command()).await.is_err() {
                break;
            }
        }
    })
}

/// Fires roll requests at the auto-roll interval while enabled.
#[derive(Debug, Default)]
pub struct AutoRollScheduler {
    task: Option<TimerTask>,
    interval_ms: u64,
}

impl AutoRollScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Interval currently scheduled, if running.
    pub fn interval_ms(&self) -> Option<u64> {
        self.task.as_ref().map(|_| self.interval_ms)
    }

    /// Starts (or restarts) the timer. A zero interval runs at 1 ms.
    pub(crate) fn start(
        &mut self,
        interval_ms: u64,
        rolling: Arc<AtomicBool>,
        commands: mpsc::WeakSender<Command>,
    ) {
        self.stop();
        let period = Duration::from_millis(interval_ms.max(1));
        self.task = Some(spawn_ticker(period, commands, Some(rolling), || {
            Command::AutoRollTick
        }));
        self.interval_ms = interval_ms;
        log::debug!("auto-roll every {}ms", interval_ms.max(1));
    }

    /// Restarts the timer if running at a different interval.
    pub(crate) fn retime(
        &mut self,
        interval_ms: u64,
        rolling: Arc<AtomicBool>,
        commands: mpsc::WeakSender<Command>,
    ) {
        if self.is_running() && self.interval_ms != interval_ms {
            self.start(interval_ms, rolling, commands);
        }
    }

    pub fn stop(&mut self) {
        if self.task.take().is_some() {
            log::debug!("auto-roll stopped");
        }
    }
}

/// Posts a potion tick every `period`.
pub(crate) fn spawn_potion_timer(period: Duration, commands: mpsc::WeakSender<Command>) -> TimerTask {
    spawn_ticker(period, commands, None, || Command::PotionTick)
}

/// Posts the commit for an in-flight roll after the settle delay.
pub(crate) fn spawn_settle(delay: Duration, commands: mpsc::WeakSender<Command>) -> TimerTask {
    TimerTask::spawn(async move {
        time::sleep(delay).await;
        if let Some(tx) = commands.upgrade() {
            let _ = tx.send(Command::CommitRoll).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_auto_roll_ticks_and_stops() {
        let (tx, mut rx) = mpsc::channel(8);
        let rolling = Arc::new(AtomicBool::new(false));
        let mut scheduler = AutoRollScheduler::new();
        scheduler.start(200, rolling.clone(), tx.downgrade());
        assert_eq!(scheduler.interval_ms(), Some(200));

        time::sleep(Duration::from_millis(450)).await;
        assert!(matches!(rx.try_recv(), Ok(Command::AutoRollTick)));
        assert!(matches!(rx.try_recv(), Ok(Command::AutoRollTick)));
        assert!(rx.try_recv().is_err());

        scheduler.stop();
        time::sleep(Duration::from_millis(1000)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_roll_suppressed_while_rolling() {
        let (tx, mut rx) = mpsc::channel(8);
        let rolling = Arc::new(AtomicBool::new(true));
        let mut scheduler = AutoRollScheduler::new();
        scheduler.start(100, rolling.clone(), tx.downgrade());

        time::sleep(Duration::from_millis(550)).await;
        assert!(rx.try_recv().is_err());

        rolling.store(false, Ordering::Release);
        time::sleep(Duration::from_millis(100)).await;
        assert!(matches!(rx.try_recv(), Ok(Command::AutoRollTick)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retime_only_when_running_and_changed() {
        let (tx, _rx) = mpsc::channel(8);
        let rolling = Arc::new(AtomicBool::new(false));
        let mut scheduler = AutoRollScheduler::new();
        scheduler.retime(150, rolling.clone(), tx.downgrade());
        assert!(!scheduler.is_running());

        scheduler.start(200, rolling.clone(), tx.downgrade());
        scheduler.retime(0, rolling, tx.downgrade());
        assert_eq!(scheduler.interval_ms(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_timer_is_aborted() {
        let (tx, mut rx) = mpsc::channel(8);
        let timer = spawn_potion_timer(Duration::from_millis(1000), tx.downgrade());
        drop(timer);
        time::sleep(Duration::from_millis(3000)).await;
        assert!(rx.try_recv().is_err());
    }
}
