use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// A periodic time source that drives the engine while it is running.
pub trait Ticker {
    /// Starts delivering ticks every `period`.
    fn arm(&mut self, period: Duration);

    /// Stops delivering ticks. Disarming an idle ticker does nothing.
    fn disarm(&mut self);

    fn is_armed(&self) -> bool;
}

/// A ticker that never fires on its own. Callers advance the engine by hand.
#[derive(Debug, Default)]
pub struct ManualTicker {
    period: Option<Duration>,
    arms: usize,
}

impl ManualTicker {
    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    /// How many times the ticker has been armed.
    pub fn arms(&self) -> usize {
        self.arms
    }
}

impl Ticker for ManualTicker {
    fn arm(&mut self, period: Duration) {
        self.period = Some(period);
        self.arms += 1;
    }

    fn disarm(&mut self) {
        self.period = None;
    }

    fn is_armed(&self) -> bool {
        self.period.is_some()
    }
}

/// Sends the current arm epoch over a channel on every tick of a tokio interval.
///
/// Must be armed from within a tokio runtime.
pub struct IntervalTicker {
    sender: UnboundedSender<u64>,
    task: Option<JoinHandle<()>>,
    epoch: u64,
}

impl IntervalTicker {
    pub fn new(sender: UnboundedSender<u64>) -> Self {
        Self {
            sender,
            task: None,
            epoch: 0,
        }
    }

    /// Whether a tick carrying `epoch` was sent by the currently armed interval.
    ///
    /// Ticks already queued when the ticker was disarmed carry a stale epoch.
    pub fn is_current(&self, epoch: u64) -> bool {
        self.task.is_some() && self.epoch == epoch
    }
}

impl Ticker for IntervalTicker {
    fn arm(&mut self, period: Duration) {
        self.disarm();
        self.epoch += 1;

        let epoch = self.epoch;
        let sender = self.sender.clone();
        self.task = Some(tokio::spawn(async move {
            let start = tokio::time::Instant::now() + period;
            let mut interval = tokio::time::interval_at(start, period);

            loop {
                interval.tick().await;
                if sender.send(epoch).is_err() {
                    break;
                }
            }
        }));

        tracing::debug!(epoch, ?period, "Armed ticker");
    }

    fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.epoch += 1;
            tracing::debug!(epoch = self.epoch, "Disarmed ticker");
        }
    }

    fn is_armed(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.disarm();
    }
}
