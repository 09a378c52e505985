use crate::lap::{Lap, LapStatistics};
use crate::session::{SessionArchive, SessionId, SessionRecord};
use crate::time::{format_time, FormattedTime};
use clock::{Clock, SystemClock};
use serde::Serialize;
use std::time::Duration;
use ticker::Ticker;

pub mod clock;
pub mod ticker;

pub const DEFAULT_TICK_MS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EngineState {
    Idle,
    Running,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    StartPause,
    Lap,
    Reset,
    Save(Option<String>),
    DeleteSession(SessionId),
}

/// Everything the presentation layer may read, captured at one instant.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub state: EngineState,
    pub elapsed_ms: u64,
    pub time: FormattedTime,
    pub laps: &'a [Lap],
    pub statistics: Option<LapStatistics>,
    /// Most recent first.
    pub sessions: Vec<&'a SessionRecord>,
}

/// Owns elapsed time, the live lap sequence and the session archive.
///
/// The ticker is armed exactly while the engine is running and is disarmed
/// when the engine is dropped.
pub struct StopwatchEngine<T: Ticker, C: Clock = SystemClock> {
    state: EngineState,
    elapsed_ms: u64,
    laps: Vec<Lap>,
    archive: SessionArchive,
    ticker: T,
    clock: C,
    tick_ms: u64,
}

impl<T: Ticker> StopwatchEngine<T> {
    pub fn new(ticker: T) -> Self {
        Self::with_clock(ticker, SystemClock)
    }
}

impl<T: Ticker, C: Clock> StopwatchEngine<T, C> {
    pub fn with_clock(ticker: T, clock: C) -> Self {
        Self {
            state: EngineState::Idle,
            elapsed_ms: 0,
            laps: Vec::new(),
            archive: SessionArchive::default(),
            ticker,
            clock,
            tick_ms: DEFAULT_TICK_MS,
        }
    }

    /// Sets both the ticker period and the amount each tick adds.
    pub fn with_tick_ms(mut self, tick_ms: u64) -> Self {
        assert!(tick_ms > 0, "tick granularity must be positive");
        self.tick_ms = tick_ms;
        if self.state == EngineState::Running {
            self.ticker.arm(self.tick_period());
        }
        self
    }

    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::StartPause => self.start_pause(),
            Command::Lap => {
                self.lap();
            }
            Command::Reset => self.reset(),
            Command::Save(name) => {
                self.save(name.as_deref());
            }
            Command::DeleteSession(id) => {
                self.delete_session(id);
            }
        }
    }

    pub fn start_pause(&mut self) {
        match self.state {
            EngineState::Idle => {
                self.ticker.arm(self.tick_period());
                self.state = EngineState::Running;
                tracing::info!(elapsed_ms = self.elapsed_ms, "Started");
            }
            EngineState::Running => {
                self.stop();
                tracing::info!(elapsed_ms = self.elapsed_ms, "Paused");
            }
        }
    }

    /// Advances elapsed time by one tick. Ticks arriving while the ticker is disarmed are dropped.
    pub fn tick(&mut self) {
        if !self.ticker.is_armed() {
            return;
        }

        self.elapsed_ms += self.tick_ms;
        tracing::trace!(elapsed_ms = self.elapsed_ms, "Tick");
    }

    /// Records a lap against the current elapsed time, running or not.
    pub fn lap(&mut self) -> Option<&Lap> {
        if self.elapsed_ms == 0 {
            tracing::debug!("Ignoring lap before any time has elapsed");
            return None;
        }

        let previous_ms = self.laps.last().map(|lap| lap.total_ms).unwrap_or_default();
        let lap = Lap {
            number: self.laps.len() + 1,
            split_ms: self.elapsed_ms - previous_ms,
            total_ms: self.elapsed_ms,
            captured_at: self.clock.now(),
        };

        tracing::info!(
            lap = lap.number,
            split_ms = lap.split_ms,
            total_ms = lap.total_ms,
            "Recorded lap"
        );

        self.laps.push(lap);
        self.laps.last()
    }

    /// Stops the engine and discards elapsed time and laps.
    pub fn reset(&mut self) {
        self.stop();
        self.elapsed_ms = 0;
        self.laps.clear();
        tracing::info!("Reset");
    }

    /// Archives the current run under `name` and resets the engine.
    pub fn save(&mut self, name: Option<&str>) -> Option<SessionId> {
        if self.elapsed_ms == 0 {
            tracing::debug!("Ignoring save before any time has elapsed");
            return None;
        }

        let id = self
            .archive
            .record(name, self.elapsed_ms, &self.laps, self.clock.now());

        if let Some(session) = self.archive.get(id) {
            tracing::info!(
                %id,
                name = session.name(),
                total_ms = session.total_ms(),
                laps = session.laps().len(),
                "Saved session"
            );
        }

        self.reset();
        Some(id)
    }

    pub fn delete_session(&mut self, id: SessionId) -> Option<SessionRecord> {
        let removed = self.archive.remove(id);
        match &removed {
            Some(session) => tracing::info!(%id, name = session.name(), "Deleted session"),
            None => tracing::debug!(%id, "No session to delete"),
        }
        removed
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn formatted_time(&self) -> FormattedTime {
        format_time(self.elapsed_ms)
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn laps_recent_first(&self) -> impl Iterator<Item = &Lap> {
        self.laps.iter().rev()
    }

    pub fn statistics(&self) -> Option<LapStatistics> {
        LapStatistics::from_laps(&self.laps)
    }

    pub fn sessions(&self) -> &SessionArchive {
        &self.archive
    }

    /// True when a reset would change nothing.
    pub fn is_cleared(&self) -> bool {
        self.elapsed_ms == 0 && self.laps.is_empty()
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            elapsed_ms: self.elapsed_ms,
            time: self.formatted_time(),
            laps: &self.laps,
            statistics: self.statistics(),
            sessions: self.archive.recent_first().collect(),
        }
    }

    fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    fn stop(&mut self) {
        self.ticker.disarm();
        self.state = EngineState::Idle;
    }
}

impl<T: Ticker, C: Clock> Drop for StopwatchEngine<T, C> {
    fn drop(&mut self) {
        self.ticker.disarm();
    }
}
