use crate::engine::{EngineState, Snapshot};
use crate::time::{format_fractional, format_time};
use std::fmt::{Display, Formatter};

/// Plain-text rendering of a [`Snapshot`].
pub struct View<'a>(pub &'a Snapshot<'a>);

impl Display for View<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let snapshot = self.0;

        let state = match snapshot.state {
            EngineState::Running => "running",
            EngineState::Idle if snapshot.elapsed_ms > 0 => "paused",
            EngineState::Idle => "ready",
        };
        writeln!(f, "  {}  [{state}]", snapshot.time)?;

        if let Some(stats) = &snapshot.statistics {
            writeln!(
                f,
                "  fastest {}  average {}  slowest {}",
                format_time(stats.fastest_ms).split(),
                format_fractional(stats.average_ms).split(),
                format_time(stats.slowest_ms).split(),
            )?;
        }

        if !snapshot.laps.is_empty() {
            writeln!(f, "  laps ({})", snapshot.laps.len())?;
            for lap in snapshot.laps.iter().rev() {
                let mut marker = String::new();
                if let Some(stats) = &snapshot.statistics {
                    if stats.is_fastest(lap) {
                        marker.push_str("  fastest");
                    }
                    if stats.is_slowest(lap) {
                        marker.push_str("  slowest");
                    }
                }
                writeln!(
                    f,
                    "    #{:<3} {}  total {}  at {}{marker}",
                    lap.number,
                    format_time(lap.split_ms).split(),
                    format_time(lap.total_ms).short(),
                    lap.captured_label(),
                )?;
            }
        }

        if snapshot.sessions.is_empty() {
            write!(f, "  no saved sessions")?;
        } else {
            write!(f, "  sessions ({})", snapshot.sessions.len())?;
            for session in &snapshot.sessions {
                write!(
                    f,
                    "\n    {}  {}  {}  {}  {} {}",
                    session.id(),
                    session.name(),
                    format_time(session.total_ms()).clock(),
                    session.lap_summary(),
                    session.saved_date(),
                    session.saved_time(),
                )?;
            }
        }

        Ok(())
    }
}
