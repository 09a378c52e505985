use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

const CAPACITY: usize = 200;

struct Entries {
    lines: VecDeque<(usize, String)>,
    written: usize,
}

/// Stopwatch activity (starts, laps, saves, deletes) kept in memory for the `log` command.
///
/// Installed as a tracing writer; each formatted event becomes one numbered entry.
#[derive(Clone)]
pub struct History {
    entries: Arc<Mutex<Entries>>,
}

impl Default for History {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Entries {
                lines: VecDeque::with_capacity(CAPACITY),
                written: 0,
            })),
        }
    }
}

impl History {
    /// The last `limit` entries, oldest first, each prefixed with its sequence number.
    pub fn recent(&self, limit: Option<usize>) -> Vec<String> {
        let guard = match self.entries.lock() {
            Ok(guard) => guard,
            Err(e) => e.into_inner(),
        };

        let skip = limit.map_or(0, |limit| guard.lines.len().saturating_sub(limit));
        guard
            .lines
            .iter()
            .skip(skip)
            .map(|(number, line)| format!("{number:>4}  {line}"))
            .collect()
    }
}

impl std::io::Write for History {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let line = text.trim_end();
        if line.is_empty() {
            return Ok(buf.len());
        }

        let mut guard = match self.entries.lock() {
            Ok(guard) => guard,
            Err(e) => e.into_inner(),
        };

        if guard.lines.len() >= CAPACITY {
            guard.lines.pop_front();
        }

        guard.written += 1;
        let number = guard.written;
        guard.lines.push_back((number, line.to_string()));

        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for History {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
