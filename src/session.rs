use crate::lap::Lap;
use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u32);

/// Serialized as the same hex token the console accepts.
impl Serialize for SessionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

#[derive(Debug)]
pub struct SessionIdParseError;

impl Display for SessionIdParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid session identifier")
    }
}

impl Error for SessionIdParseError {}

impl FromStr for SessionId {
    type Err = SessionIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.len() > 8 {
            return Err(SessionIdParseError);
        }

        u32::from_str_radix(s, 16)
            .map(SessionId)
            .map_err(|_| SessionIdParseError)
    }
}

/// A finalized timing run. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionRecord {
    id: SessionId,
    name: String,
    total_ms: u64,
    laps: Vec<Lap>,
    saved_at: DateTime<Local>,
}

impl SessionRecord {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ms
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn saved_at(&self) -> DateTime<Local> {
        self.saved_at
    }

    pub fn saved_date(&self) -> String {
        self.saved_at.format("%Y-%m-%d").to_string()
    }

    pub fn saved_time(&self) -> String {
        self.saved_at.format("%H:%M:%S").to_string()
    }

    pub fn lap_summary(&self) -> String {
        match self.laps.len() {
            1 => String::from("1 lap"),
            n => format!("{n} laps"),
        }
    }
}

/// Falls back to `Session N` when the supplied name is missing or blank.
pub fn resolve_name(name: Option<&str>, saved: usize) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("Session {}", saved + 1),
    }
}

/// Saved sessions in insertion order. Records are only ever appended or removed whole.
#[derive(Debug, Default)]
pub struct SessionArchive {
    sessions: Vec<SessionRecord>,
}

impl SessionArchive {
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: SessionId) -> Option<&SessionRecord> {
        self.sessions.iter().find(|session| session.id == id)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &SessionRecord> {
        self.sessions.iter()
    }

    pub fn recent_first(&self) -> impl Iterator<Item = &SessionRecord> {
        self.sessions.iter().rev()
    }

    /// Appends a new record and returns its identifier.
    pub fn record(
        &mut self,
        name: Option<&str>,
        total_ms: u64,
        laps: &[Lap],
        saved_at: DateTime<Local>,
    ) -> SessionId {
        let id = self.fresh_id();
        self.sessions.push(SessionRecord {
            id,
            name: resolve_name(name, self.sessions.len()),
            total_ms,
            laps: laps.to_vec(),
            saved_at,
        });

        id
    }

    pub fn remove(&mut self, id: SessionId) -> Option<SessionRecord> {
        let index = self.sessions.iter().position(|session| session.id == id)?;
        Some(self.sessions.remove(index))
    }

    fn fresh_id(&self) -> SessionId {
        loop {
            let id = SessionId(rand::random());
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lap(number: usize, split_ms: u64, total_ms: u64) -> Lap {
        Lap {
            number,
            split_ms,
            total_ms,
            captured_at: Local::now(),
        }
    }

    #[test]
    fn test_resolve_name() {
        assert_eq!(resolve_name(None, 0), "Session 1");
        assert_eq!(resolve_name(Some("   "), 2), "Session 3");
        assert_eq!(resolve_name(Some("  Morning run "), 2), "Morning run");
    }

    #[test]
    fn test_session_id_round_trip() {
        let id = SessionId(0x00ab_cdef);
        assert_eq!(id.to_string(), "00abcdef");
        assert_eq!("00abcdef".parse::<SessionId>().unwrap(), id);
        assert_eq!("ABCDEF".parse::<SessionId>().unwrap(), id);
    }

    #[test]
    fn test_session_id_rejects_garbage() {
        assert!("".parse::<SessionId>().is_err());
        assert!("xyz".parse::<SessionId>().is_err());
        assert!("123456789".parse::<SessionId>().is_err());
    }

    #[test]
    fn test_record_copies_laps() {
        let mut archive = SessionArchive::default();
        let mut laps = vec![lap(1, 30, 30)];
        let id = archive.record(None, 30, &laps, Local::now());

        laps.clear();

        let session = archive.get(id).unwrap();
        assert_eq!(session.name(), "Session 1");
        assert_eq!(session.total_ms(), 30);
        assert_eq!(session.laps().len(), 1);
        assert_eq!(session.lap_summary(), "1 lap");
    }

    #[test]
    fn test_ids_are_unique() {
        let mut archive = SessionArchive::default();
        let ids: Vec<SessionId> = (0..100)
            .map(|_| archive.record(None, 10, &[], Local::now()))
            .collect();

        for (index, id) in ids.iter().enumerate() {
            assert!(!ids[index + 1..].contains(id));
        }
    }

    #[test]
    fn test_recent_first() {
        let mut archive = SessionArchive::default();
        archive.record(Some("first"), 10, &[], Local::now());
        archive.record(Some("second"), 20, &[], Local::now());

        let names: Vec<&str> = archive.recent_first().map(SessionRecord::name).collect();
        assert_eq!(names, vec!["second", "first"]);

        let names: Vec<&str> = archive.iter().map(SessionRecord::name).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_remove() {
        let mut archive = SessionArchive::default();
        let first = archive.record(None, 10, &[], Local::now());
        let second = archive.record(None, 20, &[lap(1, 5, 5), lap(2, 15, 20)], Local::now());

        assert_eq!(archive.remove(first).map(|s| s.id()), Some(first));
        assert_eq!(archive.remove(first), None);
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.get(second).unwrap().lap_summary(), "2 laps");
    }
}
