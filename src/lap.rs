use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lap {
    /// Position in capture order, starting at 1.
    pub number: usize,
    /// Time since the previous lap, or since the start for the first lap.
    pub split_ms: u64,
    /// Elapsed time when the lap was captured.
    pub total_ms: u64,
    pub captured_at: DateTime<Local>,
}

impl Lap {
    pub fn captured_label(&self) -> String {
        self.captured_at.format("%H:%M:%S").to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LapStatistics {
    pub fastest_ms: u64,
    pub slowest_ms: u64,
    pub average_ms: f64,
}

impl LapStatistics {
    /// Returns `None` for an empty lap sequence.
    pub fn from_laps(laps: &[Lap]) -> Option<Self> {
        let fastest_ms = laps.iter().map(|lap| lap.split_ms).min()?;
        let slowest_ms = laps.iter().map(|lap| lap.split_ms).max()?;
        let sum: u64 = laps.iter().map(|lap| lap.split_ms).sum();

        Some(Self {
            fastest_ms,
            slowest_ms,
            average_ms: sum as f64 / laps.len() as f64,
        })
    }

    pub fn is_fastest(&self, lap: &Lap) -> bool {
        lap.split_ms == self.fastest_ms
    }

    /// A lap can be both the fastest and the slowest when every split is equal.
    pub fn is_slowest(&self, lap: &Lap) -> bool {
        lap.split_ms == self.slowest_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laps(splits: &[u64]) -> Vec<Lap> {
        let mut total_ms = 0;
        splits
            .iter()
            .enumerate()
            .map(|(index, &split_ms)| {
                total_ms += split_ms;
                Lap {
                    number: index + 1,
                    split_ms,
                    total_ms,
                    captured_at: Local::now(),
                }
            })
            .collect()
    }

    #[test]
    fn test_no_statistics_without_laps() {
        assert_eq!(LapStatistics::from_laps(&[]), None);
    }

    #[test]
    fn test_statistics() {
        let stats = LapStatistics::from_laps(&laps(&[30, 20, 45])).unwrap();
        assert_eq!(stats.fastest_ms, 20);
        assert_eq!(stats.slowest_ms, 45);
        assert!((stats.average_ms - 95.0 / 3.0).abs() < f64::EPSILON);
        assert!(stats.fastest_ms as f64 <= stats.average_ms);
        assert!(stats.average_ms <= stats.slowest_ms as f64);
    }

    #[test]
    fn test_average_keeps_fraction() {
        let stats = LapStatistics::from_laps(&laps(&[10, 15])).unwrap();
        assert_eq!(stats.average_ms, 12.5);
    }

    #[test]
    fn test_highlights() {
        let laps = laps(&[30, 20, 45, 25]);
        let stats = LapStatistics::from_laps(&laps).unwrap();
        let flags: Vec<(bool, bool)> = laps
            .iter()
            .map(|lap| (stats.is_fastest(lap), stats.is_slowest(lap)))
            .collect();
        assert_eq!(
            flags,
            vec![(false, false), (true, false), (false, true), (false, false)]
        );
    }

    #[test]
    fn test_equal_splits_are_fastest_and_slowest() {
        let laps = laps(&[15, 15, 15]);
        let stats = LapStatistics::from_laps(&laps).unwrap();
        assert!(laps.iter().all(|lap| stats.is_fastest(lap) && stats.is_slowest(lap)));
    }

    #[test]
    fn test_single_lap_is_fastest_and_slowest() {
        let laps = laps(&[40]);
        let stats = LapStatistics::from_laps(&laps).unwrap();
        assert_eq!(stats.fastest_ms, stats.slowest_ms);
        assert!(stats.is_fastest(&laps[0]));
        assert!(stats.is_slowest(&laps[0]));
    }
}
