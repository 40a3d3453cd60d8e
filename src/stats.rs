//! Mood statistics derived from the current entries.
//!
//! Nothing here is stored in the journal itself. [`StatsCache`] keeps the last
//! result and only recomputes when the number of entries changes; an edit that
//! keeps the count (or a remove and create landing between two reads) keeps
//! the previous figures.

use crate::diary_entry::DiaryEntry;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiaryStats {
    pub total: usize,
    pub good_count: usize,
    pub bad_count: usize,
    /// Percentage of good entries, `None` when there are no entries.
    pub good_ratio: Option<f64>,
}

impl DiaryStats {
    pub fn compute(entries: &[DiaryEntry]) -> Self {
        let total = entries.len();
        let good_count = entries.iter().filter(|e| e.emotion.is_good()).count();
        let good_ratio = if total == 0 {
            None
        } else {
            Some(good_count as f64 / total as f64 * 100.0)
        };

        DiaryStats {
            total,
            good_count,
            bad_count: total - good_count,
            good_ratio,
        }
    }

    pub fn ratio_display(&self) -> RatioDisplay {
        RatioDisplay(self.good_ratio)
    }
}

/// Formats a good-ratio for the stats bar: one decimal place, or `N/A`.
#[derive(Debug, Clone, Copy)]
pub struct RatioDisplay(Option<f64>);

impl fmt::Display for RatioDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(ratio) if ratio.is_finite() => write!(f, "{:.1}%", ratio),
            _ => write!(f, "N/A"),
        }
    }
}

#[derive(Debug, Default)]
pub struct StatsCache {
    keyed_on: Option<usize>,
    value: DiaryStats,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, entries: &[DiaryEntry]) -> DiaryStats {
        if self.keyed_on != Some(entries.len()) {
            self.value = DiaryStats::compute(entries);
            self.keyed_on = Some(entries.len());
            tracing::trace!(total = entries.len(), "recomputed stats");
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diary_entry::Emotion;
    use chrono::Utc;

    fn entries(moods: &[u8]) -> Vec<DiaryEntry> {
        moods
            .iter()
            .enumerate()
            .map(|(id, &m)| {
                DiaryEntry::new(
                    id,
                    "author".into(),
                    "content here".into(),
                    Emotion::try_from(m).unwrap(),
                    Utc::now(),
                )
            })
            .collect()
    }

    #[test]
    fn test_one_of_each_mood() {
        let stats = DiaryStats::compute(&entries(&[1, 2, 3, 4, 5]));
        assert_eq!(stats.total, 5);
        assert_eq!(stats.good_count, 3);
        assert_eq!(stats.bad_count, 2);
        assert_eq!(stats.good_ratio, Some(60.0));
        assert_eq!(stats.ratio_display().to_string(), "60.0%");
    }

    #[test]
    fn test_empty_has_no_ratio() {
        let stats = DiaryStats::compute(&[]);
        assert_eq!(stats.good_count, 0);
        assert_eq!(stats.bad_count, 0);
        assert_eq!(stats.good_ratio, None);
        assert_eq!(stats.ratio_display().to_string(), "N/A");
    }

    #[test]
    fn test_non_finite_ratio_is_never_shown() {
        assert_eq!(RatioDisplay(Some(f64::NAN)).to_string(), "N/A");
    }

    #[test]
    fn test_cache_is_keyed_on_count() {
        let mut cache = StatsCache::new();
        let mut list = entries(&[1, 1, 1]);
        assert_eq!(cache.get(&list).good_count, 0);

        // same count, different moods: cached figures are kept
        list[0].emotion = Emotion::MAX;
        assert_eq!(cache.get(&list).good_count, 0);

        list.pop();
        let stats = cache.get(&list);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.good_count, 1);
    }
}
