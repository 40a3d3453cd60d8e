use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Shortest content accepted when writing or editing an entry.
pub const MIN_CONTENT_LEN: usize = 5;

/// Mood rating, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Emotion(u8);

impl Emotion {
    pub const MIN: Emotion = Emotion(1);
    pub const MAX: Emotion = Emotion(5);

    pub fn value(self) -> u8 {
        self.0
    }

    /// Ratings of 3 and above count as a good day.
    pub fn is_good(self) -> bool {
        self.0 >= 3
    }

    pub fn increment(self) -> Self {
        Emotion((self.0 + 1).min(Self::MAX.0))
    }

    pub fn decrement(self) -> Self {
        Emotion((self.0 - 1).max(Self::MIN.0))
    }
}

impl Default for Emotion {
    fn default() -> Self {
        Emotion::MIN
    }
}

impl TryFrom<u8> for Emotion {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN.0..=Self::MAX.0).contains(&value) {
            Ok(Emotion(value))
        } else {
            Err(ValidationError::EmotionOutOfRange(value))
        }
    }
}

impl From<Emotion> for u8 {
    fn from(emotion: Emotion) -> Self {
        emotion.0
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("author must not be empty")]
    EmptyAuthor,

    #[error("content must be at least 5 characters (got {0})")]
    ContentTooShort(usize),

    #[error("emotion must be between 1 and 5 (got {0})")]
    EmotionOutOfRange(u8),
}

pub fn validate_author(author: &str) -> Result<(), ValidationError> {
    if author.is_empty() {
        return Err(ValidationError::EmptyAuthor);
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), ValidationError> {
    let len = content.chars().count();
    if len < MIN_CONTENT_LEN {
        return Err(ValidationError::ContentTooShort(len));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: usize,
    pub author: String,
    pub content: String,
    pub emotion: Emotion,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_date: DateTime<Utc>,
}

impl DiaryEntry {
    pub fn new(
        id: usize,
        author: String,
        content: String,
        emotion: Emotion,
        created_date: DateTime<Utc>,
    ) -> Self {
        DiaryEntry {
            id,
            author,
            content,
            emotion,
            created_date,
        }
    }

    /// Creation time rendered in the local timezone.
    pub fn local_timestamp(&self) -> String {
        self.created_date
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_emotion_range() {
        assert!(Emotion::try_from(0).is_err());
        assert!(Emotion::try_from(6).is_err());
        for v in 1..=5 {
            assert_eq!(Emotion::try_from(v).map(Emotion::value), Ok(v));
        }
    }

    #[test]
    fn test_emotion_step_is_clamped() {
        assert_eq!(Emotion::MAX.increment(), Emotion::MAX);
        assert_eq!(Emotion::MIN.decrement(), Emotion::MIN);
        assert_eq!(Emotion::MIN.increment().value(), 2);
    }

    #[test]
    fn test_good_threshold() {
        let good: Vec<bool> = (1..=5)
            .map(|v| Emotion::try_from(v).map(Emotion::is_good).unwrap_or(false))
            .collect();
        assert_eq!(good, vec![false, false, true, true, true]);
    }

    #[test]
    fn test_validation() {
        assert_eq!(validate_author(""), Err(ValidationError::EmptyAuthor));
        assert!(validate_author("alice").is_ok());
        assert_eq!(
            validate_content("abcd"),
            Err(ValidationError::ContentTooShort(4))
        );
        assert!(validate_content("abcde").is_ok());
        // counted in characters, not bytes
        assert_eq!(
            validate_content("일기장"),
            Err(ValidationError::ContentTooShort(3))
        );
    }

    #[test]
    fn test_serde_uses_millis_and_rejects_bad_emotion() {
        let created = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let entry = DiaryEntry::new(7, "bob".into(), "hello there".into(), Emotion::MAX, created);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["created_date"], 1_700_000_000_123i64);
        assert_eq!(json["emotion"], 5);

        let back: DiaryEntry = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, entry);

        let mut bad = json;
        bad["emotion"] = 9.into();
        assert!(serde_json::from_value::<DiaryEntry>(bad).is_err());
    }
}
