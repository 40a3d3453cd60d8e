use crate::diary_entry::{DiaryEntry, Emotion};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered journal entries, newest-created first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiaryState {
    entries: Vec<DiaryEntry>,
}

impl DiaryState {
    pub fn new() -> Self {
        DiaryState {
            entries: Vec::new(),
        }
    }

    pub fn get_entries(&self) -> &[DiaryEntry] {
        &self.entries
    }

    pub fn get_entry(&self, id: usize) -> Option<&DiaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<DiaryEntry>> for DiaryState {
    fn from(entries: Vec<DiaryEntry>) -> Self {
        DiaryState { entries }
    }
}

/// Fields of an entry before the store stamps its creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
    pub author: String,
    pub content: String,
    pub emotion: Emotion,
    pub id: usize,
}

/// State transitions understood by [`reduce`].
///
/// The serialized form is `{"type": "CREATE", ...}`. A `type` that is not
/// recognised decodes to [`DiaryAction::Unknown`], which leaves state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiaryAction {
    Init {
        data: Vec<DiaryEntry>,
    },
    Create {
        data: NewEntry,
    },
    #[serde(rename_all = "camelCase")]
    Remove {
        target_id: usize,
    },
    #[serde(rename_all = "camelCase")]
    Edit {
        target_id: usize,
        new_content: String,
    },
    #[serde(other)]
    Unknown,
}

impl DiaryAction {
    pub fn kind(&self) -> &'static str {
        match self {
            DiaryAction::Init { .. } => "INIT",
            DiaryAction::Create { .. } => "CREATE",
            DiaryAction::Remove { .. } => "REMOVE",
            DiaryAction::Edit { .. } => "EDIT",
            DiaryAction::Unknown => "UNKNOWN",
        }
    }
}

pub fn reduce(state: &DiaryState, action: DiaryAction) -> DiaryState {
    reduce_at(state, action, Utc::now())
}

/// Computes the next state. `now` is the creation time stamped onto a created entry.
///
/// Never fails: removing or editing an id that is not present, and unknown
/// actions, return a copy of `state`.
pub fn reduce_at(state: &DiaryState, action: DiaryAction, now: DateTime<Utc>) -> DiaryState {
    match action {
        DiaryAction::Init { data } => DiaryState::from(data),
        DiaryAction::Create { data } => {
            let entry = DiaryEntry::new(data.id, data.author, data.content, data.emotion, now);
            let mut entries = Vec::with_capacity(state.entries.len() + 1);
            entries.push(entry);
            entries.extend(state.entries.iter().cloned());
            DiaryState { entries }
        }
        DiaryAction::Remove { target_id } => DiaryState {
            entries: state
                .entries
                .iter()
                .filter(|e| e.id != target_id)
                .cloned()
                .collect(),
        },
        DiaryAction::Edit {
            target_id,
            new_content,
        } => DiaryState {
            entries: state
                .entries
                .iter()
                .map(|e| {
                    if e.id == target_id {
                        DiaryEntry {
                            content: new_content.clone(),
                            ..e.clone()
                        }
                    } else {
                        e.clone()
                    }
                })
                .collect(),
        },
        DiaryAction::Unknown => state.clone(),
    }
}
