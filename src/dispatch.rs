use crate::diary_entry::Emotion;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A write request from the view tree. The store turns each command into
/// exactly one reducer action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create {
        author: String,
        content: String,
        emotion: Emotion,
    },
    Remove {
        target_id: usize,
    },
    Edit {
        target_id: usize,
        new_content: String,
    },
}

/// Write-only handle given to views. Clones share one channel, so a handle
/// taken on one frame is interchangeable with one taken on the next.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: UnboundedSender<Command>,
}

pub fn channel() -> (Dispatcher, UnboundedReceiver<Command>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Dispatcher { tx }, rx)
}

impl Dispatcher {
    pub fn create(&self, author: impl Into<String>, content: impl Into<String>, emotion: Emotion) {
        self.send(Command::Create {
            author: author.into(),
            content: content.into(),
            emotion,
        });
    }

    pub fn remove(&self, target_id: usize) {
        self.send(Command::Remove { target_id });
    }

    pub fn edit(&self, target_id: usize, new_content: impl Into<String>) {
        self.send(Command::Edit {
            target_id,
            new_content: new_content.into(),
        });
    }

    pub fn same_channel(&self, other: &Dispatcher) -> bool {
        self.tx.same_channel(&other.tx)
    }

    fn send(&self, command: Command) {
        if let Err(e) = self.tx.send(command) {
            tracing::warn!("store is gone, dropping {:?}", e.0);
        }
    }
}
