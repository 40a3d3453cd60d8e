use crate::diary_state::{reduce, DiaryAction, DiaryState, NewEntry};
use crate::dispatch::{self, Command, Dispatcher};
use crate::id_allocator::IdAllocator;
use crate::seed::{self, SeedRecord};
use crate::stats::{DiaryStats, StatsCache};
use chrono::Utc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Single owner of the journal state. Views write through the [`Dispatcher`]
/// returned by [`Store::new`]; the event loop calls [`Store::drain`] to apply
/// what they sent.
pub struct Store {
    state: DiaryState,
    ids: IdAllocator,
    stats: StatsCache,
    commands: UnboundedReceiver<Command>,
}

impl Store {
    pub fn new() -> (Self, Dispatcher) {
        let (dispatcher, commands) = dispatch::channel();
        let store = Store {
            state: DiaryState::new(),
            ids: IdAllocator::new(),
            stats: StatsCache::new(),
            commands,
        };
        (store, dispatcher)
    }

    pub fn state(&self) -> &DiaryState {
        &self.state
    }

    pub fn stats(&mut self) -> DiaryStats {
        self.stats.get(self.state.get_entries())
    }

    pub fn dispatch(&mut self, action: DiaryAction) {
        let kind = action.kind();
        let before = self.state.len();
        let next = reduce(&self.state, action);
        if next == self.state {
            tracing::trace!(kind, "action left state unchanged");
        } else {
            tracing::debug!(kind, before, after = next.len(), "applied action");
        }
        self.state = next;
    }

    /// Decodes a JSON action and applies it. Input that does not decode is
    /// logged and dropped.
    pub fn dispatch_encoded(&mut self, encoded: &str) {
        match serde_json::from_str::<DiaryAction>(encoded) {
            Ok(action) => self.dispatch(action),
            Err(e) => tracing::warn!("ignoring malformed action: {e}"),
        }
    }

    pub fn apply(&mut self, command: Command) {
        let action = match command {
            Command::Create {
                author,
                content,
                emotion,
            } => DiaryAction::Create {
                data: NewEntry {
                    author,
                    content,
                    emotion,
                    id: self.ids.next(),
                },
            },
            Command::Remove { target_id } => DiaryAction::Remove { target_id },
            Command::Edit {
                target_id,
                new_content,
            } => DiaryAction::Edit {
                target_id,
                new_content,
            },
        };
        self.dispatch(action);
    }

    /// Applies every command queued since the last call. Returns how many ran.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.commands.try_recv() {
            self.apply(command);
            applied += 1;
        }
        applied
    }

    /// Replaces the journal with the seed records as a single init.
    pub fn load_seed(&mut self, records: Vec<SeedRecord>) -> usize {
        let entries = seed::into_entries(records, &mut self.ids, &mut rand::thread_rng(), Utc::now());
        let count = entries.len();
        self.dispatch(DiaryAction::Init { data: entries });
        tracing::info!(count, next_id = self.ids.peek(), "journal seeded");
        count
    }
}
