use super::confirm::Confirm;
use super::input::TextInput;
use crate::diary_entry::{validate_content, DiaryEntry, ValidationError};
use crate::diary_state::DiaryState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOutcome {
    Ignored,
    Handled,
    Confirm(Confirm),
}

/// Content of one entry being rewritten in place.
#[derive(Debug)]
struct ItemEdit {
    id: usize,
    input: TextInput,
    error: Option<ValidationError>,
}

/// Entry list on the left and the selected item on the right.
#[derive(Debug, Default)]
pub struct EntryList {
    selected: usize,
    editing: Option<ItemEdit>,
}

impl EntryList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Keeps the selection in range and drops an edit whose entry is gone.
    pub fn sync(&mut self, state: &DiaryState) {
        self.selected = self.selected.min(state.len().saturating_sub(1));
        if let Some(edit) = &self.editing {
            if state.get_entry(edit.id).is_none() {
                tracing::debug!(id = edit.id, "entry under edit disappeared");
                self.editing = None;
            }
        }
    }

    pub fn selected_entry<'a>(&self, state: &'a DiaryState) -> Option<&'a DiaryEntry> {
        state.get_entries().get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent, state: &DiaryState) -> ListOutcome {
        if let Some(edit) = &mut self.editing {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
                return match validate_content(edit.input.value()) {
                    Ok(()) => ListOutcome::Confirm(Confirm::Edit {
                        id: edit.id,
                        content: edit.input.value().to_string(),
                    }),
                    Err(e) => {
                        edit.error = Some(e);
                        ListOutcome::Handled
                    }
                };
            }
            if key.code == KeyCode::Esc {
                self.editing = None;
            } else {
                edit.input.handle_key(&key);
            }
            return ListOutcome::Handled;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                ListOutcome::Handled
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < state.len() {
                    self.selected += 1;
                }
                ListOutcome::Handled
            }
            KeyCode::Char('e') => match self.selected_entry(state) {
                Some(entry) => {
                    self.editing = Some(ItemEdit {
                        id: entry.id,
                        input: TextInput::multiline().with_value(&entry.content),
                        error: None,
                    });
                    ListOutcome::Handled
                }
                None => ListOutcome::Ignored,
            },
            KeyCode::Char('d') => match self.selected_entry(state) {
                Some(entry) => ListOutcome::Confirm(Confirm::Remove { id: entry.id }),
                None => ListOutcome::Ignored,
            },
            _ => ListOutcome::Ignored,
        }
    }

    /// Called once an edit has been confirmed and sent.
    pub fn finish_edit(&mut self) {
        self.editing = None;
    }

    pub fn render(&self, f: &mut Frame, area: Rect, state: &DiaryState) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        let items: Vec<ListItem> = state
            .get_entries()
            .iter()
            .map(|e| {
                ListItem::new(vec![
                    Line::from(vec![
                        Span::styled(format!("#{} ", e.id), Style::default().fg(Color::DarkGray)),
                        Span::raw(e.author.clone()),
                    ]),
                    Line::from(Span::raw(format!(
                        "  mood {} | {}",
                        e.emotion,
                        e.content.lines().next().unwrap_or("")
                    ))),
                ])
            })
            .collect();

        let title = format!("{} entries", state.len());
        let entries_list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().add_modifier(Modifier::BOLD))
            .highlight_symbol("> ");

        let selected = if state.is_empty() {
            None
        } else {
            Some(self.selected)
        };
        f.render_stateful_widget(
            entries_list,
            chunks[0],
            &mut ListState::default().with_selected(selected),
        );

        match self.selected_entry(state) {
            Some(entry) => self.render_item(f, chunks[1], entry),
            None => {
                let empty = Paragraph::new("No entries yet. Press n to write one.")
                    .block(Block::default().borders(Borders::ALL).title("Entry"));
                f.render_widget(empty, chunks[1]);
            }
        }
    }

    fn render_item(&self, f: &mut Frame, area: Rect, entry: &DiaryEntry) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let info = Paragraph::new(vec![
            Line::from(format!("Author: {} | Mood: {}", entry.author, entry.emotion)),
            Line::from(Span::styled(
                entry.local_timestamp(),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::TOP | Borders::LEFT | Borders::RIGHT)
                .title(format!("Entry #{}", entry.id)),
        );
        f.render_widget(info, chunks[0]);

        let editing = self.editing.as_ref().filter(|edit| edit.id == entry.id);
        match editing {
            Some(edit) => {
                let body = Paragraph::new(edit.input.value()).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Editing")
                        .border_style(Style::default().fg(Color::Cyan)),
                );
                f.render_widget(body, chunks[1]);
                let (row, col) = edit.input.cursor_offset();
                f.set_cursor_position((chunks[1].x + 1 + col, chunks[1].y + 1 + row));

                let hint = match &edit.error {
                    Some(e) => Paragraph::new(e.to_string()).style(Style::default().fg(Color::Red)),
                    None => Paragraph::new("Ctrl-S: Save, Esc: Quit editing")
                        .style(Style::default().fg(Color::Yellow)),
                };
                f.render_widget(hint, chunks[2]);
            }
            None => {
                let body = Paragraph::new(entry.content.clone())
                    .wrap(Wrap { trim: false })
                    .block(Block::default().borders(Borders::ALL));
                f.render_widget(body, chunks[1]);
                let hint = Paragraph::new("e: Edit, d: Delete")
                    .style(Style::default().fg(Color::Yellow));
                f.render_widget(hint, chunks[2]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diary_entry::Emotion;
    use chrono::Utc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn save() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    fn state() -> DiaryState {
        DiaryState::from(
            (0..3)
                .rev()
                .map(|id| {
                    DiaryEntry::new(
                        id,
                        format!("author{id}"),
                        format!("content of entry {id}"),
                        Emotion::MAX,
                        Utc::now(),
                    )
                })
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn test_navigation_is_clamped() {
        let state = state();
        let mut list = EntryList::new();
        list.handle_key(key(KeyCode::Up), &state);
        assert_eq!(list.selected_entry(&state).map(|e| e.id), Some(2));
        for _ in 0..5 {
            list.handle_key(key(KeyCode::Down), &state);
        }
        assert_eq!(list.selected_entry(&state).map(|e| e.id), Some(0));
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let state = state();
        let mut list = EntryList::new();
        list.handle_key(key(KeyCode::Down), &state);
        assert_eq!(
            list.handle_key(key(KeyCode::Char('d')), &state),
            ListOutcome::Confirm(Confirm::Remove { id: 1 })
        );
        assert_eq!(
            EntryList::new().handle_key(key(KeyCode::Char('d')), &DiaryState::new()),
            ListOutcome::Ignored
        );
    }

    #[test]
    fn test_edit_requires_valid_content() {
        let state = state();
        let mut list = EntryList::new();
        list.handle_key(key(KeyCode::Char('e')), &state);
        assert!(list.is_editing());

        for _ in 0.."content of entry 2".len() {
            list.handle_key(key(KeyCode::Backspace), &state);
        }
        for c in "new".chars() {
            list.handle_key(key(KeyCode::Char(c)), &state);
        }
        assert_eq!(list.handle_key(save(), &state), ListOutcome::Handled);
        assert!(list.is_editing());

        for c in " text".chars() {
            list.handle_key(key(KeyCode::Char(c)), &state);
        }
        assert_eq!(
            list.handle_key(save(), &state),
            ListOutcome::Confirm(Confirm::Edit {
                id: 2,
                content: "new text".into()
            })
        );
    }

    #[test]
    fn test_escape_abandons_edit() {
        let state = state();
        let mut list = EntryList::new();
        list.handle_key(key(KeyCode::Char('e')), &state);
        list.handle_key(key(KeyCode::Char('!')), &state);
        list.handle_key(key(KeyCode::Esc), &state);
        assert!(!list.is_editing());
        // keys go back to navigation
        assert_eq!(
            list.handle_key(key(KeyCode::Char('d')), &state),
            ListOutcome::Confirm(Confirm::Remove { id: 2 })
        );
    }

    #[test]
    fn test_sync_drops_edit_of_removed_entry() {
        let state = state();
        let mut list = EntryList::new();
        list.handle_key(key(KeyCode::Char('e')), &state);
        list.sync(&DiaryState::new());
        assert!(!list.is_editing());
    }
}
