use super::input::TextInput;
use crate::diary_entry::{validate_author, validate_content, Emotion, ValidationError};
use crate::dispatch::Dispatcher;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Author,
    Content,
    Emotion,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Author => Field::Content,
            Field::Content => Field::Emotion,
            Field::Emotion => Field::Author,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Author => Field::Emotion,
            Field::Content => Field::Author,
            Field::Emotion => Field::Content,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorOutcome {
    Continue,
    Saved,
    Cancelled,
}

/// Form for writing a new entry.
#[derive(Debug)]
pub struct Editor {
    author: TextInput,
    content: TextInput,
    emotion: Emotion,
    focus: Field,
    error: Option<ValidationError>,
}

impl Default for Editor {
    fn default() -> Self {
        Editor {
            author: TextInput::single_line(),
            content: TextInput::multiline(),
            emotion: Emotion::default(),
            focus: Field::Author,
            error: None,
        }
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent, dispatcher: &Dispatcher) -> EditorOutcome {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return self.submit(dispatcher);
        }

        match key.code {
            KeyCode::Esc => return EditorOutcome::Cancelled,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            _ => match self.focus {
                Field::Author => {
                    if key.code == KeyCode::Enter {
                        self.focus = Field::Content;
                    } else {
                        self.author.handle_key(&key);
                    }
                }
                Field::Content => {
                    self.content.handle_key(&key);
                }
                Field::Emotion => match key.code {
                    KeyCode::Left | KeyCode::Down => self.emotion = self.emotion.decrement(),
                    KeyCode::Right | KeyCode::Up => self.emotion = self.emotion.increment(),
                    KeyCode::Char(c) => {
                        if let Some(mood) = c
                            .to_digit(10)
                            .and_then(|d| Emotion::try_from(d as u8).ok())
                        {
                            self.emotion = mood;
                        }
                    }
                    KeyCode::Enter => return self.submit(dispatcher),
                    _ => {}
                },
            },
        }
        EditorOutcome::Continue
    }

    /// Validates the form and sends a create. On a validation failure nothing
    /// is sent and focus moves to the field at fault.
    fn submit(&mut self, dispatcher: &Dispatcher) -> EditorOutcome {
        if let Err(e) = validate_author(self.author.value()) {
            self.focus = Field::Author;
            self.error = Some(e);
            return EditorOutcome::Continue;
        }
        if let Err(e) = validate_content(self.content.value()) {
            self.focus = Field::Content;
            self.error = Some(e);
            return EditorOutcome::Continue;
        }

        dispatcher.create(self.author.value(), self.content.value(), self.emotion);
        *self = Editor::default();
        EditorOutcome::Saved
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let author = Paragraph::new(self.author.value())
            .block(field_block("Author", self.focus == Field::Author));
        f.render_widget(author, chunks[0]);

        let content = Paragraph::new(self.content.value())
            .block(field_block("Content (5+ characters)", self.focus == Field::Content));
        f.render_widget(content, chunks[1]);

        let moods: Vec<Span> = (1..=5u8)
            .map(|v| {
                let style = if v == self.emotion.value() {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Span::styled(format!(" {v} "), style)
            })
            .collect();
        let emotion = Paragraph::new(Line::from(moods))
            .block(field_block("Today's mood", self.focus == Field::Emotion));
        f.render_widget(emotion, chunks[2]);

        let hint = match &self.error {
            Some(e) => Paragraph::new(e.to_string()).style(Style::default().fg(Color::Red)),
            None => Paragraph::new("Tab: Next field, Ctrl-S: Save, Esc: Cancel")
                .style(Style::default().fg(Color::Yellow)),
        };
        f.render_widget(hint.alignment(Alignment::Center), chunks[3]);

        let (input, field_area) = match self.focus {
            Field::Author => (&self.author, chunks[0]),
            Field::Content => (&self.content, chunks[1]),
            Field::Emotion => return,
        };
        let (row, col) = input.cursor_offset();
        f.set_cursor_position((field_area.x + 1 + col, field_area.y + 1 + row));
    }
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(style)
}
