use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// A destructive or committing operation waiting for a yes/no answer.
/// While one is open it receives every key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
    Remove { id: usize },
    Edit { id: usize, content: String },
}

impl Confirm {
    pub fn message(&self) -> String {
        match self {
            Confirm::Remove { id } => format!("Delete entry #{id}?"),
            Confirm::Edit { id, .. } => format!("Save changes to entry #{id}?"),
        }
    }

    /// `Some(true)` to go ahead, `Some(false)` to back out, `None` to keep asking.
    pub fn answer(key: &KeyEvent) -> Option<bool> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(true),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(false),
            _ => None,
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let popup = centered(area, 44, 5);
        f.render_widget(Clear, popup);

        let text = vec![
            Line::from(Span::styled(
                self.message(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("y", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(": yes   "),
                Span::styled("n", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(": no"),
            ]),
        ];
        let dialog = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Confirm")
                    .border_style(Style::default().fg(Color::Red)),
            );
        f.render_widget(dialog, popup);
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_messages() {
        assert_eq!(Confirm::Remove { id: 4 }.message(), "Delete entry #4?");
        assert_eq!(
            Confirm::Edit {
                id: 2,
                content: "whatever".into()
            }
            .message(),
            "Save changes to entry #2?"
        );
    }

    #[test]
    fn test_answers() {
        assert_eq!(Confirm::answer(&key(KeyCode::Char('y'))), Some(true));
        assert_eq!(Confirm::answer(&key(KeyCode::Enter)), Some(true));
        assert_eq!(Confirm::answer(&key(KeyCode::Esc)), Some(false));
        assert_eq!(Confirm::answer(&key(KeyCode::Char('n'))), Some(false));
        assert_eq!(Confirm::answer(&key(KeyCode::Char('q'))), None);
    }
}
