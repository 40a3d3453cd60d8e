mod confirm;
mod editor;
mod input;
mod list;

use crate::diary_state::DiaryState;
use crate::dispatch::Dispatcher;
use crate::seed::{SeedError, SeedRecord};
use crate::store::Store;
use color_eyre::Result;
use confirm::Confirm;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use editor::{Editor, EditorOutcome};
use list::{EntryList, ListOutcome};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{stdout, Stdout},
    time::Duration,
};
use tokio::sync::oneshot::{self, error::TryRecvError};

pub type SeedReceiver = oneshot::Receiver<Result<Vec<SeedRecord>, SeedError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    List,
    Editor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Info(String),
    Error(String),
}

/// Root of the view tree. Owns the store and the dispatcher and hands them
/// to the editor and the list.
pub struct App {
    store: Store,
    dispatcher: Dispatcher,
    editor: Editor,
    list: EntryList,
    focus: Focus,
    confirm: Option<Confirm>,
    status: Option<Status>,
    seed: Option<SeedReceiver>,
    should_quit: bool,
}

impl App {
    pub fn new(seed: Option<SeedReceiver>) -> Self {
        let (store, dispatcher) = Store::new();
        let status = seed
            .as_ref()
            .map(|_| Status::Info("Loading sample entries...".to_string()));
        App {
            store,
            dispatcher,
            editor: Editor::new(),
            list: EntryList::new(),
            focus: Focus::List,
            confirm: None,
            status,
            seed,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &DiaryState {
        self.store.state()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Brings the store up to date: takes the seed result if it has arrived
    /// and applies everything the views dispatched since the last tick.
    pub fn tick(&mut self) {
        self.poll_seed();
        self.store.drain();
        self.list.sync(self.store.state());
    }

    fn poll_seed(&mut self) {
        let Some(rx) = self.seed.as_mut() else {
            return;
        };
        let result = match rx.try_recv() {
            Err(TryRecvError::Empty) => return,
            Ok(result) => result,
            Err(TryRecvError::Closed) => Err(SeedError::Abandoned),
        };
        self.seed = None;

        match result {
            Ok(records) => {
                let count = self.store.load_seed(records);
                self.status = Some(Status::Info(format!("Loaded {count} sample entries")));
            }
            Err(e) => {
                tracing::error!("seeding failed, starting empty: {e}");
                self.status = Some(Status::Error(format!("Could not load sample entries: {e}")));
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.confirm.is_some() {
            if let Some(accepted) = Confirm::answer(&key) {
                if let Some(pending) = self.confirm.take().filter(|_| accepted) {
                    self.run_confirmed(pending);
                }
            }
            return;
        }

        match self.focus {
            Focus::Editor => match self.editor.handle_key(key, &self.dispatcher) {
                EditorOutcome::Saved => {
                    self.status = Some(Status::Info("Entry saved".to_string()));
                    self.focus = Focus::List;
                }
                EditorOutcome::Cancelled => self.focus = Focus::List,
                EditorOutcome::Continue => {}
            },
            Focus::List => match self.list.handle_key(key, self.store.state()) {
                ListOutcome::Confirm(confirm) => self.confirm = Some(confirm),
                ListOutcome::Handled => {}
                ListOutcome::Ignored => match key.code {
                    KeyCode::Char('q') => self.should_quit = true,
                    KeyCode::Char('n') => {
                        self.focus = Focus::Editor;
                        self.status = None;
                    }
                    _ => {}
                },
            },
        }
    }

    fn run_confirmed(&mut self, confirm: Confirm) {
        match confirm {
            Confirm::Remove { id } => {
                self.dispatcher.remove(id);
                self.status = Some(Status::Info(format!("Deleted entry #{id}")));
            }
            Confirm::Edit { id, content } => {
                self.dispatcher.edit(id, content);
                self.list.finish_edit();
                self.status = Some(Status::Info(format!("Updated entry #{id}")));
            }
        }
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(f.area());

        let title = Paragraph::new("Mood Journal")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(title, chunks[0]);

        let stats = self.store.stats();
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let stats_line = Line::from(vec![
            Span::raw("Total: "),
            Span::styled(stats.total.to_string(), bold),
            Span::raw("   Good: "),
            Span::styled(stats.good_count.to_string(), bold.fg(Color::Green)),
            Span::raw("   Bad: "),
            Span::styled(stats.bad_count.to_string(), bold.fg(Color::Red)),
            Span::raw("   Good ratio: "),
            Span::styled(stats.ratio_display().to_string(), bold),
        ]);
        let stats_bar = Paragraph::new(stats_line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Mood"));
        f.render_widget(stats_bar, chunks[1]);

        match self.focus {
            Focus::Editor => self.editor.render(f, chunks[2]),
            Focus::List => self.list.render(f, chunks[2], self.store.state()),
        }

        let status = match &self.status {
            Some(Status::Info(msg)) => Paragraph::new(msg.as_str()).style(Style::default().fg(Color::Green)),
            Some(Status::Error(msg)) => Paragraph::new(msg.as_str()).style(Style::default().fg(Color::Red)),
            None => Paragraph::new(""),
        };
        f.render_widget(status, chunks[3]);

        let controls = match self.focus {
            Focus::Editor => Line::from("Writing a new entry"),
            Focus::List if self.list.is_editing() => Line::from("Editing entry"),
            Focus::List => Line::from(vec![
                Span::raw("Press "),
                Span::styled("n", bold),
                Span::raw(" to write, "),
                Span::styled("↑/↓", bold),
                Span::raw(" to browse, "),
                Span::styled("q", bold),
                Span::raw(" to quit"),
            ]),
        };
        let controls_paragraph = Paragraph::new(controls)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        f.render_widget(controls_paragraph, chunks[4]);

        if let Some(confirm) = &self.confirm {
            let area = f.area();
            confirm.render(f, area);
        }
    }
}

/// Raw-mode alternate-screen terminal, restored on drop.
pub struct UI {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl UI {
    pub fn new() -> Result<Self> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        Ok(UI { terminal })
    }

    pub fn run(&mut self, app: &mut App) -> Result<()> {
        while !app.should_quit() {
            app.tick();
            self.terminal.draw(|f| app.draw(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }
}

impl Drop for UI {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
