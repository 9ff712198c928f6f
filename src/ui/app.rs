use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::catalog::{Catalog, CatalogError};

use super::forms::{BookField, BookForm, ConfirmRemove};
use super::helpers::{book_card_lines, centered_rect, surface_error};
use super::screens::{SearchScreen, StatsScreen};

/// Footer space reserved for status messages and key hints.
const FOOTER_HEIGHT: u16 = 3;
/// Header space for the application banner.
const HEADER_HEIGHT: u16 = 3;
/// Jump size for PageUp/PageDown in list views.
const PAGE_JUMP: isize = 5;

/// High-level navigation states. Keeping this explicit makes it easy to reason
/// about which rendering path runs and what keyboard shortcuts should do.
enum Screen {
    Library,
    Search(SearchScreen),
    Stats(StatsScreen),
}

/// Fine-grained modes scoped to the current screen.
enum Mode {
    Normal,
    AddingBook(BookForm),
    ConfirmRemove(ConfirmRemove),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. The catalog engine is
/// owned here and every mutation funnels through it, so the UI never holds a
/// second copy of the live book sequence.
pub struct App {
    catalog: Catalog,
    selected: usize,
    screen: Screen,
    mode: Mode,
    status: Option<StatusMessage>,
}

impl App {
    /// Wrap a hydrated (or deliberately empty) catalog. `startup_warning`
    /// carries a load failure from `main` so the user sees it in the footer on
    /// the first frame instead of the app crashing or staying silent.
    pub fn new(catalog: Catalog, startup_warning: Option<String>) -> Self {
        let status = startup_warning.map(|text| StatusMessage {
            text,
            kind: StatusKind::Error,
        });
        Self {
            catalog,
            selected: 0,
            screen: Screen::Library,
            mode: Mode::Normal,
            status,
        }
    }

    /// Route one key press. Returns `true` when the app should exit.
    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mode = mem::replace(&mut self.mode, Mode::Normal);

        self.mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::AddingBook(form) => self.handle_add_book(code, form),
            Mode::ConfirmRemove(confirm) => self.handle_confirm_remove(code, confirm),
        };

        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        match self.screen {
            Screen::Library => Ok(self.handle_library_key(code, exit)),
            Screen::Search(_) => Ok(self.handle_search_key(code)),
            Screen::Stats(_) => {
                match code {
                    KeyCode::Char('q') => *exit = true,
                    KeyCode::Esc | KeyCode::Char('g') | KeyCode::Char('G') => {
                        self.screen = Screen::Library;
                    }
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_library_key(&mut self, code: KeyCode, exit: &mut bool) -> Mode {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-PAGE_JUMP),
            KeyCode::PageDown => self.move_selection(PAGE_JUMP),
            KeyCode::Char('+') | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.clear_status();
                return Mode::AddingBook(BookForm::default());
            }
            KeyCode::Char('-') | KeyCode::Delete => {
                let confirm = self
                    .catalog
                    .books()
                    .get(self.selected)
                    .map(|book| ConfirmRemove::from(self.selected, book));
                if let Some(confirm) = confirm {
                    self.clear_status();
                    return Mode::ConfirmRemove(confirm);
                }
                self.set_status("No book selected to remove.", StatusKind::Error);
            }
            KeyCode::Char('t') | KeyCode::Char('T') | KeyCode::Enter => {
                self.toggle_selected();
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('/') => {
                self.clear_status();
                self.screen = Screen::Search(SearchScreen::new());
            }
            KeyCode::Char('g') | KeyCode::Char('G') => {
                self.clear_status();
                self.screen = Screen::Stats(StatsScreen::new(&self.catalog));
            }
            _ => {}
        }
        Mode::Normal
    }

    /// Search is a full screen rather than an overlay: the query, the field
    /// selector, and the result list all need room at once.
    fn handle_search_key(&mut self, code: KeyCode) -> Mode {
        let Screen::Search(ref mut search) = self.screen else {
            return Mode::Normal;
        };

        match code {
            KeyCode::Esc => {
                self.clear_status();
                self.screen = Screen::Library;
            }
            KeyCode::Tab => search.cycle_field(),
            KeyCode::Enter => {
                search.execute(&self.catalog);
                let found = search.hits.len();
                if search.query.trim().is_empty() {
                    self.set_status("Enter a search term first.", StatusKind::Error);
                } else if found == 0 {
                    self.set_status("No results found.", StatusKind::Info);
                } else {
                    let plural = if found == 1 { "result" } else { "results" };
                    self.set_status(format!("Found {found} {plural}."), StatusKind::Info);
                }
            }
            KeyCode::Up => search.move_selection(-1),
            KeyCode::Down => search.move_selection(1),
            KeyCode::Backspace => {
                search.query.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                search.query.push(ch);
            }
            _ => {}
        }
        Mode::Normal
    }

    fn handle_add_book(&mut self, code: KeyCode, mut form: BookForm) -> Mode {
        match code {
            KeyCode::Esc => {
                self.set_status("Add cancelled.", StatusKind::Info);
                Mode::Normal
            }
            KeyCode::Tab | KeyCode::Down => {
                form.next_field();
                Mode::AddingBook(form)
            }
            KeyCode::BackTab | KeyCode::Up => {
                form.previous_field();
                Mode::AddingBook(form)
            }
            KeyCode::Left => {
                form.cycle_choice(-1);
                Mode::AddingBook(form)
            }
            KeyCode::Right => {
                form.cycle_choice(1);
                Mode::AddingBook(form)
            }
            KeyCode::Backspace => {
                form.backspace();
                Mode::AddingBook(form)
            }
            KeyCode::Enter => self.submit_book_form(form),
            KeyCode::Char(ch) => {
                form.push_char(ch);
                Mode::AddingBook(form)
            }
            _ => Mode::AddingBook(form),
        }
    }

    /// Run the form through the catalog. Validation problems keep the modal
    /// open with an inline message; a persistence failure closes it, because
    /// the book is already in memory and retyping it would not help.
    fn submit_book_form(&mut self, mut form: BookForm) -> Mode {
        let (title, author, year, genre, read) = match form.parse_inputs() {
            Ok(values) => values,
            Err(err) => {
                form.error = Some(surface_error(&err));
                return Mode::AddingBook(form);
            }
        };

        match self.catalog.add(&title, &author, year, genre, read) {
            Ok(()) => {
                self.selected = self.catalog.len().saturating_sub(1);
                self.set_status(format!("Added '{title}'."), StatusKind::Info);
                Mode::Normal
            }
            Err(CatalogError::Validation(err)) => {
                form.error = Some(err.to_string());
                Mode::AddingBook(form)
            }
            Err(err) => {
                self.report_save_failure(format!("'{title}' was added"), &err);
                self.selected = self.catalog.len().saturating_sub(1);
                Mode::Normal
            }
        }
    }

    fn handle_confirm_remove(&mut self, code: KeyCode, confirm: ConfirmRemove) -> Mode {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                match self.catalog.remove(confirm.index) {
                    Ok(book) => {
                        self.set_status(format!("Removed '{}'.", book.title), StatusKind::Info);
                    }
                    Err(err @ CatalogError::OutOfRange { .. }) => {
                        self.set_status(err.to_string(), StatusKind::Error);
                    }
                    Err(err) => {
                        self.report_save_failure(
                            format!("'{}' was removed", confirm.title),
                            &err,
                        );
                    }
                }
                self.clamp_selection();
                Mode::Normal
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.set_status("Removal cancelled.", StatusKind::Info);
                Mode::Normal
            }
            _ => Mode::ConfirmRemove(confirm),
        }
    }

    fn toggle_selected(&mut self) {
        if self.catalog.is_empty() {
            self.set_status("No book selected.", StatusKind::Error);
            return;
        }
        let title = self.catalog.books()[self.selected].title.clone();
        match self.catalog.toggle_read_status(self.selected) {
            Ok(read) => {
                let label = if read { "Read" } else { "Unread" };
                self.set_status(format!("Marked '{title}' as {label}."), StatusKind::Info);
            }
            Err(err) => {
                self.report_save_failure(format!("'{title}' was toggled"), &err);
            }
        }
    }

    /// Persistence failures are reported without rolling back the in-memory
    /// change; the next successful save reconciles the file.
    fn report_save_failure(&mut self, applied: String, err: &CatalogError) {
        self.set_status(
            format!("{applied}, but saving failed: {err}"),
            StatusKind::Error,
        );
    }

    fn move_selection(&mut self, delta: isize) {
        if self.catalog.is_empty() {
            self.selected = 0;
            return;
        }
        let last = (self.catalog.len() - 1) as isize;
        self.selected = (self.selected as isize + delta).clamp(0, last) as usize;
    }

    fn clamp_selection(&mut self) {
        if self.catalog.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.catalog.len() {
            self.selected = self.catalog.len() - 1;
        }
    }

    fn set_status(&mut self, text: impl Into<String>, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    /// Render the whole frame: banner, active screen, footer, then any modal
    /// on top.
    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        let banner = Paragraph::new("Library Manager")
            .style(Style::default().add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(banner, chunks[0]);

        match self.screen {
            Screen::Library => self.draw_library(frame, chunks[1]),
            Screen::Search(ref search) => Self::draw_search(frame, chunks[1], search),
            Screen::Stats(ref stats) => Self::draw_stats(frame, chunks[1], stats),
        }

        self.draw_footer(frame, chunks[2]);

        match self.mode {
            Mode::Normal => {}
            Mode::AddingBook(ref form) => Self::draw_add_modal(frame, form),
            Mode::ConfirmRemove(ref confirm) => Self::draw_confirm_modal(frame, confirm),
        }
    }

    fn draw_library(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Your Library ({} books) ", self.catalog.len()));

        if self.catalog.is_empty() {
            let empty = Paragraph::new("Your library is empty. Press + to add your first book.")
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let items: Vec<ListItem> = self
            .catalog
            .books()
            .iter()
            .enumerate()
            .map(|(idx, book)| ListItem::new(book_card_lines(book, idx == self.selected)))
            .collect();

        let mut state = ListState::default();
        state.select(Some(self.selected));
        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_search(frame: &mut Frame, area: ratatui::layout::Rect, search: &SearchScreen) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let query_line = Line::from(vec![
            Span::styled(
                format!("[{}] ", search.field),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(search.query.clone()),
        ]);
        let query_box = Paragraph::new(query_line).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search (Tab switches field, Enter searches) "),
        );
        frame.render_widget(query_box, chunks[0]);

        let results_block = Block::default().borders(Borders::ALL).title(" Results ");
        if search.hits.is_empty() {
            let message = if search.executed {
                "No results found."
            } else {
                "Type a term and press Enter to search."
            };
            let placeholder = Paragraph::new(message)
                .alignment(Alignment::Center)
                .block(results_block);
            frame.render_widget(placeholder, chunks[1]);
            return;
        }

        let items: Vec<ListItem> = search
            .hits
            .iter()
            .enumerate()
            .map(|(idx, hit)| ListItem::new(book_card_lines(&hit.book, idx == search.selected)))
            .collect();

        let mut state = ListState::default();
        state.select(Some(search.selected));
        frame.render_stateful_widget(List::new(items).block(results_block), chunks[1], &mut state);
    }

    fn draw_stats(frame: &mut Frame, area: ratatui::layout::Rect, screen: &StatsScreen) {
        let stats = &screen.stats;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let metrics = Line::from(vec![
            Span::raw(format!("Total: {}   ", stats.total_count)),
            Span::raw(format!("Read: {}   ", stats.read_count)),
            Span::raw(format!("Percent read: {:.1}%", stats.read_fraction() * 100.0)),
        ]);
        let metrics_box = Paragraph::new(metrics)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Library Statistics "));
        frame.render_widget(metrics_box, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(34),
                Constraint::Percentage(33),
                Constraint::Percentage(33),
            ])
            .split(chunks[1]);

        let genre_lines: Vec<Line> = stats
            .by_genre
            .iter()
            .map(|(genre, count)| Line::from(format!("{genre}: {count}")))
            .collect();
        frame.render_widget(
            Paragraph::new(genre_lines)
                .block(Block::default().borders(Borders::ALL).title(" Genres ")),
            columns[0],
        );

        let author_lines: Vec<Line> = stats
            .by_author
            .iter()
            .map(|(author, count)| Line::from(format!("{author}: {count}")))
            .collect();
        frame.render_widget(
            Paragraph::new(author_lines)
                .block(Block::default().borders(Borders::ALL).title(" Top Authors ")),
            columns[1],
        );

        let decade_lines: Vec<Line> = stats
            .by_decade
            .iter()
            .map(|(decade, count)| Line::from(format!("{decade}s: {count}")))
            .collect();
        frame.render_widget(
            Paragraph::new(decade_lines)
                .block(Block::default().borders(Borders::ALL).title(" By Decade ")),
            columns[2],
        );
    }

    fn draw_footer(&self, frame: &mut Frame, area: ratatui::layout::Rect) {
        let hints = match (&self.mode, &self.screen) {
            (Mode::AddingBook(_), _) => {
                "Tab/Shift-Tab move | Left/Right cycle choices | Enter save | Esc cancel"
            }
            (Mode::ConfirmRemove(_), _) => "y confirm | n cancel",
            (Mode::Normal, Screen::Library) => {
                "Up/Down select | + add | - remove | t toggle read | s search | g stats | q quit"
            }
            (Mode::Normal, Screen::Search(_)) => {
                "Type to edit | Tab field | Enter search | Up/Down select | Esc back"
            }
            (Mode::Normal, Screen::Stats(_)) => "Esc back | q quit",
        };

        let mut lines = vec![Line::from(Span::styled(
            hints,
            Style::default().fg(Color::DarkGray),
        ))];
        if let Some(status) = &self.status {
            lines.push(Line::from(Span::styled(
                status.text.clone(),
                status.kind.style(),
            )));
        }

        let footer = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }

    fn draw_add_modal(frame: &mut Frame, form: &BookForm) {
        let area = centered_rect(60, 50, frame.area());
        frame.render_widget(Clear, area);

        let mut lines = vec![
            form.build_line("Title", BookField::Title),
            form.build_line("Author", BookField::Author),
            form.build_line("Publication Year", BookField::Year),
            form.build_line("Genre", BookField::Genre),
            form.build_line("Read Status", BookField::Status),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let modal = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title(" Add Book "));
        frame.render_widget(modal, area);

        // Place the terminal cursor at the end of the active text field.
        let (row, label) = match form.active {
            BookField::Title => (0, "Title"),
            BookField::Author => (1, "Author"),
            BookField::Year => (2, "Publication Year"),
            BookField::Genre | BookField::Status => return,
        };
        let x = area.x + 1 + (label.len() + 2 + form.value_len(form.active)) as u16;
        let y = area.y + 1 + row;
        if x < area.right() && y < area.bottom() {
            frame.set_cursor_position((x, y));
        }
    }

    fn draw_confirm_modal(frame: &mut Frame, confirm: &ConfirmRemove) {
        let area = centered_rect(50, 25, frame.area());
        frame.render_widget(Clear, area);

        let lines = vec![
            Line::from(format!(
                "Remove '{}' by {}?",
                confirm.title, confirm.author
            )),
            Line::from(""),
            Line::from(Span::styled(
                "y: remove    n: keep",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let modal = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Confirm Removal "));
        frame.render_widget(modal, area);
    }
}
