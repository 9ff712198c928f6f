use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Book, Genre, MAX_TEXT_LEN};

/// Form state for adding a new book. Text fields hold raw keystrokes; genre
/// and read status are picked from fixed sets with left/right cycling, so the
/// user can never type an unrepresentable value into them.
#[derive(Clone)]
pub(crate) struct BookForm {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) year: String,
    pub(crate) genre_index: usize,
    pub(crate) read: bool,
    pub(crate) active: BookField,
    pub(crate) error: Option<String>,
}

/// Enumerates the fields within the add-book form to drive focus management.
#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum BookField {
    Title,
    Author,
    Year,
    Genre,
    Status,
}

impl Default for BookForm {
    /// Fresh form seeded with the current year, which is the most common
    /// value when logging a new purchase.
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            year: Local::now().year().to_string(),
            genre_index: 0,
            read: false,
            active: BookField::Title,
            error: None,
        }
    }
}

impl BookForm {
    /// Cycle focus forward across the five fields.
    pub(crate) fn next_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Author,
            BookField::Author => BookField::Year,
            BookField::Year => BookField::Genre,
            BookField::Genre => BookField::Status,
            BookField::Status => BookField::Title,
        };
    }

    /// Cycle focus backward, mirroring `next_field`.
    pub(crate) fn previous_field(&mut self) {
        self.active = match self.active {
            BookField::Title => BookField::Status,
            BookField::Author => BookField::Title,
            BookField::Year => BookField::Author,
            BookField::Genre => BookField::Year,
            BookField::Status => BookField::Genre,
        };
    }

    /// Append a character to the active field, filtering obviously invalid
    /// input for usability. The catalog's record model remains the
    /// authoritative validator on submit.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        match self.active {
            BookField::Title => {
                if !ch.is_control() && self.title.chars().count() < MAX_TEXT_LEN {
                    self.title.push(ch);
                    true
                } else {
                    false
                }
            }
            BookField::Author => {
                if !ch.is_control() && self.author.chars().count() < MAX_TEXT_LEN {
                    self.author.push(ch);
                    true
                } else {
                    false
                }
            }
            BookField::Year => {
                if ch.is_ascii_digit() && self.year.chars().count() < 4 {
                    self.year.push(ch);
                    true
                } else {
                    false
                }
            }
            // Choice fields cycle instead of accepting text.
            BookField::Genre | BookField::Status => false,
        }
    }

    /// Remove the last character from the active text field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            BookField::Title => {
                self.title.pop();
            }
            BookField::Author => {
                self.author.pop();
            }
            BookField::Year => {
                self.year.pop();
            }
            BookField::Genre | BookField::Status => {}
        }
    }

    /// Step the active choice field. `delta` is -1 for Left and 1 for Right;
    /// text fields ignore the keys.
    pub(crate) fn cycle_choice(&mut self, delta: isize) {
        match self.active {
            BookField::Genre => {
                let len = Genre::ALL.len() as isize;
                let next = (self.genre_index as isize + delta).rem_euclid(len);
                self.genre_index = next as usize;
            }
            BookField::Status => self.read = !self.read,
            _ => {}
        }
    }

    /// Currently selected genre.
    pub(crate) fn genre(&self) -> Genre {
        Genre::ALL[self.genre_index % Genre::ALL.len()]
    }

    /// Validate the typed year and return everything the catalog needs to
    /// build the record. Field-level constraints (emptiness, length, year
    /// range, genre set) are re-checked by [`Book::validate`] downstream.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, i32, Genre, bool)> {
        let year_raw = self.year.trim();
        if year_raw.is_empty() {
            return Err(anyhow!("Publication year is required."));
        }
        let year = year_raw
            .parse::<i32>()
            .context("Publication year must be a number.")?;
        Ok((
            self.title.trim().to_string(),
            self.author.trim().to_string(),
            year,
            self.genre(),
            self.read,
        ))
    }

    /// Render one styled line of the modal form.
    pub(crate) fn build_line(&self, field_name: &str, field: BookField) -> Line<'static> {
        let is_active = self.active == field;
        let display = match field {
            BookField::Title => self.value_or_placeholder(&self.title),
            BookField::Author => self.value_or_placeholder(&self.author),
            BookField::Year => self.value_or_placeholder(&self.year),
            BookField::Genre => format!("< {} >", self.genre().label()),
            BookField::Status => {
                let label = if self.read { "Read" } else { "Unread" };
                format!("< {label} >")
            }
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if display == "<required>" {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    fn value_or_placeholder(&self, value: &str) -> String {
        if value.is_empty() {
            "<required>".to_string()
        } else {
            value.to_string()
        }
    }

    /// Cursor offset into the active field, used to position the terminal
    /// cursor while typing.
    pub(crate) fn value_len(&self, field: BookField) -> usize {
        match field {
            BookField::Title => self.title.chars().count(),
            BookField::Author => self.author.chars().count(),
            BookField::Year => self.year.chars().count(),
            BookField::Genre | BookField::Status => 0,
        }
    }
}

/// Confirmation state shown before a book leaves the catalog for good.
#[derive(Clone)]
pub(crate) struct ConfirmRemove {
    pub(crate) index: usize,
    pub(crate) title: String,
    pub(crate) author: String,
}

impl ConfirmRemove {
    /// Build the confirmation state from the book being considered.
    pub(crate) fn from(index: usize, book: &Book) -> Self {
        Self {
            index,
            title: book.title.clone(),
            author: book.author.clone(),
        }
    }
}
