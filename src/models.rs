//! Domain model for a single library record plus its validation rules. The
//! intent is that `Book` stays a light-weight data holder so other layers can
//! focus on presentation and persistence logic, while every constructor path
//! funnels through [`Book::validate`] so no malformed record can enter the
//! catalog in the first place.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for the title and author text fields, in characters.
pub const MAX_TEXT_LEN: usize = 100;
/// Earliest accepted publication year. The upper bound is the current year,
/// resolved at validation time so the rule stays correct across new years.
pub const MIN_YEAR: i32 = 1900;

/// Errors raised when a candidate book fails validation. Each variant carries
/// a user-facing message because the UI surfaces these verbatim in its footer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Title is required.")]
    EmptyTitle,
    #[error("Author is required.")]
    EmptyAuthor,
    #[error("Title must be 100 characters or fewer.")]
    TitleTooLong,
    #[error("Author must be 100 characters or fewer.")]
    AuthorTooLong,
    #[error("Publication year {year} must be between 1900 and {max}.")]
    YearOutOfRange { year: i32, max: i32 },
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),
}

/// The fixed set of genres a book may belong to. Serde renames keep the
/// persisted JSON using the human-readable labels, so files written by earlier
/// versions of the app (which stored plain strings) load unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
    #[serde(rename = "Science Fiction")]
    ScienceFiction,
    Fantasy,
    Mystery,
    Biography,
    History,
    Romance,
}

impl Genre {
    /// Every genre in the order the add form cycles through them.
    pub const ALL: [Genre; 8] = [
        Genre::Fiction,
        Genre::NonFiction,
        Genre::ScienceFiction,
        Genre::Fantasy,
        Genre::Mystery,
        Genre::Biography,
        Genre::History,
        Genre::Romance,
    ];

    /// Human-readable label, also the persisted spelling.
    pub fn label(&self) -> &'static str {
        match self {
            Genre::Fiction => "Fiction",
            Genre::NonFiction => "Non-Fiction",
            Genre::ScienceFiction => "Science Fiction",
            Genre::Fantasy => "Fantasy",
            Genre::Mystery => "Mystery",
            Genre::Biography => "Biography",
            Genre::History => "History",
            Genre::Romance => "Romance",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Genre {
    type Err = ValidationError;

    /// Parse a label back into its variant. Anything outside the fixed set is
    /// rejected so loosely-typed input cannot smuggle new genres into the
    /// catalog.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.label().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ValidationError::UnknownGenre(value.trim().to_string()))
    }
}

/// Which field a catalog search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Genre,
}

impl SearchField {
    /// Every searchable field in the order the search screen cycles through.
    pub const ALL: [SearchField; 3] = [SearchField::Title, SearchField::Author, SearchField::Genre];

    pub fn label(&self) -> &'static str {
        match self {
            SearchField::Title => "Title",
            SearchField::Author => "Author",
            SearchField::Genre => "Genre",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Serde helper keeping `date_added` in the `YYYY-MM-DD HH:MM:SS` shape the
/// library file has always used. A dedicated module (instead of a chrono
/// default) pins the format so load and save can never drift apart.
pub(crate) mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub(crate) fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// In-memory representation of one library record. The struct mirrors the
/// objects stored in the catalog file field-for-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Title displayed on cards and matched by title searches.
    pub title: String,
    /// Author field used both for display and for the author aggregation.
    pub author: String,
    /// Year of publication, bounded to `[1900, current year]`.
    pub publication_year: i32,
    /// One of the fixed genre set.
    pub genre: Genre,
    /// `true` means the book has been read. Kept as a real boolean so no
    /// truthy-string coercion can creep in at the persistence boundary.
    pub read_status: bool,
    /// Stamped once at creation and never modified afterwards. The catalog
    /// only hands out shared references, so nothing outside this module can
    /// rewrite it.
    #[serde(with = "timestamp")]
    pub date_added: NaiveDateTime,
}

impl Book {
    /// Validate raw field values and assemble a record. This is the only way a
    /// `Book` comes into existence; the UI may pre-check inputs for usability
    /// but the checks here are authoritative. On success `date_added` is
    /// stamped with the current local time, truncated to whole seconds so the
    /// value survives a save/load round trip unchanged.
    pub fn validate(
        title: &str,
        author: &str,
        publication_year: i32,
        genre: Genre,
        read_status: bool,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if title.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::TitleTooLong);
        }

        let author = author.trim();
        if author.is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        if author.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::AuthorTooLong);
        }

        let max = Local::now().year();
        if publication_year < MIN_YEAR || publication_year > max {
            return Err(ValidationError::YearOutOfRange {
                year: publication_year,
                max,
            });
        }

        let now = Local::now().naive_local();
        let date_added = now.with_nanosecond(0).unwrap_or(now);

        Ok(Self {
            title: title.to_string(),
            author: author.to_string(),
            publication_year,
            genre,
            read_status,
            date_added,
        })
    }

    /// Decade bucket for the chronological aggregation, e.g. 1965 -> 1960.
    pub fn decade(&self) -> i32 {
        (self.publication_year / 10) * 10
    }

    /// Status text shown on badges and cards.
    pub fn status_label(&self) -> &'static str {
        if self.read_status {
            "Read"
        } else {
            "Unread"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_well_formed_input() {
        let book = Book::validate("Dune", "Frank Herbert", 1965, Genre::ScienceFiction, false)
            .expect("valid book");
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.decade(), 1960);
        assert!(!book.read_status);
    }

    #[test]
    fn validate_trims_whitespace() {
        let book =
            Book::validate("  1984  ", " George Orwell ", 1949, Genre::Fiction, true).unwrap();
        assert_eq!(book.title, "1984");
        assert_eq!(book.author, "George Orwell");
    }

    #[test]
    fn validate_rejects_blank_text_fields() {
        assert_eq!(
            Book::validate("   ", "Someone", 2000, Genre::Fiction, false),
            Err(ValidationError::EmptyTitle)
        );
        assert_eq!(
            Book::validate("Title", "", 2000, Genre::Fiction, false),
            Err(ValidationError::EmptyAuthor)
        );
    }

    #[test]
    fn validate_rejects_overlong_text_fields() {
        let long = "x".repeat(MAX_TEXT_LEN + 1);
        assert_eq!(
            Book::validate(&long, "Someone", 2000, Genre::Fiction, false),
            Err(ValidationError::TitleTooLong)
        );
        assert_eq!(
            Book::validate("Title", &long, 2000, Genre::Fiction, false),
            Err(ValidationError::AuthorTooLong)
        );
    }

    #[test]
    fn validate_enforces_year_bounds() {
        let max = Local::now().year();
        assert!(Book::validate("T", "A", 1900, Genre::History, false).is_ok());
        assert!(Book::validate("T", "A", max, Genre::History, false).is_ok());
        assert_eq!(
            Book::validate("T", "A", 1899, Genre::History, false),
            Err(ValidationError::YearOutOfRange { year: 1899, max })
        );
        assert_eq!(
            Book::validate("T", "A", max + 1, Genre::History, false),
            Err(ValidationError::YearOutOfRange { year: max + 1, max })
        );
    }

    #[test]
    fn genre_labels_round_trip_through_from_str() {
        for genre in Genre::ALL {
            assert_eq!(genre.label().parse::<Genre>().unwrap(), genre);
        }
        assert_eq!("science fiction".parse::<Genre>().unwrap(), Genre::ScienceFiction);
        assert!(matches!(
            "Cookbook".parse::<Genre>(),
            Err(ValidationError::UnknownGenre(_))
        ));
    }

    #[test]
    fn date_added_serializes_in_catalog_format() {
        let book = Book::validate("Dune", "Frank Herbert", 1965, Genre::Fiction, false).unwrap();
        let json = serde_json::to_value(&book).unwrap();
        let raw = json["date_added"].as_str().unwrap();
        assert!(NaiveDateTime::parse_from_str(raw, timestamp::FORMAT).is_ok());

        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }
}
