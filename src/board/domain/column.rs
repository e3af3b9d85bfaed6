//! Kanban column enumeration and its locale-aware parsing.

use super::ParseColumnError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kanban column a task currently occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Column {
    /// Work that has not been planned yet.
    Backlog,
    /// Work that is ready to be picked up.
    Ready,
    /// Work that is being implemented.
    InProgress,
    /// Work awaiting peer review.
    Review,
    /// Finished work.
    Done,
}

impl Column {
    /// Every column in board order.
    pub const ALL: [Self; 5] = [
        Self::Backlog,
        Self::Ready,
        Self::InProgress,
        Self::Review,
        Self::Done,
    ];

    /// Returns the canonical internal key used by the client cache.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::Ready => "pronto",
            Self::InProgress => "em_progresso",
            Self::Review => "revisao",
            Self::Done => "concluido",
        }
    }

    /// Returns the display name the backend expects.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::Ready => "Pronto",
            Self::InProgress => "Em Progresso",
            Self::Review => "Revisão",
            Self::Done => "Concluído",
        }
    }

    /// Returns `true` for the column that marks work as finished.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Parses a column from any known spelling.
    ///
    /// Matching ignores case, surrounding whitespace, Portuguese accents and
    /// the separator used between words, so `"Concluído"`, `"concluido"`
    /// and `"DONE"` all resolve to [`Column::Done`]. Accent folding covers
    /// the precomposed Latin vowels with acute, grave, circumflex, tilde or
    /// diaeresis, plus `ç`. Other diacritics and decomposed (combining mark)
    /// input are compared as written.
    ///
    /// Returns `None` when the value names no known column.
    #[must_use]
    pub fn from_alias(value: &str) -> Option<Self> {
        let normalized = normalize(value);
        let column = match normalized.as_str() {
            "backlog" | "todo" | "to do" | "a fazer" => Self::Backlog,
            "pronto" | "ready" | "pronta" => Self::Ready,
            "em progresso" | "em andamento" | "in progress" | "inprogress" | "doing"
            | "fazendo" | "progresso" => Self::InProgress,
            "revisao" | "review" | "in review" | "em revisao" | "revisando" => Self::Review,
            "concluido" | "concluida" | "done" | "completed" | "complete" | "finalizado" => {
                Self::Done
            }
            _ => return None,
        };
        Some(column)
    }
}

/// Lowercases, strips accents and collapses separators to single spaces.
///
/// Only the accents used by the board's Portuguese and English column names
/// are folded.
fn normalize(value: &str) -> String {
    let folded: String = value
        .trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(|ch| match ch {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'ê' | 'è' | 'ë' => 'e',
            'í' | 'î' | 'ì' | 'ï' => 'i',
            'ó' | 'ô' | 'õ' | 'ò' | 'ö' => 'o',
            'ú' | 'û' | 'ù' | 'ü' => 'u',
            'ç' => 'c',
            '_' | '-' => ' ',
            other => other,
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl TryFrom<&str> for Column {
    type Error = ParseColumnError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_alias(value).ok_or_else(|| ParseColumnError(value.to_owned()))
    }
}

impl TryFrom<String> for Column {
    type Error = ParseColumnError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<Column> for String {
    fn from(value: Column) -> Self {
        value.key().to_owned()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
