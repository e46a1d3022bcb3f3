use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static CARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-f]{14}$").unwrap_or_else(|e| panic!("card id pattern: {e}"))
});

/// Access-card identifier: 14 hexadecimal digits, stored lowercase.
/// Input is case-insensitive; comparison and storage always use the
/// normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CardId(String);

impl CardId {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let normalized = raw.trim().to_lowercase();
        if CARD_RE.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(AppError::InvalidCardId(raw.trim().to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CardId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CardId::parse(&value).map_err(|e| e.to_string())
    }
}

impl From<CardId> for String {
    fn from(card: CardId) -> Self {
        card.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
