//! Language identifiers used to select copy.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A validated language identifier such as `en`, `fr` or `pt-BR`.
///
/// The primary subtag is stored lowercase and the region subtag uppercase,
/// so `EN-us` and `en-US` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    /// Parse and normalize a language identifier.
    pub fn parse(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        let (primary, region) = match tag.split_once(['-', '_']) {
            Some((p, r)) => (p, Some(r)),
            None => (tag, None),
        };

        if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(Error::InvalidLanguage(tag.to_string()));
        }

        let mut normalized = primary.to_ascii_lowercase();
        if let Some(region) = region {
            if !(2..=8).contains(&region.len())
                || !region.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(Error::InvalidLanguage(tag.to_string()));
            }
            normalized.push('-');
            normalized.push_str(&region.to_ascii_uppercase());
        }

        Ok(Self(normalized))
    }

    /// The normalized identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary subtag (`pt` for `pt-BR`).
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Language {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
