use serde::{Deserialize, Serialize};
use std::fmt;

/// A Pokémon identity as accepted by the API: numeric id or name.
///
/// Names are stored trimmed and lowercased so that `"Pikachu"` and
/// `"pikachu"` share one cache key. An all-digit string is a numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Id(u32),
    Name(String),
}

impl Identifier {
    /// Parse user input into an identifier.
    pub fn parse(input: &str) -> Self {
        let normalized = input.trim().to_lowercase();
        if is_all_digits(&normalized) {
            if let Ok(id) = normalized.parse::<u32>() {
                return Identifier::Id(id);
            }
        }
        Identifier::Name(normalized)
    }

    /// Lowercase string form used as cache key and URL path segment.
    pub fn key(&self) -> String {
        match self {
            Identifier::Id(id) => id.to_string(),
            Identifier::Name(name) => name.clone(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Id(_))
    }

    /// True for a blank name, which no resource can match.
    pub fn is_empty(&self) -> bool {
        matches!(self, Identifier::Name(name) if name.is_empty())
    }
}

pub(crate) fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl From<u32> for Identifier {
    fn from(id: u32) -> Self {
        Identifier::Id(id)
    }
}

impl From<&str> for Identifier {
    fn from(input: &str) -> Self {
        Identifier::parse(input)
    }
}

impl From<String> for Identifier {
    fn from(input: String) -> Self {
        Identifier::parse(&input)
    }
}

impl From<&String> for Identifier {
    fn from(input: &String) -> Self {
        Identifier::parse(input)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_normalized() {
        assert_eq!(
            Identifier::parse("  Bulbasaur "),
            Identifier::Name("bulbasaur".into())
        );
        assert_eq!(Identifier::from("PIKACHU").key(), "pikachu");
    }

    #[test]
    fn test_digits_become_ids() {
        assert_eq!(Identifier::parse("25"), Identifier::Id(25));
        assert_eq!(Identifier::parse("007"), Identifier::Id(7));
        assert!(Identifier::from(9999999u32).is_numeric());
        assert_eq!(Identifier::from(1u32).key(), "1");
    }

    #[test]
    fn test_overflowing_digits_stay_names() {
        let ident = Identifier::parse("99999999999999");
        assert!(!ident.is_numeric());
        assert_eq!(ident.key(), "99999999999999");
    }

    #[test]
    fn test_mixed_input_is_a_name() {
        assert_eq!(Identifier::parse("mr-mime"), Identifier::Name("mr-mime".into()));
        assert!(!Identifier::parse("25a").is_numeric());
        assert!(Identifier::parse("   ").is_empty());
    }
}
