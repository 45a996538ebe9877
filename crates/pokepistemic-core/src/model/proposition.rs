use core::fmt;
use serde::{Deserialize, Serialize};
use std::ops::Not;

/// Category of atomic fact an observer can learn about a hidden set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FactKind {
    Move,
    Item,
    Ability,
}

impl FactKind {
    pub const ALL: [FactKind; 3] = [FactKind::Move, FactKind::Item, FactKind::Ability];

    pub const fn prefix(self) -> &'static str {
        match self {
            FactKind::Move => "has_move",
            FactKind::Item => "has_item",
            FactKind::Ability => "has_ability",
        }
    }

    pub fn from_prefix(value: &str) -> Option<Self> {
        FactKind::ALL.into_iter().find(|kind| kind.prefix() == value)
    }
}

/// A single fact with its subject value, e.g. `has_move:Shadow Ball`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fact {
    pub kind: FactKind,
    pub value: String,
}

impl Fact {
    pub fn new(kind: FactKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.prefix(), self.value)
    }
}

/// Atomic proposition, optionally negated. Negation is the only connective.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Proposition {
    fact: Fact,
    negated: bool,
}

impl Proposition {
    pub fn new(fact: Fact) -> Self {
        Self {
            fact,
            negated: false,
        }
    }

    pub fn has_move(name: impl Into<String>) -> Self {
        Self::new(Fact::new(FactKind::Move, name))
    }

    pub fn has_item(name: impl Into<String>) -> Self {
        Self::new(Fact::new(FactKind::Item, name))
    }

    pub fn has_ability(name: impl Into<String>) -> Self {
        Self::new(Fact::new(FactKind::Ability, name))
    }

    pub fn fact(&self) -> &Fact {
        &self.fact
    }

    pub fn is_negated(&self) -> bool {
        self.negated
    }

    /// Returns the complementary proposition.
    pub fn negate(&self) -> Self {
        Self {
            fact: self.fact.clone(),
            negated: !self.negated,
        }
    }

    /// Parses the textual form (`has_item:Life Orb`, `not_has_move:Surf`).
    pub fn parse(value: &str) -> Result<Self, PropositionParseError> {
        let (head, subject) = value
            .split_once(':')
            .ok_or_else(|| PropositionParseError::MissingSeparator(value.to_string()))?;
        let (negated, prefix) = match head.strip_prefix("not_") {
            Some(rest) => (true, rest),
            None => (false, head),
        };
        let kind = FactKind::from_prefix(prefix)
            .ok_or_else(|| PropositionParseError::UnknownPrefix(head.to_string()))?;
        if subject.trim().is_empty() {
            return Err(PropositionParseError::EmptyValue(value.to_string()));
        }
        Ok(Self {
            fact: Fact::new(kind, subject),
            negated,
        })
    }
}

impl Not for Proposition {
    type Output = Proposition;

    fn not(self) -> Self::Output {
        Self {
            fact: self.fact,
            negated: !self.negated,
        }
    }
}

impl fmt::Display for Proposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("not_")?;
        }
        write!(f, "{}", self.fact)
    }
}

impl From<Proposition> for String {
    fn from(value: Proposition) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for Proposition {
    type Error = PropositionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Proposition::parse(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PropositionParseError {
    #[error("proposition '{0}' is missing a ':' separator")]
    MissingSeparator(String),
    #[error("unknown proposition format: {0}")]
    UnknownPrefix(String),
    #[error("proposition '{0}' has an empty value")]
    EmptyValue(String),
}
