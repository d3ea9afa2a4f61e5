//! Per-attribute comparison between a guess and the target.
//!
//! Two rules exist:
//!
//! - **Identity** attributes (nation, league, team, position) either match or
//!   they don't. There is no partial credit.
//! - **Ordinal** attributes (age, shirt number) also report which direction the
//!   target lies in, so the next guess can be narrowed down.
//!
//! # Example
//!
//! ```
//! use guessr_engine::{Outcome, compare_ordinal};
//!
//! assert_eq!(compare_ordinal(22, 25), Outcome::TooLow);
//! assert_eq!(compare_ordinal(11, 9), Outcome::TooHigh);
//! assert_eq!(compare_ordinal(9, 9), Outcome::Match);
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::Player;

/// Result of comparing one attribute of a guess against the target.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    #[display("match")]
    Match,
    #[display("no match")]
    NoMatch,
    /// The guessed value is below the target's.
    #[display("too low")]
    TooLow,
    /// The guessed value is above the target's.
    #[display("too high")]
    TooHigh,
}

/// Direction in which the target lies, relative to a guessed ordinal value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Hint {
    #[display("higher")]
    Higher,
    #[display("lower")]
    Lower,
}

impl Outcome {
    #[must_use]
    pub const fn hint(self) -> Option<Hint> {
        match self {
            Self::TooLow => Some(Hint::Higher),
            Self::TooHigh => Some(Hint::Lower),
            Self::Match | Self::NoMatch => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum AttributeKind {
    Identity,
    Ordinal,
}

/// An attribute tracked by the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    #[display("nation")]
    Nation,
    #[display("league")]
    League,
    #[display("team")]
    Team,
    #[display("position")]
    Position,
    #[display("age")]
    Age,
    #[display("shirt number")]
    ShirtNumber,
}

impl Attribute {
    /// Every tracked attribute, in display order.
    pub const ALL: [Self; 6] = [
        Self::Nation,
        Self::League,
        Self::Team,
        Self::Position,
        Self::Age,
        Self::ShirtNumber,
    ];

    #[must_use]
    pub const fn kind(self) -> AttributeKind {
        match self {
            Self::Nation | Self::League | Self::Team | Self::Position => AttributeKind::Identity,
            Self::Age | Self::ShirtNumber => AttributeKind::Ordinal,
        }
    }

    /// Compares this attribute of `guess` against `target`.
    ///
    /// Nation, league and team compare by id, never by display name.
    #[must_use]
    pub fn compare(self, guess: &Player, target: &Player) -> Outcome {
        match self {
            Self::Nation => compare_identity(&guess.nation.id, &target.nation.id),
            Self::League => compare_identity(&guess.league.id, &target.league.id),
            Self::Team => compare_identity(&guess.team.id, &target.team.id),
            Self::Position => compare_identity(&guess.position, &target.position),
            Self::Age => compare_ordinal(guess.age, target.age),
            Self::ShirtNumber => compare_ordinal(guess.shirt_number, target.shirt_number),
        }
    }
}

/// `Match` if the values are equal, `NoMatch` otherwise.
#[must_use]
pub fn compare_identity<T>(guess: &T, target: &T) -> Outcome
where
    T: PartialEq + ?Sized,
{
    if guess == target {
        Outcome::Match
    } else {
        Outcome::NoMatch
    }
}

/// `Match` if equal, otherwise whether the guess is below or above the target.
#[must_use]
pub fn compare_ordinal<T>(guess: T, target: T) -> Outcome
where
    T: Ord + Copy,
{
    match guess.cmp(&target) {
        Ordering::Less => Outcome::TooLow,
        Ordering::Equal => Outcome::Match,
        Ordering::Greater => Outcome::TooHigh,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Position,
        player::fixtures::{player, target},
    };

    #[test]
    fn test_identity_has_no_partial_credit() {
        assert_eq!(compare_identity("BR", "BR"), Outcome::Match);
        assert_eq!(compare_identity("BR", "AR"), Outcome::NoMatch);
        assert_eq!(
            compare_identity(&Position::Forward, &Position::Midfielder),
            Outcome::NoMatch
        );
    }

    #[test]
    fn test_ordinal_law() {
        for guess in 1u8..=99 {
            let outcome = compare_ordinal(guess, 50);
            match guess {
                1..=49 => assert_eq!(outcome, Outcome::TooLow),
                50 => assert_eq!(outcome, Outcome::Match),
                _ => assert_eq!(outcome, Outcome::TooHigh),
            }
        }
    }

    #[test]
    fn test_ordinal_uses_numeric_order() {
        // "9" > "11" as strings, but not as numbers
        assert_eq!(compare_ordinal(9, 11), Outcome::TooLow);
        assert_eq!(compare_ordinal(11, 9), Outcome::TooHigh);
    }

    #[test]
    fn test_hints() {
        assert_eq!(Outcome::TooLow.hint(), Some(Hint::Higher));
        assert_eq!(Outcome::TooHigh.hint(), Some(Hint::Lower));
        assert_eq!(Outcome::Match.hint(), None);
        assert_eq!(Outcome::NoMatch.hint(), None);
    }

    #[test]
    fn test_attribute_kinds() {
        let ordinal: Vec<_> = Attribute::ALL
            .into_iter()
            .filter(|attr| attr.kind().is_ordinal())
            .collect();
        assert_eq!(ordinal, [Attribute::Age, Attribute::ShirtNumber]);
    }

    #[test]
    fn test_identity_attributes_compare_ids_not_names() {
        let target = target();
        let mut guess = player("p2", "BR", "L1", "T1", Position::Forward, 25, 9);
        guess.nation.name = "Brasil".to_owned();
        assert_eq!(Attribute::Nation.compare(&guess, &target), Outcome::Match);

        guess.team.id = "T9".into();
        guess.team.name = target.team.name.clone();
        assert_eq!(Attribute::Team.compare(&guess, &target), Outcome::NoMatch);
    }

    #[test]
    fn test_identity_attributes_never_hint() {
        let target = target();
        let guess = player("p2", "AR", "L2", "T2", Position::Goalkeeper, 40, 1);
        for attr in Attribute::ALL {
            let outcome = attr.compare(&guess, &target);
            if attr.kind().is_identity() {
                assert_eq!(outcome, Outcome::NoMatch, "{attr}");
            } else {
                assert!(outcome.hint().is_some(), "{attr}");
            }
        }
    }
}
