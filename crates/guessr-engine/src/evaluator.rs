use log::debug;
use serde::{Deserialize, Serialize};

use crate::{Attribute, Outcome, Player};

/// Outcome of every tracked attribute for one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeOutcomes {
    pub nation: Outcome,
    pub league: Outcome,
    pub team: Outcome,
    pub position: Outcome,
    pub age: Outcome,
    pub shirt_number: Outcome,
}

impl AttributeOutcomes {
    #[must_use]
    pub const fn get(&self, attribute: Attribute) -> Outcome {
        match attribute {
            Attribute::Nation => self.nation,
            Attribute::League => self.league,
            Attribute::Team => self.team,
            Attribute::Position => self.position,
            Attribute::Age => self.age,
            Attribute::ShirtNumber => self.shirt_number,
        }
    }

    /// Iterates `(attribute, outcome)` pairs in [`Attribute::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, Outcome)> + '_ {
        Attribute::ALL
            .into_iter()
            .map(|attribute| (attribute, self.get(attribute)))
    }

    #[must_use]
    pub fn all_match(&self) -> bool {
        self.iter().all(|(_, outcome)| outcome.is_match())
    }
}

/// How a [`GuessResult`] entered the history.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "camelCase")]
pub enum GuessKind {
    /// A candidate submitted by the player.
    Submitted,
    /// The target itself, appended when the player surrenders.
    Revealed,
}

/// Feedback for one guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResult {
    player: Player,
    outcomes: AttributeOutcomes,
    is_correct_guess: bool,
    kind: GuessKind,
}

impl GuessResult {
    #[must_use]
    pub fn player(&self) -> &Player {
        &self.player
    }

    #[must_use]
    pub fn outcomes(&self) -> &AttributeOutcomes {
        &self.outcomes
    }

    /// Whether the guessed player is the target.
    ///
    /// This is decided by player id alone. Matching attributes are feedback
    /// only.
    #[must_use]
    pub fn is_correct_guess(&self) -> bool {
        self.is_correct_guess
    }

    #[must_use]
    pub fn kind(&self) -> GuessKind {
        self.kind
    }

    pub(crate) fn into_revealed(self) -> Self {
        Self {
            kind: GuessKind::Revealed,
            ..self
        }
    }
}

/// Compares `guess` against `target` on every tracked attribute.
///
/// # Example
///
/// ```
/// use guessr_engine::{League, Nation, Outcome, Player, Position, Team, evaluate};
///
/// let player = Player {
///     id: "p1".into(),
///     name: "Someone".to_owned(),
///     nation: Nation { id: "BR".into(), name: "Brazil".to_owned() },
///     league: League { id: "L1".into(), name: "League One".to_owned() },
///     team: Team { id: "T1".into(), name: "Team One".to_owned() },
///     position: Position::Forward,
///     age: 25,
///     shirt_number: 9,
/// };
///
/// let result = evaluate(&player, &player);
/// assert!(result.is_correct_guess());
/// assert!(result.outcomes().all_match());
/// assert_eq!(result.outcomes().age, Outcome::Match);
/// ```
#[must_use]
pub fn evaluate(guess: &Player, target: &Player) -> GuessResult {
    let outcomes = AttributeOutcomes {
        nation: Attribute::Nation.compare(guess, target),
        league: Attribute::League.compare(guess, target),
        team: Attribute::Team.compare(guess, target),
        position: Attribute::Position.compare(guess, target),
        age: Attribute::Age.compare(guess, target),
        shirt_number: Attribute::ShirtNumber.compare(guess, target),
    };
    let is_correct_guess = guess.id == target.id;
    debug!(
        "evaluated guess {} against {}: correct={is_correct_guess} {outcomes:?}",
        guess.id, target.id
    );
    GuessResult {
        player: guess.clone(),
        outcomes,
        is_correct_guess,
        kind: GuessKind::Submitted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Position,
        player::fixtures::{player, target, wrong_guess},
    };

    #[test]
    fn test_self_evaluation_is_all_match() {
        let target = target();
        let result = evaluate(&target, &target);
        assert!(result.is_correct_guess());
        assert!(result.outcomes().all_match());
        assert!(result.kind().is_submitted());
    }

    #[test]
    fn test_scenario_partial_match() {
        let target = target();
        let guess = player("p2", "BR", "L2", "T2", Position::Forward, 22, 11);

        let result = evaluate(&guess, &target);
        let outcomes = result.outcomes();
        assert_eq!(outcomes.nation, Outcome::Match);
        assert_eq!(outcomes.league, Outcome::NoMatch);
        assert_eq!(outcomes.team, Outcome::NoMatch);
        assert_eq!(outcomes.position, Outcome::Match);
        assert_eq!(outcomes.age, Outcome::TooLow);
        assert_eq!(outcomes.shirt_number, Outcome::TooHigh);
        assert!(!result.is_correct_guess());
        assert_eq!(result.player().id, guess.id);
    }

    #[test]
    fn test_identical_attributes_do_not_win() {
        let target = target();
        let mut twin = target.clone();
        twin.id = "p1-twin".into();

        let result = evaluate(&twin, &target);
        assert!(result.outcomes().all_match());
        assert!(!result.is_correct_guess());
    }

    #[test]
    fn test_outcomes_iterate_in_attribute_order() {
        let result = evaluate(&wrong_guess(1), &target());
        let attributes: Vec<_> = result.outcomes().iter().map(|(attr, _)| attr).collect();
        assert_eq!(attributes, Attribute::ALL);
        for (attr, outcome) in result.outcomes().iter() {
            assert_eq!(outcome, result.outcomes().get(attr));
        }
    }

    #[test]
    fn test_shirt_number_law() {
        let target = target();
        for shirt_number in 1..=99 {
            let guess = player("p2", "BR", "L1", "T1", Position::Forward, 25, shirt_number);
            let expected = match shirt_number {
                1..=8 => Outcome::TooLow,
                9 => Outcome::Match,
                _ => Outcome::TooHigh,
            };
            assert_eq!(evaluate(&guess, &target).outcomes().shirt_number, expected);
        }
    }

    #[test]
    fn test_result_serialization() {
        let result = evaluate(&wrong_guess(1), &target());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["isCorrectGuess"], false);
        assert_eq!(json["kind"], "submitted");
        assert_eq!(json["outcomes"]["shirtNumber"], "tooLow");
        assert_eq!(json["outcomes"]["nation"], "noMatch");
    }
}
