use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::From,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }
    };
}

define_id!(
    /// Opaque identifier of a player.
    PlayerId
);
define_id!(
    /// Opaque identifier of a nation.
    NationId
);
define_id!(
    /// Opaque identifier of a league.
    LeagueId
);
define_id!(
    /// Opaque identifier of a team (club).
    TeamId
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nation {
    pub id: NationId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

/// Playing position.
///
/// Serialized with the usual two-letter codes (`GK`, `DF`, `MF`, `FW`).
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
pub enum Position {
    #[serde(rename = "GK")]
    #[display("GK")]
    Goalkeeper,
    #[serde(rename = "DF")]
    #[display("DF")]
    Defender,
    #[serde(rename = "MF")]
    #[display("MF")]
    Midfielder,
    #[serde(rename = "FW")]
    #[display("FW")]
    Forward,
}

impl Position {
    pub const ALL: [Self; 4] = [
        Self::Goalkeeper,
        Self::Defender,
        Self::Midfielder,
        Self::Forward,
    ];

    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::Goalkeeper => "Goalkeeper",
            Self::Defender => "Defender",
            Self::Midfielder => "Midfielder",
            Self::Forward => "Forward",
        }
    }
}

/// A fully resolved player, as seen by the engine.
///
/// Both the hidden target and every submitted candidate are `Player` values.
/// The engine assumes every field is populated; range checks (shirt number
/// 1-99, age derived from the date of birth) belong to whoever builds the
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub nation: Nation,
    pub league: League,
    pub team: Team,
    pub position: Position,
    pub age: u8,
    pub shirt_number: u8,
}


#[cfg(test)]
mod tests {
    use super::{fixtures::target, *};

    #[test]
    fn test_player_serialization_uses_camel_case() {
        let json = serde_json::to_value(target()).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["shirtNumber"], 9);
        assert_eq!(json["position"], "FW");
        assert_eq!(json["nation"]["id"], "BR");
    }

    #[test]
    fn test_position_codes() {
        for position in Position::ALL {
            let serialized = serde_json::to_string(&position).unwrap();
            assert_eq!(serialized, format!("\"{position}\""));
            let deserialized: Position = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized, position);
        }
    }

    #[test]
    fn test_ids_are_transparent() {
        let id = PlayerId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
        assert_eq!(id.to_string(), "abc");
        assert_eq!(id.as_str(), "abc");
    }
}
