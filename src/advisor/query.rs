use std::fmt;
use std::str::FromStr;

use super::AdvisorError;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown {kind}: {label}")]
pub struct UnknownLabel {
    kind: &'static str,
    label: String,
}

/// Tera type of the raid boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementalType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl ElementalType {
    pub const ALL: [ElementalType; 18] = [
        Self::Normal,
        Self::Fire,
        Self::Water,
        Self::Electric,
        Self::Grass,
        Self::Ice,
        Self::Fighting,
        Self::Poison,
        Self::Ground,
        Self::Flying,
        Self::Psychic,
        Self::Bug,
        Self::Rock,
        Self::Ghost,
        Self::Dragon,
        Self::Dark,
        Self::Steel,
        Self::Fairy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "ノーマル",
            Self::Fire => "ほのお",
            Self::Water => "みず",
            Self::Electric => "でんき",
            Self::Grass => "くさ",
            Self::Ice => "こおり",
            Self::Fighting => "かくとう",
            Self::Poison => "どく",
            Self::Ground => "じめん",
            Self::Flying => "ひこう",
            Self::Psychic => "エスパー",
            Self::Bug => "むし",
            Self::Rock => "いわ",
            Self::Ghost => "ゴースト",
            Self::Dragon => "ドラゴン",
            Self::Dark => "あく",
            Self::Steel => "はがね",
            Self::Fairy => "フェアリー",
        }
    }
}

impl fmt::Display for ElementalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ElementalType {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "tera type",
                label: s.to_string(),
            })
    }
}

/// Star rank of the raid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DifficultyRank {
    OneToTwo,
    Three,
    Four,
    Five,
    #[default]
    Six,
    Seven,
}

impl DifficultyRank {
    pub const ALL: [DifficultyRank; 6] = [
        Self::OneToTwo,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::OneToTwo => "★1〜2",
            Self::Three => "★3",
            Self::Four => "★4",
            Self::Five => "★5",
            Self::Six => "★6",
            Self::Seven => "★7(最強レイド)",
        }
    }
}

impl fmt::Display for DifficultyRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DifficultyRank {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.label() == s)
            .ok_or_else(|| UnknownLabel {
                kind: "difficulty rank",
                label: s.to_string(),
            })
    }
}

/// One search: who we are fighting, its tera type, and the star rank.
///
/// `tera_type` is `None` until the user has picked one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub target_name: String,
    pub tera_type: Option<ElementalType>,
    pub rank: DifficultyRank,
}

impl Query {
    pub fn new(
        target_name: impl Into<String>,
        tera_type: Option<ElementalType>,
        rank: DifficultyRank,
    ) -> Self {
        Self {
            target_name: target_name.into(),
            tera_type,
            rank,
        }
    }

    /// Returns the selected tera type once both required fields are filled in.
    pub fn validate(&self) -> Result<ElementalType, AdvisorError> {
        if self.target_name.trim().is_empty() {
            return Err(AdvisorError::Validation("target name is empty"));
        }
        self.tera_type
            .ok_or(AdvisorError::Validation("tera type is not selected"))
    }
}
