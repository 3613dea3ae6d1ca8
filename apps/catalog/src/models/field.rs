use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::breed::UnknownVariant;

/// Categorical breed columns whose distinct values populate filter option sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Origin,
    CoatLength,
    ActivityLevel,
    BodyType,
    GroomingNeeds,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 5] = [
        CategoricalField::Origin,
        CategoricalField::CoatLength,
        CategoricalField::ActivityLevel,
        CategoricalField::BodyType,
        CategoricalField::GroomingNeeds,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            CategoricalField::Origin => "origin",
            CategoricalField::CoatLength => "coat_length",
            CategoricalField::ActivityLevel => "activity_level",
            CategoricalField::BodyType => "body_type",
            CategoricalField::GroomingNeeds => "grooming_needs",
        }
    }
}

impl FromStr for CategoricalField {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoricalField::ALL
            .into_iter()
            .find(|f| f.column() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "filter field",
                value: s.to_string(),
            })
    }
}
