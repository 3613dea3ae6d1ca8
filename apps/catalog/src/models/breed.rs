use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

use crate::errors::{StoreError, StoreResult, ValidationError};

pub type BreedId = i64;

const PERSONALITY_MAX: u8 = 10;

/// A string that does not name any variant of a catalog enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoatLength {
    Hairless,
    Short,
    Medium,
    SemiLong,
    Long,
}

impl CoatLength {
    pub const ALL: [CoatLength; 5] = [
        CoatLength::Hairless,
        CoatLength::Short,
        CoatLength::Medium,
        CoatLength::SemiLong,
        CoatLength::Long,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CoatLength::Hairless => "hairless",
            CoatLength::Short => "short",
            CoatLength::Medium => "medium",
            CoatLength::SemiLong => "semi_long",
            CoatLength::Long => "long",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoatLength::Hairless => "Hairless",
            CoatLength::Short => "Short",
            CoatLength::Medium => "Medium",
            CoatLength::SemiLong => "Semi-long",
            CoatLength::Long => "Long",
        }
    }
}

impl FromStr for CoatLength {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoatLength::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "coat length",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyType {
    Cobby,
    SemiCobby,
    Moderate,
    Foreign,
    Oriental,
}

impl BodyType {
    pub const ALL: [BodyType; 5] = [
        BodyType::Cobby,
        BodyType::SemiCobby,
        BodyType::Moderate,
        BodyType::Foreign,
        BodyType::Oriental,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Cobby => "cobby",
            BodyType::SemiCobby => "semi_cobby",
            BodyType::Moderate => "moderate",
            BodyType::Foreign => "foreign",
            BodyType::Oriental => "oriental",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BodyType::Cobby => "Cobby",
            BodyType::SemiCobby => "Semi-cobby",
            BodyType::Moderate => "Moderate",
            BodyType::Foreign => "Foreign",
            BodyType::Oriental => "Oriental",
        }
    }
}

impl FromStr for BodyType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyType::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "body type",
                value: s.to_string(),
            })
    }
}

/// Five-step ordered scale shared by activity level and grooming needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::VeryLow,
        Level::Low,
        Level::Moderate,
        Level::High,
        Level::VeryHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::VeryLow => "very_low",
            Level::Low => "low",
            Level::Moderate => "moderate",
            Level::High => "high",
            Level::VeryHigh => "very_high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Level::VeryLow => "Very low",
            Level::Low => "Low",
            Level::Moderate => "Moderate",
            Level::High => "High",
            Level::VeryHigh => "Very high",
        }
    }
}

impl FromStr for Level {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "level",
                value: s.to_string(),
            })
    }
}

/// Inclusive `min..=max` range. Lifespans are in years, weights in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityScores {
    pub energy: u8,
    pub friendliness: u8,
    pub intelligence: u8,
}

/// Every attribute of a breed except its store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreedRecord {
    pub code: Option<String>,
    pub name: String,
    pub origin: String,
    pub coat_length: CoatLength,
    pub coat_pattern: Option<String>,
    pub body_type: BodyType,
    /// Comma-separated trait list, e.g. "Active, Curious, Playful".
    pub temperament: String,
    pub activity_level: Level,
    pub grooming_needs: Level,
    pub health_notes: Option<String>,
    pub lifespan: Bounds<u32>,
    pub weight_female: Bounds<f64>,
    pub weight_male: Bounds<f64>,
    pub description: String,
    pub care_notes: Option<String>,
    pub ideal_for: Option<String>,
    pub personality: Option<PersonalityScores>,
    pub image_key: String,
}

impl BreedRecord {
    /// Checks required fields and bound ordering before the record is stored.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let required = [
            ("name", &self.name),
            ("origin", &self.origin),
            ("temperament", &self.temperament),
            ("description", &self.description),
            ("image_key", &self.image_key),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }

        if self.lifespan.min == 0 {
            return Err(ValidationError::NonPositive {
                field: "lifespan_min",
            });
        }
        if self.lifespan.min > self.lifespan.max {
            return Err(ValidationError::InvertedBound {
                field: "lifespan",
                min: self.lifespan.min as f64,
                max: self.lifespan.max as f64,
            });
        }

        check_weight("weight_female", &self.weight_female)?;
        check_weight("weight_male", &self.weight_male)?;

        if let Some(p) = &self.personality {
            let scores = [
                ("personality_energy", p.energy),
                ("personality_friendliness", p.friendliness),
                ("personality_intelligence", p.intelligence),
            ];
            for (field, value) in scores {
                if value > PERSONALITY_MAX {
                    return Err(ValidationError::OutOfRange {
                        field,
                        value,
                        max: PERSONALITY_MAX,
                    });
                }
            }
        }

        Ok(())
    }

    /// Case-insensitive substring match over name, origin, temperament, coat
    /// pattern and health notes. `folded_needle` must already be lower-cased.
    pub fn matches_search_text(&self, folded_needle: &str) -> bool {
        [&self.name, &self.origin, &self.temperament]
            .into_iter()
            .chain(self.coat_pattern.as_ref())
            .chain(self.health_notes.as_ref())
            .any(|field| contains_folded(field, folded_needle))
    }

    /// Individual temperament traits, trimmed, in listed order.
    pub fn temperament_traits(&self) -> Vec<&str> {
        self.temperament
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }
}

/// Unicode-aware case-insensitive substring test.
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    haystack.to_lowercase().contains(folded_needle)
}

fn check_weight(field: &'static str, bounds: &Bounds<f64>) -> Result<(), ValidationError> {
    // NaN fails the positivity check as well.
    if !(bounds.min > 0.0) || !(bounds.max > 0.0) {
        return Err(ValidationError::NonPositive { field });
    }
    if bounds.min > bounds.max {
        return Err(ValidationError::InvertedBound {
            field,
            min: bounds.min,
            max: bounds.max,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breed {
    pub id: BreedId,
    #[serde(flatten)]
    pub record: BreedRecord,
}

impl Breed {
    pub fn name(&self) -> &str {
        &self.record.name
    }

    pub fn lifespan_label(&self) -> String {
        let Bounds { min, max } = self.record.lifespan;
        if min == max {
            format!("{min} years")
        } else {
            format!("{min}–{max} years")
        }
    }
}

impl fmt::Display for Breed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.record.name, self.record.origin)
    }
}

/// Flat row shape of the `breeds` table.
#[derive(Debug, Clone, FromRow)]
pub struct BreedRow {
    pub id: i64,
    pub code: Option<String>,
    pub name: String,
    pub origin: String,
    pub coat_length: String,
    pub coat_pattern: Option<String>,
    pub body_type: String,
    pub temperament: String,
    pub activity_level: String,
    pub grooming_needs: String,
    pub health_notes: Option<String>,
    pub lifespan_min: i64,
    pub lifespan_max: i64,
    pub weight_female_min: f64,
    pub weight_female_max: f64,
    pub weight_male_min: f64,
    pub weight_male_max: f64,
    pub description: String,
    pub care_notes: Option<String>,
    pub ideal_for: Option<String>,
    pub personality_energy: Option<i64>,
    pub personality_friendliness: Option<i64>,
    pub personality_intelligence: Option<i64>,
    pub image_key: String,
}

impl BreedRow {
    pub fn into_domain(self) -> StoreResult<Breed> {
        let personality = match (
            self.personality_energy,
            self.personality_friendliness,
            self.personality_intelligence,
        ) {
            (Some(energy), Some(friendliness), Some(intelligence)) => Some(PersonalityScores {
                energy: narrow(energy, "personality_energy")?,
                friendliness: narrow(friendliness, "personality_friendliness")?,
                intelligence: narrow(intelligence, "personality_intelligence")?,
            }),
            _ => None,
        };

        Ok(Breed {
            id: self.id,
            record: BreedRecord {
                code: self.code,
                name: self.name,
                origin: self.origin,
                coat_length: parse_column(&self.coat_length)?,
                coat_pattern: self.coat_pattern,
                body_type: parse_column(&self.body_type)?,
                temperament: self.temperament,
                activity_level: parse_column(&self.activity_level)?,
                grooming_needs: parse_column(&self.grooming_needs)?,
                health_notes: self.health_notes,
                lifespan: Bounds::new(
                    narrow(self.lifespan_min, "lifespan_min")?,
                    narrow(self.lifespan_max, "lifespan_max")?,
                ),
                weight_female: Bounds::new(self.weight_female_min, self.weight_female_max),
                weight_male: Bounds::new(self.weight_male_min, self.weight_male_max),
                description: self.description,
                care_notes: self.care_notes,
                ideal_for: self.ideal_for,
                personality,
                image_key: self.image_key,
            },
        })
    }
}

fn parse_column<T>(value: &str) -> StoreResult<T>
where
    T: FromStr<Err = UnknownVariant>,
{
    value
        .parse::<T>()
        .map_err(|e| StoreError::Corrupt(e.to_string()))
}

fn narrow<T: TryFrom<i64>>(value: i64, column: &str) -> StoreResult<T> {
    T::try_from(value)
        .map_err(|_| StoreError::Corrupt(format!("column {column} holds out-of-range {value}")))
}
