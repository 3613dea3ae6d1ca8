use serde::Deserialize;

use crate::errors::StoreResult;
use crate::models::BreedRecord;

const BUNDLED_JSON: &str = include_str!("../../data/breeds.json");

/// A versioned, ordered set of breed records to load into the store.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub version: String,
    pub breeds: Vec<BreedRecord>,
}

impl Dataset {
    pub fn new(version: impl Into<String>, breeds: Vec<BreedRecord>) -> Self {
        Self {
            version: version.into(),
            breeds,
        }
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The reference catalog shipped with the crate.
    pub fn bundled() -> StoreResult<Self> {
        Self::from_json(BUNDLED_JSON)
    }
}
