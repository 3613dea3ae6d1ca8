pub mod breed;
pub mod field;

pub use breed::{
    Bounds, BodyType, Breed, BreedId, BreedRecord, CoatLength, Level, PersonalityScores,
};
pub use field::CategoricalField;
