//! Quiz Engine: a fixed question sequence accumulating a five-dimensional score
//! vector, reversible navigation, and a priority-ordered classification into one
//! of eight profiles. Independent of the store; recommendations are matched
//! against the in-memory catalog by breed name.

pub mod engine;
pub mod profiles;
pub mod questions;
pub mod scores;

pub use engine::{QuizEngine, QuizState, QuizView};
pub use profiles::{classify, profile, recommend, Profile, ProfileKind, PROFILES};
pub use questions::{Question, QuizOption, QUESTIONS};
pub use scores::{ScoreVector, TraitFlags};
