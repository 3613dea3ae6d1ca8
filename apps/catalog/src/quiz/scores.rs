use std::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Five-dimensional signed trait accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreVector {
    pub energy: i32,
    pub social: i32,
    pub routine: i32,
    pub attention: i32,
    pub playfulness: i32,
}

impl ScoreVector {
    pub const ZERO: ScoreVector = ScoreVector::new(0, 0, 0, 0, 0);

    pub const fn new(energy: i32, social: i32, routine: i32, attention: i32, playfulness: i32) -> Self {
        Self {
            energy,
            social,
            routine,
            attention,
            playfulness,
        }
    }

    pub fn flags(&self) -> TraitFlags {
        TraitFlags {
            energetic: self.energy > 0,
            social: self.social > 0,
            playful: self.playfulness > 0,
            routine_loving: self.routine > 0,
            attention_seeking: self.attention > 0,
        }
    }
}

impl AddAssign for ScoreVector {
    fn add_assign(&mut self, rhs: Self) {
        self.energy += rhs.energy;
        self.social += rhs.social;
        self.routine += rhs.routine;
        self.attention += rhs.attention;
        self.playfulness += rhs.playfulness;
    }
}

impl SubAssign for ScoreVector {
    fn sub_assign(&mut self, rhs: Self) {
        self.energy -= rhs.energy;
        self.social -= rhs.social;
        self.routine -= rhs.routine;
        self.attention -= rhs.attention;
        self.playfulness -= rhs.playfulness;
    }
}

impl Add for ScoreVector {
    type Output = ScoreVector;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl Sub for ScoreVector {
    type Output = ScoreVector;

    fn sub(mut self, rhs: Self) -> Self::Output {
        self -= rhs;
        self
    }
}

impl std::iter::Sum for ScoreVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(ScoreVector::ZERO, Add::add)
    }
}

/// Sign of each dimension: a dimension counts only when strictly positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TraitFlags {
    pub energetic: bool,
    pub social: bool,
    pub playful: bool,
    pub routine_loving: bool,
    pub attention_seeking: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_sub_is_identity() {
        let a = ScoreVector::new(2, -1, 0, 1, -2);
        let b = ScoreVector::new(-1, 2, 2, 0, 1);
        assert_eq!(a + b - b, a);
    }

    #[test]
    fn test_sum_of_contributions() {
        let total: ScoreVector = [ScoreVector::new(1, 1, 1, 1, 1), ScoreVector::new(1, -2, 0, 0, 3)]
            .into_iter()
            .sum();
        assert_eq!(total, ScoreVector::new(2, -1, 1, 1, 4));
    }

    #[test]
    fn test_zero_is_not_positive() {
        let flags = ScoreVector::new(0, 1, 0, -1, 2).flags();
        assert!(!flags.energetic);
        assert!(flags.social);
        assert!(!flags.routine_loving);
        assert!(!flags.attention_seeking);
        assert!(flags.playful);
    }
}
