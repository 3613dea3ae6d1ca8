use serde::{Deserialize, Serialize};

use crate::models::Breed;
use crate::quiz::scores::{ScoreVector, TraitFlags};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    AdventureCompanion,
    IndependentExplorer,
    GentleCuddler,
    QuietObserver,
    Entertainer,
    CuriousLoner,
    Homebody,
    BalancedCompanion,
}

#[derive(Debug, Serialize)]
pub struct Profile {
    pub kind: ProfileKind,
    pub name: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub traits: &'static [&'static str],
    /// Matched against catalog breed names by case-insensitive substring.
    pub ideal_breeds: &'static [&'static str],
}

/// Maps a final score vector to exactly one profile.
///
/// Rules are checked in order and the first match wins, so the mapping is total
/// even though the conditions overlap.
pub fn classify(scores: &ScoreVector) -> ProfileKind {
    classify_flags(scores.flags())
}

pub fn classify_flags(flags: TraitFlags) -> ProfileKind {
    let TraitFlags {
        energetic,
        social,
        playful,
        routine_loving,
        attention_seeking,
    } = flags;

    if energetic && social && playful {
        ProfileKind::AdventureCompanion
    } else if energetic && !social {
        ProfileKind::IndependentExplorer
    } else if !energetic && social && !playful {
        ProfileKind::GentleCuddler
    } else if !energetic && !social && !playful {
        ProfileKind::QuietObserver
    } else if playful && social && attention_seeking {
        ProfileKind::Entertainer
    } else if playful && !social {
        ProfileKind::CuriousLoner
    } else if !energetic && social && routine_loving {
        ProfileKind::Homebody
    } else {
        ProfileKind::BalancedCompanion
    }
}

pub fn profile(kind: ProfileKind) -> &'static Profile {
    match kind {
        ProfileKind::AdventureCompanion => &PROFILES[0],
        ProfileKind::IndependentExplorer => &PROFILES[1],
        ProfileKind::GentleCuddler => &PROFILES[2],
        ProfileKind::QuietObserver => &PROFILES[3],
        ProfileKind::Entertainer => &PROFILES[4],
        ProfileKind::CuriousLoner => &PROFILES[5],
        ProfileKind::Homebody => &PROFILES[6],
        ProfileKind::BalancedCompanion => &PROFILES[7],
    }
}

/// Catalog breeds whose name contains one of the profile's ideal names,
/// in ideal-list order and without duplicates.
pub fn recommend<'a>(profile: &Profile, catalog: &'a [Breed]) -> Vec<&'a Breed> {
    let mut picks: Vec<&Breed> = Vec::new();
    for ideal in profile.ideal_breeds {
        let ideal = ideal.to_lowercase();
        for breed in catalog {
            if breed.record.name.to_lowercase().contains(&ideal)
                && !picks.iter().any(|p| p.id == breed.id)
            {
                picks.push(breed);
            }
        }
    }
    picks
}

pub static PROFILES: [Profile; 8] = [
    Profile {
        kind: ProfileKind::AdventureCompanion,
        name: "Adventure Companion",
        tagline: "Always up for the next game",
        description: "You bring energy and company to everything you do. A bold, sociable cat that wants to explore, climb and play alongside you will thrive in your home.",
        traits: &["Energetic", "Social", "Playful"],
        ideal_breeds: &["Abyssinian", "Bengal", "Siamese"],
    },
    Profile {
        kind: ProfileKind::IndependentExplorer,
        name: "Independent Explorer",
        tagline: "Active, but on your own terms",
        description: "You lead an active life and value your own space. An athletic cat that keeps itself busy and bonds without clinging suits you best.",
        traits: &["Energetic", "Independent", "Curious"],
        ideal_breeds: &["Egyptian Mau", "Bengal", "Norwegian Forest Cat"],
    },
    Profile {
        kind: ProfileKind::GentleCuddler,
        name: "Gentle Cuddler",
        tagline: "Quiet evenings, warm laps",
        description: "You enjoy company at a calm pace. A placid, affectionate cat that prefers a lap to a laser pointer will match your rhythm.",
        traits: &["Calm", "Affectionate", "Social"],
        ideal_breeds: &["Ragdoll", "Persian", "Birman"],
    },
    Profile {
        kind: ProfileKind::QuietObserver,
        name: "Quiet Observer",
        tagline: "Peace, space and mutual respect",
        description: "You value a tranquil home. A reserved, undemanding cat that is content to watch the world from the windowsill will fit right in.",
        traits: &["Calm", "Reserved", "Independent"],
        ideal_breeds: &["Russian Blue", "Chartreux", "British Shorthair"],
    },
    Profile {
        kind: ProfileKind::Entertainer,
        name: "Entertainer",
        tagline: "The life of the household",
        description: "You love interaction and do not mind being the centre of a cat's world. An attention-loving clown of a cat will keep you company all day.",
        traits: &["Playful", "Social", "Attention-seeking"],
        ideal_breeds: &["Sphynx", "Devon Rex", "Oriental Shorthair"],
    },
    Profile {
        kind: ProfileKind::CuriousLoner,
        name: "Curious Loner",
        tagline: "Playful minds, independent hearts",
        description: "You like a cat with character that can entertain itself. A playful, self-sufficient breed that enjoys puzzles and solo adventures suits you.",
        traits: &["Playful", "Independent", "Inquisitive"],
        ideal_breeds: &["Turkish Van", "Norwegian Forest Cat", "Abyssinian"],
    },
    Profile {
        kind: ProfileKind::Homebody,
        name: "Homebody",
        tagline: "Steady routines and family time",
        description: "You run a warm, predictable household. A sociable cat that thrives on routine and gentle play will feel at home with you.",
        traits: &["Social", "Routine-loving", "Gentle"],
        ideal_breeds: &["Maine Coon", "Burmese", "Exotic Shorthair"],
    },
    Profile {
        kind: ProfileKind::BalancedCompanion,
        name: "Balanced Companion",
        tagline: "A little of everything",
        description: "Your answers point to a flexible lifestyle without strong extremes. An adaptable, even-tempered cat will be happy in almost any arrangement you make.",
        traits: &["Adaptable", "Easygoing", "Friendly"],
        ideal_breeds: &["American Shorthair", "Scottish Fold", "British Shorthair"],
    },
];
