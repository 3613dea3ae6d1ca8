//! Query Engine: search, conjunctive filters and a stable sort over an
//! in-memory catalog.
//!
//! `run_query` is a pure function of its inputs. Absent or blank filter values
//! impose no constraint and never produce an error.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::breed::{contains_folded, UnknownVariant};
use crate::models::{BodyType, Breed, CoatLength, Level};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    Origin,
    /// Longest upper lifespan bound first.
    Lifespan,
    Temperament,
}

impl FromStr for SortKey {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "origin" => Ok(SortKey::Origin),
            "lifespan" => Ok(SortKey::Lifespan),
            "temperament" => Ok(SortKey::Temperament),
            _ => Err(UnknownVariant {
                kind: "sort key",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreedFilters {
    pub origin: Option<String>,
    /// A single trait, matched as a substring of the temperament text.
    pub temperament: Option<String>,
    pub coat_length: Option<CoatLength>,
    pub body_type: Option<BodyType>,
    pub activity_level: Option<Level>,
    pub grooming_needs: Option<Level>,
}

impl BreedFilters {
    /// True when every active filter accepts the breed.
    pub fn matches(&self, breed: &Breed) -> bool {
        let r = &breed.record;

        if let Some(origin) = active(&self.origin) {
            if !r.origin.trim().eq_ignore_ascii_case(origin) {
                return false;
            }
        }
        if let Some(temperament) = active(&self.temperament) {
            if !contains_folded(&r.temperament, &temperament.to_lowercase()) {
                return false;
            }
        }

        self.coat_length.map_or(true, |v| r.coat_length == v)
            && self.body_type.map_or(true, |v| r.body_type == v)
            && self.activity_level.map_or(true, |v| r.activity_level == v)
            && self.grooming_needs.map_or(true, |v| r.grooming_needs == v)
    }

    pub fn is_empty(&self) -> bool {
        active(&self.origin).is_none()
            && active(&self.temperament).is_none()
            && self.coat_length.is_none()
            && self.body_type.is_none()
            && self.activity_level.is_none()
            && self.grooming_needs.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreedQuery {
    pub search: Option<String>,
    pub filters: BreedFilters,
    pub sort: SortKey,
}

impl BreedQuery {
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn filters(mut self, filters: BreedFilters) -> Self {
        self.filters = filters;
        self
    }

    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

/// Filters and orders `catalog` according to `query`.
///
/// The sort is stable: breeds with equal keys keep their catalog order.
pub fn run_query<'a>(catalog: &'a [Breed], query: &BreedQuery) -> Vec<&'a Breed> {
    let needle = active(&query.search).map(str::to_lowercase);

    let mut results: Vec<&Breed> = catalog
        .iter()
        .filter(|b| needle.as_deref().map_or(true, |n| matches_search(b, n)))
        .filter(|b| query.filters.matches(b))
        .collect();

    sort_breeds(&mut results, query.sort);
    results
}

/// Stable in-place sort by `key`.
pub fn sort_breeds(breeds: &mut [&Breed], key: SortKey) {
    breeds.sort_by(|a, b| compare(a, b, key));
}

fn compare(a: &Breed, b: &Breed, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => collate(&a.record.name, &b.record.name),
        SortKey::Origin => a.record.origin.cmp(&b.record.origin),
        SortKey::Lifespan => b.record.lifespan.max.cmp(&a.record.lifespan.max),
        SortKey::Temperament => a.record.temperament.cmp(&b.record.temperament),
    }
}

/// Case-folded comparison with the raw text as tie-break.
fn collate(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn matches_search(breed: &Breed, needle: &str) -> bool {
    let r = &breed.record;
    contains_folded(&r.name, needle)
        || contains_folded(&r.origin, needle)
        || contains_folded(&r.temperament, needle)
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Filter option sets derived from an in-memory catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    pub origins: Vec<String>,
    pub temperaments: Vec<String>,
    pub coat_lengths: Vec<CoatLength>,
    pub body_types: Vec<BodyType>,
    pub activity_levels: Vec<Level>,
    pub grooming_needs: Vec<Level>,
}

pub fn filter_options(catalog: &[Breed]) -> FilterOptions {
    let mut origins = BTreeSet::new();
    let mut temperaments = BTreeSet::new();
    let mut coat_lengths = BTreeSet::new();
    let mut body_types = BTreeSet::new();
    let mut activity_levels = BTreeSet::new();
    let mut grooming_needs = BTreeSet::new();

    for breed in catalog {
        let r = &breed.record;
        origins.insert(r.origin.trim().to_string());
        temperaments.extend(r.temperament_traits().into_iter().map(str::to_string));
        coat_lengths.insert(r.coat_length);
        body_types.insert(r.body_type);
        activity_levels.insert(r.activity_level);
        grooming_needs.insert(r.grooming_needs);
    }

    FilterOptions {
        origins: origins.into_iter().collect(),
        temperaments: temperaments.into_iter().collect(),
        coat_lengths: coat_lengths.into_iter().collect(),
        body_types: body_types.into_iter().collect(),
        activity_levels: activity_levels.into_iter().collect(),
        grooming_needs: grooming_needs.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::breed::fixtures::{breed, record};
    use crate::models::Bounds;

    fn catalog() -> Vec<Breed> {
        let mut siamese = record("Siamese", "Thailand", "Vocal, Social, Active");
        siamese.activity_level = Level::High;
        siamese.lifespan = Bounds::new(12, 20);

        let mut bengal = record("Bengal", "United States", "Energetic, Playful");
        bengal.activity_level = Level::VeryHigh;
        bengal.lifespan = Bounds::new(12, 16);

        let mut maine = record("Maine Coon", "United States", "Gentle, Playful");
        maine.coat_length = CoatLength::Long;
        maine.lifespan = Bounds::new(12, 15);

        let mut ragdoll = record("Ragdoll", "United States", "Docile, Calm");
        ragdoll.coat_length = CoatLength::SemiLong;
        ragdoll.activity_level = Level::Low;
        ragdoll.lifespan = Bounds::new(12, 16);

        let mut korat = record("Korat", "Thailand", "Active, Playful");
        korat.activity_level = Level::High;
        korat.lifespan = Bounds::new(10, 15);

        vec![
            breed(1, siamese),
            breed(2, bengal),
            breed(3, maine),
            breed(4, ragdoll),
            breed(5, korat),
        ]
    }

    fn names(breeds: &[&Breed]) -> Vec<String> {
        breeds.iter().map(|b| b.record.name.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_all_by_name() {
        let c = catalog();
        let result = run_query(&c, &BreedQuery::default());
        assert_eq!(
            names(&result),
            vec!["Bengal", "Korat", "Maine Coon", "Ragdoll", "Siamese"]
        );
    }

    #[test]
    fn test_blank_search_is_no_constraint() {
        let c = catalog();
        let result = run_query(&c, &BreedQuery::default().search("   "));
        assert_eq!(result.len(), c.len());
    }

    #[test]
    fn test_search_matches_name_origin_or_temperament() {
        let c = catalog();
        assert_eq!(
            names(&run_query(&c, &BreedQuery::default().search("COON"))),
            vec!["Maine Coon"]
        );
        assert_eq!(
            names(&run_query(&c, &BreedQuery::default().search("thai"))),
            vec!["Korat", "Siamese"]
        );
        assert_eq!(
            names(&run_query(&c, &BreedQuery::default().search("docile"))),
            vec!["Ragdoll"]
        );
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let c = catalog();
        let filters = BreedFilters {
            origin: Some("united states".to_string()),
            temperament: Some("playful".to_string()),
            ..Default::default()
        };
        let result = run_query(&c, &BreedQuery::default().filters(filters));
        assert_eq!(names(&result), vec!["Bengal", "Maine Coon"]);
    }

    #[test]
    fn test_filter_order_is_commutative() {
        let c = catalog();
        let by_origin = BreedFilters {
            origin: Some("Thailand".to_string()),
            ..Default::default()
        };
        let by_activity = BreedFilters {
            activity_level: Some(Level::High),
            ..Default::default()
        };

        let origin_first: Vec<&Breed> = c
            .iter()
            .filter(|b| by_origin.matches(b))
            .filter(|b| by_activity.matches(b))
            .collect();
        let activity_first: Vec<&Breed> = c
            .iter()
            .filter(|b| by_activity.matches(b))
            .filter(|b| by_origin.matches(b))
            .collect();
        let combined = run_query(
            &c,
            &BreedQuery::default().filters(BreedFilters {
                origin: Some("Thailand".to_string()),
                activity_level: Some(Level::High),
                ..Default::default()
            }),
        );

        assert_eq!(origin_first, activity_first);
        assert_eq!(names(&combined), vec!["Korat", "Siamese"]);
    }

    #[test]
    fn test_blank_filter_values_ignored() {
        let c = catalog();
        let filters = BreedFilters {
            origin: Some("".to_string()),
            temperament: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(filters.is_empty());
        assert_eq!(run_query(&c, &BreedQuery::default().filters(filters)).len(), 5);
    }

    #[test]
    fn test_enum_filters() {
        let c = catalog();
        let filters = BreedFilters {
            coat_length: Some(CoatLength::SemiLong),
            ..Default::default()
        };
        assert_eq!(
            names(&run_query(&c, &BreedQuery::default().filters(filters))),
            vec!["Ragdoll"]
        );
    }

    #[test]
    fn test_lifespan_sort_descending_and_stable() {
        let c = catalog();
        let result = run_query(&c, &BreedQuery::default().sort(SortKey::Lifespan));
        // Bengal and Ragdoll tie at 16, Maine Coon and Korat at 15: catalog order is kept.
        assert_eq!(
            names(&result),
            vec!["Siamese", "Bengal", "Ragdoll", "Maine Coon", "Korat"]
        );
    }

    #[test]
    fn test_origin_sort_keeps_catalog_order_for_ties() {
        let c = catalog();
        let result = run_query(&c, &BreedQuery::default().sort(SortKey::Origin));
        assert_eq!(
            names(&result),
            vec!["Siamese", "Korat", "Bengal", "Maine Coon", "Ragdoll"]
        );
    }

    #[test]
    fn test_temperament_sort() {
        let c = catalog();
        let result = run_query(&c, &BreedQuery::default().sort(SortKey::Temperament));
        assert_eq!(result[0].record.name, "Korat");
        assert_eq!(result[4].record.name, "Siamese");
    }

    #[test]
    fn test_name_sort_is_idempotent() {
        let c = catalog();
        let once = run_query(&c, &BreedQuery::default());
        let mut twice = once.clone();
        sort_breeds(&mut twice, SortKey::Name);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_name_collation_ignores_case() {
        let c = vec![
            breed(1, record("bombay", "United States", "Calm")),
            breed(2, record("Abyssinian", "Ethiopia", "Active")),
            breed(3, record("Chartreux", "France", "Quiet")),
        ];
        let result = run_query(&c, &BreedQuery::default());
        assert_eq!(names(&result), vec!["Abyssinian", "bombay", "Chartreux"]);
    }

    #[test]
    fn test_filter_options_collects_distinct_values() {
        let c = catalog();
        let options = filter_options(&c);
        assert_eq!(options.origins, vec!["Thailand", "United States"]);
        assert!(options.temperaments.contains(&"Playful".to_string()));
        assert_eq!(
            options.coat_lengths,
            vec![CoatLength::Short, CoatLength::SemiLong, CoatLength::Long]
        );
        assert_eq!(
            options.activity_levels,
            vec![Level::Low, Level::Moderate, Level::High, Level::VeryHigh]
        );
    }

    #[test]
    fn test_sort_key_parses_storage_names() {
        assert_eq!("lifespan".parse::<SortKey>().unwrap(), SortKey::Lifespan);
        assert!("size".parse::<SortKey>().is_err());
    }
}
