//! Test Data Factory
//!
//! Provides realistic test data for learner journeys:
//! - A small upper-limb anatomy catalog spanning four body systems
//! - Synthetic catalogs for volume tests
//! - Pre-built record scenarios (overdue, mastered)

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use sinew_core::{Catalog, MasteryRecord, Structure};

/// Upper-limb catalog document, in the serialized catalog format
pub const UPPER_LIMB_CATALOG: &str = r#"{
  "structures": [
    {"id": "humerus", "name": "Humerus", "system": "Skeletal", "category": "long bone",
     "level": 2, "latinName": "Os humeri", "tags": ["upper limb", "arm"], "difficulty": 1},
    {"id": "radius", "name": "Radius", "system": "Skeletal", "category": "long bone",
     "level": 2, "tags": ["upper limb", "forearm"], "difficulty": 2},
    {"id": "ulna", "name": "Ulna", "system": "Skeletal", "category": "long bone",
     "level": 2, "tags": ["upper limb", "forearm"], "difficulty": 2},
    {"id": "scapula", "name": "Scapula", "system": "Skeletal", "category": "flat bone",
     "level": 2, "synonyms": ["Shoulder blade"], "tags": ["upper limb", "shoulder"]},
    {"id": "femur", "name": "Femur", "system": "Skeletal", "category": "long bone",
     "level": 2, "synonyms": ["Thigh bone"], "tags": ["lower limb"], "difficulty": 1},
    {"id": "biceps_brachii", "name": "Biceps brachii", "system": "Muscular",
     "category": "skeletal muscle", "level": 2, "latinName": "Musculus biceps brachii",
     "synonyms": ["Biceps"], "tags": ["upper limb", "arm"]},
    {"id": "triceps_brachii", "name": "Triceps brachii", "system": "Muscular",
     "category": "skeletal muscle", "level": 2, "tags": ["upper limb", "arm"]},
    {"id": "deltoid", "name": "Deltoid", "system": "Muscular", "category": "skeletal muscle",
     "level": 2, "tags": ["upper limb", "shoulder"]},
    {"id": "trapezius", "name": "Trapezius", "system": "Muscular",
     "category": "skeletal muscle", "level": 2, "synonyms": ["Trapèze"], "tags": ["back"]},
    {"id": "musculocutaneous_nerve", "name": "Musculocutaneous nerve", "system": "Nervous",
     "category": "peripheral nerve", "level": 3, "tags": ["upper limb"], "difficulty": 4},
    {"id": "radial_nerve", "name": "Radial nerve", "system": "Nervous",
     "category": "peripheral nerve", "level": 3, "latinName": "Nervus radialis",
     "tags": ["upper limb"], "difficulty": 4},
    {"id": "brachial_artery", "name": "Brachial artery", "system": "Cardiovascular",
     "category": "artery", "level": 3, "latinName": "Arteria brachialis",
     "tags": ["upper limb", "arm"], "difficulty": 3}
  ],
  "relationships": [
    {"from": "scapula", "to": "humerus", "kind": "connects", "description": "glenohumeral joint"},
    {"from": "humerus", "to": "radius", "kind": "connects", "description": "humeroradial joint"},
    {"from": "humerus", "to": "ulna", "kind": "connects", "description": "humeroulnar joint"},
    {"from": "radius", "to": "ulna", "kind": "adjacent_to"},
    {"from": "biceps_brachii", "to": "radius", "kind": "connects", "description": "inserts on the radial tuberosity"},
    {"from": "triceps_brachii", "to": "ulna", "kind": "connects", "description": "inserts on the olecranon"},
    {"from": "deltoid", "to": "humerus", "kind": "connects"},
    {"from": "trapezius", "to": "scapula", "kind": "connects"},
    {"from": "musculocutaneous_nerve", "to": "biceps_brachii", "kind": "innervates"},
    {"from": "radial_nerve", "to": "triceps_brachii", "kind": "innervates"},
    {"from": "brachial_artery", "to": "biceps_brachii", "kind": "supplies"},
    {"from": "brachial_artery", "to": "radial_nerve", "kind": "adjacent_to"}
  ]
}"#;

/// Number of structures in [`UPPER_LIMB_CATALOG`]
pub const UPPER_LIMB_STRUCTURES: usize = 12;

/// Factory for creating test data
///
/// # Example
///
/// ```rust,ignore
/// let catalog = TestDataFactory::upper_limb_catalog();
/// let scenario = TestDataFactory::create_overdue_scenario(&catalog, TestDataFactory::epoch());
/// ```
pub struct TestDataFactory;

/// Records prepared for a journey, plus what the journey should expect
#[derive(Debug)]
pub struct TestScenario {
    /// Records keyed by structure id
    pub records: HashMap<String, MasteryRecord>,
    /// Description of the scenario
    pub description: String,
    /// Metadata for test assertions
    pub metadata: HashMap<String, String>,
}

impl TestScenario {
    pub fn expect(&self, key: &str) -> &str {
        self.metadata.get(key).map(String::as_str).unwrap_or_default()
    }

    pub fn expect_usize(&self, key: &str) -> usize {
        self.expect(key).parse().unwrap_or_default()
    }
}

impl TestDataFactory {
    // ========================================================================
    // CLOCK
    // ========================================================================

    /// Fixed reference time every journey starts from
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap()
    }

    // ========================================================================
    // CATALOGS
    // ========================================================================

    /// The upper-limb fixture catalog
    pub fn upper_limb_catalog() -> Catalog {
        Catalog::from_json(UPPER_LIMB_CATALOG).expect("fixture catalog is valid")
    }

    /// A synthetic catalog of `count` structures spread over four systems
    pub fn create_batch(count: usize) -> Catalog {
        let systems = ["Skeletal", "Muscular", "Nervous", "Cardiovascular"];
        let structures = (0..count)
            .map(|i| {
                Structure::new(
                    format!("batch_{:04}", i),
                    format!("Batch structure {}", i),
                    systems[i % systems.len()],
                    "synthetic",
                    (i % 4 + 1) as u8,
                )
            })
            .collect();
        Catalog::load(structures, vec![]).expect("batch ids are unique")
    }

    // ========================================================================
    // RECORDS
    // ========================================================================

    /// A record reviewed `review_count` times, next due at `next_review`
    pub fn create_record(
        structure_id: &str,
        review_count: u32,
        interval_days: u32,
        next_review: DateTime<Utc>,
    ) -> MasteryRecord {
        let mut record = MasteryRecord::new(structure_id);
        record.review_count = review_count;
        record.correct_count = review_count;
        record.interval_days = interval_days;
        record.last_review = Some(next_review - Duration::days(interval_days as i64));
        record.next_review = Some(next_review);
        record
    }

    // ========================================================================
    // SCENARIOS
    // ========================================================================

    /// Every skeletal structure overdue by a different amount; nothing else reviewed
    pub fn create_overdue_scenario(catalog: &Catalog, as_of: DateTime<Utc>) -> TestScenario {
        let records: HashMap<String, MasteryRecord> = catalog
            .by_system("skeletal")
            .into_iter()
            .enumerate()
            .map(|(i, s)| {
                let due = as_of - Duration::days(i as i64 + 1);
                (s.id.clone(), Self::create_record(&s.id, 2, 6, due))
            })
            .collect();

        let mut metadata = HashMap::new();
        metadata.insert("overdue".to_string(), records.len().to_string());
        metadata.insert(
            "never_reviewed".to_string(),
            (catalog.len() - records.len()).to_string(),
        );
        // The oldest overdue skeletal structure is the last in catalog order
        let most_overdue = catalog
            .by_system("skeletal")
            .last()
            .map(|s| s.id.clone())
            .unwrap_or_default();
        metadata.insert("most_overdue".to_string(), most_overdue);

        TestScenario {
            records,
            description: "Skeletal system overdue, the rest unseen".to_string(),
            metadata,
        }
    }

    /// Every structure reviewed and scheduled in the future, spaced a day apart
    pub fn create_mastered_scenario(catalog: &Catalog, as_of: DateTime<Utc>) -> TestScenario {
        let records: HashMap<String, MasteryRecord> = catalog
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let due = as_of + Duration::days(i as i64 + 1);
                (s.id.clone(), Self::create_record(&s.id, 5, 30, due))
            })
            .collect();

        let mut metadata = HashMap::new();
        metadata.insert("due".to_string(), "0".to_string());
        metadata.insert(
            "soonest".to_string(),
            catalog.iter().next().map(|s| s.id.clone()).unwrap_or_default(),
        );

        TestScenario {
            records,
            description: "Whole catalog mastered, nothing due".to_string(),
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_catalog_loads() {
        let catalog = TestDataFactory::upper_limb_catalog();
        assert_eq!(catalog.len(), UPPER_LIMB_STRUCTURES);
        assert_eq!(catalog.relationships().len(), 12);
        assert_eq!(
            catalog.systems(),
            &["Skeletal", "Muscular", "Nervous", "Cardiovascular"]
        );
    }

    #[test]
    fn test_create_batch() {
        let catalog = TestDataFactory::create_batch(20);
        assert_eq!(catalog.len(), 20);
        assert_eq!(catalog.by_system("nervous").len(), 5);
    }

    #[test]
    fn test_overdue_scenario() {
        let catalog = TestDataFactory::upper_limb_catalog();
        let scenario = TestDataFactory::create_overdue_scenario(&catalog, TestDataFactory::epoch());
        assert_eq!(scenario.expect_usize("overdue"), 5);
        assert_eq!(scenario.expect_usize("never_reviewed"), 7);
        assert_eq!(scenario.expect("most_overdue"), "femur");
    }
}
