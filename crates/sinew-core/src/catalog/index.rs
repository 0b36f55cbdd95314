//! Catalog index
//!
//! Built once from a structure list and a relationship list. Construction
//! validates referential integrity and builds every secondary index in a single
//! pass, after which the catalog is read-only and safe to share across threads.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::search::{fold, index_key};
use super::structure::{
    MAX_INTRINSIC_DIFFICULTY, MIN_INTRINSIC_DIFFICULTY, Relationship, RelationshipKind, Structure,
};

// ============================================================================
// ERRORS
// ============================================================================

/// Structural-integrity violations found while building a catalog
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Two structures share an identifier
    #[error("Duplicate structure identifier: {0}")]
    DuplicateIdentifier(String),
    /// A relationship endpoint names a structure that does not exist
    #[error("Dangling relationship {from} -> {to}: unknown structure '{missing}'")]
    DanglingRelationship {
        from: String,
        to: String,
        /// The endpoint that could not be resolved
        missing: String,
    },
    /// The source document could not be parsed
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalog result type
pub type Result<T> = std::result::Result<T, LoadError>;

/// Serialized catalog document: `{ "structures": [...], "relationships": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub structures: Vec<Structure>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

// ============================================================================
// CATALOG
// ============================================================================

/// Immutable, queryable index over structures and their relationships
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Structures in insertion order
    structures: Vec<Structure>,
    relationships: Vec<Relationship>,
    by_id: HashMap<String, usize>,
    by_system: HashMap<String, Vec<usize>>,
    by_category: HashMap<String, Vec<usize>>,
    by_tag: HashMap<String, Vec<usize>>,
    by_level: BTreeMap<u8, Vec<usize>>,
    /// Relationship indices touching each structure, in edge-list order
    adjacency: HashMap<String, Vec<usize>>,
    /// Folded searchable names, parallel to `structures`
    search_keys: Vec<Vec<String>>,
    /// Distinct systems in first-seen order
    systems: Vec<String>,
}

impl Catalog {
    /// Validate and index a structure set.
    ///
    /// Fails on the first duplicate identifier, then on the first relationship
    /// whose endpoint is unknown. No partial catalog is ever returned.
    pub fn load(structures: Vec<Structure>, relationships: Vec<Relationship>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(structures.len());
        for (idx, structure) in structures.iter().enumerate() {
            if by_id.insert(structure.id.clone(), idx).is_some() {
                tracing::warn!(id = %structure.id, "Catalog rejected: duplicate identifier");
                return Err(LoadError::DuplicateIdentifier(structure.id.clone()));
            }
        }

        for edge in &relationships {
            let missing = [&edge.from_id, &edge.to_id]
                .into_iter()
                .find(|id| !by_id.contains_key(id.as_str()));
            if let Some(missing) = missing {
                tracing::warn!(
                    from = %edge.from_id,
                    to = %edge.to_id,
                    missing = %missing,
                    "Catalog rejected: dangling relationship"
                );
                return Err(LoadError::DanglingRelationship {
                    from: edge.from_id.clone(),
                    to: edge.to_id.clone(),
                    missing: missing.clone(),
                });
            }
        }

        let mut catalog = Self {
            by_id,
            ..Default::default()
        };

        let mut seen_systems = HashSet::new();
        for (idx, mut structure) in structures.into_iter().enumerate() {
            let clamped = structure
                .difficulty
                .clamp(MIN_INTRINSIC_DIFFICULTY, MAX_INTRINSIC_DIFFICULTY);
            if clamped != structure.difficulty {
                tracing::debug!(
                    id = %structure.id,
                    difficulty = structure.difficulty,
                    "Intrinsic difficulty out of range, clamped"
                );
                structure.difficulty = clamped;
            }

            let system_key = index_key(&structure.system);
            if seen_systems.insert(system_key.clone()) {
                catalog.systems.push(structure.system.clone());
            }
            catalog.by_system.entry(system_key).or_default().push(idx);
            catalog
                .by_category
                .entry(index_key(&structure.category))
                .or_default()
                .push(idx);
            let mut tag_keys: Vec<String> = structure.tags.iter().map(|t| index_key(t)).collect();
            tag_keys.sort_unstable();
            tag_keys.dedup();
            for tag in tag_keys {
                catalog.by_tag.entry(tag).or_default().push(idx);
            }
            catalog.by_level.entry(structure.level).or_default().push(idx);
            catalog
                .search_keys
                .push(structure.names().map(fold).collect());
            catalog.structures.push(structure);
        }

        for (idx, edge) in relationships.iter().enumerate() {
            catalog
                .adjacency
                .entry(edge.from_id.clone())
                .or_default()
                .push(idx);
            if edge.to_id != edge.from_id {
                catalog
                    .adjacency
                    .entry(edge.to_id.clone())
                    .or_default()
                    .push(idx);
            }
        }
        catalog.relationships = relationships;

        tracing::info!(
            structures = catalog.structures.len(),
            relationships = catalog.relationships.len(),
            systems = catalog.systems.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a [`CatalogDocument`] from JSON and [`load`](Self::load) it
    pub fn from_json(document: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(document)?;
        Self::load(document.structures, document.relationships)
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    /// Look up a structure by identifier
    pub fn get(&self, id: &str) -> Option<&Structure> {
        self.by_id.get(id).map(|&idx| &self.structures[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    /// All structures in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.structures.iter()
    }

    /// The raw relationship edge list
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Distinct systems, spelled as first seen, in first-seen order
    pub fn systems(&self) -> &[String] {
        &self.systems
    }

    /// Case- and diacritic-insensitive substring search over name, latin name
    /// and synonyms. Results keep catalog order; a blank term matches nothing.
    pub fn search(&self, term: &str) -> Vec<&Structure> {
        let needle = fold(term.trim());
        if needle.is_empty() {
            return Vec::new();
        }
        self.structures
            .iter()
            .zip(&self.search_keys)
            .filter(|(_, keys)| keys.iter().any(|k| k.contains(&needle)))
            .map(|(structure, _)| structure)
            .collect()
    }

    /// Structures in a body system (case-insensitive)
    pub fn by_system(&self, system: &str) -> Vec<&Structure> {
        self.collect(self.by_system.get(&index_key(system)))
    }

    /// Structures in a category (case-insensitive)
    pub fn by_category(&self, category: &str) -> Vec<&Structure> {
        self.collect(self.by_category.get(&index_key(category)))
    }

    /// Structures carrying a tag (case-insensitive)
    pub fn by_tag(&self, tag: &str) -> Vec<&Structure> {
        self.collect(self.by_tag.get(&index_key(tag)))
    }

    /// Structures at an organizational level
    pub fn by_level(&self, level: u8) -> Vec<&Structure> {
        self.collect(self.by_level.get(&level))
    }

    fn collect(&self, indices: Option<&Vec<usize>>) -> Vec<&Structure> {
        indices
            .map(|v| v.iter().map(|&idx| &self.structures[idx]).collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // GRAPH QUERIES
    // ========================================================================

    /// Edges with `id` as either endpoint, in edge-list order
    pub fn relationships_of(&self, id: &str) -> Vec<&Relationship> {
        self.adjacency
            .get(id)
            .map(|v| v.iter().map(|&idx| &self.relationships[idx]).collect())
            .unwrap_or_default()
    }

    /// One-hop neighbours of `id` in both directions, with the connecting kind.
    ///
    /// A neighbour joined by several edges appears once per edge.
    pub fn related_to(&self, id: &str) -> Vec<(&Structure, RelationshipKind)> {
        self.relationships_of(id)
            .into_iter()
            .filter_map(|edge| {
                let other = edge.other_end(id)?;
                self.get(other).map(|s| (s, edge.kind))
            })
            .collect()
    }

    /// Other structures in the same system as `id`, in catalog order
    pub fn same_system_as(&self, id: &str) -> Vec<&Structure> {
        match self.get(id) {
            Some(target) => self
                .by_system(&target.system)
                .into_iter()
                .filter(|s| s.id != id)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Deterministic wrong-answer candidates for a multiple-choice prompt.
    ///
    /// Related structures come first, then the rest of the same system, then the
    /// remainder of the catalog. Never includes `id` itself, never repeats.
    pub fn distractors_for(&self, id: &str, count: usize) -> Vec<&Structure> {
        if !self.contains(id) || count == 0 {
            return Vec::new();
        }

        let mut seen: HashSet<&str> = HashSet::from([id]);
        let mut picked = Vec::with_capacity(count);

        let related = self.related_to(id).into_iter().map(|(s, _)| s);
        let same_system = self.same_system_as(id).into_iter();
        let everything = self.structures.iter();

        for candidate in related.chain(same_system).chain(everything) {
            if picked.len() == count {
                break;
            }
            if seen.insert(candidate.id.as_str()) {
                picked.push(candidate);
            }
        }
        picked
    }
}

// ============================================================================
// TESTS
// ============================================================================
