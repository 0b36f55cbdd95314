//! Structure and Relationship - the content side of the catalog
//!
//! A structure is authored reference data: it never carries study progress.
//! Progress lives in [`crate::scheduler::MasteryRecord`], joined by identifier.

use serde::{Deserialize, Serialize};

/// Lowest intrinsic difficulty a structure can be authored with
pub const MIN_INTRINSIC_DIFFICULTY: u8 = 1;

/// Highest intrinsic difficulty a structure can be authored with
pub const MAX_INTRINSIC_DIFFICULTY: u8 = 5;

/// Intrinsic difficulty assumed when the source document omits it
pub const DEFAULT_INTRINSIC_DIFFICULTY: u8 = 3;

fn default_difficulty() -> u8 {
    DEFAULT_INTRINSIC_DIFFICULTY
}

// ============================================================================
// STRUCTURE
// ============================================================================

/// A learnable anatomical structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Structure {
    /// Stable identifier, unique within a catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// Owning body system (e.g. "skeletal", "nervous")
    pub system: String,
    /// Category within the system (e.g. "long bone", "cranial nerve")
    pub category: String,
    /// Ordinal organizational level (0 = whole-body region, higher = finer)
    pub level: u8,
    /// Latin (Terminologia Anatomica) name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin_name: Option<String>,
    /// Alternative names searched alongside the display name
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Authoring-time difficulty rating, 1 (easy) to 5 (hard)
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
}

impl Structure {
    /// Create a structure with no latin name, synonyms or tags
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        system: impl Into<String>,
        category: impl Into<String>,
        level: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            system: system.into(),
            category: category.into(),
            level,
            latin_name: None,
            synonyms: Vec::new(),
            tags: Vec::new(),
            difficulty: DEFAULT_INTRINSIC_DIFFICULTY,
        }
    }

    pub fn with_latin_name(mut self, latin_name: impl Into<String>) -> Self {
        self.latin_name = Some(latin_name.into());
        self
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Every name this structure can be found by: display name, latin name, synonyms
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str())
            .chain(self.latin_name.as_deref())
            .chain(self.synonyms.iter().map(String::as_str))
    }
}

// ============================================================================
// RELATIONSHIP KIND
// ============================================================================

/// Kind of edge between two structures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// Source is anatomically part of target
    #[serde(alias = "partOf", alias = "part-of")]
    PartOf,
    /// Source articulates or joins with target
    Connects,
    /// Source (vessel) supplies blood to target
    Supplies,
    /// Source (nerve) innervates target
    Innervates,
    /// Source lies next to target
    #[serde(alias = "adjacentTo", alias = "adjacent-to", alias = "adjacent")]
    AdjacentTo,
}

impl RelationshipKind {
    /// All relationship kinds
    pub const ALL: [RelationshipKind; 5] = [
        RelationshipKind::PartOf,
        RelationshipKind::Connects,
        RelationshipKind::Supplies,
        RelationshipKind::Innervates,
        RelationshipKind::AdjacentTo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::PartOf => "part_of",
            RelationshipKind::Connects => "connects",
            RelationshipKind::Supplies => "supplies",
            RelationshipKind::Innervates => "innervates",
            RelationshipKind::AdjacentTo => "adjacent_to",
        }
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for RelationshipKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "part_of" | "partof" => Ok(RelationshipKind::PartOf),
            "connects" => Ok(RelationshipKind::Connects),
            "supplies" => Ok(RelationshipKind::Supplies),
            "innervates" => Ok(RelationshipKind::Innervates),
            "adjacent_to" | "adjacentto" | "adjacent" => Ok(RelationshipKind::AdjacentTo),
            _ => Err(format!("Unknown relationship kind: {}", s)),
        }
    }
}

// ============================================================================
// RELATIONSHIP
// ============================================================================

/// An edge between two structures in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Source structure id
    #[serde(alias = "from")]
    pub from_id: String,
    /// Target structure id
    #[serde(alias = "to")]
    pub to_id: String,
    /// Kind of relationship
    pub kind: RelationshipKind,
    /// Free-text description shown to the learner
    #[serde(default)]
    pub description: String,
}

impl Relationship {
    pub fn new(
        from_id: impl Into<String>,
        to_id: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            kind,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Whether this edge has `id` as either endpoint
    pub fn touches(&self, id: &str) -> bool {
        self.from_id == id || self.to_id == id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint
    pub fn other_end(&self, id: &str) -> Option<&str> {
        if self.from_id == id {
            Some(&self.to_id)
        } else if self.to_id == id {
            Some(&self.from_id)
        } else {
            None
        }
    }
}
