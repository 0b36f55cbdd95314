//! Structure Catalog
//!
//! In-memory knowledge graph of anatomical structures:
//! - Validated load (unique identifiers, no dangling edges)
//! - O(1) lookup by identifier, secondary indexes by system, category, tag and level
//! - Case/diacritic-insensitive name search
//! - One-hop relationship traversal in both directions

mod index;
mod search;
mod structure;

pub use index::{Catalog, CatalogDocument, LoadError, Result};
pub use search::fold;
pub use structure::{
    DEFAULT_INTRINSIC_DIFFICULTY, MAX_INTRINSIC_DIFFICULTY, MIN_INTRINSIC_DIFFICULTY,
    Relationship, RelationshipKind, Structure,
};
