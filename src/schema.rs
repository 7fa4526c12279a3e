//! Schema domain: raw data-model documents and their classification into
//! entity-role and attribute logical-type taxonomies.

pub mod classifier;
pub mod document;
pub mod taxonomy;

pub use classifier::classify;
pub use document::{RawAttribute, RawEntity, RawEntityRelation, RawSchemaDocument};
pub use taxonomy::{AttributeCategory, AttributeTaxonomy, EntityRole, EntityTaxonomy, TaxonomyPair};
