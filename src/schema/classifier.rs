//! Schema classification: raw document -> (attribute taxonomy, entity taxonomy).
//!
//! Classification is total over its recognized vocabulary and silently partial
//! otherwise: unknown entity roles and logical types are skipped, never raised.

use crate::schema::document::RawSchemaDocument;
use crate::schema::taxonomy::{AttributeCategory, EntityRole, TaxonomyPair};
use tracing::{debug, info};

/// Classify every entity and attribute of `schema`.
pub fn classify(schema: &RawSchemaDocument) -> TaxonomyPair {
    let mut pair = TaxonomyPair::default();
    let mut excluded = 0usize;

    for entity in &schema.entity_list {
        let entity_name = entity.canonical_name.as_deref();

        match (entity.entity_type.as_deref().and_then(EntityRole::from_tag), entity_name) {
            (Some(role), Some(name)) => pair.entities.push(role, name),
            (None, Some(name)) => debug!(
                entity = name,
                entity_type = entity.entity_type.as_deref().unwrap_or(""),
                "Entity dropped: role is neither Fact nor Dimension"
            ),
            (_, None) => debug!("Entity without canonical name skipped"),
        }

        // Attributes are classified regardless of the owning entity's role.
        for attribute in &entity.attribute_list {
            let Some(name) = attribute.canonical_name.as_deref() else {
                debug!(entity = entity_name.unwrap_or(""), "Attribute without canonical name skipped");
                continue;
            };
            let tag = attribute.logical_data_type.as_deref().unwrap_or("");
            match AttributeCategory::from_logical_type(tag) {
                Some(category) => {
                    if !pair.attributes.insert(category, name) {
                        debug!(
                            attribute = name,
                            category = %category,
                            "Attribute already classified; keeping first classification"
                        );
                    }
                }
                None => {
                    excluded += 1;
                    info!(
                        attribute = name,
                        logical_type = tag,
                        "Attribute excluded: unrecognized logical type"
                    );
                }
            }
        }
    }

    debug!(
        entities = pair.entities.len(),
        attributes = pair.attributes.len(),
        excluded,
        "Schema classified"
    );
    pair
}
