//! Property graph export model
//!
//! - Records: one node or relationship per export line
//! - Property values: the scalar (and non-scalar) values attached to them

pub mod property;
pub mod record;

// Re-export main types
pub use property::{PropertyMap, PropertyValue};
pub use record::{InputRecord, NodeRecord, RelationshipRecord};
