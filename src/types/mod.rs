//! Data types shared between the editor and the graph model.
//!
//! Nodes arrive and leave as serde JSON in the graph model's wire shape.

mod attribute;
mod drag_payload;
mod field_id;
pub(crate) mod index_spec;
mod node;
mod node_update;
pub(crate) mod operator;

pub use attribute::{AttributeState, SimpleAttribute, ValOp, ValOpAttribute};
pub use drag_payload::DragPayload;
pub use field_id::{AttributeShape, FieldId, IndexPolicy};
pub use index_spec::{ColumnRef, INFERRED_MARKER, IndexSpec, SEGMENT_SEPARATOR};
pub use node::{Node, NodeType, SlotMut, SlotRef};
pub use node_update::{FnSink, NodeUpdate, NodeUpdateSink};
pub use operator::Operator;
