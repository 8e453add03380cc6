//! Attribute editing state: buffers, index bindings, column selection and drops.

mod attribute_editor;
#[cfg(test)]
mod attribute_editor_test;
mod drag_drop;
mod index_binding;
mod operator_select;
mod selection;

pub use attribute_editor::{AttributeEditor, EditorOptions, FieldChange};
pub use index_binding::{BindingEvent, BindingState, IndexAffordance, IndexBinding};
pub use operator_select::parse_operator_choice;
pub use selection::{ColumnSelectionBroker, PendingSelection, SelectionToken};
