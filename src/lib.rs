//! # attribute-editor
//!
//! Headless editing state for the typed attributes of workflow graph nodes.
//!
//! ## Architecture
//!
//! - `types`: nodes, attribute shapes, index bindings, operators and drag payloads
//!   in the graph model's JSON wire format.
//! - `editor`: [AttributeEditor] keeps one buffer per attribute slot, commits a full
//!   node on Enter and on teardown, and pushes index changes eagerly. Index binding
//!   runs through one [editor::IndexBinding] state machine per slot; column picks go
//!   through a token based [ColumnSelectionBroker].
//! - `session`: replays scripted input events against a fresh editor, used by the
//!   `replay_session` binary.
//!
//! A rendering layer drives the editor with discrete events and reads its state back
//! (`buffer`, `binding`, `affordance`) to draw inputs.

pub mod editor;
pub mod error;
pub mod session;
pub mod session_io;
pub mod types;

pub use editor::{AttributeEditor, ColumnSelectionBroker, EditorOptions, FieldChange};
pub use error::{EditorError, SessionError};
pub use session::{SessionEvent, SessionScript, replay};
pub use types::{FieldId, IndexSpec, Node, NodeUpdate, NodeUpdateSink, Operator};
