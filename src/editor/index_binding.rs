//! Per-slot index binding state machine.
//!
//! One type serves all nine slots; the slot's [FieldId] decides whether new
//! columns append or replace.

use crate::error::BindingError;
use crate::types::{AttributeState, ColumnRef, FieldId, IndexPolicy, IndexSpec};

use super::SelectionToken;

/// Where a slot's index binding currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
  Unset,
  /// The popover offering "inferred" or "select a column" is open.
  ChoiceMenuOpen,
  /// The index input is open for typing.
  DirectEntry,
  AwaitingSelection(SelectionToken),
  Bound,
}

impl BindingState {
  fn for_index(index: &IndexSpec) -> Self {
    if index.is_unset() {
      BindingState::Unset
    } else {
      BindingState::Bound
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      BindingState::Unset => "unset",
      BindingState::ChoiceMenuOpen => "choice menu open",
      BindingState::DirectEntry => "direct entry",
      BindingState::AwaitingSelection(_) => "awaiting selection",
      BindingState::Bound => "bound",
    }
  }

  pub fn is_transient(&self) -> bool {
    matches!(
      self,
      BindingState::ChoiceMenuOpen | BindingState::DirectEntry | BindingState::AwaitingSelection(_)
    )
  }
}

/// Inputs that drive a binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingEvent {
  OpenMenu,
  ChooseInferred,
  ChooseSelectColumn(SelectionToken),
  BeginDirectEntry,
  EnterText(String),
  SelectionArrived(ColumnRef),
  Cancel,
  Clear,
  DropColumn(ColumnRef),
}

impl BindingEvent {
  pub fn name(&self) -> &'static str {
    match self {
      BindingEvent::OpenMenu => "open menu",
      BindingEvent::ChooseInferred => "choose inferred",
      BindingEvent::ChooseSelectColumn(_) => "choose select column",
      BindingEvent::BeginDirectEntry => "begin direct entry",
      BindingEvent::EnterText(_) => "enter index",
      BindingEvent::SelectionArrived(_) => "accept selection",
      BindingEvent::Cancel => "cancel",
      BindingEvent::Clear => "clear",
      BindingEvent::DropColumn(_) => "drop column",
    }
  }
}

/// What the index area of a slot should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexAffordance {
  /// The node does not show index inputs.
  Hidden,
  Add,
  /// A quantitative slot has more values than bound columns.
  MissingIndex,
  Clear,
  ChoiceMenu,
  DirectEntry,
  AwaitingSelection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBinding {
  field: FieldId,
  state: BindingState,
}

impl IndexBinding {
  pub fn new(field: FieldId, index: &IndexSpec) -> Self {
    Self {
      field,
      state: BindingState::for_index(index),
    }
  }

  pub fn field(&self) -> FieldId {
    self.field
  }

  pub fn state(&self) -> BindingState {
    self.state
  }

  pub fn awaiting_token(&self) -> Option<SelectionToken> {
    match self.state {
      BindingState::AwaitingSelection(t) => Some(t),
      _ => None,
    }
  }

  /// Follows an index set from outside. Open menus and pending selections stay open.
  pub fn sync_from(&mut self, index: &IndexSpec) {
    if !self.state.is_transient() {
      self.state = BindingState::for_index(index);
    }
  }

  /// Closes any open menu or pending selection and rests on `index`.
  /// Returns the selection request the binding was waiting on, if any.
  pub fn reset(&mut self, index: &IndexSpec) -> Option<SelectionToken> {
    let released = self.awaiting_token();
    self.state = BindingState::for_index(index);
    released
  }

  fn bind(&self,current: &IndexSpec, column: &ColumnRef) -> IndexSpec {
    match self.field.index_policy() {
      IndexPolicy::Append => current.appended(column),
      IndexPolicy::Replace => IndexSpec::from(column),
    }
  }

  fn reject(&self, event: &BindingEvent) -> BindingError {
    BindingError::InvalidTransition {
      field: self.field,
      state: self.state.name(),
      event: event.name(),
    }
  }

  /// Applies `event` against the slot's current contents.
  ///
  /// Returns the new index when the event changes it.
  pub fn apply(
    &mut self,
    event: BindingEvent,
    current: &AttributeState,
  ) -> Result<Option<IndexSpec>, BindingError> {
    let missing = current.missing_index(self.field.shape());
    let (next, index) = match (&self.state, &event) {
      (BindingState::Unset, BindingEvent::OpenMenu) => (BindingState::ChoiceMenuOpen, None),
      (BindingState::Bound, BindingEvent::OpenMenu) if missing => {
        (BindingState::ChoiceMenuOpen, None)
      }
      (BindingState::ChoiceMenuOpen, BindingEvent::ChooseInferred) => {
        (BindingState::Bound, Some(IndexSpec::inferred()))
      }
      (BindingState::ChoiceMenuOpen, BindingEvent::ChooseSelectColumn(token)) => {
        (BindingState::AwaitingSelection(*token), None)
      }
      (
        BindingState::Unset | BindingState::ChoiceMenuOpen,
        BindingEvent::BeginDirectEntry,
      ) => (BindingState::DirectEntry, None),
      (
        BindingState::DirectEntry | BindingState::Unset | BindingState::Bound,
        BindingEvent::EnterText(text),
      ) => {
        let index = IndexSpec::new(text.trim());
        (BindingState::for_index(&index), Some(index))
      }
      (BindingState::AwaitingSelection(_), BindingEvent::SelectionArrived(column)) => {
        (BindingState::Bound, Some(self.bind(&current.index, column)))
      }
      (
        BindingState::ChoiceMenuOpen
        | BindingState::DirectEntry
        | BindingState::AwaitingSelection(_),
        BindingEvent::Cancel,
      ) => (BindingState::for_index(&current.index), None),
      (BindingState::Bound, BindingEvent::Clear) => (BindingState::Unset, Some(IndexSpec::unset())),
      (_, BindingEvent::DropColumn(column)) => {
        (BindingState::Bound, Some(self.bind(&current.index, column)))
      }
      _ => return Err(self.reject(&event)),
    };
    self.state = next;
    Ok(index)
  }

  pub fn affordance(&self, current: &AttributeState, with_indices: bool) -> IndexAffordance {
    if !with_indices {
      return IndexAffordance::Hidden;
    }
    match self.state {
      BindingState::ChoiceMenuOpen => IndexAffordance::ChoiceMenu,
      BindingState::DirectEntry => IndexAffordance::DirectEntry,
      BindingState::AwaitingSelection(_) => IndexAffordance::AwaitingSelection,
      BindingState::Unset | BindingState::Bound => {
        if current.missing_index(self.field.shape()) {
          IndexAffordance::MissingIndex
        } else if current.index.is_unset() {
          IndexAffordance::Add
        } else {
          IndexAffordance::Clear
        }
      }
    }
  }
}
