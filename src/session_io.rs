//! Session scripts and recorded updates on disk (JSON).

use std::path::Path;

use tracing::instrument;

use crate::error::SessionError;
use crate::session::SessionScript;
use crate::types::NodeUpdate;

/// Loads a session script from `path`.
#[instrument(level = "trace", skip(path))]
pub fn load_session(path: &Path) -> Result<SessionScript, SessionError> {
  let bytes = std::fs::read(path)?;
  Ok(serde_json::from_slice(&bytes)?)
}

/// Renders recorded updates as a JSON array.
pub fn render_updates(updates: &[NodeUpdate], pretty: bool) -> Result<String, SessionError> {
  let json = if pretty {
    serde_json::to_string_pretty(updates)?
  } else {
    serde_json::to_string(updates)?
  };
  Ok(json)
}

/// Writes recorded updates to `path`, creating parent directories.
#[instrument(level = "trace", skip(path, updates))]
pub fn save_updates(path: &Path, updates: &[NodeUpdate], pretty: bool) -> Result<(), SessionError> {
  let json = render_updates(updates, pretty)?;
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, json)?;
  Ok(())
}
