use crate::forms::Notice;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("record with id: {0} not found")]
  NotFound(uuid::Uuid),

  #[error("storage io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("storage format error: {0}")]
  Json(#[from] serde_json::Error),
}

/// Outcome of a user action that could not be applied.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
  #[error(transparent)]
  Invalid(#[from] Notice),

  #[error(transparent)]
  Store(#[from] StoreError),
}
