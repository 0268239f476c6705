use log::{debug, error, warn};

use crate::{error::StoreError, traits::Indexable};

use super::persistence::Persistence;

/// An ordered sequence of records kept in memory and rewritten in full to
/// its persistence key after every mutation.
pub struct Collection<T> {
  key: String,
  persistence: Box<dyn Persistence>,
  buffer: Vec<T>,
}

impl<T> Collection<T>
where
  T: Indexable + Clone + serde::de::DeserializeOwned + serde::ser::Serialize,
{
  pub fn new(key: &str, persistence: Box<dyn Persistence>) -> Self {
    let mut collection = Self {
      key: key.to_owned(),
      persistence,
      buffer: Vec::new(),
    };

    collection.restore();

    debug!(
      "restored {} records from: {}",
      collection.buffer.len(),
      collection.key
    );

    return collection;
  }

  pub fn get_by_id(&self, id: uuid::Uuid) -> Option<&T> {
    self.buffer.iter().find(|item| item.id() == id)
  }

  pub fn position_by_id(&self, id: uuid::Uuid) -> Option<usize> {
    self.buffer.iter().position(|item| item.id() == id)
  }

  pub fn all(&self) -> &[T] {
    &self.buffer
  }

  pub fn add(&mut self, item: T) {
    self.buffer.push(item);
    self.flush();
  }

  pub fn remove(&mut self, id: uuid::Uuid) -> Result<T, StoreError> {
    let position = self.position_by_id(id).ok_or(StoreError::NotFound(id))?;
    let removed = self.buffer.remove(position);
    self.flush();

    Ok(removed)
  }

  /// Drops every record with `id`, returns how many went away. Persists
  /// even when nothing matched.
  pub fn remove_all(&mut self, id: uuid::Uuid) -> usize {
    let before = self.buffer.len();
    self.buffer.retain(|item| item.id() != id);
    self.flush();
    before - self.buffer.len()
  }

  pub fn replace(&mut self, item: T) -> Result<(), StoreError> {
    let id = item.id();
    let position = self.position_by_id(id).ok_or(StoreError::NotFound(id))?;

    self.buffer[position] = item;
    self.flush();

    Ok(())
  }

  fn restore(&mut self) {
    let bytes = match self.persistence.load(&self.key) {
      Ok(Some(bytes)) => bytes,
      Ok(None) => {
        debug!("nothing stored under: {}, starting empty", self.key);
        return;
      }
      Err(err) => {
        warn!("can't load {}: {}, starting empty", self.key, err);
        return;
      }
    };

    match serde_json::from_slice(&bytes) {
      Ok(buffer) => self.buffer = buffer,
      Err(err) => warn!("malformed data under {}: {}, starting empty", self.key, err),
    }
  }

  /// Save failures are logged only, memory stays the source of truth.
  fn flush(&mut self) {
    if let Err(err) = self.try_flush() {
      error!("can't save {}: {}", self.key, err);
    }
  }

  fn try_flush(&mut self) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(&self.buffer)?;
    self.persistence.save(&self.key, &bytes)?;
    Ok(())
  }
}
