use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::persistence::Persistence;

/// In-memory blobs. Clones share the same map, so a store can be reopened
/// over the data another store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
  blobs: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

impl MemoryPersistence {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
    self.blobs.borrow().get(key).cloned()
  }

  pub fn put_raw(&self, key: &str, value: &[u8]) {
    self
      .blobs
      .borrow_mut()
      .insert(key.to_owned(), value.to_vec());
  }
}

impl Persistence for MemoryPersistence {
  fn save(&mut self, key: &str, value: &[u8]) -> std::io::Result<()> {
    self.put_raw(key, value);
    Ok(())
  }

  fn load(&self, key: &str) -> std::io::Result<Option<Vec<u8>>> {
    Ok(self.raw(key))
  }
}
