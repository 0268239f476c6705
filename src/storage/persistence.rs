/// Durable key-value blob storage behind the stores.
///
/// `load` returns `Ok(None)` when nothing was ever saved under `key`.
pub trait Persistence {
  fn save(&mut self, key: &str, value: &[u8]) -> std::io::Result<()>;
  fn load(&self, key: &str) -> std::io::Result<Option<Vec<u8>>>;
}
