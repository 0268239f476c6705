use std::io::Write;

use log::debug;

use super::persistence::Persistence;

/// One JSON file per key inside a directory: `<dir>/<key>.json`.
pub struct FilePersistence {
  dir: std::path::PathBuf,
}

impl FilePersistence {
  pub fn new(database_folder: &str) -> std::io::Result<Self> {
    let dir = std::path::Path::new(database_folder).to_path_buf();
    std::fs::create_dir_all(&dir)?;
    debug!("file persistence at: {}", dir.display());
    Ok(Self { dir })
  }

  pub fn path_for(&self, key: &str) -> std::io::Result<std::path::PathBuf> {
    let valid_key = !key.is_empty()
      && key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if !valid_key {
      return Err(std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("invalid storage key: {:?}", key),
      ));
    }
    Ok(self.dir.join(format!("{}.json", key)))
  }
}

impl Persistence for FilePersistence {
  fn save(&mut self, key: &str, value: &[u8]) -> std::io::Result<()> {
    let path = self.path_for(key)?;

    // write next to the target, then rename over it
    let mut tmp_file = tempfile::NamedTempFile::new_in(&self.dir)?;
    tmp_file.write_all(value)?;
    tmp_file.flush()?;
    tmp_file.persist(&path).map_err(|err| err.error)?;

    debug!("saved {} bytes to: {}", value.len(), path.display());
    Ok(())
  }

  fn load(&self, key: &str) -> std::io::Result<Option<Vec<u8>>> {
    let path = self.path_for(key)?;
    match std::fs::read(&path) {
      Ok(bytes) => Ok(Some(bytes)),
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
      Err(err) => Err(err),
    }
  }
}

#[cfg(test)]
mod test {
  use super::{FilePersistence, Persistence};

  fn get_new_persistence() -> (tempfile::TempDir, FilePersistence) {
    let dir = tempfile::Builder::new().prefix("basket").tempdir().unwrap();
    let persistence = FilePersistence::new(dir.path().to_str().unwrap()).unwrap();
    (dir, persistence)
  }

  #[test]
  fn load_missing_key() {
    let (_dir, persistence) = get_new_persistence();
    assert!(persistence.load("items").unwrap().is_none());
  }

  #[test]
  fn save_then_load() {
    let (dir, mut persistence) = get_new_persistence();
    persistence.save("items", b"[1]").unwrap();
    persistence.save("items", b"[]").unwrap();

    assert_eq!(persistence.load("items").unwrap().unwrap(), b"[]".to_vec());
    assert!(dir.path().join("items.json").exists());
  }

  #[test]
  fn reject_path_like_keys() {
    let (_dir, mut persistence) = get_new_persistence();
    persistence
      .save("../items", b"[]")
      .expect_err("key with a path separator shouldn't be saved");
    persistence.load("").expect_err("empty key shouldn't be loaded");
  }
}
