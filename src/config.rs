use log::debug;

const BASKET_DEFAULT_STORAGE_DIR: &str = ".basket";
const BASKET_DEFAULT_CONFIG_NAME: &str = ".basket.json";
const BASKET_CONFIG_ENV: &str = "BASKET_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("HOME is not set, can't locate config")]
  NoHome,

  #[error("config io error at {path}: {source}")]
  Io {
    path: String,
    source: std::io::Error,
  },

  #[error("malformed config at {path}: {source}")]
  Json {
    path: String,
    source: serde_json::Error,
  },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Config {
  pub storage_dir_path: String,
}

impl Config {
  /// Reads the config named by `BASKET_CONFIG`, or `~/.basket.json`.
  /// A missing file is created with defaults.
  pub fn load() -> Result<Self, ConfigError> {
    let home = std::env::var("HOME").map_err(|_| ConfigError::NoHome)?;
    let home = std::path::Path::new(home.as_str());

    let config_file_path = match std::env::var(BASKET_CONFIG_ENV) {
      Ok(file_path) => std::path::PathBuf::from(file_path),
      Err(_) => home.join(BASKET_DEFAULT_CONFIG_NAME),
    };

    let default = Self {
      storage_dir_path: home
        .join(BASKET_DEFAULT_STORAGE_DIR)
        .to_string_lossy()
        .into_owned(),
    };

    Self::load_from(&config_file_path, default)
  }

  pub fn load_from(path: &std::path::Path, default: Config) -> Result<Self, ConfigError> {
    let path_str = path.to_string_lossy().into_owned();
    let io_err = |source: std::io::Error| ConfigError::Io {
      path: path_str.clone(),
      source,
    };

    if !path.exists() {
      debug!("writing default config to: {}", path_str);
      let file = std::fs::File::create(path).map_err(io_err)?;
      serde_json::to_writer_pretty(file, &default).map_err(|source| ConfigError::Json {
        path: path_str.clone(),
        source,
      })?;
      return Ok(default);
    }

    let file = std::fs::File::open(path).map_err(io_err)?;
    serde_json::from_reader(file).map_err(|source| ConfigError::Json {
      path: path_str.clone(),
      source,
    })
  }
}
