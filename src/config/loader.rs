use super::Config;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

impl Config {
    /// `NEWSROOM_CONFIG_DIR` (with `~` expansion), else `~/.newsroom`.
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(dir) = std::env::var("NEWSROOM_CONFIG_DIR")
            && !dir.trim().is_empty()
        {
            return Ok(PathBuf::from(shellexpand::tilde(dir.trim()).into_owned()));
        }

        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(home.join(".newsroom"))
    }

    pub fn load_or_init() -> Result<Self> {
        Self::load_or_init_in(&Self::config_dir()?)
    }

    /// Load `config.toml` from `dir`, writing a default one first if missing.
    pub fn load_or_init_in(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE);

        if !dir.exists() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        if !config_path.exists() {
            let config = Self {
                config_path: config_path.clone(),
                ..Self::default()
            };
            config.save()?;
        }

        Self::load_from(&config_path)
    }

    /// Parse `path`, apply env overrides, and validate.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).context("Failed to read config file")?;
        let mut config: Config = toml::from_str(&contents).context("Failed to parse config file")?;
        config.config_path = path.to_path_buf();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
