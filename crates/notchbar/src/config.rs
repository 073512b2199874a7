use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notchkit::StripStyle;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct TabLabel(String);

impl TabLabel {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TabConfig {
    pub label: TabLabel,
    pub glyph: Option<String>,
}

impl TabConfig {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: TabLabel::new(label),
            glyph: None,
        }
    }

    /// Explicit glyph, or the label's first letter.
    pub fn glyph(&self) -> String {
        self.glyph
            .clone()
            .filter(|g| !g.is_empty())
            .or_else(|| self.label.chars().next().map(|c| c.to_uppercase().collect()))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub tabs: Vec<TabConfig>,
    pub height: u32,
    pub style: StripStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tabs: ["Home", "Search", "Library", "Profile"]
                .into_iter()
                .map(TabConfig::new)
                .collect(),
            height: 84,
            style: StripStyle::default(),
        }
    }
}

impl Config {
    /// Pads with generic tabs or truncates to exactly `count` tabs.
    pub fn with_segment_count(mut self, count: usize) -> Self {
        let count = count.max(1);
        self.tabs.truncate(count);
        while self.tabs.len() < count {
            let n = self.tabs.len() + 1;
            self.tabs.push(TabConfig::new(format!("Tab {n}")));
        }
        self
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "notchbar", "notchbar")
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs = project_dirs().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("NOTCHBAR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) if c.tabs.is_empty() => {
            log::warn!("No tabs configured, using defaults");
            Config {
                tabs: Config::default().tabs,
                ..c
            }
        }
        Ok(c) => c,
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_config_file_parses() {
        let parsed: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(parsed.height, 84);
        assert_eq!(parsed.tabs.len(), 4);
        assert_eq!(parsed.tabs[0].glyph(), "⌂");
        assert_eq!(parsed.tabs[2].glyph(), "L");
        assert_eq!(parsed.style, StripStyle::default());
    }

    #[test]
    fn test_partial_config() {
        let parsed: Config = serde_json::from_str(
            r#"{ "tabs": [{ "label": "inbox" }], "style": { "travel_duration": 250 } }"#,
        )
        .unwrap();
        assert_eq!(parsed.height, Config::default().height);
        assert_eq!(parsed.tabs[0].label, TabLabel::new("inbox"));
        assert_eq!(parsed.tabs[0].glyph(), "I");
        assert_eq!(parsed.style.travel_duration, Duration::from_millis(250));
    }

    #[test]
    fn test_with_segment_count() {
        let config = Config::default().with_segment_count(6);
        assert_eq!(config.tabs.len(), 6);
        assert_eq!(config.tabs[5].label, TabLabel::new("Tab 6"));

        let config = Config::default().with_segment_count(0);
        assert_eq!(config.tabs.len(), 1);
        assert_eq!(config.tabs[0].label, TabLabel::new("Home"));
    }
}
