use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

use crate::menu::{DEFAULT_HIGHLIGHT_OFFSET, DEFAULT_ITEM_PADDING, DEFAULT_ITEM_SIZE};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum MenuShape {
    /// Items share the full circle evenly.
    #[strum(to_string = "circle", serialize = "radial")]
    Circle,
    /// Items are spaced as if there were at least eight of them.
    #[default]
    #[strum(to_string = "arc", serialize = "fan")]
    Arc,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum ActivationTrigger {
    #[default]
    #[strum(to_string = "long-press", serialize = "longpress", serialize = "long_press")]
    LongPress,
    #[strum(
        to_string = "pressure-touch",
        serialize = "pressure",
        serialize = "force",
        serialize = "force-touch"
    )]
    PressureTouch,
    #[strum(to_string = "tap")]
    Tap,
    #[strum(to_string = "immediate", serialize = "asap", serialize = "as-soon-as-possible")]
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub shape: MenuShape,
    /// Distance between the touch indicator ring and the items.
    pub item_padding: f64,
    /// How far a highlighted item moves outward.
    pub highlight_offset: f64,
    pub highlight_outward: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            shape: MenuShape::default(),
            item_padding: DEFAULT_ITEM_PADDING,
            highlight_offset: DEFAULT_HIGHLIGHT_OFFSET,
            highlight_outward: false,
        }
    }
}

impl LayoutConfig {
    /// Outward travel actually applied on highlight.
    pub fn effective_highlight_offset(&self) -> f64 {
        if self.highlight_outward {
            self.highlight_offset
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LabelConfig {
    pub font_family: String,
    pub font_size: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font_family: "HelveticaNeue-Thin".to_string(),
            font_size: 13.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ItemConfig {
    pub title: Option<String>,
    pub size: f64,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            title: None,
            size: DEFAULT_ITEM_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub trigger: ActivationTrigger,
    #[serde(default)]
    pub label: LabelConfig,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
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

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "fanmenu", "fanmenu").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("FANMENU")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the user config, falling back to defaults on any failure.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
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
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
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
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
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
    use config::FileFormat;

    fn parse_toml(source: &str) -> Config {
        config::Config::builder()
            .add_source(config::File::from_str(source, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_shape_deserialization() {
        let cases = vec![
            ("\"arc\"", MenuShape::Arc),
            ("\"Fan\"", MenuShape::Arc),
            ("\"CIRCLE\"", MenuShape::Circle),
            ("\"radial\"", MenuShape::Circle),
        ];

        for (json, expected) in cases {
            let deserialized: MenuShape = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_trigger_deserialization() {
        let cases = vec![
            ("\"long-press\"", ActivationTrigger::LongPress),
            ("\"LongPress\"", ActivationTrigger::LongPress),
            ("\"force\"", ActivationTrigger::PressureTouch),
            ("\"pressure-touch\"", ActivationTrigger::PressureTouch),
            ("\"Tap\"", ActivationTrigger::Tap),
            ("\"asap\"", ActivationTrigger::Immediate),
        ];

        for (json, expected) in cases {
            let deserialized: ActivationTrigger = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }

        assert!(serde_json::from_str::<ActivationTrigger>("\"hover\"").is_err());
    }

    #[test]
    fn test_trigger_display_round_trips() {
        for trigger in <ActivationTrigger as strum::IntoEnumIterator>::iter() {
            let parsed: ActivationTrigger = trigger.to_string().parse().unwrap();
            assert_eq!(parsed, trigger);
        }
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_toml("");
        assert_eq!(config, Config::default());
        assert_eq!(config.layout.shape, MenuShape::Arc);
        assert_eq!(config.layout.item_padding, 30.0);
        assert_eq!(config.layout.effective_highlight_offset(), 0.0);
        assert_eq!(config.trigger, ActivationTrigger::LongPress);
    }

    #[test]
    fn test_partial_config() {
        let config = parse_toml(
            r#"
            trigger = "tap"

            [layout]
            shape = "circle"
            highlight_outward = true

            [[items]]
            title = "Share"

            [[items]]
            size = 64.0
            "#,
        );

        assert_eq!(config.trigger, ActivationTrigger::Tap);
        assert_eq!(config.layout.shape, MenuShape::Circle);
        assert_eq!(config.layout.effective_highlight_offset(), 25.0);
        assert_eq!(config.items.len(), 2);
        assert_eq!(config.items[0].title.as_deref(), Some("Share"));
        assert_eq!(config.items[0].size, 50.0);
        assert_eq!(config.items[1].title, None);
        assert_eq!(config.items[1].size, 64.0);
    }

    #[test]
    fn test_default_config_file_parses() {
        let config = parse_toml(DEFAULT_CONFIG);
        assert!(!config.items.is_empty());
        assert_eq!(config.layout, LayoutConfig::default());
    }
}
