use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;
use wheelkit::wheel::DEFAULT_VALUE;
use wheelkit::{ValidationError, Wheel, WheelItem};

/// Named colors a template can assign to its items.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ItemColor {
    Red,
    Orange,
    Yellow,
    Green,
    Teal,
    Blue,
    Indigo,
    Violet,
}

impl ItemColor {
    pub fn srgba(self) -> Srgba<f64> {
        let (r, g, b) = match self {
            Self::Red => (0.86, 0.30, 0.27),
            Self::Orange => (0.92, 0.56, 0.22),
            Self::Yellow => (0.93, 0.80, 0.26),
            Self::Green => (0.37, 0.72, 0.36),
            Self::Teal => (0.22, 0.68, 0.66),
            Self::Blue => (0.26, 0.50, 0.85),
            Self::Indigo => (0.37, 0.33, 0.74),
            Self::Violet => (0.63, 0.33, 0.72),
        };
        Srgba::new(r, g, b, 1.0)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemConfig {
    pub name: String,
    pub color: ItemColor,
    /// Starting value; items default to 10 when omitted.
    pub value: Option<u8>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub items: Vec<ItemConfig>,
}

fn default_title() -> String {
    "Wheel of Life".to_string()
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("Invalid wheel template: {0}")]
    Wheel(#[from] ValidationError),
}

impl Config {
    /// Builds the wheel template this config describes. Item-count and
    /// value bounds are enforced by the wheel model itself.
    pub fn build_wheel(&self) -> Result<Wheel, ConfigError> {
        let items = self
            .items
            .iter()
            .map(|item| {
                WheelItem::with_value(
                    item.name.clone(),
                    item.color.srgba(),
                    item.value.unwrap_or(DEFAULT_VALUE),
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Wheel::new(Wheel::UNSAVED, self.title.clone(), items)?)
    }
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "lifewheel", "lifewheel").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("LIFEWHEEL"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the configured wheel template, falling back to the built-in
/// default when the config is missing or invalid.
pub fn load_or_setup() -> Wheel {
    match load_config().and_then(|c| c.build_wheel()) {
        Ok(wheel) => wheel,
        Err(e) => {
            log::warn!("Falling back to the default wheel: {}", e);
            default_wheel()
        }
    }
}

fn default_wheel() -> Wheel {
    let items = [
        ("Health", ItemColor::Green),
        ("Career", ItemColor::Blue),
        ("Money", ItemColor::Teal),
        ("Family", ItemColor::Orange),
        ("Friends", ItemColor::Yellow),
        ("Growth", ItemColor::Violet),
        ("Leisure", ItemColor::Indigo),
        ("Environment", ItemColor::Red),
    ]
    .into_iter()
    .map(|(name, color)| WheelItem::new(name, color.srgba()))
    .collect();

    Wheel::new(Wheel::UNSAVED, default_title(), items)
        .expect("the built-in template has a valid item count")
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
            log::error!("Failed to create watcher: {}", e);
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

    #[test]
    fn test_item_color_deserialization() {
        let cases = vec![
            ("\"teal\"", ItemColor::Teal),
            ("\"Teal\"", ItemColor::Teal),
            ("\"TEAL\"", ItemColor::Teal),
            ("\"red\"", ItemColor::Red),
            ("\"Violet\"", ItemColor::Violet),
        ];

        for (json, expected) in cases {
            let deserialized: ItemColor = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_default_config_builds_a_full_wheel() {
        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let wheel = config.build_wheel().unwrap();
        assert_eq!(wheel.len(), 8);
        assert_eq!(wheel.title().as_ref(), "Wheel of Life");
        assert_eq!(wheel.sector(7).unwrap().end, 360);
    }

    #[test]
    fn test_undersized_templates_are_rejected() {
        let config = Config {
            title: "tiny".to_string(),
            items: vec![ItemConfig {
                name: "only one".to_string(),
                color: ItemColor::Blue,
                value: None,
            }],
        };
        assert!(matches!(
            config.build_wheel(),
            Err(ConfigError::Wheel(ValidationError::TooFewItems(1)))
        ));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let config = Config {
            title: "bad".to_string(),
            items: vec![
                ItemConfig {
                    name: "ok".to_string(),
                    color: ItemColor::Green,
                    value: Some(5),
                },
                ItemConfig {
                    name: "broken".to_string(),
                    color: ItemColor::Red,
                    value: Some(12),
                },
            ],
        };
        assert!(matches!(
            config.build_wheel(),
            Err(ConfigError::Wheel(ValidationError::ValueOutOfRange(12)))
        ));
    }
}
