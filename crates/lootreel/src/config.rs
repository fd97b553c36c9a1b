use crate::events::AppEvent;
use crate::settings::ReelSettings;
use async_channel::{Receiver, Sender};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct ItemsConfig {
    /// Line-delimited item list. Defaults to `items.txt` in the data dir.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AudioConfig {
    #[serde(default = "enabled")]
    pub enabled: bool,
}

fn enabled() -> bool {
    true
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub items: ItemsConfig,
    /// Fixed seed for every random draw; entropy when unset.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub reel: ReelSettings,
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

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("org", "lootreel", "lootreel").ok_or(ConfigError::ConfigDirNotFound)
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

pub fn default_items_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_dir().join("items.txt"))
}

impl Config {
    pub fn items_path(&self) -> PathBuf {
        self.items
            .path
            .clone()
            .or_else(|| default_items_path().ok())
            .unwrap_or_else(|| PathBuf::from("items.txt"))
    }
}

/// `LOOTREEL_SEED=7`, `LOOTREEL_REEL__DURATION_MS=2000`: one underscore
/// after the prefix, two between nested keys.
fn environment() -> config::Environment {
    config::Environment::with_prefix("LOOTREEL")
        .prefix_separator("_")
        .separator("__")
}

pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    load_layered(path, environment())
}

fn load_layered(path: &Path, env: config::Environment) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
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

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Notify reports absolute paths, so relative targets are resolved against
/// the working directory before comparing.
fn watch_target(file: PathBuf) -> PathBuf {
    std::path::absolute(&file).unwrap_or(file)
}

/// Forwards changes to `file` as `event` until the receiver goes away.
pub async fn watch_file(file: PathBuf, event: AppEvent, tx: Sender<AppEvent>) {
    let file = watch_target(file);
    let Some(dir) = file.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&dir) {
        log::error!("Failed to create {} for watching: {}", dir.display(), e);
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

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch {}: {}", dir.display(), e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(change) => {
                let meaningful_event = matches!(
                    change.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && change.paths.iter().any(|p| p == &file)
                    && tx.send(event.clone()).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

/// Watches the item file, switching to each path received on `retarget`.
pub async fn watch_items(mut path: PathBuf, retarget: Receiver<PathBuf>, tx: Sender<AppEvent>) {
    loop {
        log::debug!("Watching items at {}", path.display());
        tokio::select! {
            _ = watch_file(path.clone(), AppEvent::ItemsChanged, tx.clone()) => {
                if tx.is_closed() {
                    return;
                }
                // Watching failed; idle until there is another file to try.
                match retarget.recv().await {
                    Ok(next) => path = next,
                    Err(_) => return,
                }
            }
            next = retarget.recv() => match next {
                Ok(next) => path = next,
                Err(_) => {
                    watch_file(path, AppEvent::ItemsChanged, tx).await;
                    return;
                }
            },
        }
    }
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    match get_config_path() {
        Ok(path) => watch_file(path, AppEvent::ConfigReload, tx).await,
        Err(e) => log::error!("Config watcher error: {}", e),
    }
}
