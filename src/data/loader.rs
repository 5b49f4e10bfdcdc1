//! Bootstrap input: the monster roster, unleveled hero roster and quest table.
//! Read from JSON or YAML; the format is chosen by file extension.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::monster::{Ability, Element, Rarity};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unable to parse yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unsupported file format '{0}' (expected .json, .yaml or .yml)")]
    UnsupportedFormat(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterEntry {
    pub name: String,
    pub hp: i32,
    pub damage: i32,
    pub cost: i32,
    pub element: Element,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroEntry {
    pub name: String,
    pub hp: i32,
    pub damage: i32,
    pub element: Element,
    pub rarity: Rarity,
    #[serde(default)]
    pub ability: Ability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_id: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    #[serde(default)]
    pub monsters: Vec<MonsterEntry>,
    #[serde(default)]
    pub heroes: Vec<HeroEntry>,
    /// Each quest is a lineup of display names, front first. Heroes use "Name:level".
    #[serde(default)]
    pub quests: Vec<Vec<String>>,
}

impl GameData {
    pub fn from_json_str(raw: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(raw)?)
    }
}

pub fn load_game_data(path: impl AsRef<Path>) -> Result<GameData, LoadError> {
    read_structured(path.as_ref())
}

/// Deserialize a JSON or YAML file into `T`.
pub fn read_structured<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(serde_json::from_str(&raw)?),
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            Ok(serde_yaml::from_str(&raw)?)
        }
        _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}
