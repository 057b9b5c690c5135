//! Response types for the Bangumi API.

use serde::{Deserialize, Deserializer};

/// Upstream sends explicit `null` for unset fields; treat it like a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /v0/search/characters`
#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
pub struct SearchCharacterResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<CharacterRecord>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub limit: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: u32,
}

/// A single search candidate as returned by the API.
#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub birth_year: Option<i32>,
    #[serde(default)]
    pub birth_mon: Option<u8>,
    #[serde(default)]
    pub birth_day: Option<u8>,
    #[serde(default)]
    pub blood_type: Option<u8>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: CharacterImages,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stat: CharacterStat,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locked: bool,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub character_type: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub infobox: Vec<InfoboxItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nsfw: bool,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterImages {
    #[serde(default, deserialize_with = "null_as_default")]
    pub small: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub large: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub medium: String,
}

#[allow(dead_code)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterStat {
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub collects: u32,
}

/// Infobox entry. `value` is either a string or a list of `{k, v}` objects upstream.
#[allow(dead_code)]
#[derive(Debug, Clone, Deserialize)]
pub struct InfoboxItem {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default)]
    pub value: serde_json::Value,
}

/// Normalized character returned to tool callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub name: String,
    pub description: String,
    pub image_url: String,
}

impl From<CharacterRecord> for Character {
    fn from(record: CharacterRecord) -> Self {
        Self {
            name: record.name,
            description: record.summary,
            image_url: record.images.large,
        }
    }
}
