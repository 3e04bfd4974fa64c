use serde::{Deserialize, Deserializer};

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One record of the post manifest (`data/src.json`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PostEntry {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Sub_Title", default, deserialize_with = "null_as_default")]
    pub sub_title: String,
    #[serde(rename = "File_Loc")]
    pub file_loc: String,
    #[serde(rename = "Contributor_Email", default, deserialize_with = "null_as_default")]
    pub contributor_email: Vec<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct VersionTag {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("dark") => ThemeMode::Dark,
            _ => ThemeMode::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}
