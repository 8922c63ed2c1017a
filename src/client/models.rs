//! BreachLock API data models

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Label of the placeholder entry that heads every asset selection list
pub const SELECT_PLACEHOLDER: &str = "Please select an asset";

/// Asset registered with the BreachLock platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Host name shown to the user
    #[serde(rename = "hostname", deserialize_with = "scalar_to_string")]
    pub display_name: String,

    /// Host identifier used by the registration and scan endpoints
    #[serde(rename = "hostid", deserialize_with = "scalar_to_string")]
    pub host_id: String,

    /// Owning organization
    #[serde(rename = "org_id", deserialize_with = "scalar_to_string")]
    pub org_id: String,
}

impl AssetRecord {
    #[cfg(test)]
    pub fn new(
        display_name: impl Into<String>,
        host_id: impl Into<String>,
        org_id: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            host_id: host_id.into(),
            org_id: org_id.into(),
        }
    }
}

/// Assets from a single listing response, in the order the platform sent them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetList {
    assets: Vec<AssetRecord>,
}

#[cfg(test)]
impl AssetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assets(&self) -> &[AssetRecord] {
        &self.assets
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

impl AssetList {
    pub fn into_inner(self) -> Vec<AssetRecord> {
        self.assets
    }

    /// Project into selectable options, placeholder first.
    ///
    /// The placeholder is present even when the list is empty.
    pub fn to_select_options(&self) -> Vec<SelectOption> {
        std::iter::once(SelectOption::placeholder())
            .chain(self.assets.iter().map(SelectOption::from))
            .collect()
    }
}

impl From<Vec<AssetRecord>> for AssetList {
    fn from(assets: Vec<AssetRecord>) -> Self {
        Self { assets }
    }
}

/// One entry of an asset selection list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    pub fn placeholder() -> Self {
        Self::new(SELECT_PLACEHOLDER, "")
    }

    pub fn is_placeholder(&self) -> bool {
        self.label == SELECT_PLACEHOLDER && self.value.is_empty()
    }
}

impl From<&AssetRecord> for SelectOption {
    fn from(asset: &AssetRecord) -> Self {
        Self::new(asset.display_name.clone(), asset.host_id.clone())
    }
}

/// Accept any JSON scalar (`"42"`, `42`, `4.2`, `true`) as text
fn scalar_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct Visitor;

    impl serde::de::Visitor<'_> for Visitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(Visitor)
}
