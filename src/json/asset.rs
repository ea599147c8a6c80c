use serde::{Deserialize, Serialize};

use crate::json::Extras;

/// Metadata about the glTF asset.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Asset {
    /// A copyright message suitable for display to credit the content creator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,

    /// Tool that generated this glTF model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,

    /// The glTF version of this asset.
    pub version: String,

    /// Extension specific data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Extras,

    /// Optional application specific data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

impl Default for Asset {
    fn default() -> Self {
        Asset {
            copyright: None,
            generator: Some(concat!("gltfwrite v", env!("CARGO_PKG_VERSION")).to_string()),
            version: "2.0".to_string(),
            extensions: None,
            extras: None,
        }
    }
}
