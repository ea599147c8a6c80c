use serde::{de, ser, Deserialize, Serialize};
use std::fmt;

use crate::json::{texture, Extras, Index};

/// All valid alpha modes.
pub const VALID_ALPHA_MODES: &[&str] = &["OPAQUE", "MASK", "BLEND"];

/// The alpha rendering mode of a material.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlphaMode {
    /// The alpha value is ignored and the rendered output is fully opaque.
    Opaque,

    /// The rendered output is either fully opaque or fully transparent depending on
    /// the alpha value and the specified alpha cutoff value.
    Mask,

    /// The alpha value is used to determine the transparency of the rendered output.
    Blend,
}

/// The material appearance of a primitive.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Material {
    /// Optional user-defined name for this object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The alpha rendering mode of the material.
    #[serde(default, rename = "alphaMode")]
    pub alpha_mode: AlphaMode,

    /// The alpha cutoff value of the material.
    ///
    /// Only meaningful, and only emitted, in `Mask` mode.
    #[serde(rename = "alphaCutoff")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha_cutoff: Option<f32>,

    /// Specifies whether the material is double-sided.
    #[serde(default, rename = "doubleSided")]
    pub double_sided: bool,

    /// The metallic-roughness material model parameters.
    #[serde(default, rename = "pbrMetallicRoughness")]
    pub pbr_metallic_roughness: PbrMetallicRoughness,

    /// A tangent space normal map.
    #[serde(rename = "normalTexture")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_texture: Option<NormalTexture>,

    /// The occlusion map texture.
    #[serde(rename = "occlusionTexture")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occlusion_texture: Option<OcclusionTexture>,

    /// The emissive map texture.
    #[serde(rename = "emissiveTexture")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissive_texture: Option<texture::Info>,

    /// The emissive color of the material.
    #[serde(default, rename = "emissiveFactor")]
    pub emissive_factor: [f32; 3],

    /// Extension specific data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Extras,

    /// Optional application specific data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

/// A set of parameter values that are used to define the metallic-roughness
/// material model from Physically-Based Rendering (PBR) methodology.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PbrMetallicRoughness {
    /// The material's base color factor.
    #[serde(rename = "baseColorFactor", default = "default_base_color_factor")]
    pub base_color_factor: [f32; 4],

    /// The base color texture.
    #[serde(rename = "baseColorTexture")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_color_texture: Option<texture::Info>,

    /// The metalness of the material.
    #[serde(rename = "metallicFactor", default = "default_strength")]
    pub metallic_factor: f32,

    /// The roughness of the material.
    #[serde(rename = "roughnessFactor", default = "default_strength")]
    pub roughness_factor: f32,

    /// The metallic-roughness texture.
    #[serde(rename = "metallicRoughnessTexture")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metallic_roughness_texture: Option<texture::Info>,
}

/// Defines the normal texture of a material.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NormalTexture {
    /// The index of the texture.
    pub index: Index<texture::Texture>,

    /// The scalar multiplier applied to each normal vector of the texture.
    ///
    /// Omitted when exactly 1.
    #[serde(default = "default_strength", skip_serializing_if = "is_one")]
    pub scale: f32,

    /// The set index of the texture's `TEXCOORD` attribute.
    #[serde(default, rename = "texCoord")]
    pub tex_coord: u32,
}

/// Defines the occlusion texture of a material.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OcclusionTexture {
    /// The index of the texture.
    pub index: Index<texture::Texture>,

    /// The scalar multiplier controlling the amount of occlusion applied.
    ///
    /// Omitted when exactly 1.
    #[serde(default = "default_strength", skip_serializing_if = "is_one")]
    pub strength: f32,

    /// The set index of the texture's `TEXCOORD` attribute.
    #[serde(default, rename = "texCoord")]
    pub tex_coord: u32,
}

fn default_base_color_factor() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

fn default_strength() -> f32 {
    1.0
}

fn is_one(value: &f32) -> bool {
    *value == 1.0
}

impl Default for PbrMetallicRoughness {
    fn default() -> Self {
        PbrMetallicRoughness {
            base_color_factor: default_base_color_factor(),
            base_color_texture: None,
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            metallic_roughness_texture: None,
        }
    }
}

impl Default for AlphaMode {
    fn default() -> Self {
        AlphaMode::Opaque
    }
}

impl AlphaMode {
    fn as_str(self) -> &'static str {
        match self {
            AlphaMode::Opaque => "OPAQUE",
            AlphaMode::Mask => "MASK",
            AlphaMode::Blend => "BLEND",
        }
    }
}

impl ser::Serialize for AlphaMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> de::Deserialize<'de> for AlphaMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor;
        impl<'de> de::Visitor<'de> for Visitor {
            type Value = AlphaMode;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "any of: {:?}", VALID_ALPHA_MODES)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(match value {
                    "OPAQUE" => AlphaMode::Opaque,
                    "MASK" => AlphaMode::Mask,
                    "BLEND" => AlphaMode::Blend,
                    _ => return Err(E::invalid_value(de::Unexpected::Str(value), &self)),
                })
            }
        }
        deserializer.deserialize_str(Visitor)
    }
}
