use serde::{de, ser, Deserialize, Serialize};
use std::marker::PhantomData;
use std::{fmt, hash};

use crate::json::{
    buffer, texture, Accessor, Animation, Asset, Buffer, Camera, Image, Material, Mesh, Node,
    Scene, Skin, Texture,
};

/// Represents an offset into an array of type `T` owned by the root glTF object.
pub struct Index<T>(u32, PhantomData<fn() -> T>);

/// The root object of a glTF 2.0 asset.
///
/// Array fields serialize unconditionally; pruning empty arrays from the
/// output is the post-processor's responsibility.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Root {
    /// Metadata about the glTF asset.
    pub asset: Asset,

    /// An array of accessors.
    #[serde(default)]
    pub accessors: Vec<Accessor>,

    /// An array of buffer views.
    #[serde(default, rename = "bufferViews")]
    pub buffer_views: Vec<buffer::View>,

    /// An array of buffers.
    #[serde(default)]
    pub buffers: Vec<Buffer>,

    /// An array of images.
    #[serde(default)]
    pub images: Vec<Image>,

    /// An array of samplers.
    #[serde(default)]
    pub samplers: Vec<texture::Sampler>,

    /// An array of textures.
    #[serde(default)]
    pub textures: Vec<Texture>,

    /// An array of materials.
    #[serde(default)]
    pub materials: Vec<Material>,

    /// An array of meshes.
    #[serde(default)]
    pub meshes: Vec<Mesh>,

    /// An array of cameras.
    #[serde(default)]
    pub cameras: Vec<Camera>,

    /// An array of nodes.
    #[serde(default)]
    pub nodes: Vec<Node>,

    /// An array of skins.
    #[serde(default)]
    pub skins: Vec<Skin>,

    /// An array of keyframe animations.
    #[serde(default)]
    pub animations: Vec<Animation>,

    /// An array of scenes.
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

impl Root {
    /// Serialize as a generic JSON value.
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Deserialize from a generic JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

impl<T> Index<T> {
    /// Creates a new `Index` representing an offset into an array containing `T`.
    pub fn new(value: u32) -> Self {
        Index(value, PhantomData)
    }

    /// Returns the internal offset value.
    pub fn value(self) -> usize {
        self.0 as usize
    }
}

// Manual impls so that `Index<T>` is Copy/Eq/Hash regardless of `T`.
impl<T> Clone for Index<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Index<T> {}

impl<T> PartialEq for Index<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Index<T> {}

impl<T> hash::Hash for Index<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<T> fmt::Debug for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T> fmt::Display for Index<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T> ser::Serialize for Index<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_u64(u64::from(self.0))
    }
}

impl<'de, T> de::Deserialize<'de> for Index<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        struct Visitor<T>(PhantomData<fn() -> T>);
        impl<'de, T> de::Visitor<'de> for Visitor<T> {
            type Value = Index<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("index into child of root")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Index::new(value as u32))
            }
        }
        deserializer.deserialize_u64(Visitor::<T>(PhantomData))
    }
}
