use serde::{Deserialize, Serialize};

use crate::json::{camera, mesh, skin, Extras, Index};

/// A node in the node hierarchy.
///
/// The transform is always expressed as decomposed TRS properties; matrix
/// transforms are not emitted. References to meshes, cameras, skins and
/// children are filled in by the writer's second node pass.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Node {
    /// Optional user-defined name for this object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// XYZ translation.
    #[serde(default = "default_translation")]
    pub translation: [f32; 3],

    /// XYZW unit quaternion rotation.
    #[serde(default = "default_rotation")]
    pub rotation: [f32; 4],

    /// XYZ scale.
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],

    /// Morph target weights of the instantiated mesh.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f32>,

    /// The index of the mesh instantiated by this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mesh: Option<Index<mesh::Mesh>>,

    /// The index of the camera referenced by this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<Index<camera::Camera>>,

    /// The index of the skin referenced by this node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin: Option<Index<skin::Skin>>,

    /// The indices of this node's children.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Index<Node>>,

    /// Extension specific data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Extras,

    /// Optional application specific data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

/// The root nodes of a scene.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Scene {
    /// Optional user-defined name for this object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The indices of each root node.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Index<Node>>,

    /// Extension specific data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Extras,

    /// Optional application specific data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}

fn default_translation() -> [f32; 3] {
    [0.0; 3]
}

fn default_rotation() -> [f32; 4] {
    [0.0, 0.0, 0.0, 1.0]
}

fn default_scale() -> [f32; 3] {
    [1.0; 3]
}
