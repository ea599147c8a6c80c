use serde::{Deserialize, Serialize};

use crate::json::{accessor, scene, Extras, Index};

/// Joints and matrices defining a skin.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Skin {
    /// Optional user-defined name for this object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// The index of the accessor containing the 4x4 inverse-bind matrices.
    ///
    /// When absent, each matrix is assumed to be the 4x4 identity matrix.
    #[serde(rename = "inverseBindMatrices")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse_bind_matrices: Option<Index<accessor::Accessor>>,

    /// The index of the node used as a skeleton root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skeleton: Option<Index<scene::Node>>,

    /// Indices of skeleton nodes used as joints in this skin.
    pub joints: Vec<Index<scene::Node>>,

    /// Extension specific data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Extras,

    /// Optional application specific data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Extras,
}
