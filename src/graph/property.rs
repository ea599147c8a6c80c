use indexmap::IndexMap;

use crate::graph::Handle;
use crate::json::accessor::{ComponentType, Type};
use crate::json::animation::{Interpolation, Property as TargetPath};
use crate::json::material::AlphaMode;
use crate::json::mesh::Mode;
use crate::json::texture::REPEAT;
use crate::json::Extras;

/// Identity container grouping the accessors and images that share one output
/// binary file.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    pub name: String,
    /// When set, the generated output keeps this URI verbatim.
    pub uri: Option<String>,
    pub extras: Extras,
    pub extensions: Extras,
}

/// A typed array of scalars, vectors or matrices backed by a [`Buffer`].
///
/// Element values are held as a flat `f64` scalar stream; `f64` represents
/// every supported component type exactly, so packing is lossless.
#[derive(Clone, Debug)]
pub struct Accessor {
    pub name: String,
    /// Element shape, SCALAR through MAT4.
    pub type_: Type,
    /// Component data type of each element scalar.
    pub component_type: ComponentType,
    /// Whether integer data values map to [0, 1] (or [-1, 1]).
    pub normalized: bool,
    /// The buffer this accessor's bytes are emitted into.
    pub buffer: Handle<Buffer>,
    /// Flat scalar stream, `count() * element_size()` values long.
    pub data: Vec<f64>,
    pub extras: Extras,
    pub extensions: Extras,
}

impl Accessor {
    pub fn new(type_: Type, component_type: ComponentType, buffer: Handle<Buffer>) -> Self {
        Accessor {
            name: String::new(),
            type_,
            component_type,
            normalized: false,
            buffer,
            data: Vec::new(),
            extras: None,
            extensions: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_data(mut self, data: Vec<f64>) -> Self {
        self.data = data;
        self
    }

    pub fn with_normalized(mut self, normalized: bool) -> Self {
        self.normalized = normalized;
        self
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.data.len() / self.element_size()
    }

    /// Components per element.
    pub fn element_size(&self) -> usize {
        self.type_.multiplicity()
    }

    /// Bytes per component.
    pub fn component_size(&self) -> usize {
        self.component_type.size()
    }

    /// Tightly packed byte length of the whole scalar stream.
    pub fn byte_length(&self) -> usize {
        self.data.len() * self.component_size()
    }

    /// Per-component minimum over all elements. `None` when there are no
    /// elements.
    pub fn min(&self) -> Option<Vec<f64>> {
        self.fold_components(f64::min)
    }

    /// Per-component maximum over all elements. `None` when there are no
    /// elements.
    pub fn max(&self) -> Option<Vec<f64>> {
        self.fold_components(f64::max)
    }

    fn fold_components(&self, fold: fn(f64, f64) -> f64) -> Option<Vec<f64>> {
        if self.data.is_empty() {
            return None;
        }
        let size = self.element_size();
        let mut out = self.data[..size].to_vec();
        for element in self.data.chunks_exact(size).skip(1) {
            for (acc, &value) in out.iter_mut().zip(element) {
                *acc = fold(*acc, value);
            }
        }
        Some(out)
    }
}

/// Image bytes plus their MIME type.
#[derive(Clone, Debug)]
pub struct Texture {
    pub name: String,
    /// Encoded image bytes (PNG or JPEG payload).
    pub image: Vec<u8>,
    /// `"image/png"` or `"image/jpeg"`.
    pub mime_type: String,
    /// When set, the generated output keeps this URI verbatim.
    pub uri: Option<String>,
    pub extras: Extras,
    pub extensions: Extras,
}

impl Default for Texture {
    fn default() -> Self {
        Texture {
            name: String::new(),
            image: Vec::new(),
            mime_type: "image/png".to_string(),
            uri: None,
            extras: None,
            extensions: None,
        }
    }
}

/// Per-use-site texture reference data: one per material slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextureInfo {
    /// TEXCOORD set index driving the lookup.
    pub tex_coord: u32,
}

/// Per-use-site filtering and wrapping configuration: one per material slot.
///
/// Values are raw `GLenum` codes; a filter of 0 means unset and produces no
/// JSON field.
#[derive(Clone, Copy, Debug)]
pub struct TextureSampler {
    pub wrap_s: u32,
    pub wrap_t: u32,
    pub min_filter: u32,
    pub mag_filter: u32,
}

impl Default for TextureSampler {
    fn default() -> Self {
        TextureSampler {
            wrap_s: REPEAT,
            wrap_t: REPEAT,
            min_filter: 0,
            mag_filter: 0,
        }
    }
}

/// One material texture slot: the referenced texture plus its per-site info
/// and sampler settings.
#[derive(Clone, Debug)]
pub struct TextureSlot {
    pub texture: Handle<Texture>,
    pub info: TextureInfo,
    pub sampler: TextureSampler,
}

impl TextureSlot {
    pub fn new(texture: Handle<Texture>) -> Self {
        TextureSlot {
            texture,
            info: TextureInfo::default(),
            sampler: TextureSampler::default(),
        }
    }
}

/// Metallic-roughness material.
#[derive(Clone, Debug)]
pub struct Material {
    pub name: String,
    pub base_color_factor: [f32; 4],
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub emissive_factor: [f32; 3],
    pub alpha_mode: AlphaMode,
    /// Only meaningful in `Mask` mode.
    pub alpha_cutoff: f32,
    pub double_sided: bool,
    /// Multiplier for the normal map; 1 is neutral.
    pub normal_scale: f32,
    /// Multiplier for the occlusion map; 1 is neutral.
    pub occlusion_strength: f32,
    pub base_color_texture: Option<TextureSlot>,
    pub metallic_roughness_texture: Option<TextureSlot>,
    pub normal_texture: Option<TextureSlot>,
    pub occlusion_texture: Option<TextureSlot>,
    pub emissive_texture: Option<TextureSlot>,
    pub extras: Extras,
    pub extensions: Extras,
}

impl Default for Material {
    fn default() -> Self {
        Material {
            name: String::new(),
            base_color_factor: [1.0, 1.0, 1.0, 1.0],
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            emissive_factor: [0.0, 0.0, 0.0],
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.5,
            double_sided: false,
            normal_scale: 1.0,
            occlusion_strength: 1.0,
            base_color_texture: None,
            metallic_roughness_texture: None,
            normal_texture: None,
            occlusion_texture: None,
            emissive_texture: None,
            extras: None,
            extensions: None,
        }
    }
}

/// A draw call's worth of geometry within a mesh.
#[derive(Clone, Debug, Default)]
pub struct Primitive {
    /// Semantic name (`POSITION`, `NORMAL`, ...) to accessor, in insertion
    /// order. The interleaved layout follows this order.
    pub attributes: IndexMap<String, Handle<Accessor>>,
    pub indices: Option<Handle<Accessor>>,
    pub material: Option<Handle<Material>>,
    pub mode: Mode,
    pub targets: Vec<MorphTarget>,
    pub extras: Extras,
    pub extensions: Extras,
}

/// An alternate set of attribute deltas blended by weights.
#[derive(Clone, Debug, Default)]
pub struct MorphTarget {
    pub name: String,
    pub attributes: IndexMap<String, Handle<Accessor>>,
}

/// A collection of primitives.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub name: String,
    pub primitives: Vec<Primitive>,
    /// Default morph target weights.
    pub weights: Vec<f32>,
    pub extras: Extras,
    pub extensions: Extras,
}

/// A camera projection.
#[derive(Clone, Debug)]
pub enum Projection {
    Perspective {
        aspect_ratio: Option<f32>,
        yfov: f32,
        znear: f32,
        /// Infinite projection when absent.
        zfar: Option<f32>,
    },
    Orthographic {
        xmag: f32,
        ymag: f32,
        znear: f32,
        zfar: f32,
    },
}

#[derive(Clone, Debug)]
pub struct Camera {
    pub name: String,
    pub projection: Projection,
    pub extras: Extras,
    pub extensions: Extras,
}

impl Camera {
    pub fn new(projection: Projection) -> Self {
        Camera {
            name: String::new(),
            projection,
            extras: None,
            extensions: None,
        }
    }
}

/// A node in the scene hierarchy.
#[derive(Clone, Debug)]
pub struct Node {
    pub name: String,
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
    /// Morph target weights of the instantiated mesh.
    pub weights: Vec<f32>,
    pub mesh: Option<Handle<Mesh>>,
    pub camera: Option<Handle<Camera>>,
    pub skin: Option<Handle<Skin>>,
    pub children: Vec<Handle<Node>>,
    pub extras: Extras,
    pub extensions: Extras,
}

impl Default for Node {
    fn default() -> Self {
        Node {
            name: String::new(),
            translation: [0.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            scale: [1.0; 3],
            weights: Vec::new(),
            mesh: None,
            camera: None,
            skin: None,
            children: Vec::new(),
            extras: None,
            extensions: None,
        }
    }
}

/// Joints and matrices defining a skin.
#[derive(Clone, Debug, Default)]
pub struct Skin {
    pub name: String,
    /// MAT4 accessor holding one inverse-bind matrix per joint.
    pub inverse_bind_matrices: Option<Handle<Accessor>>,
    pub skeleton: Option<Handle<Node>>,
    pub joints: Vec<Handle<Node>>,
    pub extras: Extras,
    pub extensions: Extras,
}

/// A keyframe graph without a target.
#[derive(Clone, Copy, Debug)]
pub struct AnimationSampler {
    /// Keyframe input (time) accessor.
    pub input: Handle<Accessor>,
    /// Keyframe output accessor.
    pub output: Handle<Accessor>,
    pub interpolation: Interpolation,
}

/// Targets an animation sampler at a node property.
#[derive(Clone, Copy, Debug)]
pub struct Channel {
    /// Index into the owning animation's sampler list.
    pub sampler: usize,
    pub target_node: Handle<Node>,
    pub target_path: TargetPath,
}

/// A keyframe animation.
#[derive(Clone, Debug, Default)]
pub struct Animation {
    pub name: String,
    pub channels: Vec<Channel>,
    pub samplers: Vec<AnimationSampler>,
    pub extras: Extras,
    pub extensions: Extras,
}

/// The root nodes shown together.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub name: String,
    pub nodes: Vec<Handle<Node>>,
    pub extras: Extras,
    pub extensions: Extras,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Document;

    #[test]
    fn accessor_min_max_per_component() {
        let mut doc = Document::new();
        let buffer = doc.create_buffer(Buffer::default());
        let accessor = Accessor::new(Type::Vec2, ComponentType::F32, buffer)
            .with_data(vec![1.0, -2.0, -3.0, 4.0, 2.0, 0.5]);
        assert_eq!(accessor.count(), 3);
        assert_eq!(accessor.min(), Some(vec![-3.0, -2.0]));
        assert_eq!(accessor.max(), Some(vec![2.0, 4.0]));
    }

    #[test]
    fn empty_accessor_has_no_bounds() {
        let mut doc = Document::new();
        let buffer = doc.create_buffer(Buffer::default());
        let accessor = Accessor::new(Type::Scalar, ComponentType::U16, buffer);
        assert_eq!(accessor.count(), 0);
        assert_eq!(accessor.min(), None);
        assert_eq!(accessor.max(), None);
    }
}
