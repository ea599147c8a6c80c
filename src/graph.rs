//! The property graph consumed by the writer.
//!
//! A [`Document`] owns one ordered arena per property kind and hands out
//! opaque typed [`Handle`]s. Properties reference each other through handles,
//! which permits shared ownership (one accessor used by several primitives)
//! and cycles (nodes parenting nodes) without reference counting. The writer
//! reads the graph; it never mutates it.

mod handle;
mod property;

pub use handle::Handle;
pub use property::{
    Accessor, Animation, AnimationSampler, Buffer, Camera, Channel, Material, Mesh, MorphTarget,
    Node, Primitive, Projection, Scene, Skin, Texture, TextureInfo, TextureSampler, TextureSlot,
};

/// Identifies one primitive of one mesh.
///
/// Primitives are owned inline by their mesh rather than arena-allocated, so
/// their identity is the pair (mesh, position).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct PrimitiveHandle {
    /// The owning mesh.
    pub mesh: Handle<Mesh>,
    /// Position within the mesh's primitive list.
    pub index: usize,
}

/// A typed edge whose child is an accessor.
///
/// Each variant tags how the referencing parent consumes the accessor. The
/// partitioner treats `Attribute` and `Indices` as the two exclusive roles;
/// every other variant is "other" data packed into the catch-all view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AccessorUse {
    /// Per-vertex attribute of a primitive.
    Attribute { primitive: PrimitiveHandle },
    /// Index stream of a primitive.
    Indices { primitive: PrimitiveHandle },
    /// Morph target displacement of a primitive.
    MorphTarget { primitive: PrimitiveHandle },
    /// Inverse-bind matrices of a skin.
    InverseBindMatrices { skin: Handle<Skin> },
    /// Keyframe input (time) of an animation sampler.
    AnimationInput { animation: Handle<Animation> },
    /// Keyframe output of an animation sampler.
    AnimationOutput { animation: Handle<Animation> },
}

/// A scene-graph document: the root property owning ordered lists of every
/// property kind.
#[derive(Debug, Default)]
pub struct Document {
    buffers: Vec<Buffer>,
    accessors: Vec<Accessor>,
    textures: Vec<Texture>,
    materials: Vec<Material>,
    meshes: Vec<Mesh>,
    cameras: Vec<Camera>,
    nodes: Vec<Node>,
    skins: Vec<Skin>,
    animations: Vec<Animation>,
    scenes: Vec<Scene>,
}

/// Retrieval of arena members by typed handle.
pub trait Get<T> {
    /// Returns the property the handle points at.
    fn get(&self, handle: Handle<T>) -> &T;
}

macro_rules! arena {
    ($field:ident, $ty:ty, $create:ident, $list:ident) => {
        impl Get<$ty> for Document {
            fn get(&self, handle: Handle<$ty>) -> &$ty {
                &self.$field[handle.index()]
            }
        }

        impl Document {
            /// Appends the property to the root listing and returns its handle.
            pub fn $create(&mut self, value: $ty) -> Handle<$ty> {
                let handle = Handle::from_index(self.$field.len());
                self.$field.push(value);
                handle
            }

            /// The root listing, in creation order.
            pub fn $list(&self) -> &[$ty] {
                &self.$field
            }
        }
    };
}

arena!(buffers, Buffer, create_buffer, buffers);
arena!(accessors, Accessor, create_accessor, accessors);
arena!(textures, Texture, create_texture, textures);
arena!(materials, Material, create_material, materials);
arena!(meshes, Mesh, create_mesh, meshes);
arena!(cameras, Camera, create_camera, cameras);
arena!(nodes, Node, create_node, nodes);
arena!(skins, Skin, create_skin, skins);
arena!(animations, Animation, create_animation, animations);
arena!(scenes, Scene, create_scene, scenes);

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the property the handle points at.
    pub fn get<T>(&self, handle: Handle<T>) -> &T
    where
        Self: Get<T>,
    {
        Get::get(self, handle)
    }

    /// Replaces a node, keeping its handle. The only mutation the graph
    /// supports after creation; it exists so cyclic node hierarchies can be
    /// wired up once all handles are known.
    pub fn set_node(&mut self, handle: Handle<Node>, node: Node) {
        self.nodes[handle.index()] = node;
    }

    /// Enumerates every accessor-consuming edge of the graph, in root listing
    /// order of the parents.
    pub fn accessor_uses(&self) -> Vec<(Handle<Accessor>, AccessorUse)> {
        let mut uses = Vec::new();
        for (mesh_index, mesh) in self.meshes.iter().enumerate() {
            for (index, primitive) in mesh.primitives.iter().enumerate() {
                let handle = PrimitiveHandle {
                    mesh: Handle::from_index(mesh_index),
                    index,
                };
                for &accessor in primitive.attributes.values() {
                    uses.push((accessor, AccessorUse::Attribute { primitive: handle }));
                }
                if let Some(indices) = primitive.indices {
                    uses.push((indices, AccessorUse::Indices { primitive: handle }));
                }
                for target in &primitive.targets {
                    for &accessor in target.attributes.values() {
                        uses.push((accessor, AccessorUse::MorphTarget { primitive: handle }));
                    }
                }
            }
        }
        for (index, skin) in self.skins.iter().enumerate() {
            if let Some(matrices) = skin.inverse_bind_matrices {
                let skin = Handle::from_index(index);
                uses.push((matrices, AccessorUse::InverseBindMatrices { skin }));
            }
        }
        for (index, animation) in self.animations.iter().enumerate() {
            let animation_handle = Handle::from_index(index);
            for sampler in &animation.samplers {
                uses.push((
                    sampler.input,
                    AccessorUse::AnimationInput {
                        animation: animation_handle,
                    },
                ));
                uses.push((
                    sampler.output,
                    AccessorUse::AnimationOutput {
                        animation: animation_handle,
                    },
                ));
            }
        }
        uses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::accessor::{ComponentType, Type};

    #[test]
    fn accessor_use_tags() {
        let mut doc = Document::new();
        let buffer = doc.create_buffer(Buffer::default());
        let positions = doc.create_accessor(
            Accessor::new(Type::Vec3, ComponentType::F32, buffer).with_data(vec![0.0; 9]),
        );
        let indices = doc.create_accessor(
            Accessor::new(Type::Scalar, ComponentType::U32, buffer).with_data(vec![0.0, 1.0, 2.0]),
        );
        let mesh = doc.create_mesh(Mesh {
            primitives: vec![Primitive {
                attributes: [("POSITION".to_string(), positions)].into_iter().collect(),
                indices: Some(indices),
                ..Default::default()
            }],
            ..Default::default()
        });

        let uses = doc.accessor_uses();
        let primitive = PrimitiveHandle { mesh, index: 0 };
        assert_eq!(
            uses,
            vec![
                (positions, AccessorUse::Attribute { primitive }),
                (indices, AccessorUse::Indices { primitive }),
            ]
        );
    }
}
