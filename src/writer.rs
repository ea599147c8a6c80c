//! The writer: flattens a property-graph [`Document`] into glTF JSON plus
//! packed binary resources.
//!
//! One [`write`] call is a pure, single-pass transformation. Sub-writers run
//! bottom-up in dependency order: images, then buffers (accessors, buffer
//! views and packed bytes), then materials, meshes, cameras, nodes, skins,
//! node attachments, animations and scenes. All lookup state lives in a
//! per-call writer context and is discarded on return.

mod pack;
mod partition;
mod postprocess;
mod uri;

use std::collections::HashMap;

use base64::prelude::*;
use indexmap::IndexMap;
use log::warn;

use crate::error::{Error, Result};
use crate::graph::{
    Accessor, Camera, Document, Handle, Material, Mesh, Node, Projection, Skin, Texture,
    TextureSlot,
};
use crate::json::{self, Extras, Index};
use uri::UriGenerator;

/// Reserved URI under which a binary-container buffer blob is stored in
/// [`NativeDocument::resources`]. Never appears in the emitted JSON and never
/// collides with generated resource names.
pub const GLB_BUFFER_URI: &str = "@glb.bin";

/// How the native document packages its binary payload.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Format {
    /// JSON referencing external `.bin`/image resources.
    #[default]
    External,
    /// Self-contained JSON: buffers become base64 data URIs and images move
    /// into buffer views.
    Embedded,
    /// Binary container layout: one buffer, stored raw under
    /// [`GLB_BUFFER_URI`], with images as buffer views.
    Glb,
}

/// Options for one [`write`] invocation.
#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Stem used for generated resource URIs.
    pub basename: String,
    pub format: Format,
}

impl WriteOptions {
    pub fn new(basename: impl Into<String>) -> Self {
        WriteOptions {
            basename: basename.into(),
            format: Format::External,
        }
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}

/// The writer's product: a post-processed glTF JSON value plus named binary
/// resources, ready for an external packager to put on disk.
#[derive(Clone, Debug)]
pub struct NativeDocument {
    pub json: serde_json::Value,
    pub resources: IndexMap<String, Vec<u8>>,
}

/// Serializes the document into a native document.
///
/// The graph is read-only to the writer; concurrent writes over one shared
/// graph are sound as long as the caller does not mutate it.
pub fn write(doc: &Document, options: &WriteOptions) -> Result<NativeDocument> {
    if options.format == Format::Glb && doc.buffers().len() > 1 {
        return Err(Error::GlbBufferCount(doc.buffers().len()));
    }

    let mut ctx = WriterContext::new(doc, options);
    ctx.write_images();
    ctx.write_buffers()?;
    ctx.write_materials();
    ctx.write_meshes();
    ctx.write_cameras();
    ctx.write_nodes();
    ctx.write_skins();
    ctx.write_node_attachments();
    ctx.write_animations();
    ctx.write_scenes();

    let WriterContext {
        json, resources, ..
    } = ctx;
    Ok(NativeDocument {
        json: postprocess::clean(json.to_value()?),
        resources,
    })
}

/// An image recorded during `write_images` whose bytes land in buffer 0 once
/// that buffer is packed.
struct PendingImage {
    /// Position of the def in `json.images`.
    image: usize,
    texture: Handle<Texture>,
}

/// Per-invocation lookup state.
///
/// The index maps translate graph handles into output array positions; the
/// sampler and texture maps deduplicate defs by structural key. Buffer
/// indices flow positionally through the packing pipeline instead of through
/// a map.
struct WriterContext<'a> {
    doc: &'a Document,
    options: &'a WriteOptions,
    json: json::Root,
    resources: IndexMap<String, Vec<u8>>,

    accessor_index: HashMap<Handle<Accessor>, u32>,
    image_index: HashMap<Handle<Texture>, u32>,
    material_index: HashMap<Handle<Material>, u32>,
    mesh_index: HashMap<Handle<Mesh>, u32>,
    camera_index: HashMap<Handle<Camera>, u32>,
    node_index: HashMap<Handle<Node>, u32>,
    skin_index: HashMap<Handle<Skin>, u32>,
    sampler_index: HashMap<json::texture::Sampler, u32>,
    texture_index: HashMap<(u32, u32), u32>,

    pending_images: Vec<PendingImage>,
    buffer_uris: UriGenerator,
    image_uris: UriGenerator,
}

impl<'a> WriterContext<'a> {
    fn new(doc: &'a Document, options: &'a WriteOptions) -> Self {
        WriterContext {
            doc,
            options,
            json: json::Root::default(),
            resources: IndexMap::new(),
            accessor_index: HashMap::new(),
            image_index: HashMap::new(),
            material_index: HashMap::new(),
            mesh_index: HashMap::new(),
            camera_index: HashMap::new(),
            node_index: HashMap::new(),
            skin_index: HashMap::new(),
            sampler_index: HashMap::new(),
            texture_index: HashMap::new(),
            pending_images: Vec::new(),
            buffer_uris: UriGenerator::new(&options.basename, doc.buffers().len() > 1),
            image_uris: UriGenerator::new(&options.basename, doc.textures().len() > 1),
        }
    }

    fn embed(&self) -> bool {
        self.options.format != Format::External
    }

    /// Every root texture becomes exactly one image def. In external mode the
    /// bytes leave through `resources`; otherwise they are queued for buffer 0
    /// and the def is patched with its buffer view during packing.
    fn write_images(&mut self) {
        let doc = self.doc;
        for (index, texture) in doc.textures().iter().enumerate() {
            let handle = Handle::from_index(index);
            let mut def = json::Image {
                buffer_view: None,
                mime_type: None,
                uri: None,
                name: non_empty(&texture.name),
                extensions: texture.extensions.clone(),
                extras: texture.extras.clone(),
            };
            if self.embed() {
                def.mime_type = Some(texture.mime_type.clone());
                self.pending_images.push(PendingImage {
                    image: self.json.images.len(),
                    texture: handle,
                });
            } else {
                let extension = if texture.mime_type == "image/png" {
                    "png"
                } else {
                    "jpeg"
                };
                let uri = self.image_uris.create_uri(texture.uri.as_deref(), extension);
                self.resources.insert(uri.clone(), texture.image.clone());
                def.uri = Some(uri);
            }
            self.image_index
                .insert(handle, self.json.images.len() as u32);
            self.json.images.push(def);
        }
    }

    /// Per-buffer pipeline: partition, pack indices, interleave each
    /// primitive's attributes, pack the rest, append queued image bytes to
    /// buffer 0, then emit the buffer def and its resource entry.
    fn write_buffers(&mut self) -> Result<()> {
        let doc = self.doc;
        let mut uses: HashMap<_, Vec<_>> = HashMap::new();
        for (accessor, use_) in doc.accessor_uses() {
            uses.entry(accessor).or_default().push(use_);
        }

        for (index, buffer) in doc.buffers().iter().enumerate() {
            let handle = Handle::from_index(index);
            let layout = partition::partition_accessors(doc, handle, &uses)?;
            let carries_images = index == 0 && !self.pending_images.is_empty();
            if layout.is_empty() && !carries_images {
                warn!("Skipping empty buffer {:?}.", buffer.name);
                continue;
            }

            let buffer_index = self.json.buffers.len() as u32;
            let mut blob = Vec::new();
            if !layout.indices.is_empty() {
                self.concat_accessors(
                    &layout.indices,
                    buffer_index,
                    &mut blob,
                    Some(json::buffer::Target::ElementArrayBuffer),
                );
            }
            for accessors in layout.attributes.values() {
                self.interleave_accessors(accessors, buffer_index, &mut blob)?;
            }
            if !layout.other.is_empty() {
                self.concat_accessors(&layout.other, buffer_index, &mut blob, None);
            }
            if carries_images {
                self.append_images(buffer_index, &mut blob);
            }
            self.push_buffer_def(
                buffer.uri.as_deref(),
                non_empty(&buffer.name),
                buffer.extras.clone(),
                buffer.extensions.clone(),
                blob,
            );
        }

        // Images queued for embedding with no graph buffer to land in: carry
        // them in an implicit buffer appended after the real ones.
        if !self.pending_images.is_empty() {
            let buffer_index = self.json.buffers.len() as u32;
            let mut blob = Vec::new();
            self.append_images(buffer_index, &mut blob);
            self.push_buffer_def(None, None, None, None, blob);
        }
        Ok(())
    }

    /// Concatenates `accessors` into one tightly packed view, each blob zero
    /// padded to a four byte boundary.
    fn concat_accessors(
        &mut self,
        accessors: &[Handle<Accessor>],
        buffer: u32,
        blob: &mut Vec<u8>,
        target: Option<json::buffer::Target>,
    ) {
        let doc = self.doc;
        let view_index = self.json.buffer_views.len() as u32;
        let view_offset = blob.len() as u64;
        let mut view_length = 0u64;
        for &handle in accessors {
            let accessor = doc.get(handle);
            let mut def = accessor_def(accessor);
            def.buffer_view = Some(Index::new(view_index));
            def.byte_offset = Some(view_length);
            self.accessor_index
                .insert(handle, self.json.accessors.len() as u32);
            self.json.accessors.push(def);

            let bytes = pack::accessor_bytes(accessor);
            view_length += bytes.len() as u64;
            blob.extend_from_slice(&bytes);
        }
        self.json.buffer_views.push(json::buffer::View {
            buffer: Index::new(buffer),
            byte_length: view_length,
            byte_offset: Some(view_offset),
            byte_stride: None,
            target,
            name: None,
            extensions: None,
            extras: None,
        });
    }

    /// Interleaves one primitive's attribute accessors vertex by vertex into
    /// one strided `ARRAY_BUFFER` view.
    fn interleave_accessors(
        &mut self,
        accessors: &[Handle<Accessor>],
        buffer: u32,
        blob: &mut Vec<u8>,
    ) -> Result<()> {
        let doc = self.doc;
        let members: Vec<&Accessor> = accessors.iter().map(|&h| doc.get(h)).collect();
        let count = members[0].count();
        for member in &members[1..] {
            if member.count() != count {
                return Err(Error::InterleaveCountMismatch {
                    expected: count,
                    found: member.count(),
                });
            }
        }

        let view_index = self.json.buffer_views.len() as u32;
        let stride = pack::vertex_stride(&members);
        let mut offset = 0;
        for (&handle, accessor) in accessors.iter().zip(&members) {
            let mut def = accessor_def(accessor);
            def.buffer_view = Some(Index::new(view_index));
            def.byte_offset = Some(offset as u64);
            self.accessor_index
                .insert(handle, self.json.accessors.len() as u32);
            self.json.accessors.push(def);
            offset +=
                pack::align_to_multiple_of_four(accessor.element_size() * accessor.component_size());
        }

        let view_offset = blob.len() as u64;
        blob.extend_from_slice(&pack::interleave_bytes(&members, count, stride));
        self.json.buffer_views.push(json::buffer::View {
            buffer: Index::new(buffer),
            byte_length: (count * stride) as u64,
            byte_offset: Some(view_offset),
            byte_stride: Some(stride as u64),
            target: Some(json::buffer::Target::ArrayBuffer),
            name: None,
            extensions: None,
            extras: None,
        });
        Ok(())
    }

    /// Drains the queued images into untargeted views at the tail of the
    /// buffer, patching each image def with its view index.
    fn append_images(&mut self, buffer: u32, blob: &mut Vec<u8>) {
        let doc = self.doc;
        for pending in std::mem::take(&mut self.pending_images) {
            let image = &doc.get(pending.texture).image;
            let view_index = self.json.buffer_views.len() as u32;
            self.json.buffer_views.push(json::buffer::View {
                buffer: Index::new(buffer),
                byte_length: image.len() as u64,
                byte_offset: Some(blob.len() as u64),
                byte_stride: None,
                target: None,
                name: None,
                extensions: None,
                extras: None,
            });
            self.json.images[pending.image].buffer_view = Some(Index::new(view_index));
            blob.extend_from_slice(image);
            while blob.len() % 4 != 0 {
                blob.push(0);
            }
        }
    }

    /// Emits the buffer def and routes its bytes according to the packaging
    /// mode.
    fn push_buffer_def(
        &mut self,
        preset_uri: Option<&str>,
        name: Option<String>,
        extras: Extras,
        extensions: Extras,
        blob: Vec<u8>,
    ) {
        let mut def = json::Buffer {
            byte_length: blob.len() as u64,
            uri: None,
            name,
            extensions,
            extras,
        };
        match self.options.format {
            Format::Glb => {
                // The sentinel stays on the def until the post-processor so
                // the resource entry and the def cannot drift apart.
                def.uri = Some(GLB_BUFFER_URI.to_string());
                self.resources.insert(GLB_BUFFER_URI.to_string(), blob);
            }
            Format::Embedded => {
                def.uri = Some(format!(
                    "data:application/octet-stream;base64,{}",
                    BASE64_STANDARD.encode(&blob)
                ));
            }
            Format::External => {
                let uri = self.buffer_uris.create_uri(preset_uri, "bin");
                self.resources.insert(uri.clone(), blob);
                def.uri = Some(uri);
            }
        }
        self.json.buffers.push(def);
    }

    fn write_materials(&mut self) {
        let doc = self.doc;
        for (index, material) in doc.materials().iter().enumerate() {
            let alpha_cutoff = (material.alpha_mode == json::material::AlphaMode::Mask)
                .then_some(material.alpha_cutoff);
            let def = json::Material {
                name: non_empty(&material.name),
                alpha_mode: material.alpha_mode,
                alpha_cutoff,
                double_sided: material.double_sided,
                pbr_metallic_roughness: json::material::PbrMetallicRoughness {
                    base_color_factor: material.base_color_factor,
                    base_color_texture: material
                        .base_color_texture
                        .as_ref()
                        .map(|slot| self.texture_info(slot)),
                    metallic_factor: material.metallic_factor,
                    roughness_factor: material.roughness_factor,
                    metallic_roughness_texture: material
                        .metallic_roughness_texture
                        .as_ref()
                        .map(|slot| self.texture_info(slot)),
                },
                normal_texture: material.normal_texture.as_ref().map(|slot| {
                    let info = self.texture_info(slot);
                    json::material::NormalTexture {
                        index: info.index,
                        scale: material.normal_scale,
                        tex_coord: info.tex_coord,
                    }
                }),
                occlusion_texture: material.occlusion_texture.as_ref().map(|slot| {
                    let info = self.texture_info(slot);
                    json::material::OcclusionTexture {
                        index: info.index,
                        strength: material.occlusion_strength,
                        tex_coord: info.tex_coord,
                    }
                }),
                emissive_texture: material
                    .emissive_texture
                    .as_ref()
                    .map(|slot| self.texture_info(slot)),
                emissive_factor: material.emissive_factor,
                extensions: material.extensions.clone(),
                extras: material.extras.clone(),
            };
            self.material_index
                .insert(Handle::from_index(index), self.json.materials.len() as u32);
            self.json.materials.push(def);
        }
    }

    /// Resolves one material texture slot into a texture info, deduplicating
    /// the sampler and texture defs it needs by structural key.
    fn texture_info(&mut self, slot: &TextureSlot) -> json::texture::Info {
        let sampler_def = json::texture::Sampler {
            mag_filter: nonzero(slot.sampler.mag_filter),
            min_filter: nonzero(slot.sampler.min_filter),
            wrap_s: slot.sampler.wrap_s,
            wrap_t: slot.sampler.wrap_t,
        };
        let sampler = match self.sampler_index.get(&sampler_def) {
            Some(&index) => index,
            None => {
                let index = self.json.samplers.len() as u32;
                self.sampler_index.insert(sampler_def.clone(), index);
                self.json.samplers.push(sampler_def);
                index
            }
        };

        let source = self.image_index[&slot.texture];
        let texture = match self.texture_index.get(&(source, sampler)) {
            Some(&index) => index,
            None => {
                let index = self.json.textures.len() as u32;
                self.texture_index.insert((source, sampler), index);
                self.json.textures.push(json::texture::Texture {
                    source: Index::new(source),
                    sampler: Index::new(sampler),
                });
                index
            }
        };

        json::texture::Info {
            index: Index::new(texture),
            tex_coord: slot.info.tex_coord,
            extensions: None,
            extras: None,
        }
    }

    fn write_meshes(&mut self) {
        let doc = self.doc;
        for (index, mesh) in doc.meshes().iter().enumerate() {
            let primitives = mesh
                .primitives
                .iter()
                .map(|primitive| json::mesh::Primitive {
                    attributes: primitive
                        .attributes
                        .iter()
                        .map(|(semantic, accessor)| {
                            (semantic.clone(), Index::new(self.accessor_index[accessor]))
                        })
                        .collect(),
                    mode: primitive.mode,
                    indices: primitive
                        .indices
                        .map(|accessor| Index::new(self.accessor_index[&accessor])),
                    material: primitive
                        .material
                        .map(|material| Index::new(self.material_index[&material])),
                    targets: primitive
                        .targets
                        .iter()
                        .map(|target| {
                            target
                                .attributes
                                .iter()
                                .map(|(semantic, accessor)| {
                                    (semantic.clone(), Index::new(self.accessor_index[accessor]))
                                })
                                .collect()
                        })
                        .collect(),
                    extensions: primitive.extensions.clone(),
                    extras: primitive.extras.clone(),
                })
                .collect();

            // Morph target names ride along as `extras.targetNames`, taken
            // from the first primitive.
            let has_targets = mesh.primitives.iter().any(|p| !p.targets.is_empty());
            let extras = if has_targets {
                let names: Vec<&str> = mesh.primitives[0]
                    .targets
                    .iter()
                    .map(|target| target.name.as_str())
                    .collect();
                with_target_names(&mesh.extras, &names)
            } else {
                mesh.extras.clone()
            };

            let def = json::Mesh {
                name: non_empty(&mesh.name),
                primitives,
                weights: mesh.weights.clone(),
                extensions: mesh.extensions.clone(),
                extras,
            };
            self.mesh_index
                .insert(Handle::from_index(index), self.json.meshes.len() as u32);
            self.json.meshes.push(def);
        }
    }

    fn write_cameras(&mut self) {
        let doc = self.doc;
        for (index, camera) in doc.cameras().iter().enumerate() {
            let mut def = json::Camera {
                name: non_empty(&camera.name),
                type_: match camera.projection {
                    Projection::Perspective { .. } => json::camera::Type::Perspective,
                    Projection::Orthographic { .. } => json::camera::Type::Orthographic,
                },
                perspective: None,
                orthographic: None,
                extensions: camera.extensions.clone(),
                extras: camera.extras.clone(),
            };
            match camera.projection {
                Projection::Perspective {
                    aspect_ratio,
                    yfov,
                    znear,
                    zfar,
                } => {
                    def.perspective = Some(json::camera::Perspective {
                        aspect_ratio,
                        yfov,
                        zfar,
                        znear,
                    });
                }
                Projection::Orthographic {
                    xmag,
                    ymag,
                    znear,
                    zfar,
                } => {
                    def.orthographic = Some(json::camera::Orthographic {
                        xmag,
                        ymag,
                        zfar,
                        znear,
                    });
                }
            }
            self.camera_index
                .insert(Handle::from_index(index), self.json.cameras.len() as u32);
            self.json.cameras.push(def);
        }
    }

    /// First node pass: transforms and weights only. Attachments need the
    /// mesh, camera, skin and node tables, which are complete only after
    /// every node def exists, so they land in a second pass.
    fn write_nodes(&mut self) {
        let doc = self.doc;
        for (index, node) in doc.nodes().iter().enumerate() {
            let def = json::Node {
                name: non_empty(&node.name),
                translation: node.translation,
                rotation: node.rotation,
                scale: node.scale,
                weights: node.weights.clone(),
                mesh: None,
                camera: None,
                skin: None,
                children: Vec::new(),
                extensions: node.extensions.clone(),
                extras: node.extras.clone(),
            };
            self.node_index
                .insert(Handle::from_index(index), self.json.nodes.len() as u32);
            self.json.nodes.push(def);
        }
    }

    fn write_skins(&mut self) {
        let doc = self.doc;
        for (index, skin) in doc.skins().iter().enumerate() {
            let def = json::Skin {
                name: non_empty(&skin.name),
                inverse_bind_matrices: skin
                    .inverse_bind_matrices
                    .map(|accessor| Index::new(self.accessor_index[&accessor])),
                skeleton: skin.skeleton.map(|node| Index::new(self.node_index[&node])),
                joints: skin
                    .joints
                    .iter()
                    .map(|node| Index::new(self.node_index[node]))
                    .collect(),
                extensions: skin.extensions.clone(),
                extras: skin.extras.clone(),
            };
            self.skin_index
                .insert(Handle::from_index(index), self.json.skins.len() as u32);
            self.json.skins.push(def);
        }
    }

    /// Second node pass: mesh, camera and skin attachments plus children.
    fn write_node_attachments(&mut self) {
        let doc = self.doc;
        for (index, node) in doc.nodes().iter().enumerate() {
            let mesh = node.mesh.map(|mesh| Index::new(self.mesh_index[&mesh]));
            let camera = node
                .camera
                .map(|camera| Index::new(self.camera_index[&camera]));
            let skin = node.skin.map(|skin| Index::new(self.skin_index[&skin]));
            let children: Vec<_> = node
                .children
                .iter()
                .map(|child| Index::new(self.node_index[child]))
                .collect();

            let position = self.node_index[&Handle::from_index(index)] as usize;
            let def = &mut self.json.nodes[position];
            def.mesh = mesh;
            def.camera = camera;
            def.skin = skin;
            def.children = children;
        }
    }

    fn write_animations(&mut self) {
        let doc = self.doc;
        for animation in doc.animations() {
            let samplers = animation
                .samplers
                .iter()
                .map(|sampler| json::animation::Sampler {
                    input: Index::new(self.accessor_index[&sampler.input]),
                    interpolation: sampler.interpolation,
                    output: Index::new(self.accessor_index[&sampler.output]),
                })
                .collect();
            let channels = animation
                .channels
                .iter()
                .map(|channel| json::animation::Channel {
                    sampler: Index::new(channel.sampler as u32),
                    target: json::animation::Target {
                        node: Index::new(self.node_index[&channel.target_node]),
                        path: channel.target_path,
                    },
                })
                .collect();
            self.json.animations.push(json::Animation {
                name: non_empty(&animation.name),
                channels,
                samplers,
                extensions: animation.extensions.clone(),
                extras: animation.extras.clone(),
            });
        }
    }

    fn write_scenes(&mut self) {
        let doc = self.doc;
        for scene in doc.scenes() {
            self.json.scenes.push(json::Scene {
                name: non_empty(&scene.name),
                nodes: scene
                    .nodes
                    .iter()
                    .map(|node| Index::new(self.node_index[node]))
                    .collect(),
                extensions: scene.extensions.clone(),
                extras: scene.extras.clone(),
            });
        }
    }
}

/// Generic part of every property def: type, count, bounds, flags, name and
/// the two opaque pass-through slots. Buffer view wiring is the packer's job.
fn accessor_def(accessor: &Accessor) -> json::Accessor {
    json::Accessor {
        buffer_view: None,
        byte_offset: None,
        count: accessor.count() as u64,
        component_type: accessor.component_type,
        type_: accessor.type_,
        normalized: accessor.normalized,
        min: accessor
            .min()
            .map(|values| bounds_value(accessor.component_type, values)),
        max: accessor
            .max()
            .map(|values| bounds_value(accessor.component_type, values)),
        name: non_empty(&accessor.name),
        extensions: accessor.extensions.clone(),
        extras: accessor.extras.clone(),
    }
}

/// Integer component types publish integer bounds; floats stay floats.
fn bounds_value(
    component_type: json::accessor::ComponentType,
    values: Vec<f64>,
) -> serde_json::Value {
    if component_type == json::accessor::ComponentType::F32 {
        serde_json::Value::from(values)
    } else {
        serde_json::Value::from(values.into_iter().map(|v| v as i64).collect::<Vec<i64>>())
    }
}

fn non_empty(name: &str) -> Option<String> {
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// A filter code of zero means unset; nothing is emitted for it.
fn nonzero(value: u32) -> Option<u32> {
    if value == 0 {
        None
    } else {
        Some(value)
    }
}

/// Merges `targetNames` into a mesh's extras bag, preserving whatever the
/// property already carried.
fn with_target_names(extras: &Extras, names: &[&str]) -> Extras {
    let mut map = extras
        .as_ref()
        .and_then(|raw| serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(raw.get()).ok())
        .unwrap_or_default();
    map.insert("targetNames".to_string(), serde_json::json!(names));
    serde_json::value::to_raw_value(&map).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_filters_are_unset() {
        assert_eq!(nonzero(0), None);
        assert_eq!(nonzero(json::texture::LINEAR), Some(9729));
    }

    #[test]
    fn target_names_merge_into_existing_extras() {
        let extras: Extras =
            Some(serde_json::value::to_raw_value(&serde_json::json!({"keep": 1})).unwrap());
        let merged = with_target_names(&extras, &["thin", "wide"]);
        let value: serde_json::Value = serde_json::from_str(merged.unwrap().get()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"keep": 1, "targetNames": ["thin", "wide"]})
        );
    }

    #[test]
    fn integer_accessors_publish_integer_bounds() {
        let bounds = bounds_value(json::accessor::ComponentType::U32, vec![0.0, 41.0]);
        assert_eq!(bounds, serde_json::json!([0, 41]));
        let bounds = bounds_value(json::accessor::ComponentType::F32, vec![0.5]);
        assert_eq!(bounds, serde_json::json!([0.5]));
    }
}
