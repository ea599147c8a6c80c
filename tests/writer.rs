//!
//! End-to-end tests of the writer: documents go in, the emitted JSON value
//! and resource blobs are checked field by field.
//!

use base64::prelude::*;
use byteorder::{ByteOrder, LE};
use serde_json::json;

use gltfwrite::graph::{
    Accessor, Animation, AnimationSampler, Buffer, Camera, Channel, Document, Material, Mesh,
    MorphTarget, Node, Primitive, Projection, Scene, Skin, Texture, TextureSampler, TextureSlot,
};
use gltfwrite::json::accessor::{ComponentType, Type};
use gltfwrite::json::animation::{Interpolation, Property};
use gltfwrite::json::material::AlphaMode;
use gltfwrite::json::texture::{CLAMP_TO_EDGE, LINEAR, NEAREST, REPEAT};
use gltfwrite::{write, Error, Format, WriteOptions, GLB_BUFFER_URI};

fn external() -> WriteOptions {
    WriteOptions::new("scene")
}

fn png() -> Texture {
    Texture {
        image: vec![0x89, b'P', b'N', b'G', 0, 1, 2],
        mime_type: "image/png".to_string(),
        ..Default::default()
    }
}

fn triangle(doc: &mut Document) -> (gltfwrite::graph::Handle<Buffer>, Primitive) {
    let buffer = doc.create_buffer(Buffer::default());
    let positions = doc.create_accessor(
        Accessor::new(Type::Vec3, ComponentType::F32, buffer)
            .with_data(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]),
    );
    let primitive = Primitive {
        attributes: [("POSITION".to_string(), positions)].into_iter().collect(),
        ..Default::default()
    };
    (buffer, primitive)
}

#[test]
fn minimal_material() {
    let mut doc = Document::new();
    doc.create_material(Material {
        base_color_factor: [1.0, 0.0, 0.0, 1.0],
        alpha_mode: AlphaMode::Mask,
        alpha_cutoff: 0.25,
        double_sided: true,
        ..Default::default()
    });

    let native = write(&doc, &external()).unwrap();
    assert_eq!(
        native.json["materials"][0],
        json!({
            "alphaMode": "MASK",
            "alphaCutoff": 0.25,
            "doubleSided": true,
            "pbrMetallicRoughness": {
                "baseColorFactor": [1.0, 0.0, 0.0, 1.0],
                "metallicFactor": 1.0,
                "roughnessFactor": 1.0,
            },
            "emissiveFactor": [0.0, 0.0, 0.0],
        })
    );
    assert!(native.resources.is_empty());
}

#[test]
fn alpha_cutoff_requires_mask_mode() {
    let mut doc = Document::new();
    doc.create_material(Material {
        alpha_cutoff: 0.25,
        ..Default::default()
    });

    let native = write(&doc, &external()).unwrap();
    assert_eq!(native.json["materials"][0]["alphaMode"], "OPAQUE");
    assert!(native.json["materials"][0].get("alphaCutoff").is_none());
}

#[test]
fn shared_sampler_and_texture_are_deduplicated() {
    let mut doc = Document::new();
    let image = doc.create_texture(png());
    let sampler = TextureSampler {
        wrap_s: CLAMP_TO_EDGE,
        wrap_t: REPEAT,
        min_filter: NEAREST,
        mag_filter: LINEAR,
    };
    for _ in 0..2 {
        let mut slot = TextureSlot::new(image);
        slot.sampler = sampler;
        doc.create_material(Material {
            base_color_texture: Some(slot),
            ..Default::default()
        });
    }

    let native = write(&doc, &external()).unwrap();
    assert_eq!(native.json["samplers"].as_array().unwrap().len(), 1);
    assert_eq!(native.json["textures"].as_array().unwrap().len(), 1);
    assert_eq!(native.json["images"].as_array().unwrap().len(), 1);
    assert_eq!(
        native.json["samplers"][0],
        json!({
            "magFilter": LINEAR,
            "minFilter": NEAREST,
            "wrapS": CLAMP_TO_EDGE,
            "wrapT": REPEAT,
        })
    );
    assert_eq!(native.json["textures"][0], json!({"source": 0, "sampler": 0}));
    for index in 0..2 {
        assert_eq!(
            native.json["materials"][index]["pbrMetallicRoughness"]["baseColorTexture"],
            json!({"index": 0, "texCoord": 0})
        );
    }
}

#[test]
fn distinct_samplers_fork_texture_defs() {
    let mut doc = Document::new();
    let image = doc.create_texture(png());
    for wrap_s in [REPEAT, CLAMP_TO_EDGE] {
        let mut slot = TextureSlot::new(image);
        slot.sampler.wrap_s = wrap_s;
        doc.create_material(Material {
            base_color_texture: Some(slot),
            ..Default::default()
        });
    }

    let native = write(&doc, &external()).unwrap();
    assert_eq!(native.json["samplers"].as_array().unwrap().len(), 2);
    assert_eq!(native.json["textures"].as_array().unwrap().len(), 2);
    assert_eq!(native.json["images"].as_array().unwrap().len(), 1);
}

#[test]
fn zero_filters_are_omitted() {
    let mut doc = Document::new();
    let image = doc.create_texture(png());
    doc.create_material(Material {
        base_color_texture: Some(TextureSlot::new(image)),
        ..Default::default()
    });

    let native = write(&doc, &external()).unwrap();
    assert_eq!(
        native.json["samplers"][0],
        json!({"wrapS": REPEAT, "wrapT": REPEAT})
    );
}

#[test]
fn normal_scale_and_occlusion_strength_are_omitted_iff_one() {
    let mut doc = Document::new();
    let image = doc.create_texture(png());
    doc.create_material(Material {
        normal_texture: Some(TextureSlot::new(image)),
        occlusion_texture: Some(TextureSlot::new(image)),
        ..Default::default()
    });
    doc.create_material(Material {
        normal_scale: 0.5,
        occlusion_strength: 0.25,
        normal_texture: Some(TextureSlot::new(image)),
        occlusion_texture: Some(TextureSlot::new(image)),
        ..Default::default()
    });

    let native = write(&doc, &external()).unwrap();
    let neutral = &native.json["materials"][0];
    assert!(neutral["normalTexture"].get("scale").is_none());
    assert!(neutral["occlusionTexture"].get("strength").is_none());
    let scaled = &native.json["materials"][1];
    assert_eq!(scaled["normalTexture"]["scale"], 0.5);
    assert_eq!(scaled["occlusionTexture"]["strength"], 0.25);
}

#[test]
fn interleaved_primitive_layout() {
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer::default());
    let positions = doc.create_accessor(
        Accessor::new(Type::Vec3, ComponentType::F32, buffer)
            .with_data(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]),
    );
    let normals = doc.create_accessor(
        Accessor::new(Type::Vec3, ComponentType::F32, buffer)
            .with_data(vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0, 0.0, 0.0]),
    );
    doc.create_mesh(Mesh {
        primitives: vec![Primitive {
            attributes: [
                ("POSITION".to_string(), positions),
                ("NORMAL".to_string(), normals),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        }],
        ..Default::default()
    });

    let native = write(&doc, &external()).unwrap();
    assert_eq!(
        native.json["bufferViews"],
        json!([{
            "buffer": 0,
            "byteLength": 72,
            "byteOffset": 0,
            "byteStride": 24,
            "target": 34962,
        }])
    );
    assert_eq!(
        native.json["accessors"][0],
        json!({
            "bufferView": 0,
            "byteOffset": 0,
            "count": 3,
            "componentType": 5126,
            "type": "VEC3",
            "min": [1.0, 2.0, 3.0],
            "max": [7.0, 8.0, 9.0],
        })
    );
    assert_eq!(native.json["accessors"][1]["byteOffset"], 12);
    assert_eq!(
        native.json["meshes"][0]["primitives"][0],
        json!({"attributes": {"POSITION": 0, "NORMAL": 1}, "mode": 4})
    );
    assert_eq!(native.json["buffers"][0]["byteLength"], 72);
    assert_eq!(native.resources["scene.bin"].len(), 72);

    // Vertex 1 of POSITION sits one stride in.
    let blob = &native.resources["scene.bin"];
    assert_eq!(LE::read_f32(&blob[24..]), 4.0);
    // Vertex 0 of NORMAL sits at its interleave offset.
    assert_eq!(LE::read_f32(&blob[12 + 8..]), 1.0);
}

#[test]
fn indices_concatenate_into_an_element_array_view() {
    let mut doc = Document::new();
    let (buffer, mut primitive) = triangle(&mut doc);
    let indices = doc.create_accessor(
        Accessor::new(Type::Scalar, ComponentType::U16, buffer).with_data(vec![0.0, 1.0, 2.0]),
    );
    primitive.indices = Some(indices);
    doc.create_mesh(Mesh {
        primitives: vec![primitive],
        ..Default::default()
    });

    let native = write(&doc, &external()).unwrap();
    // Packing order: index view first, then the interleaved attribute view.
    assert_eq!(
        native.json["bufferViews"][0],
        json!({"buffer": 0, "byteLength": 8, "byteOffset": 0, "target": 34963})
    );
    assert_eq!(native.json["bufferViews"][1]["byteOffset"], 8);
    assert_eq!(native.json["bufferViews"][1]["target"], 34962);

    let index_def = &native.json["accessors"][0];
    assert_eq!(index_def["componentType"], 5123);
    assert_eq!(index_def["min"], json!([0]));
    assert_eq!(index_def["max"], json!([2]));
    assert_eq!(native.json["meshes"][0]["primitives"][0]["indices"], 0);

    // Three u16 indices plus two bytes of padding, little endian.
    let blob = &native.resources["scene.bin"];
    assert_eq!(&blob[0..8], &[0, 0, 1, 0, 2, 0, 0, 0]);
}

#[test]
fn morph_targets_pack_as_other_data_and_name_themselves() {
    let mut doc = Document::new();
    let (buffer, mut primitive) = triangle(&mut doc);
    let displacements = doc.create_accessor(
        Accessor::new(Type::Vec3, ComponentType::F32, buffer).with_data(vec![0.5; 9]),
    );
    primitive.targets = vec![MorphTarget {
        name: "smile".to_string(),
        attributes: [("POSITION".to_string(), displacements)]
            .into_iter()
            .collect(),
    }];
    doc.create_mesh(Mesh {
        primitives: vec![primitive],
        weights: vec![0.5],
        ..Default::default()
    });

    let native = write(&doc, &external()).unwrap();
    let views = native.json["bufferViews"].as_array().unwrap();
    assert_eq!(views.len(), 2);
    // The displacement accessor lands in the untargeted catch-all view.
    assert!(views[1].get("target").is_none());
    assert!(views[1].get("byteStride").is_none());

    let mesh = &native.json["meshes"][0];
    assert_eq!(mesh["primitives"][0]["targets"], json!([{"POSITION": 1}]));
    assert_eq!(mesh["weights"], json!([0.5]));
    assert_eq!(mesh["extras"], json!({"targetNames": ["smile"]}));
}

#[test]
fn glb_single_buffer() {
    let mut doc = Document::new();
    let (_, primitive) = triangle(&mut doc);
    doc.create_mesh(Mesh {
        primitives: vec![primitive],
        ..Default::default()
    });
    doc.create_texture(png());

    let options = WriteOptions::new("scene").with_format(Format::Glb);
    let native = write(&doc, &options).unwrap();

    assert_eq!(native.resources.len(), 1);
    let blob = &native.resources[GLB_BUFFER_URI];
    assert_eq!(
        native.json["buffers"][0],
        json!({"byteLength": blob.len()})
    );

    let image = &native.json["images"][0];
    assert!(image.get("uri").is_none());
    assert_eq!(image["mimeType"], "image/png");
    // The image view trails the attribute view within buffer 0.
    let view = image["bufferView"].as_u64().unwrap() as usize;
    let views = native.json["bufferViews"].as_array().unwrap();
    assert_eq!(view, views.len() - 1);
    assert_eq!(views[view]["byteLength"], 7);
    let offset = views[view]["byteOffset"].as_u64().unwrap() as usize;
    assert_eq!(offset % 4, 0);
    assert_eq!(&blob[offset..offset + 7], &png().image[..]);

    let glb = gltfwrite::glb::pack(&native).unwrap();
    assert_eq!(&glb[0..4], b"glTF");
    assert_eq!(LE::read_u32(&glb[8..]) as usize, glb.len());
}

#[test]
fn glb_rejects_multiple_buffers() {
    let mut doc = Document::new();
    doc.create_buffer(Buffer::default());
    doc.create_buffer(Buffer::default());

    let options = WriteOptions::new("scene").with_format(Format::Glb);
    assert!(matches!(
        write(&doc, &options),
        Err(Error::GlbBufferCount(2))
    ));
}

#[test]
fn embedded_buffers_become_data_uris() {
    let mut doc = Document::new();
    let (_, primitive) = triangle(&mut doc);
    doc.create_mesh(Mesh {
        primitives: vec![primitive],
        ..Default::default()
    });
    doc.create_texture(png());

    let options = WriteOptions::new("scene").with_format(Format::Embedded);
    let native = write(&doc, &options).unwrap();

    assert!(native.resources.is_empty());
    let uri = native.json["buffers"][0]["uri"].as_str().unwrap();
    let payload = uri
        .strip_prefix("data:application/octet-stream;base64,")
        .unwrap();
    let blob = BASE64_STANDARD.decode(payload).unwrap();
    assert_eq!(
        blob.len() as u64,
        native.json["buffers"][0]["byteLength"].as_u64().unwrap()
    );
    // Interleaved vertex data first, image bytes behind it.
    assert_eq!(LE::read_f32(&blob[0..]), 1.0);
    assert!(native.json["images"][0].get("uri").is_none());
    assert_eq!(native.json["images"][0]["bufferView"], 1);
}

#[test]
fn embedded_images_without_buffers_get_an_implicit_buffer() {
    let mut doc = Document::new();
    doc.create_texture(png());

    let options = WriteOptions::new("scene").with_format(Format::Embedded);
    let native = write(&doc, &options).unwrap();

    let buffers = native.json["buffers"].as_array().unwrap();
    assert_eq!(buffers.len(), 1);
    assert_eq!(buffers[0]["byteLength"], 8); // 7 image bytes padded to 8
    assert_eq!(native.json["images"][0]["bufferView"], 0);
}

#[test]
fn external_multi_buffer_naming() {
    let mut doc = Document::new();
    for _ in 0..2 {
        let buffer = doc.create_buffer(Buffer::default());
        doc.create_accessor(
            Accessor::new(Type::Scalar, ComponentType::F32, buffer).with_data(vec![1.0]),
        );
    }

    let native = write(&doc, &external()).unwrap();
    let keys: Vec<_> = native.resources.keys().cloned().collect();
    assert_eq!(keys, vec!["scene_1.bin", "scene_2.bin"]);
    assert_eq!(native.json["buffers"][0]["uri"], "scene_1.bin");
    assert_eq!(native.json["buffers"][1]["uri"], "scene_2.bin");
}

#[test]
fn empty_buffer_is_skipped_and_later_indices_stay_correct() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut doc = Document::new();
    let first = doc.create_buffer(Buffer::default());
    doc.create_buffer(Buffer {
        name: "hollow".to_string(),
        ..Default::default()
    });
    let third = doc.create_buffer(Buffer::default());
    doc.create_accessor(
        Accessor::new(Type::Scalar, ComponentType::F32, first).with_data(vec![1.0]),
    );
    doc.create_accessor(
        Accessor::new(Type::Scalar, ComponentType::F32, third).with_data(vec![2.0]),
    );

    let native = write(&doc, &external()).unwrap();
    assert_eq!(native.json["buffers"].as_array().unwrap().len(), 2);
    // The second emitted view belongs to the second emitted buffer.
    assert_eq!(native.json["bufferViews"][1]["buffer"], 1);
    assert_eq!(native.resources.len(), 2);
}

#[test]
fn preset_uris_take_precedence() {
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer {
        uri: Some("payload.bin".to_string()),
        ..Default::default()
    });
    doc.create_accessor(
        Accessor::new(Type::Scalar, ComponentType::F32, buffer).with_data(vec![1.0]),
    );
    doc.create_texture(Texture {
        uri: Some("existing.png".to_string()),
        ..png()
    });

    let native = write(&doc, &external()).unwrap();
    assert_eq!(native.json["buffers"][0]["uri"], "payload.bin");
    assert_eq!(native.json["images"][0]["uri"], "existing.png");
    assert!(native.resources.contains_key("payload.bin"));
    assert!(native.resources.contains_key("existing.png"));
}

#[test]
fn jpeg_textures_get_a_jpeg_extension() {
    let mut doc = Document::new();
    doc.create_texture(Texture {
        image: vec![0xff, 0xd8, 0xff],
        mime_type: "image/jpeg".to_string(),
        ..Default::default()
    });

    let native = write(&doc, &external()).unwrap();
    assert_eq!(native.json["images"][0]["uri"], "scene.jpeg");
}

#[test]
fn empty_document_serializes_to_asset_only() {
    let doc = Document::new();
    let native = write(&doc, &external()).unwrap();
    let root = native.json.as_object().unwrap();
    assert_eq!(root.keys().collect::<Vec<_>>(), vec!["asset"]);
    assert_eq!(native.json["asset"]["version"], "2.0");
}

#[test]
fn interleave_count_mismatch_is_fatal() {
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer::default());
    let positions = doc.create_accessor(
        Accessor::new(Type::Vec3, ComponentType::F32, buffer).with_data(vec![0.0; 9]),
    );
    let normals = doc.create_accessor(
        Accessor::new(Type::Vec3, ComponentType::F32, buffer).with_data(vec![0.0; 6]),
    );
    doc.create_mesh(Mesh {
        primitives: vec![Primitive {
            attributes: [
                ("POSITION".to_string(), positions),
                ("NORMAL".to_string(), normals),
            ]
            .into_iter()
            .collect(),
            ..Default::default()
        }],
        ..Default::default()
    });

    assert!(matches!(
        write(&doc, &external()),
        Err(Error::InterleaveCountMismatch {
            expected: 3,
            found: 2
        })
    ));
}

#[test]
fn accessor_role_conflict_is_fatal() {
    let mut doc = Document::new();
    let buffer = doc.create_buffer(Buffer::default());
    let accessor = doc.create_accessor(
        Accessor::new(Type::Scalar, ComponentType::U32, buffer).with_data(vec![0.0, 1.0, 2.0]),
    );
    doc.create_mesh(Mesh {
        primitives: vec![Primitive {
            attributes: [("_IDS".to_string(), accessor)].into_iter().collect(),
            indices: Some(accessor),
            ..Default::default()
        }],
        ..Default::default()
    });

    assert!(matches!(
        write(&doc, &external()),
        Err(Error::AccessorRoleConflict { .. })
    ));
}

#[test]
fn full_scene_wiring() {
    let mut doc = Document::new();
    let (buffer, mut primitive) = triangle(&mut doc);
    let material = doc.create_material(Material {
        name: "skin".to_string(),
        ..Default::default()
    });
    primitive.material = Some(material);
    let mesh = doc.create_mesh(Mesh {
        name: "body".to_string(),
        primitives: vec![primitive],
        ..Default::default()
    });
    let camera = doc.create_camera(Camera::new(Projection::Perspective {
        aspect_ratio: Some(1.5),
        yfov: 0.75,
        znear: 0.25,
        zfar: None,
    }));

    let joint = doc.create_node(Node {
        name: "joint".to_string(),
        translation: [0.0, 2.0, 0.0],
        ..Default::default()
    });
    let matrices = doc.create_accessor(
        Accessor::new(Type::Mat4, ComponentType::F32, buffer).with_data(vec![1.0; 16]),
    );
    let skin = doc.create_skin(Skin {
        inverse_bind_matrices: Some(matrices),
        skeleton: Some(joint),
        joints: vec![joint],
        ..Default::default()
    });
    let body = doc.create_node(Node {
        name: "body".to_string(),
        mesh: Some(mesh),
        skin: Some(skin),
        children: vec![joint],
        ..Default::default()
    });
    let eye = doc.create_node(Node {
        name: "eye".to_string(),
        camera: Some(camera),
        ..Default::default()
    });

    let input = doc.create_accessor(
        Accessor::new(Type::Scalar, ComponentType::F32, buffer).with_data(vec![0.0, 1.0]),
    );
    let output = doc.create_accessor(
        Accessor::new(Type::Vec3, ComponentType::F32, buffer).with_data(vec![0.0; 6]),
    );
    doc.create_animation(Animation {
        name: "bob".to_string(),
        samplers: vec![AnimationSampler {
            input,
            output,
            interpolation: Interpolation::Linear,
        }],
        channels: vec![Channel {
            sampler: 0,
            target_node: joint,
            target_path: Property::Translation,
        }],
        ..Default::default()
    });
    doc.create_scene(Scene {
        name: "main".to_string(),
        nodes: vec![body, eye],
        ..Default::default()
    });

    let native = write(&doc, &external()).unwrap();
    let json = &native.json;

    assert_eq!(json["nodes"][0]["name"], "joint");
    assert_eq!(json["nodes"][0]["translation"], json!([0.0, 2.0, 0.0]));
    assert_eq!(json["nodes"][1]["mesh"], 0);
    assert_eq!(json["nodes"][1]["skin"], 0);
    assert_eq!(json["nodes"][1]["children"], json!([0]));
    assert_eq!(json["nodes"][2]["camera"], 0);

    assert_eq!(json["skins"][0]["joints"], json!([0]));
    assert_eq!(json["skins"][0]["skeleton"], 0);
    let ibm = json["skins"][0]["inverseBindMatrices"].as_u64().unwrap();
    assert_eq!(json["accessors"][ibm as usize]["type"], "MAT4");

    assert_eq!(
        json["cameras"][0],
        json!({
            "type": "perspective",
            "perspective": {"aspectRatio": 1.5, "yfov": 0.75, "znear": 0.25},
        })
    );

    assert_eq!(json["meshes"][0]["primitives"][0]["material"], 0);
    assert_eq!(json["scenes"][0], json!({"name": "main", "nodes": [1, 2]}));

    let animation = &json["animations"][0];
    assert_eq!(animation["channels"][0]["sampler"], 0);
    assert_eq!(animation["channels"][0]["target"], json!({"node": 0, "path": "translation"}));
    let sampler = &animation["samplers"][0];
    assert_eq!(sampler["interpolation"], "LINEAR");
    let input_index = sampler["input"].as_u64().unwrap() as usize;
    assert_eq!(json["accessors"][input_index]["count"], 2);

    // Every index field stays within bounds of its target array.
    let accessor_count = json["accessors"].as_array().unwrap().len() as u64;
    for view in json["bufferViews"].as_array().unwrap() {
        assert!(view["buffer"].as_u64().unwrap() < json["buffers"].as_array().unwrap().len() as u64);
        assert_eq!(view["byteOffset"].as_u64().unwrap_or(0) % 4, 0);
    }
    for accessor in json["accessors"].as_array().unwrap() {
        let view = accessor["bufferView"].as_u64().unwrap();
        assert!(view < json["bufferViews"].as_array().unwrap().len() as u64);
    }
    assert!(ibm < accessor_count);
}

#[test]
fn output_parses_back_into_typed_defs() {
    let mut doc = Document::new();
    let (_, primitive) = triangle(&mut doc);
    doc.create_mesh(Mesh {
        primitives: vec![primitive],
        ..Default::default()
    });
    // Two textures force numbered image URIs.
    doc.create_texture(png());
    doc.create_texture(png());

    let native = write(&doc, &external()).unwrap();
    let root = gltfwrite::json::Root::from_value(native.json.clone()).unwrap();
    assert_eq!(root.meshes.len(), 1);
    assert_eq!(root.images.len(), 2);
    assert_eq!(root.images[0].uri.as_deref(), Some("scene_1.png"));
    assert_eq!(root.accessors[0].count, 3);
}
