//! Serialization core of a glTF 2.0 authoring pipeline.
//!
//! The crate takes an in-memory scene graph of typed properties — a
//! [`graph::Document`] holding meshes, materials, textures, accessors,
//! animations, nodes and scenes — and flattens it into a
//! [`writer::NativeDocument`]: a strictly index-referenced glTF JSON value
//! plus named binary blobs. Raw accessor data is partitioned into a small
//! number of buffer views (index data concatenated, vertex attributes
//! interleaved per primitive, everything else concatenated), packed
//! little-endian with 4-byte alignment, and addressed through one of three
//! packaging modes: external resource files, embedded base64 data URIs, or a
//! single binary container assembled by [`glb::pack`].
//!
//! ```
//! use gltfwrite::graph::{Document, Material};
//! use gltfwrite::writer::{write, WriteOptions};
//!
//! let mut doc = Document::new();
//! doc.create_material(Material {
//!     name: "red".to_string(),
//!     base_color_factor: [1.0, 0.0, 0.0, 1.0],
//!     ..Default::default()
//! });
//!
//! let native = write(&doc, &WriteOptions::new("scene")).unwrap();
//! assert_eq!(native.json["materials"][0]["name"], "red");
//! ```

pub mod error;
pub mod glb;
pub mod graph;
pub mod json;
pub mod writer;

pub use error::{Error, Result};
pub use graph::Document;
pub use writer::{write, Format, NativeDocument, WriteOptions, GLB_BUFFER_URI};
