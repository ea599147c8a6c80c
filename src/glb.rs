//! In-memory assembly of the binary glTF (GLB) container.
//!
//! A native document written with [`Format::Glb`] keeps its single buffer
//! blob in `resources` under [`GLB_BUFFER_URI`]; this module folds that pair
//! into the two-chunk GLB v2 layout.
//!
//! [`Format::Glb`]: crate::writer::Format::Glb

use byteorder::{WriteBytesExt, LE};

use crate::error::{Error, Result};
use crate::writer::{NativeDocument, GLB_BUFFER_URI};

/// `"glTF"` in ASCII.
const MAGIC: u32 = 0x4654_6c67;

const VERSION: u32 = 2;

/// `"JSON"` chunk type.
const CHUNK_JSON: u32 = 0x4e4f_534a;

/// `"BIN\0"` chunk type.
const CHUNK_BIN: u32 = 0x004e_4942;

/// Packs a native document into a single GLB blob.
///
/// The JSON chunk is padded with spaces, the BIN chunk with zeros, both to
/// four byte boundaries. A document without a buffer packs to a JSON-only
/// container. Documents holding external resources cannot be packed.
pub fn pack(native: &NativeDocument) -> Result<Vec<u8>> {
    if native.resources.keys().any(|uri| uri != GLB_BUFFER_URI) {
        return Err(Error::Unsupported(
            "external resources cannot be packed into a binary container",
        ));
    }

    let mut json = serde_json::to_vec(&native.json)?;
    while json.len() % 4 != 0 {
        json.push(b' ');
    }

    let bin = native.resources.get(GLB_BUFFER_URI);
    let bin_length = bin.map_or(0, |blob| align_to_multiple_of_four(blob.len()));
    let mut total = 12 + 8 + json.len();
    if bin.is_some() {
        total += 8 + bin_length;
    }

    let mut out = Vec::with_capacity(total);
    out.write_u32::<LE>(MAGIC).unwrap();
    out.write_u32::<LE>(VERSION).unwrap();
    out.write_u32::<LE>(total as u32).unwrap();

    out.write_u32::<LE>(json.len() as u32).unwrap();
    out.write_u32::<LE>(CHUNK_JSON).unwrap();
    out.extend_from_slice(&json);

    if let Some(blob) = bin {
        out.write_u32::<LE>(bin_length as u32).unwrap();
        out.write_u32::<LE>(CHUNK_BIN).unwrap();
        out.extend_from_slice(blob);
        out.resize(total, 0);
    }
    Ok(out)
}

fn align_to_multiple_of_four(n: usize) -> usize {
    (n + 3) & !3
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::ByteOrder;
    use indexmap::IndexMap;

    fn native(resources: IndexMap<String, Vec<u8>>) -> NativeDocument {
        NativeDocument {
            json: serde_json::json!({"asset": {"version": "2.0"}}),
            resources,
        }
    }

    #[test]
    fn chunks_are_framed_and_padded() {
        let mut resources = IndexMap::new();
        resources.insert(GLB_BUFFER_URI.to_string(), vec![1u8, 2, 3]);
        let glb = pack(&native(resources)).unwrap();

        assert_eq!(&glb[0..4], b"glTF");
        assert_eq!(LE::read_u32(&glb[4..]), 2);
        assert_eq!(LE::read_u32(&glb[8..]) as usize, glb.len());
        assert_eq!(glb.len() % 4, 0);

        let json_length = LE::read_u32(&glb[12..]) as usize;
        assert_eq!(json_length % 4, 0);
        assert_eq!(&glb[16..20], b"JSON");

        let bin_header = 20 + json_length;
        assert_eq!(LE::read_u32(&glb[bin_header..]), 4);
        assert_eq!(&glb[bin_header + 4..bin_header + 8], b"BIN\0");
        assert_eq!(&glb[bin_header + 8..], &[1, 2, 3, 0]);
    }

    #[test]
    fn missing_buffer_packs_json_only() {
        let glb = pack(&native(IndexMap::new())).unwrap();
        let json_length = LE::read_u32(&glb[12..]) as usize;
        assert_eq!(glb.len(), 20 + json_length);
    }

    #[test]
    fn external_resources_are_rejected() {
        let mut resources = IndexMap::new();
        resources.insert("scene.bin".to_string(), vec![0u8; 4]);
        assert!(matches!(
            pack(&native(resources)),
            Err(Error::Unsupported(_))
        ));
    }
}
