//! Byte-level packing: little-endian component dispatch, 4-byte padding and
//! the two buffer-view layouts (tightly concatenated and vertex interleaved).

use byteorder::{ByteOrder, WriteBytesExt, LE};

use crate::graph::Accessor;
use crate::json::accessor::ComponentType;

/// Rounds `n` up to the next multiple of four.
pub(crate) fn align_to_multiple_of_four(n: usize) -> usize {
    (n + 3) & !3
}

/// Serializes the accessor's scalar stream tightly packed, zero padded to a
/// four byte boundary.
pub(crate) fn accessor_bytes(accessor: &Accessor) -> Vec<u8> {
    let mut data = Vec::with_capacity(align_to_multiple_of_four(accessor.byte_length()));
    for &value in &accessor.data {
        write_scalar(&mut data, accessor.component_type, value);
    }
    while data.len() % 4 != 0 {
        data.push(0); // pad to multiple of four bytes
    }
    data
}

/// Vertex stride of `accessors` interleaved in order: the sum of each
/// element's byte size rounded up to four.
pub(crate) fn vertex_stride(accessors: &[&Accessor]) -> usize {
    accessors
        .iter()
        .map(|a| align_to_multiple_of_four(a.element_size() * a.component_size()))
        .sum()
}

/// Interleaves the accessors vertex by vertex into one strided blob.
///
/// Every accessor must hold `count` elements; the caller has checked this.
/// Element `i` of accessor `k` lands at `i * stride + offset(k)` where
/// `offset(k)` is the running padded element size of the accessors before it.
pub(crate) fn interleave_bytes(accessors: &[&Accessor], count: usize, stride: usize) -> Vec<u8> {
    let mut data = vec![0u8; count * stride];
    let mut offset = 0;
    for accessor in accessors {
        let element_size = accessor.element_size();
        let component_size = accessor.component_size();
        for i in 0..count {
            for j in 0..element_size {
                let value = accessor.data[i * element_size + j];
                let position = i * stride + offset + j * component_size;
                put_scalar(&mut data, accessor.component_type, position, value);
            }
        }
        offset += align_to_multiple_of_four(element_size * component_size);
    }
    data
}

/// Appends one little-endian scalar. Writes into a `Vec` never fail.
fn write_scalar(data: &mut Vec<u8>, component_type: ComponentType, value: f64) {
    match component_type {
        ComponentType::I8 => data.write_i8(value as i8).unwrap(),
        ComponentType::U8 => data.write_u8(value as u8).unwrap(),
        ComponentType::I16 => data.write_i16::<LE>(value as i16).unwrap(),
        ComponentType::U16 => data.write_u16::<LE>(value as u16).unwrap(),
        ComponentType::U32 => data.write_u32::<LE>(value as u32).unwrap(),
        ComponentType::F32 => data.write_f32::<LE>(value as f32).unwrap(),
    }
}

/// Writes one little-endian scalar at `position` of a strided blob.
fn put_scalar(data: &mut [u8], component_type: ComponentType, position: usize, value: f64) {
    match component_type {
        ComponentType::I8 => data[position] = value as i8 as u8,
        ComponentType::U8 => data[position] = value as u8,
        ComponentType::I16 => LE::write_i16(&mut data[position..], value as i16),
        ComponentType::U16 => LE::write_u16(&mut data[position..], value as u16),
        ComponentType::U32 => LE::write_u32(&mut data[position..], value as u32),
        ComponentType::F32 => LE::write_f32(&mut data[position..], value as f32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Buffer, Document};
    use crate::json::accessor::Type;
    use byteorder::ReadBytesExt;

    fn doc_with_buffer() -> (Document, crate::graph::Handle<Buffer>) {
        let mut doc = Document::new();
        let buffer = doc.create_buffer(Buffer::default());
        (doc, buffer)
    }

    #[test]
    fn alignment_rounds_up_to_four() {
        assert_eq!(align_to_multiple_of_four(0), 0);
        assert_eq!(align_to_multiple_of_four(1), 4);
        assert_eq!(align_to_multiple_of_four(4), 4);
        assert_eq!(align_to_multiple_of_four(6), 8);
    }

    #[test]
    fn scalar_u16_stream_is_little_endian_and_padded() {
        let (_, buffer) = doc_with_buffer();
        let accessor = Accessor::new(Type::Scalar, ComponentType::U16, buffer)
            .with_data(vec![1.0, 258.0, 3.0]);
        let bytes = accessor_bytes(&accessor);
        // Three u16 values plus two bytes of padding.
        assert_eq!(bytes, vec![1, 0, 2, 1, 3, 0, 0, 0]);
    }

    #[test]
    fn f32_stream_round_trips() {
        let (_, buffer) = doc_with_buffer();
        let values = vec![0.5, -1.25, 3.75];
        let accessor =
            Accessor::new(Type::Vec3, ComponentType::F32, buffer).with_data(values.clone());
        let bytes = accessor_bytes(&accessor);
        let mut cursor = &bytes[..];
        for expected in values {
            assert_eq!(cursor.read_f32::<LE>().unwrap(), expected as f32);
        }
    }

    #[test]
    fn interleave_positions_and_normals() {
        let (_, buffer) = doc_with_buffer();
        let positions = Accessor::new(Type::Vec3, ComponentType::F32, buffer)
            .with_data(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let normals = Accessor::new(Type::Vec3, ComponentType::F32, buffer)
            .with_data(vec![0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
        let members = [&positions, &normals];
        let stride = vertex_stride(&members);
        assert_eq!(stride, 24);
        let data = interleave_bytes(&members, 2, stride);
        assert_eq!(data.len(), 48);
        // Vertex 1 starts at the stride boundary: position then normal.
        assert_eq!(LE::read_f32(&data[24..]), 4.0);
        assert_eq!(LE::read_f32(&data[36..]), 0.0);
        assert_eq!(LE::read_f32(&data[40..]), 1.0);
    }

    #[test]
    fn interleave_pads_narrow_elements_to_four() {
        let (_, buffer) = doc_with_buffer();
        // A VEC2 of u8 occupies two bytes but strides at four.
        let uv = Accessor::new(Type::Vec2, ComponentType::U8, buffer)
            .with_data(vec![1.0, 2.0, 3.0, 4.0]);
        let positions = Accessor::new(Type::Vec3, ComponentType::F32, buffer)
            .with_data(vec![0.0; 6]);
        let members = [&uv, &positions];
        let stride = vertex_stride(&members);
        assert_eq!(stride, 4 + 12);
        let data = interleave_bytes(&members, 2, stride);
        assert_eq!(&data[0..2], &[1, 2]);
        assert_eq!(&data[16..18], &[3, 4]);
    }
}
