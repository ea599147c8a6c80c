//! Classifies each accessor of a buffer as attribute, index or other data and
//! groups attribute accessors by their owning primitive.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::graph::{Accessor, AccessorUse, Buffer, Document, Handle, PrimitiveHandle};

/// The three packing classes of one buffer, in packing order.
#[derive(Debug, Default)]
pub(crate) struct BufferLayout {
    /// Index accessors, concatenated into one `ELEMENT_ARRAY_BUFFER` view.
    pub indices: Vec<Handle<Accessor>>,
    /// Attribute accessors grouped per primitive, each group interleaved into
    /// one `ARRAY_BUFFER` view. Primitives appear in discovery order.
    pub attributes: IndexMap<PrimitiveHandle, Vec<Handle<Accessor>>>,
    /// Everything else (inverse-bind matrices, morph targets, animation
    /// keyframes, unused accessors), concatenated into one untargeted view.
    pub other: Vec<Handle<Accessor>>,
}

impl BufferLayout {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty() && self.attributes.is_empty() && self.other.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Role {
    Attribute,
    Index,
    Other,
}

fn role_of(use_: &AccessorUse) -> Role {
    match use_ {
        AccessorUse::Attribute { .. } => Role::Attribute,
        AccessorUse::Indices { .. } => Role::Index,
        _ => Role::Other,
    }
}

/// Partitions the accessors owned by `buffer` according to how the graph
/// consumes them.
///
/// An accessor wired into more than one role is a fatal input error. An
/// accessor with no consuming edge at all counts as other data. An attribute
/// accessor shared by several primitives is grouped with the first primitive
/// that references it; later primitives reference the same packed bytes.
pub(crate) fn partition_accessors(
    doc: &Document,
    buffer: Handle<Buffer>,
    uses: &HashMap<Handle<Accessor>, Vec<AccessorUse>>,
) -> Result<BufferLayout> {
    let mut layout = BufferLayout::default();
    let mut grouped = HashSet::new();

    for (index, accessor) in doc.accessors().iter().enumerate() {
        if accessor.buffer != buffer {
            continue;
        }
        let handle = Handle::from_index(index);
        let Some(accessor_uses) = uses.get(&handle) else {
            layout.other.push(handle);
            continue;
        };

        let role = role_of(&accessor_uses[0]);
        if accessor_uses.iter().any(|u| role_of(u) != role) {
            return Err(Error::AccessorRoleConflict {
                name: accessor.name.clone(),
            });
        }

        match role {
            Role::Index => layout.indices.push(handle),
            Role::Other => layout.other.push(handle),
            Role::Attribute => {
                if !grouped.insert(handle) {
                    continue;
                }
                let AccessorUse::Attribute { primitive } = accessor_uses[0] else {
                    unreachable!()
                };
                layout.attributes.entry(primitive).or_default().push(handle);
            }
        }
    }
    Ok(layout)
}
