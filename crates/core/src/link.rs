//! Stage 2: attach every node to its parent's child list.

use crate::hierarchy::{Hierarchy, NodeRef};

/// Link each node to its parent, deepest depth first.
///
/// Going bottom-up means a node's own children are complete before it is
/// placed under its parent. Nodes with no identifier text are left out;
/// they are what trailing separators and empty groups leave behind.
pub fn link(hierarchy: &mut Hierarchy) {
    for depth in (0..hierarchy.depth_count()).rev() {
        for index in 0..hierarchy.level(depth).len() {
            let node = NodeRef::new(depth, index);
            let parent = match hierarchy.get(node) {
                Some(raw) if !raw.text.is_empty() => raw.parent,
                _ => continue,
            };
            if let Some(parent) = parent.and_then(|p| hierarchy.get_mut(p)) {
                parent.children.get_or_insert_with(Vec::new).push(node);
            }
        }
    }
}
