//! Depth-indexed arena of raw keyword nodes.
//!
//! The lexer appends every node it opens to the sequence for its brace
//! depth, in file order, regardless of which group it belongs to. Siblings
//! from different groups therefore interleave within one depth; the
//! `parent` handle is the only thing that tells them apart. The linker then
//! fills in `children` using the same handles.

use crate::error::Position;

/// Positional address of a node: brace depth plus index within that depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub depth: usize,
    pub index: usize,
}

impl NodeRef {
    pub fn new(depth: usize, index: usize) -> Self {
        NodeRef { depth, index }
    }
}

/// One token-level unit as seen by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawKeyword {
    pub text: String,
    /// The identifier has been terminated by whitespace, `:` or `"`.
    pub done_with_keyword: bool,
    /// A string value was assigned, or a group with this node as parent was
    /// closed, or the root statement was terminated with `;`.
    pub value_assigned: bool,
    pub value: Option<String>,
    /// Declared with a trailing colon.
    pub is_custom: bool,
    pub parent: Option<NodeRef>,
    /// Filled in by the linker; `None` until then, or if nothing links here.
    pub children: Option<Vec<NodeRef>>,
    /// First character of the identifier, once one has been seen.
    pub position: Option<Position>,
}

impl RawKeyword {
    pub fn new(parent: Option<NodeRef>) -> Self {
        RawKeyword {
            text: String::new(),
            done_with_keyword: false,
            value_assigned: false,
            value: None,
            is_custom: false,
            parent,
            children: None,
            position: None,
        }
    }

    /// The value, if one was assigned and is non-empty.
    pub fn non_empty_value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Ordered per-depth node sequences. Depth 0 is the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    levels: Vec<Vec<RawKeyword>>,
}

impl Default for Hierarchy {
    fn default() -> Self {
        Self::new()
    }
}

impl Hierarchy {
    pub fn new() -> Self {
        Hierarchy {
            levels: vec![Vec::new()],
        }
    }

    pub fn depth_count(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, depth: usize) -> &[RawKeyword] {
        self.levels.get(depth).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn roots(&self) -> &[RawKeyword] {
        self.level(0)
    }

    pub fn get(&self, node: NodeRef) -> Option<&RawKeyword> {
        self.levels.get(node.depth)?.get(node.index)
    }

    pub fn get_mut(&mut self, node: NodeRef) -> Option<&mut RawKeyword> {
        self.levels.get_mut(node.depth)?.get_mut(node.index)
    }

    /// Resolve a node's child handles to the nodes themselves, in order.
    pub fn children_of<'a>(
        &'a self,
        node: &'a RawKeyword,
    ) -> impl Iterator<Item = &'a RawKeyword> {
        node.children
            .iter()
            .flatten()
            .filter_map(move |child| self.get(*child))
    }

    /// Number of nodes currently stored at `depth`.
    pub(crate) fn len_at(&self, depth: usize) -> usize {
        self.level(depth).len()
    }

    /// Make sure `depth` exists, appending empty levels as needed.
    pub(crate) fn ensure_depth(&mut self, depth: usize) {
        while self.levels.len() <= depth {
            self.levels.push(Vec::new());
        }
    }

    /// Append fresh nodes at `depth` until `index` is addressable, then
    /// return that node. New nodes get `parent` as their parent handle.
    pub(crate) fn slot_mut(
        &mut self,
        depth: usize,
        index: usize,
        parent: Option<NodeRef>,
    ) -> &mut RawKeyword {
        self.ensure_depth(depth);
        let level = &mut self.levels[depth];
        while level.len() <= index {
            level.push(RawKeyword::new(parent));
        }
        &mut level[index]
    }
}
