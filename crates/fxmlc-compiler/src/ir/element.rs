//! Element nodes and the arena that owns them.

use super::IdentifierAttr;

/// Index of a node in an [`ElementArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// One instantiated markup element.
#[derive(Debug, Clone)]
pub struct ElementNode {
    pub tag: String,
    pub instance_name: String,
    /// Set only for synthesized names.
    pub sequence: Option<u32>,
    pub identifier: IdentifierAttr,
    pub is_field: bool,
    pub statements: Vec<String>,
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
}

impl ElementNode {
    pub fn declared_type(&self) -> &str {
        &self.tag
    }

    /// `ChoiceBox<String>`, or the bare tag without generics.
    pub fn type_with_generics(&self) -> String {
        format!("{}{}", self.tag, self.identifier.render_generics())
    }
}

/// Flat storage for the element tree, children linked by index.
#[derive(Debug, Clone, Default)]
pub struct ElementArena {
    nodes: Vec<ElementNode>,
}

impl ElementArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `node` and links it under its parent, if any.
    pub fn alloc(&mut self, node: ElementNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = node.parent;
        self.nodes.push(node);
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    pub fn get(&self, id: NodeId) -> &ElementNode {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut ElementNode {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ElementNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Children before parents, siblings in encounter order.
    pub fn post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        // (node, children already expanded)
        let mut stack = vec![(root, false)];
        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                order.push(id);
                continue;
            }
            stack.push((id, true));
            for child in self.nodes[id.0].children.iter().rev() {
                stack.push((*child, false));
            }
        }
        order
    }
}
