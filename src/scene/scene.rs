use glam::Affine3A;
use slotmap::SlotMap;

use crate::resources::mesh::FaceSet;
use crate::scene::NodeHandle;
use crate::scene::node::{Node, NodeKind};
use crate::scene::transform::Transform;

/// Scene graph container.
///
/// Owns every node in a slotmap arena. Nodes are linked through handles, so
/// removing the importer that built a subtree leaves the nodes in place.
#[derive(Debug, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Node creation
    // ========================================================================

    /// Adds a detached node and registers it as a scene root.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Creates a transform node under `parent`, or as a scene root when
    /// `parent` is `None`.
    pub fn create_transform_node(
        &mut self,
        name: Option<&str>,
        transform: Transform,
        parent: Option<NodeHandle>,
    ) -> NodeHandle {
        let mut node = Node::new_transform(transform);
        node.name = name.map(str::to_owned);
        self.insert_under(node, parent)
    }

    /// Creates a geometry leaf under `parent`.
    pub fn create_geometry_node(
        &mut self,
        name: Option<&str>,
        faces: FaceSet,
        parent: NodeHandle,
    ) -> NodeHandle {
        let mut node = Node::new_geometry(faces);
        node.name = name.map(str::to_owned);
        self.insert_under(node, Some(parent))
    }

    fn insert_under(&mut self, node: Node, parent: Option<NodeHandle>) -> NodeHandle {
        let handle = self.nodes.insert(node);
        match parent {
            Some(p) if self.nodes.contains_key(p) => self.link(handle, p),
            Some(_) => {
                log::error!("Parent node not found, inserting as scene root");
                self.root_nodes.push(handle);
            }
            None => self.root_nodes.push(handle),
        }
        handle
    }

    fn link(&mut self, child: NodeHandle, parent: NodeHandle) {
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    // ========================================================================
    // Hierarchy
    // ========================================================================

    /// Moves `child` under `parent`, detaching it from its previous parent or
    /// from the scene roots.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found during attach!");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Cannot attach node beneath its own descendant!");
            return;
        }

        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(p) = old_parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == child)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == child) {
            self.root_nodes.remove(i);
        }

        self.link(child, parent);
    }

    /// Whether `ancestor` lies on the parent chain of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut current = self.nodes.get(node).and_then(Node::parent);
        while let Some(h) = current {
            if h == ancestor {
                return true;
            }
            current = self.nodes.get(h).and_then(Node::parent);
        }
        false
    }

    #[inline]
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn children(&self, handle: NodeHandle) -> &[NodeHandle] {
        self.nodes.get(handle).map_or(&[][..], Node::children)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Composes local transforms from the scene root down to `handle`.
    ///
    /// Geometry nodes contribute identity.
    #[must_use]
    pub fn world_matrix(&self, handle: NodeHandle) -> Affine3A {
        let mut world = Affine3A::IDENTITY;
        let mut current = Some(handle);
        while let Some(h) = current {
            let Some(node) = self.nodes.get(h) else { break };
            if let NodeKind::Transform(t) = &node.kind {
                world = t.local_matrix() * world;
            }
            current = node.parent;
        }
        world
    }

    /// Pre-order list of `handle` and every node below it.
    #[must_use]
    pub fn subtree(&self, handle: NodeHandle) -> Vec<NodeHandle> {
        let mut out = Vec::new();
        let mut stack = vec![handle];
        while let Some(h) = stack.pop() {
            let Some(node) = self.nodes.get(h) else { continue };
            out.push(h);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Geometry leaves below `handle` in pre-order, with their world matrices.
    #[must_use]
    pub fn geometry_under(&self, handle: NodeHandle) -> Vec<(NodeHandle, &FaceSet, Affine3A)> {
        self.subtree(handle)
            .into_iter()
            .filter_map(|h| {
                let faces = self.nodes.get(h)?.faces()?;
                Some((h, faces, self.world_matrix(h)))
            })
            .collect()
    }
}
