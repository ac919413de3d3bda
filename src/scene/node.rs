use crate::resources::mesh::FaceSet;
use crate::scene::NodeHandle;
use crate::scene::transform::Transform;

/// What a scene node carries.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Interior node applying a local transform to its subtree.
    Transform(Transform),
    /// Leaf node owning one decoded mesh.
    Geometry(FaceSet),
}

/// A scene node.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships:
/// - `parent`: Optional handle to parent node (None for root nodes)
/// - `children`: List of child node handles
///
/// Geometry nodes contribute an identity transform.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    pub name: Option<String>,
    pub kind: NodeKind,
}

impl Node {
    #[must_use]
    pub fn new_transform(transform: Transform) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            name: None,
            kind: NodeKind::Transform(transform),
        }
    }

    #[must_use]
    pub fn new_geometry(faces: FaceSet) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            name: None,
            kind: NodeKind::Geometry(faces),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[must_use]
    pub fn transform(&self) -> Option<&Transform> {
        match &self.kind {
            NodeKind::Transform(t) => Some(t),
            NodeKind::Geometry(_) => None,
        }
    }

    pub fn transform_mut(&mut self) -> Option<&mut Transform> {
        match &mut self.kind {
            NodeKind::Transform(t) => Some(t),
            NodeKind::Geometry(_) => None,
        }
    }

    #[must_use]
    pub fn faces(&self) -> Option<&FaceSet> {
        match &self.kind {
            NodeKind::Geometry(faces) => Some(faces),
            NodeKind::Transform(_) => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_geometry(&self) -> bool {
        matches!(self.kind, NodeKind::Geometry(_))
    }
}
