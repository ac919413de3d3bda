use rustc_hash::FxHashMap;
use slotmap::{SlotMap, new_key_type};

use crate::dom::element::{ElementKind, ElementNode, ElementTag, UpAxis};

new_key_type! {
    /// Arena key of one element inside a [`Document`].
    pub struct ElementId;
}

/// One element stored in the document arena.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub id: Option<String>,
    pub sid: Option<String>,
    pub name: Option<String>,
    pub kind: ElementKind,
}

impl Element {
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn tag(&self) -> ElementTag {
        self.kind.tag()
    }

    /// Best human-readable label: `name`, then `id`, then `sid`.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .or(self.sid.as_deref())
    }
}

/// A parsed COLLADA document: an element arena plus an id lookup table.
///
/// The document is immutable once built. Element ids (`id="..."`) are unique
/// document-wide; when a tree declares the same id twice the first element in
/// document order wins.
#[derive(Debug, Clone)]
pub struct Document {
    elements: SlotMap<ElementId, Element>,
    ids: FxHashMap<String, ElementId>,
    root: ElementId,
}

impl Document {
    /// Flattens an owned element tree into a document.
    #[must_use]
    pub fn from_tree(tree: ElementNode) -> Self {
        let mut elements = SlotMap::with_key();
        let mut ids = FxHashMap::default();
        let root = Self::insert_subtree(&mut elements, &mut ids, tree, None);
        Self {
            elements,
            ids,
            root,
        }
    }

    fn insert_subtree(
        elements: &mut SlotMap<ElementId, Element>,
        ids: &mut FxHashMap<String, ElementId>,
        node: ElementNode,
        parent: Option<ElementId>,
    ) -> ElementId {
        let ElementNode {
            kind,
            id,
            sid,
            name,
            children,
        } = node;

        let handle = elements.insert(Element {
            parent,
            children: Vec::with_capacity(children.len()),
            id: id.clone(),
            sid,
            name,
            kind,
        });

        if let Some(id) = id {
            if ids.contains_key(&id) {
                log::warn!("Duplicate element id `{id}`, keeping the first declaration");
            } else {
                ids.insert(id, handle);
            }
        }

        for child in children {
            let child_handle = Self::insert_subtree(elements, ids, child, Some(handle));
            elements[handle].children.push(child_handle);
        }

        handle
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    #[inline]
    #[must_use]
    pub fn kind(&self, id: ElementId) -> Option<&ElementKind> {
        self.elements.get(id).map(|e| &e.kind)
    }

    #[inline]
    #[must_use]
    pub fn tag(&self, id: ElementId) -> Option<ElementTag> {
        self.elements.get(id).map(Element::tag)
    }

    /// Direct children in document order.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements.get(id).map_or(&[], |e| e.children.as_slice())
    }

    /// Direct children of the given kind, in document order.
    pub fn children_of(&self, id: ElementId, tag: ElementTag) -> impl Iterator<Item = ElementId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| self.tag(child) == Some(tag))
    }

    #[must_use]
    pub fn first_child_of(&self, id: ElementId, tag: ElementTag) -> Option<ElementId> {
        self.children_of(id, tag).next()
    }

    /// All descendants of the given kind in depth-first document order,
    /// excluding `id` itself.
    #[must_use]
    pub fn descendants_of(&self, id: ElementId, tag: ElementTag) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut stack: Vec<ElementId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.tag(current) == Some(tag) {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        found
    }

    /// First element of the given kind anywhere in the document.
    #[must_use]
    pub fn find_first(&self, tag: ElementTag) -> Option<ElementId> {
        if self.tag(self.root) == Some(tag) {
            return Some(self.root);
        }
        self.descendants_of(self.root, tag).into_iter().next()
    }

    // ========================================================================
    // Reference resolution
    // ========================================================================

    /// Looks up an element by its document-wide `id` attribute.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        self.ids.get(id).copied()
    }

    /// Resolves a URI reference such as `#geometry-mesh`.
    ///
    /// Only same-document fragments are supported; references into other
    /// documents resolve to `None`.
    #[must_use]
    pub fn resolve_uri(&self, uri: &str) -> Option<ElementId> {
        let (document, fragment) = uri.split_once('#')?;
        if !document.is_empty() {
            log::debug!("External document reference `{uri}` is not followed");
            return None;
        }
        self.element_by_id(fragment)
    }

    /// Resolves an IDREF-style symbol: a bare id, or a `#fragment` URI.
    #[must_use]
    pub fn resolve_id_ref(&self, symbol: &str) -> Option<ElementId> {
        if symbol.contains('#') {
            self.resolve_uri(symbol)
        } else {
            self.element_by_id(symbol)
        }
    }

    // ========================================================================
    // Asset metadata
    // ========================================================================

    /// The document's declared up axis; `Y_UP` when no `<asset>` declares one.
    #[must_use]
    pub fn up_axis(&self) -> UpAxis {
        self.first_child_of(self.root, ElementTag::Asset)
            .and_then(|asset| match self.kind(asset) {
                Some(ElementKind::Asset { up_axis }) => Some(*up_axis),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Number of elements in the document.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl From<ElementNode> for Document {
    fn from(tree: ElementNode) -> Self {
        Self::from_tree(tree)
    }
}
