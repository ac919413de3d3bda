//! Input schema of one primitive batch.
//!
//! A `<triangles>` element declares its attribute streams as `<input>`
//! children. Each input names an offset into the per-vertex index group and a
//! `<source>` holding the float records. [`OffsetMap`] turns that list into
//! `offset -> [AttributeWriter]` so the decoder can apply every writer for an
//! index with one slice lookup.

use smallvec::SmallVec;

use crate::assets::loaders::collada::diagnostics::{DiagnosticKind, Diagnostics};
use crate::assets::loaders::collada::triangles::VertexScratch;
use crate::dom::{Document, ElementId, ElementKind, ElementTag};
use crate::resources::mesh::FaceError;

const VERTEX_SEMANTIC: &str = "VERTEX";

/// Attribute slot a writer fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
    Texcoord,
    Color,
}

impl AttributeKind {
    /// Classifies a terminal `<input semantic>`; `None` for anything the
    /// decoder does not store (TANGENT, BINORMAL, ...).
    #[must_use]
    pub fn from_semantic(semantic: &str) -> Option<Self> {
        match semantic {
            "POSITION" => Some(Self::Position),
            "NORMAL" => Some(Self::Normal),
            "TEXCOORD" => Some(Self::Texcoord),
            "COLOR" => Some(Self::Color),
            _ => None,
        }
    }

    /// Floats in the destination slot.
    #[must_use]
    pub fn slot_size(self) -> usize {
        match self {
            Self::Position | Self::Normal => 3,
            Self::Texcoord => 2,
            Self::Color => 4,
        }
    }

    /// Floats copied per record. A record never spills into its neighbour,
    /// so a 3-float color leaves the default alpha in place.
    #[must_use]
    pub fn component_count(self, stride: usize) -> usize {
        self.slot_size().min(stride)
    }

    #[must_use]
    pub fn semantic(self) -> &'static str {
        match self {
            Self::Position => "POSITION",
            Self::Normal => "NORMAL",
            Self::Texcoord => "TEXCOORD",
            Self::Color => "COLOR",
        }
    }
}

/// Copies one source record into one scratch slot.
#[derive(Debug, Clone, Copy)]
pub struct AttributeWriter<'doc> {
    pub kind: AttributeKind,
    /// Zero makes the writer a no-op (source without accessor).
    pub components: usize,
    pub source: &'doc [f32],
    pub stride: usize,
}

impl AttributeWriter<'_> {
    /// Writes record `index` into `scratch`.
    pub fn write(&self, index: u32, scratch: &mut VertexScratch) -> Result<(), FaceError> {
        if self.components == 0 {
            return Ok(());
        }
        let start = index as usize * self.stride;
        let record = self
            .source
            .get(start..start + self.components)
            .ok_or(FaceError::IndexOutOfRange {
                semantic: self.kind.semantic(),
                index,
                len: self.source.len(),
            })?;
        scratch.slot_mut(self.kind)[..self.components].copy_from_slice(record);
        Ok(())
    }
}

/// Per-offset writer lists for one primitive batch.
#[derive(Debug, Clone, Default)]
pub struct OffsetMap<'doc> {
    slots: Vec<SmallVec<[AttributeWriter<'doc>; 2]>>,
}

impl<'doc> OffsetMap<'doc> {
    /// Builds the map from the batch's `<input>` elements, in declaration order.
    ///
    /// Inputs that cannot be used are reported and dropped, but still reserve
    /// their offset so the index group keeps its declared width.
    pub fn resolve(doc: &'doc Document, inputs: &[ElementId], diagnostics: &mut Diagnostics) -> Self {
        let mut map = Self::default();
        for &input in inputs {
            let Some(ElementKind::Input {
                semantic,
                source,
                offset,
                ..
            }) = doc.kind(input)
            else {
                continue;
            };
            let offset = *offset as usize;
            map.reserve(offset);

            if semantic == VERTEX_SEMANTIC {
                let vertices = doc
                    .resolve_uri(source)
                    .filter(|&v| doc.tag(v) == Some(ElementTag::Vertices));
                let Some(vertices) = vertices else {
                    diagnostics.warn(
                        DiagnosticKind::UnresolvedVertices,
                        format!("VERTEX input references unknown <vertices> `{source}`"),
                    );
                    continue;
                };
                for inner in doc.children_of(vertices, ElementTag::Input) {
                    if let Some(writer) = Self::terminal_writer(doc, inner, diagnostics) {
                        map.slots[offset].push(writer);
                    }
                }
            } else if let Some(writer) = Self::terminal_writer(doc, input, diagnostics) {
                map.slots[offset].push(writer);
            }
        }
        map
    }

    fn reserve(&mut self, offset: usize) {
        if self.slots.len() <= offset {
            self.slots.resize_with(offset + 1, SmallVec::new);
        }
    }

    fn terminal_writer(
        doc: &'doc Document,
        input: ElementId,
        diagnostics: &mut Diagnostics,
    ) -> Option<AttributeWriter<'doc>> {
        let Some(ElementKind::Input { semantic, source, .. }) = doc.kind(input) else {
            return None;
        };
        let Some(kind) = AttributeKind::from_semantic(semantic) else {
            diagnostics.warn(
                DiagnosticKind::UnsupportedSemantic,
                format!("Input semantic `{semantic}` is not supported, ignoring"),
            );
            return None;
        };

        let Some(source_id) = doc
            .resolve_uri(source)
            .filter(|&s| doc.tag(s) == Some(ElementTag::Source))
        else {
            diagnostics.warn(
                DiagnosticKind::UnresolvedSource,
                format!("{semantic} input references unknown <source> `{source}`"),
            );
            return None;
        };

        let floats = doc
            .children(source_id)
            .iter()
            .find_map(|&child| match doc.kind(child) {
                Some(ElementKind::FloatArray { values }) => Some(values.as_slice()),
                _ => None,
            });
        let Some(floats) = floats else {
            diagnostics.warn(
                DiagnosticKind::NonFloatSource,
                format!("Source `{source}` has no <float_array>, ignoring {semantic} input"),
            );
            return None;
        };

        let stride = doc
            .descendants_of(source_id, ElementTag::Accessor)
            .into_iter()
            .find_map(|a| match doc.kind(a) {
                Some(ElementKind::Accessor { stride, .. }) => Some((*stride).max(1)),
                _ => None,
            });

        Some(match stride {
            Some(stride) => AttributeWriter {
                kind,
                components: kind.component_count(stride),
                source: floats,
                stride,
            },
            None => {
                diagnostics.warn(
                    DiagnosticKind::MissingAccessor,
                    format!("Source `{source}` has no accessor, {semantic} data will not be read"),
                );
                AttributeWriter {
                    kind,
                    components: 0,
                    source: floats,
                    stride: 1,
                }
            }
        })
    }

    /// Highest declared offset; 0 for an empty map.
    #[inline]
    #[must_use]
    pub fn max_offset(&self) -> usize {
        self.slots.len().saturating_sub(1)
    }

    /// Number of indices per vertex in the `<p>` stream.
    #[inline]
    #[must_use]
    pub fn group_len(&self) -> usize {
        self.max_offset() + 1
    }

    #[inline]
    #[must_use]
    pub fn writers_at(&self, offset: usize) -> &[AttributeWriter<'doc>] {
        self.slots.get(offset).map_or(&[][..], SmallVec::as_slice)
    }

    #[must_use]
    pub fn has(&self, kind: AttributeKind) -> bool {
        self.slots.iter().flatten().any(|w| w.kind == kind)
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
