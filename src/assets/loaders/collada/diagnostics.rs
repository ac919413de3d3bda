//! Recoverable import problems.
//!
//! Every skip-and-continue decision of the importer pushes one [`Diagnostic`]
//! and emits the same message through `log::warn!`, so a load can be
//! inspected after the fact without scraping the log.

use std::fmt;

/// Primitive batches that are detected but never decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Lines,
    Linestrips,
    Polygons,
    Polylist,
    Trifans,
    Tristrips,
}

impl PrimitiveKind {
    #[must_use]
    pub fn element_name(self) -> &'static str {
        match self {
            Self::Lines => "lines",
            Self::Linestrips => "linestrips",
            Self::Polygons => "polygons",
            Self::Polylist => "polylist",
            Self::Trifans => "trifans",
            Self::Tristrips => "tristrips",
        }
    }
}

/// Transform elements that are recognized but not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Lookat,
    Skew,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    UnsupportedPrimitive(PrimitiveKind),
    /// `<convex_mesh>`, `<spline>` or a geometry without any mesh.
    UnsupportedGeometry,
    UnsupportedTransform(TransformKind),
    /// A transform element with unusable values (zero rotation axis, ...).
    InvalidTransform,
    UnsupportedSemantic,
    UnsupportedUpAxis,
    NonFloatSource,
    MissingAccessor,
    UnresolvedSource,
    UnresolvedVertices,
    UnresolvedMaterial,
    UnresolvedEffect,
    UnresolvedTexture,
    /// `<param ref>` naming no usable `<newparam>`.
    UnresolvedParam,
    TextureCreationFailed,
    UnresolvedGeometry,
    UnresolvedNode,
    NodeCycle,
    MissingVisualScene,
    InvalidFace,
    TrailingIndices,
}

/// One recoverable problem encountered during a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Per-load collector of [`Diagnostic`]s.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a recoverable problem and logs it.
    pub fn warn(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        log::warn!("[COLLADA] {message}");
        self.entries.push(Diagnostic { kind, message });
    }

    /// Number of entries of exactly this kind.
    #[must_use]
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    #[must_use]
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
