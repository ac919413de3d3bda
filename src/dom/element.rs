//! Element Kinds
//!
//! The closed set of COLLADA elements the importer understands. Every element
//! of a [`Document`](super::Document) carries exactly one [`ElementKind`]
//! payload; traversal code dispatches on it with a single `match` instead of
//! runtime type casts.
//!
//! [`ElementNode`] is the owned, nested form of the same tree. It is what a
//! parser (or a serialized snapshot) produces and what
//! [`Document::from_tree`](super::Document::from_tree) flattens into the arena.

use serde::{Deserialize, Serialize};

// ============================================================================
// Enumerations
// ============================================================================

/// Declared vertical axis of a document (`<asset><up_axis>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpAxis {
    XUp,
    #[default]
    YUp,
    ZUp,
}

/// The four fixed-function shading models of `<profile_COMMON>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadingModel {
    Constant,
    Lambert,
    Phong,
    Blinn,
}

impl ShadingModel {
    /// Whether the model has ambient and diffuse terms.
    #[inline]
    #[must_use]
    pub fn has_diffuse(self) -> bool {
        !matches!(self, Self::Constant)
    }

    /// Whether the model has specular and shininess terms.
    #[inline]
    #[must_use]
    pub fn has_specular(self) -> bool {
        matches!(self, Self::Phong | Self::Blinn)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Lambert => "lambert",
            Self::Phong => "phong",
            Self::Blinn => "blinn",
        }
    }
}

/// `<surface type="...">`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SurfaceType {
    Untyped,
    #[serde(rename = "1D")]
    D1,
    #[default]
    #[serde(rename = "2D")]
    D2,
    #[serde(rename = "3D")]
    D3,
    Cube,
    Depth,
    Rect,
}

// ============================================================================
// Shading payloads
// ============================================================================

/// A `common_color_or_texture_type` channel (`<diffuse>`, `<ambient>`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorOrTexture {
    Color([f32; 4]),
    Texture {
        texture: String,
        #[serde(default)]
        texcoord: Option<String>,
    },
    Param(String),
}

/// A `common_float_or_param_type` channel (`<shininess>`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatOrParam {
    Float(f32),
    Param(String),
}

/// Channels of a `<constant>`, `<lambert>`, `<phong>` or `<blinn>` element.
///
/// The document may carry channels that the model does not define; the
/// material resolver only reads the ones the model owns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShadingChannels {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emission: Option<ColorOrTexture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ambient: Option<ColorOrTexture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diffuse: Option<ColorOrTexture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specular: Option<ColorOrTexture>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shininess: Option<FloatOrParam>,
}

/// Value of a `<newparam>` inside `<profile_COMMON>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamValue {
    Surface {
        #[serde(default)]
        surface_type: SurfaceType,
        #[serde(default)]
        init_from: Vec<String>,
    },
    #[serde(rename = "sampler2D", alias = "sampler2d")]
    Sampler2D { source: String },
    Float { value: f32 },
    Float4 { value: [f32; 4] },
}

// ============================================================================
// ElementKind
// ============================================================================

/// Payload of one document element.
///
/// Container elements whose attributes the importer never reads are unit
/// variants; `Library` stands for every `<library_*>` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum ElementKind {
    // --- Document structure ---
    #[serde(rename = "COLLADA", alias = "collada")]
    Collada,
    Asset {
        #[serde(default)]
        up_axis: UpAxis,
    },
    #[serde(
        alias = "library_geometries",
        alias = "library_materials",
        alias = "library_effects",
        alias = "library_images",
        alias = "library_nodes",
        alias = "library_visual_scenes"
    )]
    Library,
    Scene,
    InstanceVisualScene { url: String },
    VisualScene,

    // --- Node hierarchy ---
    Node,
    Matrix { values: [f32; 16] },
    Rotate { value: [f32; 4] },
    Scale { value: [f32; 3] },
    Translate { value: [f32; 3] },
    Lookat { value: [f32; 9] },
    Skew { value: [f32; 7] },
    InstanceGeometry { url: String },
    InstanceNode { url: String },
    BindMaterial,
    TechniqueCommon,
    InstanceMaterial { symbol: String, target: String },

    // --- Geometry ---
    Geometry,
    Mesh,
    ConvexMesh,
    Spline,
    Source,
    FloatArray { values: Vec<f32> },
    IntArray { values: Vec<i32> },
    NameArray { values: Vec<String> },
    Accessor {
        source: String,
        #[serde(default)]
        count: usize,
        #[serde(default = "default_stride")]
        stride: usize,
    },
    Vertices,
    Input {
        semantic: String,
        source: String,
        #[serde(default)]
        offset: u32,
        #[serde(default)]
        set: Option<u32>,
    },
    #[serde(rename = "p")]
    P { values: Vec<u32> },
    Triangles {
        #[serde(default)]
        material: Option<String>,
        #[serde(default)]
        count: usize,
    },
    Lines {
        #[serde(default)]
        material: Option<String>,
    },
    Linestrips {
        #[serde(default)]
        material: Option<String>,
    },
    Polygons {
        #[serde(default)]
        material: Option<String>,
    },
    Polylist {
        #[serde(default)]
        material: Option<String>,
    },
    Trifans {
        #[serde(default)]
        material: Option<String>,
    },
    Tristrips {
        #[serde(default)]
        material: Option<String>,
    },

    // --- Materials & effects ---
    Material,
    InstanceEffect { url: String },
    Effect,
    #[serde(rename = "profile_COMMON", alias = "profile_common")]
    ProfileCommon,
    #[serde(
        rename = "profile_GLSL",
        alias = "profile_CG",
        alias = "profile_GLES",
        alias = "profile_glsl",
        alias = "profile_cg",
        alias = "profile_gles"
    )]
    ProfileOther,
    Newparam(ParamValue),
    Technique,
    Constant(ShadingChannels),
    Lambert(ShadingChannels),
    Phong(ShadingChannels),
    Blinn(ShadingChannels),
    Image {
        #[serde(default)]
        init_from: Option<String>,
    },
}

fn default_stride() -> usize {
    1
}

/// Field-less mirror of [`ElementKind`], used for children-by-kind queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementTag {
    Collada,
    Asset,
    Library,
    Scene,
    InstanceVisualScene,
    VisualScene,
    Node,
    Matrix,
    Rotate,
    Scale,
    Translate,
    Lookat,
    Skew,
    InstanceGeometry,
    InstanceNode,
    BindMaterial,
    TechniqueCommon,
    InstanceMaterial,
    Geometry,
    Mesh,
    ConvexMesh,
    Spline,
    Source,
    FloatArray,
    IntArray,
    NameArray,
    Accessor,
    Vertices,
    Input,
    P,
    Triangles,
    Lines,
    Linestrips,
    Polygons,
    Polylist,
    Trifans,
    Tristrips,
    Material,
    InstanceEffect,
    Effect,
    ProfileCommon,
    ProfileOther,
    Newparam,
    Technique,
    Constant,
    Lambert,
    Phong,
    Blinn,
    Image,
}

impl ElementKind {
    #[must_use]
    pub fn tag(&self) -> ElementTag {
        match self {
            Self::Collada => ElementTag::Collada,
            Self::Asset { .. } => ElementTag::Asset,
            Self::Library => ElementTag::Library,
            Self::Scene => ElementTag::Scene,
            Self::InstanceVisualScene { .. } => ElementTag::InstanceVisualScene,
            Self::VisualScene => ElementTag::VisualScene,
            Self::Node => ElementTag::Node,
            Self::Matrix { .. } => ElementTag::Matrix,
            Self::Rotate { .. } => ElementTag::Rotate,
            Self::Scale { .. } => ElementTag::Scale,
            Self::Translate { .. } => ElementTag::Translate,
            Self::Lookat { .. } => ElementTag::Lookat,
            Self::Skew { .. } => ElementTag::Skew,
            Self::InstanceGeometry { .. } => ElementTag::InstanceGeometry,
            Self::InstanceNode { .. } => ElementTag::InstanceNode,
            Self::BindMaterial => ElementTag::BindMaterial,
            Self::TechniqueCommon => ElementTag::TechniqueCommon,
            Self::InstanceMaterial { .. } => ElementTag::InstanceMaterial,
            Self::Geometry => ElementTag::Geometry,
            Self::Mesh => ElementTag::Mesh,
            Self::ConvexMesh => ElementTag::ConvexMesh,
            Self::Spline => ElementTag::Spline,
            Self::Source => ElementTag::Source,
            Self::FloatArray { .. } => ElementTag::FloatArray,
            Self::IntArray { .. } => ElementTag::IntArray,
            Self::NameArray { .. } => ElementTag::NameArray,
            Self::Accessor { .. } => ElementTag::Accessor,
            Self::Vertices => ElementTag::Vertices,
            Self::Input { .. } => ElementTag::Input,
            Self::P { .. } => ElementTag::P,
            Self::Triangles { .. } => ElementTag::Triangles,
            Self::Lines { .. } => ElementTag::Lines,
            Self::Linestrips { .. } => ElementTag::Linestrips,
            Self::Polygons { .. } => ElementTag::Polygons,
            Self::Polylist { .. } => ElementTag::Polylist,
            Self::Trifans { .. } => ElementTag::Trifans,
            Self::Tristrips { .. } => ElementTag::Tristrips,
            Self::Material => ElementTag::Material,
            Self::InstanceEffect { .. } => ElementTag::InstanceEffect,
            Self::Effect => ElementTag::Effect,
            Self::ProfileCommon => ElementTag::ProfileCommon,
            Self::ProfileOther => ElementTag::ProfileOther,
            Self::Newparam(_) => ElementTag::Newparam,
            Self::Technique => ElementTag::Technique,
            Self::Constant(_) => ElementTag::Constant,
            Self::Lambert(_) => ElementTag::Lambert,
            Self::Phong(_) => ElementTag::Phong,
            Self::Blinn(_) => ElementTag::Blinn,
            Self::Image { .. } => ElementTag::Image,
        }
    }

    /// Returns the shading model and its channels if this is a technique body.
    #[must_use]
    pub fn as_shading(&self) -> Option<(ShadingModel, &ShadingChannels)> {
        match self {
            Self::Constant(c) => Some((ShadingModel::Constant, c)),
            Self::Lambert(c) => Some((ShadingModel::Lambert, c)),
            Self::Phong(c) => Some((ShadingModel::Phong, c)),
            Self::Blinn(c) => Some((ShadingModel::Blinn, c)),
            _ => None,
        }
    }
}

// ============================================================================
// ElementNode (owned tree form)
// ============================================================================

/// One element of an owned element tree, together with its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(flatten)]
    pub kind: ElementKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            id: None,
            sid: None,
            name: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = ElementNode>) -> Self {
        self.children.extend(children);
        self
    }
}

impl From<ElementKind> for ElementNode {
    fn from(kind: ElementKind) -> Self {
        Self::new(kind)
    }
}
