use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::resources::mesh::DEFAULT_VERTEX_COLOR;

/// Import options for [`ColladaResource`](super::ColladaResource).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColladaSettings {
    /// Vertex color used when a triangle batch declares no COLOR input.
    pub default_vertex_color: [f32; 4],
    /// Rotate `Z_UP` documents into the engine's Y-up convention.
    pub normalize_up_axis: bool,
    /// Assemble nested `<node>` children, not only `<instance_node>` references.
    pub follow_child_nodes: bool,
}

impl Default for ColladaSettings {
    fn default() -> Self {
        Self {
            default_vertex_color: DEFAULT_VERTEX_COLOR.to_array(),
            normalize_up_axis: true,
            follow_child_nodes: true,
        }
    }
}

impl ColladaSettings {
    /// Parses settings from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
