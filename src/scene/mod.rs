//! Scene graph module
//!
//! Hierarchy produced by the importer:
//! - Node: transform or geometry node with parent/child links
//! - Transform: position, rotation and scale
//! - Scene: slotmap-backed node container

pub mod node;
pub mod scene;
pub mod transform;

pub use node::{Node, NodeKind};
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
}
