//! Scene Dump Example
//!
//! Loads a COLLADA element-tree snapshot (JSON) and prints the resulting
//! scene graph, materials and import warnings.
//!
//! Usage:
//! - `cargo run --example dump_scene` loads `demos/assets/textured_box.json`
//! - `cargo run --example dump_scene -- path/to/doc.json [settings.json]`
//!
//! Set `RUST_LOG=debug` for per-batch decoding statistics.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use myth_collada::{AssetServer, ColladaResource, ColladaSettings, JsonDocumentReader, NodeHandle, NodeKind, Scene};

fn print_node(scene: &Scene, assets: &AssetServer, handle: NodeHandle, depth: usize) {
    let Some(node) = scene.get_node(handle) else { return };
    let indent = "  ".repeat(depth);
    let name = node.name.as_deref().unwrap_or("<unnamed>");
    match &node.kind {
        NodeKind::Transform(t) => {
            println!(
                "{indent}{name}  pos={:?} rot={:?} scale={:?}",
                t.position.to_array(),
                t.rotation.to_array(),
                t.scale.to_array()
            );
        }
        NodeKind::Geometry(faces) => {
            println!("{indent}{name}  [{} faces]", faces.len());
            if let Some((min, max)) = faces.bounds() {
                println!("{indent}  bounds {:?} .. {:?}", min.to_array(), max.to_array());
            }
            if let Some(face) = faces.faces().first() {
                let m = &face.material;
                let texture = m
                    .texture
                    .and_then(|h| assets.get_texture(h))
                    .map(|t| t.uri.clone());
                println!(
                    "{indent}  material {} ({}) diffuse={:?} texture={:?}",
                    m.name.as_deref().unwrap_or("<default>"),
                    m.shading_model.map_or("none", |s| s.name()),
                    m.diffuse.to_array(),
                    texture
                );
            }
        }
    }
    for &child in node.children() {
        print_node(scene, assets, child, depth + 1);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let document = args
        .next()
        .unwrap_or_else(|| "demos/assets/textured_box.json".to_string());
    let settings = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path).with_context(|| format!("reading settings {path}"))?;
            ColladaSettings::from_json(&json)?
        }
        None => ColladaSettings::default(),
    };

    let path = Path::new(&document);
    let dir = path.parent().unwrap_or(Path::new("."));
    let file = path
        .file_name()
        .and_then(|f| f.to_str())
        .context("document path has no file name")?;

    let assets = AssetServer::new();
    let mut scene = Scene::new();
    let mut resource = ColladaResource::new(file, Arc::new(JsonDocumentReader::new(dir)), Arc::new(assets.clone()))
        .with_settings(settings);

    let root = resource
        .load(&mut scene)
        .with_context(|| format!("loading {document}"))?;

    print_node(&scene, &assets, root, 0);

    let diagnostics = resource.diagnostics();
    println!("\n{} nodes, {} textures, {} warnings", scene.len(), assets.textures.len(), diagnostics.len());
    for diagnostic in diagnostics.entries() {
        println!("  {diagnostic}");
    }
    Ok(())
}
