pub mod collada;

pub use collada::{ColladaResource, ColladaSettings, Diagnostic, DiagnosticKind, Diagnostics};
