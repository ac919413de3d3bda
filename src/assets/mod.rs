pub mod io;
pub mod loaders;
pub mod server;
pub mod storage;

// Re-export the asset server and related types
pub use io::{DocumentReader, JsonDocumentReader, MemoryDocumentReader};
pub use loaders::ColladaResource;
pub use server::{AssetServer, ShaderHandle, TextureFactory, TextureHandle};
pub use storage::AssetStorage;
