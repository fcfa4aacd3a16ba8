pub mod bbox;
pub mod config;
pub mod element;

pub use bbox::*;
pub use config::{ChunkingConfig, ContextConfig, EmbeddingConfig, EngineConfig};
pub use element::*;
