pub mod api;
pub mod config;
pub mod fallback;
pub mod models;
pub mod services;
pub mod store;
pub mod utils;

// Re-export commonly used items
pub use config::ResolverConfig;
pub use fallback::FallbackCatalog;
pub use models::TtlCache;
pub use services::Resolver;
pub use store::{ContentFilter, ContentStore, MemoryStore};
