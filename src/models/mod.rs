pub mod cache;
pub mod content;
pub mod error;

pub use cache::TtlCache;
pub use content::*;
pub use error::{NotFound, SourceError};
