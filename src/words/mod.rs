pub mod cache;
pub mod loader;
pub mod pool;

pub use loader::{BundledWords, CsvFileSource, RemoteWordSource, WordSource};
pub use pool::{MIN_POOL_SIZE, WordPair, WordPool};
