pub mod appwrite;
pub mod memory;
pub mod model;
pub mod repo;

pub use appwrite::AppwriteStore;
pub use memory::MemoryStore;
pub use model::{NewSearchCount, SearchCountRecord, StoreError, StoreResult};
pub use repo::SearchCountStore;
