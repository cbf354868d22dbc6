//! Metadata store adapter.
//!
//! This crate provides:
//! - The `MetadataStore` contract over flat field-to-string records
//! - A Redis hash implementation and an in-memory implementation
//! - Marshaling between store records and typed models
//! - Catalog operations (shot listing, person shot search)

pub mod catalog;
pub mod error;
pub mod keys;
pub mod memory;
pub mod records;
pub mod redis_store;
pub mod store;

pub use catalog::MetadataCatalog;
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use records::RecordError;
pub use redis_store::RedisStore;
pub use store::{Fields, MetadataStore};
