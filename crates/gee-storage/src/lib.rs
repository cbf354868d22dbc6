//! Persistence sink for query frames and extracted person shots.
//!
//! Images are written under a root directory, one subdirectory per
//! `ImageKind`, as `<identifier>.jpeg`. Writes overwrite atomically.

pub mod error;
pub mod local;
pub mod memory;
pub mod sink;

pub use error::{StorageError, StorageResult};
pub use local::LocalImageStore;
pub use memory::MemoryImageStore;
pub use sink::{validate_identifier, ImageKind, ImageSink};
