//! Frame retrieval and person-region extraction.
//!
//! This crate wires the metadata catalog, frame decoder, people detector and
//! image sink into a `RetrievalPipeline`, and hosts the worker's
//! configuration, logging and metrics.

pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod logging;
pub mod metrics;
pub mod retrieval;

pub use config::{FrameBoundsPolicy, WorkerConfig};
pub use error::{RetrievalError, RetrievalResult};
pub use locator::{FrameLocator, LocatedFrame};
pub use logging::{init_tracing, RequestLogger};
pub use retrieval::{BatchOutcome, BatchRequest, RetrievalPipeline};
