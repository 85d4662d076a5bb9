//! Host capability boundary
//!
//! The surrounding application owns the document tree, typefaces, viewport
//! and plugin-data. This crate defines the trait the core talks to, plus
//! an in-process document used by the CLI and tests.

pub mod error;
pub mod host;
pub mod memdoc;

pub use error::{HostError, Result};
pub use host::DocumentHost;
pub use memdoc::{ContainerFixture, DocumentFixture, MemoryDocument, UnitFixture};
