//! Purpose: Define the stable public Rust API boundary for Capsule.
//! Exports: Core types and operations needed by bindings and embedders.
//! Role: Public, additive-only surface; hides internal core modules.
//! Invariants: This module is the only supported path to core primitives.
//! Invariants: Internal modules remain free to move without breaking embedders.

pub use crate::core::capsule::{Action, Capsule, Value};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::sequence::fill_indices;
