//! Purpose: Shared core library crate behind the `capsule` embeddable surface.
//! Exports: `core` (capsule state, sequence fill, errors), `api`, `abi`.
//! Role: Internal library backing the C ABI and any host-language bindings.
//! Invariants: Treat `core` as internal; `api` is the stable Rust boundary.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod abi;
pub mod api;
pub mod core;
