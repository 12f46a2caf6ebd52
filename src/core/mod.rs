// Core modules implementing capsule state, sequence fill, and error modeling.
pub mod capsule;
pub mod error;
pub mod sequence;
