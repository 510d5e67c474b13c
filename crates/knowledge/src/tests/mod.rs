//! Crate-level behavior tests.

mod store_behavior;
mod support;
