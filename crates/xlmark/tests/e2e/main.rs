//! End-to-end tests for the conversion pipeline

mod pipeline;

pub use common::*;
