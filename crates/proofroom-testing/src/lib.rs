//! Testing infrastructure for proofroom integration tests.
//!
//! - `TestWorld`: a temp-dir-backed workspace wired for one test
//! - `fixtures`: sample project inputs

pub mod fixtures;
pub mod world;

pub use world::TestWorld;
