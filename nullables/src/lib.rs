//! Nullable infrastructure for deterministic testing.
//!
//! Inspired by the "A-frame architecture" pattern from RsNano.
//! The governance engines take their external collaborators (clock,
//! lifecycle engine, thread factory, organization directory) behind traits.
//! This crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch a real chain, clock, or deployment pipeline
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod directory;
pub mod factory;
pub mod lifecycle;

pub use clock::NullClock;
pub use directory::NullDirectory;
pub use factory::NullFactory;
pub use lifecycle::NullLifecycle;
