//! Membership management for a gym with Regular and Premium tiers.
//!
//! The [`domain`] module holds the membership model and its transition
//! rules. [`ports`] defines the traits the domain logic depends on,
//! [`adapters`] provides concrete implementations, and [`commands`]
//! exposes one [`tower::Service`] per user-driven action.

pub mod adapters;
pub mod commands;
pub mod domain;
pub mod ports;
