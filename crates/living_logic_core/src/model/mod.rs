//! Domain records persisted by the account registry.
//!
//! # Responsibility
//! - Define the serialized shape of registered accounts.
//! - Keep the external JSON field naming stable for existing slot data.
//!
//! # Invariants
//! - Email identity is compared case-insensitively.
//! - `registered_at` is assigned once, at creation.

pub mod account;
