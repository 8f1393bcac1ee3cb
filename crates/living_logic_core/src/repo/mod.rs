//! Repository layer over slot storage.
//!
//! # Responsibility
//! - Define the account registry contract used by services.
//! - Keep slot serialization details out of service orchestration.
//!
//! # Invariants
//! - The account collection lives in exactly one slot and is rewritten whole.
//! - Read faults degrade to an empty collection; write faults are returned.

pub mod account_repo;
