//! Use-case services for the site's page controllers.
//!
//! # Responsibility
//! - Wrap the account repository in the boolean contract pages consume.
//! - Run form submits: validate, pace, act, announce.
//! - Reject re-entrant submits while one is in flight.
//!
//! # Invariants
//! - Services never bypass repository persistence rules.
//! - Every completed submit dispatches exactly one toast.

pub mod account_service;
pub mod form_service;
pub mod submit_guard;
