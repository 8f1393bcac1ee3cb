//! Client-side field validation.
//!
//! # Responsibility
//! - Map raw field text to "no error" or one human-readable diagnostic.
//! - Group per-field rules into form schemas for the site's forms.
//!
//! # Invariants
//! - Checks are pure and independent of each other.
//! - A form is valid iff every declared field passes its rule.

pub mod form;
pub mod rules;
