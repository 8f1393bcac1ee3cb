//! Page-controller entry points for the Living with Logic site.

pub mod api;

pub use api::{AccountSummary, FormActionResponse, SiteApi};
