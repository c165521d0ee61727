//! Core utilities for the FPL data client
//!
//! - `http`: header sets for submissions and login

pub mod http;

pub use http::{login_headers, submission_headers, FPL_SITE_URL};
