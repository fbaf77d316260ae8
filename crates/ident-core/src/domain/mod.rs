//! # Domain Module
//!
//! Envelope layout, assembly and parsing.
//!
//! RULES:
//! - No I/O operations
//! - No logging on the per-ident path
//! - Collaborators arrive as port traits, never as globals

pub mod envelope;
pub mod errors;
pub mod keys;
pub mod layout;
pub mod tags;
pub mod verdict;

pub use envelope::Envelope;
pub use errors::*;
pub use keys::IdentKey;
pub use layout::*;
pub use tags::{compute_sign_tag, compute_verify_tag, tags_match};
pub use verdict::{Rejection, TrustMode};
