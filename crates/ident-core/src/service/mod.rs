//! Service Layer
//!
//! Application services that drive the envelope protocol through the
//! outbound ports and expose it through the inbound ones.

pub mod generator;
pub mod validator;

pub use generator::{GeneratorConfig, IdentGenerator};
pub use validator::{IdentValidator, ValidatorConfig};
