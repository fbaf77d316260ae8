//! # Adapters Module
//!
//! Concrete implementations of the outbound ports.

pub mod base32h;
pub mod hmac;
pub mod random;
pub mod snowflake;

pub use base32h::Base32H;
pub use hmac::Sha256Mac;
pub use random::{FixedRandom, OsRandom, SeededRandom};
pub use snowflake::{
    Clock, FixedClock, SnowflakeLayout, SnowflakeOptions, SnowflakeSequence, SystemClock,
};
