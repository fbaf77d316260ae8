//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - generation and validation APIs
//! - Driven Ports (outbound) - id source, text codec, randomness, keyed hash

pub mod inbound;
pub mod outbound;

pub use inbound::{IdentGeneratorApi, IdentValidatorApi};
pub use outbound::{
    CodecError, ExplodedId, IdInspector, IdSource, IdSourceError, KeyedHash, RandomSource,
    TextCodec,
};
