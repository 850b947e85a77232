//! The Honk prover and verifier assembled from Oink, Sumcheck and the
//! ZeroMorph opening.

pub mod iopattern;
pub mod masking;
pub mod oink;
pub mod prover;
pub mod proving_key;
pub mod verifier;

pub use self::{
    iopattern::honk_io_pattern, proving_key::ProvingKey, prover::UltraProver,
    verifier::UltraVerifier,
};
