pub mod cmdline_utils;
pub mod crypto; // Transcript and field helpers
pub mod errors;
pub mod flavor; // Compile-time protocol configurations
pub mod honk; // Oink, masking, the prover and the verifier
pub mod parameters; // Degree bounds and policies
pub mod pcs; // KZG and ZeroMorph
pub mod poly_utils; // Utils for polynomials
pub mod relations; // Constraint families
pub mod sumcheck; // Sumcheck over the batched relation
pub mod utils; // Utils in general
pub mod verification_key;
