//! Sumcheck over the batched relation `pow_β(X) · Σ_j alpha_j R_j(X)`.
//!
//! Both sides derive the `d` pow challenges `β` upfront. In round `i` the
//! prover sends `S_i` by its values at `0..BATCHED_RELATION_PARTIAL_LENGTH`,
//! and the verifier draws `u_i` after absorbing it.

use ark_ff::Field;

use crate::{poly_utils::MultilinearPoint, relations::AllEntities};

pub mod iopattern;
pub mod prover;
pub mod verifier;

pub use self::{
    iopattern::SumcheckIOPattern, prover::SumcheckProver, verifier::SumcheckVerifier,
};

pub(crate) fn gate_challenge_label(round: usize) -> String {
    format!("Sumcheck:gate_challenge_{round}")
}

pub(crate) fn univariate_label(round: usize) -> String {
    format!("Sumcheck:univariate_{round}")
}

pub(crate) fn round_challenge_label(round: usize) -> String {
    format!("Sumcheck:u_{round}")
}

pub(crate) const EVALUATIONS_LABEL: &str = "Sumcheck:evaluations";

/// What the verifier learns from Sumcheck.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SumcheckOutput<F> {
    /// `(u_0, ..., u_{d-1})`, shorter if a round failed.
    pub challenge: MultilinearPoint<F>,
    /// Claimed entity values at `challenge`; `None` if a round failed before
    /// they were read.
    pub claimed_evaluations: Option<AllEntities<F>>,
    /// `Π u_i (1 - u_i)` for ZK flavors, used to correct witness commitments.
    pub challenge_factor: Option<F>,
    pub verified: bool,
}

/// What the prover keeps after Sumcheck to run the opening.
#[derive(Debug, Clone)]
pub struct SumcheckProverOutput<F: Field> {
    pub challenge: MultilinearPoint<F>,
    pub claimed_evaluations: AllEntities<F>,
    /// `Π u_i (1 - u_i)`. Masked witnesses open to their plain value plus
    /// this factor times their masking scalar.
    pub challenge_factor: F,
}
