//! ZeroMorph: opening multilinear evaluation claims with a univariate
//! commitment scheme.
//!
//! A multilinear `f` on `d` variables is committed as the univariate
//! `U(f)(X) = Σ f[i] X^i`. The claim `f(u) = v` holds iff
//!
//! ```ignore
//! U(f)(X) - v·Φ_d(X) = Σ_k (X^{2^k} Φ_{d-k-1}(X^{2^{k+1}}) - u_k Φ_{d-k}(X^{2^k})) U(q_k)(X)
//! ```
//!
//! for quotients `q_k` on the first `k` variables. The prover commits to the
//! quotients; the verifier folds everything into a single commitment that
//! must open to zero at a random `x`.
//!
//! Shifted polynomials `g_shift(X) = U(g)(X) / X` are opened through the
//! commitment to `g`, which therefore has to start with a zero entry.

use ark_ec::{pairing::Pairing, VariableBaseMSM};
use ark_ff::Field;
use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial};
use tracing::instrument;

use super::{iopattern::quotient_label, kzg::CommitmentKey, OpeningClaim};
use crate::{
    crypto::transcript::{ProverTranscript, TranscriptHasher, VerifierTranscript},
    errors::{ProofError, ProofResult},
    poly_utils::{EvaluationsList, MultilinearPoint},
    utils::{expand_randomness, phi},
};

/// `x^{2^k} Φ_{d-k-1}(x^{2^{k+1}}) - u_k Φ_{d-k}(x^{2^k})` for every `k`.
fn quotient_scalars<F: Field>(x: F, challenge: &MultilinearPoint<F>) -> Vec<F> {
    let d = challenge.num_variables();
    let mut x_power = x; // x^{2^k}
    let mut scalars = Vec::with_capacity(d);
    for (k, &u_k) in challenge.0.iter().enumerate() {
        let x_power_next = x_power.square();
        scalars.push(x_power * phi(x_power_next, d - k - 1) - u_k * phi(x_power, d - k));
        x_power = x_power_next;
    }
    scalars
}

/// `y^k · x^{N - 2^k}` for every `k`.
fn degree_check_scalars<F: Field>(x: F, y: F, log_n: usize) -> Vec<F> {
    let n = 1u64 << log_n;
    expand_randomness(y, log_n)
        .into_iter()
        .enumerate()
        .map(|(k, y_k)| y_k * x.pow([n - (1 << k)]))
        .collect()
}

/// Splits `f(u) - v` into the quotients `q_k`, binding the top variable first.
///
/// `q_k` lives on the variables below `k` and has `2^k` entries.
pub fn compute_quotients<F: Field>(
    polynomial: &EvaluationsList<F>,
    challenge: &MultilinearPoint<F>,
) -> Vec<Vec<F>> {
    let d = challenge.num_variables();
    assert_eq!(polynomial.num_variables(), d);

    let mut quotients = vec![Vec::new(); d];
    let mut current = polynomial.evals().to_vec();
    for k in (0..d).rev() {
        let (low, high) = current.split_at(1 << k);
        let quotient: Vec<F> = high.iter().zip(low).map(|(&h, &l)| h - l).collect();
        current = low
            .iter()
            .zip(&quotient)
            .map(|(&l, &q)| l + challenge.0[k] * q)
            .collect();
        quotients[k] = quotient;
    }
    quotients
}

pub struct ZeroMorphProver;

impl ZeroMorphProver {
    /// Proves the evaluations of `unshifted` and of the shifts of
    /// `to_be_shifted` at `challenge`, ending with a KZG opening.
    ///
    /// The claimed evaluations are recomputed from the tables, so they agree
    /// with the verifier's only if the prover's Sumcheck was honest.
    #[instrument(skip_all, fields(num_variables = challenge.num_variables()))]
    pub fn prove<E: Pairing, H: TranscriptHasher>(
        commitment_key: &CommitmentKey<E>,
        unshifted: &[&EvaluationsList<E::ScalarField>],
        to_be_shifted: &[&EvaluationsList<E::ScalarField>],
        challenge: &MultilinearPoint<E::ScalarField>,
        transcript: &mut ProverTranscript<H>,
    ) -> ProofResult<()> {
        let d = challenge.num_variables();
        let n = 1 << d;

        let rho: E::ScalarField = transcript.get_challenge("rho")?;
        let rhos = expand_randomness(rho, unshifted.len() + to_be_shifted.len());

        let mut f_batched = EvaluationsList::constant(E::ScalarField::ZERO, d);
        for (poly, &rho_i) in unshifted.iter().zip(&rhos) {
            f_batched.add_scaled(rho_i, poly);
        }
        let mut g_batched = EvaluationsList::constant(E::ScalarField::ZERO, d);
        for (poly, &rho_i) in to_be_shifted.iter().zip(&rhos[unshifted.len()..]) {
            g_batched.add_scaled(rho_i, poly);
        }

        let mut full = f_batched.clone();
        full.add_scaled(E::ScalarField::ONE, &g_batched.shifted());
        let evaluation = full.evaluate(challenge);

        let quotients = compute_quotients(&full, challenge);
        for (k, quotient) in quotients.iter().enumerate() {
            transcript.send_points(&quotient_label(k), &[commitment_key.commit(quotient)])?;
        }

        let y: E::ScalarField = transcript.get_challenge("ZM:y")?;
        let y_powers = expand_randomness(y, d);
        let mut batched_quotient = vec![E::ScalarField::ZERO; n];
        for (k, (quotient, &y_k)) in quotients.iter().zip(&y_powers).enumerate() {
            let offset = n - (1 << k);
            for (slot, &q) in batched_quotient[offset..].iter_mut().zip(quotient) {
                *slot += y_k * q;
            }
        }
        transcript.send_points("ZM:C_q", &[commitment_key.commit(&batched_quotient)])?;

        let x: E::ScalarField = transcript.get_challenge("ZM:x")?;
        let z: E::ScalarField = transcript.get_challenge("ZM:z")?;
        let x_inv = x.inverse().ok_or(ProofError::DegenerateChallenge("ZM:x"))?;

        // ζ_x + z·Z_x, which vanishes at x.
        let degree_check = degree_check_scalars(x, y, d);
        let quotient_scalars = quotient_scalars(x, challenge);

        let mut opening = batched_quotient;
        for (value, (&f, &g)) in opening
            .iter_mut()
            .zip(f_batched.evals().iter().zip(g_batched.evals()))
        {
            *value += z * (f + x_inv * g);
        }
        opening[0] -= z * evaluation * phi(x, d);
        for (quotient, (&dc, &qs)) in quotients
            .iter()
            .zip(degree_check.iter().zip(&quotient_scalars))
        {
            let scalar = dc + z * qs;
            for (value, &q) in opening.iter_mut().zip(quotient) {
                *value -= scalar * q;
            }
        }

        commitment_key.open(
            &DensePolynomial::from_coefficients_vec(opening),
            x,
            transcript,
        )
    }
}

pub struct ZeroMorphVerifier;

impl ZeroMorphVerifier {
    /// Reads the quotient commitments and returns the claim
    /// `(C_ζ + z·C_Z, x, 0)` for the univariate opening.
    ///
    /// Unshifted commitments and evaluations are batched with consecutive
    /// powers of `rho`; shifted ones continue the same sequence.
    #[allow(clippy::too_many_arguments)]
    pub fn reduce_verify<E: Pairing, H: TranscriptHasher>(
        log_circuit_size: usize,
        g1: E::G1Affine,
        unshifted_commitments: &[E::G1Affine],
        to_be_shifted_commitments: &[E::G1Affine],
        unshifted_evaluations: &[E::ScalarField],
        shifted_evaluations: &[E::ScalarField],
        challenge: &MultilinearPoint<E::ScalarField>,
        transcript: &mut VerifierTranscript<'_, H>,
    ) -> ProofResult<OpeningClaim<E>> {
        assert_eq!(unshifted_commitments.len(), unshifted_evaluations.len());
        assert_eq!(to_be_shifted_commitments.len(), shifted_evaluations.len());
        assert_eq!(challenge.num_variables(), log_circuit_size);
        let d = log_circuit_size;

        let rho: E::ScalarField = transcript.get_challenge("rho")?;
        let rhos = expand_randomness(rho, unshifted_evaluations.len() + shifted_evaluations.len());
        let batched_evaluation: E::ScalarField = unshifted_evaluations
            .iter()
            .chain(shifted_evaluations)
            .zip(&rhos)
            .map(|(&v, &r)| v * r)
            .sum();

        let quotient_commitments = (0..d)
            .map(|k| transcript.receive_point::<E::G1Affine>(&quotient_label(k)))
            .collect::<ProofResult<Vec<_>>>()?;

        let y: E::ScalarField = transcript.get_challenge("ZM:y")?;
        let batched_quotient_commitment: E::G1Affine = transcript.receive_point("ZM:C_q")?;

        let x: E::ScalarField = transcript.get_challenge("ZM:x")?;
        let z: E::ScalarField = transcript.get_challenge("ZM:z")?;
        let x_inv = x.inverse().ok_or(ProofError::DegenerateChallenge("ZM:x"))?;

        let degree_check = degree_check_scalars(x, y, d);
        let quotient_scalars = quotient_scalars(x, challenge);

        let mut bases = Vec::with_capacity(2 + d + rhos.len());
        let mut scalars = Vec::with_capacity(bases.capacity());

        bases.push(batched_quotient_commitment);
        scalars.push(E::ScalarField::ONE);

        bases.push(g1);
        scalars.push(-z * batched_evaluation * phi(x, d));

        for (commitment, (&dc, &qs)) in quotient_commitments
            .iter()
            .zip(degree_check.iter().zip(&quotient_scalars))
        {
            bases.push(*commitment);
            scalars.push(-(dc + z * qs));
        }

        let (unshifted_rhos, shifted_rhos) = rhos.split_at(unshifted_commitments.len());
        for (commitment, &rho_i) in unshifted_commitments.iter().zip(unshifted_rhos) {
            bases.push(*commitment);
            scalars.push(z * rho_i);
        }
        for (commitment, &rho_i) in to_be_shifted_commitments.iter().zip(shifted_rhos) {
            bases.push(*commitment);
            scalars.push(z * x_inv * rho_i);
        }

        Ok(OpeningClaim {
            commitment: E::G1::msm_unchecked(&bases, &scalars),
            point: x,
            evaluation: E::ScalarField::ZERO,
        })
    }
}

/// Commits to every table as the univariate with its entries as coefficients.
pub fn commit_all<E: Pairing>(
    commitment_key: &CommitmentKey<E>,
    tables: &[&EvaluationsList<E::ScalarField>],
) -> Vec<E::G1Affine> {
    tables
        .iter()
        .map(|table| commitment_key.commit(table.evals()))
        .collect()
}
