//! KZG commitments to univariate polynomials given by their coefficients.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{Field, UniformRand};
use ark_poly::{univariate::DensePolynomial, Polynomial};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use derivative::Derivative;
use rand::RngCore;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, instrument};

use super::{OpeningClaim, PairingCounter};
use crate::{
    crypto::transcript::{ProverTranscript, TranscriptHasher, VerifierTranscript},
    errors::ProofResult,
    poly_utils::univariate::divide_by_linear,
};

/// Powers `[τ^i]_1` used by the prover.
#[derive(Derivative, CanonicalSerialize, CanonicalDeserialize)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub struct CommitmentKey<E: Pairing> {
    pub powers_of_tau: Vec<E::G1Affine>,
}

/// The three points the verifier needs: `[1]_1`, `[1]_2` and `[τ]_2`.
#[derive(Derivative, CanonicalSerialize, CanonicalDeserialize)]
#[derivative(
    Clone(bound = ""),
    Copy(bound = ""),
    Debug(bound = ""),
    PartialEq(bound = "")
)]
pub struct KzgVerifierKey<E: Pairing> {
    pub g1: E::G1Affine,
    pub g2: E::G2Affine,
    pub tau_g2: E::G2Affine,
}

pub struct KzgSetup;

impl KzgSetup {
    /// Builds an SRS supporting polynomials with `max_size` coefficients from
    /// a random `τ`.
    ///
    /// Whoever runs this learns `τ` and can forge openings, so it is only
    /// suitable for tests and benchmarks.
    pub fn unsafe_setup<E: Pairing>(
        max_size: usize,
        rng: &mut impl RngCore,
    ) -> (CommitmentKey<E>, KzgVerifierKey<E>) {
        let tau = E::ScalarField::rand(rng);
        Self::unsafe_setup_with_tau(max_size, tau)
    }

    #[instrument(skip(tau))]
    pub fn unsafe_setup_with_tau<E: Pairing>(
        max_size: usize,
        tau: E::ScalarField,
    ) -> (CommitmentKey<E>, KzgVerifierKey<E>) {
        let g1 = E::G1Affine::generator();
        let g2 = E::G2Affine::generator();

        let mut scalars = Vec::with_capacity(max_size);
        let mut power = E::ScalarField::ONE;
        for _ in 0..max_size {
            scalars.push(power);
            power *= tau;
        }

        #[cfg(feature = "parallel")]
        let powers: Vec<E::G1> = scalars.par_iter().map(|s| g1 * s).collect();
        #[cfg(not(feature = "parallel"))]
        let powers: Vec<E::G1> = scalars.iter().map(|s| g1 * s).collect();

        let commitment_key = CommitmentKey {
            powers_of_tau: E::G1::normalize_batch(&powers),
        };
        let verifier_key = KzgVerifierKey {
            g1,
            g2,
            tau_g2: (g2 * tau).into_affine(),
        };
        (commitment_key, verifier_key)
    }
}

impl<E: Pairing> CommitmentKey<E> {
    pub fn max_size(&self) -> usize {
        self.powers_of_tau.len()
    }

    /// Commits to `Σ coeffs[i] X^i`.
    ///
    /// **Panics** if there are more coefficients than powers of `τ`.
    pub fn commit(&self, coeffs: &[E::ScalarField]) -> E::G1Affine {
        assert!(
            coeffs.len() <= self.max_size(),
            "polynomial with {} coefficients exceeds SRS size {}",
            coeffs.len(),
            self.max_size()
        );
        E::G1::msm_unchecked(&self.powers_of_tau[..coeffs.len()], coeffs).into_affine()
    }

    /// Sends the opening proof `[(p(X) - p(x)) / (X - x)]_1` for `p` at `x`.
    pub fn open<H: TranscriptHasher>(
        &self,
        polynomial: &DensePolynomial<E::ScalarField>,
        point: E::ScalarField,
        transcript: &mut ProverTranscript<H>,
    ) -> ProofResult<()> {
        let mut numerator = polynomial.clone();
        if let Some(constant) = numerator.coeffs.first_mut() {
            *constant -= polynomial.evaluate(&point);
        }
        let quotient = divide_by_linear(&numerator, point);
        transcript.send_points("KZG:W", &[self.commit(&quotient.coeffs)])
    }
}

/// Reduces an opening claim to the two points fed to the pairing:
/// `P0 = C - v·[1]_1 + x·π` and `P1 = -π`.
pub fn reduce_verify<E: Pairing, H: TranscriptHasher>(
    verifier_key: &KzgVerifierKey<E>,
    claim: &OpeningClaim<E>,
    transcript: &mut VerifierTranscript<'_, H>,
) -> ProofResult<(E::G1Affine, E::G1Affine)> {
    let quotient: E::G1Affine = transcript.receive_point("KZG:W")?;

    let p0 = claim.commitment - verifier_key.g1 * claim.evaluation + quotient * claim.point;
    let p1 = -quotient.into_group();
    let points = E::G1::normalize_batch(&[p0, p1]);
    Ok((points[0], points[1]))
}

/// Checks `e(P0, [1]_2) · e(P1, [τ]_2) == 1`.
pub fn pairing_check<E: Pairing>(
    verifier_key: &KzgVerifierKey<E>,
    p0: E::G1Affine,
    p1: E::G1Affine,
) -> bool {
    PairingCounter::add();
    let result = E::multi_pairing([p0, p1], [verifier_key.g2, verifier_key.tau_g2]);
    let accepted = result.0 == <E::TargetField as Field>::ONE;
    if !accepted {
        debug!("pairing check failed");
    }
    accepted
}
