use ark_ec::pairing::Pairing;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use derivative::Derivative;

use crate::{
    errors::{ProofError, ProofResult},
    flavor::Flavor,
    honk::proving_key::ProvingKey,
    pcs::{kzg::KzgVerifierKey, zeromorph::commit_all},
    poly_utils::EvaluationsList,
    utils::{get_msb, is_power_of_two},
};

/// Everything the verifier knows about a circuit.
///
/// Immutable once built; share it between threads behind an `Arc`.
#[derive(Derivative, CanonicalSerialize, CanonicalDeserialize)]
#[derivative(Clone(bound = ""), Debug(bound = ""), PartialEq(bound = ""))]
pub struct VerificationKey<E: Pairing> {
    pub circuit_size: u64,
    pub num_public_inputs: u64,
    pub pcs_verification_key: KzgVerifierKey<E>,
    /// One per precomputed entity, in layout order.
    pub precomputed_commitments: Vec<E::G1Affine>,
    /// `[ρ_k · 1]`, one per witness, for ZK flavors. Empty otherwise.
    pub eval_masking_commitments: Vec<E::G1Affine>,
}

impl<E: Pairing> VerificationKey<E> {
    /// `log2(circuit_size)`; only meaningful once [`Self::validate`] passed.
    pub fn log_circuit_size(&self) -> usize {
        get_msb(self.circuit_size as usize)
    }

    /// Checks the key against the layout of flavor `F`.
    pub fn validate<F: Flavor<Curve = E>>(&self) -> ProofResult<()> {
        let size = usize::try_from(self.circuit_size)
            .map_err(|_| ProofError::InvalidKey("circuit size does not fit in usize"))?;
        if !is_power_of_two(size) {
            return Err(ProofError::InvalidKey("circuit size is not a power of two"));
        }
        if self.precomputed_commitments.len() != F::ENTITIES.precomputed.len() {
            return Err(ProofError::InvalidKey(
                "wrong number of precomputed commitments",
            ));
        }
        let expected_masking = if F::HAS_ZK {
            F::ENTITIES.witness.len()
        } else {
            0
        };
        if self.eval_masking_commitments.len() != expected_masking {
            return Err(ProofError::MaskingCommitmentCount {
                expected: expected_masking,
                got: self.eval_masking_commitments.len(),
            });
        }
        Ok(())
    }

    /// Commits to the selectors of `proving_key` and, for ZK flavors, to its
    /// masking scalars.
    pub fn from_proving_key<F: Flavor<Curve = E>>(proving_key: &ProvingKey<F>) -> Self {
        let commitment_key = &proving_key.commitment_key;
        let precomputed: Vec<_> = proving_key.precomputed.iter().collect();

        let masking_tables: Vec<EvaluationsList<E::ScalarField>> = proving_key
            .eval_masking_scalars
            .iter()
            .map(|&rho| EvaluationsList::constant(rho, proving_key.log_circuit_size))
            .collect();
        let masking_refs: Vec<_> = masking_tables.iter().collect();

        Self {
            circuit_size: proving_key.circuit_size() as u64,
            num_public_inputs: proving_key.public_inputs.len() as u64,
            pcs_verification_key: proving_key.pcs_verification_key,
            precomputed_commitments: commit_all(commitment_key, &precomputed),
            eval_masking_commitments: commit_all(commitment_key, &masking_refs),
        }
    }
}
