use ark_ec::{pairing::Pairing, CurveGroup};

use crate::errors::{ProofError, ProofResult};

/// Adds `challenge_factor · M_k` to every witness commitment `C_k`.
///
/// Run exactly once per proof, after the last Sumcheck round and before the
/// commitments are opened. The corrected `C_k` commits to the masked witness
/// evaluated at the Sumcheck challenge.
pub fn apply_masking_correction<E: Pairing>(
    witness_commitments: &mut [E::G1Affine],
    eval_masking_commitments: &[E::G1Affine],
    challenge_factor: E::ScalarField,
) -> ProofResult<()> {
    if witness_commitments.len() != eval_masking_commitments.len() {
        return Err(ProofError::MaskingCommitmentCount {
            expected: witness_commitments.len(),
            got: eval_masking_commitments.len(),
        });
    }

    let corrected: Vec<E::G1> = witness_commitments
        .iter()
        .zip(eval_masking_commitments)
        .map(|(&commitment, &mask)| mask * challenge_factor + commitment)
        .collect();
    witness_commitments.copy_from_slice(&E::G1::normalize_batch(&corrected));
    Ok(())
}
