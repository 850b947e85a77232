use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::{iopattern::honk_io_pattern, masking::apply_masking_correction, oink::OinkVerifier};
use crate::{
    crypto::transcript::{HonkProof, Interaction, TranscriptIOPattern, VerifierTranscript},
    errors::{ProofError, ProofResult},
    flavor::Flavor,
    pcs::{kzg, zeromorph::ZeroMorphVerifier},
    sumcheck::SumcheckVerifier,
    verification_key::VerificationKey,
};

/// Verifier for flavor `F`.
///
/// The key is shared and never mutated, so verifiers on different threads can
/// hold the same `Arc`.
pub struct UltraVerifier<F: Flavor> {
    key: Arc<VerificationKey<F::Curve>>,
    /// Built from the key on first use unless supplied.
    io_pattern: Option<TranscriptIOPattern<F::Hasher>>,
    manifest: Vec<Interaction>,
}

impl<F: Flavor> UltraVerifier<F> {
    pub fn new(key: Arc<VerificationKey<F::Curve>>) -> Self {
        let () = F::CONFIGURATION_CHECK;
        Self {
            key,
            io_pattern: None,
            manifest: Vec::new(),
        }
    }

    /// Replays every proof against `io_pattern` instead of the schedule
    /// derived from the key. Each call to [`Self::verify_proof`] still starts
    /// a fresh transcript.
    pub fn with_transcript(
        io_pattern: TranscriptIOPattern<F::Hasher>,
        key: Arc<VerificationKey<F::Curve>>,
    ) -> Self {
        Self {
            io_pattern: Some(io_pattern),
            ..Self::new(key)
        }
    }

    pub fn key(&self) -> &Arc<VerificationKey<F::Curve>> {
        &self.key
    }

    /// Labels and byte ranges read during the last verification.
    pub fn manifest(&self) -> &[Interaction] {
        &self.manifest
    }

    /// Replays `proof` and returns whether it is accepted.
    ///
    /// Proofs that cannot be read, or that fail any check, give `false`. A
    /// failed Sumcheck stops before any pairing is computed.
    #[instrument(skip_all, fields(flavor = F::NAME, proof_bytes = proof.len()))]
    pub fn verify_proof(&mut self, proof: &HonkProof) -> bool {
        self.manifest.clear();
        match self.replay(proof) {
            Ok(accepted) => {
                debug!(accepted, "verification finished");
                accepted
            }
            Err(err) => {
                info!(%err, "proof rejected");
                false
            }
        }
    }

    fn replay(&mut self, proof: &HonkProof) -> ProofResult<bool> {
        let key = Arc::clone(&self.key);
        key.validate::<F>()?;
        let io_pattern = self.io_pattern.get_or_insert_with(|| {
            honk_io_pattern::<F>(key.log_circuit_size(), key.num_public_inputs as usize)
        });

        let mut transcript = VerifierTranscript::new(io_pattern, proof);
        let result = Self::replay_transcript(&key, &mut transcript);
        self.manifest = transcript.into_manifest();
        result
    }

    fn replay_transcript(
        key: &VerificationKey<F::Curve>,
        transcript: &mut VerifierTranscript<'_, F::Hasher>,
    ) -> ProofResult<bool> {
        let oink = OinkVerifier::<F>::new(key).verify(transcript)?;

        let sumcheck = SumcheckVerifier::<F>::new(key.log_circuit_size()).verify(
            &oink.relation_parameters,
            &oink.alphas,
            transcript,
        )?;
        let Some(claimed_evaluations) = sumcheck.claimed_evaluations.filter(|_| sumcheck.verified)
        else {
            return Ok(false);
        };

        // Shifted evaluations are of the plain witnesses, so their sources
        // are taken before the masking correction.
        let to_be_shifted_commitments: Vec<_> = {
            let plain: Vec<_> = key
                .precomputed_commitments
                .iter()
                .chain(&oink.witness_commitments)
                .copied()
                .collect();
            F::ENTITIES
                .shift_sources()
                .ok_or(ProofError::InvalidKey("shifted entity without a source"))?
                .into_iter()
                .map(|i| plain[i])
                .collect()
        };

        let mut witness_commitments = oink.witness_commitments;
        if let Some(challenge_factor) = sumcheck.challenge_factor {
            apply_masking_correction::<F::Curve>(
                &mut witness_commitments,
                &key.eval_masking_commitments,
                challenge_factor,
            )?;
        }

        let unshifted_commitments: Vec<_> = key
            .precomputed_commitments
            .iter()
            .copied()
            .chain(witness_commitments)
            .collect();

        let claim = ZeroMorphVerifier::reduce_verify::<F::Curve, F::Hasher>(
            key.log_circuit_size(),
            key.pcs_verification_key.g1,
            &unshifted_commitments,
            &to_be_shifted_commitments,
            claimed_evaluations.unshifted(),
            claimed_evaluations.shifted(),
            &sumcheck.challenge,
            transcript,
        )?;
        let (p0, p1) = kzg::reduce_verify(&key.pcs_verification_key, &claim, transcript)?;

        let trailing = transcript.remaining_bytes();
        if trailing != 0 {
            return Err(ProofError::TrailingBytes(trailing));
        }

        Ok(kzg::pairing_check(&key.pcs_verification_key, p0, p1))
    }
}
