use std::marker::PhantomData;

use ark_ff::Field;
use tracing::{debug, info, instrument};

use super::{
    gate_challenge_label, round_challenge_label, univariate_label, SumcheckOutput,
    EVALUATIONS_LABEL,
};
use crate::{
    crypto::transcript::VerifierTranscript,
    errors::{ProofError, ProofResult},
    flavor::{Flavor, FF},
    poly_utils::{MultilinearPoint, RoundPolynomial},
    relations::{batched_relation_value, AllEntities, RelationParameters},
};

/// Verifies the Sumcheck part of a proof for flavor `F`.
#[derive(Debug, Clone, Copy)]
pub struct SumcheckVerifier<F: Flavor> {
    log_circuit_size: usize,
    _flavor: PhantomData<F>,
}

impl<F: Flavor> SumcheckVerifier<F> {
    pub const fn new(log_circuit_size: usize) -> Self {
        Self {
            log_circuit_size,
            _flavor: PhantomData,
        }
    }

    /// Runs all rounds and the final relation check.
    ///
    /// A failed round check stops immediately with `verified = false`; bytes
    /// that cannot be read as the expected values give an error instead.
    #[instrument(skip_all, fields(flavor = F::NAME, log_circuit_size = self.log_circuit_size))]
    pub fn verify(
        &self,
        relation_parameters: &RelationParameters<FF<F>>,
        alphas: &[FF<F>],
        transcript: &mut VerifierTranscript<'_, F::Hasher>,
    ) -> ProofResult<SumcheckOutput<FF<F>>> {
        let d = self.log_circuit_size;

        let gate_challenges: Vec<FF<F>> = (0..d)
            .map(|i| transcript.get_challenge(&gate_challenge_label(i)))
            .collect::<ProofResult<_>>()?;

        let mut target = FF::<F>::ZERO;
        let mut challenge = Vec::with_capacity(d);
        let mut challenge_factor = FF::<F>::ONE;

        for round in 0..d {
            let label = univariate_label(round);
            let evaluations = transcript
                .receive_scalars::<FF<F>>(&label, F::BATCHED_RELATION_PARTIAL_LENGTH)?;
            let univariate = F::RoundUnivariate::from_evaluations(&evaluations)
                .ok_or(ProofError::InvalidEncoding { label })?;

            if univariate.sum_over_boolean() != target {
                info!(round, "Sumcheck round check failed");
                return Ok(SumcheckOutput {
                    challenge: MultilinearPoint(challenge),
                    claimed_evaluations: None,
                    challenge_factor: F::HAS_ZK.then_some(challenge_factor),
                    verified: false,
                });
            }

            let u: FF<F> = transcript.get_challenge(&round_challenge_label(round))?;
            target = univariate.evaluate(u);
            if F::HAS_ZK {
                challenge_factor *= u * (FF::<F>::ONE - u);
            }
            challenge.push(u);
        }

        let values = transcript
            .receive_scalars::<FF<F>>(EVALUATIONS_LABEL, F::ENTITIES.num_entities())?;
        let claimed_evaluations = AllEntities::from_values(F::ENTITIES, values).ok_or(
            ProofError::InvalidEncoding {
                label: EVALUATIONS_LABEL.to_owned(),
            },
        )?;

        let challenge = MultilinearPoint(challenge);
        let full_honk_relation = challenge.pow_poly(&gate_challenges)
            * batched_relation_value(
                F::RELATIONS,
                &claimed_evaluations,
                relation_parameters,
                alphas,
            );
        let verified = full_honk_relation == target;
        if !verified {
            info!("Sumcheck final relation check failed");
        } else {
            debug!("Sumcheck verified");
        }

        Ok(SumcheckOutput {
            challenge,
            claimed_evaluations: Some(claimed_evaluations),
            challenge_factor: F::HAS_ZK.then_some(challenge_factor),
            verified,
        })
    }
}
