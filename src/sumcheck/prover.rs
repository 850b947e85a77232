use std::marker::PhantomData;

use ark_ff::Field;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

use super::{
    gate_challenge_label, round_challenge_label, univariate_label, SumcheckProverOutput,
    EVALUATIONS_LABEL,
};
use crate::{
    crypto::transcript::ProverTranscript,
    errors::ProofResult,
    flavor::{Flavor, FF},
    poly_utils::{EvaluationsList, MultilinearPoint},
    relations::{batched_relation_value, AllEntities, RelationParameters},
};

/// Honest Sumcheck prover.
///
/// Evaluates the batched relation on every edge of the hypercube at every
/// point of the round domain. There is no attempt at skipping zero rows.
#[derive(Debug, Clone, Copy)]
pub struct SumcheckProver<F: Flavor> {
    _flavor: PhantomData<F>,
}

/// `pow_rest[j] = Π_m β_{first + m}` over the set bits `m` of `j`.
fn pow_suffix<F: Field>(betas: &[F], first: usize) -> Vec<F> {
    let rest = &betas[first..];
    let mut table = vec![F::ONE; 1 << rest.len()];
    for (m, &beta) in rest.iter().enumerate() {
        let stride = 1 << m;
        for (j, value) in table.iter_mut().enumerate() {
            if j & stride != 0 {
                *value *= beta;
            }
        }
    }
    table
}

impl<F: Flavor> SumcheckProver<F> {
    /// Runs Sumcheck on `tables`, one multilinear table per entity.
    ///
    /// For ZK flavors witness `k` is replaced by `W_k + masking_scalars[k] ·
    /// Π X_i (1 - X_i)`. The mask vanishes on the hypercube, so it only shows
    /// up in the last round and in the claimed evaluations.
    #[instrument(skip_all, fields(flavor = F::NAME))]
    pub fn prove(
        tables: &AllEntities<EvaluationsList<FF<F>>>,
        relation_parameters: &RelationParameters<FF<F>>,
        alphas: &[FF<F>],
        masking_scalars: &[FF<F>],
        transcript: &mut ProverTranscript<F::Hasher>,
    ) -> ProofResult<SumcheckProverOutput<FF<F>>> {
        let d = tables.values()[0].num_variables();
        if F::HAS_ZK {
            assert_eq!(masking_scalars.len(), F::ENTITIES.witness.len());
        }

        let betas: Vec<FF<F>> = (0..d)
            .map(|i| transcript.get_challenge(&gate_challenge_label(i)))
            .collect::<ProofResult<_>>()?;

        let mut current = tables.clone();
        let mut challenge = Vec::with_capacity(d);
        let mut pow_prefix = FF::<F>::ONE;
        let mut challenge_factor = FF::<F>::ONE;

        for round in 0..d {
            let pow_rest = pow_suffix(&betas, round + 1);
            let is_last = round + 1 == d;

            let evaluations: Vec<FF<F>> = (0..F::BATCHED_RELATION_PARTIAL_LENGTH)
                .map(|t| {
                    let t = FF::<F>::from(t as u64);
                    let mask = if F::HAS_ZK && is_last {
                        challenge_factor * t * (FF::<F>::ONE - t)
                    } else {
                        FF::<F>::ZERO
                    };
                    let edge_sum = Self::edge_sum(
                        &current,
                        &pow_rest,
                        t,
                        mask,
                        masking_scalars,
                        relation_parameters,
                        alphas,
                    );
                    pow_prefix * (FF::<F>::ONE + t * (betas[round] - FF::<F>::ONE)) * edge_sum
                })
                .collect();
            transcript.send_scalars(&univariate_label(round), &evaluations)?;

            let u: FF<F> = transcript.get_challenge(&round_challenge_label(round))?;
            current = current.map(|table| table.fold(u));
            pow_prefix *= FF::<F>::ONE + u * (betas[round] - FF::<F>::ONE);
            challenge_factor *= u * (FF::<F>::ONE - u);
            challenge.push(u);
        }

        let mut claimed_evaluations = current.map(|table| table[0]);
        if F::HAS_ZK {
            for (value, &rho) in claimed_evaluations
                .witness_mut()
                .iter_mut()
                .zip(masking_scalars)
            {
                *value += rho * challenge_factor;
            }
        }
        transcript.send_scalars(EVALUATIONS_LABEL, claimed_evaluations.values())?;

        Ok(SumcheckProverOutput {
            challenge: MultilinearPoint(challenge),
            claimed_evaluations,
            challenge_factor,
        })
    }

    /// `Σ_j pow_rest[j] · F(edge_j(t))`, where `edge_j(t)` interpolates rows
    /// `2j` and `2j + 1`, and witness `k` is offset by `mask · rho_k`.
    #[allow(clippy::too_many_arguments)]
    fn edge_sum(
        tables: &AllEntities<EvaluationsList<FF<F>>>,
        pow_rest: &[FF<F>],
        t: FF<F>,
        mask: FF<F>,
        masking_scalars: &[FF<F>],
        relation_parameters: &RelationParameters<FF<F>>,
        alphas: &[FF<F>],
    ) -> FF<F> {
        let num_witness = F::ENTITIES.witness.len();
        let witness_start = F::ENTITIES.precomputed.len();
        let edge = |j: usize| {
            let mut index = 0;
            let row = tables.map(|table| {
                let e = index;
                index += 1;
                let low = table[2 * j];
                let value = low + t * (table[2 * j + 1] - low);
                if F::HAS_ZK && (witness_start..witness_start + num_witness).contains(&e) {
                    value + mask * masking_scalars[e - witness_start]
                } else {
                    value
                }
            });
            pow_rest[j] * batched_relation_value(F::RELATIONS, &row, relation_parameters, alphas)
        };

        #[cfg(feature = "parallel")]
        let sum = (0..pow_rest.len()).into_par_iter().map(edge).sum();
        #[cfg(not(feature = "parallel"))]
        let sum = (0..pow_rest.len()).map(edge).sum();
        sum
    }
}

#[cfg(test)]
mod tests {
    use ark_bn254::Fr;

    use super::*;

    #[test]
    fn test_pow_suffix() {
        let betas = [Fr::from(2u64), Fr::from(3u64), Fr::from(5u64)];
        assert_eq!(
            pow_suffix(&betas, 1),
            vec![Fr::from(1u64), Fr::from(3u64), Fr::from(5u64), Fr::from(15u64)]
        );
        assert_eq!(pow_suffix(&betas, 3), vec![Fr::from(1u64)]);
    }
}
