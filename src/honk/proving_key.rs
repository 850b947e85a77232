use ark_ff::{Field, UniformRand};
use rand::{Rng, RngCore};
use tracing::instrument;

use crate::{
    flavor::{Flavor, FF},
    pcs::kzg::{CommitmentKey, KzgVerifierKey},
    poly_utils::EvaluationsList,
    relations::{Entity, RelationKind},
};

/// Selector and witness tables of a circuit, plus the SRS to commit with.
pub struct ProvingKey<F: Flavor> {
    pub log_circuit_size: usize,
    pub public_inputs: Vec<FF<F>>,
    /// One table per precomputed entity, in layout order.
    pub precomputed: Vec<EvaluationsList<FF<F>>>,
    /// Witnesses committed before `eta`; derived ones are computed by the
    /// prover.
    pub first_round_witness: Vec<EvaluationsList<FF<F>>>,
    /// `ρ_k` per witness for ZK flavors, empty otherwise.
    pub eval_masking_scalars: Vec<FF<F>>,
    pub commitment_key: CommitmentKey<F::Curve>,
    pub pcs_verification_key: KzgVerifierKey<F::Curve>,
}

impl<F: Flavor> ProvingKey<F> {
    pub fn circuit_size(&self) -> usize {
        1 << self.log_circuit_size
    }

    /// Builds a random circuit of `2^log_circuit_size` rows that satisfies
    /// every relation of the flavor.
    ///
    /// Each row carries a random gate with `q_o = -1`, and `q_c` chosen so the
    /// gate output is `w_o`. Where booleanity applies, every other row is a
    /// boolean gate with `w_o ∈ {0, 1}`. The accumulator is enabled on every
    /// row but the last.
    ///
    /// **Panics** if the commitment key is smaller than the circuit.
    #[instrument(skip(commitment_key, pcs_verification_key, rng), fields(flavor = F::NAME))]
    pub fn random(
        log_circuit_size: usize,
        num_public_inputs: usize,
        commitment_key: CommitmentKey<F::Curve>,
        pcs_verification_key: KzgVerifierKey<F::Curve>,
        rng: &mut impl RngCore,
    ) -> Self {
        let n = 1 << log_circuit_size;
        assert!(commitment_key.max_size() >= n, "SRS too small for circuit");

        let has = |kind: RelationKind| F::RELATIONS.contains(&kind);
        let use_multiplication = has(RelationKind::Arithmetic) && !has(RelationKind::Linear);
        let use_booleanity = has(RelationKind::Booleanity);
        let use_accumulator = has(RelationKind::Accumulator);

        let column = || vec![FF::<F>::ZERO; n];
        let (mut q_m, mut q_l, mut q_r, mut q_o, mut q_c) =
            (column(), column(), column(), column(), column());
        let (mut q_acc, mut q_bool) = (column(), column());
        let (mut w_l, mut w_r, mut w_o) = (column(), column(), column());

        for row in 0..n {
            w_l[row] = FF::<F>::rand(rng);
            w_r[row] = FF::<F>::rand(rng);
            if use_booleanity && row % 2 == 1 {
                q_bool[row] = FF::<F>::ONE;
                w_o[row] = FF::<F>::from(rng.gen_range(0..2u64));
            } else {
                w_o[row] = FF::<F>::rand(rng);
            }
            if use_multiplication {
                q_m[row] = FF::<F>::rand(rng);
            }
            q_l[row] = FF::<F>::rand(rng);
            q_r[row] = FF::<F>::rand(rng);
            q_o[row] = -FF::<F>::ONE;
            q_c[row] =
                w_o[row] - q_m[row] * w_l[row] * w_r[row] - q_l[row] * w_l[row] - q_r[row] * w_r[row];
            if use_accumulator && row + 1 < n {
                q_acc[row] = FF::<F>::ONE;
            }
        }

        let table_of = |entity: Entity| -> EvaluationsList<FF<F>> {
            let values = match entity {
                Entity::QM => &q_m,
                Entity::QL => &q_l,
                Entity::QR => &q_r,
                Entity::QO => &q_o,
                Entity::QC => &q_c,
                Entity::QAcc => &q_acc,
                Entity::QBool => &q_bool,
                Entity::WL => &w_l,
                Entity::WR => &w_r,
                Entity::WO => &w_o,
                Entity::WAcc | Entity::WAccShift => {
                    unreachable!("derived and shifted entities are computed by the prover")
                }
            };
            EvaluationsList::new(values.clone())
        };

        let precomputed = F::ENTITIES.precomputed.iter().map(|&e| table_of(e)).collect();
        let first_round_witness = F::ENTITIES
            .first_round_witness()
            .map(table_of)
            .collect();
        let eval_masking_scalars = if F::HAS_ZK {
            (0..F::ENTITIES.witness.len())
                .map(|_| FF::<F>::rand(rng))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            log_circuit_size,
            public_inputs: (0..num_public_inputs).map(|_| FF::<F>::rand(rng)).collect(),
            precomputed,
            first_round_witness,
            eval_masking_scalars,
            commitment_key,
            pcs_verification_key,
        }
    }
}
