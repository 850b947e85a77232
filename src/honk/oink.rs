//! The pre-Sumcheck rounds: public inputs, witness commitments and the
//! relation challenges.

use ark_ff::Field;
use derivative::Derivative;
use tracing::{debug, instrument};

use super::proving_key::ProvingKey;
use crate::{
    crypto::transcript::{ProverTranscript, VerifierTranscript},
    errors::{ProofError, ProofResult},
    flavor::{Commitment, Flavor, FF},
    poly_utils::EvaluationsList,
    relations::{accumulator::accumulate, Entity, RelationParameters},
    verification_key::VerificationKey,
};

pub(crate) fn public_input_label(index: usize) -> String {
    format!("public_input_{index}")
}

pub(crate) fn alpha_label(index: usize) -> String {
    format!("alpha_{index}")
}

/// Draws the batching scalars: `alpha_0 = 1`, then one challenge for each
/// further relation.
fn draw_alphas<F: Flavor>(
    mut challenge: impl FnMut(&str) -> ProofResult<FF<F>>,
) -> ProofResult<Vec<FF<F>>> {
    std::iter::once(Ok(FF::<F>::ONE))
        .chain((0..F::NUM_RELATIONS - 1).map(|j| challenge(&alpha_label(j))))
        .collect()
}

/// Witness tables in layout order, with the derived ones computed from
/// `eta`.
pub fn compute_derived_witness<F: Flavor>(
    first_round_witness: &[EvaluationsList<FF<F>>],
    eta: FF<F>,
) -> Vec<EvaluationsList<FF<F>>> {
    let w_l = F::ENTITIES
        .first_round_witness()
        .zip(first_round_witness)
        .find(|(entity, _)| *entity == Entity::WL)
        .map(|(_, table)| table);
    let mut first_round = first_round_witness.iter();
    F::ENTITIES
        .witness
        .iter()
        .filter_map(|&entity| match entity {
            Entity::WAcc => w_l.map(|w_l| EvaluationsList::new(accumulate(w_l.evals(), eta))),
            _ => first_round.next().cloned(),
        })
        .collect()
}

/// What Oink hands to the rest of the verifier.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Debug(bound = ""))]
pub struct OinkOutput<F: Flavor> {
    pub relation_parameters: RelationParameters<FF<F>>,
    /// In layout order.
    pub witness_commitments: Vec<Commitment<F>>,
    pub public_inputs: Vec<FF<F>>,
    pub alphas: Vec<FF<F>>,
}

pub struct OinkVerifier<'a, F: Flavor> {
    key: &'a VerificationKey<F::Curve>,
}

impl<'a, F: Flavor> OinkVerifier<'a, F> {
    pub const fn new(key: &'a VerificationKey<F::Curve>) -> Self {
        Self { key }
    }

    #[instrument(skip_all, fields(flavor = F::NAME))]
    pub fn verify(
        self,
        transcript: &mut VerifierTranscript<'_, F::Hasher>,
    ) -> ProofResult<OinkOutput<F>> {
        let circuit_size = transcript.receive_size("circuit_size")?;
        if circuit_size != self.key.circuit_size {
            return Err(ProofError::CircuitSizeMismatch {
                expected: self.key.circuit_size,
                got: circuit_size,
            });
        }

        let public_input_size = transcript.receive_size("public_input_size")?;
        if public_input_size != self.key.num_public_inputs {
            return Err(ProofError::PublicInputCountMismatch {
                expected: self.key.num_public_inputs,
                got: public_input_size,
            });
        }
        let public_inputs = (0..public_input_size as usize)
            .map(|i| transcript.receive_scalar(&public_input_label(i)))
            .collect::<ProofResult<Vec<FF<F>>>>()?;

        let mut received: Vec<(Entity, Commitment<F>)> =
            Vec::with_capacity(F::ENTITIES.witness.len());
        for entity in F::ENTITIES.first_round_witness() {
            received.push((entity, transcript.receive_point(entity.label())?));
        }

        let eta: FF<F> = transcript.get_challenge("eta")?;

        for entity in F::ENTITIES.derived_witness() {
            received.push((entity, transcript.receive_point(entity.label())?));
        }

        let alphas = draw_alphas::<F>(|label| transcript.get_challenge(label))?;

        let witness_commitments = F::ENTITIES
            .witness
            .iter()
            .filter_map(|entity| {
                received
                    .iter()
                    .find(|(e, _)| e == entity)
                    .map(|&(_, commitment)| commitment)
            })
            .collect();
        debug!(num_public_inputs = public_inputs.len(), "Oink done");

        Ok(OinkOutput {
            relation_parameters: RelationParameters { eta },
            witness_commitments,
            public_inputs,
            alphas,
        })
    }
}

pub struct OinkProver<'a, F: Flavor> {
    proving_key: &'a ProvingKey<F>,
}

/// The prover's view after Oink.
pub struct OinkProverOutput<F: Flavor> {
    pub relation_parameters: RelationParameters<FF<F>>,
    /// In layout order.
    pub witness: Vec<EvaluationsList<FF<F>>>,
    pub alphas: Vec<FF<F>>,
}

impl<'a, F: Flavor> OinkProver<'a, F> {
    pub const fn new(proving_key: &'a ProvingKey<F>) -> Self {
        Self { proving_key }
    }

    #[instrument(skip_all, fields(flavor = F::NAME))]
    pub fn prove(
        self,
        transcript: &mut ProverTranscript<F::Hasher>,
    ) -> ProofResult<OinkProverOutput<F>> {
        let key = self.proving_key;
        let commitment_key = &key.commitment_key;

        transcript.send_size("circuit_size", key.circuit_size() as u64)?;
        transcript.send_size("public_input_size", key.public_inputs.len() as u64)?;
        for (i, input) in key.public_inputs.iter().enumerate() {
            transcript.send_scalars(&public_input_label(i), &[*input])?;
        }

        for (entity, table) in F::ENTITIES
            .first_round_witness()
            .zip(&key.first_round_witness)
        {
            let commitment = commitment_key.commit(table.evals());
            transcript.send_points(entity.label(), &[commitment])?;
        }

        let eta: FF<F> = transcript.get_challenge("eta")?;
        let witness = compute_derived_witness::<F>(&key.first_round_witness, eta);

        for (entity, table) in F::ENTITIES
            .witness
            .iter()
            .zip(&witness)
            .filter(|(entity, _)| entity.is_derived())
        {
            let commitment = commitment_key.commit(table.evals());
            transcript.send_points(entity.label(), &[commitment])?;
        }

        let alphas = draw_alphas::<F>(|label| transcript.get_challenge(label))?;

        Ok(OinkProverOutput {
            relation_parameters: RelationParameters { eta },
            witness,
            alphas,
        })
    }
}
