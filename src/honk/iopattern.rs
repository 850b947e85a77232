//! The message schedule of a Honk proof, declared upfront for the sponge.

use ark_ec::CurveGroup;
use ark_ff::Field;
use nimue::{
    plugins::ark::{FieldIOPattern, GroupIOPattern},
    ByteIOPattern,
};

use super::oink::{alpha_label, public_input_label};
use crate::{
    crypto::transcript::TranscriptIOPattern,
    flavor::{Flavor, FF, G1},
    pcs::iopattern::{KzgIOPattern, ZeroMorphIOPattern},
    relations::EntityLayout,
    sumcheck::SumcheckIOPattern,
};

pub trait OinkIOPattern<F: Field, G: CurveGroup> {
    fn add_oink(
        self,
        num_public_inputs: usize,
        layout: &EntityLayout,
        num_relations: usize,
    ) -> Self;
}

impl<F, G, IOPattern> OinkIOPattern<F, G> for IOPattern
where
    F: Field,
    G: CurveGroup,
    IOPattern: ByteIOPattern + FieldIOPattern<F> + GroupIOPattern<G>,
{
    fn add_oink(
        mut self,
        num_public_inputs: usize,
        layout: &EntityLayout,
        num_relations: usize,
    ) -> Self {
        self = self
            .add_bytes(8, "circuit_size")
            .add_bytes(8, "public_input_size");
        for i in 0..num_public_inputs {
            self = self.add_scalars(1, &public_input_label(i));
        }
        for entity in layout.first_round_witness() {
            self = self.add_points(1, entity.label());
        }
        self = self.challenge_scalars(1, "eta");
        for entity in layout.derived_witness() {
            self = self.add_points(1, entity.label());
        }
        // alpha_0 is fixed to one.
        for j in 0..num_relations.saturating_sub(1) {
            self = self.challenge_scalars(1, &alpha_label(j));
        }
        self
    }
}

pub trait HonkIOPattern<F: Flavor> {
    fn add_honk_proof(self, log_circuit_size: usize, num_public_inputs: usize) -> Self;
}

impl<F, IOPattern> HonkIOPattern<F> for IOPattern
where
    F: Flavor,
    IOPattern: OinkIOPattern<FF<F>, G1<F>>
        + SumcheckIOPattern<FF<F>>
        + ZeroMorphIOPattern<FF<F>, G1<F>>
        + KzgIOPattern<G1<F>>,
{
    fn add_honk_proof(self, log_circuit_size: usize, num_public_inputs: usize) -> Self {
        self.add_oink(num_public_inputs, &F::ENTITIES, F::NUM_RELATIONS)
            .add_sumcheck(
                log_circuit_size,
                F::BATCHED_RELATION_PARTIAL_LENGTH,
                F::ENTITIES.num_entities(),
            )
            .add_zeromorph(log_circuit_size)
            .add_kzg_opening()
    }
}

/// Schedule of a proof for flavor `F` over a circuit of `2^log_circuit_size`
/// rows. The flavor name is the domain separator.
pub fn honk_io_pattern<F: Flavor>(
    log_circuit_size: usize,
    num_public_inputs: usize,
) -> TranscriptIOPattern<F::Hasher> {
    HonkIOPattern::<F>::add_honk_proof(
        TranscriptIOPattern::<F::Hasher>::new(F::NAME),
        log_circuit_size,
        num_public_inputs,
    )
}
