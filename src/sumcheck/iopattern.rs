use ark_ff::Field;
use nimue::plugins::ark::FieldIOPattern;

use super::{gate_challenge_label, round_challenge_label, univariate_label, EVALUATIONS_LABEL};

pub trait SumcheckIOPattern<F: Field> {
    /// `d` gate challenges, then per round `round_length` evaluations and
    /// `u_i`, then the claimed value of every entity.
    fn add_sumcheck(
        self,
        log_circuit_size: usize,
        round_length: usize,
        num_entities: usize,
    ) -> Self;
}

impl<F, IOPattern> SumcheckIOPattern<F> for IOPattern
where
    F: Field,
    IOPattern: FieldIOPattern<F>,
{
    fn add_sumcheck(
        mut self,
        log_circuit_size: usize,
        round_length: usize,
        num_entities: usize,
    ) -> Self {
        for i in 0..log_circuit_size {
            self = self.challenge_scalars(1, &gate_challenge_label(i));
        }
        for round in 0..log_circuit_size {
            self = self
                .add_scalars(round_length, &univariate_label(round))
                .challenge_scalars(1, &round_challenge_label(round));
        }
        self.add_scalars(num_entities, EVALUATIONS_LABEL)
    }
}
