use ark_ec::CurveGroup;
use ark_ff::Field;
use nimue::plugins::ark::{FieldIOPattern, GroupIOPattern};

pub(crate) fn quotient_label(k: usize) -> String {
    format!("ZM:C_q_{k}")
}

pub trait ZeroMorphIOPattern<F: Field, G: CurveGroup> {
    fn add_zeromorph(self, num_variables: usize) -> Self;
}

impl<F, G, IOPattern> ZeroMorphIOPattern<F, G> for IOPattern
where
    F: Field,
    G: CurveGroup,
    IOPattern: FieldIOPattern<F> + GroupIOPattern<G>,
{
    fn add_zeromorph(mut self, num_variables: usize) -> Self {
        self = self.challenge_scalars(1, "rho");
        for k in 0..num_variables {
            self = self.add_points(1, &quotient_label(k));
        }
        self.challenge_scalars(1, "ZM:y")
            .add_points(1, "ZM:C_q")
            .challenge_scalars(1, "ZM:x")
            .challenge_scalars(1, "ZM:z")
    }
}

pub trait KzgIOPattern<G: CurveGroup> {
    fn add_kzg_opening(self) -> Self;
}

impl<G, IOPattern> KzgIOPattern<G> for IOPattern
where
    G: CurveGroup,
    IOPattern: GroupIOPattern<G>,
{
    fn add_kzg_opening(self) -> Self {
        self.add_points(1, "KZG:W")
    }
}
