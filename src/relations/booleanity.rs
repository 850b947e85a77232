use ark_ff::Field;

use super::{AllEntities, Entity, Relation, RelationParameters};

/// Forces `w_o ∈ {0, 1}` on rows where `q_bool` is set.
#[derive(Debug, Clone, Copy)]
pub struct BooleanityRelation;

impl Relation for BooleanityRelation {
    const NAME: &'static str = "Booleanity";
    const PARTIAL_LENGTH: usize = 4;
    const WITNESS_DEGREE: usize = 2;
    const ENTITIES: &'static [Entity] = &[Entity::QBool, Entity::WO];

    fn evaluate<F: Field>(values: &AllEntities<F>, _params: &RelationParameters<F>) -> F {
        let w_o = values[Entity::WO];
        values[Entity::QBool] * (w_o.square() - w_o)
    }
}
