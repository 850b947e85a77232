use ark_ff::Field;

use super::{AllEntities, Entity, Relation, RelationParameters};

/// The standard gate `q_m·w_l·w_r + q_l·w_l + q_r·w_r + q_o·w_o + q_c = 0`.
#[derive(Debug, Clone, Copy)]
pub struct ArithmeticRelation;

impl Relation for ArithmeticRelation {
    const NAME: &'static str = "Arithmetic";
    // q_m·w_l·w_r has degree one in each of its three factors.
    const PARTIAL_LENGTH: usize = 4;
    const WITNESS_DEGREE: usize = 2;
    const ENTITIES: &'static [Entity] = &[
        Entity::QM,
        Entity::QL,
        Entity::QR,
        Entity::QO,
        Entity::QC,
        Entity::WL,
        Entity::WR,
        Entity::WO,
    ];

    fn evaluate<F: Field>(values: &AllEntities<F>, _params: &RelationParameters<F>) -> F {
        let w_l = values[Entity::WL];
        let w_r = values[Entity::WR];
        values[Entity::QM] * w_l * w_r
            + values[Entity::QL] * w_l
            + values[Entity::QR] * w_r
            + values[Entity::QO] * values[Entity::WO]
            + values[Entity::QC]
    }
}
