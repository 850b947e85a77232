use ark_ff::Field;

use super::{AllEntities, Entity, Relation, RelationParameters};

/// `q_l·w_l + q_r·w_r + q_o·w_o + q_c = 0`.
#[derive(Debug, Clone, Copy)]
pub struct LinearRelation;

impl Relation for LinearRelation {
    const NAME: &'static str = "Linear";
    const PARTIAL_LENGTH: usize = 3;
    const WITNESS_DEGREE: usize = 1;
    const ENTITIES: &'static [Entity] = &[
        Entity::QL,
        Entity::QR,
        Entity::QO,
        Entity::QC,
        Entity::WL,
        Entity::WR,
        Entity::WO,
    ];

    fn evaluate<F: Field>(values: &AllEntities<F>, _params: &RelationParameters<F>) -> F {
        values[Entity::QL] * values[Entity::WL]
            + values[Entity::QR] * values[Entity::WR]
            + values[Entity::QO] * values[Entity::WO]
            + values[Entity::QC]
    }
}

#[cfg(test)]
mod tests {
    use ark_bn254::Fr;

    use super::*;
    use crate::relations::tests::row;

    #[test]
    fn test_ignores_multiplication_selector() {
        let values = row::<Fr>(&[
            (Entity::QM, 9),
            (Entity::QL, 2),
            (Entity::WL, 3),
            (Entity::WR, 100),
            (Entity::QC, 1),
        ]);
        assert_eq!(
            LinearRelation::evaluate(&values, &RelationParameters::default()),
            Fr::from(7u64)
        );
    }
}
