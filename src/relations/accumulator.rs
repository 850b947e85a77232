use ark_ff::Field;

use super::{AllEntities, Entity, Relation, RelationParameters};

/// Running sum of `eta·w_l` across rows:
/// `q_acc·(w_acc_shift − w_acc − eta·w_l) = 0`.
///
/// `W_ACC` depends on `eta`, so it is committed after the challenge is drawn.
/// It starts at zero, which also makes it openable as a shifted polynomial.
#[derive(Debug, Clone, Copy)]
pub struct AccumulatorRelation;

impl Relation for AccumulatorRelation {
    const NAME: &'static str = "Accumulator";
    const PARTIAL_LENGTH: usize = 3;
    const WITNESS_DEGREE: usize = 1;
    const ENTITIES: &'static [Entity] = &[
        Entity::QAcc,
        Entity::WL,
        Entity::WAcc,
        Entity::WAccShift,
    ];

    fn evaluate<F: Field>(values: &AllEntities<F>, params: &RelationParameters<F>) -> F {
        values[Entity::QAcc]
            * (values[Entity::WAccShift] - values[Entity::WAcc] - params.eta * values[Entity::WL])
    }
}

/// Builds the `W_ACC` column: `acc[0] = 0`, `acc[i + 1] = acc[i] + eta·w_l[i]`.
pub fn accumulate<F: Field>(w_l: &[F], eta: F) -> Vec<F> {
    let mut acc = Vec::with_capacity(w_l.len());
    let mut running = F::ZERO;
    for &w in w_l {
        acc.push(running);
        running += eta * w;
    }
    acc
}

#[cfg(test)]
mod tests {
    use ark_bn254::Fr;

    use super::*;
    use crate::relations::tests::row;

    #[test]
    fn test_accumulate() {
        let w_l = [Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)];
        let acc = accumulate(&w_l, Fr::from(10u64));
        assert_eq!(acc, vec![Fr::from(0u64), Fr::from(10u64), Fr::from(30u64)]);
    }

    #[test]
    fn test_step() {
        let params = RelationParameters {
            eta: Fr::from(10u64),
        };
        let good = row::<Fr>(&[
            (Entity::QAcc, 1),
            (Entity::WL, 2),
            (Entity::WAcc, 10),
            (Entity::WAccShift, 30),
        ]);
        let bad = row::<Fr>(&[
            (Entity::QAcc, 1),
            (Entity::WL, 2),
            (Entity::WAcc, 10),
            (Entity::WAccShift, 31),
        ]);
        assert_eq!(AccumulatorRelation::evaluate(&good, &params), Fr::ZERO);
        assert_eq!(AccumulatorRelation::evaluate(&bad, &params), Fr::from(1u64));
    }
}
