use ark_bn254::{Bn254, Fr};

use super::Flavor;
use crate::{
    crypto::transcript::Blake3Hasher,
    poly_utils::Univariate,
    relations::{Entity, EntityLayout, RelationKind},
};

/// [`super::UltraFlavor`] extended with boolean constraints on `w_o`.
#[derive(Debug, Clone, Copy)]
pub struct MegaFlavor;

impl Flavor for MegaFlavor {
    type Curve = Bn254;
    type Hasher = Blake3Hasher;
    type RoundUnivariate = Univariate<Fr, 5>;

    const NAME: &'static str = "mega";
    const HAS_ZK: bool = false;
    const RELATIONS: &'static [RelationKind] = &[
        RelationKind::Arithmetic,
        RelationKind::Accumulator,
        RelationKind::Booleanity,
    ];
    const ENTITIES: EntityLayout = EntityLayout {
        precomputed: &[
            Entity::QM,
            Entity::QL,
            Entity::QR,
            Entity::QO,
            Entity::QC,
            Entity::QAcc,
            Entity::QBool,
        ],
        witness: &[Entity::WL, Entity::WR, Entity::WO, Entity::WAcc],
        shifted: &[Entity::WAccShift],
    };
}
