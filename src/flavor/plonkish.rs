use ark_bn254::{Bn254, Fr};

use super::Flavor;
use crate::{
    crypto::transcript::Blake3Hasher,
    poly_utils::Univariate,
    relations::{Entity, EntityLayout, RelationKind},
};

const PLONKISH_RELATIONS: &[RelationKind] = &[RelationKind::Arithmetic, RelationKind::Booleanity];

// No shifted polynomials, so the layout can be masked.
const PLONKISH_ENTITIES: EntityLayout = EntityLayout {
    precomputed: &[
        Entity::QM,
        Entity::QL,
        Entity::QR,
        Entity::QO,
        Entity::QC,
        Entity::QBool,
    ],
    witness: &[Entity::WL, Entity::WR, Entity::WO],
    shifted: &[],
};

#[derive(Debug, Clone, Copy)]
pub struct PlonkishFlavor;

impl Flavor for PlonkishFlavor {
    type Curve = Bn254;
    type Hasher = Blake3Hasher;
    type RoundUnivariate = Univariate<Fr, 5>;

    const NAME: &'static str = "plonkish";
    const HAS_ZK: bool = false;
    const RELATIONS: &'static [RelationKind] = PLONKISH_RELATIONS;
    const ENTITIES: EntityLayout = PLONKISH_ENTITIES;
}

/// Zero-knowledge variant of [`PlonkishFlavor`]. Both relations are quadratic
/// in the witnesses, so rounds carry two extra evaluations.
#[derive(Debug, Clone, Copy)]
pub struct PlonkishZkFlavor;

impl Flavor for PlonkishZkFlavor {
    type Curve = Bn254;
    type Hasher = Blake3Hasher;
    type RoundUnivariate = Univariate<Fr, 7>;

    const NAME: &'static str = "plonkish-zk";
    const HAS_ZK: bool = true;
    const RELATIONS: &'static [RelationKind] = PLONKISH_RELATIONS;
    const ENTITIES: EntityLayout = PLONKISH_ENTITIES;
}
