use ark_bn254::{Bn254, Fr};

use super::Flavor;
use crate::{
    crypto::transcript::Blake3Hasher,
    parameters::ZkLengthPolicy,
    poly_utils::Univariate,
    relations::{Entity, EntityLayout, RelationKind},
};

const LINEAR_ENTITIES: EntityLayout = EntityLayout {
    precomputed: &[Entity::QL, Entity::QR, Entity::QO, Entity::QC],
    witness: &[Entity::WL, Entity::WR, Entity::WO],
    shifted: &[],
};

/// A single relation of partial length three: four evaluations per round.
#[derive(Debug, Clone, Copy)]
pub struct LinearFlavor;

impl Flavor for LinearFlavor {
    type Curve = Bn254;
    type Hasher = Blake3Hasher;
    type RoundUnivariate = Univariate<Fr, 4>;

    const NAME: &'static str = "linear";
    const HAS_ZK: bool = false;
    const RELATIONS: &'static [RelationKind] = &[RelationKind::Linear];
    const ENTITIES: EntityLayout = LINEAR_ENTITIES;
}

/// ZK variant of [`LinearFlavor`]: five evaluations per round. With witness
/// degree one both ZK policies agree; this flavor uses the uniform one.
#[derive(Debug, Clone, Copy)]
pub struct LinearZkFlavor;

impl Flavor for LinearZkFlavor {
    type Curve = Bn254;
    type Hasher = Blake3Hasher;
    type RoundUnivariate = Univariate<Fr, 5>;

    const NAME: &'static str = "linear-zk";
    const HAS_ZK: bool = true;
    const ZK_LENGTH_POLICY: ZkLengthPolicy = ZkLengthPolicy::UniformIncrement;
    const RELATIONS: &'static [RelationKind] = &[RelationKind::Linear];
    const ENTITIES: EntityLayout = LINEAR_ENTITIES;
}
