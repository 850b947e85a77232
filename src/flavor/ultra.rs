use ark_bn254::{Bn254, Fr};

use super::Flavor;
use crate::{
    crypto::transcript::{Blake3Hasher, KeccakHasher},
    poly_utils::Univariate,
    relations::{Entity, EntityLayout, RelationKind},
};

const ULTRA_RELATIONS: &[RelationKind] = &[RelationKind::Arithmetic, RelationKind::Accumulator];

const ULTRA_ENTITIES: EntityLayout = EntityLayout {
    precomputed: &[
        Entity::QM,
        Entity::QL,
        Entity::QR,
        Entity::QO,
        Entity::QC,
        Entity::QAcc,
    ],
    witness: &[Entity::WL, Entity::WR, Entity::WO, Entity::WAcc],
    shifted: &[Entity::WAccShift],
};

/// Arithmetic gates plus a running accumulator over BN254, Blake3 transcript.
#[derive(Debug, Clone, Copy)]
pub struct UltraFlavor;

impl Flavor for UltraFlavor {
    type Curve = Bn254;
    type Hasher = Blake3Hasher;
    type RoundUnivariate = Univariate<Fr, 5>;

    const NAME: &'static str = "ultra";
    const HAS_ZK: bool = false;
    const RELATIONS: &'static [RelationKind] = ULTRA_RELATIONS;
    const ENTITIES: EntityLayout = ULTRA_ENTITIES;
}

/// [`UltraFlavor`] with a Keccak transcript, for verifiers that hash with
/// Keccak natively.
#[derive(Debug, Clone, Copy)]
pub struct UltraKeccakFlavor;

impl Flavor for UltraKeccakFlavor {
    type Curve = Bn254;
    type Hasher = KeccakHasher;
    type RoundUnivariate = Univariate<Fr, 5>;

    const NAME: &'static str = "ultra-keccak";
    const HAS_ZK: bool = false;
    const RELATIONS: &'static [RelationKind] = ULTRA_RELATIONS;
    const ENTITIES: EntityLayout = ULTRA_ENTITIES;
}

/// [`UltraFlavor`] with masked witnesses. The accumulator shift is opened
/// from the unmasked commitment.
#[derive(Debug, Clone, Copy)]
pub struct UltraZkFlavor;

impl Flavor for UltraZkFlavor {
    type Curve = Bn254;
    type Hasher = Blake3Hasher;
    type RoundUnivariate = Univariate<Fr, 7>;

    const NAME: &'static str = "ultra-zk";
    const HAS_ZK: bool = true;
    const RELATIONS: &'static [RelationKind] = ULTRA_RELATIONS;
    const ENTITIES: EntityLayout = ULTRA_ENTITIES;
}
