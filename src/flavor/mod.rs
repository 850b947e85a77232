//! Compile-time protocol configurations.
//!
//! A flavor fixes the curve, the transcript hash, the relations and the
//! polynomials they read. All degree bounds are derived from the relation set,
//! and inconsistent combinations fail to compile once a verifier or prover is
//! instantiated with the flavor.

use ark_ec::pairing::Pairing;

use crate::{
    crypto::transcript::TranscriptHasher,
    errors::FlavorError,
    parameters::{DegreeBounds, ZkLengthPolicy},
    poly_utils::RoundPolynomial,
    relations::{EntityLayout, RelationKind},
};

pub mod linear;
pub mod mega;
pub mod plonkish;
pub mod ultra;

pub use self::{
    linear::{LinearFlavor, LinearZkFlavor},
    mega::MegaFlavor,
    plonkish::{PlonkishFlavor, PlonkishZkFlavor},
    ultra::{UltraFlavor, UltraKeccakFlavor, UltraZkFlavor},
};

/// Scalar field of a flavor's curve.
pub type FF<F> = <<F as Flavor>::Curve as Pairing>::ScalarField;

pub type Commitment<F> = <<F as Flavor>::Curve as Pairing>::G1Affine;

/// Projective form of [`Commitment`], as absorbed by the transcript.
pub type G1<F> = <<F as Flavor>::Curve as Pairing>::G1;

pub trait Flavor: Sized + Send + Sync + 'static {
    type Curve: Pairing;
    type Hasher: TranscriptHasher;
    /// Must hold exactly `BATCHED_RELATION_PARTIAL_LENGTH` evaluations.
    type RoundUnivariate: RoundPolynomial<FF<Self>>;

    const NAME: &'static str;
    const HAS_ZK: bool;
    const ZK_LENGTH_POLICY: ZkLengthPolicy = ZkLengthPolicy::WitnessDegree;
    const RELATIONS: &'static [RelationKind];
    const ENTITIES: EntityLayout;

    const NUM_RELATIONS: usize = Self::RELATIONS.len();
    const NON_ZK_MAX_PARTIAL_RELATION_LENGTH: usize =
        non_zk_max_partial_relation_length(Self::RELATIONS);
    const MAX_WITNESS_DEGREE: usize = max_witness_degree(Self::RELATIONS);
    const BOUNDS: DegreeBounds = DegreeBounds::new(
        Self::NON_ZK_MAX_PARTIAL_RELATION_LENGTH,
        Self::MAX_WITNESS_DEGREE,
        Self::HAS_ZK,
        Self::ZK_LENGTH_POLICY,
    );
    const MAX_PARTIAL_RELATION_LENGTH: usize = Self::BOUNDS.max_partial_relation_length;
    const BATCHED_RELATION_PARTIAL_LENGTH: usize = Self::BOUNDS.batched_relation_partial_length;

    /// Evaluated by every prover and verifier constructor; a flavor that
    /// violates its degree or layout constraints does not compile.
    const CONFIGURATION_CHECK: () = match validate(
        Self::RELATIONS,
        &Self::ENTITIES,
        Self::HAS_ZK,
        Self::ZK_LENGTH_POLICY,
        <Self::RoundUnivariate as RoundPolynomial<FF<Self>>>::LENGTH,
    ) {
        Ok(_) => (),
        Err(FlavorError::NoRelations) => panic!("flavor declares no relations"),
        Err(FlavorError::MissingEntity { .. }) => {
            panic!("a relation reads an entity the flavor does not carry")
        }
        Err(FlavorError::RoundUnivariateLength { .. }) => {
            panic!("round univariate length differs from the batched relation length")
        }
        Err(FlavorError::RelationTooLong { .. }) => {
            panic!("a relation exceeds the maximum partial relation length")
        }
        Err(FlavorError::ZkBoundTooSmall { .. }) => {
            panic!("ZK bound leaves no room for the masking polynomial")
        }
    };
}

/// `max_r (partial_degree(r) + 1)`.
pub const fn non_zk_max_partial_relation_length(relations: &[RelationKind]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < relations.len() {
        let length = relations[i].partial_length();
        if length > max {
            max = length;
        }
        i += 1;
    }
    max
}

pub const fn max_witness_degree(relations: &[RelationKind]) -> usize {
    let mut max = 0;
    let mut i = 0;
    while i < relations.len() {
        let degree = relations[i].witness_degree();
        if degree > max {
            max = degree;
        }
        i += 1;
    }
    max
}

/// Checks that a relation set, layout and round univariate fit together and
/// returns the resulting bounds.
///
/// For ZK flavors each witness is masked by a polynomial of degree two in the
/// last round variable, so the bound must grow by the largest witness degree.
/// `UniformIncrement` therefore only passes for relations linear in the
/// witnesses.
pub const fn validate(
    relations: &[RelationKind],
    layout: &EntityLayout,
    has_zk: bool,
    zk_length_policy: ZkLengthPolicy,
    round_univariate_length: usize,
) -> Result<DegreeBounds, FlavorError> {
    if relations.is_empty() {
        return Err(FlavorError::NoRelations);
    }

    let non_zk = non_zk_max_partial_relation_length(relations);
    let witness_degree = max_witness_degree(relations);
    let bounds = DegreeBounds::new(non_zk, witness_degree, has_zk, zk_length_policy);

    let mut i = 0;
    while i < relations.len() {
        let relation = relations[i];
        let entities = relation.entities();
        let mut j = 0;
        while j < entities.len() {
            if !layout.contains(entities[j]) {
                return Err(FlavorError::MissingEntity {
                    relation: relation.name(),
                    entity: entities[j].label(),
                });
            }
            j += 1;
        }
        if relation.partial_length() > bounds.max_partial_relation_length {
            return Err(FlavorError::RelationTooLong {
                relation: relation.name(),
                length: relation.partial_length(),
                bound: bounds.max_partial_relation_length,
            });
        }
        i += 1;
    }

    if round_univariate_length != bounds.batched_relation_partial_length {
        return Err(FlavorError::RoundUnivariateLength {
            expected: bounds.batched_relation_partial_length,
            got: round_univariate_length,
        });
    }

    if has_zk {
        if bounds.batched_relation_partial_length < non_zk + 2
            || bounds.max_partial_relation_length < non_zk + witness_degree
        {
            return Err(FlavorError::ZkBoundTooSmall {
                batched: bounds.batched_relation_partial_length,
                non_zk,
            });
        }
    }

    Ok(bounds)
}

/// Runtime counterpart of [`Flavor::CONFIGURATION_CHECK`], used for reports.
pub fn check_configuration<F: Flavor>() -> Result<DegreeBounds, FlavorError> {
    validate(
        F::RELATIONS,
        &F::ENTITIES,
        F::HAS_ZK,
        F::ZK_LENGTH_POLICY,
        <F::RoundUnivariate as RoundPolynomial<FF<F>>>::LENGTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relations::Entity;

    const PLONKISH_LAYOUT: EntityLayout = EntityLayout {
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

    fn assert_bounds<F: Flavor>() {
        let bounds = check_configuration::<F>().unwrap();
        assert_eq!(bounds, F::BOUNDS);
        assert_eq!(
            F::BATCHED_RELATION_PARTIAL_LENGTH,
            F::MAX_PARTIAL_RELATION_LENGTH + 1
        );
        for relation in F::RELATIONS {
            assert!(relation.partial_length() <= F::MAX_PARTIAL_RELATION_LENGTH);
        }
        if F::HAS_ZK {
            assert!(F::BATCHED_RELATION_PARTIAL_LENGTH >= F::NON_ZK_MAX_PARTIAL_RELATION_LENGTH + 2);
        } else {
            assert_eq!(
                F::MAX_PARTIAL_RELATION_LENGTH,
                F::NON_ZK_MAX_PARTIAL_RELATION_LENGTH
            );
        }
    }

    #[test]
    fn test_all_flavors_are_consistent() {
        assert_bounds::<UltraFlavor>();
        assert_bounds::<UltraKeccakFlavor>();
        assert_bounds::<UltraZkFlavor>();
        assert_bounds::<MegaFlavor>();
        assert_bounds::<PlonkishFlavor>();
        assert_bounds::<PlonkishZkFlavor>();
        assert_bounds::<LinearFlavor>();
        assert_bounds::<LinearZkFlavor>();
    }

    #[test]
    fn test_linear_flavor_lengths() {
        assert_eq!(LinearFlavor::BATCHED_RELATION_PARTIAL_LENGTH, 4);
        assert_eq!(LinearZkFlavor::BATCHED_RELATION_PARTIAL_LENGTH, 5);
    }

    #[test]
    fn test_plonkish_zk_uses_witness_degree() {
        assert_eq!(PlonkishFlavor::NON_ZK_MAX_PARTIAL_RELATION_LENGTH, 4);
        assert_eq!(PlonkishZkFlavor::MAX_WITNESS_DEGREE, 2);
        assert_eq!(PlonkishZkFlavor::MAX_PARTIAL_RELATION_LENGTH, 6);
        assert_eq!(PlonkishZkFlavor::BATCHED_RELATION_PARTIAL_LENGTH, 7);
    }

    #[test]
    fn test_validate_rejects_empty_relations() {
        assert_eq!(
            validate(&[], &PLONKISH_LAYOUT, false, ZkLengthPolicy::WitnessDegree, 1),
            Err(FlavorError::NoRelations)
        );
    }

    #[test]
    fn test_validate_rejects_missing_entity() {
        assert_eq!(
            validate(
                &[RelationKind::Accumulator],
                &PLONKISH_LAYOUT,
                false,
                ZkLengthPolicy::WitnessDegree,
                4
            ),
            Err(FlavorError::MissingEntity {
                relation: "Accumulator",
                entity: "Q_ACC"
            })
        );
    }

    #[test]
    fn test_validate_rejects_wrong_univariate_length() {
        assert_eq!(
            validate(
                &[RelationKind::Arithmetic],
                &PLONKISH_LAYOUT,
                false,
                ZkLengthPolicy::WitnessDegree,
                4
            ),
            Err(FlavorError::RoundUnivariateLength {
                expected: 5,
                got: 4
            })
        );
    }

    #[test]
    fn test_validate_uniform_increment() {
        // Fine for relations linear in the witnesses.
        let linear = validate(
            &[RelationKind::Linear],
            &PLONKISH_LAYOUT,
            true,
            ZkLengthPolicy::UniformIncrement,
            5,
        )
        .unwrap();
        assert_eq!(linear.batched_relation_partial_length, 5);

        // Too small once a witness appears squared.
        assert_eq!(
            validate(
                &[RelationKind::Arithmetic],
                &PLONKISH_LAYOUT,
                true,
                ZkLengthPolicy::UniformIncrement,
                6
            ),
            Err(FlavorError::ZkBoundTooSmall {
                batched: 6,
                non_zk: 4
            })
        );
    }

    #[test]
    fn test_validate_accepts_shifts_in_zk() {
        const WITH_SHIFT: EntityLayout = EntityLayout {
            precomputed: &[Entity::QL, Entity::QR, Entity::QO, Entity::QC, Entity::QAcc],
            witness: &[Entity::WL, Entity::WR, Entity::WO, Entity::WAcc],
            shifted: &[Entity::WAccShift],
        };
        let bounds = validate(
            &[RelationKind::Linear, RelationKind::Accumulator],
            &WITH_SHIFT,
            true,
            ZkLengthPolicy::WitnessDegree,
            5,
        )
        .unwrap();
        assert_eq!(bounds.batched_relation_partial_length, 5);

        assert_eq!(UltraZkFlavor::ENTITIES.shifted, &[Entity::WAccShift]);
        assert_eq!(UltraZkFlavor::MAX_PARTIAL_RELATION_LENGTH, 6);
        assert_eq!(UltraZkFlavor::BATCHED_RELATION_PARTIAL_LENGTH, 7);
    }
}
