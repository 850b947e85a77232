//! Constraint families and the polynomials they read.
//!
//! A relation is a polynomial identity over the values of one row of the
//! execution trace. Every relation here contributes a single subrelation; the
//! flavor batches them with powers supplied by the transcript.

use std::ops::Index;

use ark_ff::Field;

pub mod accumulator;
pub mod arithmetic;
pub mod booleanity;
pub mod linear;

pub use self::{
    accumulator::AccumulatorRelation, arithmetic::ArithmeticRelation,
    booleanity::BooleanityRelation, linear::LinearRelation,
};

/// A polynomial the protocol commits to or opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    // Selectors, committed in the verification key.
    QM,
    QL,
    QR,
    QO,
    QC,
    QAcc,
    QBool,
    // Witnesses, committed in the proof.
    WL,
    WR,
    WO,
    /// Running sum, computed after `eta` is known.
    WAcc,
    /// `W_ACC` read one row ahead.
    WAccShift,
}

impl Entity {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::QM => "Q_M",
            Self::QL => "Q_L",
            Self::QR => "Q_R",
            Self::QO => "Q_O",
            Self::QC => "Q_C",
            Self::QAcc => "Q_ACC",
            Self::QBool => "Q_BOOL",
            Self::WL => "W_L",
            Self::WR => "W_R",
            Self::WO => "W_O",
            Self::WAcc => "W_ACC",
            Self::WAccShift => "W_ACC_SHIFT",
        }
    }

    /// Witnesses that depend on `eta` and are committed in the second round.
    pub const fn is_derived(&self) -> bool {
        matches!(self, Self::WAcc)
    }

    /// The polynomial a shifted entity is read from.
    pub const fn unshifted(&self) -> Option<Self> {
        match self {
            Self::WAccShift => Some(Self::WAcc),
            _ => None,
        }
    }

    const fn const_eq(&self, other: &Self) -> bool {
        *self as u8 == *other as u8
    }
}

/// The entities a flavor carries, grouped the way they are committed.
///
/// Values of all entities are always listed precomputed first, then witness,
/// then shifted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityLayout {
    pub precomputed: &'static [Entity],
    pub witness: &'static [Entity],
    pub shifted: &'static [Entity],
}

impl EntityLayout {
    pub const fn num_entities(&self) -> usize {
        self.precomputed.len() + self.witness.len() + self.shifted.len()
    }

    pub const fn contains(&self, entity: Entity) -> bool {
        const fn slice_contains(slice: &[Entity], entity: &Entity) -> bool {
            let mut i = 0;
            while i < slice.len() {
                if slice[i].const_eq(entity) {
                    return true;
                }
                i += 1;
            }
            false
        }
        slice_contains(self.precomputed, &entity)
            || slice_contains(self.witness, &entity)
            || slice_contains(self.shifted, &entity)
    }

    /// Position of `entity` in the flat value list.
    pub fn position(&self, entity: Entity) -> Option<usize> {
        self.iter().position(|e| e == entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.precomputed
            .iter()
            .chain(self.witness)
            .chain(self.shifted)
            .copied()
    }

    /// Witnesses committed before `eta` is drawn.
    pub fn first_round_witness(&self) -> impl Iterator<Item = Entity> + '_ {
        self.witness.iter().copied().filter(|e| !e.is_derived())
    }

    /// Witnesses committed after `eta` is drawn.
    pub fn derived_witness(&self) -> impl Iterator<Item = Entity> + '_ {
        self.witness.iter().copied().filter(|e| e.is_derived())
    }

    /// Flat position of the polynomial each shifted entity is the shift of.
    /// `None` if a source is missing from the layout.
    pub fn shift_sources(&self) -> Option<Vec<usize>> {
        self.shifted
            .iter()
            .map(|e| e.unshifted().and_then(|source| self.position(source)))
            .collect()
    }
}

/// One value per entity of a layout, e.g. the claimed evaluations at the
/// Sumcheck challenge, or the polynomial tables held by the prover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllEntities<T> {
    layout: EntityLayout,
    values: Vec<T>,
}

impl<T> AllEntities<T> {
    /// Returns `None` unless there is exactly one value per entity.
    pub fn from_values(layout: EntityLayout, values: Vec<T>) -> Option<Self> {
        (values.len() == layout.num_entities()).then_some(Self { layout, values })
    }

    pub fn from_fn(layout: EntityLayout, f: impl FnMut(Entity) -> T) -> Self {
        let values = layout.iter().map(f).collect();
        Self { layout, values }
    }

    pub const fn layout(&self) -> &EntityLayout {
        &self.layout
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn precomputed(&self) -> &[T] {
        &self.values[..self.layout.precomputed.len()]
    }

    pub fn witness(&self) -> &[T] {
        let start = self.layout.precomputed.len();
        &self.values[start..start + self.layout.witness.len()]
    }

    pub fn witness_mut(&mut self) -> &mut [T] {
        let start = self.layout.precomputed.len();
        &mut self.values[start..start + self.layout.witness.len()]
    }

    pub fn shifted(&self) -> &[T] {
        &self.values[self.layout.num_entities() - self.layout.shifted.len()..]
    }

    /// Precomputed and witness values, in that order.
    pub fn unshifted(&self) -> &[T] {
        &self.values[..self.layout.num_entities() - self.layout.shifted.len()]
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.layout.position(entity).map(|i| &self.values[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.layout.iter().zip(&self.values)
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> AllEntities<U> {
        AllEntities {
            layout: self.layout,
            values: self.values.iter().map(f).collect(),
        }
    }
}

impl<T> Index<Entity> for AllEntities<T> {
    type Output = T;

    /// **Panics** if the layout does not carry `entity`. Flavors check at
    /// compile time that their relations only read carried entities.
    fn index(&self, entity: Entity) -> &Self::Output {
        match self.get(entity) {
            Some(value) => value,
            None => panic!("entity {} is not part of the layout", entity.label()),
        }
    }
}

/// Challenges relations may read, drawn during Oink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelationParameters<F> {
    pub eta: F,
}

/// A polynomial identity that must vanish on every row.
pub trait Relation {
    const NAME: &'static str;
    /// `partial_degree + 1`: the number of evaluations needed to pin down the
    /// relation as a univariate in any single variable.
    const PARTIAL_LENGTH: usize;
    /// Total degree of the relation in witness entities.
    const WITNESS_DEGREE: usize;
    const ENTITIES: &'static [Entity];

    fn evaluate<F: Field>(values: &AllEntities<F>, params: &RelationParameters<F>) -> F;
}

/// The relations a flavor may be built from.
///
/// Dispatch is static: flavors list kinds in a const slice and the degree
/// bounds are computed from that slice at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Arithmetic,
    Linear,
    Booleanity,
    Accumulator,
}

macro_rules! dispatch {
    ($self:expr, $rel:ident => $body:expr) => {
        match $self {
            RelationKind::Arithmetic => {
                type $rel = ArithmeticRelation;
                $body
            }
            RelationKind::Linear => {
                type $rel = LinearRelation;
                $body
            }
            RelationKind::Booleanity => {
                type $rel = BooleanityRelation;
                $body
            }
            RelationKind::Accumulator => {
                type $rel = AccumulatorRelation;
                $body
            }
        }
    };
}

impl RelationKind {
    pub const fn name(&self) -> &'static str {
        dispatch!(self, R => R::NAME)
    }

    pub const fn partial_length(&self) -> usize {
        dispatch!(self, R => R::PARTIAL_LENGTH)
    }

    pub const fn witness_degree(&self) -> usize {
        dispatch!(self, R => R::WITNESS_DEGREE)
    }

    pub const fn entities(&self) -> &'static [Entity] {
        dispatch!(self, R => R::ENTITIES)
    }

    pub fn evaluate<F: Field>(&self, values: &AllEntities<F>, params: &RelationParameters<F>) -> F {
        dispatch!(self, R => R::evaluate(values, params))
    }
}

/// `Σ_j alpha_j · R_j(values)`.
///
/// **Panics** if `alphas` and `relations` differ in length.
pub fn batched_relation_value<F: Field>(
    relations: &[RelationKind],
    values: &AllEntities<F>,
    params: &RelationParameters<F>,
    alphas: &[F],
) -> F {
    assert_eq!(relations.len(), alphas.len());
    relations
        .iter()
        .zip(alphas)
        .map(|(relation, &alpha)| alpha * relation.evaluate(values, params))
        .sum()
}
