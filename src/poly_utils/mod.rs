pub mod evals;
pub mod multilinear;
pub mod univariate;

pub use self::{
    evals::EvaluationsList,
    multilinear::MultilinearPoint,
    univariate::{RoundPolynomial, Univariate},
};
