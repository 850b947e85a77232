use std::fmt::Debug;

use ark_ff::{batch_inversion, Field};
use ark_poly::{univariate::DensePolynomial, DenseUVPolynomial};

/// A univariate of degree `< N` stored by its evaluations at `0, 1, ..., N - 1`.
///
/// Sumcheck round polynomials travel in this form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Univariate<F, const N: usize> {
    evaluations: [F; N],
}

/// The per-round message of Sumcheck: a fixed number of evaluations.
///
/// Flavors pick a concrete implementor whose `LENGTH` equals their
/// `BATCHED_RELATION_PARTIAL_LENGTH`.
pub trait RoundPolynomial<F: Field>: Clone + Debug + Send + Sync {
    const LENGTH: usize;

    /// Returns `None` if `evaluations` does not hold exactly `LENGTH` values.
    fn from_evaluations(evaluations: &[F]) -> Option<Self>;

    fn evaluations(&self) -> &[F];

    /// `S(0) + S(1)`, the value checked against the running target sum.
    fn sum_over_boolean(&self) -> F {
        let evals = self.evaluations();
        evals[0] + evals[1]
    }

    /// Evaluates the polynomial at `u` by barycentric interpolation over
    /// `0..LENGTH`.
    fn evaluate(&self, u: F) -> F {
        barycentric_evaluate(self.evaluations(), u)
    }
}

impl<F: Field, const N: usize> Univariate<F, N> {
    pub const fn new(evaluations: [F; N]) -> Self {
        Self { evaluations }
    }
}

impl<F: Field, const N: usize> RoundPolynomial<F> for Univariate<F, N> {
    const LENGTH: usize = N;

    fn from_evaluations(evaluations: &[F]) -> Option<Self> {
        let evaluations: [F; N] = evaluations.try_into().ok()?;
        Some(Self { evaluations })
    }

    fn evaluations(&self) -> &[F] {
        &self.evaluations
    }
}

/// Evaluates the unique polynomial of degree `< evals.len()` through
/// `(i, evals[i])` at `u`.
pub fn barycentric_evaluate<F: Field>(evals: &[F], u: F) -> F {
    let n = evals.len();
    let domain: Vec<F> = (0..n as u64).map(F::from).collect();

    if let Some(i) = domain.iter().position(|&x| x == u) {
        return evals[i];
    }

    // d_i = (u - i) * ∏_{j != i} (i - j)
    let mut denominators: Vec<F> = (0..n)
        .map(|i| {
            domain
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(u - domain[i], |acc, (_, &x_j)| acc * (domain[i] - x_j))
        })
        .collect();
    batch_inversion(&mut denominators);

    let vanishing: F = domain.iter().map(|&x| u - x).product();
    vanishing
        * evals
            .iter()
            .zip(&denominators)
            .map(|(&y, &d)| y * d)
            .sum::<F>()
}

/// Quotient of `poly` by `(X - point)`, dropping the remainder.
pub fn divide_by_linear<F: Field>(poly: &DensePolynomial<F>, point: F) -> DensePolynomial<F> {
    &*poly / &DensePolynomial::from_coefficients_slice(&[-point, F::ONE])
}

#[cfg(test)]
mod tests {
    use ark_bn254::Fr;
    use ark_ff::UniformRand;
    use ark_poly::Polynomial;

    use super::*;
    use crate::crypto::fields::Field64;

    // Computes a polynomial that vanishes on points
    fn vanishing_poly<'a, F: Field>(
        points: impl IntoIterator<Item = &'a F>,
    ) -> DensePolynomial<F> {
        let mut vanishing_poly: DensePolynomial<_> =
            DensePolynomial::from_coefficients_slice(&[F::ONE]);
        for a in points {
            vanishing_poly =
                vanishing_poly.naive_mul(&DensePolynomial::from_coefficients_slice(&[-*a, F::ONE]));
        }
        vanishing_poly
    }

    #[test]
    fn test_from_evaluations_checks_length() {
        let evals = [Field64::from(1u64), Field64::from(2u64), Field64::from(3u64)];
        assert!(Univariate::<Field64, 3>::from_evaluations(&evals).is_some());
        assert!(Univariate::<Field64, 4>::from_evaluations(&evals).is_none());
        assert_eq!(<Univariate<Field64, 5> as RoundPolynomial<Field64>>::LENGTH, 5);
    }

    #[test]
    fn test_evaluate_inside_domain() {
        let univariate = Univariate::new([
            Field64::from(4u64),
            Field64::from(7u64),
            Field64::from(1u64),
        ]);
        assert_eq!(univariate.evaluate(Field64::from(1u64)), Field64::from(7u64));
        assert_eq!(univariate.sum_over_boolean(), Field64::from(11u64));
    }

    #[test]
    fn test_evaluate_matches_coefficients() {
        let mut rng = ark_std::test_rng();
        // p(X) = 3 + 2X + 5X^2 + X^3
        let poly = DensePolynomial::from_coefficients_vec(vec![
            Fr::from(3u64),
            Fr::from(2u64),
            Fr::from(5u64),
            Fr::from(1u64),
        ]);
        let evals: Vec<Fr> = (0..4u64).map(|i| poly.evaluate(&Fr::from(i))).collect();
        let univariate = Univariate::<Fr, 4>::from_evaluations(&evals).unwrap();

        for _ in 0..5 {
            let u = Fr::rand(&mut rng);
            assert_eq!(univariate.evaluate(u), poly.evaluate(&u));
        }
    }

    #[test]
    fn test_divide_by_linear() {
        let mut rng = ark_std::test_rng();
        let point = Fr::rand(&mut rng);
        let factor = DensePolynomial::from_coefficients_vec(vec![Fr::rand(&mut rng); 3]);
        let other = Fr::rand(&mut rng);
        let product = &factor * &vanishing_poly([&point, &other]);
        let expected = &factor * &vanishing_poly([&other]);

        assert_eq!(divide_by_linear(&product, point), expected);
    }
}
