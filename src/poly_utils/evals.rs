use std::ops::Index;

use ark_ff::Field;

use super::multilinear::MultilinearPoint;

/// A multilinear polynomial `f` in `num_variables` unknowns, stored via its
/// evaluations over the hypercube `{0,1}^{num_variables}`.
///
/// Entry `i` is `f(b_0, ..., b_{n-1})` where `b_k` is bit `k` of `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationsList<F> {
    evals: Vec<F>,
    /// Ensures `evals.len() = 2^{num_variables}`.
    num_variables: usize,
}

impl<F> EvaluationsList<F>
where
    F: Field,
{
    /// **Panics:**
    /// - If `evals.len()` is **not** a power of two.
    pub fn new(evals: Vec<F>) -> Self {
        let len = evals.len();
        assert!(
            len.is_power_of_two(),
            "Evaluation list length must be a power of two."
        );

        Self {
            evals,
            num_variables: len.ilog2() as usize,
        }
    }

    /// The all-`value` table on `num_variables` variables.
    pub fn constant(value: F, num_variables: usize) -> Self {
        Self::new(vec![value; 1 << num_variables])
    }

    /// Evaluates the polynomial at an arbitrary point:
    ///
    /// ```ignore
    /// f(p) = Σ_{x ∈ {0,1}^n} eq(x, p) * f(x)
    /// ```
    ///
    /// Folds one variable at a time, so the cost is linear in the table size.
    pub fn evaluate(&self, point: &MultilinearPoint<F>) -> F {
        assert_eq!(point.num_variables(), self.num_variables);
        let mut current = self.clone();
        for &u in &point.0 {
            current = current.fold(u);
        }
        current.evals[0]
    }

    /// Binds the lowest variable `X_0` to `u`, halving the table.
    pub fn fold(&self, u: F) -> Self {
        assert!(self.num_variables > 0, "nothing left to fold");
        let evals = self
            .evals
            .chunks_exact(2)
            .map(|pair| pair[0] + u * (pair[1] - pair[0]))
            .collect();
        Self {
            evals,
            num_variables: self.num_variables - 1,
        }
    }

    /// The table of `f_shift`, where `f_shift[i] = f[i + 1]` and the last
    /// entry is zero.
    pub fn shifted(&self) -> Self {
        let mut evals = Vec::with_capacity(self.evals.len());
        evals.extend_from_slice(&self.evals[1..]);
        evals.push(F::ZERO);
        Self {
            evals,
            num_variables: self.num_variables,
        }
    }

    /// Adds `scalar * other` entry-wise.
    pub fn add_scaled(&mut self, scalar: F, other: &Self) {
        assert_eq!(self.num_variables, other.num_variables);
        for (lhs, rhs) in self.evals.iter_mut().zip(&other.evals) {
            *lhs += scalar * rhs;
        }
    }

    pub fn evals(&self) -> &[F] {
        &self.evals
    }

    pub const fn num_variables(&self) -> usize {
        self.num_variables
    }
}

impl<F> Index<usize> for EvaluationsList<F> {
    type Output = F;

    fn index(&self, index: usize) -> &Self::Output {
        &self.evals[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::fields::Field64;

    #[test]
    #[should_panic]
    fn test_new_rejects_non_power_of_two() {
        let _ = EvaluationsList::new(vec![Field64::from(1u64); 3]);
    }

    #[test]
    fn test_evaluate_on_hypercube() {
        let evals: Vec<_> = (0..8u64).map(Field64::from).collect();
        let list = EvaluationsList::new(evals);

        // index 0b110 has b_0 = 0, b_1 = 1, b_2 = 1
        let point = MultilinearPoint(vec![Field64::from(0u64), Field64::from(1u64), Field64::from(1u64)]);
        assert_eq!(list.evaluate(&point), Field64::from(6u64));
    }

    #[test]
    fn test_evaluate_matches_eq_sum() {
        let evals: Vec<_> = (0..8u64).map(|i| Field64::from(i * i + 3)).collect();
        let list = EvaluationsList::new(evals.clone());
        let point = MultilinearPoint(vec![Field64::from(9u64), Field64::from(4u64), Field64::from(13u64)]);

        let expected: Field64 = evals
            .iter()
            .enumerate()
            .map(|(i, &e)| e * point.eq_poly(i))
            .sum();
        assert_eq!(list.evaluate(&point), expected);
    }

    #[test]
    fn test_fold_binds_lowest_variable() {
        let list = EvaluationsList::new(vec![
            Field64::from(1u64),
            Field64::from(3u64),
            Field64::from(5u64),
            Field64::from(9u64),
        ]);
        let folded = list.fold(Field64::from(2u64));
        // pairs (1, 3) and (5, 9) at X_0 = 2
        assert_eq!(folded.evals(), &[Field64::from(5u64), Field64::from(13u64)]);
        assert_eq!(folded.num_variables(), 1);
    }

    #[test]
    fn test_shifted() {
        let list = EvaluationsList::new(vec![
            Field64::from(0u64),
            Field64::from(3u64),
            Field64::from(5u64),
            Field64::from(9u64),
        ]);
        assert_eq!(
            list.shifted().evals(),
            &[
                Field64::from(3u64),
                Field64::from(5u64),
                Field64::from(9u64),
                Field64::from(0u64)
            ]
        );
    }

    #[test]
    fn test_constant_and_add_scaled() {
        let mut list = EvaluationsList::new(vec![Field64::from(1u64), Field64::from(2u64)]);
        list.add_scaled(Field64::from(3u64), &EvaluationsList::constant(Field64::from(1u64), 1));
        assert_eq!(list.evals(), &[Field64::from(4u64), Field64::from(5u64)]);
    }
}
