use ark_ff::Field;

/// A point `(u_0, ..., u_{d-1})` in `F^d`.
///
/// Coordinate `u_k` binds variable `X_k`, which selects bit `k` of a hypercube
/// index (little-endian). Sumcheck produces the coordinates in this order.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct MultilinearPoint<F>(pub Vec<F>);

impl<F> MultilinearPoint<F>
where
    F: Field,
{
    /// Returns the number of variables (dimension `d`).
    #[inline]
    pub fn num_variables(&self) -> usize {
        self.0.len()
    }

    /// Evaluates the pow polynomial `pow_β(u) = ∏ (1 - u_k + u_k * β_k)`.
    pub fn pow_poly(&self, betas: &[F]) -> F {
        assert_eq!(self.num_variables(), betas.len());
        self.0
            .iter()
            .zip(betas)
            .fold(F::ONE, |acc, (&u, &beta)| acc * (F::ONE + u * (beta - F::ONE)))
    }

    /// Evaluates `Z(u) = ∏ u_k (1 - u_k)`, the polynomial used to mask
    /// witnesses. It vanishes on the boolean hypercube.
    pub fn masking_factor(&self) -> F {
        self.0
            .iter()
            .fold(F::ONE, |acc, &u| acc * u * (F::ONE - u))
    }
}

#[cfg(test)]
impl<F: Field> MultilinearPoint<F> {
    /// `eq(u, b) = ∏ (u_k * b_k + (1 - u_k) * (1 - b_k))` for the hypercube
    /// point `b` whose bits are `index`.
    pub(crate) fn eq_poly(&self, index: usize) -> F {
        assert!(index < (1 << self.num_variables()));
        self.0
            .iter()
            .enumerate()
            .fold(F::ONE, |acc, (k, &u)| {
                if (index >> k) & 1 == 1 {
                    acc * u
                } else {
                    acc * (F::ONE - u)
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::fields::Field64;

    #[test]
    fn test_num_variables() {
        let point = MultilinearPoint::<Field64>(vec![Field64::from(1u64), Field64::from(0u64)]);
        assert_eq!(point.num_variables(), 2);
    }

    #[test]
    fn test_eq_poly_on_hypercube() {
        // u = (1, 0) is the hypercube point with index 0b01
        let point = MultilinearPoint(vec![Field64::from(1u64), Field64::from(0u64)]);
        assert_eq!(point.eq_poly(0b01), Field64::from(1u64));
        assert_eq!(point.eq_poly(0b00), Field64::from(0u64));
        assert_eq!(point.eq_poly(0b10), Field64::from(0u64));
        assert_eq!(point.eq_poly(0b11), Field64::from(0u64));
    }

    #[test]
    fn test_eq_poly_sums_to_one() {
        let point = MultilinearPoint(vec![
            Field64::from(5u64),
            Field64::from(7u64),
            Field64::from(11u64),
        ]);
        let total: Field64 = (0..8).map(|i| point.eq_poly(i)).sum();
        assert_eq!(total, Field64::from(1u64));
    }

    #[test]
    fn test_pow_poly() {
        let point = MultilinearPoint(vec![Field64::from(2u64), Field64::from(3u64)]);
        let betas = [Field64::from(5u64), Field64::from(7u64)];
        // (1 + 2 * 4) * (1 + 3 * 6) = 9 * 19
        assert_eq!(point.pow_poly(&betas), Field64::from(171u64));

        // On the hypercube pow_β(b) = ∏_{b_k = 1} β_k
        let corner = MultilinearPoint(vec![Field64::from(1u64), Field64::from(0u64)]);
        assert_eq!(corner.pow_poly(&betas), Field64::from(5u64));
    }

    #[test]
    fn test_masking_factor() {
        let corner = MultilinearPoint(vec![Field64::from(1u64), Field64::from(0u64)]);
        assert_eq!(corner.masking_factor(), Field64::from(0u64));

        let point = MultilinearPoint(vec![Field64::from(2u64), Field64::from(3u64)]);
        // 2 * (1 - 2) * 3 * (1 - 3) = 12
        assert_eq!(point.masking_factor(), Field64::from(12u64));
    }
}
