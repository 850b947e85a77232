use ark_ff::Field;

// checks whether the given number n is a power of two.
pub const fn is_power_of_two(n: usize) -> bool {
    n != 0 && n.is_power_of_two()
}

/// Position of the most significant bit, i.e. `log2` for powers of two.
///
/// Returns `0` for `n == 0`.
pub const fn get_msb(n: usize) -> usize {
    if n == 0 {
        0
    } else {
        (usize::BITS - 1 - n.leading_zeros()) as usize
    }
}

/// expand_randomness outputs the vector [1, base, base^2, base^3, ...] of length len.
pub fn expand_randomness<F: Field>(base: F, len: usize) -> Vec<F> {
    let mut res = Vec::with_capacity(len);
    let mut acc = F::ONE;
    for _ in 0..len {
        res.push(acc);
        acc *= base;
    }

    res
}

/// Computes `Φ_m(a) = 1 + a + a^2 + ... + a^(2^m - 1)`.
///
/// Uses `Φ_m(a) = Π_{j < m} (1 + a^(2^j))`, which needs no inversion and is
/// well defined at `a = 1`.
pub fn phi<F: Field>(a: F, m: usize) -> F {
    let mut acc = F::ONE;
    let mut power = a;
    for _ in 0..m {
        acc *= F::ONE + power;
        power.square_in_place();
    }
    acc
}
