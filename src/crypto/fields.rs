use ark_ff::{Field, Fp64, MontBackend, MontConfig, PrimeField};

pub trait FieldWithSize {
    fn field_size_in_bits() -> usize;
}

impl<F> FieldWithSize for F
where
    F: Field,
{
    fn field_size_in_bits() -> usize {
        F::BasePrimeField::MODULUS_BIT_SIZE as usize * F::extension_degree() as usize
    }
}

/// Goldilocks, used by the polynomial utilities' unit tests where a small
/// field keeps the expected values readable.
#[derive(MontConfig)]
#[modulus = "18446744069414584321"]
#[generator = "7"]
pub struct FConfig64;
pub type Field64 = Fp64<MontBackend<FConfig64, 1>>;
