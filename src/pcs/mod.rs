//! Polynomial commitments: KZG over a pairing-friendly curve, and ZeroMorph
//! to open multilinear polynomials through it.

use std::cell::Cell;

use ark_ec::pairing::Pairing;
use derivative::Derivative;

pub mod iopattern;
pub mod kzg;
pub mod zeromorph;

/// A claim that the polynomial committed to in `commitment` evaluates to
/// `evaluation` at `point`.
#[derive(Derivative)]
#[derivative(Clone(bound = ""), Copy(bound = ""), Debug(bound = ""), PartialEq(bound = ""))]
pub struct OpeningClaim<E: Pairing> {
    pub commitment: E::G1,
    pub point: E::ScalarField,
    pub evaluation: E::ScalarField,
}

thread_local! {
    static PAIRING_COUNTER: Cell<usize> = const { Cell::new(0) };
}

/// Counts pairing checks performed on the current thread.
pub struct PairingCounter;

impl PairingCounter {
    pub(crate) fn add() -> usize {
        PAIRING_COUNTER.with(|counter| {
            let previous = counter.get();
            counter.set(previous + 1);
            previous
        })
    }

    pub fn reset() {
        PAIRING_COUNTER.with(|counter| counter.set(0));
    }

    pub fn get() -> usize {
        PAIRING_COUNTER.with(Cell::get)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_counter() {
        PairingCounter::reset();
        assert_eq!(PairingCounter::get(), 0);
        assert_eq!(PairingCounter::add(), 0);
        assert_eq!(PairingCounter::get(), 1);
        PairingCounter::reset();
        assert_eq!(PairingCounter::get(), 0);
    }

    #[test]
    fn test_pairing_counter_is_per_thread() {
        PairingCounter::reset();
        PairingCounter::add();
        let other = std::thread::spawn(PairingCounter::get).join().unwrap();
        assert_eq!(other, 0);
        assert_eq!(PairingCounter::get(), 1);
    }
}
