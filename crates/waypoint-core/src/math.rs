//! Integer helpers.

use num_traits::PrimInt;

/// Greatest common divisor using the binary (Stein) algorithm.
///
/// Inputs must be non-negative. `gcd(0, n) == n`.
pub fn gcd<T: PrimInt>(a: T, b: T) -> T {
    if a.is_zero() {
        return b;
    }
    if b.is_zero() {
        return a;
    }

    let shift = (a | b).trailing_zeros() as usize;
    let mut a = a >> a.trailing_zeros() as usize;
    let mut b = b;
    loop {
        b = b >> b.trailing_zeros() as usize;
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        b = b - a;
        if b.is_zero() {
            break;
        }
    }
    a << shift
}

/// Least common multiple, or `None` if it does not fit in `T`.
///
/// Inputs must be non-negative; `lcm(0, n) == Some(0)`.
pub fn lcm<T: PrimInt>(a: T, b: T) -> Option<T> {
    if a.is_zero() || b.is_zero() {
        return Some(T::zero());
    }
    (a / gcd(a, b)).checked_mul(&b)
}
