//! Enumeration of mixed partial derivatives.
//!
//! A partial derivative of order `n` on a reference cell of topological dimension `d` is
//! identified by an ordered tuple of `n` directions, each in `[0, d)`. The enumeration is
//! deliberately dense: mixed partials that differ only in the order of differentiation
//! (e.g. ∂²/∂x∂y and ∂²/∂y∂x) are distinct entries, which gives downstream consumers a
//! uniform tensor layout of exactly `d^n` entries.

/// Returns the number of order-`order` partial derivatives on a cell of the given
/// topological dimension, i.e. `topological_dimension ^ order`.
///
/// The power is computed by repeated integer multiplication so that the count is exact
/// and the order-zero case needs no special handling.
pub fn num_derivatives(topological_dimension: usize, order: usize) -> usize {
    let mut count = 1;
    for _ in 0..order {
        count *= topological_dimension;
    }
    count
}

/// Returns all ordered direction tuples for derivatives of the given order.
///
/// Entry `r` of the result is the base-`topological_dimension` digit expansion of `r`
/// with `order` digits, most significant digit first. For `order == 0` the result is a
/// single empty tuple, corresponding to the plain (underived) basis value.
pub fn derivative_combinations(topological_dimension: usize, order: usize) -> Vec<Vec<usize>> {
    let num_derivatives = num_derivatives(topological_dimension, order);
    let mut combinations = Vec::with_capacity(num_derivatives);
    for index in 0..num_derivatives {
        let mut digits = vec![0; order];
        let mut remainder = index;
        for digit in digits.iter_mut().rev() {
            *digit = remainder % topological_dimension;
            remainder /= topological_dimension;
        }
        combinations.push(digits);
    }
    combinations
}
