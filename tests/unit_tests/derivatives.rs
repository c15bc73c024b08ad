use febasis::derivatives::{derivative_combinations, num_derivatives};
use proptest::prelude::*;

#[test]
fn num_derivatives_is_exact_integer_power() {
    assert_eq!(num_derivatives(1, 0), 1);
    assert_eq!(num_derivatives(1, 5), 1);
    assert_eq!(num_derivatives(2, 0), 1);
    assert_eq!(num_derivatives(2, 2), 4);
    assert_eq!(num_derivatives(2, 3), 8);
    assert_eq!(num_derivatives(3, 3), 27);
}

#[test]
fn order_zero_has_a_single_empty_combination() {
    for dimension in 1..=3 {
        let combinations = derivative_combinations(dimension, 0);
        assert_eq!(combinations, vec![Vec::<usize>::new()]);
    }
}

#[test]
fn combinations_enumerate_ordered_tuples() {
    // Mixed partials with the same directions in different order are distinct entries.
    assert_eq!(
        derivative_combinations(2, 2),
        vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]
    );
    assert_eq!(
        derivative_combinations(3, 1),
        vec![vec![0], vec![1], vec![2]]
    );
    assert_eq!(
        derivative_combinations(1, 3),
        vec![vec![0, 0, 0]]
    );
}

proptest! {
    #[test]
    fn combinations_are_a_bijection_with_base_d_integers(
        dimension in 1usize..=3,
        order in 0usize..=4,
    ) {
        let combinations = derivative_combinations(dimension, order);
        prop_assert_eq!(combinations.len(), num_derivatives(dimension, order));
        prop_assert_eq!(combinations.len(), dimension.pow(order as u32));

        for (index, combination) in combinations.iter().enumerate() {
            prop_assert_eq!(combination.len(), order);
            // Reading the tuple as base-d digits, most significant first, must
            // recover the entry's position in the table.
            let mut reconstructed = 0;
            for &digit in combination {
                prop_assert!(digit < dimension);
                reconstructed = reconstructed * dimension + digit;
            }
            prop_assert_eq!(reconstructed, index);
        }
    }
}
