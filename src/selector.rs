use rand::Rng;

/// Draws one item with probability proportional to its weight: a uniform
/// value in `[0, total_weight)` walks the cumulative weights and the first
/// item whose cumulative weight exceeds the draw wins. Weights need not be
/// normalized; the total is the draw range. Zero-weight items are never
/// selected while any positive weight exists.
///
/// # Panics
/// Panics if `items` is empty or the two slices differ in length; every
/// caller selects from a fixed, non-empty table.
pub fn weighted_choice<'a, T>(items: &'a [T], weights: &[f64], rng: &mut impl Rng) -> &'a T {
    assert!(!items.is_empty(), "weighted_choice over empty items");
    assert_eq!(items.len(), weights.len(), "items/weights length mismatch");

    let total: f64 = weights.iter().sum();
    let mut roll = rng.gen::<f64>() * total;
    for (item, weight) in items.iter().zip(weights) {
        if roll < *weight {
            return item;
        }
        roll -= weight;
    }
    // Floating-point accumulation can leave a sliver past the last
    // positive weight; the last item absorbs it.
    items.last().unwrap()
}
