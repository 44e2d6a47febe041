use argminmax::ArgMinMax;

/// `(min, max)` of a non-empty slice, `None` when empty.
pub fn get_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    if vec.is_empty() {
        return None;
    }
    let (min_index, max_index) = vec.argminmax();
    Some((vec[min_index], vec[max_index]))
}

/// Y bounds widened by `fraction` of the range on both sides.
/// A flat series gets a unit range so the plot never collapses.
pub fn padded_bounds(vec: &[f64], fraction: f64) -> Option<(f64, f64)> {
    let (low, high) = get_min_max(vec)?;
    let span = high - low;
    if span <= f64::EPSILON {
        return Some((low - 0.5, high + 0.5));
    }
    Some((low - span * fraction, high + span * fraction))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_of_prices() {
        let prices = [3.0, 9.5, -1.0, 4.0];
        assert_eq!(get_min_max(&prices), Some((-1.0, 9.5)));
        assert_eq!(get_min_max(&[]), None);
    }

    #[test]
    fn bounds_are_padded() {
        assert_eq!(padded_bounds(&[10.0, 20.0], 0.1), Some((9.0, 21.0)));
        assert_eq!(padded_bounds(&[5.0, 5.0], 0.1), Some((4.5, 5.5)));
    }
}
