//! Rank statistics over sample values.

/// Collect finite values in ascending order.
pub fn sorted_values(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    out.sort_by(f64::total_cmp);
    out
}

/// Linearly interpolated quantile of an ascending slice, `p` in `[0, 1]`.
///
/// Returns `None` for an empty slice.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = p.clamp(0.0, 1.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(last);
    let frac = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Drop items outside the Tukey fences `[q1 - 1.5 iqr, q3 + 1.5 iqr]`.
///
/// Fewer than four values cannot give meaningful quartiles; those inputs pass
/// through untouched. Input order is preserved.
pub fn exclude_outliers<T>(items: Vec<T>, value_of: impl Fn(&T) -> f64) -> Vec<T> {
    if items.len() < 4 {
        return items;
    }
    let sorted = sorted_values(items.iter().map(&value_of));
    let (Some(q25), Some(q75)) = (quantile(&sorted, 0.25), quantile(&sorted, 0.75)) else {
        return items;
    };
    let cutoff = 1.5 * (q75 - q25);
    let (lower, upper) = (q25 - cutoff, q75 + cutoff);
    items
        .into_iter()
        .filter(|item| {
            let v = value_of(item);
            lower <= v && v <= upper
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile(&sorted, 0.5), Some(3.0));
        assert_eq!(quantile(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile(&sorted, 1.0), Some(5.0));
        assert_eq!(quantile(&[1.0, 2.0], 0.25), Some(1.25));
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[7.0], 0.9), Some(7.0));
    }

    #[test]
    fn tukey_fence_drops_both_tails() {
        let values = vec![1.0, 102.0, 103.0, 104.0, 105.0, 106.0, 107.0, 108.0, 209.0, 210.0];
        assert_eq!(
            exclude_outliers(values, |v| *v),
            vec![102.0, 103.0, 104.0, 105.0, 106.0, 107.0, 108.0]
        );
    }

    #[test]
    fn tukey_fence_keeps_clean_data() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(exclude_outliers(values.clone(), |v| *v), values);
    }

    #[test]
    fn short_inputs_pass_through() {
        let values = vec![1.0, 500.0, 2.0];
        assert_eq!(exclude_outliers(values.clone(), |v| *v), values);
    }

    #[test]
    fn fence_applies_to_mapped_values() {
        let items = vec![("a", 3.0), ("b", 4.0), ("c", 3.5), ("d", 4.2), ("e", 90.0)];
        let kept: Vec<&str> = exclude_outliers(items, |(_, v)| *v)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(kept, vec!["a", "b", "c", "d"]);
    }
}
