//! Categorical color palette for the voltage traces.

/// Ten distinguishable hues, cycled through when there are more series than colors.
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Returns the color of the series at the given index.
pub fn series_color(index: usize) -> &'static str {
    CATEGORY10[index % CATEGORY10.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_color() {
        assert_eq!(series_color(0), "#1f77b4");
        assert_eq!(series_color(9), "#17becf");
        assert_eq!(series_color(10), "#1f77b4");
        assert_eq!(series_color(23), "#d62728");
    }
}
