//! Number formatting helpers shared by the element tree, the axes and the path generator.

/// Formats a number the way a browser prints it in an attribute value.
/// Integers have no fractional part, negative zero prints as `0`, and very large or small magnitudes use exponents.
pub fn fmt_num(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let repr = format!("{:e}", value);
        match repr.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => repr,
        }
    } else {
        format!("{}", value)
    }
}

/// Formats a number with a fixed number of decimals and comma-separated thousands, e.g., `12,345.60`.
pub fn fmt_fixed_grouped(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return fmt_num(value);
    }

    let repr = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match repr.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (repr.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    // A value rounding to zero keeps no sign.
    let is_zero = repr.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(445.0), "445");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(-0.0), "0");
        assert_eq!(fmt_num(-65.25), "-65.25");
        assert_eq!(fmt_num(f64::NAN), "NaN");
        assert_eq!(fmt_num(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(fmt_num(1e21), "1e+21");
        assert_eq!(fmt_num(1e-7), "1e-7");
    }

    #[test]
    fn test_fmt_fixed_grouped() {
        assert_eq!(fmt_fixed_grouped(0.0, 0), "0");
        assert_eq!(fmt_fixed_grouped(200.0, 0), "200");
        assert_eq!(fmt_fixed_grouped(1000.0, 0), "1,000");
        assert_eq!(fmt_fixed_grouped(1234567.0, 0), "1,234,567");
        assert_eq!(fmt_fixed_grouped(-12345.6, 1), "-12,345.6");
        assert_eq!(fmt_fixed_grouped(0.25, 2), "0.25");
        assert_eq!(fmt_fixed_grouped(-0.001, 1), "0.0");
        assert_eq!(fmt_fixed_grouped(-60.0, 0), "-60");
    }
}
