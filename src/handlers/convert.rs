//! Unit conversions for weight and temperature

const POUNDS_PER_KILOGRAM: f64 = 2.205;

/// Kilograms to pounds when `unit` is "K", pounds to kilograms otherwise
pub fn convert_weight(value: f64, unit: &str) -> String {
    if unit.trim().eq_ignore_ascii_case("k") {
        format!("{:.2} pounds", value * POUNDS_PER_KILOGRAM)
    } else {
        format!("{:.2} kilograms", value / POUNDS_PER_KILOGRAM)
    }
}

/// Celsius to Fahrenheit when `unit` is "C", Fahrenheit to Celsius otherwise
pub fn convert_temperature(value: f64, unit: &str) -> String {
    if unit.trim().eq_ignore_ascii_case("c") {
        format!("{:.1} °F", (9.0 * value) / 5.0 + 32.0)
    } else {
        format!("{:.1} °C", (value - 32.0) * 5.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight() {
        assert_eq!(convert_weight(10.0, "K"), "22.05 pounds");
        assert_eq!(convert_weight(10.0, "k"), "22.05 pounds");
        assert_eq!(convert_weight(22.05, "L"), "10.00 kilograms");
        assert_eq!(convert_weight(22.05, ""), "10.00 kilograms");
    }

    #[test]
    fn test_temperature() {
        assert_eq!(convert_temperature(100.0, "C"), "212.0 °F");
        assert_eq!(convert_temperature(-40.0, "c"), "-40.0 °F");
        assert_eq!(convert_temperature(212.0, "F"), "100.0 °C");
        assert_eq!(convert_temperature(50.0, "x"), "10.0 °C");
    }
}
