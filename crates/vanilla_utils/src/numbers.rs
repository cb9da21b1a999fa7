//! Numeric helpers: bounds, rounding, random integers and locale formatting.
//!
//! Formatting delegates to `Intl.NumberFormat` when compiled for `wasm32`. Native builds use a
//! small built-in table of separators and currency symbols instead of full locale data.

use crate::random::random_unit;

/// Bounds `value` to `[min, max]`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Rounds to `decimals` places by power-of-ten scaling.
///
/// Inherits binary floating-point behavior at `.5` boundaries (`round(1.005, 2)` is `1.0`).
pub fn round(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Returns a uniformly distributed integer in `[min, max]` (both inclusive).
///
/// Swapped bounds are accepted.
pub fn random_int(min: i64, max: i64) -> i64 {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let distance = high.abs_diff(low);
    let span = distance as f64 + 1.0;
    let offset = ((random_unit() * span).floor() as u64).min(distance);
    low.wrapping_add_unsigned(offset)
}

/// Formats `value` with locale-aware grouping (e.g. `1,234,567.89` for `en-US`).
pub fn format_number(value: f64, locale: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        intl_format(value, locale, None).unwrap_or_else(|| fallback_number(value, locale, None))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        fallback_number(value, locale, None)
    }
}

/// Formats `amount` as currency (e.g. `$1,234.56` for `USD` in `en-US`).
pub fn format_currency(amount: f64, currency: &str, locale: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        intl_format(amount, locale, Some(currency))
            .unwrap_or_else(|| fallback_number(amount, locale, Some(currency)))
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        fallback_number(amount, locale, Some(currency))
    }
}

#[cfg(target_arch = "wasm32")]
fn intl_format(value: f64, locale: &str, currency: Option<&str>) -> Option<String> {
    use js_sys::{Array, Intl, Object, Reflect};
    use wasm_bindgen::JsValue;

    let locales = Array::of1(&JsValue::from_str(locale));
    let options = Object::new();
    if let Some(currency) = currency {
        Reflect::set(&options, &"style".into(), &"currency".into()).ok()?;
        Reflect::set(&options, &"currency".into(), &currency.into()).ok()?;
    }
    let format = Intl::NumberFormat::new(&locales, &options).format();
    format
        .call1(&JsValue::NULL, &JsValue::from_f64(value))
        .ok()?
        .as_string()
}

struct Separators {
    group: &'static str,
    decimal: char,
    symbol_after: bool,
}

fn separators(locale: &str) -> Separators {
    let language = locale
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    match language.as_str() {
        "de" | "es" | "it" | "nl" | "pt" | "id" | "tr" | "da" => Separators {
            group: ".",
            decimal: ',',
            symbol_after: true,
        },
        "fr" | "nb" | "sv" | "fi" | "pl" | "cs" | "ru" => Separators {
            group: "\u{202f}",
            decimal: ',',
            symbol_after: true,
        },
        _ => Separators {
            group: ",",
            decimal: '.',
            symbol_after: false,
        },
    }
}

fn currency_symbol(currency: &str) -> (String, usize) {
    match currency.to_ascii_uppercase().as_str() {
        "USD" => ("$".to_string(), 2),
        "EUR" => ("€".to_string(), 2),
        "GBP" => ("£".to_string(), 2),
        "INR" => ("₹".to_string(), 2),
        "JPY" => ("¥".to_string(), 0),
        "KRW" => ("₩".to_string(), 0),
        other => (other.to_string(), 2),
    }
}

fn fallback_number(value: f64, locale: &str, currency: Option<&str>) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    let seps = separators(locale);
    let (symbol, digits) = match currency {
        Some(code) => {
            let (symbol, digits) = currency_symbol(code);
            (Some(symbol), digits)
        }
        None => (None, 3),
    };

    let body = if value.is_infinite() {
        "∞".to_string()
    } else {
        let fixed = format!("{:.*}", digits, value.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        // plain numbers drop trailing zeros; currency keeps its fixed minor units
        let frac_part = if symbol.is_some() {
            frac_part
        } else {
            frac_part.trim_end_matches('0')
        };
        let mut body = group_digits(int_part, seps.group);
        if !frac_part.is_empty() {
            body.push(seps.decimal);
            body.push_str(frac_part);
        }
        body
    };

    let sign = if value.is_sign_negative() && value != 0.0 {
        "-"
    } else {
        ""
    };
    match symbol {
        Some(symbol) if seps.symbol_after => format!("{sign}{body}\u{a0}{symbol}"),
        Some(symbol) => format!("{sign}{symbol}{body}"),
        None => format!("{sign}{body}"),
    }
}

fn group_digits(int_part: &str, group: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3 * group.len());
    for (index, digit) in int_part.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push_str(group);
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clamp_bounds_both_sides() {
        assert_eq!(clamp(10, 0, 5), 5);
        assert_eq!(clamp(-5, 0, 5), 0);
        assert_eq!(clamp(3, 0, 5), 3);
        assert_eq!(clamp(0.5, 0.0, 1.0), 0.5);
    }

    #[test]
    fn round_scales_by_powers_of_ten() {
        assert_eq!(round(3.14159, 2), 3.14);
        assert_eq!(round(2.5, 0), 3.0);
        assert_eq!(round(1234.5678, -2), 1200.0);
    }

    #[test]
    fn random_int_is_inclusive() {
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..2_000 {
            let value = random_int(1, 3);
            assert!((1..=3).contains(&value));
            seen_low |= value == 1;
            seen_high |= value == 3;
        }
        assert!(seen_low && seen_high);
        assert_eq!(random_int(4, 4), 4);
        assert!((1..=10).contains(&random_int(10, 1)));
    }

    #[test]
    fn random_int_accepts_the_full_i64_range() {
        for _ in 0..1_000 {
            random_int(i64::MIN, i64::MAX);
            assert!(random_int(i64::MAX, i64::MIN + 1) > i64::MIN);
            assert!(random_int(-5, i64::MAX) >= -5);
        }
        assert_eq!(random_int(i64::MIN, i64::MIN), i64::MIN);
        assert_eq!(random_int(i64::MAX, i64::MAX), i64::MAX);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn format_number_groups_thousands() {
        assert_eq!(format_number(1234567.89, "en-US"), "1,234,567.89");
        assert_eq!(format_number(1234567.89, "de-DE"), "1.234.567,89");
        assert_eq!(format_number(-1000.0, "en-US"), "-1,000");
        assert_eq!(format_number(0.12345, "en-US"), "0.123");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn format_currency_places_symbol_by_locale() {
        assert_eq!(format_currency(1000.0, "USD", "en-US"), "$1,000.00");
        assert_eq!(format_currency(1234.56, "EUR", "de-DE"), "1.234,56\u{a0}€");
        assert_eq!(format_currency(1500.0, "JPY", "en-US"), "¥1,500");
        assert_eq!(format_currency(-5.0, "CHF", "en-US"), "-CHF5.00");
    }
}
