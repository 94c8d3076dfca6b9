use std::sync::LazyLock;

use regex::Regex;

use crate::{errors::PriceError, locale::LocaleDescriptor};

static NUMERIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9,.]+").expect("Regex should compile as nothing has changed")
});

/// Converts a price like string into a float, reading separators with `locale`.
///
/// Handles strings such as:
/// 1. "45"
/// 2. "U$ 45.35"
/// 3. "Por: R$ 10.999,00"
/// 4. "$ 45.35 - $ 75.46" (only the first price is read)
///
/// Text around the number is ignored, only the first run of digits and
/// separators is converted.
pub fn normalize(raw_text: &str, locale: &LocaleDescriptor) -> Result<f64, PriceError> {
    // whole number prices skip the locale handling entirely
    if !raw_text.is_empty() && raw_text.bytes().all(|byte| byte.is_ascii_digit()) {
        return parse_canonical(raw_text, raw_text);
    }

    let Some(token) = NUMERIC_TOKEN.find(raw_text) else {
        return Err(PriceError::NoNumericContent(raw_text.into()));
    };

    delocalize(token.as_str(), locale)
}

/// [`normalize`] with the en_US convention.
pub fn normalize_default(raw_text: &str) -> Result<f64, PriceError> {
    normalize(raw_text, &LocaleDescriptor::default())
}

fn delocalize(token: &str, locale: &LocaleDescriptor) -> Result<f64, PriceError> {
    let canonical: String = token
        .chars()
        .filter(|character| *character != locale.grouping_separator())
        .map(|character| {
            if character == locale.decimal_separator() {
                '.'
            } else {
                character
            }
        })
        .collect();

    parse_canonical(&canonical, token)
}

fn parse_canonical(canonical: &str, token: &str) -> Result<f64, PriceError> {
    match canonical.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PriceError::MalformedNumber(token.into())),
    }
}
