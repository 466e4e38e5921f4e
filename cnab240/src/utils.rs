use once_cell::sync::Lazy;
use regex::Regex;
use crate::error::DecodeError;
use crate::model::Amount;

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| {
    // только цифры, без знака и пробелов
    Regex::new(r"^\d+$").unwrap()
});

pub(crate) fn is_digits(s: &str) -> bool {
    DIGITS_RE.is_match(s)
}

/// Разбирает сумму вида "1234,56" / "1234.56" / "1.234,56" в сентаво
///
/// Дробных знаков не больше двух, округления нет.
pub(crate) fn parse_amount(raw: &str) -> Result<Amount, DecodeError> {
    let mut cleaned = raw.trim().replace(' ', "");

    if cleaned.contains(',') {
        if cleaned.contains('.') {
            // точка - разделитель тысяч
            cleaned = cleaned.replace('.', "").replace(',', ".");
        } else {
            cleaned = cleaned.replace(',', ".");
        }
    }

    if cleaned.is_empty() {
        return Err(DecodeError::InvalidAmount("empty amount".into()));
    }
    if cleaned.starts_with('-') {
        return Err(DecodeError::InvalidAmount(format!("negative amount: {cleaned}")));
    }

    let (int_part, dec_part) = cleaned.split_once('.').unwrap_or((cleaned.as_str(), ""));
    if dec_part.contains('.') {
        return Err(DecodeError::InvalidAmount(format!("too many dots in amount: {cleaned}")));
    }
    if !is_digits(int_part) || (!dec_part.is_empty() && !is_digits(dec_part)) {
        return Err(DecodeError::InvalidAmount(format!("not a number: {cleaned}")));
    }

    let int_part: Amount = int_part
        .parse()
        .map_err(|_| DecodeError::InvalidAmount(format!("amount out of range: {cleaned}")))?;

    let dec_part: Amount = match dec_part.len() {
        0 => 0,
        // "12.5" -> 50 сентаво
        1 => dec_part.parse::<Amount>().unwrap_or(0) * 10,
        2 => dec_part.parse().unwrap_or(0),
        _ => {
            return Err(DecodeError::InvalidAmount(format!(
                "too many fractional digits in amount: {cleaned}"
            )));
        }
    };

    int_part
        .checked_mul(100)
        .and_then(|v| v.checked_add(dec_part))
        .ok_or_else(|| DecodeError::InvalidAmount(format!("amount out of range: {cleaned}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_both_separators() {
        assert_eq!(parse_amount("1234,56").unwrap(), 123456);
        assert_eq!(parse_amount("1234.56").unwrap(), 123456);
        assert_eq!(parse_amount("1.234,56").unwrap(), 123456);
        assert_eq!(parse_amount("12.5").unwrap(), 1250);
        assert_eq!(parse_amount("7").unwrap(), 700);
    }

    #[test]
    fn parse_amount_rejects_bad_input() {
        for raw in ["", "-1,00", "1.2.3", "1,234", "abc", "1,2x"] {
            match parse_amount(raw) {
                Err(DecodeError::InvalidAmount(_)) => {}
                other => panic!("expected InvalidAmount for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn is_digits_only_matches_plain_digits() {
        assert!(is_digits("0012"));
        assert!(!is_digits(""));
        assert!(!is_digits(" 12"));
        assert!(!is_digits("-12"));
    }
}
