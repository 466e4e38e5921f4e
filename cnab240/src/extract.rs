//! Типизированные геттеры над сырыми полями сегментов.

use chrono::NaiveDate;
use crate::error::{DecodeError, Result};
use crate::model::{Amount, FieldValue};
use crate::segment::SegmentFields;
use crate::utils::is_digits;

/// Сумма как есть, без пересчёта
pub fn amount<S: SegmentFields + ?Sized>(seg: &S, field: &'static str) -> Result<Amount> {
    match seg.get(field)? {
        FieldValue::Amount(a) => Ok(*a),
        FieldValue::Integer(n) if *n >= 0 => Ok(*n as Amount),
        _ => Err(DecodeError::FieldType {
            segment: seg.kind(),
            field,
            expected: "an amount",
        }),
    }
}

/// Строка как есть; числовое поле отдаётся в десятичной записи
pub fn text<S: SegmentFields + ?Sized>(seg: &S, field: &'static str) -> Result<String> {
    match seg.get(field)? {
        FieldValue::Text(s) => Ok(s.clone()),
        FieldValue::Integer(n) => Ok(n.to_string()),
        FieldValue::Amount(_) => Err(DecodeError::FieldType {
            segment: seg.kind(),
            field,
            expected: "text",
        }),
    }
}

/// Целое число; текстовое поле допускается, если в нём только цифры (пробелы по краям отбрасываются)
pub fn integer<S: SegmentFields + ?Sized>(seg: &S, field: &'static str) -> Result<i64> {
    let type_error = || DecodeError::FieldType {
        segment: seg.kind(),
        field,
        expected: "an integer",
    };

    match seg.get(field)? {
        FieldValue::Integer(n) => Ok(*n),
        FieldValue::Text(s) => {
            let s = s.trim();
            if !is_digits(s) {
                return Err(type_error());
            }
            s.parse().map_err(|_| type_error())
        }
        FieldValue::Amount(_) => Err(type_error()),
    }
}

/// Дата в формате DDMMYYYY
///
/// Пустое текстовое поле считается нулём, нечисловое - [`DecodeError::InvalidDate`].
pub fn date<S: SegmentFields + ?Sized>(seg: &S, field: &'static str) -> Result<Option<NaiveDate>> {
    let raw = match seg.get(field)? {
        FieldValue::Text(s) if s.trim().is_empty() => 0,
        value => integer(seg, field).map_err(|err| match err {
            DecodeError::FieldType { .. } => {
                DecodeError::InvalidDate(format!("{field}: not a DDMMYYYY value: {value}"))
            }
            other => other,
        })?,
    };
    decode_date(raw)
}

/// Общее правило для всех дат формата.
///
/// - `0` - даты нет, `Ok(None)`
/// - число дополняется нулями слева до 8 знаков и читается как DD MM YYYY
/// - всё, что не является реальной датой, - [`DecodeError::InvalidDate`]
///
/// Время суток у дат формата отсутствует, поэтому результат - [`NaiveDate`] (полночь).
pub fn decode_date(raw: i64) -> Result<Option<NaiveDate>> {
    if raw == 0 {
        return Ok(None);
    }
    if raw < 0 {
        return Err(DecodeError::InvalidDate(format!("negative date value: {raw}")));
    }

    let s = format!("{raw:08}");
    if s.len() != 8 {
        return Err(DecodeError::InvalidDate(format!("date must have 8 digits, got '{s}'")));
    }

    // s - только цифры, срезы по байтам безопасны
    let dd: u32 = s[0..2]
        .parse()
        .map_err(|_| DecodeError::InvalidDate(format!("invalid day in DDMMYYYY: '{s}'")))?;
    let mm: u32 = s[2..4]
        .parse()
        .map_err(|_| DecodeError::InvalidDate(format!("invalid month in DDMMYYYY: '{s}'")))?;
    let yyyy: i32 = s[4..8]
        .parse()
        .map_err(|_| DecodeError::InvalidDate(format!("invalid year in DDMMYYYY: '{s}'")))?;

    NaiveDate::from_ymd_opt(yyyy, mm, dd)
        .map(Some)
        .ok_or_else(|| DecodeError::InvalidDate(format!("invalid DDMMYYYY date components: '{s}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SegmentKind;
    use crate::segment::Segment;

    fn seg_u() -> Segment {
        Segment::new(SegmentKind::U)
            .with_field("valor_pago", FieldValue::Amount(150075))
            .with_field("valor_iof", FieldValue::Integer(0))
            .with_field("data_credito", FieldValue::Integer(1012023))
            .with_field("data_ocorrencia", FieldValue::Text("31122024".into()))
            .with_field("data_blank", FieldValue::Text("        ".into()))
            .with_field("codigo", FieldValue::Text(" 06 ".into()))
            .with_field("nome", FieldValue::Text("abc".into()))
            .with_field("data_letras", FieldValue::Text("AB012024".into()))
    }

    #[test]
    fn zero_decodes_to_absent() {
        assert_eq!(decode_date(0).unwrap(), None);
    }

    #[test]
    fn short_value_is_zero_padded() {
        let d = decode_date(1012023).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2023, 1, 1));
    }

    #[test]
    fn invalid_day_is_error_not_absent() {
        match decode_date(32012023) {
            Err(DecodeError::InvalidDate(msg)) => assert!(msg.contains("32012023"), "unexpected msg: {msg}"),
            other => panic!("expected InvalidDate, got {other:?}"),
        }
        assert!(matches!(decode_date(29022023), Err(DecodeError::InvalidDate(_))));
        assert!(matches!(decode_date(10132023), Err(DecodeError::InvalidDate(_))));
    }

    #[test]
    fn too_many_digits_or_negative_is_error() {
        assert!(matches!(decode_date(101012023), Err(DecodeError::InvalidDate(_))));
        assert!(matches!(decode_date(-1012023), Err(DecodeError::InvalidDate(_))));
    }

    #[test]
    fn date_reads_integer_and_text_fields() {
        let seg = seg_u();
        assert_eq!(date(&seg, "data_credito").unwrap(), NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(date(&seg, "data_ocorrencia").unwrap(), NaiveDate::from_ymd_opt(2024, 12, 31));
        assert_eq!(date(&seg, "data_blank").unwrap(), None);
        match date(&seg, "nome") {
            Err(DecodeError::InvalidDate(msg)) => assert!(msg.contains("nome"), "unexpected msg: {msg}"),
            other => panic!("expected InvalidDate, got {other:?}"),
        }
        assert!(matches!(date(&seg, "data_letras"), Err(DecodeError::InvalidDate(_))));
        assert!(matches!(date(&seg, "valor_pago"), Err(DecodeError::InvalidDate(_))));
        assert!(matches!(date(&seg, "data_vencimento"), Err(DecodeError::MissingField { .. })));
    }

    #[test]
    fn amount_is_passed_through() {
        let seg = seg_u();
        assert_eq!(amount(&seg, "valor_pago").unwrap(), 150075);
        assert_eq!(amount(&seg, "valor_iof").unwrap(), 0);
        assert!(matches!(amount(&seg, "nome"), Err(DecodeError::FieldType { .. })));
        match amount(&seg, "valor_liquido") {
            Err(DecodeError::MissingField { segment, field }) => {
                assert_eq!(segment, SegmentKind::U);
                assert_eq!(field, "valor_liquido");
            }
            other => panic!("expected MissingField, got {other:?}"),
        }
    }

    #[test]
    fn integer_and_text_accessors() {
        let seg = seg_u();
        assert_eq!(integer(&seg, "codigo").unwrap(), 6);
        assert_eq!(text(&seg, "data_credito").unwrap(), "1012023");
        assert_eq!(text(&seg, "codigo").unwrap(), " 06 ");
        assert!(matches!(text(&seg, "valor_pago"), Err(DecodeError::FieldType { .. })));
    }
}
