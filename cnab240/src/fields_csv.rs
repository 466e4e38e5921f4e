use std::io::Read;
use csv::{ReaderBuilder, StringRecord};
use lazy_regex::regex_is_match;
use log::warn;
use crate::context::FileContext;
use crate::detail::DetailRecord;
use crate::error::{DecodeError, Result};
use crate::fields::t;
use crate::model::{FieldValue, SegmentKind};
use crate::segment::Segment;
use crate::utils::parse_amount;

/// Сегменты одной детальной записи, уже разобранные на поля.
///
/// Читается из CSV вида
/// ```text
/// segment,field,value
/// T,codigo_movimento,06
/// T,nosso_numero,00012345678
/// U,valor_pago,1500.00
/// ```
/// Текстовые поля сегмента T ([`t::TEXT_FIELDS`]) читаются как есть, вместе с ведущими нулями.
/// Тип остальных значений определяется по виду:
/// - только цифры - целое число, а для полей `valor_*` - сумма в сентаво
/// - число с `.`/`,` и не более чем двумя дробными знаками - сумма
/// - остальное - текст как есть; ведущий `'` принудительно делает значение текстом
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentSet {
    pub t: Segment,
    pub u: Segment,
    pub w: Option<Segment>,
}

impl SegmentSet {
    /// Парсит при помощи переданного reader данные в [`SegmentSet`]
    ///
    /// Сегменты T и U обязательны, W - нет.
    pub fn parse<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        check_header(rdr.headers()?)?;

        let mut t: Option<Segment> = None;
        let mut u: Option<Segment> = None;
        let mut w: Option<Segment> = None;

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            // +2: строка заголовка и нумерация с единицы
            let line = idx + 2;

            if record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }
            if record.len() != 3 {
                return Err(DecodeError::BadInput(format!(
                    "line {line}: expected 3 columns, got {}",
                    record.len()
                )));
            }

            let kind = parse_segment_kind(&record[0])
                .ok_or_else(|| DecodeError::BadInput(format!("line {line}: unknown segment '{}'", &record[0])))?;
            let field = record[1].trim();
            if field.is_empty() {
                return Err(DecodeError::BadInput(format!("line {line}: empty field name")));
            }
            let value = parse_value(field, &record[2])?;

            let slot = match kind {
                SegmentKind::T => &mut t,
                SegmentKind::U => &mut u,
                SegmentKind::W => &mut w,
            };
            let segment = slot.get_or_insert_with(|| Segment::new(kind));
            if let Some(prev) = segment.insert(field, value) {
                warn!("line {line}: field {field} in segment {kind} repeated, overriding {prev}");
            }
        }

        let t = t.ok_or_else(|| DecodeError::BadInput("segment T not found".into()))?;
        let u = u.ok_or_else(|| DecodeError::BadInput("segment U not found".into()))?;

        Ok(SegmentSet { t, u, w })
    }
}

impl DetailRecord<Segment> {
    pub fn from_segment_set<C: FileContext + ?Sized>(ctx: &C, set: SegmentSet) -> Self {
        DetailRecord::new(ctx, set.t, set.u, set.w)
    }
}

fn check_header(header: &StringRecord) -> Result<()> {
    let names: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
    if names != ["segment", "field", "value"] {
        return Err(DecodeError::BadInput(format!(
            "expected header 'segment,field,value', got '{}'",
            header.iter().collect::<Vec<_>>().join(",")
        )));
    }
    Ok(())
}

fn parse_segment_kind(raw: &str) -> Option<SegmentKind> {
    match raw.trim().to_uppercase().as_str() {
        "T" => Some(SegmentKind::T),
        "U" => Some(SegmentKind::U),
        "W" => Some(SegmentKind::W),
        _ => None,
    }
}

fn parse_value(field: &str, raw: &str) -> Result<FieldValue> {
    if let Some(forced) = raw.strip_prefix('\'') {
        return Ok(FieldValue::Text(forced.to_string()));
    }
    if t::TEXT_FIELDS.contains(&field) {
        return Ok(FieldValue::Text(raw.to_string()));
    }

    let trimmed = raw.trim();

    if regex_is_match!(r"^-?\d+$", trimmed) {
        if field.starts_with("valor_") {
            // суммы в файле - целое число с двумя неявными дробными знаками
            return trimmed
                .parse()
                .map(FieldValue::Amount)
                .map_err(|_| DecodeError::InvalidAmount(format!("{field}: {trimmed}")));
        }
        // слишком длинные числа (например, nosso número на 20 позиций) остаются текстом
        return Ok(trimmed
            .parse()
            .map(FieldValue::Integer)
            .unwrap_or_else(|_| FieldValue::Text(raw.to_string())));
    }

    if regex_is_match!(r"^\d+[.,]\d{1,2}$", trimmed) {
        return parse_amount(trimmed).map(FieldValue::Amount);
    }

    Ok(FieldValue::Text(raw.to_string()))
}
