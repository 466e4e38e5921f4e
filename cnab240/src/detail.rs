use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use crate::context::FileContext;
use crate::error::{DecodeError, Result};
use crate::extract;
use crate::fields::{t, u};
use crate::model::{format_amount, Amount, Bank, SegmentKind};
use crate::movement::{Classification, MovementCode};
use crate::quirks;
use crate::segment::{Segment, SegmentFields};

/// Одна детальная запись файла возврата CNAB240: сегменты T, U и необязательный W.
///
/// Запись неизменяема: все геттеры - чистые функции от сегментов, банка и convênio.
/// Геттеры независимы, ошибка в одном не мешает вызывать остальные.
///
/// Пример использования:
/// ```no_run
/// use cnab240::{DetailRecord, ReturnFileHeader, Segment};
/// # fn segments() -> (Segment, Segment) { unimplemented!() }
/// # fn main() -> Result<(), cnab240::DecodeError> {
/// let header = ReturnFileHeader::new(1, "1234");
/// let (segment_t, segment_u) = segments();
/// let detail = DetailRecord::new(&header, segment_t, segment_u, None);
///
/// if detail.is_settlement(false)? {
///     println!("{} paid {:?}", detail.nosso_numero()?, detail.paid_amount()?);
/// }
/// #     Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DetailRecord<S = Segment> {
    bank: Bank,
    convenio: String,
    segment_t: S,
    segment_u: S,
    segment_w: Option<S>,
}

impl<S: SegmentFields> DetailRecord<S> {
    /// Банк и convênio копируются из контекста файла, ссылка на него не хранится
    pub fn new<C: FileContext + ?Sized>(ctx: &C, segment_t: S, segment_u: S, segment_w: Option<S>) -> Self {
        DetailRecord {
            bank: ctx.bank(),
            convenio: ctx.convenio_code().to_string(),
            segment_t,
            segment_u,
            segment_w,
        }
    }

    pub fn bank(&self) -> Bank {
        self.bank
    }

    pub fn segment_t(&self) -> &S {
        &self.segment_t
    }

    pub fn segment_u(&self) -> &S {
        &self.segment_u
    }

    pub fn segment_w(&self) -> Option<&S> {
        self.segment_w.as_ref()
    }

    // ---- движение ----

    /// Код движения из сегмента T
    pub fn movement_code(&self) -> Result<MovementCode> {
        let raw = extract::integer(&self.segment_t, t::CODIGO_MOVIMENTO)?;
        u16::try_from(raw)
            .map(MovementCode)
            .map_err(|_| DecodeError::FieldType {
                segment: SegmentKind::T,
                field: t::CODIGO_MOVIMENTO,
                expected: "a movement code (0..=65535)",
            })
    }

    pub fn movement_code_description(&self) -> Result<&'static str> {
        Ok(self.movement_code()?.describe())
    }

    pub fn classification(&self) -> Result<Classification> {
        Ok(self.movement_code()?.classify())
    }

    /// Нужно ли погасить титул. См. [`MovementCode::is_settlement`]
    pub fn is_settlement(&self, forced_by_bank: bool) -> Result<bool> {
        Ok(self.movement_code()?.is_settlement(forced_by_bank))
    }

    /// Классификация кода без записи
    pub fn is_settlement_code(code: u16, forced_by_bank: bool) -> bool {
        MovementCode(code).is_settlement(forced_by_bank)
    }

    pub fn is_rejected_settlement(&self) -> Result<bool> {
        Ok(self.movement_code()?.is_rejected_settlement())
    }

    // ---- суммы ----

    /// Сумма, зачисленная на счёт
    pub fn received_amount(&self) -> Result<Amount> {
        extract::amount(&self.segment_u, u::VALOR_LIQUIDO)
    }

    /// Номинал титула
    pub fn title_amount(&self) -> Result<Amount> {
        extract::amount(&self.segment_t, t::VALOR_TITULO)
    }

    pub fn paid_amount(&self) -> Result<Amount> {
        extract::amount(&self.segment_u, u::VALOR_PAGO)
    }

    /// Тариф банка
    pub fn fee_amount(&self) -> Result<Amount> {
        extract::amount(&self.segment_t, t::VALOR_TARIFA)
    }

    pub fn iof_amount(&self) -> Result<Amount> {
        extract::amount(&self.segment_u, u::VALOR_IOF)
    }

    /// Скидка, предоставленная до выпуска
    pub fn discount_amount(&self) -> Result<Amount> {
        extract::amount(&self.segment_u, u::VALOR_DESCONTO)
    }

    /// Уменьшение (abatimento), предоставленное после выпуска
    pub fn rebate_amount(&self) -> Result<Amount> {
        extract::amount(&self.segment_u, u::VALOR_ABATIMENTO)
    }

    pub fn other_expenses_amount(&self) -> Result<Amount> {
        extract::amount(&self.segment_u, u::VALOR_OUTRAS_DESPESAS)
    }

    pub fn other_credits_amount(&self) -> Result<Amount> {
        extract::amount(&self.segment_u, u::VALOR_OUTROS_CREDITOS)
    }

    /// Проценты и штраф (juros/mora/multa)
    pub fn interest_penalty_amount(&self) -> Result<Amount> {
        extract::amount(&self.segment_u, u::VALOR_ACRESCIMOS)
    }

    // ---- идентификаторы ----

    /// Номер документа; `None`, если поле состоит только из нулей
    pub fn document_number(&self) -> Result<Option<String>> {
        let raw = extract::text(&self.segment_t, t::NUMERO_DOCUMENTO)?;
        if raw.trim_matches('0').is_empty() {
            return Ok(None);
        }
        Ok(Some(raw))
    }

    /// Nosso número после правила банка
    pub fn nosso_numero(&self) -> Result<String> {
        let raw = extract::text(&self.segment_t, t::NOSSO_NUMERO)?;
        Ok(quirks::normalize_nosso_numero(self.bank, &raw, &self.convenio))
    }

    pub fn wallet(&self) -> Result<Option<String>> {
        quirks::wallet(self.bank, &self.segment_t)
    }

    pub fn agency(&self) -> Result<String> {
        extract::text(&self.segment_t, t::AGENCIA_MANTENEDORA)
    }

    pub fn agency_check_digit(&self) -> Result<String> {
        extract::text(&self.segment_t, t::AGENCIA_DV)
    }

    pub fn collecting_agency(&self) -> Result<String> {
        extract::text(&self.segment_t, t::AGENCIA_COBRADORA)
    }

    pub fn collecting_agency_check_digit(&self) -> Result<String> {
        extract::text(&self.segment_t, t::AGENCIA_COBRADORA_DAC)
    }

    /// Порядковый номер записи в лоте
    pub fn sequence_number(&self) -> Result<i64> {
        extract::integer(&self.segment_t, t::NUMERO_SEQUENCIAL_LOTE)
    }

    // ---- даты ----

    pub fn due_date(&self) -> Result<Option<NaiveDate>> {
        extract::date(&self.segment_t, t::DATA_VENCIMENTO)
    }

    /// Дата, когда деньги пришли на счёт
    pub fn credit_date(&self) -> Result<Option<NaiveDate>> {
        extract::date(&self.segment_u, u::DATA_CREDITO)
    }

    /// Дата события, обычно день оплаты
    pub fn occurrence_date(&self) -> Result<Option<NaiveDate>> {
        extract::date(&self.segment_u, u::DATA_OCORRENCIA)
    }

    // ---- не реализовано ----

    /// Код места погашения
    pub fn settlement_location_code(&self) -> Result<String> {
        Err(DecodeError::NotImplemented("settlement location code"))
    }

    pub fn settlement_location_description(&self) -> Result<String> {
        Err(DecodeError::NotImplemented("settlement location description"))
    }

    /// Признан ли титул плательщиком в DDA
    pub fn is_dda(&self) -> Result<bool> {
        Err(DecodeError::NotImplemented("DDA recognition"))
    }

    pub fn payer_allegation(&self) -> Result<String> {
        Err(DecodeError::NotImplemented("payer allegation"))
    }

    // ---- диагностика ----

    /// Дамп всех сегментов для просмотра глазами, формат не стабилен
    pub fn dump(&self) -> String {
        let mut out = String::from("\n");
        out.push_str("== SEGMENTO T ==\n");
        out.push_str(&self.segment_t.dump());
        out.push_str("== SEGMENTO U ==\n");
        out.push_str(&self.segment_u.dump());

        if let Some(w) = &self.segment_w {
            out.push_str("== SEGMENTO W ==\n");
            out.push_str(&w.dump());
        }

        out
    }

    /// Снимок всех геттеров. Ошибки отдельных геттеров собираются в `errors`
    pub fn decode(&self) -> DecodedDetail {
        let mut errors = Vec::new();
        let mut keep = |name: &str, e: DecodeError| errors.push(format!("{name}: {e}"));

        macro_rules! field {
            ($name:literal, $call:expr) => {
                match $call {
                    Ok(v) => Some(v),
                    Err(e) => {
                        keep($name, e);
                        None
                    }
                }
            };
        }

        let movement_code = field!("movement_code", self.movement_code());

        let decoded = DecodedDetail {
            bank: self.bank.code(),
            movement_code: movement_code.map(MovementCode::code),
            movement_description: movement_code.map(|m| m.describe().to_string()),
            classification: movement_code.map(MovementCode::classify),
            nosso_numero: field!("nosso_numero", self.nosso_numero()),
            document_number: field!("document_number", self.document_number()).flatten(),
            wallet: field!("wallet", self.wallet()).flatten(),
            agency: field!("agency", self.agency()),
            agency_check_digit: field!("agency_check_digit", self.agency_check_digit()),
            collecting_agency: field!("collecting_agency", self.collecting_agency()),
            collecting_agency_check_digit: field!(
                "collecting_agency_check_digit",
                self.collecting_agency_check_digit()
            ),
            sequence_number: field!("sequence_number", self.sequence_number()),
            due_date: field!("due_date", self.due_date()).flatten(),
            credit_date: field!("credit_date", self.credit_date()).flatten(),
            occurrence_date: field!("occurrence_date", self.occurrence_date()).flatten(),
            title_amount: field!("title_amount", self.title_amount()),
            fee_amount: field!("fee_amount", self.fee_amount()),
            received_amount: field!("received_amount", self.received_amount()),
            paid_amount: field!("paid_amount", self.paid_amount()),
            iof_amount: field!("iof_amount", self.iof_amount()),
            discount_amount: field!("discount_amount", self.discount_amount()),
            rebate_amount: field!("rebate_amount", self.rebate_amount()),
            other_expenses_amount: field!("other_expenses_amount", self.other_expenses_amount()),
            other_credits_amount: field!("other_credits_amount", self.other_credits_amount()),
            interest_penalty_amount: field!("interest_penalty_amount", self.interest_penalty_amount()),
            errors: Vec::new(),
        };

        DecodedDetail { errors, ..decoded }
    }
}

/// Снимок декодированной записи, для вывода и сериализации
///
/// `None` - значения нет либо геттер вернул ошибку (текст ошибки - в `errors`).
/// Суммы сериализуются строкой вида "123.45".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedDetail {
    pub bank: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movement_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_display")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nosso_numero: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_check_digit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collecting_agency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collecting_agency_check_digit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occurrence_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub title_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub fee_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub received_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub paid_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub iof_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub discount_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub rebate_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub other_expenses_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub other_credits_amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_amount")]
    pub interest_penalty_amount: Option<Amount>,
    #[serde(rename = "error", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

fn serialize_display<S: Serializer, T: std::fmt::Display>(
    value: &Option<T>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.collect_str(v),
        None => serializer.serialize_none(),
    }
}

fn serialize_amount<S: Serializer>(amount: &Option<Amount>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match amount {
        Some(a) => serializer.serialize_str(&format_amount(*a)),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ReturnFileHeader;
    use crate::model::FieldValue;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn segment_t(movement: i64) -> Segment {
        Segment::new(SegmentKind::T)
            .with_field(t::CODIGO_MOVIMENTO, FieldValue::Integer(movement))
            .with_field(t::VALOR_TITULO, FieldValue::Amount(150000))
            .with_field(t::VALOR_TARIFA, FieldValue::Amount(350))
            .with_field(t::NOSSO_NUMERO, text("12345678"))
            .with_field(t::NUMERO_DOCUMENTO, text("0001234"))
            .with_field(t::DATA_VENCIMENTO, FieldValue::Integer(15012023))
            .with_field(t::CARTEIRA, text("17"))
            .with_field(t::AGENCIA_MANTENEDORA, text("01234"))
            .with_field(t::AGENCIA_DV, text("5"))
            .with_field(t::AGENCIA_COBRADORA, text("04321"))
            .with_field(t::AGENCIA_COBRADORA_DAC, text("X"))
            .with_field(t::NUMERO_SEQUENCIAL_LOTE, FieldValue::Integer(3))
    }

    fn segment_u() -> Segment {
        Segment::new(SegmentKind::U)
            .with_field(u::VALOR_LIQUIDO, FieldValue::Amount(149650))
            .with_field(u::VALOR_PAGO, FieldValue::Amount(150000))
            .with_field(u::VALOR_IOF, FieldValue::Amount(0))
            .with_field(u::VALOR_DESCONTO, FieldValue::Amount(0))
            .with_field(u::VALOR_ABATIMENTO, FieldValue::Amount(0))
            .with_field(u::VALOR_OUTRAS_DESPESAS, FieldValue::Amount(0))
            .with_field(u::VALOR_OUTROS_CREDITOS, FieldValue::Amount(0))
            .with_field(u::VALOR_ACRESCIMOS, FieldValue::Amount(1999))
            .with_field(u::DATA_CREDITO, FieldValue::Integer(1012023))
            .with_field(u::DATA_OCORRENCIA, FieldValue::Integer(0))
    }

    fn record(bank: u16, movement: i64) -> DetailRecord {
        let header = ReturnFileHeader::new(bank, "1234");
        DetailRecord::new(&header, segment_t(movement), segment_u(), None)
    }

    #[test]
    fn settlement_flags_follow_movement_code() {
        assert!(record(1, 6).is_settlement(false).unwrap());
        assert!(record(1, 17).is_settlement(false).unwrap());
        assert!(!record(1, 9).is_settlement(false).unwrap());
        assert!(record(1, 9).is_settlement(true).unwrap());
        assert!(record(1, 25).is_settlement(true).unwrap());
        assert!(!record(1, 6).is_settlement(true).unwrap());
        assert!(record(1, 30).is_rejected_settlement().unwrap());
        assert!(!record(1, 6).is_rejected_settlement().unwrap());
        assert!(DetailRecord::<Segment>::is_settlement_code(17, false));
    }

    #[test]
    fn movement_code_out_of_range_is_field_type_error() {
        match record(1, -1).movement_code() {
            Err(DecodeError::FieldType { field, .. }) => assert_eq!(field, t::CODIGO_MOVIMENTO),
            other => panic!("expected FieldType, got {other:?}"),
        }
    }

    #[test]
    fn description_of_unknown_code() {
        assert_eq!(record(1, 6).movement_code_description().unwrap(), "Liquidação");
        assert_eq!(record(1, 99).movement_code_description().unwrap(), "Desconhecido");
    }

    #[test]
    fn amounts_are_passed_through() {
        let r = record(1, 6);
        assert_eq!(r.title_amount().unwrap(), 150000);
        assert_eq!(r.fee_amount().unwrap(), 350);
        assert_eq!(r.received_amount().unwrap(), 149650);
        assert_eq!(r.paid_amount().unwrap(), 150000);
        assert_eq!(r.interest_penalty_amount().unwrap(), 1999);
        assert_eq!(r.iof_amount().unwrap(), 0);
    }

    #[test]
    fn document_number_keeps_leading_zeros_or_is_absent() {
        let r = record(1, 6);
        assert_eq!(r.document_number().unwrap().as_deref(), Some("0001234"));

        let header = ReturnFileHeader::new(1, "");
        let seg_t = segment_t(6).with_field(t::NUMERO_DOCUMENTO, text("0000000"));
        let r = DetailRecord::new(&header, seg_t, segment_u(), None);
        assert_eq!(r.document_number().unwrap(), None);
    }

    #[test]
    fn dates_follow_shared_rule() {
        let r = record(1, 6);
        assert_eq!(r.due_date().unwrap(), NaiveDate::from_ymd_opt(2023, 1, 15));
        assert_eq!(r.credit_date().unwrap(), NaiveDate::from_ymd_opt(2023, 1, 1));
        assert_eq!(r.occurrence_date().unwrap(), None);
    }

    #[test]
    fn nosso_numero_uses_file_convenio_for_banco_do_brasil() {
        assert_eq!(record(1, 6).nosso_numero().unwrap(), "5678");
        assert_eq!(record(341, 6).nosso_numero().unwrap(), "12345678");
        assert_eq!(record(33, 6).nosso_numero().unwrap(), "1234567");
    }

    #[test]
    fn wallet_for_cef_is_always_absent() {
        assert_eq!(record(104, 6).wallet().unwrap(), None);
        assert_eq!(record(237, 6).wallet().unwrap().as_deref(), Some("17"));
    }

    #[test]
    fn placeholders_are_not_implemented_errors() {
        let r = record(1, 6);
        assert!(matches!(r.settlement_location_code(), Err(DecodeError::NotImplemented(_))));
        assert!(matches!(r.settlement_location_description(), Err(DecodeError::NotImplemented(_))));
        assert!(matches!(r.is_dda(), Err(DecodeError::NotImplemented(_))));
        assert!(matches!(r.payer_allegation(), Err(DecodeError::NotImplemented(_))));
    }

    #[test]
    fn dump_includes_w_only_when_present() {
        let header = ReturnFileHeader::new(1, "");
        let r = record(1, 6);
        assert!(r.dump().contains("== SEGMENTO T =="));
        assert!(r.dump().contains("== SEGMENTO U =="));
        assert!(!r.dump().contains("== SEGMENTO W =="));

        let w = Segment::new(SegmentKind::W).with_field("informacao_1", text("PIX"));
        let r = DetailRecord::new(&header, segment_t(6), segment_u(), Some(w));
        let dump = r.dump();
        assert!(dump.contains("== SEGMENTO W =="));
        assert!(dump.contains("informacao_1"));
    }

    #[test]
    fn decode_collects_errors_without_failing() {
        let header = ReturnFileHeader::new(756, "");
        let seg_u = Segment::new(SegmentKind::U).with_field(u::DATA_CREDITO, FieldValue::Integer(32012023));
        let r = DetailRecord::new(&header, segment_t(6), seg_u, None);

        let decoded = r.decode();

        assert_eq!(decoded.movement_code, Some(6));
        assert_eq!(decoded.classification, Some(Classification::SettledNormal));
        assert_eq!(decoded.nosso_numero.as_deref(), Some("12"));
        assert_eq!(decoded.credit_date, None);
        assert_eq!(decoded.paid_amount, None);
        assert!(decoded.errors.iter().any(|e| e.starts_with("credit_date: invalid date")));
        assert!(decoded.errors.iter().any(|e| e.starts_with("paid_amount: missing field")));
    }

    #[test]
    fn accessors_are_idempotent() {
        let r = record(104, 6);
        assert_eq!(r.decode(), r.decode());
        assert_eq!(r.nosso_numero().unwrap(), r.nosso_numero().unwrap());
    }

    #[test]
    fn detail_record_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DetailRecord>();
    }
}
