use crate::detail::DecodedDetail;
use crate::model::{format_amount, Amount};

/// Пары (поле, значение) для табличного вывода; отсутствующие значения - пустая строка
pub(super) fn rows(d: &DecodedDetail) -> Vec<(&'static str, String)> {
    fn opt<T: ToString>(v: &Option<T>) -> String {
        v.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    fn amount(v: &Option<Amount>) -> String {
        v.map(format_amount).unwrap_or_default()
    }

    let mut rows = vec![
        ("bank", format!("{:03}", d.bank)),
        ("movement_code", opt(&d.movement_code)),
        ("movement_description", opt(&d.movement_description)),
        ("classification", opt(&d.classification)),
        ("nosso_numero", opt(&d.nosso_numero)),
        ("document_number", opt(&d.document_number)),
        ("wallet", opt(&d.wallet)),
        ("agency", opt(&d.agency)),
        ("agency_check_digit", opt(&d.agency_check_digit)),
        ("collecting_agency", opt(&d.collecting_agency)),
        ("collecting_agency_check_digit", opt(&d.collecting_agency_check_digit)),
        ("sequence_number", opt(&d.sequence_number)),
        ("due_date", opt(&d.due_date)),
        ("credit_date", opt(&d.credit_date)),
        ("occurrence_date", opt(&d.occurrence_date)),
        ("title_amount", amount(&d.title_amount)),
        ("fee_amount", amount(&d.fee_amount)),
        ("received_amount", amount(&d.received_amount)),
        ("paid_amount", amount(&d.paid_amount)),
        ("iof_amount", amount(&d.iof_amount)),
        ("discount_amount", amount(&d.discount_amount)),
        ("rebate_amount", amount(&d.rebate_amount)),
        ("other_expenses_amount", amount(&d.other_expenses_amount)),
        ("other_credits_amount", amount(&d.other_credits_amount)),
        ("interest_penalty_amount", amount(&d.interest_penalty_amount)),
    ];

    for err in &d.errors {
        rows.push(("error", err.clone()));
    }

    rows
}
