//! Банко-зависимые правила для nosso número и carteira.
//!
//! Каждое правило - отдельная чистая функция, выбор по банку - в одном `match`.
//! Для банков, которых нет в списке, значение не меняется.

use log::debug;
use crate::error::Result;
use crate::extract;
use crate::fields;
use crate::model::Bank;
use crate::segment::SegmentFields;
use crate::utils::is_digits;

/// Правило нормализации nosso número: (сырое значение, convênio) -> значение
pub type NossoNumeroRule = fn(&str, &str) -> String;

/// Выбирает правило нормализации nosso número для банка
pub fn nosso_numero_rule(bank: Bank) -> NossoNumeroRule {
    match bank {
        Bank::BancoDoBrasil => strip_convenio,
        Bank::Santander => drop_check_digit,
        Bank::Cef => keep_last_seven_digits,
        Bank::Sicoob => drop_sicoob_suffix,
        _ => identity,
    }
}

/// Применяет правило банка к сырому nosso número
pub fn normalize_nosso_numero(bank: Bank, raw: &str, convenio: &str) -> String {
    let normalized = nosso_numero_rule(bank)(raw, convenio);
    if normalized != raw {
        debug!("nosso número normalized for bank {bank}: '{raw}' -> '{normalized}'");
    }
    normalized
}

/// Banco do Brasil: nosso número начинается с convênio, его убираем
fn strip_convenio(raw: &str, convenio: &str) -> String {
    raw.strip_prefix(convenio).unwrap_or(raw).to_string()
}

/// Santander: последний символ - контрольная цифра
fn drop_check_digit(raw: &str, _convenio: &str) -> String {
    drop_last_chars(raw, 1)
}

/// CEF: если число больше 9 999 999, остаются последние 7 цифр как число
fn keep_last_seven_digits(raw: &str, _convenio: &str) -> String {
    let digits = raw.trim();
    if !is_digits(digits) {
        return raw.to_string();
    }

    let significant = digits.trim_start_matches('0');
    if significant.len() <= 7 {
        return raw.to_string();
    }

    // только ASCII-цифры, срез по байтам безопасен
    let tail = &significant[significant.len() - 7..];
    tail.trim_start_matches('0')
        .parse::<u32>()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| "0".to_string())
}

/// Sicoob: последние 6 позиций - парцела (2), модальность (2), тип формуляра (1) и пробел
fn drop_sicoob_suffix(raw: &str, _convenio: &str) -> String {
    drop_last_chars(raw, 6)
}

fn identity(raw: &str, _convenio: &str) -> String {
    raw.to_string()
}

fn drop_last_chars(s: &str, n: usize) -> String {
    let keep = s.chars().count().saturating_sub(n);
    s.chars().take(keep).collect()
}

/// Откуда брать carteira
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletRule {
    /// carteira всегда отсутствует
    ///
    /// CEF (104) передаёт в этом поле только код модальности FEBRABAN
    /// (1 - simples, 3 - caucionada, 4 - descontada), номером carteira он не является.
    Suppressed,
    /// значение поля carteira сегмента T, если поле есть
    FromSegment,
}

pub fn wallet_rule(bank: Bank) -> WalletRule {
    match bank.code() {
        104 => WalletRule::Suppressed,
        _ => WalletRule::FromSegment,
    }
}

/// carteira по правилу банка
pub fn wallet<S: SegmentFields + ?Sized>(bank: Bank, segment_t: &S) -> Result<Option<String>> {
    match wallet_rule(bank) {
        WalletRule::Suppressed => Ok(None),
        WalletRule::FromSegment => {
            if segment_t.has_field(fields::t::CARTEIRA) {
                extract::text(segment_t, fields::t::CARTEIRA).map(Some)
            } else {
                Ok(None)
            }
        }
    }
}
