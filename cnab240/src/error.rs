use thiserror::Error;
use quick_xml::se::SeError;
use crate::model::SegmentKind;

/// Ошибки декодирования детальной записи
///
/// Важно: отсутствие значения "по правилам формата" (нулевая дата, пустой номер документа)
/// ошибкой не является и возвращается как `Ok(None)`.
#[derive(Debug, Error)]
pub enum DecodeError {
    // обёртки

    /// обёртка csv::Error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// обёртка quick_xml::se::SeError
    #[error("Xml serialization error: {0}")]
    XmlSe(#[from] SeError),
    /// обёртка std::io::Error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    // логические ошибки

    /// в сегменте нет поля, которое требуется геттеру
    #[error("missing field: {field} in segment {segment}")]
    MissingField {
        segment: SegmentKind,
        field: &'static str,
    },
    /// поле есть, но хранит значение другого вида
    #[error("field {field} in segment {segment} is not {expected}")]
    FieldType {
        segment: SegmentKind,
        field: &'static str,
        expected: &'static str,
    },
    /// ненулевая дата, которая не является реальной датой календаря
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// ошибка при разборе денежной суммы
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
    /// операция есть в API, но не реализована
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    /// очень общая ошибка плохих входных данных
    #[error("bad input: {0}")]
    BadInput(String),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
