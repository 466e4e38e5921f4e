use crate::model::Bank;

/// Данные уровня файла, нужные детальной записи.
///
/// Реализуется читателем файла/лота. Детальная запись забирает значения
/// при создании и больше к контексту не обращается.
pub trait FileContext {
    /// Банк, приславший файл возврата
    fn bank(&self) -> Bank;

    /// Код соглашения (convênio) клиента с банком
    fn convenio_code(&self) -> &str;
}

/// Готовая реализация [`FileContext`] из заголовка файла
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnFileHeader {
    pub bank_code: u16,
    pub convenio: String,
}

impl ReturnFileHeader {
    pub fn new(bank_code: u16, convenio: impl Into<String>) -> Self {
        ReturnFileHeader {
            bank_code,
            convenio: convenio.into(),
        }
    }
}

impl FileContext for ReturnFileHeader {
    fn bank(&self) -> Bank {
        Bank::from(self.bank_code)
    }

    fn convenio_code(&self) -> &str {
        &self.convenio
    }
}
