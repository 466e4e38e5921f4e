//! Имена полей сегментов, как их называет разборщик строк.

/// Сегмент T
pub mod t {
    pub const CODIGO_MOVIMENTO: &str = "codigo_movimento";
    pub const VALOR_TITULO: &str = "valor_titulo";
    pub const VALOR_TARIFA: &str = "valor_tarifa";
    pub const NOSSO_NUMERO: &str = "nosso_numero";
    pub const NUMERO_DOCUMENTO: &str = "numero_documento";
    pub const DATA_VENCIMENTO: &str = "data_vencimento";
    pub const CARTEIRA: &str = "carteira";
    pub const AGENCIA_MANTENEDORA: &str = "agencia_mantenedora";
    pub const AGENCIA_DV: &str = "agencia_dv";
    pub const AGENCIA_COBRADORA: &str = "agencia_cobradora";
    pub const AGENCIA_COBRADORA_DAC: &str = "agencia_cobradora_dac";
    pub const NUMERO_SEQUENCIAL_LOTE: &str = "numero_sequencial_lote";

    /// Поля, которые всегда текст: ведущие нули в них значимы
    pub const TEXT_FIELDS: [&str; 7] = [
        NOSSO_NUMERO,
        NUMERO_DOCUMENTO,
        CARTEIRA,
        AGENCIA_MANTENEDORA,
        AGENCIA_DV,
        AGENCIA_COBRADORA,
        AGENCIA_COBRADORA_DAC,
    ];
}

/// Сегмент U
pub mod u {
    pub const VALOR_LIQUIDO: &str = "valor_liquido";
    pub const VALOR_PAGO: &str = "valor_pago";
    pub const VALOR_IOF: &str = "valor_iof";
    pub const VALOR_DESCONTO: &str = "valor_desconto";
    pub const VALOR_ABATIMENTO: &str = "valor_abatimento";
    pub const VALOR_OUTRAS_DESPESAS: &str = "valor_outras_despesas";
    pub const VALOR_OUTROS_CREDITOS: &str = "valor_outros_creditos";
    pub const VALOR_ACRESCIMOS: &str = "valor_acrescimos";
    pub const DATA_CREDITO: &str = "data_credito";
    pub const DATA_OCORRENCIA: &str = "data_ocorrencia";
}
