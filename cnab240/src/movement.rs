use std::collections::HashMap;
use std::fmt;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Описание для кодов, которых нет в справочнике
pub const UNKNOWN_DESCRIPTION: &str = "Desconhecido";

// справочник FEBRABAN, тексты как в документации банков
const MOVEMENT_TABLE: &[(u16, &str)] = &[
    (2, "Entrada Confirmada"),
    (3, "Entrada Rejeitada"),
    (4, "Transferência de Carteira/Entrada"),
    (5, "Transferência de Carteira/Baixa"),
    (6, "Liquidação"),
    (7, "Confirmação do Recebimento da Instrução de Desconto"),
    (8, "Confirmação do Recebimento do Cancelamento do Desconto"),
    (9, "Baixa"),
    (11, "Títulos em Carteira (Em Ser)"),
    (12, "Confirmação Recebimento Instrução de Abatimento"),
    (13, "Confirmação Recebimento Instrução de Cancelamento Abatimento"),
    (14, "Confirmação Recebimento Instrução Alteração de Vencimento"),
    (15, "Franco de Pagamento"),
    (17, "Liquidação Após Baixa ou Liquidação Título Não Registrado"),
    (19, "Confirmação Recebimento Instrução de Protesto"),
    (20, "Confirmação Recebimento Instrução de Sustação/Cancelamento de Protesto"),
    (23, "Remessa a Cartório (Aponte em Cartório)"),
    (24, "Retirada de Cartório e Manutenção em Carteira"),
    (25, "Protestado e Baixado (Baixa por Ter Sido Protestado)"),
    (26, "Instrução Rejeitada"),
    (27, "Confirmação do Pedido de Alteração de Outros Dados"),
    (28, "Débito de Tarifas/Custas"),
    (29, "Ocorrências do Pagador"),
    (30, "Alteração de Dados Rejeitada"),
    (33, "Confirmação da Alteração dos Dados do Rateio de Crédito"),
    (34, "Confirmação do Cancelamento dos Dados do Rateio de Crédito"),
    (35, "Confirmação do Desagendamento do Débito Automático"),
    (36, "Confirmação de envio de e-mail/SMS"),
    (37, "Envio de e-mail/SMS rejeitado"),
    (38, "Confirmação de alteração do Prazo Limite de Recebimento (a data deve ser"),
    (39, "Confirmação de Dispensa de Prazo Limite de Recebimento"),
    (40, "Confirmação da alteração do número do título dado pelo Beneficiário"),
    (41, "Confirmação da alteração do número controle do Participante"),
    (42, "Confirmação da alteração dos dados do Pagador"),
    (43, "Confirmação da alteração dos dados do Pagadorr/Avalista"),
    (44, "Título pago com cheque devolvido"),
    (45, "Título pago com cheque compensado"),
    (46, "Instrução para cancelar protesto confirmada"),
    (47, "Instrução para protesto para fins falimentares confirmada"),
    (48, "Confirmação de instrução de transferência de carteira/modalidade de cobrança"),
    (49, "Alteração de contrato de cobrança"),
    (50, "Título pago com cheque pendente de liquidação"),
    (51, "Título DDA reconhecido pelo Pagador"),
    (52, "Título DDA não reconhecido pelo Pagador"),
    (53, "Título DDA recusado pela CIP"),
    (54, "Confirmação da Instrução de Baixa de Título Negativado sem Protesto"),
    (55, "Confirmação de Pedido de Dispensa de Multa"),
    (56, "Confirmação do Pedido de Cobrança de Multa"),
    (57, "Confirmação do Pedido de Alteração de Cobrança de Juros"),
    (58, "Confirmação do Pedido de Alteração do Valor/Data de Desconto"),
    (59, "Confirmação do Pedido de Alteração do Beneficiário do Título"),
    (60, "Confirmação do Pedido de Dispensa de Juros de Mora"),
    (85, "Confirmação de Desistência de Protesto"),
    (86, "Confirmação de cancelamento do Protesto"),
];

static MOVEMENT_DESCRIPTIONS: Lazy<HashMap<u16, &'static str>> =
    Lazy::new(|| MOVEMENT_TABLE.iter().copied().collect());

/// Погашение обычное: 6 - Liquidação, 17 - Liquidação Após Baixa
const SETTLED_NORMAL: [u16; 2] = [6, 17];
/// Погашение по инициативе банка: 9 - Baixa, 25 - Protestado e Baixado
const SETTLED_FORCED: [u16; 2] = [9, 25];
/// Отказы: 3 - Entrada Rejeitada, 26 - Instrução Rejeitada, 30 - Alteração de Dados Rejeitada
const REJECTED: [u16; 3] = [3, 26, 30];

/// Класс события по коду движения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Classification {
    /// обычное погашение (baixa по оплате)
    SettledNormal,
    /// погашение, проведённое банком
    SettledForced,
    /// отклонённая операция
    Rejected,
    /// всё остальное, включая неизвестные коды
    Other,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::SettledNormal => write!(f, "settled"),
            Classification::SettledForced => write!(f, "settled by bank"),
            Classification::Rejected => write!(f, "rejected"),
            Classification::Other => write!(f, "other"),
        }
    }
}

/// Код движения (codigo_movimento) из сегмента T
///
/// Любое значение допустимо: для кодов вне справочника описание - [`UNKNOWN_DESCRIPTION`],
/// класс - [`Classification::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MovementCode(pub u16);

impl MovementCode {
    pub fn code(self) -> u16 {
        self.0
    }

    /// Описание кода на португальском
    pub fn describe(self) -> &'static str {
        MOVEMENT_DESCRIPTIONS
            .get(&self.0)
            .copied()
            .unwrap_or(UNKNOWN_DESCRIPTION)
    }

    pub fn is_known(self) -> bool {
        MOVEMENT_DESCRIPTIONS.contains_key(&self.0)
    }

    pub fn classify(self) -> Classification {
        if SETTLED_NORMAL.contains(&self.0) {
            Classification::SettledNormal
        } else if SETTLED_FORCED.contains(&self.0) {
            Classification::SettledForced
        } else if REJECTED.contains(&self.0) {
            Classification::Rejected
        } else {
            Classification::Other
        }
    }

    /// Нужно ли погасить титул
    ///
    /// `forced_by_bank = false` - только обычные погашения (6, 17),
    /// `forced_by_bank = true` - только погашения банком (9, 25).
    pub fn is_settlement(self, forced_by_bank: bool) -> bool {
        let expected = if forced_by_bank {
            Classification::SettledForced
        } else {
            Classification::SettledNormal
        };
        self.classify() == expected
    }

    pub fn is_rejected_settlement(self) -> bool {
        self.classify() == Classification::Rejected
    }
}

impl From<u16> for MovementCode {
    fn from(code: u16) -> Self {
        MovementCode(code)
    }
}

impl fmt::Display for MovementCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} - {}", self.0, self.describe())
    }
}

/// Классификация "голого" кода, без детальной записи
pub fn is_settlement_code(code: u16, forced_by_bank: bool) -> bool {
    MovementCode(code).is_settlement(forced_by_bank)
}
