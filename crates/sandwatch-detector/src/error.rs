use sandwatch_core::{AccountIndex, Amount};
use thiserror::Error;

/// Motivos pelos quais uma transação não resolve para um swap.
///
/// Todos são locais à transação: ela sai da análise do bloco e a varredura
/// continua.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwapError {
    /// Quantidade de transferências diferente de duas
    #[error("esperadas 2 transferências de token, encontradas {transfers}")]
    InvalidSwap { transfers: usize },

    /// Nenhum delta de saldo com a magnitude da transferência
    #[error("mint não resolvido para transferência de {amount}")]
    UnresolvedMint { amount: Amount },

    /// Montante que não é inteiro decimal
    #[error("montante inválido: {0:?}")]
    MalformedAmount(String),

    /// Snapshot de saldo pós-execução sem mint
    #[error("saldo de token sem mint na conta {account_index}")]
    MalformedBalance { account_index: AccountIndex },

    /// Discriminador conhecido com `info` fora do formato esperado
    #[error("instrução de token malformada: {0}")]
    MalformedInstruction(String),
}

impl From<sandwatch_core::Error> for SwapError {
    fn from(err: sandwatch_core::Error) -> Self {
        match err {
            sandwatch_core::Error::MalformedAmount(raw) => SwapError::MalformedAmount(raw),
            other => SwapError::MalformedInstruction(other.to_string()),
        }
    }
}
