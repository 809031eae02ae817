/*!
 * Sandwatch Types
 *
 * Modelo de dados de bloco (formato `jsonParsed` do `getBlock`) e o
 * registro de saída produzido pelo detector
 */

use chrono::{DateTime, TimeZone, Utc};
use ethereum_types::U256;
use crate::error::{Error, Result};
use crate::utils::parse_amount;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Montante de tokens em unidades mínimas
pub type Amount = U256;

/// Posição de uma conta na lista de contas da transação
pub type AccountIndex = u16;

/// Chave pública codificada em base58
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pubkey(pub String);

impl Pubkey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Pubkey {
    fn from(value: &str) -> Self {
        Pubkey(value.to_string())
    }
}

/// Assinatura de transação codificada em base58
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Signature(pub String);

impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Signature {
    fn from(value: &str) -> Self {
        Signature(value.to_string())
    }
}

/// Bloco confirmado de um slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub parent_slot: u64,
    #[serde(default)]
    pub block_time: Option<i64>,
    pub blockhash: String,
    #[serde(default)]
    pub transactions: Vec<TransactionWithMeta>,
}

impl Block {
    /// Slot do bloco, derivado do slot pai
    pub fn slot(&self) -> u64 {
        self.parent_slot.saturating_add(1)
    }
}

/// Transação com seus metadados de execução
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWithMeta {
    pub transaction: TransactionEnvelope,
    #[serde(default)]
    pub meta: Option<TransactionMeta>,
}

impl TransactionWithMeta {
    /// Assinatura canônica (índice 0)
    pub fn signature(&self) -> Option<&Signature> {
        self.transaction.signatures.first()
    }

    /// Pagador de taxa / signatário principal (conta de índice 0)
    pub fn primary_signer(&self) -> Option<&Pubkey> {
        self.transaction
            .message
            .account_keys
            .first()
            .map(|key| &key.pubkey)
    }

    /// Programa alvo da primeira instrução de topo
    pub fn first_program_id(&self) -> Option<&Pubkey> {
        self.transaction
            .message
            .instructions
            .first()
            .map(|ix| &ix.program_id)
    }

    /// Executou sem erro. Sem metadados não há como afirmar sucesso.
    pub fn succeeded(&self) -> bool {
        self.meta.as_ref().is_some_and(|meta| meta.err.is_none())
    }

    pub fn log_messages(&self) -> &[String] {
        self.meta
            .as_ref()
            .and_then(|meta| meta.log_messages.as_deref())
            .unwrap_or(&[])
    }

    /// Instruções internas de todos os grupos, na ordem de execução
    pub fn inner_instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.meta
            .as_ref()
            .and_then(|meta| meta.inner_instructions.as_deref())
            .unwrap_or(&[])
            .iter()
            .flat_map(|group| group.instructions.iter())
    }

    pub fn pre_token_balances(&self) -> &[TokenBalance] {
        self.meta
            .as_ref()
            .and_then(|meta| meta.pre_token_balances.as_deref())
            .unwrap_or(&[])
    }

    pub fn post_token_balances(&self) -> &[TokenBalance] {
        self.meta
            .as_ref()
            .and_then(|meta| meta.post_token_balances.as_deref())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEnvelope {
    #[serde(default)]
    pub signatures: Vec<Signature>,
    pub message: Message,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub account_keys: Vec<AccountKey>,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountKey {
    pub pubkey: Pubkey,
    #[serde(default)]
    pub signer: bool,
    #[serde(default)]
    pub writable: bool,
}

/// Instrução no formato `jsonParsed`. O payload `parsed` só existe quando o
/// nó conhece o programa e pode ser um objeto ou uma string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub program_id: Pubkey,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub parsed: Option<serde_json::Value>,
    #[serde(default)]
    pub stack_height: Option<u32>,
}

/// Grupo de instruções internas ligado a uma instrução de topo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerInstructions {
    pub index: u16,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

/// Metadados de execução
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionMeta {
    #[serde(default)]
    pub err: Option<serde_json::Value>,
    #[serde(default)]
    pub log_messages: Option<Vec<String>>,
    #[serde(default)]
    pub inner_instructions: Option<Vec<InnerInstructions>>,
    #[serde(default)]
    pub pre_token_balances: Option<Vec<TokenBalance>>,
    #[serde(default)]
    pub post_token_balances: Option<Vec<TokenBalance>>,
}

/// Snapshot do saldo de token de uma conta.
///
/// `mint` e `amount` são decodificados sem validação: um snapshot malformado
/// invalida apenas a transação que o contém, não o bloco.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalance {
    pub account_index: AccountIndex,
    #[serde(default)]
    pub mint: Option<Pubkey>,
    #[serde(default)]
    pub ui_token_amount: UiTokenAmount,
}

/// Montante como string decimal; nunca interpretado como ponto flutuante
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiTokenAmount {
    #[serde(default)]
    pub amount: Value,
}

impl UiTokenAmount {
    pub fn new(amount: &str) -> Self {
        Self {
            amount: Value::String(amount.to_string()),
        }
    }

    /// Montante em unidades mínimas. Ausente ou fora do formato string
    /// decimal resulta em `MalformedAmount`.
    pub fn parse(&self) -> Result<Amount> {
        match &self.amount {
            Value::String(raw) => parse_amount(raw),
            other => Err(Error::MalformedAmount(other.to_string())),
        }
    }
}

/// Sandwich detectado em um bloco
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandwichRecord {
    pub slot_number: u64,
    pub block_time: Option<i64>,
    pub blockhash: String,
    pub frontrun_tx: Signature,
    pub victim_tx: Signature,
    pub backrun_tx: Signature,
    pub attacker: Pubkey,
}

impl SandwichRecord {
    /// Horário do bloco em UTC, quando conhecido
    pub fn block_datetime(&self) -> Option<DateTime<Utc>> {
        self.block_time
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
    }
}
