use crate::config::TOKEN_PROGRAM_NAME;
use crate::error::SwapError;
use sandwatch_core::utils::parse_amount;
use sandwatch_core::{Amount, Instruction, Pubkey};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Transferências do programa SPL Token relevantes para reconstruir swaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenInstruction {
    /// `transfer`: o mint não vem na instrução
    Transfer {
        amount: Amount,
        authority: Pubkey,
        source: Pubkey,
        destination: Pubkey,
    },
    /// `transferChecked`: o mint vem explícito
    TransferChecked {
        mint: Pubkey,
        amount: Amount,
        authority: Pubkey,
        source: Pubkey,
        destination: Pubkey,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferInfo {
    amount: String,
    #[serde(alias = "multisigAuthority")]
    authority: Pubkey,
    source: Pubkey,
    destination: Pubkey,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferCheckedInfo {
    mint: Pubkey,
    token_amount: TokenAmountInfo,
    #[serde(alias = "multisigAuthority")]
    authority: Pubkey,
    source: Pubkey,
    destination: Pubkey,
}

#[derive(Deserialize)]
struct TokenAmountInfo {
    amount: String,
}

impl TokenInstruction {
    /// Decodifica uma instrução `jsonParsed`.
    ///
    /// Retorna `Ok(None)` para instruções de outros programas, sem payload
    /// `parsed` ou com outro discriminador. Um discriminador conhecido com
    /// `info` inválido é erro.
    pub fn decode(
        ix: &Instruction,
        token_programs: &[Pubkey],
    ) -> Result<Option<Self>, SwapError> {
        let is_token_program = ix.program.as_deref() == Some(TOKEN_PROGRAM_NAME)
            || token_programs.contains(&ix.program_id);
        if !is_token_program {
            return Ok(None);
        }
        let Some(parsed) = ix.parsed.as_ref().and_then(Value::as_object) else {
            return Ok(None);
        };
        let info = parsed.get("info").unwrap_or(&Value::Null);

        match parsed.get("type").and_then(Value::as_str) {
            Some("transfer") => {
                let info: TransferInfo = decode_info("transfer", info)?;
                Ok(Some(TokenInstruction::Transfer {
                    amount: parse_amount(&info.amount)?,
                    authority: info.authority,
                    source: info.source,
                    destination: info.destination,
                }))
            }
            Some("transferChecked") => {
                let info: TransferCheckedInfo = decode_info("transferChecked", info)?;
                Ok(Some(TokenInstruction::TransferChecked {
                    mint: info.mint,
                    amount: parse_amount(&info.token_amount.amount)?,
                    authority: info.authority,
                    source: info.source,
                    destination: info.destination,
                }))
            }
            _ => Ok(None),
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            TokenInstruction::Transfer { amount, .. }
            | TokenInstruction::TransferChecked { amount, .. } => *amount,
        }
    }

    pub fn authority(&self) -> &Pubkey {
        match self {
            TokenInstruction::Transfer { authority, .. }
            | TokenInstruction::TransferChecked { authority, .. } => authority,
        }
    }

    /// Mint informado pela própria instrução
    pub fn mint(&self) -> Option<&Pubkey> {
        match self {
            TokenInstruction::Transfer { .. } => None,
            TokenInstruction::TransferChecked { mint, .. } => Some(mint),
        }
    }
}

fn decode_info<T: DeserializeOwned>(kind: &str, info: &Value) -> Result<T, SwapError> {
    T::deserialize(info).map_err(|e| SwapError::MalformedInstruction(format!("{kind}: {e}")))
}
