/*!
 * Sandwatch Utils
 *
 * Utilitários comuns usados em toda a workspace Sandwatch
 */

use crate::error::{Error, Result};
use crate::types::{Amount, Block};
use serde_json::Value;

/// Converte uma string decimal para `Amount`.
///
/// Aceita apenas dígitos ASCII; string vazia, sinal, espaços, ponto decimal
/// ou valor acima de 256 bits resultam em `MalformedAmount`.
pub fn parse_amount(raw: &str) -> Result<Amount> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::MalformedAmount(raw.to_string()));
    }
    Amount::from_dec_str(raw).map_err(|_| Error::MalformedAmount(raw.to_string()))
}

/// Diferença absoluta entre dois montantes
pub fn abs_diff(a: Amount, b: Amount) -> Amount {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

/// Decodifica um payload de bloco.
///
/// Formatos aceitos: objeto do bloco, lista com o bloco na primeira posição,
/// envelope JSON-RPC com `result`. `null` ou lista vazia indicam bloco
/// ausente e retornam `None`.
pub fn parse_block_payload(raw: &str) -> Result<Option<Block>> {
    let value: Value = serde_json::from_str(raw)?;
    block_from_value(value)
}

fn block_from_value(value: Value) -> Result<Option<Block>> {
    match value {
        Value::Null => Ok(None),
        Value::Array(items) => match items.into_iter().next() {
            Some(first) => block_from_value(first),
            None => Ok(None),
        },
        Value::Object(mut map) if !map.contains_key("parentSlot") => {
            if let Some(error) = map.remove("error") {
                return Err(Error::Decode(format!("resposta RPC com erro: {}", error)));
            }
            match map.remove("result") {
                Some(result) => block_from_value(result),
                None => Err(Error::Decode("payload sem bloco".to_string())),
            }
        }
        other => Ok(Some(serde_json::from_value(other)?)),
    }
}
