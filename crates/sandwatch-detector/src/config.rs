use sandwatch_core::{error::Result, Pubkey};
use serde::{Deserialize, Serialize};

/// Programa de votação do consenso
pub const VOTE_PROGRAM_ID: &str = "Vote111111111111111111111111111111111111111";
/// Programa SPL Token padrão
pub const TOKEN_PROGRAM_ID: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
/// Nome do programa SPL Token no formato `jsonParsed`
pub const TOKEN_PROGRAM_NAME: &str = "spl-token";

/// Configuração do scanner de blocos
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Transações cuja primeira instrução chama este programa são votos
    pub vote_program_id: Pubkey,
    /// Marcadores de swap procurados nos logs, sem diferenciar maiúsculas
    pub swap_log_markers: Vec<String>,
    /// Programas aceitos como emissores de transferências de token
    pub token_program_ids: Vec<Pubkey>,
    /// Exige o mesmo pagador de taxa no front-run e no back-run
    pub require_same_fee_payer: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            vote_program_id: Pubkey::from(VOTE_PROGRAM_ID),
            swap_log_markers: vec!["swap".to_string(), "ray_log".to_string()],
            token_program_ids: vec![Pubkey::from(TOKEN_PROGRAM_ID)],
            require_same_fee_payer: false,
        }
    }
}

impl ScanConfig {
    /// Lê a configuração de um documento JSON; campos ausentes usam o padrão
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ScanConfig::from_json(r#"{"require_same_fee_payer": true}"#).unwrap();
        assert!(config.require_same_fee_payer);
        assert_eq!(config.vote_program_id.as_str(), VOTE_PROGRAM_ID);
        assert_eq!(config.swap_log_markers, vec!["swap", "ray_log"]);
    }

    #[test]
    fn invalid_json_is_rejected() {
        assert!(ScanConfig::from_json(r#"{"swap_log_markers": 3}"#).is_err());
    }
}
