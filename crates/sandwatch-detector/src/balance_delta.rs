use crate::error::SwapError;
use sandwatch_core::utils::abs_diff;
use sandwatch_core::{AccountIndex, Amount, Pubkey, TokenBalance};
use std::collections::BTreeMap;

/// Variação absoluta do saldo de token de uma conta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceDelta {
    pub account_index: AccountIndex,
    pub mint: Pubkey,
    pub magnitude: Amount,
}

/// Calcula os deltas de saldo entre os snapshots pré e pós execução.
///
/// A ordem do resultado é crescente por `account_index`. Contas presentes
/// apenas no pós contam com o saldo final inteiro; variação nula é
/// descartada; contas presentes apenas no pré são ignoradas.
///
/// Montante ausente ou inválido resulta em `MalformedAmount`; snapshot pós
/// sem mint em `MalformedBalance`.
pub fn extract_balance_deltas(
    pre: &[TokenBalance],
    post: &[TokenBalance],
) -> Result<Vec<BalanceDelta>, SwapError> {
    let pre: BTreeMap<AccountIndex, &TokenBalance> =
        pre.iter().map(|b| (b.account_index, b)).collect();
    let post: BTreeMap<AccountIndex, &TokenBalance> =
        post.iter().map(|b| (b.account_index, b)).collect();

    let mut deltas = Vec::with_capacity(post.len());
    for (&account_index, after) in &post {
        let after_amount = after.ui_token_amount.parse()?;
        let magnitude = match pre.get(&account_index) {
            Some(before) => abs_diff(after_amount, before.ui_token_amount.parse()?),
            None => after_amount,
        };
        if pre.contains_key(&account_index) && magnitude.is_zero() {
            continue;
        }
        let mint = after
            .mint
            .clone()
            .ok_or(SwapError::MalformedBalance { account_index })?;
        deltas.push(BalanceDelta {
            account_index,
            mint,
            magnitude,
        });
    }
    Ok(deltas)
}
