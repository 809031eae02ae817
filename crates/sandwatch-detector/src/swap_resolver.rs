use crate::balance_delta::{extract_balance_deltas, BalanceDelta};
use crate::error::SwapError;
use crate::token_instruction::TokenInstruction;
use sandwatch_core::{Amount, Pubkey, TransactionWithMeta};

/// Swap normalizado de uma transação
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Swap {
    pub swapper: Pubkey,
    pub token_in: Pubkey,
    pub amount_in: Amount,
    pub token_out: Pubkey,
    pub amount_out: Amount,
}

/// Transferência de token com o mint possivelmente resolvido por delta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransfer {
    pub mint: Option<Pubkey>,
    pub amount: Amount,
    pub authority: Pubkey,
}

/// Deltas de mints diferentes com a magnitude de uma `transfer`; o primeiro foi usado
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintAmbiguity {
    pub amount: Amount,
    pub candidates: Vec<Pubkey>,
}

/// Swap resolvido e as ambiguidades encontradas no caminho
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSwap {
    pub swap: Swap,
    pub ambiguities: Vec<MintAmbiguity>,
}

/// Reconstrói swaps a partir das instruções internas e dos saldos de token
#[derive(Debug, Clone)]
pub struct SwapResolver {
    token_programs: Vec<Pubkey>,
}

impl SwapResolver {
    pub fn new(token_programs: Vec<Pubkey>) -> Self {
        Self { token_programs }
    }

    /// Resolve o swap de uma transação a partir dos seus próprios saldos
    pub fn resolve(&self, tx: &TransactionWithMeta) -> Result<ResolvedSwap, SwapError> {
        let deltas = extract_balance_deltas(tx.pre_token_balances(), tx.post_token_balances())?;
        self.resolve_with_deltas(tx, &deltas)
    }

    /// Exige exatamente duas transferências: a primeira é o lado que sai do
    /// swapper (`token_in`), a segunda o que retorna (`token_out`).
    pub fn resolve_with_deltas(
        &self,
        tx: &TransactionWithMeta,
        deltas: &[BalanceDelta],
    ) -> Result<ResolvedSwap, SwapError> {
        let mut transfers = Vec::with_capacity(2);
        let mut ambiguities = Vec::new();

        for ix in tx.inner_instructions() {
            let Some(decoded) = TokenInstruction::decode(ix, &self.token_programs)? else {
                continue;
            };
            let mint = match decoded.mint() {
                Some(mint) => Some(mint.clone()),
                None => {
                    let (mint, ambiguity) = resolve_mint(decoded.amount(), deltas);
                    ambiguities.extend(ambiguity);
                    mint
                }
            };
            transfers.push(TokenTransfer {
                mint,
                amount: decoded.amount(),
                authority: decoded.authority().clone(),
            });
        }

        let [first, second]: [TokenTransfer; 2] = transfers
            .try_into()
            .map_err(|found: Vec<TokenTransfer>| SwapError::InvalidSwap { transfers: found.len() })?;

        let token_in = first.mint.ok_or(SwapError::UnresolvedMint { amount: first.amount })?;
        let token_out = second.mint.ok_or(SwapError::UnresolvedMint { amount: second.amount })?;

        Ok(ResolvedSwap {
            swap: Swap {
                swapper: first.authority,
                token_in,
                amount_in: first.amount,
                token_out,
                amount_out: second.amount,
            },
            ambiguities,
        })
    }
}

/// Primeiro delta (ordem crescente de conta) com a mesma magnitude.
///
/// Heurística: quando deltas de mints diferentes têm a mesma magnitude o
/// mint pode ser atribuído errado; a ambiguidade é devolvida para
/// diagnóstico. Vários deltas do mesmo mint (conta do usuário e cofre do
/// pool) não são ambíguos.
fn resolve_mint(amount: Amount, deltas: &[BalanceDelta]) -> (Option<Pubkey>, Option<MintAmbiguity>) {
    let mut candidates: Vec<Pubkey> = Vec::new();
    for delta in deltas.iter().filter(|d| d.magnitude == amount) {
        if !candidates.contains(&delta.mint) {
            candidates.push(delta.mint.clone());
        }
    }
    let mint = candidates.first().cloned();
    let ambiguity = (candidates.len() > 1).then(|| MintAmbiguity { amount, candidates });
    (mint, ambiguity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta(account_index: u16, mint: &str, magnitude: u64) -> BalanceDelta {
        BalanceDelta { account_index, mint: mint.into(), magnitude: magnitude.into() }
    }

    #[test]
    fn resolve_mint_takes_first_match() {
        let deltas = vec![delta(1, "X", 10), delta(2, "Y", 10), delta(3, "Z", 20), delta(4, "Z", 20)];
        let (mint, ambiguity) = resolve_mint(10u64.into(), &deltas);
        assert_eq!(mint, Some("X".into()));
        let ambiguity = ambiguity.unwrap();
        assert_eq!(ambiguity.candidates, vec![Pubkey::from("X"), Pubkey::from("Y")]);

        let (mint, ambiguity) = resolve_mint(20u64.into(), &deltas);
        assert_eq!(mint, Some("Z".into()));
        assert!(ambiguity.is_none());

        assert_eq!(resolve_mint(30u64.into(), &deltas), (None, None));
    }
}
