use crate::error::SwapError;
use crate::swap_resolver::{Swap, SwapResolver};
use sandwatch_core::TransactionWithMeta;
use std::fmt;

/// Papel de uma transação no trio analisado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Frontrun,
    Victim,
    Backrun,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Frontrun => write!(f, "frontrun"),
            Position::Victim => write!(f, "victim"),
            Position::Backrun => write!(f, "backrun"),
        }
    }
}

const POSITIONS: [Position; 3] = [Position::Frontrun, Position::Victim, Position::Backrun];

/// Uma das transações do trio não resolveu para swap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchFailure {
    pub position: Position,
    pub index: usize,
    pub error: SwapError,
}

/// Predicado de sandwich sobre três swaps consecutivos.
///
/// Todas as condições precisam valer:
/// 1. front e back têm o mesmo swapper;
/// 2. a vítima é outra conta;
/// 3. o back desfaz exatamente o par do front;
/// 4. a vítima opera o mesmo par na mesma direção do front;
/// 5. o atacante recupera mais do token de entrada do que gastou;
/// 6. o que o front rendeu cobre o que volta no back.
pub fn is_sandwich(front: &Swap, victim: &Swap, back: &Swap) -> bool {
    front.swapper == back.swapper
        && front.swapper != victim.swapper
        && back.swapper != victim.swapper
        && front.token_in == back.token_out
        && front.token_out == back.token_in
        && front.token_in == victim.token_in
        && front.token_out == victim.token_out
        && front.amount_in < back.amount_out
        && front.amount_out >= back.amount_in
}

/// Classifica trios de transações adjacentes
#[derive(Debug, Clone)]
pub struct SandwichMatcher {
    resolver: SwapResolver,
    require_same_fee_payer: bool,
}

impl SandwichMatcher {
    pub fn new(resolver: SwapResolver, require_same_fee_payer: bool) -> Self {
        Self {
            resolver,
            require_same_fee_payer,
        }
    }

    pub fn resolver(&self) -> &SwapResolver {
        &self.resolver
    }

    /// Resolve os três swaps e aplica o predicado.
    ///
    /// `txs` traz o índice no bloco de cada transação, na ordem
    /// front, vítima, back.
    pub fn match_triplet(
        &self,
        txs: [(usize, &TransactionWithMeta); 3],
    ) -> Result<bool, MatchFailure> {
        self.match_with(txs, |_, tx| self.resolver.resolve(tx).map(|resolved| resolved.swap))
    }

    /// Igual a [`match_triplet`](Self::match_triplet), mas obtém cada swap
    /// por `resolve`. A resolução segue a ordem do trio e para na primeira
    /// falha.
    pub fn match_with<F>(
        &self,
        txs: [(usize, &TransactionWithMeta); 3],
        mut resolve: F,
    ) -> Result<bool, MatchFailure>
    where
        F: FnMut(usize, &TransactionWithMeta) -> Result<Swap, SwapError>,
    {
        if self.require_same_fee_payer && txs[0].1.primary_signer() != txs[2].1.primary_signer() {
            return Ok(false);
        }

        let mut swaps = Vec::with_capacity(3);
        for (position, (index, tx)) in POSITIONS.into_iter().zip(txs) {
            let swap = resolve(index, tx).map_err(|error| MatchFailure {
                position,
                index,
                error,
            })?;
            swaps.push(swap);
        }

        Ok(is_sandwich(&swaps[0], &swaps[1], &swaps[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap(swapper: &str, token_in: &str, amount_in: u64, token_out: &str, amount_out: u64) -> Swap {
        Swap {
            swapper: swapper.into(),
            token_in: token_in.into(),
            amount_in: amount_in.into(),
            token_out: token_out.into(),
            amount_out: amount_out.into(),
        }
    }

    fn triplet() -> (Swap, Swap, Swap) {
        (
            swap("A", "X", 100, "Y", 90),
            swap("V", "X", 40, "Y", 30),
            swap("A", "Y", 90, "X", 150),
        )
    }

    #[test]
    fn baseline_is_sandwich() {
        let (front, victim, back) = triplet();
        assert!(is_sandwich(&front, &victim, &back));
    }

    #[test]
    fn condition_1_same_attacker() {
        let (front, victim, mut back) = triplet();
        back.swapper = "B".into();
        assert!(!is_sandwich(&front, &victim, &back));
    }

    #[test]
    fn condition_2_distinct_victim() {
        let (front, mut victim, back) = triplet();
        victim.swapper = "A".into();
        assert!(!is_sandwich(&front, &victim, &back));
    }

    #[test]
    fn condition_3_reversed_pair() {
        let (front, victim, mut back) = triplet();
        back.token_out = "Z".into();
        assert!(!is_sandwich(&front, &victim, &back));

        let (front, victim, mut back) = triplet();
        back.token_in = "Z".into();
        assert!(!is_sandwich(&front, &victim, &back));
    }

    #[test]
    fn condition_4_victim_same_direction() {
        let (front, mut victim, back) = triplet();
        victim.token_in = "Y".into();
        victim.token_out = "X".into();
        assert!(!is_sandwich(&front, &victim, &back));

        let (front, mut victim, back) = triplet();
        victim.token_out = "Z".into();
        assert!(!is_sandwich(&front, &victim, &back));
    }

    #[test]
    fn condition_5_profit_is_strict() {
        let (front, victim, mut back) = triplet();
        back.amount_out = 100u64.into();
        assert!(!is_sandwich(&front, &victim, &back));

        back.amount_out = 95u64.into();
        assert!(!is_sandwich(&front, &victim, &back));

        back.amount_out = 101u64.into();
        assert!(is_sandwich(&front, &victim, &back));
    }

    #[test]
    fn condition_6_front_proceeds_cover_back_input() {
        let (front, victim, mut back) = triplet();
        back.amount_in = 91u64.into();
        assert!(!is_sandwich(&front, &victim, &back));

        back.amount_in = 89u64.into();
        assert!(is_sandwich(&front, &victim, &back));
    }

    #[test]
    fn amounts_beyond_u64_compare_exactly() {
        let (mut front, victim, mut back) = triplet();
        let big = sandwatch_core::Amount::from(u64::MAX) * 1_000u64;
        front.amount_in = big;
        back.amount_out = big + 1u64;
        assert!(is_sandwich(&front, &victim, &back));
    }
}
