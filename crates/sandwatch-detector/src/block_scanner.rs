use crate::candidate_filter::{Candidates, FilterPipeline};
use crate::config::ScanConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind, ScanOutcome};
use crate::error::SwapError;
use crate::sandwich_matcher::SandwichMatcher;
use crate::swap_resolver::{Swap, SwapResolver};
use sandwatch_core::{Block, SandwichRecord, TransactionWithMeta};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Varre um bloco em janelas de três candidatas consecutivas.
///
/// Sem estado entre chamadas: pode ser usado em paralelo para blocos
/// distintos.
pub struct BlockScanner {
    filters: FilterPipeline,
    matcher: SandwichMatcher,
}

impl BlockScanner {
    pub fn new(config: ScanConfig) -> Self {
        let resolver = SwapResolver::new(config.token_program_ids.clone());
        Self {
            filters: FilterPipeline::from_config(&config),
            matcher: SandwichMatcher::new(resolver, config.require_same_fee_payer),
        }
    }

    /// Bloco ausente resulta em saída vazia
    pub fn scan_optional(&self, block: Option<&Block>) -> ScanOutcome {
        block.map(|b| self.scan(b)).unwrap_or_default()
    }

    pub fn scan(&self, block: &Block) -> ScanOutcome {
        let mut outcome = ScanOutcome::default();
        if block.transactions.is_empty() {
            return outcome;
        }

        let candidates = self.filters.select(&block.transactions);
        trace!(slot = block.slot(), candidates = candidates.len(), "candidatas selecionadas");

        // cada transação é resolvida (e diagnosticada) uma única vez por bloco
        let mut swaps: HashMap<usize, Result<Swap, SwapError>> = HashMap::new();

        for (&index, &front) in &candidates {
            let Some((victim, back)) = window(&candidates, index) else {
                continue;
            };

            let diagnostics = &mut outcome.diagnostics;
            let result = self.matcher.match_with(
                [(index, front), (index + 1, victim), (index + 2, back)],
                |i, tx| self.resolve_cached(&mut swaps, diagnostics, i, tx),
            );

            match result {
                Ok(true) => {
                    if let Some(record) = build_record(block, front, victim, back) {
                        debug!(
                            slot = record.slot_number,
                            attacker = %record.attacker,
                            frontrun = %record.frontrun_tx,
                            victim = %record.victim_tx,
                            backrun = %record.backrun_tx,
                            "sandwich detectado"
                        );
                        outcome.records.push(record);
                    } else {
                        debug!(index, "trio sem assinatura ou signatário, registro descartado");
                    }
                }
                Ok(false) => trace!(index, "trio não é sandwich"),
                Err(failure) => trace!(
                    index,
                    position = %failure.position,
                    failed = failure.index,
                    "trio descartado: {}",
                    failure.error
                ),
            }
        }

        outcome
    }

    fn resolve_cached(
        &self,
        swaps: &mut HashMap<usize, Result<Swap, SwapError>>,
        diagnostics: &mut Vec<Diagnostic>,
        index: usize,
        tx: &TransactionWithMeta,
    ) -> Result<Swap, SwapError> {
        if let Some(cached) = swaps.get(&index) {
            return cached.clone();
        }

        let signature = tx.signature().cloned();
        let result = match self.matcher.resolver().resolve(tx) {
            Ok(resolved) => {
                for ambiguity in resolved.ambiguities {
                    let diagnostic = Diagnostic {
                        index,
                        signature: signature.clone(),
                        kind: DiagnosticKind::AmbiguousMint(ambiguity),
                    };
                    debug!("{}", diagnostic);
                    diagnostics.push(diagnostic);
                }
                Ok(resolved.swap)
            }
            Err(err) => {
                let diagnostic = Diagnostic {
                    index,
                    signature,
                    kind: DiagnosticKind::Excluded(err.clone()),
                };
                debug!("{}", diagnostic);
                diagnostics.push(diagnostic);
                Err(err)
            }
        };

        swaps.insert(index, result.clone());
        result
    }
}

impl Default for BlockScanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}

/// Vítima e back-run de uma janela que começa em `index`, se ambos forem
/// candidatos
fn window<'a>(
    candidates: &Candidates<'a>,
    index: usize,
) -> Option<(&'a TransactionWithMeta, &'a TransactionWithMeta)> {
    let victim = candidates.get(&(index + 1))?;
    let back = candidates.get(&(index + 2))?;
    Some((*victim, *back))
}

fn build_record(
    block: &Block,
    front: &TransactionWithMeta,
    victim: &TransactionWithMeta,
    back: &TransactionWithMeta,
) -> Option<SandwichRecord> {
    Some(SandwichRecord {
        slot_number: block.slot(),
        block_time: block.block_time,
        blockhash: block.blockhash.clone(),
        frontrun_tx: front.signature()?.clone(),
        victim_tx: victim.signature()?.clone(),
        backrun_tx: back.signature()?.clone(),
        attacker: front.primary_signer()?.clone(),
    })
}
