use crate::error::SwapError;
use crate::swap_resolver::MintAmbiguity;
use sandwatch_core::{SandwichRecord, Signature};
use std::fmt;

/// Ocorrência não fatal registrada durante a varredura de um bloco
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Índice da transação no bloco
    pub index: usize,
    pub signature: Option<Signature>,
    pub kind: DiagnosticKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A transação não resolveu para swap e saiu da análise
    Excluded(SwapError),
    /// Mint de `transfer` escolhido entre vários deltas de mesma magnitude
    AmbiguousMint(MintAmbiguity),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signature = self.signature.as_ref().map_or("<sem assinatura>", Signature::as_str);
        match &self.kind {
            DiagnosticKind::Excluded(err) => {
                write!(f, "tx #{} {} excluída: {}", self.index, signature, err)
            }
            DiagnosticKind::AmbiguousMint(ambiguity) => write!(
                f,
                "tx #{} {}: {} deltas com magnitude {}, usado o mint {}",
                self.index,
                signature,
                ambiguity.candidates.len(),
                ambiguity.amount,
                ambiguity.candidates.first().map_or("-", |m| m.as_str()),
            ),
        }
    }
}

/// Resultado da varredura de um bloco
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutcome {
    pub records: Vec<SandwichRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanOutcome {
    /// Transações excluídas e o motivo
    pub fn excluded(&self) -> impl Iterator<Item = (&Diagnostic, &SwapError)> {
        self.diagnostics.iter().filter_map(|d| match &d.kind {
            DiagnosticKind::Excluded(err) => Some((d, err)),
            DiagnosticKind::AmbiguousMint(_) => None,
        })
    }
}
