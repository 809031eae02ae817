//! Filtros encadeáveis que selecionam as transações candidatas a swap de um
//! bloco. A seleção é grosseira de propósito: falsos positivos são
//! eliminados depois pelo resolvedor de swaps.

use crate::config::ScanConfig;
use sandwatch_core::{Pubkey, TransactionWithMeta};
use std::collections::BTreeMap;

/// Candidatas indexadas pela posição original no bloco
pub type Candidates<'a> = BTreeMap<usize, &'a TransactionWithMeta>;

/// Trait para filtros de transações
pub trait TransactionFilter: Send + Sync {
    fn name(&self) -> &str;

    /// Retorna `true` quando a transação deve continuar no pipeline
    fn accept(&self, tx: &TransactionWithMeta) -> bool;
}

/// Pipeline de filtros a serem executados sequencialmente
#[derive(Default)]
pub struct FilterPipeline {
    filters: Vec<Box<dyn TransactionFilter>>,
}

impl FilterPipeline {
    /// Cria pipeline vazio
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Pipeline padrão: não-voto, sucesso, marcador de swap nos logs
    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new()
            .push(NonVoteFilter::new(config.vote_program_id.clone()))
            .push(SuccessFilter)
            .push(SwapLogFilter::new(&config.swap_log_markers))
    }

    /// Adiciona um filtro ao pipeline
    pub fn push<F: TransactionFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Todos os filtros aceitam a transação
    pub fn accepts(&self, tx: &TransactionWithMeta) -> bool {
        self.filters.iter().all(|f| f.accept(tx))
    }

    /// Seleciona as candidatas preservando o índice original no bloco
    pub fn select<'a>(&self, transactions: &'a [TransactionWithMeta]) -> Candidates<'a> {
        transactions
            .iter()
            .enumerate()
            .filter(|(_, tx)| self.accepts(tx))
            .collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }
}

/// Descarta votos de consenso e transações sem instrução de topo
pub struct NonVoteFilter {
    vote_program_id: Pubkey,
}

impl NonVoteFilter {
    pub fn new(vote_program_id: Pubkey) -> Self {
        Self { vote_program_id }
    }
}

impl TransactionFilter for NonVoteFilter {
    fn name(&self) -> &str {
        "NonVoteFilter"
    }

    fn accept(&self, tx: &TransactionWithMeta) -> bool {
        tx.first_program_id()
            .is_some_and(|program| *program != self.vote_program_id)
    }
}

/// Aceita apenas transações executadas sem erro
pub struct SuccessFilter;

impl TransactionFilter for SuccessFilter {
    fn name(&self) -> &str {
        "SuccessFilter"
    }

    fn accept(&self, tx: &TransactionWithMeta) -> bool {
        tx.succeeded()
    }
}

/// Procura marcadores de swap nos logs, sem diferenciar maiúsculas
pub struct SwapLogFilter {
    markers: Vec<String>,
}

impl SwapLogFilter {
    pub fn new<S: AsRef<str>>(markers: &[S]) -> Self {
        Self {
            markers: markers.iter().map(|m| m.as_ref().to_lowercase()).collect(),
        }
    }
}

impl TransactionFilter for SwapLogFilter {
    fn name(&self) -> &str {
        "SwapLogFilter"
    }

    fn accept(&self, tx: &TransactionWithMeta) -> bool {
        tx.log_messages().iter().any(|line| {
            let line = line.to_lowercase();
            self.markers.iter().any(|marker| line.contains(marker.as_str()))
        })
    }
}
