/*!
 * Sandwatch Store
 *
 * Persistência best-effort de lotes de [`SandwichRecord`]. Cada registro é
 * inserido de forma independente; falhas parciais são contadas e
 * registradas, nunca repetidas.
 */

use crate::error::{Error, Result};
use crate::traits::SandwichStore;
use crate::types::SandwichRecord;
use async_trait::async_trait;
use futures::future::join_all;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex as AsyncMutex;

/// Resultado de um lote: `stored` de `total` registros persistidos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreSummary {
    pub stored: usize,
    pub total: usize,
}

impl StoreSummary {
    pub fn failed(&self) -> usize {
        self.total - self.stored
    }
}

/// Insere todos os registros concorrentemente e retorna a contagem de sucesso
pub async fn store_batch<S>(store: &S, records: &[SandwichRecord]) -> StoreSummary
where
    S: SandwichStore + ?Sized,
{
    let results = join_all(records.iter().map(|record| store.insert(record))).await;

    let mut stored = 0;
    for (record, result) in records.iter().zip(results) {
        match result {
            Ok(()) => stored += 1,
            Err(err) => tracing::error!(
                frontrun = %record.frontrun_tx,
                slot = record.slot_number,
                "falha ao persistir sandwich: {}",
                err
            ),
        }
    }

    let summary = StoreSummary { stored, total: records.len() };
    tracing::info!("{}/{} sandwiches persistidos", summary.stored, summary.total);
    summary
}

/// Store em memória, útil para testes e execuções a seco
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<SandwichRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cópia dos registros na ordem de inserção
    pub fn records(&self) -> Vec<SandwichRecord> {
        self.records.lock().clone()
    }
}

#[async_trait]
impl SandwichStore for MemoryStore {
    async fn insert(&self, record: &SandwichRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Acrescenta um objeto JSON por linha em um arquivo
pub struct JsonLinesStore {
    path: PathBuf,
    // serializa escritas concorrentes de linhas inteiras
    file: AsyncMutex<tokio::fs::File>,
}

impl JsonLinesStore {
    /// Abre (ou cria) o arquivo em modo append
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        Ok(Self {
            path,
            file: AsyncMutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SandwichStore for JsonLinesStore {
    async fn insert(&self, record: &SandwichRecord) -> Result<()> {
        let mut line = serde_json::to_vec(record).map_err(|e| Error::Store(e.to_string()))?;
        line.push(b'\n');
        let mut file = self.file.lock().await;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }
}
