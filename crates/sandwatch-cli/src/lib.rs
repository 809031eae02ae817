/*!
 * Sandwatch CLI
 *
 * Varredura de dumps de blocos (`getBlock` com `jsonParsed`) gravados em
 * arquivos JSON
 */

use anyhow::{Context, Result};
use futures::future::join_all;
use sandwatch_core::{utils::parse_block_payload, SandwichRecord};
use sandwatch_detector::{BlockScanner, ScanConfig, ScanOutcome};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Resultado da varredura de um arquivo
pub struct FileScan {
    pub path: PathBuf,
    pub outcome: Result<ScanOutcome>,
}

/// Carrega a configuração do scanner; sem arquivo usa o padrão
pub async fn load_config(path: Option<&Path>) -> Result<ScanConfig> {
    let Some(path) = path else {
        return Ok(ScanConfig::default());
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("falha ao ler configuração {}", path.display()))?;
    ScanConfig::from_json(&raw)
        .with_context(|| format!("configuração inválida em {}", path.display()))
}

/// Varre cada arquivo em uma tarefa própria; um bloco por invocação do
/// scanner. A saída segue a ordem de `paths`.
pub async fn scan_files(scanner: Arc<BlockScanner>, paths: &[PathBuf]) -> Vec<FileScan> {
    let tasks = paths.iter().cloned().map(|path| {
        let scanner = scanner.clone();
        async move {
            let outcome = scan_file(scanner, &path).await;
            FileScan { path, outcome }
        }
    });
    join_all(tasks).await
}

async fn scan_file(scanner: Arc<BlockScanner>, path: &Path) -> Result<ScanOutcome> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("falha ao ler {}", path.display()))?;
    let outcome = tokio::task::spawn_blocking(move || -> Result<ScanOutcome> {
        let block = parse_block_payload(&raw)?;
        Ok(scanner.scan_optional(block.as_ref()))
    })
    .await
    .context("tarefa de varredura abortada")??;
    Ok(outcome)
}

/// Registra diagnósticos e falhas e junta os registros na ordem dos arquivos
pub fn collect_records(scans: &[FileScan]) -> Vec<SandwichRecord> {
    let mut records = Vec::new();
    for scan in scans {
        match &scan.outcome {
            Ok(outcome) => {
                for diagnostic in &outcome.diagnostics {
                    warn!(file = %scan.path.display(), "{}", diagnostic);
                }
                info!(
                    file = %scan.path.display(),
                    sandwiches = outcome.records.len(),
                    "bloco varrido"
                );
                records.extend(outcome.records.iter().cloned());
            }
            Err(err) => warn!(file = %scan.path.display(), "bloco ignorado: {:#}", err),
        }
    }
    records
}
