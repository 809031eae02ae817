/*!
 * Sandwatch Traits
 * 
 * Contratos com colaboradores externos ao detector
 */

use async_trait::async_trait;
use crate::error::Result;
use crate::types::SandwichRecord;

/// Destino de persistência dos sandwiches detectados
#[async_trait]
pub trait SandwichStore: Send + Sync {
    /// Persiste um único registro
    async fn insert(&self, record: &SandwichRecord) -> Result<()>;
}
