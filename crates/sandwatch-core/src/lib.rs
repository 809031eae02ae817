/*!
 * Sandwatch Core
 * 
 * Tipos e utilitários compartilhados para a workspace Sandwatch
 */

pub mod types;
pub mod traits;
pub mod utils;
pub mod error;
pub mod store;

// Re-exportações públicas
pub use error::Error;
pub use types::*;
