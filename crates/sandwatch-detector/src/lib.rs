/*!
 * Sandwatch Detector
 *
 * Detecção de sandwich attacks em um bloco Solana a partir das instruções
 * internas e dos snapshots de saldo de token de cada transação.
 *
 * Pipeline: filtro de candidatas, extração de deltas de saldo, resolução de
 * swaps, predicado de sandwich sobre janelas de três transações.
 */

mod balance_delta;
mod block_scanner;
mod candidate_filter;
mod config;
mod diagnostics;
mod error;
mod sandwich_matcher;
mod swap_resolver;
mod token_instruction;

pub use balance_delta::*;
pub use block_scanner::*;
pub use candidate_filter::*;
pub use config::*;
pub use diagnostics::*;
pub use error::*;
pub use sandwich_matcher::*;
pub use swap_resolver::*;
pub use token_instruction::*;
