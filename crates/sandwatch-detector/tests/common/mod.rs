#![allow(dead_code)]

use sandwatch_core::Block;
use sandwatch_detector::{TOKEN_PROGRAM_ID, VOTE_PROGRAM_ID};
use serde_json::{json, Value};

pub const RAYDIUM_AMM: &str = "675kPX9MHTjS2zt1qfr1NYHuzeLXfQM9H24wFSUt1Mp8";
pub const MINT_X: &str = "So11111111111111111111111111111111111111112";
pub const MINT_Y: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const POOL_AUTHORITY: &str = "5Q544fKrFoe6tsEbD7S8EmxGTJYAKtTVhAW5Q5pge4j1";

pub fn transfer_checked(mint: &str, amount: u64, authority: &str, source: &str, destination: &str) -> Value {
    json!({
        "program": "spl-token",
        "programId": TOKEN_PROGRAM_ID,
        "stackHeight": 2,
        "parsed": {
            "type": "transferChecked",
            "info": {
                "mint": mint,
                "tokenAmount": {
                    "amount": amount.to_string(),
                    "decimals": 6,
                    "uiAmount": amount as f64 / 1e6,
                    "uiAmountString": (amount as f64 / 1e6).to_string()
                },
                "authority": authority,
                "source": source,
                "destination": destination
            }
        }
    })
}

pub fn transfer(amount: u64, authority: &str, source: &str, destination: &str) -> Value {
    json!({
        "program": "spl-token",
        "programId": TOKEN_PROGRAM_ID,
        "stackHeight": 2,
        "parsed": {
            "type": "transfer",
            "info": {
                "amount": amount.to_string(),
                "authority": authority,
                "source": source,
                "destination": destination
            }
        }
    })
}

pub fn token_balance(account_index: u16, mint: &str, amount: u64) -> Value {
    token_balance_raw(account_index, mint, &amount.to_string())
}

pub fn token_balance_raw(account_index: u16, mint: &str, amount: &str) -> Value {
    json!({
        "accountIndex": account_index,
        "mint": mint,
        "owner": "owner",
        "programId": TOKEN_PROGRAM_ID,
        "uiTokenAmount": {"amount": amount, "decimals": 6, "uiAmount": null, "uiAmountString": "0"}
    })
}

/// Transação montada a partir de valores padrão de um swap bem sucedido
#[derive(Clone)]
pub struct TxBuilder {
    pub signature: String,
    pub signer: String,
    pub program: String,
    pub failed: bool,
    pub logs: Vec<String>,
    pub inner: Vec<Value>,
    pub pre: Vec<Value>,
    pub post: Vec<Value>,
}

impl TxBuilder {
    pub fn new(signature: &str, signer: &str) -> Self {
        Self {
            signature: signature.to_string(),
            signer: signer.to_string(),
            program: RAYDIUM_AMM.to_string(),
            failed: false,
            logs: vec![
                format!("Program {} invoke [1]", RAYDIUM_AMM),
                "Program log: ray_log: A0BCDwAAAAAA".to_string(),
                format!("Program {} success", RAYDIUM_AMM),
            ],
            inner: Vec::new(),
            pre: Vec::new(),
            post: Vec::new(),
        }
    }

    pub fn signer(mut self, signer: &str) -> Self {
        self.signer = signer.to_string();
        self
    }

    pub fn program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    pub fn failed(mut self) -> Self {
        self.failed = true;
        self
    }

    pub fn logs(mut self, logs: &[&str]) -> Self {
        self.logs = logs.iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn inner(mut self, inner: Vec<Value>) -> Self {
        self.inner = inner;
        self
    }

    pub fn balances(mut self, pre: Vec<Value>, post: Vec<Value>) -> Self {
        self.pre = pre;
        self.post = post;
        self
    }

    pub fn build(&self) -> Value {
        json!({
            "transaction": {
                "signatures": [self.signature],
                "message": {
                    "accountKeys": [
                        {"pubkey": self.signer, "signer": true, "writable": true, "source": "transaction"},
                        {"pubkey": format!("{}-in", self.signer), "signer": false, "writable": true, "source": "transaction"},
                        {"pubkey": format!("{}-out", self.signer), "signer": false, "writable": true, "source": "transaction"},
                        {"pubkey": "vault-in", "signer": false, "writable": true, "source": "transaction"},
                        {"pubkey": "vault-out", "signer": false, "writable": true, "source": "transaction"}
                    ],
                    "instructions": [
                        {"programId": self.program, "accounts": [], "data": "9XJz", "stackHeight": null}
                    ],
                    "recentBlockhash": "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N"
                }
            },
            "meta": {
                "err": if self.failed { json!({"InstructionError": [0, {"Custom": 30}]}) } else { Value::Null },
                "fee": 5000,
                "logMessages": self.logs,
                "innerInstructions": [{"index": 0, "instructions": self.inner}],
                "preTokenBalances": self.pre,
                "postTokenBalances": self.post
            }
        })
    }
}

/// Swap com duas `transferChecked`: `amount_in` de `token_in` sai do
/// swapper, `amount_out` de `token_out` retorna do pool
pub fn swap(signature: &str, swapper: &str, token_in: &str, amount_in: u64, token_out: &str, amount_out: u64) -> TxBuilder {
    let user_in = format!("{}-in", swapper);
    let user_out = format!("{}-out", swapper);
    TxBuilder::new(signature, swapper).inner(vec![
        transfer_checked(token_in, amount_in, swapper, &user_in, "vault-in"),
        transfer_checked(token_out, amount_out, POOL_AUTHORITY, "vault-out", &user_out),
    ])
}

/// Swap com duas `transfer`; os mints vêm dos deltas de saldo
pub fn swap_unchecked(signature: &str, swapper: &str, token_in: &str, amount_in: u64, token_out: &str, amount_out: u64) -> TxBuilder {
    let user_in = format!("{}-in", swapper);
    let user_out = format!("{}-out", swapper);
    TxBuilder::new(signature, swapper)
        .inner(vec![
            transfer(amount_in, swapper, &user_in, "vault-in"),
            transfer(amount_out, POOL_AUTHORITY, "vault-out", &user_out),
        ])
        .balances(
            vec![
                token_balance(1, token_in, 1_000_000),
                token_balance(3, token_in, 5_000_000),
                token_balance(4, token_out, 5_000_000),
            ],
            vec![
                token_balance(1, token_in, 1_000_000 - amount_in),
                token_balance(2, token_out, amount_out),
                token_balance(3, token_in, 5_000_000 + amount_in),
                token_balance(4, token_out, 5_000_000 - amount_out),
            ],
        )
}

pub fn vote(signature: &str) -> TxBuilder {
    TxBuilder::new(signature, "validator-identity")
        .program(VOTE_PROGRAM_ID)
        .logs(&[
            "Program Vote111111111111111111111111111111111111111 invoke [1]",
            "Program Vote111111111111111111111111111111111111111 success",
        ])
}

pub fn block_json(parent_slot: u64, txs: &[TxBuilder]) -> Value {
    json!({
        "blockHeight": 283_000_000u64,
        "blockTime": 1_733_000_000i64,
        "blockhash": "7aJ2Vm3DNgmKLwTq9yWL5y2xYJcGd3xmZ3W8Y1Hn6Hcd",
        "parentSlot": parent_slot,
        "previousBlockhash": "3kdzhuvcVwX5wJ1zRVpTmXdM9NoM7Kf5W2WfAm8d4aqt",
        "rewards": [],
        "transactions": txs.iter().map(TxBuilder::build).collect::<Vec<_>>()
    })
}

pub fn block(parent_slot: u64, txs: &[TxBuilder]) -> Block {
    serde_json::from_value(block_json(parent_slot, txs)).expect("fixture de bloco válida")
}

/// Votos nos índices 0..n, para posicionar os swaps no bloco
pub fn votes(n: usize) -> Vec<TxBuilder> {
    (0..n).map(|i| vote(&format!("vote-{i}"))).collect()
}
