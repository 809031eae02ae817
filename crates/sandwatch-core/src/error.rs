use thiserror::Error;

/// Erros comuns da biblioteca Sandwatch
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Montante que não é um inteiro decimal sem sinal de até 256 bits
    #[error("Montante inválido: {0:?}")]
    MalformedAmount(String),

    /// Erro de decodificação do payload de bloco
    #[error("Erro de decodificação: {0}")]
    Decode(String),

    /// Falha reportada pelo colaborador de persistência
    #[error("Erro de persistência: {0}")]
    Store(String),

    /// Erro de entrada/saída
    #[error("Erro de IO: {0}")]
    Io(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;
