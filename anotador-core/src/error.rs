//! Tipos de erro do anotador.

use thiserror::Error;

/// Falha fatal ao carregar o modelo de gazetteers na inicialização.
///
/// Qualquer variante deve abortar o processo antes do servidor aceitar
/// conexões; o serviço nunca sobe meio-inicializado.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("erro de I/O ao ler o modelo: {0}")]
    Io(#[from] std::io::Error),

    #[error("modelo inválido: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("modelo sem nenhuma entrada de gazetteer")]
    Empty,
}

/// Falha recuperável ao anotar uma entrada específica.
///
/// É o resultado tipado que substitui exceções: o chamador decide na borda
/// da requisição como apresentar a falha (política silenciosa ou reportada).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaggingFailure {
    /// A entrada contém um caractere NUL, que o motor não processa.
    #[error("entrada não suportada: caractere NUL na posição {0}")]
    UnsupportedInput(usize),

    /// O corpo da requisição não é UTF-8 válido (falha de transporte,
    /// tratada de forma idêntica a uma falha do motor).
    #[error("entrada não é texto UTF-8 válido")]
    InvalidEncoding,
}
