use std::path::PathBuf;

use thiserror::Error;

/// Erro comum a todos os módulos utilitários do crate.
#[derive(Debug, Error)]
pub enum UtilError
{
    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL inválida: {0}")]
    Url(#[from] url::ParseError),

    #[error("Falha na requisição HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Falha ao interpretar data: {0}")]
    Date(#[from] chrono::ParseError),

    #[error("Resposta sem o header Date")]
    MissingDateHeader,

    #[error("Intervalo insuficiente: {needed} valores pedidos, {available} disponíveis")]
    InsufficientRange
    {
        needed: usize,
        available: usize,
    },

    #[error("Conjunto de caracteres vazio: habilite pelo menos uma classe")]
    EmptyCharset,

    #[error("Não é um diretório: {}", .0.display())]
    NotADirectory(PathBuf),
}
