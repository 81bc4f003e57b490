//! # Tokenizador
//!
//! Divide o texto bruto em tokens (palavras, números, pontuações) usando as
//! fronteiras de palavra do Unicode (UAX-29). Cada token preserva sua posição
//! original no texto em **bytes** (para reconstruir a saída inline sem alterar
//! a formatação) e em **caracteres** (offset exposto na saída estruturada).
//!
//! ## Exemplo
//!
//! ```rust
//! use anotador_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("Barack Obama was born in Hawaii.");
//! assert_eq!(tokens[0].text, "Barack");
//! assert_eq!(tokens[1].char_start, 7); // "Obama" começa no caractere 7
//! ```

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Um token extraído do texto original.
///
/// O `Token` é a unidade atômica de processamento. Ele mantém a referência
/// exata de sua posição no texto original, o que é crucial para:
/// 1. Reconstruir o texto com marcações inline sem perder a formatação.
/// 2. Emitir o offset de cada token na saída estruturada.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "Obama", ",", "born").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Offset do primeiro caractere do token, contado em caracteres (base 0).
    pub char_start: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Tokeniza um texto pelas fronteiras de palavra do UAX-29.
///
/// Segmentos compostos apenas de espaço em branco são descartados; todos os
/// demais (palavras, números, pontuação) viram tokens. Os offsets são
/// estritamente crescentes e a concatenação de tokens e lacunas reproduz o
/// texto original byte a byte.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut char_pos = 0usize;

    for (start, segment) in text.split_word_bound_indices() {
        if !segment.chars().all(char::is_whitespace) {
            tokens.push(Token {
                text: segment.to_string(),
                start,
                end: start + segment.len(),
                char_start: char_pos,
                index: tokens.len(),
            });
        }
        char_pos += segment.chars().count();
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Obama visited Berlin.");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Obama", "visited", "Berlin", "."]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
    }

    #[test]
    fn test_char_offsets_ascii() {
        let tokens = tokenize("Barack Obama was born in Hawaii.");
        assert_eq!(tokens[0].char_start, 0); // Barack
        assert_eq!(tokens[1].char_start, 7); // Obama
        assert_eq!(tokens[5].char_start, 25); // Hawaii
        assert_eq!(tokens[6].char_start, 31); // .
    }

    #[test]
    fn test_char_offsets_multibyte() {
        // "São" ocupa 4 bytes mas 3 caracteres
        let tokens = tokenize("São Paulo é linda");
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[1].text, "Paulo");
        assert_eq!(tokens[1].start, 5); // offset em bytes ("São " = 5 bytes)
        assert_eq!(tokens[1].char_start, 4); // "São " = 4 caracteres
        assert_eq!(tokens[2].text, "é");
        assert_eq!(tokens[2].char_start, 10);
    }

    #[test]
    fn test_offsets_strictly_increasing() {
        let tokens = tokenize("a, b, c — d e f.");
        for pair in tokens.windows(2) {
            assert!(pair[1].start > pair[0].start);
            assert!(pair[1].char_start > pair[0].char_start);
        }
    }

    #[test]
    fn test_indices_sequential() {
        let tokens = tokenize("one two three");
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.index, i);
        }
    }

    #[test]
    fn test_byte_ranges_slice_back() {
        let text = "Angela Merkel, em Berlim";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }
}
