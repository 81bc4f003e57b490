//! # Anotador — Orquestrador do Pipeline de Tagging
//!
//! Conecta tokenizador e motor de regras e expõe o contrato consumido pelo
//! servidor: `tag(texto) -> Annotation | TaggingFailure`. A falha é um valor
//! tipado, nunca um panic; quem chama decide como apresentá-la.
//!
//! O [`Annotator`] é imutável após a construção e só recebe `&self`, portanto
//! pode ser compartilhado entre requisições concorrentes sem serialização.
//! Motores que não tiverem essa garantia devem embutir seu próprio lock antes
//! de implementar [`Tagger`].

use serde::Serialize;

use crate::error::TaggingFailure;
use crate::gazetteer::GazetteerEngine;
use crate::model::TaggerModel;
use crate::tagger::{tokens_to_spans, EntitySpan, Tag, TaggedToken};
use crate::tokenizer::tokenize;

/// O contrato de tagging: texto entra, resultado anotado ou falha sai.
///
/// O servidor depende apenas deste trait, o que permite trocar o motor (ou
/// injetar um motor defeituoso nos testes) sem tocar na camada HTTP.
pub trait Tagger: Send + Sync {
    fn tag(&self, text: &str) -> Result<Annotation, TaggingFailure>;
}

/// Resultado da anotação de um texto.
///
/// Guarda o texto original e os tokens rotulados, e sabe se apresentar nas
/// duas formas equivalentes do contrato: texto com marcações inline ou
/// linhas estruturadas `token<TAB>offset<TAB>rótulo`.
#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    /// O texto original, intocado.
    pub text: String,
    /// Um registro por token, em ordem de entrada.
    pub tagged_tokens: Vec<TaggedToken>,
    /// Entidades reconstruídas a partir das tags BIO, em ordem de texto.
    pub entities: Vec<EntitySpan>,
}

impl Annotation {
    /// Forma inline: o texto original com cada entidade envolta em
    /// `[RÓTULO texto da entidade]`. Tudo fora das entidades permanece
    /// byte a byte igual à entrada.
    pub fn to_inline(&self) -> String {
        let mut out = String::with_capacity(self.text.len() + self.entities.len() * 16);
        let mut cursor = 0usize;

        for span in &self.entities {
            out.push_str(&self.text[cursor..span.start]);
            out.push('[');
            out.push_str(span.category.name());
            out.push(' ');
            out.push_str(&self.text[span.start..span.end]);
            out.push(']');
            cursor = span.end;
        }
        out.push_str(&self.text[cursor..]);
        out
    }

    /// Forma estruturada: uma linha por token, campos separados por TAB
    /// (`token`, offset do primeiro caractere, rótulo), terminada em `\n`.
    /// Texto sem tokens produz a string vazia.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for tagged in &self.tagged_tokens {
            out.push_str(&tagged.token.text);
            out.push('\t');
            out.push_str(&tagged.token.char_start.to_string());
            out.push('\t');
            out.push_str(tagged.tag.output_label());
            out.push('\n');
        }
        out
    }
}

/// O motor de anotação padrão: tokeniza e aplica o motor de regras.
pub struct Annotator {
    engine: GazetteerEngine,
}

impl Annotator {
    /// Constrói o anotador a partir de um modelo carregado.
    pub fn new(model: TaggerModel) -> Self {
        Self {
            engine: model.engine,
        }
    }

    /// Atalho: anotador com o modelo embutido de demonstração.
    pub fn builtin() -> Self {
        Self::new(TaggerModel::builtin())
    }
}

impl Tagger for Annotator {
    /// Anota um texto: valida a entrada, tokeniza, aplica as regras e
    /// reconstrói os spans de entidade.
    ///
    /// Determinístico e sem estado entre chamadas: a mesma entrada produz
    /// sempre a mesma saída.
    fn tag(&self, text: &str) -> Result<Annotation, TaggingFailure> {
        if let Some(pos) = text.chars().position(|c| c == '\0') {
            return Err(TaggingFailure::UnsupportedInput(pos));
        }

        let tokens = tokenize(text);
        let matches = self.engine.apply(&tokens);

        let tagged_tokens: Vec<TaggedToken> = tokens
            .into_iter()
            .zip(matches)
            .map(|(token, rule_match)| match rule_match {
                Some(m) => TaggedToken {
                    token,
                    tag: m.tag,
                    confidence: m.confidence,
                },
                None => TaggedToken {
                    token,
                    tag: Tag::Outside,
                    confidence: 1.0,
                },
            })
            .collect();

        let entities = tokens_to_spans(&tagged_tokens, text);

        Ok(Annotation {
            text: text.to_string(),
            tagged_tokens,
            entities,
        })
    }
}
