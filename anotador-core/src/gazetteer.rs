//! # Motor de Regras — Gazetteers e Padrões
//!
//! O motor de regras é o coração do anotador: listas de entidades conhecidas
//! (gazetteers) carregadas do modelo, complementadas por padrões de contexto
//! (títulos que precedem nomes, sufixos societários) e uma expressão regular
//! para siglas.
//!
//! Todas as listas aceitam entradas de múltiplas palavras ("Barack Obama",
//! "United Nations"); a correspondência é feita por n-gramas sobre a
//! sequência de tokens, preferindo sempre o casamento mais longo.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tagger::{EntityCategory, Tag};
use crate::tokenizer::Token;

/// Uma correspondência de regra: qual token foi marcado e com qual tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMatch {
    pub token_index: usize,
    pub tag: Tag,
    pub rule_name: String,
    pub confidence: f64,
}

/// Motor de regras com gazetteers e padrões de contexto
pub struct GazetteerEngine {
    /// Nomes de pessoas (n-gramas lowercase)
    persons: Vec<Vec<String>>,
    /// Cidades, estados, países e acidentes geográficos (n-gramas lowercase)
    locations: Vec<Vec<String>>,
    /// Organizações conhecidas (n-gramas lowercase)
    organizations: Vec<Vec<String>>,
    /// Entidades miscelâneas: eventos, obras, leis (n-gramas lowercase)
    misc: Vec<Vec<String>>,
    /// Títulos que precedem nomes de pessoas
    person_titles: Vec<String>,
    /// Sufixos societários que indicam organização
    org_suffixes: Vec<String>,
    /// Siglas em caixa alta (ex: "NATO", "FIFA")
    acronym: Regex,
}

impl GazetteerEngine {
    pub fn new() -> Self {
        Self {
            persons: vec![],
            locations: vec![],
            organizations: vec![],
            misc: vec![],
            person_titles: [
                "president", "ex-president", "senator", "governor", "minister",
                "chancellor", "mayor", "general", "captain", "judge", "justice",
                "dr", "mr", "mrs", "ms", "prof", "sir", "secretary", "director",
                "ceo", "coach", "actor", "actress", "singer",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            org_suffixes: [
                "inc", "corp", "ltd", "llc", "plc", "gmbh", "co", "sa",
                "holdings", "group", "fc",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            acronym: Regex::new(r"^[A-Z]{2,6}$").unwrap(),
        }
    }

    pub fn add_person(&mut self, name: &str) {
        push_ngram(&mut self.persons, name);
    }

    pub fn add_location(&mut self, name: &str) {
        push_ngram(&mut self.locations, name);
    }

    pub fn add_organization(&mut self, name: &str) {
        push_ngram(&mut self.organizations, name);
    }

    pub fn add_misc(&mut self, name: &str) {
        push_ngram(&mut self.misc, name);
    }

    /// Total de entradas de gazetteer carregadas (todas as categorias)
    pub fn entry_count(&self) -> usize {
        self.persons.len() + self.locations.len() + self.organizations.len() + self.misc.len()
    }

    /// Aplica todas as regras à sequência de tokens.
    ///
    /// Retorna um vetor paralelo aos tokens: `Some(RuleMatch)` para os
    /// identificados, `None` para os demais. A primeira regra a marcar um
    /// token vence; as passadas são ordenadas da mais confiável para a menos.
    pub fn apply(&self, tokens: &[Token]) -> Vec<Option<RuleMatch>> {
        let mut result: Vec<Option<RuleMatch>> = vec![None; tokens.len()];

        // 1-4. Gazetteers por categoria, n-gramas com casamento mais longo
        self.match_ngrams(&self.persons, EntityCategory::Person, "person_gazetteer", 0.92, tokens, &mut result);
        self.match_ngrams(&self.locations, EntityCategory::Location, "location_gazetteer", 0.90, tokens, &mut result);
        self.match_ngrams(&self.organizations, EntityCategory::Organization, "org_gazetteer", 0.93, tokens, &mut result);
        self.match_ngrams(&self.misc, EntityCategory::Misc, "misc_gazetteer", 0.88, tokens, &mut result);

        // 5. Regra de título: "President X" → X é PERSON
        for i in 0..tokens.len().saturating_sub(1) {
            if result[i + 1].is_some() {
                continue;
            }
            let lower = tokens[i].text.to_lowercase();
            let lower = lower.trim_end_matches('.');
            if self.person_titles.iter().any(|t| t == lower) && starts_uppercase(&tokens[i + 1]) {
                result[i + 1] = Some(RuleMatch {
                    token_index: i + 1,
                    tag: Tag::Begin(EntityCategory::Person),
                    rule_name: "title_pattern".to_string(),
                    confidence: 0.80,
                });
            }
        }

        // 6. Sufixos societários: "X Corp" → X é ORGANIZATION
        for i in 1..tokens.len() {
            let lower = tokens[i].text.to_lowercase();
            let lower = lower.trim_end_matches('.');
            if self.org_suffixes.iter().any(|s| s == lower)
                && result[i - 1].is_none()
                && starts_uppercase(&tokens[i - 1])
            {
                result[i - 1] = Some(RuleMatch {
                    token_index: i - 1,
                    tag: Tag::Begin(EntityCategory::Organization),
                    rule_name: "org_suffix_pattern".to_string(),
                    confidence: 0.85,
                });
                result[i] = Some(RuleMatch {
                    token_index: i,
                    tag: Tag::Inside(EntityCategory::Organization),
                    rule_name: "org_suffix_pattern".to_string(),
                    confidence: 0.85,
                });
            }
        }

        // 7. Siglas em caixa alta não cobertas pelos gazetteers
        for (i, token) in tokens.iter().enumerate() {
            if result[i].is_none() && self.acronym.is_match(&token.text) {
                result[i] = Some(RuleMatch {
                    token_index: i,
                    tag: Tag::Begin(EntityCategory::Organization),
                    rule_name: "acronym_pattern".to_string(),
                    confidence: 0.70,
                });
            }
        }

        result
    }

    /// Uma passada de gazetteer: marca B-/I- para o n-grama mais longo que
    /// casar em cada posição ainda não marcada.
    fn match_ngrams(
        &self,
        entries: &[Vec<String>],
        category: EntityCategory,
        rule_name: &str,
        confidence: f64,
        tokens: &[Token],
        result: &mut [Option<RuleMatch>],
    ) {
        let mut i = 0;
        while i < tokens.len() {
            if result[i].is_some() {
                i += 1;
                continue;
            }

            let mut best_len = 0;
            for parts in entries {
                if parts.len() <= best_len || i + parts.len() > tokens.len() {
                    continue;
                }
                let all_free = result[i..i + parts.len()].iter().all(Option::is_none);
                let matches = parts
                    .iter()
                    .enumerate()
                    .all(|(j, part)| tokens[i + j].text.to_lowercase() == *part);
                if all_free && matches {
                    best_len = parts.len();
                }
            }

            if best_len > 0 {
                result[i] = Some(RuleMatch {
                    token_index: i,
                    tag: Tag::Begin(category),
                    rule_name: rule_name.to_string(),
                    confidence,
                });
                for j in 1..best_len {
                    result[i + j] = Some(RuleMatch {
                        token_index: i + j,
                        tag: Tag::Inside(category),
                        rule_name: rule_name.to_string(),
                        confidence,
                    });
                }
                i += best_len;
            } else {
                i += 1;
            }
        }
    }
}

impl Default for GazetteerEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Quebra uma entrada do gazetteer em n-grama lowercase
fn push_ngram(list: &mut Vec<Vec<String>>, name: &str) {
    let parts: Vec<String> = name.split_whitespace().map(|p| p.to_lowercase()).collect();
    if !parts.is_empty() {
        list.push(parts);
    }
}

fn starts_uppercase(token: &Token) -> bool {
    token.text.chars().next().map(|c| c.is_uppercase()).unwrap_or(false)
}
