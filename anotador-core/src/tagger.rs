//! # Esquema de Tags BIO e Tipos de Entidade
//!
//! Define o esquema de anotação **BIO** (Beginning-Inside-Outside) utilizado
//! para rotular tokens no reconhecimento de entidades nomeadas.
//!
//! ## Categorias de Entidades
//!
//! | Rótulo       | Significado         | Exemplos                        |
//! |--------------|---------------------|---------------------------------|
//! | PERSON       | Pessoa              | Barack Obama, Angela Merkel     |
//! | ORGANIZATION | Organização         | United Nations, Google          |
//! | LOCATION     | Local/Geográfico    | Hawaii, Berlin, Amazon River    |
//! | MISC         | Miscelânea          | World Cup, Brexit               |
//! | O            | Fora de entidade    | (qualquer palavra não-entidade) |
//!
//! ## Esquema BIO
//!
//! - `B-TAG`: Begin — primeiro token de uma entidade
//! - `I-TAG`: Inside — tokens subsequentes da mesma entidade
//! - `O`: Outside — não é parte de nenhuma entidade

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Categorias de entidade reconhecidas pelo anotador.
///
/// É o inventário clássico de 4 classes (CoNLL): pessoas, organizações,
/// locais e miscelânea. Adicionar novas categorias exige ampliar o modelo
/// de gazetteers carregado na inicialização.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    /// **Pessoa**: nomes de humanos reais ou fictícios. Ex: "Barack Obama".
    Person,
    /// **Organização**: empresas, instituições, órgãos. Ex: "United Nations".
    Organization,
    /// **Localização**: países, cidades, rios, montanhas. Ex: "Hawaii".
    Location,
    /// **Miscelânea**: eventos, obras, leis e o que não couber acima.
    Misc,
}

impl EntityCategory {
    /// Rótulo da categoria como emitido na resposta (ex: "PERSON")
    pub fn name(&self) -> &'static str {
        match self {
            EntityCategory::Person => "PERSON",
            EntityCategory::Organization => "ORGANIZATION",
            EntityCategory::Location => "LOCATION",
            EntityCategory::Misc => "MISC",
        }
    }

    /// Tenta parsear a partir de string (ex: "PERSON" → Some(Person))
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PERSON" => Some(EntityCategory::Person),
            "ORGANIZATION" => Some(EntityCategory::Organization),
            "LOCATION" => Some(EntityCategory::Location),
            "MISC" => Some(EntityCategory::Misc),
            _ => None,
        }
    }
}

/// Tag BIO aplicada a um token.
///
/// O esquema BIO permite representar entidades de múltiplos tokens:
/// "Barack" recebe `B-PERSON` e "Obama" recebe `I-PERSON`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// **Begin**: marca o INÍCIO de uma entidade.
    Begin(EntityCategory),
    /// **Inside**: marca a CONTINUAÇÃO de uma entidade.
    Inside(EntityCategory),
    /// **Outside**: o token não faz parte de nenhuma entidade.
    Outside,
}

impl Tag {
    /// Representação textual da tag (ex: "B-PERSON", "I-LOCATION", "O")
    pub fn label(&self) -> String {
        match self {
            Tag::Begin(cat) => format!("B-{}", cat.name()),
            Tag::Inside(cat) => format!("I-{}", cat.name()),
            Tag::Outside => "O".to_string(),
        }
    }

    /// Retorna a categoria desta tag (se for B- ou I-)
    pub fn category(&self) -> Option<EntityCategory> {
        match self {
            Tag::Begin(c) | Tag::Inside(c) => Some(*c),
            Tag::Outside => None,
        }
    }

    /// Rótulo emitido na saída estruturada: nome da categoria ou "O".
    ///
    /// A resposta por token não distingue B- de I-; tokens da mesma entidade
    /// compartilham o mesmo rótulo (ex: `Barack → PERSON`, `Obama → PERSON`).
    pub fn output_label(&self) -> &'static str {
        match self.category() {
            Some(cat) => cat.name(),
            None => "O",
        }
    }

    /// Verifica se a transição tag_prev → self é válida no esquema BIO
    ///
    /// Regras:
    /// - `I-X` só pode seguir `B-X` ou `I-X` (mesma categoria)
    /// - `B-X` e `O` podem seguir qualquer tag
    pub fn is_valid_transition(prev: &Tag, next: &Tag) -> bool {
        match next {
            Tag::Inside(cat) => match prev {
                Tag::Begin(prev_cat) | Tag::Inside(prev_cat) => prev_cat == cat,
                _ => false,
            },
            _ => true,
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Um token com sua tag BIO e a confiança da regra que o marcou
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: Token,
    pub tag: Tag,
    /// Probabilidade/confiança desta atribuição (0.0 a 1.0)
    pub confidence: f64,
}

/// Uma entidade identificada no texto (span de um ou mais tokens)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Texto da entidade (ex: "Barack Obama")
    pub text: String,
    /// Categoria da entidade
    pub category: EntityCategory,
    /// Índice do primeiro token
    pub start_token: usize,
    /// Índice do último token (inclusivo)
    pub end_token: usize,
    /// Posição de byte inicial no texto original
    pub start: usize,
    /// Posição de byte final no texto original
    pub end: usize,
    /// Confiança média dos tokens
    pub confidence: f64,
    /// Nome da regra que identificou o span
    pub source: String,
}

/// Converte uma sequência de tokens rotulados (BIO) em spans de entidades.
///
/// Implementa a máquina de estados do esquema BIO:
/// - Inicia uma nova entidade ao encontrar `B-XXX`.
/// - Continua a entidade enquanto encontrar `I-XXX` da **mesma** categoria.
/// - Finaliza a entidade ao encontrar `O`, `B-YYY` ou `I-YYY` de outra categoria.
///
/// Os spans resultantes ficam em ordem de texto e nunca se sobrepõem.
pub fn tokens_to_spans(tagged: &[TaggedToken], original_text: &str) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tagged.len() {
        if let Tag::Begin(cat) = &tagged[i].tag {
            let cat = *cat;
            let start_token = tagged[i].token.index;
            let start_byte = tagged[i].token.start;
            let mut end_token = start_token;
            let mut end_byte = tagged[i].token.end;
            let mut conf_sum = tagged[i].confidence;
            let mut count = 1usize;

            // Acumula tokens I-XXX consecutivos da mesma categoria
            let mut j = i + 1;
            while j < tagged.len() {
                if let Tag::Inside(next_cat) = &tagged[j].tag {
                    if *next_cat == cat {
                        end_token = tagged[j].token.index;
                        end_byte = tagged[j].token.end;
                        conf_sum += tagged[j].confidence;
                        count += 1;
                        j += 1;
                        continue;
                    }
                }
                break;
            }

            spans.push(EntitySpan {
                text: original_text[start_byte..end_byte].to_string(),
                category: cat,
                start_token,
                end_token,
                start: start_byte,
                end: end_byte,
                confidence: conf_sum / count as f64,
                source: "gazetteer".to_string(),
            });

            i = j;
        } else {
            i += 1;
        }
    }

    spans
}
