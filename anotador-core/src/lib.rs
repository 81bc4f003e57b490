//! # anotador-core — Motor de Anotação de Entidades Nomeadas (NER)
//!
//! Este crate implementa o motor de tagging consumido pelo serviço HTTP de
//! anotação. O dado flui por um pipeline linear simples:
//!
//! 1.  **Entrada**: texto bruto (String).
//! 2.  **Tokenização** ([`tokenizer`]): o texto é dividido em tokens,
//!     preservando offsets originais em bytes e em caracteres.
//! 3.  **Regras** ([`gazetteer`]): gazetteers carregados do modelo e padrões
//!     de contexto marcam os tokens com tags BIO.
//! 4.  **Saída** ([`annotator`]): uma [`Annotation`] com os tokens rotulados
//!     e os spans de entidade, renderizável como texto inline marcado ou
//!     como linhas estruturadas `token<TAB>offset<TAB>rótulo`.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use anotador_core::{Annotator, Tagger};
//!
//! // 1. Instancia o anotador com o modelo embutido
//! let annotator = Annotator::builtin();
//!
//! // 2. Anota um texto
//! let annotation = annotator.tag("Barack Obama was born in Hawaii.").unwrap();
//!
//! // 3. As duas formas equivalentes do resultado
//! assert_eq!(
//!     annotation.to_inline(),
//!     "[PERSON Barack Obama] was born in [LOCATION Hawaii]."
//! );
//! assert!(annotation.to_tsv().starts_with("Barack\t0\tPERSON\n"));
//! ```
//!
//! O modelo de gazetteers ([`model`]) é carregado uma única vez na
//! inicialização; uma falha de carga é fatal e o serviço nunca sobe
//! meio-inicializado.

pub mod annotator;
pub mod error;
pub mod gazetteer;
pub mod model;
pub mod tagger;
pub mod tokenizer;

pub use annotator::{Annotation, Annotator, Tagger};
pub use error::{ModelError, TaggingFailure};
pub use model::{GazetteerFile, TaggerModel};
pub use tagger::{EntityCategory, EntitySpan, Tag, TaggedToken};
pub use tokenizer::Token;
