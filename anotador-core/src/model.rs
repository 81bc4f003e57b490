//! # Modelo de Gazetteers
//!
//! O modelo é um arquivo JSON com as listas de entidades conhecidas, uma por
//! categoria. Ele é carregado **uma única vez** na inicialização do processo
//! e nunca é recarregado em tempo de execução; uma falha de carga é fatal.
//!
//! ```json
//! {
//!   "persons": ["Barack Obama", "Angela Merkel"],
//!   "locations": ["Hawaii", "Berlin"],
//!   "organizations": ["United Nations"],
//!   "misc": ["World Cup"]
//! }
//! ```
//!
//! Para demonstração e testes existe um modelo embutido ([`TaggerModel::builtin`])
//! com um vocabulário mínimo de pessoas, lugares e organizações conhecidas.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::gazetteer::GazetteerEngine;

/// Formato em disco do modelo: quatro listas de entradas, uma por categoria.
///
/// Todos os campos são opcionais no JSON; um modelo em que **todas** as
/// listas estão vazias é rejeitado como inválido.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GazetteerFile {
    #[serde(default)]
    pub persons: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub organizations: Vec<String>,
    #[serde(default)]
    pub misc: Vec<String>,
}

/// O modelo carregado, pronto para construir o motor de regras.
pub struct TaggerModel {
    pub engine: GazetteerEngine,
}

impl TaggerModel {
    /// Carrega o modelo de um arquivo JSON.
    ///
    /// Esta é a operação `load(configRef)` do contrato de bootstrap: em caso
    /// de erro (arquivo ausente, JSON malformado, modelo vazio) o chamador
    /// deve logar e encerrar o processo sem subir o servidor.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path)?;
        let file: GazetteerFile = serde_json::from_str(&raw)?;
        Self::from_gazetteers(&file)
    }

    /// Constrói o modelo a partir de listas já parseadas.
    pub fn from_gazetteers(file: &GazetteerFile) -> Result<Self, ModelError> {
        let mut engine = GazetteerEngine::new();
        for name in &file.persons {
            engine.add_person(name);
        }
        for name in &file.locations {
            engine.add_location(name);
        }
        for name in &file.organizations {
            engine.add_organization(name);
        }
        for name in &file.misc {
            engine.add_misc(name);
        }

        if engine.entry_count() == 0 {
            return Err(ModelError::Empty);
        }
        Ok(Self { engine })
    }

    /// Modelo embutido com um vocabulário mínimo de demonstração.
    ///
    /// Usado quando nenhum arquivo de modelo é informado na linha de comando
    /// e pelos testes; um deployment real carrega suas próprias listas.
    pub fn builtin() -> Self {
        let file = GazetteerFile {
            persons: [
                "Barack Obama", "Michelle Obama", "Joe Biden", "Angela Merkel",
                "Emmanuel Macron", "Nelson Mandela", "Albert Einstein",
                "Marie Curie", "Winston Churchill", "Abraham Lincoln",
            ]
            .map(String::from)
            .to_vec(),
            locations: [
                "Hawaii", "Berlin", "Paris", "London", "New York",
                "United States", "Germany", "France", "Brazil", "Japan",
                "Amazon River", "Mount Everest", "California", "Chicago",
            ]
            .map(String::from)
            .to_vec(),
            organizations: [
                "United Nations", "European Union", "World Bank", "Google",
                "Microsoft", "Red Cross", "Harvard University",
            ]
            .map(String::from)
            .to_vec(),
            misc: ["World Cup", "Olympic Games", "Nobel Prize", "Brexit"]
                .map(String::from)
                .to_vec(),
        };
        // O modelo embutido nunca é vazio
        Self::from_gazetteers(&file).expect("builtin model")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_model_loads() {
        let model = TaggerModel::builtin();
        assert!(model.engine.entry_count() > 20);
    }

    #[test]
    fn test_empty_model_rejected() {
        let err = TaggerModel::from_gazetteers(&GazetteerFile::default());
        assert!(matches!(err, Err(ModelError::Empty)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = TaggerModel::from_file("/nonexistent/model.json");
        assert!(matches!(err, Err(ModelError::Io(_))));
    }

    #[test]
    fn test_partial_file_parses() {
        let file: GazetteerFile =
            serde_json::from_str(r#"{"locations": ["Hawaii"]}"#).unwrap();
        let model = TaggerModel::from_gazetteers(&file).unwrap();
        assert_eq!(model.engine.entry_count(), 1);
    }

    #[test]
    fn test_from_file_roundtrip() {
        let path = std::env::temp_dir().join("anotador-model-ok.json");
        std::fs::write(&path, r#"{"persons": ["Ada Lovelace"], "locations": ["Hawaii"]}"#)
            .unwrap();
        let model = TaggerModel::from_file(&path).unwrap();
        assert_eq!(model.engine.entry_count(), 2);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let path = std::env::temp_dir().join("anotador-model-bad.json");
        std::fs::write(&path, "{persons: oops").unwrap();
        let err = TaggerModel::from_file(&path);
        assert!(matches!(err, Err(ModelError::Parse(_))));
        std::fs::remove_file(&path).ok();
    }
}
