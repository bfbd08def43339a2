use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{Catalog, Question};

/// Why a catalog file could not be turned into a usable [`Catalog`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("catalog contains no topics")]
    Empty,

    #[error("duplicate topic id `{0}`")]
    DuplicateTopic(String),

    #[error("topic `{topic}` has duplicate question id `{question}`")]
    DuplicateQuestion { topic: String, question: String },

    #[error("question `{question}` has no options")]
    NoOptions { question: String },

    #[error("question `{question}` has duplicate option key `{key}`")]
    DuplicateOptionKey { question: String, key: String },

    #[error("question `{question}` marks `{key}` correct but has no such option")]
    UnknownCorrectKey { question: String, key: String },
}

/// Read and validate a catalog from a JSON file.
pub fn load_catalog_from_json<P: AsRef<Path>>(path: P) -> Result<Catalog, LoadError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse_catalog(&json_content)?;
    tracing::info!(
        path = %path.display(),
        systems = catalog.systems.len(),
        topics = catalog.topic_count(),
        "catalog loaded"
    );

    Ok(catalog)
}

/// Parse and validate a catalog from JSON text.
pub fn parse_catalog(json: &str) -> Result<Catalog, LoadError> {
    let catalog: Catalog = serde_json::from_str(json)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

fn validate_catalog(catalog: &Catalog) -> Result<(), LoadError> {
    if catalog.topic_count() == 0 {
        return Err(LoadError::Empty);
    }

    let mut topic_ids = HashSet::new();
    for topic in catalog.systems.iter().flat_map(|s| s.topics.iter()) {
        if !topic_ids.insert(topic.id.as_str()) {
            return Err(LoadError::DuplicateTopic(topic.id.clone()));
        }

        if let Some(questions) = topic.questions() {
            validate_bank(&topic.id, questions)?;
        }
    }

    Ok(())
}

fn validate_bank(topic: &str, questions: &[Question]) -> Result<(), LoadError> {
    let mut question_ids = HashSet::new();

    for question in questions {
        if !question_ids.insert(question.id.as_str()) {
            return Err(LoadError::DuplicateQuestion {
                topic: topic.to_string(),
                question: question.id.clone(),
            });
        }
        validate_question(question)?;
    }

    Ok(())
}

fn validate_question(question: &Question) -> Result<(), LoadError> {
    if question.options.is_empty() {
        return Err(LoadError::NoOptions {
            question: question.id.clone(),
        });
    }

    let mut keys = HashSet::new();
    for option in &question.options {
        if !keys.insert(option.key.as_str()) {
            return Err(LoadError::DuplicateOptionKey {
                question: question.id.clone(),
                key: option.key.clone(),
            });
        }
    }

    if !question.has_option(&question.correct) {
        return Err(LoadError::UnknownCorrectKey {
            question: question.id.clone(),
            key: question.correct.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn catalog_json(questions: &str) -> String {
        format!(
            r#"{{
                "title": "Mediwise",
                "systems": [{{
                    "id": "geri", "name": "Geriatrics",
                    "topics": [{{"id": "delirium", "title": "Delirium", "kind": "quiz",
                                 "questions": [{questions}]}}]
                }}]
            }}"#
        )
    }

    const GOOD_QUESTION: &str =
        r#"{"id": "d1", "stem": "s", "options": [{"key": "A", "text": "a"}, {"key": "B", "text": "b"}], "correct": "A"}"#;

    #[test]
    fn loads_valid_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(catalog_json(GOOD_QUESTION).as_bytes()).unwrap();

        let catalog = load_catalog_from_json(file.path()).unwrap();

        assert_eq!(catalog.title, "Mediwise");
        assert_eq!(catalog.systems[0].topics[0].questions().unwrap().len(), 1);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_catalog_from_json("/definitely/not/here.json").unwrap_err();

        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = parse_catalog("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn catalog_without_topics_is_rejected() {
        let err = parse_catalog(r#"{"title": "t", "systems": [{"id": "x", "name": "X"}]}"#)
            .unwrap_err();
        assert!(matches!(err, LoadError::Empty));
    }

    #[test]
    fn empty_question_bank_is_allowed() {
        let catalog = parse_catalog(&catalog_json("")).unwrap();
        assert_eq!(catalog.systems[0].topics[0].questions().unwrap().len(), 0);
    }

    #[test]
    fn duplicate_question_ids_are_rejected() {
        let questions = format!("{GOOD_QUESTION}, {GOOD_QUESTION}");
        let err = parse_catalog(&catalog_json(&questions)).unwrap_err();

        assert!(matches!(
            err,
            LoadError::DuplicateQuestion { ref topic, ref question }
                if topic == "delirium" && question == "d1"
        ));
    }

    #[test]
    fn duplicate_option_keys_are_rejected() {
        let question = r#"{"id": "d1", "stem": "s", "options": [{"key": "A", "text": "a"}, {"key": "A", "text": "b"}], "correct": "A"}"#;
        let err = parse_catalog(&catalog_json(question)).unwrap_err();

        assert!(matches!(err, LoadError::DuplicateOptionKey { ref key, .. } if key == "A"));
    }

    #[test]
    fn correct_key_must_name_an_option() {
        let question = r#"{"id": "d1", "stem": "s", "options": [{"key": "A", "text": "a"}], "correct": "E"}"#;
        let err = parse_catalog(&catalog_json(question)).unwrap_err();

        assert!(matches!(err, LoadError::UnknownCorrectKey { ref key, .. } if key == "E"));
    }

    #[test]
    fn question_without_options_is_rejected() {
        let question = r#"{"id": "d1", "stem": "s", "options": [], "correct": "A"}"#;
        let err = parse_catalog(&catalog_json(question)).unwrap_err();

        assert!(matches!(err, LoadError::NoOptions { .. }));
    }

    #[test]
    fn duplicate_topic_ids_are_rejected() {
        let json = r#"{
            "title": "t",
            "systems": [
                {"id": "a", "name": "A", "topics": [{"id": "x", "title": "X", "kind": "quiz", "questions": []}]},
                {"id": "b", "name": "B", "topics": [{"id": "x", "title": "X again", "kind": "reference", "page": {}}]}
            ]
        }"#;

        let err = parse_catalog(json).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateTopic(ref id) if id == "x"));
    }
}
