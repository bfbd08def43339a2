use serde::{Deserialize, Serialize};

use super::Question;

/// The full bundle of topics shipped with the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub title: String,
    pub systems: Vec<OrganSystem>,
}

/// A group of topics belonging to one organ system (e.g. "Neurology").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganSystem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub topics: Vec<Topic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(flatten)]
    pub content: TopicContent,
}

/// What a topic renders as: a static reference page or a question bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TopicContent {
    Reference { page: ReferencePage },
    Quiz { questions: Vec<Question> },
}

/// Static reference material for a topic. Every line may carry markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencePage {
    #[serde(default)]
    pub presentations: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default)]
    pub tests: Vec<String>,
    #[serde(default)]
    pub management: Vec<String>,
}

impl ReferencePage {
    /// Sections in display order, skipping empty ones.
    pub fn sections(&self) -> Vec<(&'static str, &[String])> {
        [
            ("Presentations", self.presentations.as_slice()),
            ("Red flags", self.red_flags.as_slice()),
            ("Tests", self.tests.as_slice()),
            ("Management", self.management.as_slice()),
        ]
        .into_iter()
        .filter(|(_, lines)| !lines.is_empty())
        .collect()
    }
}

impl Topic {
    pub fn is_quiz(&self) -> bool {
        matches!(self.content, TopicContent::Quiz { .. })
    }

    /// The question bank, if this topic is a quiz.
    pub fn questions(&self) -> Option<&[Question]> {
        match &self.content {
            TopicContent::Quiz { questions } => Some(questions),
            TopicContent::Reference { .. } => None,
        }
    }

    pub fn kind_label(&self) -> &'static str {
        match self.content {
            TopicContent::Reference { .. } => "reference",
            TopicContent::Quiz { .. } => "quiz",
        }
    }
}

/// Address of a topic inside the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TopicRef {
    pub system: usize,
    pub topic: usize,
}

impl Catalog {
    pub fn topic(&self, at: TopicRef) -> Option<&Topic> {
        self.systems.get(at.system)?.topics.get(at.topic)
    }

    pub fn find_topic(&self, id: &str) -> Option<TopicRef> {
        self.systems.iter().enumerate().find_map(|(system, s)| {
            s.topics
                .iter()
                .position(|t| t.id == id)
                .map(|topic| TopicRef { system, topic })
        })
    }

    pub fn topic_count(&self) -> usize {
        self.systems.iter().map(|s| s.topics.len()).sum()
    }

    /// Case-insensitive title filter across all systems, in catalog order.
    /// An empty or blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<TopicRef> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.systems
            .iter()
            .enumerate()
            .flat_map(|(system, s)| {
                s.topics
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.title.to_lowercase().contains(&needle))
                    .map(move |(topic, _)| TopicRef { system, topic })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        serde_json::from_str(
            r#"{
                "title": "Test",
                "systems": [
                    {"id": "neuro", "name": "Neurology", "topics": [
                        {"id": "pd", "title": "Parkinson's Disease", "kind": "quiz", "questions": []},
                        {"id": "stroke", "title": "Stroke", "kind": "reference",
                         "page": {"presentations": ["Sudden weakness"], "management": ["Thrombolysis"]}}
                    ]},
                    {"id": "geri", "name": "Geriatrics", "topics": [
                        {"id": "delirium", "title": "Delirium", "kind": "quiz", "questions": []},
                        {"id": "vd", "title": "Vascular Dementia", "kind": "quiz", "questions": []}
                    ]}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn topic_kind_is_taken_from_the_tag() {
        let catalog = catalog();
        let stroke = catalog.topic(TopicRef { system: 0, topic: 1 }).unwrap();

        assert!(!stroke.is_quiz());
        assert!(stroke.questions().is_none());
        assert_eq!(stroke.kind_label(), "reference");
        assert!(catalog.systems[1].topics[0].is_quiz());
    }

    #[test]
    fn reference_sections_skip_empty_lists() {
        let catalog = catalog();
        let TopicContent::Reference { page } = &catalog.systems[0].topics[1].content else {
            panic!("stroke should be a reference topic");
        };

        let titles: Vec<_> = page.sections().into_iter().map(|(t, _)| t).collect();
        assert_eq!(titles, vec!["Presentations", "Management"]);
    }

    #[test]
    fn find_topic_and_count() {
        let catalog = catalog();

        assert_eq!(
            catalog.find_topic("delirium"),
            Some(TopicRef { system: 1, topic: 0 })
        );
        assert_eq!(catalog.find_topic("missing"), None);
        assert_eq!(catalog.topic_count(), 4);
    }

    #[test]
    fn search_is_case_insensitive_and_spans_systems() {
        let catalog = catalog();

        let hits = catalog.search("  AR");
        assert_eq!(
            hits,
            vec![
                TopicRef { system: 0, topic: 0 },
                TopicRef { system: 1, topic: 1 },
            ]
        );
        assert!(catalog.search("   ").is_empty());
    }
}
