mod catalog;
mod question;

pub use catalog::{Catalog, OrganSystem, ReferencePage, Topic, TopicContent, TopicRef};
pub use question::{AnswerOption, Difficulty, Question};
