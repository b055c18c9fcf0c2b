mod catalog;
mod model;

pub use catalog::Catalog;
pub use model::{Question, QuestionId, QuestionKind, Section, SectionId};
