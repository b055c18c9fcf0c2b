mod engine;
mod runner;

pub use engine::{ShownInspiration, WizardEngine, WizardState, WizardTiming};
pub use runner::{Router, SectionRunner};
