use clap::Subcommand;
use waymark_core::{Catalog, Config, Database, SectionStore};

#[derive(Subcommand)]
pub enum AnswersAction {
    /// List sections with saved answers
    List,
    /// Print one section's saved answers as JSON
    Show {
        /// Section id
        section: String,
    },
    /// Delete saved answers
    Reset {
        /// Section id to reset
        section: Option<String>,
        /// Reset every section
        #[arg(long)]
        all: bool,
    },
}

pub fn run(action: AnswersAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load()?;
    let user_id = config.ensure_user_id()?;
    let db = Database::open()?;

    match action {
        AnswersAction::List => {
            let saved = db.saved_sections(&user_id)?;
            if saved.is_empty() {
                println!("no saved answers");
            }
            for section_id in saved {
                println!("{section_id}");
            }
        }
        AnswersAction::Show { section } => {
            let catalog = Catalog::builtin();
            if catalog.by_id(&section).is_none() {
                return Err(format!("unknown section: {section}").into());
            }
            match db.load(&user_id, &section)? {
                Some(doc) => println!("{}", serde_json::to_string_pretty(&doc)?),
                None => println!("no saved answers for '{section}'"),
            }
        }
        AnswersAction::Reset { section, all } => {
            if all {
                let count = db.clear_all(&user_id)?;
                println!("cleared {count} section(s)");
            } else if let Some(section) = section {
                if db.clear(&user_id, &section)? {
                    println!("cleared '{section}'");
                } else {
                    println!("nothing saved for '{section}'");
                }
            } else {
                return Err("pass a section id or --all".into());
            }
        }
    }
    Ok(())
}
