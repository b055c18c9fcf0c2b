use clap::Subcommand;
use waymark_core::Catalog;

#[derive(Subcommand)]
pub enum SectionsAction {
    /// List the capture sequence
    List,
    /// Print one section's full definition as JSON
    Show {
        /// Section id
        id: String,
    },
}

pub fn run(action: SectionsAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();
    match action {
        SectionsAction::List => {
            for section in catalog.iter() {
                println!(
                    "{}  {:<12} {} ({} questions)",
                    section.index,
                    section.id,
                    section.title,
                    section.questions.len()
                );
            }
        }
        SectionsAction::Show { id } => {
            let section = catalog
                .by_id(&id)
                .ok_or_else(|| format!("unknown section: {id}"))?;
            println!("{}", serde_json::to_string_pretty(section)?);
        }
    }
    Ok(())
}
