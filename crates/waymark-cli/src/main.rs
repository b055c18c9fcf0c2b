use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "waymark-cli", version, about = "Waymark CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the guided capture flow interactively
    Run {
        /// Section to start from (defaults to the first section)
        section: Option<String>,
    },
    /// Section catalog inspection
    Sections {
        #[command(subcommand)]
        action: commands::sections::SectionsAction,
    },
    /// Saved answer inspection and reset
    Answers {
        #[command(subcommand)]
        action: commands::answers::AnswersAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { section } => commands::run::run(section),
        Commands::Sections { action } => commands::sections::run(action),
        Commands::Answers { action } => commands::answers::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "waymark-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
