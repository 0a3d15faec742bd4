use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "quiz-chain")]
#[command(about = "Solves chains of web-hosted quizzes end to end")]
#[command(version)]
pub struct Args {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve a single quiz chain from the command line
    Solve {
        /// Starting quiz URL
        url: String,

        /// Email submitted with every answer
        #[arg(long)]
        email: Option<String>,

        /// Shared secret submitted with every answer
        #[arg(long)]
        secret: Option<String>,

        /// Maximum number of chain steps
        #[arg(long)]
        max_steps: Option<usize>,
    },

    /// Run the trigger endpoint and solve chains on request
    Serve {
        /// Address to bind, e.g. 127.0.0.1:8000
        #[arg(long)]
        addr: Option<String>,
    },
}
