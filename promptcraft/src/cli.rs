//! Command-line interface definitions

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Practice prompt writing against PromptCraft", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print raw response data as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Create an account and sign in
    Register {
        username: String,
        email: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign in with email and password
    Login {
        email: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Sign out and forget the stored session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// List challenges
    Challenges {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show one challenge with its tips and statistics
    Challenge { id: String },
    /// Submit a prompt for evaluation
    Evaluate {
        challenge_id: String,
        /// File holding the prompt, or `-` for stdin
        source: String,
    },
    /// List your past attempts
    Attempts {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Show one attempt in full
    Attempt { id: String },
    /// Show the global or a per-challenge leaderboard
    Leaderboard {
        #[arg(long)]
        challenge: Option<String>,
    },
    /// Show your global rank
    Rank,
    /// Manage challenges and accounts (admin role required)
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum AdminCommand {
    /// Create, edit or remove challenges
    Challenge {
        #[command(subcommand)]
        action: ChallengeAction,
    },
    /// List or remove user accounts
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ChallengeAction {
    /// Create a challenge from a JSON file, or `-` for stdin
    Create { source: String },
    /// Change selected fields of a challenge
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        instruction: Option<String>,
        /// Replaces all tags; repeat for several
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete { id: String },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum UsersAction {
    List,
    Delete { id: String },
}

impl Command {
    /// Commands that make no sense without a stored session.
    pub fn requires_session(&self) -> bool {
        matches!(
            self,
            Command::Evaluate { .. }
                | Command::Attempts { .. }
                | Command::Attempt { .. }
                | Command::Rank
                | Command::Admin { .. }
        )
    }
}
