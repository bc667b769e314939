use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "movie-ratings backend and statistics client")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Start the ratings API server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Create the database schema
    InitDb {
        /// Drop all tables before recreating them
        #[arg(long)]
        reset: bool,
    },
    /// Store a bearer token for later requests to the remote API
    Login {
        #[arg(short, long)]
        token: String,
    },
    /// Forget the stored bearer token
    Logout,
    /// Print rating statistics for a movie
    Stats {
        movie_id: i64,
        /// Skip the server statistics endpoint and aggregate locally
        #[arg(long)]
        client_side: bool,
        /// Print each bucket's share of the summed averages instead
        #[arg(long)]
        score_shares: bool,
    },
    /// Print rater counts and percentages per demographic bucket
    Population { movie_id: i64 },
}
