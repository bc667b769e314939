use anyhow::Result;

use movie_ratings::cli::Command;
use movie_ratings::{
    handle_init_db, handle_login, handle_logout, handle_population, handle_serve, handle_stats,
    interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::InitDb { reset } => handle_init_db(*reset),
        Command::Login { token } => handle_login(token),
        Command::Logout => handle_logout(),
        Command::Stats {
            movie_id,
            client_side,
            score_shares,
        } => handle_stats(*movie_id, *client_side, *score_shares),
        Command::Population { movie_id } => handle_population(*movie_id),
    }
}
