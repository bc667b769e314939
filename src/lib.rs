pub mod api;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod http;
pub mod services;
pub mod session;
pub mod statistics;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use serde::Serialize;

use crate::api::RemoteRatingStore;
use crate::cli::{Cli, Command};
use crate::config::settings::AppConfig;
use crate::database::setup;
use crate::errors::GatewayError;
use crate::http::ApiClient;
use crate::services::{RemoteStatistics, ServerService};
use crate::session::{Session, TokenStore};
use crate::statistics::score_share_breakdown;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_init_db(reset: bool) -> Result<()> {
    let config = AppConfig::from_env();
    let pool = database::create_pool(&config.server.database_path)?;
    let mut conn = database::get_connection(&pool)?;

    if reset {
        setup::reset_database(&mut conn)
    } else {
        setup::initialize(&mut conn)
    }
}

pub fn handle_login(token: &str) -> Result<()> {
    let config = AppConfig::from_env();
    TokenStore::new(&config.session.token_path).save(token)?;
    Ok(())
}

pub fn handle_logout() -> Result<()> {
    let config = AppConfig::from_env();
    if !TokenStore::new(&config.session.token_path).clear()? {
        info!("No stored session token");
    }
    Ok(())
}

pub fn handle_stats(movie_id: i64, client_side: bool, score_shares: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let store = TokenStore::new(&config.session.token_path);
        let statistics = remote_statistics(&config, &store)?;
        let result = if client_side {
            statistics.client_side(movie_id).await
        } else {
            statistics.movie_statistics(movie_id).await
        };
        let stats = clear_token_if_rejected(result, &store)?;

        if score_shares {
            print_json(&score_share_breakdown(&stats))
        } else {
            print_json(&stats)
        }
    })
}

pub fn handle_population(movie_id: i64) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let store = TokenStore::new(&config.session.token_path);
        let statistics = remote_statistics(&config, &store)?;
        let result = statistics.movie_population(movie_id).await;
        let population = clear_token_if_rejected(result, &store)?;
        print_json(&population)
    })
}

fn remote_statistics(config: &AppConfig, store: &TokenStore) -> Result<RemoteStatistics> {
    let session = Session::restore(store)?;
    let client = ApiClient::new(&config.api, session)?;
    Ok(RemoteStatistics::new(RemoteRatingStore::new(client)))
}

/// A rejected token would be rejected again next run, so drop it from disk
fn clear_token_if_rejected<T>(result: Result<T>, store: &TokenStore) -> Result<T> {
    if let Err(err) = &result {
        let unauthorized = err
            .downcast_ref::<GatewayError>()
            .is_some_and(GatewayError::is_unauthorized);
        if unauthorized && store.clear()? {
            warn!("Stored session token was rejected and has been removed");
        }
    }
    result
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
