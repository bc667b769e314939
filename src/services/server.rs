use anyhow::Result;
use axum::Router;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::api::{AppState, create_router};
use crate::config::settings::AppConfig;
use crate::database::{self, setup};

pub struct ServerService {
    port: u16,
    config: AppConfig,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig) -> Self {
        Self { port, config }
    }

    pub async fn run(&self) -> Result<()> {
        let db_path = &self.config.server.database_path;
        let pool = database::create_pool(db_path)?;
        {
            let mut conn = database::get_connection(&pool)?;
            setup::initialize(&mut conn)?;
        }
        info!("Using database {}", db_path);

        let state = Arc::new(AppState::new(pool));
        let app = create_router(state).layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr).await?;
        serve_on(listener, app).await
    }
}

pub async fn serve_on(listener: TcpListener, app: Router) -> Result<()> {
    info!("Server listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
