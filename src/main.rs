mod db;
mod routes;
mod services;
mod state;

use relay::config::env_parse;
use relay::memory::MemoryStore;

const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            return Err(e.into());
        }
    }
    tracing_subscriber::fmt::init();

    let port: u16 = env_parse("PORT", DEFAULT_PORT);

    let state = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = db::init_pool(&database_url).await?;
            state::AppState::postgres(pool)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; presentations are kept in memory and lost on restart");
            state::AppState::in_memory(MemoryStore::new())
        }
    };
    let backend = state.backend;

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;

    tracing::info!(%port, backend, "slidecast listening");
    axum::serve(listener, app).await?;
    Ok(())
}
