//! DocForge HTTP server.

use std::sync::Arc;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use docforge::adapters::ai::{OpenAIConfig, OpenAIProvider};
use docforge::adapters::auth::{JwtConfig, JwtSessionValidator};
use docforge::adapters::http::{build_router, AppDependencies, RouterOptions};
use docforge::adapters::postgres::{
    PostgresProjectRepository, PostgresRefinementRepository, PostgresSectionRepository,
};
use docforge::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server.log_level, config.is_production());
    config.validate()?;

    let pool = config
        .database
        .pool_options()
        .connect(&config.database.url)
        .await?;
    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let deps = dependencies(&config, pool)?;
    let options = RouterOptions {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = build_router(deps, &options);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "DocForge listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("DocForge shut down");
    Ok(())
}

fn init_tracing(default_filter: &str, json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn dependencies(
    config: &AppConfig,
    pool: PgPool,
) -> Result<AppDependencies, Box<dyn std::error::Error>> {
    let ai = OpenAIProvider::new(
        OpenAIConfig::new(config.ai.openai_api_key.expose_secret().as_str())
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout()),
    )?;

    let mut jwt = JwtConfig::new(config.auth.jwt_secret.expose_secret().as_str())
        .with_leeway(config.auth.leeway_secs);
    if let Some(issuer) = &config.auth.jwt_issuer {
        jwt = jwt.with_issuer(issuer.clone());
    }

    Ok(AppDependencies::new(
        Arc::new(PostgresProjectRepository::new(pool.clone())),
        Arc::new(PostgresSectionRepository::new(pool.clone())),
        Arc::new(PostgresRefinementRepository::new(pool)),
        Arc::new(ai),
        Arc::new(JwtSessionValidator::new(jwt)),
    ))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
