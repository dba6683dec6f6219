use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use workout_planner::adapters::{
    app_router, InMemoryWorkoutRepository, JwtSessionValidator, PostgresWorkoutRepository,
    RouterOptions, WorkoutHandlers,
};
use workout_planner::config::{AppConfig, DatabaseConfig};
use workout_planner::ports::{SessionValidator, WorkoutRepository};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_tracing(&config);
    config.validate().context("invalid configuration")?;

    let repository = match &config.database {
        Some(database) => connect_postgres(database).await?,
        None => {
            info!("No database configured, keeping workouts in memory");
            Arc::new(InMemoryWorkoutRepository::new()) as Arc<dyn WorkoutRepository>
        }
    };
    let validator: Arc<dyn SessionValidator> =
        Arc::new(JwtSessionValidator::new(config.auth.jwt_config()));

    let handlers = WorkoutHandlers::new(repository, config.limits.quota_limits());
    let options = RouterOptions {
        request_timeout: config.server.request_timeout(),
        cors_origins: config.server.cors_origins_list(),
    };
    let app = app_router(handlers, validator, &options);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    let persistence = if config.database.is_some() { "postgres" } else { "memory" };
    info!(
        bind_addr = %addr,
        environment = ?config.server.environment,
        persistence,
        "Workout planner started"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

async fn connect_postgres(database: &DatabaseConfig) -> Result<Arc<dyn WorkoutRepository>> {
    let pool = database
        .pool_options()
        .connect(&database.url)
        .await
        .context("failed to connect to PostgreSQL")?;

    if database.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("failed to run migrations")?;
        info!("Database migrations applied");
    }

    Ok(Arc::new(PostgresWorkoutRepository::new(pool)))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install ctrl+c handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install sigterm handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down");
}
