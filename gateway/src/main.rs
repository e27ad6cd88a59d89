//! Forge ERP 服务入口

use erp_bootstrap::{DEFAULT_CONFIG_DIR, Infrastructure, init_runtime, shutdown_signal};
use erp_config::AppConfig;
use erp_gateway::{Modules, build_router, run_migrations};
use erp_telemetry::init_metrics;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load(DEFAULT_CONFIG_DIR)?;
    init_runtime(&config);
    let metrics = init_metrics()?;

    let infra = Infrastructure::from_config(config).await?;
    if infra.config().database.run_migrations {
        run_migrations(infra.postgres_pool()).await?;
    }

    let modules = Modules::new(&infra);
    let seeded = modules
        .identity
        .seeder()
        .seed(infra.config().seed.as_ref())
        .await?;
    info!(
        role_created = seeded.role_created,
        user_created = seeded.user_created,
        "Identity seed complete"
    );

    let app = build_router(&infra, &modules, Some(metrics));
    let address = infra.config().bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!(%address, "Forge ERP listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
