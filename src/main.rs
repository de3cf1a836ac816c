use std::process::ExitCode;
use std::sync::Arc;

use benefits_engine::api::{AppState, create_router};
use benefits_engine::catalog::{CatalogSource, InMemoryCatalog};
use benefits_engine::config::AppSettings;
use benefits_engine::error::EngineError;
use benefits_engine::service::EligibilityService;
use benefits_engine::store::{InMemoryApplicationStore, InMemoryCheckStore};
use benefits_engine::telemetry;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let settings = match AppSettings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = telemetry::init(&settings.log_level) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Service stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(settings: AppSettings) -> Result<(), EngineError> {
    let catalog = InMemoryCatalog::from_file(&settings.catalog_path)?;
    info!(
        path = %settings.catalog_path.display(),
        programs = catalog.snapshot()?.programs().len(),
        "Loaded program catalog"
    );

    let service = EligibilityService::new(Arc::new(catalog), Arc::new(InMemoryCheckStore::new()))
        .with_application_store(Arc::new(InMemoryApplicationStore::new()));
    let router = create_router(AppState::new(service));

    let addr = settings.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Benefits eligibility service ready");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
