use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_cron_scheduler::{Job, JobScheduler};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use vacancy_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    // One-time startup probe of the channel source.
    match app_state.telegram_service.check_connection().await {
        Ok(()) => info!("Channel preview endpoint reachable"),
        Err(e) => warn!(error = ?e, "Channel preview endpoint not reachable, ingestion may fail"),
    }

    // Hourly ingestion pass; results are logged only.
    let scheduler = JobScheduler::new().await?;
    let ingest_state = app_state.clone();
    let ingest_job = Job::new_async("0 0 * * * *", move |_uuid, _lock| {
        let state = ingest_state.clone();
        Box::pin(async move {
            info!("Running scheduled ingestion pass");
            match state.ingest_service.run().await {
                Ok(vacancies) => {
                    info!(parsed = vacancies.len(), "Scheduled ingestion finished")
                }
                Err(e) => error!(error = ?e, "Scheduled ingestion failed"),
            }
        })
    })?;
    scheduler.add(ingest_job).await?;
    scheduler.start().await?;

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route("/", get(routes::vacancy::list_vacancies))
        .route("/parse", post(routes::ingest::trigger_parse))
        .route("/edit/:id", put(routes::vacancy::update_vacancy))
        .route("/delete/:id", delete(routes::vacancy::delete_vacancy))
        .layer(axum::middleware::from_fn_with_state(
            vacancy_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            vacancy_backend::middleware::rate_limit::rps_middleware,
        ))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
