use std::env;
use std::net::SocketAddr;
use axum::Router;
use lambda_http::{run, Error};
use tracing::info;
use people::core::controller::AppState;
use people::core::domain::{Configuration, ENV_STORE};
use people::core::repository::RepositoryStore;
use people::persons::controller::router;
use people::utils::logging::setup_tracing;

// See https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let config = Configuration::from_env();
    let store = RepositoryStore::from(env::var(ENV_STORE).unwrap_or_else(|_| "local".to_string()));
    info!(environment = config.environment.as_str(), store = %store, "starting person service");

    let listen_addr = config.listen_addr.clone();
    let state = AppState::build(config, store).await;

    match listen_addr {
        Some(addr) => {
            let addr: SocketAddr = addr.parse()?;
            info!(addr = %addr, "listening for http requests");
            let app: Router = router(state);
            axum::Server::bind(&addr).serve(app.into_make_service()).await?;
            Ok(())
        }
        None => {
            let app: Router<(), lambda_http::Body> = router(state);
            run(app).await
        }
    }
}
