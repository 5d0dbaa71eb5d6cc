use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum_server::{Handle, tls_rustls::RustlsConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::application::http::server::http_server::{router, state};
use crate::args::{Args, LogArgs};

mod application;
mod args;

fn init_logger(args: &LogArgs) {
    let filter = EnvFilter::try_new(&args.filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal(handle: Handle) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }

    info!("Shutdown signal received");
    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    let state = state(args.clone()).await?;
    let router = router(state)?;

    let addr: SocketAddr = format!("{}:{}", args.server.host, args.server.port).parse()?;
    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    match (&args.server.tls_cert, &args.server.tls_key) {
        (Some(cert), Some(key)) => {
            rustls::crypto::aws_lc_rs::default_provider()
                .install_default()
                .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

            let tls_config = RustlsConfig::from_pem_file(cert, key).await?;
            info!("Listening on https://{}", addr);
            axum_server::bind_rustls(addr, tls_config)
                .handle(handle)
                .serve(router.into_make_service())
                .await?;
        }
        _ => {
            info!("Listening on http://{}", addr);
            axum_server::bind(addr)
                .handle(handle)
                .serve(router.into_make_service())
                .await?;
        }
    }

    Ok(())
}
