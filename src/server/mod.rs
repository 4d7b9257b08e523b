pub mod html;
pub mod routes;

use crate::config::toml_config::CorsConfig;
use crate::core::compare::ComparisonEngine;
use crate::core::dataset::EncodedDataset;
use crate::core::Dataset;
use crate::utils::error::Result;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use routes::route;

/// 請求之間共享的唯讀狀態
pub struct AppState {
    pub dataset: Dataset,
    pub encoded: EncodedDataset,
    pub engine: ComparisonEngine,
    pub cors: CorsConfig,
}

impl AppState {
    pub fn new(dataset: Dataset, engine: ComparisonEngine, cors: CorsConfig) -> Result<Self> {
        let encoded = EncodedDataset::new(&dataset)?;
        Ok(Self {
            dataset,
            encoded,
            engine,
            cors,
        })
    }
}

/// 接受連線直到 `shutdown` 完成，每個連線在獨立的 task 中處理
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(conn) => conn,
                    Err(e) => {
                        tracing::warn!("Failed to accept connection: {}", e);
                        continue;
                    }
                };

                let state = state.clone();
                tokio::spawn(async move {
                    let io = TokioIo::new(stream);
                    let service = service_fn(move |req| route(state.clone(), req));
                    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                        tracing::debug!("Connection from {} ended with error: {}", peer, e);
                    }
                });
            }
            _ = &mut shutdown => {
                tracing::info!("Shutdown signal received, no longer accepting connections");
                break;
            }
        }
    }

    Ok(())
}
