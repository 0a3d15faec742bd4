use crate::config::{Identity, SolverConfig};
use crate::{BoxError, Solver};
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

#[derive(Clone)]
struct AppState {
    config: SolverConfig,
}

/// Inbound trigger request: a shared secret, the identity to answer
/// with, and the starting quiz URL
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    pub secret: String,
    pub email: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub message: String,
}

/// Builds the trigger router
pub fn router(config: SolverConfig) -> Router {
    Router::new()
        .route("/task", post(handle_task))
        .with_state(AppState { config })
}

/// Runs the trigger endpoint until the process is stopped
pub async fn serve(config: SolverConfig) -> Result<(), BoxError> {
    let addr = config.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    ::log::info!("Trigger endpoint listening on {}", addr);
    axum::serve(listener, router(config)).await?;
    Ok(())
}

/// Checks the shared secret and schedules the chain as a fire-and-forget
/// background task.
///
/// The caller only ever learns whether the secret matched; chain
/// outcomes are visible in the process logs alone.
async fn handle_task(
    State(state): State<AppState>,
    Json(request): Json<TaskRequest>,
) -> (StatusCode, Json<TaskResponse>) {
    if state.config.secret.is_empty() || request.secret != state.config.secret {
        ::log::warn!("Rejected trigger for {}: secret does not match", request.url);
        return (
            StatusCode::FORBIDDEN,
            Json(TaskResponse {
                message: "Secret does not match".to_string(),
            }),
        );
    }

    let config = state.config.clone();
    let identity = Identity {
        email: request.email,
        secret: request.secret,
    };
    let url = request.url;

    ::log::info!("Secret matches, scheduling chain for {}", url);
    tokio::spawn(async move {
        let start_url = url.clone();
        match Solver::new(&start_url)
            .with_config(config)
            .with_identity(identity)
            .run()
            .await
        {
            Ok(report) => ::log::info!(
                "Chain for {} finished after {} steps ({:?})",
                start_url,
                report.steps,
                report.end
            ),
            Err(e) => ::log::error!("Chain for {} failed: {}", start_url, e),
        }
    });

    (
        StatusCode::OK,
        Json(TaskResponse {
            message: "Secret matches!".to_string(),
        }),
    )
}
