//! Server lifecycle: storage bootstrap, listener, graceful shutdown.

use crate::config::ServerConfig;
use crate::routes::build_router;
use crate::state::AppState;
use crate::views::{ViewError, Views};
use log::{error, info};
use roster_core::{open_location, DbError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use tokio::net::TcpListener;

/// Fatal startup or serving failure.
#[derive(Debug)]
pub enum ServerError {
    Database(DbError),
    Views(ViewError),
    Io(std::io::Error),
}

impl Display for ServerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database(err) => write!(f, "{err}"),
            Self::Views(err) => write!(f, "failed to compile templates: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Database(err) => Some(err),
            Self::Views(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<DbError> for ServerError {
    fn from(value: DbError) -> Self {
        Self::Database(value)
    }
}

impl From<ViewError> for ServerError {
    fn from(value: ViewError) -> Self {
        Self::Views(value)
    }
}

impl From<std::io::Error> for ServerError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Opens storage and compiles templates into the shared handle.
///
/// # Errors
/// Returns `ServerError::Database` when the configured database cannot be
/// opened; callers treat this as fatal.
pub fn connect(config: &ServerConfig) -> Result<AppState, ServerError> {
    let conn = open_location(&config.database)?;
    info!(
        "event=storage_ready module=server status=ok database={}",
        config.database
    );
    Ok(AppState::new(conn, Views::new()?))
}

/// Runs the server until Ctrl+C or SIGTERM.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let state = connect(&config)?;
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!(
        "event=server_start module=server status=ok addr={} version={}",
        config.bind_addr,
        roster_core::core_version()
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("event=signal_install module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(
                    "event=signal_install module=server status=error signal=sigterm error={err}"
                );
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("event=shutdown module=server signal=ctrl_c"),
        () = terminate => info!("event=shutdown module=server signal=sigterm"),
    }
}
