#![deny(unsafe_code)]
#![deny(unused_must_use)]
#![deny(unused_features)]
#![warn(unused_crate_dependencies)]

use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use axum::Router;
use simple_backend_config::SimpleBackendConfig;
use tokio::{
    net::TcpListener,
    signal::{
        self,
        unix::{Signal, SignalKind},
    },
    sync::broadcast,
    task::JoinHandle,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};
use utoipa_swagger_ui::SwaggerUi;

/// Drop this when quit starts
pub type ServerQuitHandle = broadcast::Sender<()>;

/// Use resubscribe() for cloning.
pub type ServerQuitWatcher = broadcast::Receiver<()>;

#[async_trait]
pub trait BusinessLogic: Sized + Send + Sync + 'static {
    type AppState: Clone + Send + Sync + 'static;

    /// Create router for public API
    fn public_api_router(&self, _state: &Self::AppState) -> Router {
        Router::new()
    }

    /// Swagger UI which is added to the public API router
    /// only if debug mode is enabled.
    fn create_swagger_ui(&self) -> Option<SwaggerUi> {
        None
    }

    /// Callback for doing something before server start
    ///
    /// For example databases can be opened here. If None is returned,
    /// the server does not start.
    async fn on_before_server_start(&mut self) -> Option<Self::AppState>;

    /// Callback for doing something after server has been started
    async fn on_after_server_start(&mut self) {}

    /// Callback for doing something after server has quit
    ///
    /// For example databases can be closed here.
    async fn on_after_server_quit(self) {}
}

pub struct SimpleBackend<T: BusinessLogic> {
    logic: T,
    config: Arc<SimpleBackendConfig>,
}

impl<T: BusinessLogic> SimpleBackend<T> {
    pub fn new(logic: T, config: Arc<SimpleBackendConfig>) -> Self {
        Self { logic, config }
    }

    pub async fn run(mut self) {
        let log_with_timestamp_layer = if self.config.log_timestamp() {
            Some(tracing_subscriber::fmt::layer().with_filter(EnvFilter::from_default_env()))
        } else {
            None
        };

        let log_without_timestamp_layer = if self.config.log_timestamp() {
            None
        } else {
            Some(
                tracing_subscriber::fmt::layer()
                    .without_time()
                    .with_filter(EnvFilter::from_default_env()),
            )
        };

        tracing_subscriber::registry()
            .with(log_with_timestamp_layer)
            .with(log_without_timestamp_layer)
            .init();

        info!("Backend version: {}", env!("CARGO_PKG_VERSION"));

        if self.config.debug_mode() {
            warn!("Debug mode is enabled");
        }

        let mut terminate_signal = match signal::unix::signal(SignalKind::terminate()) {
            Ok(signal) => signal,
            Err(e) => {
                error!("Failed to listen SIGTERM. Error: {}", e);
                return;
            }
        };

        let (server_quit_handle, server_quit_watcher) = broadcast::channel(1);

        let app_state = match self.logic.on_before_server_start().await {
            Some(state) => state,
            None => {
                error!("Server start failed");
                self.logic.on_after_server_quit().await;
                return;
            }
        };

        let server_task = self
            .create_public_api_server_task(server_quit_watcher.resubscribe(), &app_state)
            .await;
        let server_task = match server_task {
            Some(task) => task,
            None => {
                self.logic.on_after_server_quit().await;
                return;
            }
        };

        self.logic.on_after_server_start().await;

        Self::wait_quit_signal(&mut terminate_signal).await;
        info!("Server quit signal received");

        info!("Server quit started");

        drop(server_quit_handle);

        // Wait until all tasks quit
        if let Err(e) = server_task.await {
            error!("Public API server task panic detected: {}", e);
        }

        drop(app_state);
        self.logic.on_after_server_quit().await;

        info!("Server quit done");
    }

    pub async fn wait_quit_signal(terminate_signal: &mut Signal) {
        tokio::select! {
            _ = terminate_signal.recv() => {}
            result = signal::ctrl_c() => {
                match result {
                    Ok(()) => (),
                    Err(e) => error!("Failed to listen CTRL+C. Error: {}", e),
                }
            }
        }
    }

    /// Public API. This can have WAN access.
    pub async fn create_public_api_server_task(
        &self,
        quit_notification: ServerQuitWatcher,
        app_state: &T::AppState,
    ) -> Option<JoinHandle<()>> {
        let router = {
            let router = self.logic.public_api_router(app_state);
            let router = if self.config.debug_mode() {
                if let Some(swagger) = self.logic.create_swagger_ui() {
                    router.merge(swagger)
                } else {
                    router
                }
            } else {
                router
            };
            if self.config.debug_mode() {
                router.route_layer(TraceLayer::new_for_http())
            } else {
                router
            }
        };

        let addr = self.config.socket().public_api;
        let listener = match TcpListener::bind(addr).await {
            Ok(listener) => listener,
            Err(e) => {
                error!("Address {} not available. Error: {}", addr, e);
                return None;
            }
        };
        info!("Public API is available on {}", addr);

        Some(Self::create_server_task_no_tls(
            router,
            listener,
            "Public API",
            quit_notification,
        ))
    }

    pub fn create_server_task_no_tls(
        router: Router,
        listener: TcpListener,
        name_for_log_message: &'static str,
        mut quit_notification: ServerQuitWatcher,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let server = axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(async move {
                let _ = quit_notification.recv().await;
            });

            match server.await {
                Ok(()) => {
                    info!("{name_for_log_message} server future returned Ok()");
                }
                Err(e) => {
                    error!("{name_for_log_message} server future returned error: {}", e);
                }
            }
        })
    }
}
