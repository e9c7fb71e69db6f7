//! GraphQL HTTP server.

use std::future::Future;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tracing::{debug, info};

use crate::types::SyllabusSchema;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_playground: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            enable_playground: true,
        }
    }
}

/// Start the GraphQL server.
pub async fn serve(schema: SyllabusSchema, config: ServerConfig) -> Result<(), std::io::Error> {
    let listener = bind(&config).await?;
    info!("⚡ GraphQL server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(schema, &config)).await
}

/// Start the GraphQL server with graceful shutdown support.
pub async fn serve_with_shutdown<F>(
    schema: SyllabusSchema,
    config: ServerConfig,
    shutdown_signal: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = bind(&config).await?;
    debug!(addr = %listener.local_addr()?, "Server listening");

    axum::serve(listener, router(schema, &config))
        .with_graceful_shutdown(shutdown_signal)
        .await
}

fn router(schema: SyllabusSchema, config: &ServerConfig) -> Router {
    let mut app = Router::new()
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        .route("/health", get(health_check))
        .with_state(schema);

    if config.enable_playground {
        app = app.route("/", get(graphql_playground));
    }

    app
}

async fn bind(config: &ServerConfig) -> Result<tokio::net::TcpListener, std::io::Error> {
    let addr = format!("{}:{}", config.host, config.port);
    tokio::net::TcpListener::bind(&addr).await
}

/// GraphQL query handler.
async fn graphql_handler(
    State(schema): State<SyllabusSchema>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

/// GraphQL Playground UI.
async fn graphql_playground() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
