use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::panic_response;
use crate::handlers::word_handler;
use crate::AppState;

fn words_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(word_handler::list_words).post(word_handler::create_word))
        .route("/search", get(word_handler::search_words))
        .route(
            "/:id",
            get(word_handler::get_word)
                .put(word_handler::update_word)
                .delete(word_handler::delete_word),
        )
}

/// Full application: routes, CORS, request tracing and panic recovery.
pub fn app(state: Arc<AppState>) -> Router {
    // CORS: allow everything for now, tighten once the frontend origin is fixed
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(word_handler::root))
        .nest("/words", words_router())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
