use axum::{
    http::{HeaderValue, Method},
    middleware::from_fn,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{elevated, protected, public};
use crate::middleware::{jwt_auth_middleware, require_admin_middleware};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let config = crate::config::config();
    let router = Router::new()
        .merge(public_routes())
        .merge(protected_routes())
        .merge(elevated_routes())
        .layer(cors_layer(&config.security.cors_origins));

    let router = if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::home::root))
        .route("/health", get(public::home::health))
        .route("/auth/signup", post(public::auth::signup))
        .route("/auth/signin", post(public::auth::signin))
}

fn protected_routes() -> Router<AppState> {
    use protected::{comments, managers, todos, users};

    Router::new()
        .route("/todos", post(todos::create_todo).get(todos::list_todos))
        .route("/todos/:todo_id", get(todos::get_todo))
        .route(
            "/todos/:todo_id/comments",
            post(comments::create_comment).get(comments::list_comments),
        )
        .route(
            "/todos/:todo_id/managers",
            post(managers::add_manager).get(managers::list_managers),
        )
        .route("/todos/:todo_id/managers/:manager_id", delete(managers::remove_manager))
        .route("/users", axum::routing::put(users::change_password))
        .route("/users/:user_id", get(users::get_user))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn elevated_routes() -> Router<AppState> {
    use elevated::admin;

    // Layers run outermost-first: authenticate, then check the role
    Router::new()
        .route("/admin/users/:user_id", patch(admin::change_user_role))
        .route("/admin/comments/:comment_id", delete(admin::delete_comment))
        .route_layer(from_fn(require_admin_middleware))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers(Any)
}
