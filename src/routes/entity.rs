//! Entity CRUD routes, one resource per entity under `/api`.

use crate::handlers::entity::{create, delete as delete_handler, list, read, update};
use crate::handlers::user;
use crate::model::{AccessLog, AccessPoint, Building, Entity, User};
use crate::service::Service;
use crate::state::AppState;
use axum::{extract::FromRef, routing::get, Router};

/// `GET /`, `POST /`, `GET /:id`, `PUT /:id`, `DELETE /:id` for one entity.
pub fn entity_routes<E: Entity>() -> Router<AppState>
where
    Service<E>: FromRef<AppState>,
{
    Router::new()
        .route("/", get(list::<E>).post(create::<E>))
        .route(
            "/:id",
            get(read::<E>).put(update::<E>).delete(delete_handler::<E>),
        )
}

fn resource_path<E: Entity>() -> String {
    format!("/api/{}", E::DEF.path_segment)
}

/// All resources: users (with nested reads), buildings, access points, access logs.
pub fn api_routes() -> Router<AppState> {
    let users = entity_routes::<User>()
        .route("/:id/buildings", get(user::buildings))
        .route("/:id/access-logs", get(user::access_logs));

    Router::new()
        .nest(&resource_path::<User>(), users)
        .nest(&resource_path::<Building>(), entity_routes::<Building>())
        .nest(&resource_path::<AccessPoint>(), entity_routes::<AccessPoint>())
        .nest(&resource_path::<AccessLog>(), entity_routes::<AccessLog>())
}
