//! Rating API 模块
//!
//! 同一路径段 `/{id}` 上，GET/POST 按 restaurant_id 解释，
//! PUT/DELETE 按 rating_id 解释 (与原始 HTTP 契约一致)。

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/ratings", rating_routes())
}

fn rating_routes() -> Router<ServerState> {
    // "/user/{user_id}" 的静态段优先于 "/{id}" 的捕获段
    Router::new()
        .route(
            "/{id}",
            get(handler::list_for_restaurant)
                .post(handler::submit)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/user/{user_id}", get(handler::list_for_user))
}
