//! HTTP 层端到端测试
//!
//! 通过 `tower::ServiceExt::oneshot` 驱动完整路由树，
//! 每个测试使用独立的内存存储。

use axum::{Router, body::Body};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use dinemap::{Config, MemoryStore, Server, ServerState};

fn app() -> Router {
    let config = Config::with_overrides(0);
    Server::router(ServerState::new(config, MemoryStore::shared()))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn sample_restaurant() -> Value {
    json!({
        "name": "Great Burger",
        "location": "Downtown Manhattan, NYC",
        "latitude": 40.7128,
        "longitude": -74.0060,
        "menu": {"Cheeseburger": 9.5},
        "services": ["delivery"],
        "cuisine": ["American"],
        "open_hours": "09:00",
        "close_hours": "22:00"
    })
}

async fn create_restaurant(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/restaurants", sample_restaurant()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_probe() {
    let response = app().oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn restaurant_crud_flow() {
    let app = app();
    let id = create_restaurant(&app).await;

    // 读回：聚合字段为服务端默认值
    let response = app
        .clone()
        .oneshot(get_request(&format!("/restaurants/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Great Burger");
    assert_eq!(body["aggregate_rating"], json!(0.0));
    assert_eq!(body["rating_count"], json!(0));

    // 部分更新
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/restaurants/{id}"),
            json!({"name": "Greater Burger"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], "Greater Burger");
    assert_eq!(body["location"], "Downtown Manhattan, NYC");

    // 删除后 404
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/restaurants/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/restaurants/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn missing_restaurant_returns_structured_404() {
    let response = app()
        .oneshot(get_request("/restaurants/unknown"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
    assert!(body["message"].as_str().unwrap().contains("unknown"));
}

#[tokio::test]
async fn rating_lifecycle_updates_aggregate() {
    let app = app();
    let id = create_restaurant(&app).await;

    // 提交评分 → 201
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/ratings/{id}"),
            json!({"user_id": "u1", "score": 4.5, "comment": "great"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let rating_id = body["rating_id"].as_str().unwrap().to_string();
    assert_eq!(body["rating"]["score"], json!(4.5));

    // 聚合已更新
    let response = app
        .clone()
        .oneshot(get_request(&format!("/restaurants/{id}")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["aggregate_rating"], json!(4.5));
    assert_eq!(body["rating_count"], json!(1));

    // 越界分数 → 400 invalid_input
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/ratings/{id}"),
            json!({"user_id": "u2", "score": 0.5}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_input");

    // 列表最新在前
    let response = app
        .clone()
        .oneshot(get_request(&format!("/ratings/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // 用户维度列表
    let response = app
        .clone()
        .oneshot(get_request("/ratings/user/u1"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // 更新评分
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/ratings/{rating_id}"),
            json!({"score": 3.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["score"], json!(3.0));

    // 删除评分 → 聚合重置
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/ratings/{rating_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request(&format!("/restaurants/{id}")))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["aggregate_rating"], json!(0.0));
    assert_eq!(body["rating_count"], json!(0));
}

#[tokio::test]
async fn rating_against_missing_restaurant_is_404() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/ratings/unknown",
            json!({"user_id": "u1", "score": 3.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_restaurant_cascades_to_ratings() {
    let app = app();
    let id = create_restaurant(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/ratings/{id}"),
            json!({"user_id": "u1", "score": 5.0}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let rating_id = body["rating_id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/restaurants/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // 评分列表与单条评分都已不存在
    let response = app
        .clone()
        .oneshot(get_request(&format!("/ratings/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/ratings/{rating_id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn search_pipeline_over_http() {
    let app = app();
    let id = create_restaurant(&app).await;

    // 无过滤条件 → 返回全部
    let response = app.clone().oneshot(get_request("/search")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // 文本 + 地理过滤，附带 distance_km
    let response = app
        .clone()
        .oneshot(get_request("/search?q=burger&lat=40.73&lon=-74.00"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["id"], json!(id));
    let d = results[0]["distance_km"].as_f64().unwrap();
    assert!((d - 1.98).abs() < 0.05, "expected ~1.98 km, got {d}");

    // 小半径排除
    let response = app
        .clone()
        .oneshot(get_request("/search?lat=40.73&lon=-74.00&radius_km=0.1"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());

    // 不匹配的文本 → 空序列而非错误
    let response = app
        .clone()
        .oneshot(get_request("/search?q=sushi"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());

    // lat 缺 lon → 400
    let response = app
        .clone()
        .oneshot(get_request("/search?lat=40.73"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_input");
}
