//! HTTP surface tests driven through the router

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::common::*;

async fn get(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect carries a location")
        .to_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn health_and_readiness() {
    let app = app();

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["status"], "healthy");

    let response = get(&app, "/ready").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["status"], "ready");
}

#[tokio::test]
async fn create_redirects_with_see_other() {
    let app = app();

    let response = post_form(&app, "/catalog/genre/create", "name=Fantasy").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let genre_url = location(&response);
    assert!(genre_url.starts_with("/catalog/genre/"));

    let response = get(&app, &genre_url).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["outcome"], "render");
    assert_eq!(body["view"]["genre"]["name"], "Fantasy");
    assert_eq!(body["view"]["genre"]["url"], genre_url.as_str());
}

#[tokio::test]
async fn rejected_submission_is_unprocessable() {
    let app = app();

    let response = post_form(
        &app,
        "/catalog/author/create",
        "first_name=&family_name=Le+Guin&date_of_birth=someday",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json(response).await;
    assert_eq!(body["outcome"], "invalid");
    assert_eq!(body["view"]["author"]["family_name"], "Le Guin");
    let messages: Vec<_> = body["view"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["message"].as_str().unwrap().to_string())
        .collect();
    assert!(messages.contains(&"First name must be specified".to_string()));
    assert!(messages.contains(&"Family name has non-alphanumeric characters".to_string()));
    assert!(messages.contains(&"Invalid date of birth".to_string()));
}

#[tokio::test]
async fn repeated_genre_fields_become_a_list() {
    let app = app();
    let author = id_of(&location(
        &post_form(&app, "/catalog/author/create", "first_name=Ursula&family_name=LeGuin").await,
    ));
    let fantasy = id_of(&location(
        &post_form(&app, "/catalog/genre/create", "name=Fantasy").await,
    ));
    let poetry = id_of(&location(
        &post_form(&app, "/catalog/genre/create", "name=Poetry").await,
    ));

    let body = format!(
        "title=Earthsea&author={}&summary=Wizards&isbn=123&genre={}&genre={}",
        author, fantasy, poetry
    );
    let response = post_form(&app, "/catalog/book/create", &body).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let detail = json(get(&app, &location(&response)).await).await;
    let genres: Vec<_> = detail["view"]["book"]["genre"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(genres, vec!["Fantasy", "Poetry"]);
    assert_eq!(detail["view"]["book"]["author"]["name"], "LeGuin, Ursula");
}

#[tokio::test]
async fn blocked_delete_is_a_conflict() {
    let app = app();
    let author_url = location(
        &post_form(&app, "/catalog/author/create", "first_name=Ursula&family_name=LeGuin").await,
    );
    let body = format!(
        "title=Earthsea&author={}&summary=Wizards&isbn=123",
        id_of(&author_url)
    );
    post_form(&app, "/catalog/book/create", &body).await;

    let response = post_form(&app, &format!("{}/delete", author_url), "").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json(response).await;
    assert_eq!(body["outcome"], "blocked");
    assert_eq!(body["view"]["author_books"][0]["title"], "Earthsea");

    assert_eq!(get(&app, &author_url).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_record_is_not_found() {
    let app = app();
    let response = get(&app, &format!("/catalog/book/{}", uuid::Uuid::new_v4())).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json(response).await["error"], "NoSuchEntity");
}

#[tokio::test]
async fn malformed_identifier_is_a_bad_request() {
    let app = app();
    let response = get(&app, "/catalog/author/not-an-id").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json(response).await["error"], "BadValue");
}

#[tokio::test]
async fn catalog_home_reports_counts() {
    let app = app();
    post_form(&app, "/catalog/genre/create", "name=Fantasy").await;

    let response = get(&app, "/catalog").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json(response).await;
    assert_eq!(body["view"]["title"], "Local Library Home");
    assert_eq!(body["view"]["data"]["genre_count"], 1);
    assert_eq!(body["view"]["data"]["book_count"], 0);
}
