use ditherbot::server::routes;
use warp::http::StatusCode;

#[tokio::test]
async fn rejects_non_json_content_type() {
    let resp = warp::test::request()
        .method("POST")
        .path("/dither")
        .header("content-type", "text/plain")
        .body("image_url=x")
        .reply(&routes())
        .await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert!(body["error"].is_string(), "errors must be JSON bodies");
}

#[tokio::test]
async fn rejects_missing_body() {
    let resp = warp::test::request()
        .method("POST")
        .path("/dither")
        .header("content-type", "application/json")
        .reply(&routes())
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejects_malformed_json() {
    let resp = warp::test::request()
        .method("POST")
        .path("/dither")
        .header("content-type", "application/json")
        .body("{not json")
        .reply(&routes())
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejects_body_without_image_url() {
    let resp = warp::test::request()
        .method("POST")
        .path("/dither")
        .header("content-type", "application/json")
        .body(r#"{"colors": 8}"#)
        .reply(&routes())
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejects_out_of_range_colors() {
    let resp = warp::test::request()
        .method("POST")
        .path("/dither")
        .header("content-type", "application/json")
        .body(r#"{"image_url": "http://ditherbot.invalid/a.png", "colors": 129}"#)
        .reply(&routes())
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert!(body["error"].as_str().unwrap().contains("colors"));
}

#[tokio::test]
async fn rejects_out_of_range_max_size() {
    let resp = warp::test::request()
        .method("POST")
        .path("/dither")
        .header("content-type", "application/json")
        .body(r#"{"image_url": "http://ditherbot.invalid/a.png", "max_size": 512}"#)
        .reply(&routes())
        .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unreachable_image_url_is_bad_gateway() {
    // Reserved .invalid TLD: resolution fails without hitting a network.
    let resp = warp::test::request()
        .method("POST")
        .path("/dither")
        .header("content-type", "application/json")
        .body(r#"{"image_url": "http://ditherbot.invalid/a.png"}"#)
        .reply(&routes())
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value = serde_json::from_slice(resp.body()).unwrap();
    assert!(body["error"].as_str().unwrap().contains("fetch"));
}
