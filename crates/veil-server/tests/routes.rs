use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use image::{GrayImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::sync::Arc;
use tower::ServiceExt;
use veil_core::{Region, TextToken};
use veil_engine::{Processor, Redactor};
use veil_server::{AppState, router};
use veil_storage::{HistoryStore, UploadStore};
use veil_vision::{FaceDetector, Result as VisionResult, TextRecognizer};

const BOUNDARY: &str = "veil-test-boundary";

struct NoFaces;

impl FaceDetector for NoFaces {
    fn detect(&self, _gray: &GrayImage) -> VisionResult<Vec<Region>> {
        Ok(Vec::new())
    }
}

struct NoText;

impl TextRecognizer for NoText {
    fn recognize(&self, _gray: &GrayImage) -> VisionResult<Vec<TextToken>> {
        Ok(Vec::new())
    }
}

struct TestApp {
    _dir: tempfile::TempDir,
    processor: Processor,
    app: Router,
}

async fn setup() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let redactor = Redactor::new(Arc::new(NoFaces), Arc::new(NoText));
    let uploads = UploadStore::new(dir.path().join("uploads")).unwrap();
    let history = HistoryStore::new(&dir.path().join("history.db"))
        .await
        .unwrap();
    let processor = Processor::new(Arc::new(redactor), uploads, history);
    let app = router(AppState::new(processor.clone(), 1024 * 1024));

    TestApp {
        _dir: dir,
        processor,
        app,
    }
}

fn png_bytes() -> Vec<u8> {
    let image = RgbImage::from_fn(32, 24, |x, _| Rgb([(x * 8) as u8, 90, 200]));
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, content) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
                body.extend_from_slice(content);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload(parts: &[Part]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[tokio::test]
async fn test_upload_form() {
    let test = setup().await;

    let response = test.app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("enctype=\"multipart/form-data\""));
    assert!(page.contains("name=\"image\""));
}

#[tokio::test]
async fn test_missing_file_is_rejected() {
    let test = setup().await;

    let response = test
        .app
        .oneshot(upload(&[Part::Text("mode", "full"), Part::Text("blur", "2")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "No file uploaded");
    assert_eq!(test.processor.history().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_file_input_is_rejected() {
    let test = setup().await;

    let response = test
        .app
        .oneshot(upload(&[Part::File("image", "", b"")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "No file uploaded");
}

#[tokio::test]
async fn test_undecodable_upload_is_rejected() {
    let test = setup().await;

    let response = test
        .app
        .oneshot(upload(&[
            Part::Text("mode", "face"),
            Part::File("image", "notes.txt", b"plain text, not pixels"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(response).await, "Could not read image file");
    assert_eq!(test.processor.history().count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_full_blur_upload_and_download() {
    let test = setup().await;
    let png = png_bytes();

    let response = test
        .app
        .clone()
        .oneshot(upload(&[
            Part::Text("mode", "full"),
            Part::Text("blur", "3"),
            Part::File("image", "photo.png", &png),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("_fullblur.png"));
    assert!(page.contains("photo.png"));

    let records = test.processor.history().recent(50).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].blur_level.level(), 3);
    assert_eq!(records[0].emails, None);

    let uri = format!("/uploads/{}", records[0].processed_filename);
    let response = test.app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let served = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let decoded = image::load_from_memory(&served).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (32, 24));
}

#[tokio::test]
async fn test_non_numeric_blur_defaults_to_normal() {
    let test = setup().await;
    let png = png_bytes();

    let response = test
        .app
        .oneshot(upload(&[
            Part::Text("mode", "full"),
            Part::Text("blur", "very"),
            Part::File("image", "photo.png", &png),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let records = test.processor.history().recent(50).await.unwrap();
    assert_eq!(records[0].blur_level.level(), 2);
}

#[tokio::test]
async fn test_text_mode_without_text() {
    let test = setup().await;
    let png = png_bytes();

    let response = test
        .app
        .oneshot(upload(&[
            Part::Text("mode", "text"),
            Part::File("image", "blank.png", &png),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    assert!(page.contains("_textblur.png"));
}

#[tokio::test]
async fn test_unknown_upload_is_not_found() {
    let test = setup().await;

    let response = test
        .app
        .oneshot(get("/uploads/never_uploaded.png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_history_lists_newest_first() {
    let test = setup().await;
    let png = png_bytes();

    for name in ["first.png", "second.png"] {
        let response = test
            .app
            .clone()
            .oneshot(upload(&[
                Part::Text("mode", "full"),
                Part::File("image", name, &png),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = test.app.clone().oneshot(get("/history")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = body_text(response).await;
    let second = page.find("second.png").unwrap();
    let first = page.find("first.png").unwrap();
    assert!(second < first);

    let response = test.app.oneshot(get("/api/history")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["original_filename"], "second.png");
    assert_eq!(records[0]["mode"], "full");
}

#[tokio::test]
async fn test_history_is_capped() {
    let test = setup().await;
    let png = png_bytes();

    for i in 0..52 {
        let name = format!("img{}.png", i);
        let response = test
            .app
            .clone()
            .oneshot(upload(&[
                Part::Text("mode", "full"),
                Part::Text("blur", "1"),
                Part::File("image", &name, &png),
            ]))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = test.app.oneshot(get("/api/history")).await.unwrap();
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 50);
    assert_eq!(records[0]["original_filename"], "img51.png");
}

#[tokio::test]
async fn test_health() {
    let test = setup().await;

    let response = test.app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["name"], "veil");
}
