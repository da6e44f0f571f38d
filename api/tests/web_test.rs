//! Integration tests for the dashboard router

use api::{router, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use shared::ArtifactStore;
use tower::ServiceExt;

const COOKIE: &str = "stocklens_session";

/// Router over a scratch SQLite file and artifact directory
async fn test_app() -> (tempfile::TempDir, ArtifactStore, Router) {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path(), dir.path().join("plots"));
    store.ensure_dirs().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("user.db").display());
    let state = AppState::connect(&url, store.clone(), COOKIE).await.unwrap();
    (dir, store, router(state))
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// Sign up and log in, returning the `name=token` cookie pair
async fn login_as(app: &Router, username: &str) -> String {
    let form = format!("username={}&password=secret", username);
    let signup = send(app, post_form("/signup", &form, None)).await;
    assert!(signup.status().is_redirection());

    let login = send(app, post_form("/login", &form, None)).await;
    assert!(login.status().is_redirection());
    assert_eq!(location(&login), "/dashboard");
    let set_cookie = login.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_landing_and_health() {
    let (_dir, _store, app) = test_app().await;

    let landing = send(&app, get("/", None)).await;
    assert_eq!(landing.status(), StatusCode::OK);
    assert!(body_text(landing).await.contains("Stock analysis dashboard"));

    let health = send(&app, get("/health", None)).await;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(body_text(health).await, r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn test_signup_validation_and_duplicates() {
    let (_dir, _store, app) = test_app().await;

    let missing = send(&app, post_form("/signup", "username=alice&password=", None)).await;
    assert_eq!(missing.status(), StatusCode::OK);
    assert!(body_text(missing).await.contains("Please provide both username and password."));

    let created = send(&app, post_form("/signup", "username=alice&password=pw", None)).await;
    assert!(created.status().is_redirection());
    assert_eq!(location(&created), "/login");

    let duplicate = send(&app, post_form("/signup", "username=alice&password=other", None)).await;
    assert!(body_text(duplicate).await.contains("Username already exists."));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let (_dir, _store, app) = test_app().await;
    send(&app, post_form("/signup", "username=bob&password=pw", None)).await;

    let wrong = send(&app, post_form("/login", "username=bob&password=nope", None)).await;
    assert_eq!(wrong.status(), StatusCode::OK);
    assert!(wrong.headers().get(header::SET_COOKIE).is_none());
    assert!(body_text(wrong).await.contains("Invalid credentials."));

    let empty = send(&app, post_form("/login", "", None)).await;
    assert!(body_text(empty).await.contains("Invalid credentials."));
}

#[tokio::test]
async fn test_dashboard_requires_session() {
    let (_dir, _store, app) = test_app().await;

    let anonymous = send(&app, get("/dashboard", None)).await;
    assert!(anonymous.status().is_redirection());
    assert_eq!(location(&anonymous), "/login");

    let forged = send(&app, get("/dashboard", Some("stocklens_session=not-a-token"))).await;
    assert_eq!(location(&forged), "/login");
}

#[tokio::test]
async fn test_dashboard_shows_summary_and_plots() {
    let (_dir, store, app) = test_app().await;
    store.write_summary("Google", "Basic info:\nRows: 42\n").unwrap();
    store.write_summary("netflix", "Basic info:\nRows: 7\n").unwrap();
    store.write_comparison("Google stats:\n  mean: 12.5\n").unwrap();
    for plot in ["Google_volume.png", "Google_price_ma.png", "netflix_volume.png"] {
        std::fs::write(store.plots_dir().join(plot), b"png").unwrap();
    }
    let cookie = login_as(&app, "carol").await;

    let picker = body_text(send(&app, get("/dashboard", Some(&cookie))).await).await;
    assert!(picker.contains(r#"<option value="Google""#));
    assert!(picker.contains(">Netflix</option>"));
    assert!(picker.contains(">Comparison</option>"));
    assert!(!picker.contains("<pre>"));

    let stock = body_text(send(&app, post_form("/dashboard", "stock=Google", Some(&cookie))).await).await;
    assert!(stock.contains("Rows: 42"));
    assert!(stock.contains(r#"<img src="/plots/Google_price_ma.png""#));
    assert!(stock.contains(r#"<img src="/plots/Google_volume.png""#));
    assert!(!stock.contains("netflix_volume.png"));

    let all = body_text(send(&app, post_form("/dashboard", "stock=all", Some(&cookie))).await).await;
    assert!(all.contains("mean: 12.5"));
    assert!(!all.contains("<img"));

    let empty = body_text(send(&app, post_form("/dashboard", "stock=", Some(&cookie))).await).await;
    assert!(!empty.contains("<pre>"));
}

#[tokio::test]
async fn test_plot_files_are_served() {
    let (_dir, store, app) = test_app().await;
    std::fs::write(store.plots_dir().join("Google_volume.png"), b"\x89PNG").unwrap();

    let found = send(&app, get("/plots/Google_volume.png", None)).await;
    assert_eq!(found.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(found.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"\x89PNG");

    let missing = send(&app, get("/plots/absent.png", None)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (_dir, _store, app) = test_app().await;
    let cookie = login_as(&app, "dave").await;
    assert_eq!(send(&app, get("/dashboard", Some(&cookie))).await.status(), StatusCode::OK);

    let logout = send(&app, get("/logout", Some(&cookie))).await;
    assert!(logout.status().is_redirection());
    assert_eq!(location(&logout), "/");

    let after = send(&app, get("/dashboard", Some(&cookie))).await;
    assert_eq!(location(&after), "/login");
}
