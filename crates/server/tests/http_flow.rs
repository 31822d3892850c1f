use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use server::routes;
use server::startup::build_state;
use service::auth::domain::RegisterInput;

const SECRET: &str = "integration-test-secret";

fn auth_settings() -> configs::AuthConfig {
    configs::AuthConfig { jwt_secret: SECRET.into(), token_ttl_hours: 1 }
}

fn cors() -> tower_http::cors::CorsLayer { tower_http::cors::CorsLayer::very_permissive() }

fn offline_app() -> Router {
    routes::build_router(build_state(DatabaseConnection::Disconnected, &auth_settings()), cors())
}

async fn send(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(v) => req.header(header::CONTENT_TYPE, "application/json").body(Body::from(serde_json::to_vec(&v)?))?,
        None => req.body(Body::empty())?,
    };
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
    Ok((status, json))
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let (status, body) = send(&offline_app(), "GET", "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn admin_routes_require_credentials() -> anyhow::Result<()> {
    let app = offline_app();
    for uri in ["/admin/companies", "/admin/products", "/admin/company-users", "/auth/me"] {
        let (status, body) = send(&app, "GET", uri, None, None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "Unauthorized");
    }
    Ok(())
}

#[tokio::test]
async fn malformed_token_is_treated_as_anonymous() -> anyhow::Result<()> {
    let (status, _) = send(&offline_app(), "GET", "/admin/products", Some("not-a-jwt"), None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let (status, body) = send(&offline_app(), "GET", "/api-docs/openapi.json", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/admin/company-users"].is_object());
    Ok(())
}

#[tokio::test]
async fn logout_clears_cookie() -> anyhow::Result<()> {
    let req = Request::builder().method("POST").uri("/auth/logout").body(Body::empty())?;
    let resp = offline_app().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let cookie = resp.headers().get(header::SET_COOKIE).and_then(|v| v.to_str().ok()).unwrap_or_default();
    assert!(cookie.starts_with("auth_token="));
    Ok(())
}

async fn db_app() -> Option<(Router, DatabaseConnection)> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return None; }
    let mut cfg = models::db::DatabaseConfig::from_env();
    cfg.connect_timeout = std::time::Duration::from_secs(2);
    cfg.acquire_timeout = std::time::Duration::from_secs(2);
    let db = match models::db::connect_with_config(&cfg).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("skipping: database unavailable: {e}");
            return None;
        }
    };
    // 并行测试可能同时执行迁移，已应用时忽略唯一约束错误
    if let Err(e) = migration::Migrator::up(&db, None).await {
        if !e.to_string().contains("duplicate key") {
            eprintln!("skipping: migrations failed: {e}");
            return None;
        }
    }
    let app = routes::build_router(build_state(db.clone(), &auth_settings()), cors());
    Some((app, db))
}

fn tag() -> String { Uuid::new_v4().simple().to_string()[..10].to_string() }

async fn login(app: &Router, username: &str, password: &str) -> anyhow::Result<String> {
    let (status, body) = send(app, "POST", "/auth/login", None, Some(json!({"username": username, "password": password}))).await?;
    assert_eq!(status, StatusCode::OK, "login {username}: {body}");
    Ok(body["token"].as_str().unwrap_or_default().to_string())
}

#[tokio::test]
async fn company_user_sees_and_edits_only_their_company() -> anyhow::Result<()> {
    let Some((app, db)) = db_app().await else { return Ok(()); };
    let t = tag();
    let password = "S3curePass!";

    // bootstrap a superuser directly through the auth service
    let state = build_state(db.clone(), &auth_settings());
    state
        .auth
        .register(RegisterInput {
            username: format!("root_{t}"),
            email: format!("root_{t}@example.com"),
            password: password.into(),
            is_staff: true,
            is_superuser: true,
        })
        .await?;
    let root = login(&app, &format!("root_{t}"), password).await?;

    let (status, cat) = send(&app, "POST", "/admin/categories", Some(&root), Some(json!({"name": format!("cat-{t}")}))).await?;
    assert_eq!(status, StatusCode::CREATED, "{cat}");
    let category_id = cat["id"].as_str().unwrap_or_default().to_string();

    let mut company_ids = Vec::new();
    for name in ["own", "other"] {
        let (status, c) = send(
            &app,
            "POST",
            "/admin/companies",
            Some(&root),
            Some(json!({
                "name": format!("{name}-{t}"),
                "category_id": category_id,
                "description": "A company",
                "phone": "0999999999",
                "address": "Main street 1",
            })),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED, "{c}");
        company_ids.push(c["id"].as_str().unwrap_or_default().to_string());
    }
    let (own, other) = (company_ids[0].clone(), company_ids[1].clone());

    let mut product_ids = Vec::new();
    for company in [&own, &own, &other] {
        let (status, p) = send(
            &app,
            "POST",
            "/admin/products",
            Some(&root),
            Some(json!({
                "name": format!("product-{}", tag()),
                "company_id": company,
                "category_id": category_id,
                "description": "Useful",
                "price": "10.50",
            })),
        )
        .await?;
        assert_eq!(status, StatusCode::CREATED, "{p}");
        product_ids.push(p["id"].as_str().unwrap_or_default().to_string());
    }

    let (status, user) = send(
        &app,
        "POST",
        "/admin/users",
        Some(&root),
        Some(json!({"username": format!("owner_{t}"), "email": format!("owner_{t}@example.com"), "password": password})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED, "{user}");
    let user_id = user["id"].as_str().unwrap_or_default().to_string();

    // before binding: authenticated but sees nothing
    let owner = login(&app, &format!("owner_{t}"), password).await?;
    let (status, page) = send(&app, "GET", "/admin/products?per_page=100", Some(&owner), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 0);

    let (status, binding) = send(&app, "POST", "/admin/company-users", Some(&root), Some(json!({"user_id": user_id, "company_id": own}))).await?;
    assert_eq!(status, StatusCode::CREATED, "{binding}");

    // the same company cannot be bound twice
    let (status, second) = send(
        &app,
        "POST",
        "/admin/users",
        Some(&root),
        Some(json!({"username": format!("second_{t}"), "email": format!("second_{t}@example.com"), "password": password})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, dup) = send(
        &app,
        "POST",
        "/admin/company-users",
        Some(&root),
        Some(json!({"user_id": second["id"], "company_id": own})),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(dup["detail"], "this company is already assigned to a user");

    let (status, page) = send(&app, "GET", "/admin/products?per_page=100", Some(&owner), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 2);
    assert!(page["items"].as_array().map(|a| a.iter().all(|p| p["company_id"] == own.as_str())).unwrap_or(false));

    let (status, _) = send(&app, "GET", &format!("/admin/products/{}", product_ids[2]), Some(&owner), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, choices) = send(&app, "GET", "/admin/products/company-choices", Some(&owner), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(choices.as_array().map(Vec::len), Some(1));

    let (status, _) = send(
        &app,
        "POST",
        "/admin/products",
        Some(&owner),
        Some(json!({"name": "intruder", "company_id": other, "category_id": category_id, "description": "x", "price": "1"})),
    )
    .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &format!("/admin/companies/{own}"), Some(&owner), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &format!("/admin/products/{}", product_ids[0]), Some(&owner), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", "/admin/users", Some(&owner), None).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // superuser cleanup
    let (status, _) = send(&app, "DELETE", &format!("/admin/companies/{own}"), Some(&root), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("/admin/companies/{other}"), Some(&root), None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    Ok(())
}

#[tokio::test]
async fn partner_submission_rejects_duplicate_email() -> anyhow::Result<()> {
    let Some((app, _db)) = db_app().await else { return Ok(()); };
    let email = format!("socio_{}@example.com", tag());
    let body = json!({
        "first_name": "Ana",
        "last_name": "Diaz",
        "email": email,
        "phone": "0999999999",
        "company": "Acme",
        "position": "CEO",
        "address": "Main 1",
        "city": "Quito",
        "company_description": "We build things",
        "reason": "Networking",
        "status": "approved",
    });
    let (status, created) = send(&app, "POST", "/api/socios", None, Some(body.clone())).await?;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["message"], "Application submitted successfully");
    assert_eq!(created["data"]["status"], "pending");

    let (status, dup) = send(&app, "POST", "/api/socios", None, Some(body)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(dup["detail"], "validation error: an application with this email already exists");
    Ok(())
}

#[tokio::test]
async fn partner_submission_rejects_reused_national_id() -> anyhow::Result<()> {
    let Some((app, _db)) = db_app().await else { return Ok(()); };
    let national_id = tag();
    let submission = |email: String| {
        json!({
            "first_name": "Luis",
            "last_name": "Mora",
            "national_id": national_id,
            "email": email,
            "phone": "0988888888",
            "company": "Mora Hnos",
            "position": "Owner",
            "address": "Av. Central 12",
            "city": "Cuenca",
            "company_description": "Family bakery",
            "reason": "Visibility",
        })
    };

    let first = submission(format!("first_{}@example.com", tag()));
    let (status, created) = send(&app, "POST", "/api/socios", None, Some(first)).await?;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["data"]["national_id"], national_id);

    let second = submission(format!("second_{}@example.com", tag()));
    let (status, dup) = send(&app, "POST", "/api/socios", None, Some(second)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(dup["detail"], "validation error: an application with this national ID already exists");
    Ok(())
}
