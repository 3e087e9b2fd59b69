//! Dashboard store against an in-process fake of the REST API.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Notify;

use blitzware_client::resource::Applications;
use blitzware_client::{ClientError, Dashboard, LoginOutcome, ResourceClient};
use blitzware_core::config::ApiConfig;
use blitzware_core::models::{
    ApplicationUpdate, Flag, NewLicenses, UserSubscriptionUpdate, UserUpdate,
};
use blitzware_core::{AuthChallenge, AuthState, RequestState};

// =============================================================================
// Fake API
// =============================================================================

#[derive(Default)]
struct Fake {
    /// `(authorization, x-client-id)` seen by the applications listing.
    seen_headers: Mutex<Vec<(Option<String>, Option<String>)>>,
    /// Deletes that reached the server, by path.
    deleted: Mutex<Vec<String>>,
    /// `PUT` bodies that reached the server, by path.
    updated: Mutex<Vec<(String, Value)>>,
    /// Registration bodies.
    registered: Mutex<Vec<Value>>,
    /// Blocks `GET /applications/{id}` until notified.
    release: Notify,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|v| v.to_str().unwrap().to_string())
}

fn account(username: &str) -> Value {
    json!({
        "id": format!("acc-{username}"),
        "username": username,
        "email": format!("{username}@example.com"),
        "roles": ["developer"],
        "creationDate": "2024-01-02T03:04:05.000Z",
        "profilePicture": null,
        "emailVerified": 1,
        "twoFactorAuth": 0,
        "enabled": 1
    })
}

fn account_data(username: &str) -> Value {
    json!({
        "account": account(username),
        "token": format!("token-{username}")
    })
}

fn application(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "secret": "s3cr3t",
        "status": 1,
        "hwidCheck": 0,
        "developerMode": 0,
        "integrityCheck": 0,
        "freeMode": 0,
        "twoFactorAuth": 1,
        "programHash": null,
        "version": "1.0",
        "downloadLink": null,
        "adminRoleId": null,
        "adminRoleLevel": null
    })
}

fn license(id: &str, key: &str) -> Value {
    json!({
        "id": id,
        "license": key,
        "days": 30,
        "expiryDate": "2025-01-01T00:00:00.000Z",
        "used": 0,
        "usedBy": null,
        "enabled": 1,
        "userSubId": null,
        "application": { "id": "app-1", "name": "Loader" }
    })
}

fn user(id: &str, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "expiryDate": "2030-01-01T00:00:00.000Z",
        "lastLogin": "2024-03-01T12:00:00.000Z",
        "lastIP": "10.0.0.1",
        "hwid": "HWID-1",
        "license": "KEY-1",
        "enabled": 1,
        "twoFactorAuth": 0,
        "userSubId": null,
        "application": { "id": "app-1", "name": "Loader" }
    })
}

fn subscription(id: i64, name: &str, level: i64) -> Value {
    json!({ "id": id, "name": name, "level": level, "applicationId": "app-1" })
}

fn api_error(status: StatusCode, code: &str, message: &str) -> Response {
    (status, Json(json!({ "code": code, "message": message }))).into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    match (username, body["password"].as_str().unwrap_or_default()) {
        ("twofa", _) => api_error(StatusCode::UNAUTHORIZED, "ER_UNAUTHORIZED", "2FA required"),
        ("otp", _) => api_error(
            StatusCode::UNAUTHORIZED,
            "ER_UNAUTHORIZED",
            "we need to verify it is you, check your email",
        ),
        (_, "wrong") => api_error(
            StatusCode::UNAUTHORIZED,
            "ER_BAD_CREDENTIALS",
            "Invalid username or password",
        ),
        (user, _) => Json(account_data(user)).into_response(),
    }
}

async fn verify_two_factor(Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    if body["twoFactorCode"] == "123456" {
        Json(account_data(username)).into_response()
    } else {
        api_error(StatusCode::UNAUTHORIZED, "ER_INVALID_2FA", "Invalid 2FA code")
    }
}

async fn verify_otp(Json(body): Json<Value>) -> Response {
    let username = body["username"].as_str().unwrap_or_default();
    if body["otp"] == "1234" {
        Json(account_data(username)).into_response()
    } else {
        api_error(StatusCode::UNAUTHORIZED, "ER_INVALID_OTP", "Invalid code")
    }
}

async fn register(State(fake): State<Arc<Fake>>, Json(body): Json<Value>) -> Response {
    fake.registered.lock().unwrap().push(body);
    StatusCode::CREATED.into_response()
}

/// The server's copy differs from the login payload in every mutable field.
async fn get_account(Path(id): Path<String>) -> Response {
    let username = id.strip_prefix("acc-").unwrap_or(&id);
    let mut fresh = account(username);
    fresh["email"] = json!("fresh@example.com");
    fresh["roles"] = json!([]);
    fresh["profilePicture"] = json!("c2VydmVy");
    fresh["twoFactorAuth"] = json!(1);
    Json(fresh).into_response()
}

async fn record_update(
    State(fake): State<Arc<Fake>>,
    uri: Uri,
    Json(body): Json<Value>,
) -> Response {
    fake.updated
        .lock()
        .unwrap()
        .push((uri.path().to_string(), body));
    StatusCode::OK.into_response()
}

async fn record_delete(State(fake): State<Arc<Fake>>, uri: Uri) -> Response {
    fake.deleted.lock().unwrap().push(uri.path().to_string());
    StatusCode::NO_CONTENT.into_response()
}

async fn list_applications(
    State(fake): State<Arc<Fake>>,
    Path(account_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    fake.seen_headers.lock().unwrap().push((
        header(&headers, "authorization"),
        header(&headers, "x-client-id"),
    ));
    if account_id != "acc-lander" {
        return api_error(StatusCode::FORBIDDEN, "ER_FORBIDDEN", "Wrong account");
    }
    Json(json!([
        application("app-2", "Zeta"),
        application("app-1", "Alpha"),
        application("app-3", "Mid")
    ]))
    .into_response()
}

async fn create_application(Json(body): Json<Value>) -> Response {
    let name = body["name"].as_str().unwrap_or_default();
    (StatusCode::CREATED, Json(application("app-new", name))).into_response()
}

async fn update_application(Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    if id == "app-missing" {
        return api_error(StatusCode::NOT_FOUND, "ER_NOT_FOUND", "Application not found");
    }
    assert!(body.get("accountId").is_some());
    StatusCode::NO_CONTENT.into_response()
}

async fn create_licenses(Json(body): Json<Value>) -> Response {
    let amount = body["amount"].as_u64().unwrap_or_default();
    let created: Vec<Value> = (0..amount)
        .map(|i| license(&format!("lic-{i}"), &format!("KEY-{i}")))
        .collect();
    (StatusCode::CREATED, Json(Value::Array(created))).into_response()
}

async fn list_users(Path(app): Path<String>) -> Response {
    if app == "app-down" {
        return (StatusCode::BAD_GATEWAY, "<html>upstream down</html>").into_response();
    }
    Json(json!([user("u-1", "neo"), user("u-2", "trinity")])).into_response()
}

async fn list_subscriptions(Path(_app): Path<String>) -> Response {
    Json(json!([subscription(1, "Basic", 1), subscription(2, "Pro", 2)])).into_response()
}

async fn list_logs(Path(username): Path<String>) -> Response {
    Json(json!([
        { "id": 1, "username": username, "date": "2024-04-01T00:00:00.000Z",
          "action": "login", "message": "Logged in" },
        { "id": 2, "username": username, "date": "2024-04-02T00:00:00.000Z",
          "action": "create", "message": "Created Loader" }
    ]))
    .into_response()
}

async fn list_app_logs(Path(app): Path<String>) -> Response {
    Json(json!([
        { "id": 10, "username": "neo", "date": "2024-04-01T00:00:00.000Z",
          "action": "login", "ip": "10.0.0.1", "appId": app }
    ]))
    .into_response()
}

async fn send_chat(Json(body): Json<Value>) -> Response {
    let sent = json!({
        "id": 77,
        "username": body["username"],
        "message": body["message"],
        "date": body["date"],
        "chatId": body["chatId"]
    });
    (StatusCode::CREATED, Json(sent)).into_response()
}

/// Answers with the uploaded part's name and byte count.
async fn upload_file(Path(app): Path<String>, mut multipart: Multipart) -> Response {
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap();
        let file = json!({
            "id": "file-1",
            "name": name,
            "size": bytes.len().to_string(),
            "createdOn": "2024-05-06T07:08:09.000Z",
            "application": { "id": app, "name": "Loader" }
        });
        return (StatusCode::CREATED, Json(file)).into_response();
    }
    api_error(StatusCode::BAD_REQUEST, "ER_NO_FILE", "No file field")
}

async fn slow(State(fake): State<Arc<Fake>>, Path(id): Path<String>) -> Response {
    fake.release.notified().await;
    Json(json!({ "id": id })).into_response()
}

async fn spawn_api() -> (Arc<Fake>, String) {
    let fake = Arc::new(Fake::default());
    let app = Router::new()
        .route("/api/accounts/login", post(login))
        .route("/api/accounts/verifyLogin2FA", post(verify_two_factor))
        .route("/api/accounts/verifyLoginOTP", post(verify_otp))
        .route("/api/accounts/register", post(register))
        .route("/api/accounts/profilePicture/{id}", put(record_update))
        .route("/api/accounts/{id}", get(get_account))
        .route("/api/applications/byAccId/{id}", get(list_applications))
        .route("/api/applications", post(create_application))
        .route(
            "/api/applications/{id}",
            get(slow).put(update_application).delete(record_delete),
        )
        .route("/api/licenses", post(create_licenses))
        .route("/api/users/application/{id}", get(list_users))
        .route("/api/users/{id}", put(record_update).delete(record_delete))
        .route("/api/userSubs/application/{id}", get(list_subscriptions))
        .route("/api/userSubs/{id}", put(record_update).delete(record_delete))
        .route("/api/logs/{key}", get(list_logs).delete(record_delete))
        .route("/api/appLogs/{key}", get(list_app_logs).delete(record_delete))
        .route("/api/chatMsgs", post(send_chat))
        .route("/api/chatMsgs/{id}", axum::routing::delete(record_delete))
        .route("/api/files/upload/{app}", post(upload_file))
        .with_state(Arc::clone(&fake));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (fake, format!("http://{addr}/api"))
}

async fn dashboard() -> (Arc<Fake>, Dashboard) {
    let (fake, base_url) = spawn_api().await;
    let config = ApiConfig {
        base_url,
        ..ApiConfig::default()
    };
    (fake, Dashboard::new(&config).unwrap())
}

async fn logged_in() -> (Arc<Fake>, Dashboard) {
    let (fake, mut dash) = dashboard().await;
    let outcome = dash.login("lander", "hunter2").await.unwrap();
    assert_eq!(outcome, LoginOutcome::Authenticated);
    (fake, dash)
}

fn app_names(dash: &Dashboard) -> Vec<&str> {
    dash.applications().iter().map(|a| a.name.as_str()).collect()
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn login_authenticates_and_sets_token() {
    let (_fake, dash) = logged_in().await;
    assert!(dash.session().is_authenticated());
    assert_eq!(dash.session().token(), Some("token-lander"));
    assert_eq!(dash.session().account_id().unwrap(), "acc-lander");
    assert!(dash.api().has_token().await);
    assert_eq!(dash.request_state(), RequestState::Success);
}

#[tokio::test]
async fn two_factor_message_parks_login_without_authenticating() {
    let (_fake, mut dash) = dashboard().await;
    let outcome = dash.login("twofa", "pw").await.unwrap();
    assert_eq!(outcome, LoginOutcome::ChallengeRequired(AuthChallenge::TwoFactor));
    assert_eq!(
        dash.session().auth(),
        &AuthState::TwoFactorRequired {
            username: "twofa".into()
        }
    );
    assert!(!dash.session().is_authenticated());
    assert!(!dash.api().has_token().await);
    // The call itself still failed.
    assert_eq!(dash.request_state(), RequestState::Error);
    assert_eq!(dash.last_error().unwrap().message, "2FA required");
}

#[tokio::test]
async fn otp_message_parks_login() {
    let (_fake, mut dash) = dashboard().await;
    let outcome = dash.login("otp", "pw").await.unwrap();
    assert_eq!(outcome, LoginOutcome::ChallengeRequired(AuthChallenge::EmailOtp));
    assert_eq!(dash.session().auth().awaiting(), Some(AuthChallenge::EmailOtp));
}

#[tokio::test]
async fn wrong_code_keeps_waiting_then_right_code_authenticates() {
    let (_fake, mut dash) = dashboard().await;
    dash.login("twofa", "pw").await.unwrap();

    let err = dash.verify_two_factor("000000").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(dash.session().auth().awaiting(), Some(AuthChallenge::TwoFactor));

    dash.verify_two_factor("123456").await.unwrap();
    assert!(dash.session().is_authenticated());
    assert_eq!(dash.session().token(), Some("token-twofa"));
}

#[tokio::test]
async fn verification_without_challenge_is_rejected_locally() {
    let (_fake, mut dash) = dashboard().await;
    let err = dash.verify_otp("1234").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::NoPendingChallenge(AuthChallenge::EmailOtp)
    ));
    // Nothing was sent.
    assert_eq!(dash.request_state(), RequestState::None);
}

#[tokio::test]
async fn bad_credentials_return_error_and_reset_flow() {
    let (_fake, mut dash) = dashboard().await;
    let err = dash.login("lander", "wrong").await.unwrap_err();
    let body = err.to_body();
    assert_eq!(body.code, "ER_BAD_CREDENTIALS");
    assert_eq!(dash.session().auth(), &AuthState::Anonymous);
}

#[tokio::test]
async fn failed_relogin_drops_previous_session() {
    let (_fake, mut dash) = logged_in().await;
    dash.load_applications().await.unwrap();

    dash.login("lander", "wrong").await.unwrap_err();
    assert_eq!(dash.session().auth(), &AuthState::Anonymous);
    assert!(dash.session().account().is_none());
    assert!(dash.session().token().is_none());
    assert!(dash.session().account_data().is_none());
    assert!(!dash.api().has_token().await);
    assert!(dash.applications().is_empty());
    assert!(matches!(
        dash.load_applications().await,
        Err(ClientError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn challenge_on_relogin_does_not_keep_old_token() {
    let (_fake, mut dash) = logged_in().await;
    let outcome = dash.login("twofa", "pw").await.unwrap();
    assert_eq!(outcome, LoginOutcome::ChallengeRequired(AuthChallenge::TwoFactor));
    assert!(dash.session().account().is_none());
    assert!(!dash.api().has_token().await);
}

#[tokio::test]
async fn otp_code_completes_login() {
    let (_fake, mut dash) = dashboard().await;
    dash.login("otp", "pw").await.unwrap();
    dash.verify_otp("1234").await.unwrap();
    assert!(dash.session().is_authenticated());
    assert_eq!(dash.session().token(), Some("token-otp"));
    assert!(dash.api().has_token().await);
}

#[tokio::test]
async fn register_posts_account_without_logging_in() {
    let (fake, dash) = dashboard().await;
    dash.register("newbie", "newbie@example.com", "pw").await.unwrap();
    assert_eq!(
        fake.registered.lock().unwrap().as_slice(),
        [json!({ "username": "newbie", "email": "newbie@example.com", "password": "pw" })]
    );
    assert!(!dash.session().is_authenticated());
    assert!(!dash.api().has_token().await);
}

#[tokio::test]
async fn refresh_replaces_account_wholesale() {
    let (_fake, mut dash) = logged_in().await;
    dash.refresh_account().await.unwrap();
    let account = dash.session().account().unwrap();
    assert_eq!(account.email, "fresh@example.com");
    assert!(account.roles.is_empty());
    assert_eq!(account.profile_picture.as_deref(), Some("c2VydmVy"));
    assert_eq!(account.two_factor_auth, Flag::ON);
    // Token and login state are untouched.
    assert_eq!(dash.session().token(), Some("token-lander"));
    assert!(dash.session().is_authenticated());
}

#[tokio::test]
async fn profile_picture_patches_cached_account() {
    let (fake, mut dash) = logged_in().await;
    dash.update_profile_picture("aGk=".into()).await.unwrap();
    assert_eq!(
        fake.updated.lock().unwrap().as_slice(),
        [(
            "/api/accounts/profilePicture/acc-lander".to_string(),
            json!({ "profilePicture": "aGk=" })
        )]
    );
    let account = dash.session().account().unwrap();
    assert_eq!(account.profile_picture.as_deref(), Some("aGk="));
    assert_eq!(account.email, "lander@example.com");
}

#[tokio::test]
async fn logout_clears_session_and_caches() {
    let (_fake, mut dash) = logged_in().await;
    dash.load_applications().await.unwrap();
    dash.logout().await;
    assert!(!dash.session().is_authenticated());
    assert!(dash.applications().is_empty());
    assert!(!dash.api().has_token().await);
    assert!(matches!(
        dash.load_applications().await,
        Err(ClientError::NotAuthenticated)
    ));
}

// =============================================================================
// Collections
// =============================================================================

#[tokio::test]
async fn list_replaces_collection_in_server_order() {
    let (_fake, mut dash) = logged_in().await;
    dash.load_applications().await.unwrap();
    assert_eq!(app_names(&dash), vec!["Zeta", "Alpha", "Mid"]);

    // A second load replaces rather than appends.
    dash.load_applications().await.unwrap();
    assert_eq!(dash.applications().len(), 3);
}

#[tokio::test]
async fn requests_carry_bearer_and_client_id() {
    let (fake, mut dash) = logged_in().await;
    dash.load_applications().await.unwrap();
    let seen = fake.seen_headers.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec![(
            Some("Bearer token-lander".to_string()),
            Some("blitzware-rs".to_string())
        )]
    );
}

#[tokio::test]
async fn create_appends_exactly_one() {
    let (_fake, mut dash) = logged_in().await;
    dash.load_applications().await.unwrap();
    let created = dash.create_application("Fresh").await.unwrap();
    assert_eq!(created.id, "app-new");
    assert_eq!(app_names(&dash), vec!["Zeta", "Alpha", "Mid", "Fresh"]);
    assert_eq!(dash.applications().iter().last(), Some(&created));
}

#[tokio::test]
async fn update_patches_cached_item_after_success() {
    let (_fake, mut dash) = logged_in().await;
    dash.load_applications().await.unwrap();
    let app = dash.applications().iter().next().unwrap().clone();

    let mut update = ApplicationUpdate::from_application(&app, "acc-lander");
    update.developer_mode = Flag::ON;
    update.version = "2.0".into();
    dash.update_application(&app.id, &update).await.unwrap();

    let cached = dash.applications().get(&app.id).unwrap();
    assert_eq!(cached.developer_mode, Flag::ON);
    assert_eq!(cached.version, "2.0");
}

#[tokio::test]
async fn failed_update_leaves_cache_alone() {
    let (_fake, mut dash) = logged_in().await;
    dash.load_applications().await.unwrap();
    let before = dash.applications().clone();
    let app = before.iter().next().unwrap();
    let update = ApplicationUpdate::from_application(app, "acc-lander");

    let err = dash
        .update_application("app-missing", &update)
        .await
        .unwrap_err();
    assert_eq!(err.to_body().code, "ER_NOT_FOUND");
    assert_eq!(dash.applications(), &before);
    assert_eq!(dash.request_state(), RequestState::Error);
}

#[tokio::test]
async fn delete_removes_first_match_only() {
    let (fake, mut dash) = logged_in().await;
    dash.load_applications().await.unwrap();
    dash.delete_application("app-1").await.unwrap();
    assert_eq!(app_names(&dash), vec!["Zeta", "Mid"]);
    assert_eq!(
        fake.deleted.lock().unwrap().as_slice(),
        ["/api/applications/app-1"]
    );
}

#[tokio::test]
async fn delete_of_uncached_id_is_noop_on_cache() {
    let (fake, mut dash) = logged_in().await;
    dash.load_applications().await.unwrap();
    dash.delete_application("app-404").await.unwrap();
    assert_eq!(dash.applications().len(), 3);
    // The request still went out and succeeded.
    assert_eq!(fake.deleted.lock().unwrap().len(), 1);
    assert_eq!(dash.request_state(), RequestState::Success);
}

#[tokio::test]
async fn license_batch_appends_all_generated_keys() {
    let (_fake, mut dash) = logged_in().await;
    let created = dash
        .create_licenses(&NewLicenses {
            days: 30,
            format: "XXXXX-XXXXX-XXXXX-XXXXX".into(),
            amount: 3,
            subscription: 1,
            application_id: "app-1".into(),
        })
        .await
        .unwrap();
    assert_eq!(created.len(), 3);
    let keys: Vec<_> = dash.licenses().iter().map(|l| l.license.as_str()).collect();
    assert_eq!(keys, vec!["KEY-0", "KEY-1", "KEY-2"]);
}

// =============================================================================
// Users, subscriptions, chat, files and logs
// =============================================================================

#[tokio::test]
async fn user_update_patches_and_delete_removes() {
    let (fake, mut dash) = logged_in().await;
    dash.load_users("app-1").await.unwrap();

    let mut update = UserUpdate::from(dash.users().get(&"u-1".to_string()).unwrap());
    update.hwid = String::new();
    update.enabled = Flag::OFF;
    dash.update_user("u-1", &update).await.unwrap();

    let (path, body) = fake.updated.lock().unwrap()[0].clone();
    assert_eq!(path, "/api/users/u-1");
    assert_eq!(body["hwid"], "");
    assert_eq!(body["enabled"], 0);
    let cached = dash.users().get(&"u-1".to_string()).unwrap();
    assert_eq!(cached.hwid, "");
    assert_eq!(cached.enabled, Flag::OFF);

    dash.delete_user("u-2").await.unwrap();
    let names: Vec<_> = dash.users().iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["neo"]);
    assert_eq!(fake.deleted.lock().unwrap().as_slice(), ["/api/users/u-2"]);
}

#[tokio::test]
async fn subscription_update_patches_and_delete_removes() {
    let (fake, mut dash) = logged_in().await;
    dash.load_subscriptions("app-1").await.unwrap();

    let update = UserSubscriptionUpdate {
        name: "Pro+".into(),
        level: 3,
    };
    dash.update_subscription(2, &update).await.unwrap();
    assert_eq!(
        fake.updated.lock().unwrap().as_slice(),
        [("/api/userSubs/2".to_string(), json!({ "name": "Pro+", "level": 3 }))]
    );
    let cached = dash.subscriptions().get(&2).unwrap();
    assert_eq!((cached.name.as_str(), cached.level), ("Pro+", 3));

    dash.delete_subscription(1).await.unwrap();
    let names: Vec<_> = dash.subscriptions().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Pro+"]);
    assert_eq!(fake.deleted.lock().unwrap().as_slice(), ["/api/userSubs/1"]);
}

#[tokio::test]
async fn chat_message_is_stamped_with_username_and_time() {
    let (fake, mut dash) = logged_in().await;
    let sent = dash.send_chat_message("hello", 1).await.unwrap();
    assert_eq!(sent.id, 77);
    assert_eq!(sent.username, "lander");
    assert_eq!(sent.chat_id, 1);
    let stamped = sent.date.parse().unwrap();
    let now = blitzware_core::Timestamp::now().parse().unwrap();
    assert!((now - stamped).num_seconds().abs() < 60);
    assert_eq!(dash.chat().as_slice(), [sent]);

    dash.delete_chat_message(77).await.unwrap();
    assert!(dash.chat().is_empty());
    assert_eq!(fake.deleted.lock().unwrap().as_slice(), ["/api/chatMsgs/77"]);
}

#[tokio::test]
async fn chat_requires_login() {
    let (_fake, mut dash) = dashboard().await;
    assert!(matches!(
        dash.send_chat_message("hello", 1).await,
        Err(ClientError::NotAuthenticated)
    ));
}

#[tokio::test]
async fn upload_sends_file_part_and_appends() {
    let (_fake, mut dash) = logged_in().await;
    let file = dash
        .upload_file("app-1", "loader.dll", vec![0u8; 1536])
        .await
        .unwrap();
    assert_eq!(file.name, "loader.dll");
    assert_eq!(file.size_bytes(), Some(1536));
    assert_eq!(file.display_size(), "1.50 KB");
    assert_eq!(file.application.id, "app-1");
    assert_eq!(dash.files().as_slice(), [file]);
}

#[tokio::test]
async fn account_and_app_logs_list_and_delete() {
    let (fake, mut dash) = logged_in().await;
    dash.load_logs().await.unwrap();
    assert!(dash.logs().iter().all(|l| l.username == "lander"));
    dash.delete_log(1).await.unwrap();
    let ids: Vec<_> = dash.logs().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![2]);

    dash.load_app_logs("app-1").await.unwrap();
    assert_eq!(dash.app_logs().len(), 1);
    dash.delete_app_log(10).await.unwrap();
    assert!(dash.app_logs().is_empty());

    assert_eq!(
        fake.deleted.lock().unwrap().as_slice(),
        ["/api/logs/1", "/api/appLogs/10"]
    );
}

// =============================================================================
// Error mapping and request state
// =============================================================================

#[tokio::test]
async fn non_json_error_body_is_synthesised_from_status() {
    let (_fake, mut dash) = logged_in().await;
    let err = dash.load_users("app-down").await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    let last = dash.last_error().unwrap();
    assert_eq!(last.code, "HTTP_502");
    assert_eq!(dash.request_state(), RequestState::Error);
    assert!(dash.users().is_empty());
}

#[tokio::test]
async fn error_after_success_never_leaves_stale_success() {
    let (_fake, mut dash) = logged_in().await;
    dash.load_applications().await.unwrap();
    assert_eq!(dash.request_state(), RequestState::Success);
    dash.load_users("app-down").await.unwrap_err();
    assert_eq!(dash.request_state(), RequestState::Error);

    let history = dash.api().tracker().history().await;
    let states: Vec<_> = history.iter().map(|r| r.state).collect();
    assert_eq!(
        states,
        vec![RequestState::Success, RequestState::Success, RequestState::Error]
    );
}

#[tokio::test]
async fn in_flight_call_reports_pending_then_decode_error() {
    let (fake, dash) = logged_in().await;
    let api = dash.shared_api();
    let mut rx = dash.subscribe();
    let _ = rx.borrow_and_update();

    let call = tokio::spawn(async move {
        ResourceClient::<Applications>::new(&api)
            .get(&"app-9".to_string())
            .await
    });

    rx.changed().await.unwrap();
    let record = rx.borrow_and_update().clone().unwrap();
    assert_eq!(record.state, RequestState::Pending);
    assert_eq!(dash.request_state(), RequestState::Pending);

    fake.release.notify_one();
    let result = call.await.unwrap();
    // `{"id": ...}` is not an application: the decode failure is local.
    let err = result.unwrap_err();
    assert_eq!(err.to_body().code, blitzware_core::error::CATCH_ERROR);
    assert_eq!(dash.request_state(), RequestState::Error);
}
