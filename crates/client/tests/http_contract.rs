use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};

use riskdesk_auth::{AuthContext, NewUser, Role, UserChanges, UserStatus};
use riskdesk_client::{AdminApi, ClientConfig, ClientError, HttpClient, ReinsuranceApi};
use riskdesk_core::{PolicyId, RecordId};

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    path: String,
    query: Option<String>,
    authorization: Option<String>,
    body: Option<Value>,
}

#[derive(Clone, Default)]
struct Backend {
    seen: Arc<Mutex<Vec<Captured>>>,
}

impl Backend {
    fn requests(&self) -> Vec<Captured> {
        self.seen.lock().unwrap().clone()
    }
}

struct TestServer {
    base_url: String,
    backend: Backend,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        riskdesk_observability::init();

        let backend = Backend::default();
        let app = Router::new().fallback(respond).with_state(backend.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            backend,
            handle,
        }
    }

    fn client(&self, auth: AuthContext) -> HttpClient {
        HttpClient::new(&ClientConfig::new(&self.base_url).unwrap(), auth).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn user_json(id: &str, username: &str) -> Value {
    json!({
        "_id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "role": "UNDERWRITER",
        "status": "ACTIVE",
        "lastLoginAt": null
    })
}

async fn respond(
    State(backend): State<Backend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();
    let body_json = serde_json::from_slice::<Value>(&body).ok();

    backend.seen.lock().unwrap().push(Captured {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body_json.clone(),
    });

    match (method, path.as_str()) {
        (Method::GET, "/api/users") => Json(json!({
            "data": [user_json("u1", "alice"), user_json("u2", "bob")]
        }))
        .into_response(),
        (Method::POST, "/api/users") => {
            let username = body_json
                .as_ref()
                .and_then(|b| b["username"].as_str())
                .unwrap_or_default()
                .to_string();
            if username == "taken" {
                return (
                    StatusCode::CONFLICT,
                    Json(json!({ "error": "conflict", "message": "Username already exists" })),
                )
                    .into_response();
            }
            if username == "dave" {
                return (
                    StatusCode::CREATED,
                    Json(json!({ "message": "User created", "user": user_json("u4", "dave") })),
                )
                    .into_response();
            }
            (StatusCode::CREATED, Json(user_json("u3", &username))).into_response()
        }
        (Method::PUT, "/api/users/u1") => Json(user_json("u1", "alice")).into_response(),
        (Method::PUT, "/api/users/u2") => StatusCode::NO_CONTENT.into_response(),
        (Method::DELETE, "/api/users/u1") => StatusCode::NO_CONTENT.into_response(),
        (Method::DELETE, _) => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        (Method::GET, "/api/risk-allocations") => Json(json!({
            "data": [{
                "_id": "ra1",
                "policyId": "POL-1",
                "allocations": [{
                    "reinsurerId": { "_id": "r1", "name": "Swiss Re" },
                    "treatyId": { "_id": "t1", "treatyName": "QS 2024", "treatyLimit": 80 },
                    "allocatedAmount": 100,
                    "allocatedPercentage": 40
                }],
                "retainedAmount": 150
            }]
        }))
        .into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

#[tokio::test]
async fn list_users_unwraps_data_envelope_and_sends_bearer() {
    let server = TestServer::spawn().await;
    let client = server.client(AuthContext::signed_in("root", Role::Admin, "tok-123"));

    let users = client.list_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].username, "alice");
    assert_eq!(users[1].id.as_str(), "u2");

    let seen = server.backend.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, Method::GET);
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer tok-123"));
}

#[tokio::test]
async fn anonymous_session_sends_no_authorization_header() {
    let server = TestServer::spawn().await;
    let client = server.client(AuthContext::anonymous());

    client.list_users().await.unwrap();
    assert_eq!(server.backend.requests()[0].authorization, None);
}

#[tokio::test]
async fn create_user_posts_username_and_password() {
    let server = TestServer::spawn().await;
    let client = server.client(AuthContext::anonymous());

    client
        .create_user(&NewUser {
            username: "carol".to_string(),
            email: "carol@example.com".to_string(),
            password: "pw".to_string(),
            role: Role::ClaimsAdjuster,
            status: UserStatus::Active,
        })
        .await
        .unwrap();

    let seen = server.backend.requests();
    let body = seen[0].body.clone().unwrap();
    assert_eq!(seen[0].method, Method::POST);
    assert_eq!(body["password"], "pw");
    assert_eq!(body["role"], "CLAIMS_ADJUSTER");
}

#[tokio::test]
async fn update_user_puts_changes_without_password_or_username() {
    let server = TestServer::spawn().await;
    let client = server.client(AuthContext::anonymous());

    client
        .update_user(
            &RecordId::parse("u1").unwrap(),
            &UserChanges {
                email: "alice@corp.example.com".to_string(),
                role: Role::Admin,
                status: UserStatus::Inactive,
            },
        )
        .await
        .unwrap();

    let seen = server.backend.requests();
    assert_eq!(seen[0].method, Method::PUT);
    assert_eq!(seen[0].path, "/api/users/u1");

    let body = seen[0].body.clone().unwrap();
    let object = body.as_object().unwrap();
    assert!(!object.contains_key("password"));
    assert!(!object.contains_key("username"));
    assert_eq!(body["status"], "INACTIVE");
}

#[tokio::test]
async fn update_accepted_with_no_content_is_a_success() {
    let server = TestServer::spawn().await;
    let client = server.client(AuthContext::anonymous());

    let result = client
        .update_user(
            &RecordId::parse("u2").unwrap(),
            &UserChanges {
                email: "bob@example.com".to_string(),
                role: Role::Underwriter,
                status: UserStatus::Active,
            },
        )
        .await;

    assert_eq!(result, Ok(()));
    assert_eq!(server.backend.requests()[0].method, Method::PUT);
}

#[tokio::test]
async fn create_accepted_with_wrapped_body_is_a_success() {
    let server = TestServer::spawn().await;
    let client = server.client(AuthContext::anonymous());

    let result = client
        .create_user(&NewUser {
            username: "dave".to_string(),
            email: "dave@example.com".to_string(),
            password: "pw".to_string(),
            role: Role::Underwriter,
            status: UserStatus::Active,
        })
        .await;

    assert_eq!(result, Ok(()));
}

#[tokio::test]
async fn delete_user_accepts_empty_success_response() {
    let server = TestServer::spawn().await;
    let client = server.client(AuthContext::anonymous());

    client.delete_user(&RecordId::parse("u1").unwrap()).await.unwrap();
    assert_eq!(server.backend.requests()[0].path, "/api/users/u1");
}

#[tokio::test]
async fn rejection_surfaces_server_message() {
    let server = TestServer::spawn().await;
    let client = server.client(AuthContext::anonymous());

    let err = client
        .create_user(&NewUser {
            username: "taken".to_string(),
            email: "t@example.com".to_string(),
            password: "pw".to_string(),
            role: Role::Underwriter,
            status: UserStatus::Active,
        })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ClientError::Api {
            status: 409,
            message: "Username already exists".to_string(),
        }
    );
    assert_eq!(err.server_message(), Some("Username already exists"));
}

#[tokio::test]
async fn plain_text_error_body_is_kept_as_message() {
    let server = TestServer::spawn().await;
    let client = server.client(AuthContext::anonymous());

    let err = client
        .delete_user(&RecordId::parse("u9").unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ClientError::Api {
            status: 500,
            message: "boom".to_string(),
        }
    );
}

#[tokio::test]
async fn risk_allocations_are_scoped_by_policy_query() -> anyhow::Result<()> {
    let server = TestServer::spawn().await;
    let client = server.client(AuthContext::anonymous());

    let records = client
        .risk_allocations(&PolicyId::parse("POL-1")?)
        .await?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].retained_amount, 150.0);
    assert!(records[0].exceeds_treaty_limits());

    let seen = server.backend.requests();
    assert_eq!(seen[0].path, "/api/risk-allocations");
    assert_eq!(seen[0].query.as_deref(), Some("policyId=POL-1"));
    Ok(())
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = ClientConfig::new(&format!("http://{}", addr)).unwrap();
    let client = HttpClient::new(&config, AuthContext::anonymous()).unwrap();

    let err = client.list_users().await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
}
