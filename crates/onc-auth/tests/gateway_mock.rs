//! Gateway and flow tests against an in-process HTTP backend.
//!
//! Each test spins up a `tiny_http` server on a random port and points the
//! gateway at it; no external services are touched.

use std::thread;

use pretty_assertions::assert_eq;
use serde_json::json;

use onc_auth::{AuthError, AuthGateway, OrganizationRegistration, SessionStore};
use onc_core::{Identity, Role};

/// Serve every incoming request with `respond(path)` until the process
/// exits. Returns the server's base URL.
fn spawn_backend<F>(respond: F) -> String
where
    F: Fn(&str) -> (u16, String) + Send + 'static,
{
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind mock backend");
    let port = server
        .server_addr()
        .to_ip()
        .map(|a| a.port())
        .expect("mock backend port");

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let path = request.url().to_string();
            let (status, body) = respond(&path);
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(
                    tiny_http::Header::from_bytes("Content-Type", "application/json")
                        .expect("header"),
                );
            let _ = request.respond(response);
        }
    });

    format!("http://127.0.0.1:{port}")
}

/// Base URL nothing listens on; connections are refused immediately.
const UNREACHABLE: &str = "http://127.0.0.1:9";

fn doctor_login_body() -> String {
    json!({
        "token": "tok_doc",
        "profile": {
            "id": 7,
            "organizationId": 3,
            "firstName": "Ana",
            "lastName": "Reyes",
            "specialization": "Oncología",
            "licenseNumber": "MED-0001",
            "email": "doc@example.com",
            "available": true
        }
    })
    .to_string()
}

fn store_in(tmp: &tempfile::TempDir) -> SessionStore {
    let store = SessionStore::with_dir(tmp.path().to_path_buf());
    store.load_from_disk();
    store
}

#[tokio::test]
async fn login_with_doctor_shape_establishes_doctor_session() {
    let base = spawn_backend(|path| {
        if path == "/auth/login" {
            (200, doctor_login_body())
        } else {
            (404, String::new())
        }
    });
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);
    let gateway = AuthGateway::new(base);

    let identity = onc_auth::sign_in(&gateway, &store, "doc@example.com", "secret")
        .await
        .expect("sign in");

    assert_eq!(identity.role(), Role::Doctor);
    // The client navigates to the doctor dashboard after this login.
    assert_eq!(identity.dashboard_path(), "/doctor/dashboard");

    let state = store.state();
    assert!(state.is_authenticated);
    assert_eq!(state.identity, Some(identity));
    assert!(tmp.path().join("doctor_id").exists());
}

#[tokio::test]
async fn login_with_bad_credentials_is_invalid_credentials() {
    let base = spawn_backend(|_| (401, json!({"message": "bad credentials"}).to_string()));
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);
    let gateway = AuthGateway::new(base);

    let err = onc_auth::sign_in(&gateway, &store, "doc@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(!store.state().is_authenticated);
}

#[tokio::test]
async fn login_against_unreachable_backend_is_network_unavailable() {
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);
    let gateway = AuthGateway::new(UNREACHABLE);

    let err = onc_auth::sign_in(&gateway, &store, "doc@example.com", "secret")
        .await
        .unwrap_err();

    // Transport failure, not a credential failure: the caller shows a
    // connectivity message and offers a manual retry.
    assert!(matches!(err, AuthError::NetworkUnavailable(_)));
    assert!(!store.state().is_authenticated);
}

#[tokio::test]
async fn unrecognized_login_payload_fails_the_attempt() {
    let base = spawn_backend(|_| (200, json!({"message": "ok", "token": "tok"}).to_string()));
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);
    let gateway = AuthGateway::new(base);

    let err = onc_auth::sign_in(&gateway, &store, "doc@example.com", "secret")
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::UnrecognizedIdentityShape));
    assert!(!store.state().is_authenticated);
}

#[tokio::test]
async fn register_organization_establishes_organization_session() {
    let base = spawn_backend(|path| {
        if path != "/auth/register/organization" {
            return (404, String::new());
        }
        (
            201,
            json!({
                "organizationId": 3,
                "email": "org@example.com",
                "organizationName": "Clínica Norte",
                "country": "MX",
                "city": "Monterrey",
                "active": true,
                "emailVerified": false,
                "doctorQuota": 10,
                "patientQuota": 200,
                "token": "tok_org"
            })
            .to_string(),
        )
    });
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);
    let gateway = AuthGateway::new(base);

    let registration = OrganizationRegistration {
        email: "org@example.com".into(),
        password: "secret".into(),
        organization_name: "Clínica Norte".into(),
        country: "MX".into(),
        city: "Monterrey".into(),
    };
    let identity = onc_auth::register_organization(&gateway, &store, &registration)
        .await
        .expect("register");

    assert_eq!(identity.role(), Role::Organization);
    let Identity::Organization(org) = identity else {
        panic!("expected organization identity");
    };
    assert_eq!(org.name, "Clínica Norte");
    assert!(store.state().is_authenticated);
}

#[tokio::test]
async fn register_organization_duplicate_email_is_validation_error() {
    let base = spawn_backend(|_| {
        (
            422,
            json!({"errors": ["email already registered"]}).to_string(),
        )
    });
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);
    let gateway = AuthGateway::new(base);

    let registration = OrganizationRegistration {
        email: "org@example.com".into(),
        password: "secret".into(),
        organization_name: "Clínica Norte".into(),
        country: "MX".into(),
        city: "Monterrey".into(),
    };
    let err = onc_auth::register_organization(&gateway, &store, &registration)
        .await
        .unwrap_err();

    let AuthError::Validation { issues } = err else {
        panic!("expected validation error, got {err}");
    };
    assert_eq!(issues, vec!["email already registered"]);
    assert!(!store.state().is_authenticated);
}

#[tokio::test]
async fn logout_with_failing_network_still_clears_session() {
    // Establish a session against a working backend first.
    let base = spawn_backend(|_| (200, doctor_login_body()));
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);
    onc_auth::sign_in(&AuthGateway::new(base), &store, "doc@example.com", "secret")
        .await
        .expect("sign in");
    assert!(store.state().is_authenticated);

    // The logout notification cannot reach the backend; teardown proceeds.
    onc_auth::sign_out(&AuthGateway::new(UNREACHABLE), &store)
        .await
        .expect("sign out");

    assert!(!store.state().is_authenticated);
    assert!(!tmp.path().join("token").exists());
    assert!(!tmp.path().join("identity").exists());
    assert!(!tmp.path().join("doctor_id").exists());
}

#[tokio::test]
async fn login_landing_after_logout_is_discarded() {
    let base = spawn_backend(|_| (200, doctor_login_body()));
    let tmp = tempfile::TempDir::new().expect("tmp dir");
    let store = store_in(&tmp);
    let gateway = AuthGateway::new(base);

    // A teardown slips in between the epoch capture and the response: the
    // raw gateway payload normalizes fine, but the store refuses the write.
    let observed = store.epoch();
    let payload = gateway
        .login("doc@example.com", "secret")
        .await
        .expect("login round trip");
    let identity = onc_auth::normalize::normalize(&payload).expect("normalize");
    store.clear().expect("clear");

    let applied = store
        .set_identity_if_current(observed, &identity)
        .expect("guarded write");
    assert!(!applied);
    assert!(!store.state().is_authenticated);
}
