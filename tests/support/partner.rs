//! Mock partner platform fixtures.

use partner_ingest::auth::Credentials;
use partner_ingest::fetch::QueryDescriptor;
use partner_ingest::transport::constants::{FORMS_CHILDREN_PATH, FORMS_ONLINE_PATH, LOGIN_PATH};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "tok-integration";
pub const COMPANY_ID: &str = "company-7";
pub const SESSION: &str = "sess-integration";

/// Credentials pointing at the mock server.
pub fn credentials(server: &MockServer) -> Credentials {
    Credentials {
        api_host: server.uri(),
        username: "operator".to_string(),
        password: "secret-pw".to_string(),
        company_id: COMPANY_ID.to_string(),
        session_token: SESSION.to_string(),
    }
}

/// Mounts a login that succeeds `times` times with the `{code, data}` envelope.
pub async fn mount_login(server: &MockServer, times: u64) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "SESSIONID=abc; Path=/; HttpOnly")
                .set_body_json(json!({"code": 200, "data": {"token": TOKEN}})),
        )
        .expect(times)
        .mount(server)
        .await;
}

/// Mounts a login that rejects the credentials.
pub async fn mount_rejected_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(LOGIN_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"code": 401, "err_msg": "invalid password"})),
        )
        .mount(server)
        .await;
}

/// Mounts the query endpoint for one descriptor.
pub async fn mount_query(server: &MockServer, descriptor: &QueryDescriptor, body: Value) {
    Mock::given(method("GET"))
        .and(path(FORMS_ONLINE_PATH))
        .and(query_param("form_head_uuid", descriptor.form_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts the child-table endpoint for one record and field.
pub async fn mount_children(server: &MockServer, record_id: &str, field: &str, rows: Value) {
    Mock::given(method("GET"))
        .and(path(FORMS_CHILDREN_PATH))
        .and(query_param("record_id", record_id))
        .and(query_param("field_uuid", field))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "success", "result": rows})),
        )
        .mount(server)
        .await;
}

/// Mounts a downloadable attachment.
pub async fn mount_file(server: &MockServer, file_path: &str, status: u16, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(file_path))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}
