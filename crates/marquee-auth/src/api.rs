//! Auth API client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::AuthError;
use crate::Result;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Remote endpoints the session manager talks to.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> Result<()>;
}

pub struct HttpAuthApi {
    client: reqwest::Client,
    login_url: Url,
    register_url: Url,
}

impl HttpAuthApi {
    pub fn new(client: reqwest::Client, api_url: &Url) -> Result<Self> {
        Ok(Self {
            client,
            login_url: endpoint(api_url, "api/auth/login")?,
            register_url: endpoint(api_url, "api/auth/register")?,
        })
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let response = self
            .client
            .post(self.login_url.clone())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        Ok(response.json::<AuthResponse>().await?)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        let response = self
            .client
            .post(self.register_url.clone())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        tracing::debug!(username = %request.username, "Registration accepted");
        Ok(())
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Extract the optional `message` field from an error response body.
///
/// Empty messages count as absent.
pub async fn read_error_message(response: reqwest::Response) -> Option<String> {
    let body = response.text().await.ok()?;
    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

async fn api_error(response: reqwest::Response) -> AuthError {
    let status = response.status().as_u16();
    let message = read_error_message(response).await;
    AuthError::Api { status, message }
}

/// Append `path` to the API base, keeping any prefix the base already has.
pub fn endpoint(base: &Url, path: &str) -> std::result::Result<Url, url::ParseError> {
    let base = base.as_str().trim_end_matches('/');
    Url::parse(&format!("{base}/{path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> HttpAuthApi {
        let url = Url::parse(&server.uri()).unwrap();
        HttpAuthApi::new(reqwest::Client::new(), &url).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_prefix() {
        let base = Url::parse("https://movies.example.com/v2/").unwrap();
        assert_eq!(
            endpoint(&base, "api/auth/login").unwrap().as_str(),
            "https://movies.example.com/v2/api/auth/login"
        );

        let bare = Url::parse("http://localhost:8080").unwrap();
        assert_eq!(
            endpoint(&bare, "api/auth/register").unwrap().as_str(),
            "http://localhost:8080/api/auth/register"
        );
    }

    #[tokio::test]
    async fn test_login_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(json!({"username": "alice", "password": "hunter2"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc.def.ghi"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        let response = api
            .login(&LoginRequest {
                username: "alice".to_string(),
                password: "hunter2".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.token, "abc.def.ghi");
    }

    #[tokio::test]
    async fn test_login_rejection_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"message": "bad credentials"})),
            )
            .mount(&server)
            .await;

        let api = api_for(&server);
        let err = api
            .login(&LoginRequest {
                username: "alice".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(401));
        assert_eq!(err.message(), Some("bad credentials"));
    }

    #[tokio::test]
    async fn test_register_sends_camel_case_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .and(body_json(json!({
                "username": "bob",
                "password": "pw",
                "firstName": "Bob",
                "lastName": "Builder"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let api = api_for(&server);
        api.register(&RegisterRequest {
            username: "bob".to_string(),
            password: "pw".to_string(),
            first_name: "Bob".to_string(),
            last_name: "Builder".to_string(),
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_register_error_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(409))
            .mount(&server)
            .await;

        let api = api_for(&server);
        let err = api
            .register(&RegisterRequest {
                username: "bob".to_string(),
                password: "pw".to_string(),
                first_name: "Bob".to_string(),
                last_name: "Builder".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::Api { status: 409, message: None }));
    }
}
