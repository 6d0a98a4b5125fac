use endsession_adapters::{ServiceSettings, config::test::APP_ADDRESS};
use endsession_service::LogoutService;
use reqwest::{Method, Response};

pub const LOGOUT_PATH: &str = "/connect/logout";
pub const CLIENT_ID: &str = "rp";
pub const REDIRECT_URI: &str = "https://rp.example/signed-out";

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_error_passthrough(false).await
    }

    pub async fn with_error_passthrough(enable_error_passthrough: bool) -> Self {
        let settings = ServiceSettings::from_json(
            &serde_json::json!({
                "logout": {
                    "path": LOGOUT_PATH,
                    "enable_error_passthrough": enable_error_passthrough,
                    "max_form_body_bytes": 4096
                },
                "clients": [
                    { "client_id": CLIENT_ID, "post_logout_redirect_uris": [REDIRECT_URI] }
                ]
            })
            .to_string(),
        )
        .expect("Failed to build test settings");

        let listener = tokio::net::TcpListener::bind(APP_ADDRESS)
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(LogoutService::from_settings(&settings).run_standalone(listener));

        // Redirects are asserted on, never followed
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            http_client,
        }
    }

    pub async fn get_logout(&self, query: &[(&str, &str)]) -> Response {
        self.http_client
            .get(format!("{}{}", &self.address, LOGOUT_PATH))
            .query(query)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_logout(&self, form: &[(&str, &str)]) -> Response {
        self.http_client
            .post(format!("{}{}", &self.address, LOGOUT_PATH))
            .form(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn logout_raw(
        &self,
        method: Method,
        content_type: Option<&str>,
        body: &str,
    ) -> Response {
        let mut request = self
            .http_client
            .request(method, format!("{}{}", &self.address, LOGOUT_PATH))
            .body(body.to_string());

        if let Some(content_type) = content_type {
            request = request.header("content-type", content_type);
        }

        request.send().await.expect("Failed to execute request.")
    }

    pub async fn get_health(&self) -> Response {
        self.http_client
            .get(format!("{}/health", &self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }
}

pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
}
