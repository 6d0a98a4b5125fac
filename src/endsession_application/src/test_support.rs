//! Test doubles for the transport and provider seams.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use endsession_core::{
    ApplyLogoutResponseContext, EndpointRequest, EndpointResponse, ExtractLogoutRequestContext,
    HandleLogoutRequestContext, LogoutProvider, Stage, StageOutcome, TransportError,
    ValidateLogoutRequestContext,
};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy)]
enum BodyMode {
    Ready,
    Stalling,
    Failing,
}

pub struct MockEndpointRequest {
    method: String,
    headers: HashMap<String, String>,
    query: Option<String>,
    body: Vec<u8>,
    body_mode: BodyMode,
    body_reads: Arc<AtomicUsize>,
    cancellation: CancellationToken,
}

impl MockEndpointRequest {
    fn new(method: &str, query: Option<&str>, body: Vec<u8>) -> Self {
        Self {
            method: method.to_string(),
            headers: HashMap::new(),
            query: query.map(str::to_string),
            body,
            body_mode: BodyMode::Ready,
            body_reads: Arc::new(AtomicUsize::new(0)),
            cancellation: CancellationToken::new(),
        }
    }

    pub fn get(query: Option<&str>) -> Self {
        Self::new("GET", query, Vec::new())
    }

    pub fn post(content_type: Option<&str>, body: &str) -> Self {
        Self::post_bytes(content_type, body.as_bytes().to_vec())
    }

    pub fn post_bytes(content_type: Option<&str>, body: Vec<u8>) -> Self {
        let mut request = Self::new("POST", None, body);
        if let Some(content_type) = content_type {
            request
                .headers
                .insert("content-type".to_string(), content_type.to_string());
        }
        request
    }

    pub fn with_method(mut self, method: &str) -> Self {
        self.method = method.to_string();
        self
    }

    /// The body never arrives; the call is cancelled while waiting for it.
    pub fn stalling_body(mut self) -> Self {
        self.body_mode = BodyMode::Stalling;
        self
    }

    pub fn failing_body(mut self) -> Self {
        self.body_mode = BodyMode::Failing;
        self
    }

    pub fn body_reads(&self) -> Arc<AtomicUsize> {
        self.body_reads.clone()
    }
}

#[async_trait]
impl EndpointRequest for MockEndpointRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    async fn read_form_body(&mut self) -> Result<Vec<u8>, TransportError> {
        self.body_reads.fetch_add(1, Ordering::SeqCst);

        match self.body_mode {
            BodyMode::Ready => Ok(self.body.clone()),
            BodyMode::Stalling => {
                self.cancellation.cancel();
                std::future::pending().await
            }
            BodyMode::Failing => Err(TransportError::Body("connection reset".to_string())),
        }
    }

    fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }
}

#[derive(Debug, Default)]
pub struct MockEndpointResponse {
    pub status: Option<u16>,
    pub headers: HashMap<String, String>,
    pub body: Option<(String, String)>,
}

impl MockEndpointResponse {
    pub fn json_body(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|(_, body)| serde_json::from_str(body).ok())
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get("location").map(String::as_str)
    }

    pub fn is_untouched(&self) -> bool {
        self.status.is_none() && self.headers.is_empty() && self.body.is_none()
    }
}

impl EndpointResponse for MockEndpointResponse {
    fn set_status(&mut self, code: u16) {
        self.status = Some(code);
    }

    fn set_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_lowercase(), value.to_string());
    }

    fn write_body(&mut self, content_type: &str, body: String) {
        self.body = Some((content_type.to_string(), body));
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MockProviderError {
    #[error("Backing store unavailable")]
    Unavailable,
}

/// Provider whose hooks return preset outcomes.
///
/// Unset outcomes continue. A `Handled` outcome writes a `204` through the
/// transport, the way a real hook that answers the call would.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    pub extract: Option<StageOutcome>,
    pub validate: Option<StageOutcome>,
    pub handle: Option<StageOutcome>,
    pub apply: Option<StageOutcome>,
    /// Redirect target approved during Validate, whatever the outcome.
    pub validated_redirect_uri: Option<String>,
    /// Redirect target forced during Apply.
    pub apply_redirect_uri: Option<String>,
    pub apply_state: Option<String>,
    pub fail_at: Option<Stage>,
    /// Cancel the call from inside this stage and never return.
    pub cancel_at: Option<Stage>,
    pub calls: Arc<Mutex<Vec<Stage>>>,
}

impl ScriptedProvider {
    pub fn with_outcome(mut self, stage: Stage, outcome: StageOutcome) -> Self {
        let slot = match stage {
            Stage::Extract => &mut self.extract,
            Stage::Validate => &mut self.validate,
            Stage::Handle => &mut self.handle,
            Stage::Apply => &mut self.apply,
        };
        *slot = Some(outcome);
        self
    }

    pub fn calls(&self) -> Vec<Stage> {
        self.calls.lock().unwrap().clone()
    }

    async fn enter(
        &self,
        stage: Stage,
        cancellation: &CancellationToken,
        transport: &mut dyn EndpointResponse,
    ) -> Result<StageOutcome, MockProviderError> {
        self.calls.lock().unwrap().push(stage);

        if self.fail_at == Some(stage) {
            return Err(MockProviderError::Unavailable);
        }

        if self.cancel_at == Some(stage) {
            cancellation.cancel();
            std::future::pending::<()>().await;
        }

        let outcome = match stage {
            Stage::Extract => &self.extract,
            Stage::Validate => &self.validate,
            Stage::Handle => &self.handle,
            Stage::Apply => &self.apply,
        }
        .clone()
        .unwrap_or(StageOutcome::Continue);

        if outcome == StageOutcome::Handled {
            transport.set_status(204);
        }

        Ok(outcome)
    }
}

#[async_trait]
impl LogoutProvider for ScriptedProvider {
    type Error = MockProviderError;

    async fn extract_logout_request(
        &self,
        context: &mut ExtractLogoutRequestContext<'_>,
    ) -> Result<StageOutcome, Self::Error> {
        self.enter(Stage::Extract, context.cancellation, &mut *context.transport)
            .await
    }

    async fn validate_logout_request(
        &self,
        context: &mut ValidateLogoutRequestContext<'_>,
    ) -> Result<StageOutcome, Self::Error> {
        let outcome = self
            .enter(Stage::Validate, context.cancellation, &mut *context.transport)
            .await?;
        context.post_logout_redirect_uri = self.validated_redirect_uri.clone();
        Ok(outcome)
    }

    async fn handle_logout_request(
        &self,
        context: &mut HandleLogoutRequestContext<'_>,
    ) -> Result<StageOutcome, Self::Error> {
        self.enter(Stage::Handle, context.cancellation, &mut *context.transport)
            .await
    }

    async fn apply_logout_response(
        &self,
        context: &mut ApplyLogoutResponseContext<'_>,
    ) -> Result<StageOutcome, Self::Error> {
        let outcome = self
            .enter(Stage::Apply, context.cancellation, &mut *context.transport)
            .await?;

        if let Some(uri) = &self.apply_redirect_uri {
            context.post_logout_redirect_uri = Some(uri.clone());
        }
        if let Some(state) = &self.apply_state {
            context.response.set_state(Some(state.clone()));
        }

        Ok(outcome)
    }
}
