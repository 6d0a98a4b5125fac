use super::{MessageType, ParameterBag, ParameterValue, parameters};

/// Inbound protocol message.
///
/// The message type is fixed when the request is built by the decoder and cannot be
/// changed afterwards. The validated post-logout redirect URI is a stored property
/// of the request, not a protocol parameter: it is written once the Validate stage
/// has approved a target and is the value later stages redirect to.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolRequest {
    message_type: MessageType,
    parameters: ParameterBag,
    validated_post_logout_redirect_uri: Option<String>,
}

impl ProtocolRequest {
    pub fn new(message_type: MessageType, parameters: ParameterBag) -> Self {
        Self {
            message_type,
            parameters,
            validated_post_logout_redirect_uri: None,
        }
    }

    pub fn message_type(&self) -> MessageType {
        self.message_type
    }

    pub fn parameters(&self) -> &ParameterBag {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut ParameterBag {
        &mut self.parameters
    }

    pub fn get_parameter(&self, name: &str) -> Option<&ParameterValue> {
        self.parameters.get(name)
    }

    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<ParameterValue>) {
        self.parameters.set(name, value);
    }

    pub fn id_token_hint(&self) -> Option<&str> {
        self.parameters.get_str(parameters::ID_TOKEN_HINT)
    }

    pub fn set_id_token_hint(&mut self, value: Option<String>) {
        self.parameters.set_str(parameters::ID_TOKEN_HINT, value);
    }

    pub fn post_logout_redirect_uri(&self) -> Option<&str> {
        self.parameters.get_str(parameters::POST_LOGOUT_REDIRECT_URI)
    }

    pub fn set_post_logout_redirect_uri(&mut self, value: Option<String>) {
        self.parameters
            .set_str(parameters::POST_LOGOUT_REDIRECT_URI, value);
    }

    pub fn state(&self) -> Option<&str> {
        self.parameters.get_str(parameters::STATE)
    }

    pub fn set_state(&mut self, value: Option<String>) {
        self.parameters.set_str(parameters::STATE, value);
    }

    pub fn client_id(&self) -> Option<&str> {
        self.parameters.get_str(parameters::CLIENT_ID)
    }

    pub fn set_client_id(&mut self, value: Option<String>) {
        self.parameters.set_str(parameters::CLIENT_ID, value);
    }

    pub fn logout_hint(&self) -> Option<&str> {
        self.parameters.get_str(parameters::LOGOUT_HINT)
    }

    pub fn set_logout_hint(&mut self, value: Option<String>) {
        self.parameters.set_str(parameters::LOGOUT_HINT, value);
    }

    pub fn ui_locales(&self) -> Option<&str> {
        self.parameters.get_str(parameters::UI_LOCALES)
    }

    pub fn set_ui_locales(&mut self, value: Option<String>) {
        self.parameters.set_str(parameters::UI_LOCALES, value);
    }

    /// Redirect target approved by the Validate stage, if any.
    pub fn validated_post_logout_redirect_uri(&self) -> Option<&str> {
        self.validated_post_logout_redirect_uri.as_deref()
    }

    pub fn set_validated_post_logout_redirect_uri(&mut self, value: Option<String>) {
        self.validated_post_logout_redirect_uri = value;
    }
}
