use super::{MessageType, ParameterBag, ParameterValue, parameters};

/// Outbound protocol message.
///
/// A response is an error response exactly when its `error` parameter is a
/// non-empty string. Status codes and delivery decisions key off that alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtocolResponse {
    message_type: Option<MessageType>,
    parameters: ParameterBag,
}

impl ProtocolResponse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an error response carrying the standard error fields.
    pub fn error_response(
        error: impl Into<String>,
        description: Option<String>,
        uri: Option<String>,
    ) -> Self {
        let mut response = Self::new();
        response.set_error(Some(error.into()));
        response.set_error_description(description);
        response.set_error_uri(uri);
        response
    }

    pub fn message_type(&self) -> Option<MessageType> {
        self.message_type
    }

    pub fn set_message_type(&mut self, message_type: MessageType) {
        self.message_type = Some(message_type);
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

    pub fn is_error(&self) -> bool {
        self.error().is_some_and(|error| !error.is_empty())
    }

    pub fn error(&self) -> Option<&str> {
        self.parameters.get_str(parameters::ERROR)
    }

    pub fn set_error(&mut self, value: Option<String>) {
        self.parameters.set_str(parameters::ERROR, value);
    }

    pub fn error_description(&self) -> Option<&str> {
        self.parameters.get_str(parameters::ERROR_DESCRIPTION)
    }

    pub fn set_error_description(&mut self, value: Option<String>) {
        self.parameters
            .set_str(parameters::ERROR_DESCRIPTION, value);
    }

    pub fn error_uri(&self) -> Option<&str> {
        self.parameters.get_str(parameters::ERROR_URI)
    }

    pub fn set_error_uri(&mut self, value: Option<String>) {
        self.parameters.set_str(parameters::ERROR_URI, value);
    }

    pub fn state(&self) -> Option<&str> {
        self.parameters.get_str(parameters::STATE)
    }

    pub fn set_state(&mut self, value: Option<String>) {
        self.parameters.set_str(parameters::STATE, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_discriminant() {
        let mut response = ProtocolResponse::new();
        assert!(!response.is_error());

        response.set_error(Some(String::new()));
        assert!(!response.is_error());

        response.set_error(Some("invalid_request".to_string()));
        assert!(response.is_error());
    }

    #[test]
    fn test_error_response_skips_missing_fields() {
        let response = ProtocolResponse::error_response("access_denied", None, None);

        assert_eq!(response.error(), Some("access_denied"));
        assert!(!response.parameters().contains("error_description"));
        assert!(!response.parameters().contains("error_uri"));
        assert_eq!(response.message_type(), None);
    }
}
