//! The uniform response wrapper every backend endpoint uses.

use serde::Deserialize;

use crate::api::ApiError;

/// `{success, data?, count?, message?, error?}` as returned by every
/// endpoint. Callers unwrap `data`; a present `error` string is the
/// user-facing failure message.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub count: Option<u64>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// Unwraps the payload, turning a backend-reported failure into
    /// [`ApiError::Backend`] with the backend's message verbatim.
    pub fn into_data(self) -> Result<T, ApiError> {
        if let Some(error) = self.error {
            return Err(ApiError::Backend(error));
        }

        if !self.success {
            let message = self
                .message
                .unwrap_or_else(|| "request failed".to_string());

            return Err(ApiError::Backend(message));
        }

        self.data.ok_or(ApiError::MissingData)
    }

    /// Like [`Envelope::into_data`] for endpoints that acknowledge without
    /// a payload: a reported failure is an error, a missing payload is not.
    pub fn into_unit(self) -> Result<(), ApiError> {
        if let Some(error) = self.error {
            return Err(ApiError::Backend(error));
        }

        if !self.success {
            let message = self
                .message
                .unwrap_or_else(|| "request failed".to_string());

            return Err(ApiError::Backend(message));
        }

        Ok(())
    }
}

impl<T> Envelope<Vec<T>> {
    /// Like [`Envelope::into_data`], but a successful response without a
    /// payload yields an empty list, matching list endpoints that omit
    /// `data` when there is nothing to return.
    pub fn into_list(self) -> Result<Vec<T>, ApiError> {
        if let Some(error) = self.error {
            return Err(ApiError::Backend(error));
        }

        if !self.success {
            let message = self
                .message
                .unwrap_or_else(|| "request failed".to_string());

            return Err(ApiError::Backend(message));
        }

        Ok(self.data.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn unwraps_data_on_success() -> TestResult {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success": true, "data": 7, "count": 1}"#)?;

        assert_eq!(envelope.into_data()?, 7);

        Ok(())
    }

    #[test]
    fn surfaces_backend_error_verbatim() -> TestResult {
        let envelope: Envelope<u32> =
            serde_json::from_str(r#"{"success": false, "error": "Product not found"}"#)?;

        let result = envelope.into_data();

        assert!(
            matches!(result, Err(ApiError::Backend(ref message)) if message == "Product not found"),
            "expected verbatim backend error, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn missing_data_on_success_is_an_error() -> TestResult {
        let envelope: Envelope<u32> = serde_json::from_str(r#"{"success": true}"#)?;

        let result = envelope.into_data();

        assert!(
            matches!(result, Err(ApiError::MissingData)),
            "expected MissingData, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn unit_ack_succeeds_without_a_payload() -> TestResult {
        let envelope: Envelope<()> = serde_json::from_str(r#"{"success": true}"#)?;

        envelope.into_unit()?;

        Ok(())
    }

    #[test]
    fn unit_ack_with_success_false_falls_back_to_the_message() -> TestResult {
        let envelope: Envelope<()> =
            serde_json::from_str(r#"{"success": false, "message": "Token revoked"}"#)?;

        let result = envelope.into_unit();

        assert!(
            matches!(result, Err(ApiError::Backend(ref message)) if message == "Token revoked"),
            "expected the envelope message, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn absent_list_payload_defaults_to_empty() -> TestResult {
        let envelope: Envelope<Vec<u32>> = serde_json::from_str(r#"{"success": true}"#)?;

        assert_eq!(envelope.into_list()?, Vec::<u32>::new());

        Ok(())
    }
}
