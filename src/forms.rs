use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Debug, Serialize)]
struct SubmissionPayload<'a> {
    access_key: &'a str,
    #[serde(flatten)]
    fields: &'a ContactFields,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FormsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

impl FormsResponse {
    pub fn into_result(self) -> Result<(), FormError> {
        if self.success {
            return Ok(());
        }
        let message = self
            .message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| "Submission failed".to_string());
        Err(FormError::Rejected(message))
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FormError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("response decode failed: {0}")]
    Decode(String),
    #[error("{0}")]
    Rejected(String),
}

fn encode_payload(access_key: &str, fields: &ContactFields) -> Result<String, FormError> {
    serde_json::to_string(&SubmissionPayload { access_key, fields })
        .map_err(|err| FormError::Transport(format!("payload encode failed: {err}")))
}

pub async fn submit_contact(
    endpoint: &str,
    access_key: &str,
    fields: &ContactFields,
) -> Result<(), FormError> {
    let body = encode_payload(access_key, fields)?;
    let response = Request::post(endpoint)
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .body(body)
        .map_err(|err| FormError::Transport(err.to_string()))?
        .send()
        .await
        .map_err(|err| FormError::Transport(err.to_string()))?;

    response
        .json::<FormsResponse>()
        .await
        .map_err(|err| FormError::Decode(err.to_string()))?
        .into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn payload_flattens_fields_next_to_access_key() {
        let fields = ContactFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "Nice site".into(),
        };
        let encoded: Value = serde_json::from_str(&encode_payload("key-123", &fields).unwrap()).unwrap();
        assert_eq!(
            encoded,
            json!({
                "access_key": "key-123",
                "name": "Ada",
                "email": "ada@example.com",
                "subject": "Hello",
                "message": "Nice site",
            })
        );
    }

    #[test]
    fn success_flag_maps_to_ok() {
        let response: FormsResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(response.into_result(), Ok(()));
    }

    #[test]
    fn failure_flag_carries_message() {
        let response: FormsResponse =
            serde_json::from_str(r#"{"success":false,"message":"x"}"#).unwrap();
        assert_eq!(response.into_result(), Err(FormError::Rejected("x".into())));
    }

    #[test]
    fn failure_without_message_gets_generic_text() {
        let response: FormsResponse = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert_eq!(
            response.into_result(),
            Err(FormError::Rejected("Submission failed".into()))
        );
    }
}
