use super::ClientError;

pub const DENIAL_MESSAGE: &str =
    "Access Denied: You lack authorization to perform this action.";

/// Confirmation step in front of add/update/delete actions.
///
/// This compares a client-held string against a fixed value in plain text. It
/// offers no security at all: the expected value ships with the client. Real
/// authorization is the server's bearer-token check (`API_TOKEN`).
#[derive(Debug, Clone)]
pub struct ConfirmationGuard {
    expected: String,
}

impl ConfirmationGuard {
    pub fn new(expected: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    pub fn check(&self, provided: Option<&str>) -> Result<(), ClientError> {
        if provided == Some(self.expected.as_str()) {
            Ok(())
        } else {
            Err(ClientError::AccessDenied(DENIAL_MESSAGE))
        }
    }
}
