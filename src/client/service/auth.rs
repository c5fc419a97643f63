use crate::client::api_client::ApiClient;
use crate::client::service::ServiceError;
use crate::model::User;

#[derive(Debug, Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Reject blank input locally, otherwise ask the server.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, ServiceError> {
        if username.trim().is_empty() {
            return Err(ServiceError::validation("Username cannot be empty."));
        }
        if password.is_empty() {
            return Err(ServiceError::validation("Password cannot be empty."));
        }
        Ok(self.api.login(username, password).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn blank_input_never_reaches_the_server() {
        // nothing listens on port 9, validation must answer first
        let service = AuthService::new(ApiClient::new("http://127.0.0.1:9").unwrap());

        let err = service.authenticate("   ", "secret").await.unwrap_err();
        assert_eq!(err.to_string(), "Username cannot be empty.");
        let err = service.authenticate("admin", "").await.unwrap_err();
        assert_eq!(err.to_string(), "Password cannot be empty.");
        assert!(matches!(err, ServiceError::Validation { .. }));
    }
}
