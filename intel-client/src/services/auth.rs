use crate::api::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::model::{LoginRequest, LoginResponse, User};

pub const LOGIN_FALLBACK_MESSAGE: &str = "Login failed. Please check your credentials.";

/// Exchanges credentials for a token and stores it in the session. Blank
/// credentials are rejected before any request is issued.
pub async fn login(
    client: &ApiClient,
    username: &str,
    password: &str,
) -> ClientResult<LoginResponse> {
    if username.is_empty() || password.is_empty() {
        return Err(ClientError::Validation(
            "Username and password are required".into(),
        ));
    }

    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    let response: LoginResponse = match client.post_json("/auth/login", &request).await {
        Ok(response) => response,
        Err(ClientError::Api {
            status: 401,
            message,
        }) => {
            return Err(ClientError::Authentication(
                message.unwrap_or_else(|| LOGIN_FALLBACK_MESSAGE.to_string()),
            ));
        }
        Err(error) => return Err(error),
    };

    client.session().store_token(&response.token);
    Ok(response)
}

pub fn logout(client: &ApiClient) {
    client.session().clear_token();
}

/// Token presence is the only signal; expiry surfaces as a 401 on the next
/// request.
pub fn is_authenticated(client: &ApiClient) -> bool {
    client.session().token().is_some()
}

pub async fn current_user(client: &ApiClient) -> ClientResult<User> {
    client.get_json("/auth/profile").await
}
