use super::{LOGIN_PATH, ME_PATH, SIGNUP_PATH};
use crate::client::{ApiClient, ApiRequest};
use crate::credentials::CredentialPair;
use crate::types::{LoginRequest, SignupRequest, User};
use crate::Result;
use tracing::info;

impl ApiClient {
    /// Exchanges username and password for a token pair and stores it.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let request = ApiRequest::post(LOGIN_PATH)
            .anonymous()
            .json(&LoginRequest::new(username, password))?;
        let tokens: CredentialPair = self.request(request).await?;
        self.credentials.save(&tokens).await?;
        info!(username, "logged in");
        Ok(())
    }

    /// Creates an account and stores the token pair issued for it.
    pub async fn signup(&self, signup: &SignupRequest) -> Result<()> {
        let request = ApiRequest::post(SIGNUP_PATH).anonymous().json(signup)?;
        let tokens: CredentialPair = self.request(request).await?;
        self.credentials.save(&tokens).await?;
        info!(username = %signup.username, "signed up");
        Ok(())
    }

    /// Forgets the stored credentials.
    pub async fn logout(&self) -> Result<()> {
        self.credentials.clear().await?;
        info!("logged out");
        Ok(())
    }

    pub async fn me(&self) -> Result<User> {
        self.get(ME_PATH).await
    }

    pub async fn is_authenticated(&self) -> Result<bool> {
        self.credentials.is_authenticated().await
    }
}
