#[derive(serde::Deserialize, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    /// HMAC key for issued tokens.
    pub secret: String,
    /// Token lifetime, e.g. `365d` or `12h`.
    pub expires_in: String,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("secret", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}
