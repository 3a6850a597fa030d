use secrecy::{ExposeSecret as _, SecretString};
use serde::{Deserialize, Serialize};

/// A refresh token from the identity token service.
#[derive(Debug, Clone)]
pub struct RefreshToken(SecretString);

impl RefreshToken {
    /// Exposes the token as a string.
    #[must_use]
    pub fn expose_token(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Serialize for RefreshToken {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.expose_token())
    }
}

impl<'de> Deserialize<'de> for RefreshToken {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::from)
    }
}

impl From<&str> for RefreshToken {
    fn from(value: &str) -> Self {
        Self(SecretString::from(value))
    }
}

impl From<String> for RefreshToken {
    fn from(value: String) -> Self {
        Self(SecretString::from(value))
    }
}

impl From<SecretString> for RefreshToken {
    fn from(value: SecretString) -> Self {
        Self(value)
    }
}
