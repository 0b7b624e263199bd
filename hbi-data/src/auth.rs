//! Auth collaborator.
//!
//! The dashboards treat authentication as opaque. They only read the signed-in
//! user's role key, and only to choose labels and counts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

#[cfg(feature = "typescript")]
use ts_rs::TS;

use hbi_core::Actor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub role: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl AuthUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// The user as a workflow actor.
    pub fn actor(&self) -> Actor {
        Actor::new(self.full_name(), self.role.clone())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub is_loading: bool,
}

impl AuthState {
    pub fn signed_in(user: AuthUser) -> Self {
        Self {
            user: Some(user),
            is_loading: false,
        }
    }

    /// Role key of the signed-in user, if any.
    pub fn role(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.role.as_str())
    }
}

/// Supplies the current auth state.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn current_user(&self) -> AuthState;
}

/// Auth provider with a fixed, replaceable state.
#[derive(Debug, Default)]
pub struct StaticAuthProvider {
    state: RwLock<AuthState>,
}

impl StaticAuthProvider {
    pub fn new(state: AuthState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    pub fn signed_in(user: AuthUser) -> Self {
        Self::new(AuthState::signed_in(user))
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub async fn sign_in(&self, user: AuthUser) {
        *self.state.write().await = AuthState::signed_in(user);
    }

    pub async fn sign_out(&self) {
        *self.state.write().await = AuthState::default();
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn current_user(&self) -> AuthState {
        self.state.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> AuthUser {
        AuthUser {
            role: "estimator".to_string(),
            email: "jkim@hbi.example".to_string(),
            first_name: "Jordan".to_string(),
            last_name: "Kim".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_and_out() {
        let auth = StaticAuthProvider::anonymous();
        assert_eq!(auth.current_user().await.role(), None);

        auth.sign_in(estimator()).await;
        let state = auth.current_user().await;
        assert_eq!(state.role(), Some("estimator"));
        assert_eq!(state.user.unwrap().actor().name, "Jordan Kim");

        auth.sign_out().await;
        assert!(auth.current_user().await.user.is_none());
    }

    #[test]
    fn test_wire_shape() {
        let json = serde_json::to_value(AuthState::signed_in(estimator())).unwrap();
        assert_eq!(json["user"]["firstName"], "Jordan");
        assert_eq!(json["isLoading"], false);
    }
}
