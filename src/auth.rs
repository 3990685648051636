use crate::error::{EngineError, EngineResult};
use campa_api::client::{ApiResult, StoreClient, derive_principal};
use campa_api::{AuthSession, Identity, Role};
use log::{debug, warn};
use std::ops::RangeInclusive;

pub const ADMIN_ID: u32 = 0;
pub const BASE_ID_RANGE: RangeInclusive<u32> = 1..=10;

/// Credential-verification seam. The production implementation delegates to
/// the remote auth service; a local secret table can stand in behind the
/// same interface.
#[allow(async_fn_in_trait)]
pub trait Authenticator {
    async fn sign_in(&self, principal: &str, password: &str) -> ApiResult<AuthSession>;
}

impl Authenticator for StoreClient {
    async fn sign_in(&self, principal: &str, password: &str) -> ApiResult<AuthSession> {
        StoreClient::sign_in(self, principal, password).await
    }
}

/// Session gate with two states: unauthenticated, or authenticated as one
/// identity until an explicit logout.
pub struct AuthGate<A = StoreClient> {
    auth: A,
    current: Option<Identity>,
    epoch: u64,
}

impl<A: Authenticator> AuthGate<A> {
    pub fn new(auth: A) -> Self {
        Self {
            auth,
            current: None,
            epoch: 0,
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.current
    }

    /// Monotonic session counter, bumped on every login and logout. A
    /// completion handler that captured an earlier epoch is looking at a
    /// dead session and must discard its result.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Validate locally, then verify the credential remotely. Out-of-range
    /// ids and blank passwords are rejected before the auth service is
    /// contacted. Every remote rejection and transport error is presented
    /// as `InvalidCredentials`; the distinguishing cause goes to the log
    /// only.
    pub async fn login(&mut self, id: u32, password: &str, role: Role) -> EngineResult<Identity> {
        match role {
            Role::Admin if id != ADMIN_ID => {
                return Err(EngineError::Validation("Admin ID must be 0".into()));
            }
            Role::Base if !BASE_ID_RANGE.contains(&id) => {
                return Err(EngineError::Validation(
                    "Base ID must be between 1 and 10".into(),
                ));
            }
            _ => {}
        }

        if password.trim().is_empty() {
            return Err(EngineError::Validation("Password cannot be empty".into()));
        }

        let principal = derive_principal(role, id);
        match self.auth.sign_in(&principal, password).await {
            Ok(session) => {
                debug!(
                    "authenticated {principal} as {} {id} (token expires in {}s)",
                    role.label(),
                    session.expires_in
                );
                let identity = Identity { role, id };
                self.current = Some(identity);
                self.epoch += 1;
                Ok(identity)
            }
            Err(e) => {
                warn!("auth failure for {principal}: {e}");
                Err(EngineError::InvalidCredentials)
            }
        }
    }

    /// Discard the identity and invalidate any in-flight completion
    /// handlers via the epoch.
    pub fn logout(&mut self) {
        self.current = None;
        self.epoch += 1;
    }
}

/// Route-guard predicate: deny without an identity, deny on a role
/// mismatch, deny on an id mismatch.
pub fn access_allowed(
    current: Option<&Identity>,
    required_role: Option<Role>,
    required_id: Option<u32>,
) -> bool {
    let Some(identity) = current else {
        return false;
    };
    if required_role.is_some_and(|role| role != identity.role) {
        return false;
    }
    if required_id.is_some_and(|id| id != identity.id) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use campa_api::client::ApiError;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FakeAuth {
        secrets: HashMap<String, String>,
        calls: AtomicU32,
    }

    impl FakeAuth {
        fn with_default_secrets() -> Self {
            let mut secrets = HashMap::new();
            secrets.insert("admin@example.com".to_owned(), "adminpass".to_owned());
            for id in 1..=10 {
                secrets.insert(format!("base{id}@example.com"), format!("base{id}pass"));
            }
            Self {
                secrets,
                calls: AtomicU32::new(0),
            }
        }
    }

    impl Authenticator for FakeAuth {
        async fn sign_in(&self, principal: &str, password: &str) -> ApiResult<AuthSession> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.secrets.get(principal).map(String::as_str) == Some(password) {
                Ok(AuthSession {
                    access_token: "tok".into(),
                    expires_in: 3600,
                })
            } else {
                Err(ApiError::Auth("Invalid login credentials".into()))
            }
        }
    }

    fn gate() -> AuthGate<FakeAuth> {
        AuthGate::new(FakeAuth::with_default_secrets())
    }

    #[tokio::test]
    async fn admin_login_with_id_zero_succeeds() {
        let mut gate = gate();
        let identity = gate
            .login(0, "adminpass", Role::Admin)
            .await
            .expect("login should succeed");
        assert_eq!(
            identity,
            Identity {
                role: Role::Admin,
                id: 0
            }
        );
        assert_eq!(gate.current(), Some(identity));
    }

    #[tokio::test]
    async fn wrong_password_collapses_to_invalid_credentials() {
        let mut gate = gate();
        let err = gate
            .login(5, "wrongpass", Role::Base)
            .await
            .expect_err("login must fail");
        assert!(matches!(err, EngineError::InvalidCredentials));
        assert!(gate.current().is_none());
        assert_eq!(gate.auth.calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn out_of_range_base_id_is_rejected_without_a_remote_call() {
        let mut gate = gate();
        for id in [0, 11, 99] {
            let err = gate
                .login(id, "x", Role::Base)
                .await
                .expect_err("login must fail");
            assert!(err.is_validation(), "id {id}: got {err}");
        }
        assert_eq!(gate.auth.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn nonzero_admin_id_is_rejected_without_a_remote_call() {
        let mut gate = gate();
        let err = gate
            .login(3, "adminpass", Role::Admin)
            .await
            .expect_err("login must fail");
        assert!(err.is_validation(), "got {err}");
        assert_eq!(gate.auth.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn blank_password_is_rejected_without_a_remote_call() {
        let mut gate = gate();
        for password in ["", "   "] {
            let err = gate
                .login(2, password, Role::Base)
                .await
                .expect_err("login must fail");
            assert!(err.is_validation(), "got {err}");
        }
        assert_eq!(gate.auth.calls.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn logout_clears_the_identity_and_bumps_the_epoch() {
        let mut gate = gate();
        assert_eq!(gate.epoch(), 0);
        gate.login(4, "base4pass", Role::Base).await.unwrap();
        assert_eq!(gate.epoch(), 1);
        gate.logout();
        assert!(gate.current().is_none());
        assert_eq!(gate.epoch(), 2);
    }

    #[test]
    fn access_requires_an_identity() {
        assert!(!access_allowed(None, None, None));
        assert!(!access_allowed(None, Some(Role::Admin), Some(0)));
    }

    #[test]
    fn access_checks_role_and_id_independently() {
        let base4 = Identity {
            role: Role::Base,
            id: 4,
        };
        assert!(access_allowed(Some(&base4), None, None));
        assert!(access_allowed(Some(&base4), Some(Role::Base), None));
        assert!(access_allowed(Some(&base4), Some(Role::Base), Some(4)));
        assert!(!access_allowed(Some(&base4), Some(Role::Admin), None));
        assert!(!access_allowed(Some(&base4), Some(Role::Base), Some(5)));
        assert!(!access_allowed(Some(&base4), None, Some(0)));
    }
}
