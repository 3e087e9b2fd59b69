//! Who is logged in.

use blitzware_core::models::{Account, AccountData};
use blitzware_core::AuthState;

use crate::error::ClientError;

/// Current account, its bearer token and the login flow state.
///
/// The account is replaced wholesale on login and refresh, never merged.
#[derive(Debug, Clone, Default)]
pub struct Session {
    account: Option<Account>,
    token: Option<String>,
    auth: AuthState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt a login/verification response.
    pub fn establish(&mut self, data: AccountData) {
        self.auth.authenticated(&data.account.username);
        self.account = Some(data.account);
        self.token = Some(data.token);
    }

    pub fn replace_account(&mut self, account: Account) {
        self.account = Some(account);
    }

    pub fn clear(&mut self) {
        self.account = None;
        self.token = None;
        self.auth.logout();
    }

    pub const fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn account_mut(&mut self) -> Option<&mut Account> {
        self.account.as_mut()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub const fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn auth_mut(&mut self) -> &mut AuthState {
        &mut self.auth
    }

    pub const fn is_authenticated(&self) -> bool {
        self.auth.is_authenticated() && self.account.is_some()
    }

    /// Account id, or `NotAuthenticated`.
    pub fn account_id(&self) -> Result<&str, ClientError> {
        self.require_account().map(|a| a.id.as_str())
    }

    pub fn username(&self) -> Result<&str, ClientError> {
        self.require_account().map(|a| a.username.as_str())
    }

    fn require_account(&self) -> Result<&Account, ClientError> {
        if !self.auth.is_authenticated() {
            return Err(ClientError::NotAuthenticated);
        }
        self.account.as_ref().ok_or(ClientError::NotAuthenticated)
    }

    /// Current account and token, for persisting the session.
    pub fn account_data(&self) -> Option<AccountData> {
        match (&self.account, &self.token) {
            (Some(account), Some(token)) if self.auth.is_authenticated() => Some(AccountData {
                account: account.clone(),
                token: token.clone(),
            }),
            _ => None,
        }
    }
}
