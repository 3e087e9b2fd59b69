//! Account endpoints: login, verification, registration, profile.

use blitzware_core::models::{
    Account, AccountData, LoginRequest, OtpVerification, ProfilePictureUpdate, RegisterRequest,
    TwoFactorVerification,
};

use crate::endpoint::Endpoint;
use crate::error::ClientError;
use crate::http::ApiClient;

const ACCOUNTS: &str = "accounts";

/// Typed calls under `/accounts`.
#[derive(Debug, Clone, Copy)]
pub struct AccountsClient<'a> {
    api: &'a ApiClient,
}

impl<'a> AccountsClient<'a> {
    pub const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// `POST /accounts/login`
    ///
    /// A server error may ask for secondary verification, see
    /// [`ClientError::challenge`].
    pub async fn login(&self, request: &LoginRequest) -> Result<AccountData, ClientError> {
        self.api
            .post_json(&Endpoint::new(ACCOUNTS).push("login"), request)
            .await
    }

    /// `POST /accounts/verifyLogin2FA`
    pub async fn verify_two_factor(
        &self,
        request: &TwoFactorVerification,
    ) -> Result<AccountData, ClientError> {
        self.api
            .post_json(&Endpoint::new(ACCOUNTS).push("verifyLogin2FA"), request)
            .await
    }

    /// `POST /accounts/verifyLoginOTP`
    pub async fn verify_otp(&self, request: &OtpVerification) -> Result<AccountData, ClientError> {
        self.api
            .post_json(&Endpoint::new(ACCOUNTS).push("verifyLoginOTP"), request)
            .await
    }

    /// `POST /accounts/register`. The new account still has to log in.
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        self.api
            .post_json_status(&Endpoint::new(ACCOUNTS).push("register"), request)
            .await
    }

    /// `GET /accounts/{id}`
    pub async fn get(&self, id: &str) -> Result<Account, ClientError> {
        self.api.get_json(&Endpoint::new(ACCOUNTS).push(id)).await
    }

    /// `PUT /accounts/profilePicture/{id}`
    pub async fn update_profile_picture(
        &self,
        id: &str,
        update: &ProfilePictureUpdate,
    ) -> Result<(), ClientError> {
        self.api
            .put_json(
                &Endpoint::new(ACCOUNTS).push("profilePicture").push(id),
                update,
            )
            .await
    }
}
