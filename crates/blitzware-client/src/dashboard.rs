//! Dashboard store: the session plus cached collections a front-end renders.
//!
//! Every operation returns its own `Result`. Caches only change after the
//! server confirmed the call:
//! - list replaces the collection in server order
//! - create appends exactly the decoded item(s)
//! - update patches the cached item with the submitted body
//! - delete drops the first cached item with that id; an uncached id is a
//!   no-op on the cache
//!
//! Mutating operations take `&mut self`, so cache updates on one store never
//! interleave. Several stores may share one [`ApiClient`].

use std::fmt;
use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use blitzware_core::config::ApiConfig;
use blitzware_core::models::{
    AccountData, AppLog, Application, ApplicationUpdate, ChatMessage, File, License,
    LicenseUpdate, Log, LoginRequest, NewApplication, NewChatMessage, NewLicenses, NewUser,
    NewUserSubscription, OtpVerification, ProfilePictureUpdate, RegisterRequest,
    TwoFactorVerification, User, UserSubscription, UserSubscriptionUpdate, UserUpdate,
};
use blitzware_core::{AuthChallenge, ErrorBody, RequestState};

use crate::accounts::AccountsClient;
use crate::collection::{Collection, Identified};
use crate::error::ClientError;
use crate::http::ApiClient;
use crate::resource::{
    AppLogs, Applications, ChatMessages, Creatable, Deletable, Files, Licenses, Logs, Resource,
    ResourceClient, Updatable, UserSubscriptions, Users,
};
use crate::session::Session;
use crate::tracker::RequestRecord;

/// Result of a login attempt that reached the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated,
    /// The server wants a second factor; submit it with
    /// [`Dashboard::verify_two_factor`] or [`Dashboard::verify_otp`].
    ChallengeRequired(AuthChallenge),
}

pub struct Dashboard {
    api: Arc<ApiClient>,
    session: Session,
    applications: Collection<Application>,
    selected_application: Option<Application>,
    chat: Collection<ChatMessage>,
    logs: Collection<Log>,
    users: Collection<User>,
    subscriptions: Collection<UserSubscription>,
    licenses: Collection<License>,
    files: Collection<File>,
    app_logs: Collection<AppLog>,
}

impl Dashboard {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        Ok(Self::with_client(Arc::new(ApiClient::new(config)?)))
    }

    pub fn with_client(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            session: Session::new(),
            applications: Collection::new(),
            selected_application: None,
            chat: Collection::new(),
            logs: Collection::new(),
            users: Collection::new(),
            subscriptions: Collection::new(),
            licenses: Collection::new(),
            files: Collection::new(),
            app_logs: Collection::new(),
        }
    }

    /// Resume a session persisted from an earlier login.
    pub async fn restore(&mut self, data: AccountData) {
        self.adopt(data).await;
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn shared_api(&self) -> Arc<ApiClient> {
        Arc::clone(&self.api)
    }

    pub const fn session(&self) -> &Session {
        &self.session
    }

    // =========================================================================
    // Request observation
    // =========================================================================

    /// State of the most recently started call.
    pub fn request_state(&self) -> RequestState {
        self.api.tracker().latest_state()
    }

    /// Error of the most recently started call, if it failed.
    pub fn last_error(&self) -> Option<ErrorBody> {
        self.api.tracker().latest().and_then(|record| record.error)
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<RequestRecord>> {
        self.api.tracker().subscribe()
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Submit credentials.
    ///
    /// Any previous identity is dropped first, token and caches included;
    /// a failed attempt leaves the store logged out. A server error asking
    /// for a second factor is not an error here: the session parks in the
    /// matching challenge state and the outcome says which code to ask for.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<LoginOutcome, ClientError> {
        if self.session.account().is_some() || self.api.has_token().await {
            debug!("dropping previous session before login");
            self.forget_identity().await;
        }
        self.session.auth_mut().begin_login(username);
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let result = AccountsClient::new(&self.api).login(&request).await;
        match result {
            Ok(data) => {
                self.adopt(data).await;
                Ok(LoginOutcome::Authenticated)
            }
            Err(e) => match self.session.auth_mut().login_failed(&e.to_body()) {
                Some(challenge) => Ok(LoginOutcome::ChallengeRequired(challenge)),
                None => Err(e),
            },
        }
    }

    /// Answer a pending two-factor challenge.
    pub async fn verify_two_factor(&mut self, code: &str) -> Result<(), ClientError> {
        let username = self.awaiting_username(AuthChallenge::TwoFactor)?;
        let request = TwoFactorVerification {
            username,
            two_factor_code: code.to_string(),
        };
        let result = AccountsClient::new(&self.api)
            .verify_two_factor(&request)
            .await;
        self.finish_verification(result).await
    }

    /// Answer a pending email one-time-code challenge.
    pub async fn verify_otp(&mut self, otp: &str) -> Result<(), ClientError> {
        let username = self.awaiting_username(AuthChallenge::EmailOtp)?;
        let request = OtpVerification {
            username,
            otp: otp.to_string(),
        };
        let result = AccountsClient::new(&self.api).verify_otp(&request).await;
        self.finish_verification(result).await
    }

    /// Continue a login that a previous process left waiting on `challenge`.
    pub fn resume_challenge(&mut self, username: &str, challenge: AuthChallenge) {
        self.session.auth_mut().await_challenge(username, challenge);
    }

    fn awaiting_username(&self, challenge: AuthChallenge) -> Result<String, ClientError> {
        let auth = self.session.auth();
        match (auth.awaiting(), auth.username()) {
            (Some(awaiting), Some(username)) if awaiting == challenge => Ok(username.to_string()),
            _ => Err(ClientError::NoPendingChallenge(challenge)),
        }
    }

    async fn finish_verification(
        &mut self,
        result: Result<AccountData, ClientError>,
    ) -> Result<(), ClientError> {
        match result {
            Ok(data) => {
                self.adopt(data).await;
                Ok(())
            }
            Err(e) => {
                if let Some(challenge) = self.session.auth().verification_failed() {
                    debug!(challenge = challenge.code(), "verification rejected, still waiting");
                }
                Err(e)
            }
        }
    }

    async fn adopt(&mut self, data: AccountData) {
        self.api.set_token(Some(data.token.clone())).await;
        self.session.establish(data);
    }

    /// Create a dashboard account. Does not log in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        let request = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        AccountsClient::new(&self.api).register(&request).await?;
        info!(username, "account registered");
        Ok(())
    }

    /// Drop the token, the account and every cached collection.
    pub async fn logout(&mut self) {
        self.forget_identity().await;
        info!("logged out");
    }

    async fn forget_identity(&mut self) {
        self.api.set_token(None).await;
        self.session.clear();
        self.applications.clear();
        self.selected_application = None;
        self.chat.clear();
        self.logs.clear();
        self.users.clear();
        self.subscriptions.clear();
        self.licenses.clear();
        self.files.clear();
        self.app_logs.clear();
    }

    /// Re-fetch the account, replacing the cached one wholesale.
    pub async fn refresh_account(&mut self) -> Result<(), ClientError> {
        let id = self.session.account_id()?.to_string();
        let account = AccountsClient::new(&self.api).get(&id).await?;
        self.session.replace_account(account);
        Ok(())
    }

    /// Upload a new base64-encoded profile picture.
    pub async fn update_profile_picture(&mut self, picture: String) -> Result<(), ClientError> {
        let id = self.session.account_id()?.to_string();
        let update = ProfilePictureUpdate {
            profile_picture: picture,
        };
        AccountsClient::new(&self.api)
            .update_profile_picture(&id, &update)
            .await?;
        if let Some(account) = self.session.account_mut() {
            account.profile_picture = Some(update.profile_picture);
        }
        Ok(())
    }

    // =========================================================================
    // Applications
    // =========================================================================

    pub const fn applications(&self) -> &Collection<Application> {
        &self.applications
    }

    pub const fn selected_application(&self) -> Option<&Application> {
        self.selected_application.as_ref()
    }

    /// Load the logged-in account's applications.
    pub async fn load_applications(&mut self) -> Result<(), ClientError> {
        let account_id = self.session.account_id()?.to_string();
        reload::<Applications>(&self.api, &mut self.applications, account_id).await
    }

    /// Fetch one application into the selected slot.
    pub async fn select_application(&mut self, id: &str) -> Result<&Application, ClientError> {
        let app = ResourceClient::<Applications>::new(&self.api)
            .get(&id.to_owned())
            .await?;
        Ok(self.selected_application.insert(app))
    }

    pub async fn create_application(&mut self, name: &str) -> Result<Application, ClientError> {
        let body = NewApplication {
            name: name.to_string(),
            account_id: self.session.account_id()?.to_string(),
        };
        let app = create::<Applications>(&self.api, &body).await?;
        self.applications.push(app.clone());
        Ok(app)
    }

    pub async fn update_application(
        &mut self,
        id: &str,
        update: &ApplicationUpdate,
    ) -> Result<(), ClientError> {
        let id = id.to_owned();
        patch::<Applications>(&self.api, &mut self.applications, &id, update).await?;
        if let Some(selected) = self.selected_application.as_mut().filter(|a| a.id == id) {
            selected.apply_update(update);
        }
        Ok(())
    }

    pub async fn delete_application(&mut self, id: &str) -> Result<(), ClientError> {
        let id = id.to_owned();
        remove::<Applications>(&self.api, &mut self.applications, &id).await?;
        if self.selected_application.as_ref().is_some_and(|a| a.id == id) {
            self.selected_application = None;
        }
        Ok(())
    }

    // =========================================================================
    // Chat and account logs
    // =========================================================================

    pub const fn chat(&self) -> &Collection<ChatMessage> {
        &self.chat
    }

    pub async fn load_chat(&mut self, chat_id: i64) -> Result<(), ClientError> {
        reload::<ChatMessages>(&self.api, &mut self.chat, chat_id).await
    }

    /// Post as the logged-in account, stamped with the current time.
    pub async fn send_chat_message(
        &mut self,
        message: &str,
        chat_id: i64,
    ) -> Result<ChatMessage, ClientError> {
        let body = NewChatMessage::now(self.session.username()?, message, chat_id);
        let sent = create::<ChatMessages>(&self.api, &body).await?;
        self.chat.push(sent.clone());
        Ok(sent)
    }

    pub async fn delete_chat_message(&mut self, id: i64) -> Result<(), ClientError> {
        remove::<ChatMessages>(&self.api, &mut self.chat, &id).await
    }

    pub const fn logs(&self) -> &Collection<Log> {
        &self.logs
    }

    /// Load the logged-in account's activity log.
    pub async fn load_logs(&mut self) -> Result<(), ClientError> {
        let username = self.session.username()?.to_string();
        reload::<Logs>(&self.api, &mut self.logs, username).await
    }

    pub async fn delete_log(&mut self, id: i64) -> Result<(), ClientError> {
        remove::<Logs>(&self.api, &mut self.logs, &id).await
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub const fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub async fn load_users(&mut self, application_id: &str) -> Result<(), ClientError> {
        reload::<Users>(&self.api, &mut self.users, application_id).await
    }

    pub async fn create_user(&mut self, body: &NewUser) -> Result<User, ClientError> {
        let user = create::<Users>(&self.api, body).await?;
        self.users.push(user.clone());
        Ok(user)
    }

    pub async fn update_user(&mut self, id: &str, update: &UserUpdate) -> Result<(), ClientError> {
        patch::<Users>(&self.api, &mut self.users, &id.to_owned(), update).await
    }

    pub async fn delete_user(&mut self, id: &str) -> Result<(), ClientError> {
        remove::<Users>(&self.api, &mut self.users, &id.to_owned()).await
    }

    // =========================================================================
    // User subscriptions
    // =========================================================================

    pub const fn subscriptions(&self) -> &Collection<UserSubscription> {
        &self.subscriptions
    }

    pub async fn load_subscriptions(&mut self, application_id: &str) -> Result<(), ClientError> {
        reload::<UserSubscriptions>(&self.api, &mut self.subscriptions, application_id).await
    }

    pub async fn create_subscription(
        &mut self,
        body: &NewUserSubscription,
    ) -> Result<UserSubscription, ClientError> {
        let sub = create::<UserSubscriptions>(&self.api, body).await?;
        self.subscriptions.push(sub.clone());
        Ok(sub)
    }

    pub async fn update_subscription(
        &mut self,
        id: i64,
        update: &UserSubscriptionUpdate,
    ) -> Result<(), ClientError> {
        patch::<UserSubscriptions>(&self.api, &mut self.subscriptions, &id, update).await
    }

    pub async fn delete_subscription(&mut self, id: i64) -> Result<(), ClientError> {
        remove::<UserSubscriptions>(&self.api, &mut self.subscriptions, &id).await
    }

    // =========================================================================
    // Licenses
    // =========================================================================

    pub const fn licenses(&self) -> &Collection<License> {
        &self.licenses
    }

    pub async fn load_licenses(&mut self, application_id: &str) -> Result<(), ClientError> {
        reload::<Licenses>(&self.api, &mut self.licenses, application_id).await
    }

    /// Generate a batch of keys; all of them are appended to the cache.
    pub async fn create_licenses(
        &mut self,
        body: &NewLicenses,
    ) -> Result<Vec<License>, ClientError> {
        let created = create::<Licenses>(&self.api, body).await?;
        debug!(count = created.len(), "licenses generated");
        self.licenses.extend(created.iter().cloned());
        Ok(created)
    }

    pub async fn update_license(
        &mut self,
        id: &str,
        update: &LicenseUpdate,
    ) -> Result<(), ClientError> {
        patch::<Licenses>(&self.api, &mut self.licenses, &id.to_owned(), update).await
    }

    pub async fn delete_license(&mut self, id: &str) -> Result<(), ClientError> {
        remove::<Licenses>(&self.api, &mut self.licenses, &id.to_owned()).await
    }

    // =========================================================================
    // Files and application logs
    // =========================================================================

    pub const fn files(&self) -> &Collection<File> {
        &self.files
    }

    pub async fn load_files(&mut self, application_id: &str) -> Result<(), ClientError> {
        reload::<Files>(&self.api, &mut self.files, application_id).await
    }

    pub async fn upload_file(
        &mut self,
        application_id: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<File, ClientError> {
        let file = ResourceClient::<Files>::new(&self.api)
            .upload(application_id, file_name, contents)
            .await?;
        self.files.push(file.clone());
        Ok(file)
    }

    pub async fn delete_file(&mut self, id: &str) -> Result<(), ClientError> {
        remove::<Files>(&self.api, &mut self.files, &id.to_owned()).await
    }

    pub const fn app_logs(&self) -> &Collection<AppLog> {
        &self.app_logs
    }

    pub async fn load_app_logs(&mut self, application_id: &str) -> Result<(), ClientError> {
        reload::<AppLogs>(&self.api, &mut self.app_logs, application_id).await
    }

    pub async fn delete_app_log(&mut self, id: i64) -> Result<(), ClientError> {
        remove::<AppLogs>(&self.api, &mut self.app_logs, &id).await
    }
}

impl fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dashboard")
            .field("base_url", &self.api.base_url())
            .field("auth", self.session.auth())
            .field("applications", &self.applications.len())
            .field("users", &self.users.len())
            .field("licenses", &self.licenses.len())
            .finish_non_exhaustive()
    }
}

// =========================================================================
// Cache helpers
// =========================================================================

async fn reload<R: Resource>(
    api: &ApiClient,
    cache: &mut Collection<R::Item>,
    scope: impl fmt::Display,
) -> Result<(), ClientError> {
    let items = ResourceClient::<R>::new(api).list(scope).await?;
    debug!(resource = R::COLLECTION, count = items.len(), "collection loaded");
    cache.replace(items);
    Ok(())
}

async fn create<R: Creatable>(api: &ApiClient, body: &R::New) -> Result<R::Created, ClientError> {
    ResourceClient::<R>::new(api).create(body).await
}

async fn patch<R: Updatable>(
    api: &ApiClient,
    cache: &mut Collection<R::Item>,
    id: &<R::Item as Identified>::Id,
    update: &R::Update,
) -> Result<(), ClientError> {
    ResourceClient::<R>::new(api).update(id, update).await?;
    if !cache.patch(id, |item| R::apply(item, update)) {
        debug!(resource = R::COLLECTION, id = %id.to_string(), "updated item not cached");
    }
    Ok(())
}

async fn remove<R: Deletable>(
    api: &ApiClient,
    cache: &mut Collection<R::Item>,
    id: &<R::Item as Identified>::Id,
) -> Result<(), ClientError> {
    ResourceClient::<R>::new(api).delete(id).await?;
    if cache.remove(id).is_none() {
        debug!(resource = R::COLLECTION, id = %id.to_string(), "deleted item not cached");
    }
    Ok(())
}
