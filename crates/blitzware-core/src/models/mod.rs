//! DTOs mirrored from the dashboard API's JSON.
//!
//! Response types derive both `Serialize` and `Deserialize` so that they can
//! be cached on disk; request bodies only serialize.

mod account;
mod application;
mod chat;
mod file;
mod flag;
mod license;
mod log;
mod subscription;
mod user;

pub use account::{
    Account, AccountData, LoginRequest, OtpVerification, ProfilePictureUpdate, RegisterRequest,
    TwoFactorVerification,
};
pub use application::{Application, ApplicationRef, ApplicationUpdate, NewApplication};
pub use chat::{ChatMessage, NewChatMessage, GENERAL_CHAT_ID};
pub use file::File;
pub use flag::Flag;
pub use license::{License, LicenseUpdate, NewLicenses};
pub use log::{AppLog, Log};
pub use subscription::{NewUserSubscription, UserSubscription, UserSubscriptionUpdate};
pub use user::{NewUser, User, UserUpdate};
