//! Resource descriptors and the generic CRUD client.
//!
//! Each resource is a zero-sized marker describing where it lives and which
//! DTOs it uses. [`ResourceClient`] turns a descriptor into typed calls:
//!
//! | call      | request                                  |
//! |-----------|------------------------------------------|
//! | `list`    | `GET /{collection}[/{list_scope}]/{scope}` |
//! | `get`     | `GET /{collection}/{id}`                 |
//! | `create`  | `POST /{collection}`                     |
//! | `update`  | `PUT /{collection}/{id}`                 |
//! | `delete`  | `DELETE /{collection}/{id}`              |

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use blitzware_core::models::{
    AppLog, Application, ApplicationUpdate, ChatMessage, File, License, LicenseUpdate, Log,
    NewApplication, NewChatMessage, NewLicenses, NewUser, NewUserSubscription, User, UserSubscription,
    UserSubscriptionUpdate, UserUpdate,
};

use crate::collection::Identified;
use crate::endpoint::Endpoint;
use crate::error::ClientError;
use crate::http::ApiClient;

/// Server-side collection.
pub trait Resource {
    type Item: DeserializeOwned + Identified;

    /// First path segment, e.g. `applications`.
    const COLLECTION: &'static str;

    /// Segment between the collection and the list scope, e.g. `byAccId`.
    const LIST_SCOPE: Option<&'static str>;

    fn list_endpoint(scope: &str) -> Endpoint {
        let endpoint = Endpoint::new(Self::COLLECTION);
        match Self::LIST_SCOPE {
            Some(segment) => endpoint.push(segment).push(scope),
            None => endpoint.push(scope),
        }
    }

    fn item_endpoint(id: &<Self::Item as Identified>::Id) -> Endpoint {
        Endpoint::new(Self::COLLECTION).push(id.to_string())
    }
}

/// Resource accepting `POST /{collection}`.
pub trait Creatable: Resource {
    type New: Serialize;
    /// What the server answers with: usually one item.
    type Created: DeserializeOwned;
}

/// Resource accepting `PUT /{collection}/{id}`.
pub trait Updatable: Resource {
    type Update: Serialize;

    /// Apply a successful update to a cached copy.
    fn apply(item: &mut Self::Item, update: &Self::Update);
}

/// Resource accepting `DELETE /{collection}/{id}`.
pub trait Deletable: Resource {}

macro_rules! resource {
    ($(#[$meta:meta])* $name:ident, $item:ty, $collection:literal, $scope:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Resource for $name {
            type Item = $item;
            const COLLECTION: &'static str = $collection;
            const LIST_SCOPE: Option<&'static str> = $scope;
        }

        impl Deletable for $name {}
    };
}

resource!(
    /// Listed per dashboard account id.
    Applications, Application, "applications", Some("byAccId")
);
resource!(
    /// Listed per chat channel id.
    ChatMessages, ChatMessage, "chatMsgs", Some("chat")
);
resource!(
    /// Listed per account username.
    Logs, Log, "logs", None
);
resource!(
    /// Listed per application id.
    Users, User, "users", Some("application")
);
resource!(
    /// Listed per application id.
    UserSubscriptions, UserSubscription, "userSubs", Some("application")
);
resource!(
    /// Listed per application id.
    Licenses, License, "licenses", Some("application")
);
resource!(
    /// Listed per application id.
    Files, File, "files", Some("application")
);
resource!(
    /// Listed per application id.
    AppLogs, AppLog, "appLogs", None
);

impl Creatable for Applications {
    type New = NewApplication;
    type Created = Application;
}

impl Updatable for Applications {
    type Update = ApplicationUpdate;

    fn apply(item: &mut Application, update: &ApplicationUpdate) {
        item.apply_update(update);
    }
}

impl Creatable for ChatMessages {
    type New = NewChatMessage;
    type Created = ChatMessage;
}

impl Creatable for Users {
    type New = NewUser;
    type Created = User;
}

impl Updatable for Users {
    type Update = UserUpdate;

    fn apply(item: &mut User, update: &UserUpdate) {
        item.apply_update(update);
    }
}

impl Creatable for UserSubscriptions {
    type New = NewUserSubscription;
    type Created = UserSubscription;
}

impl Updatable for UserSubscriptions {
    type Update = UserSubscriptionUpdate;

    fn apply(item: &mut UserSubscription, update: &UserSubscriptionUpdate) {
        item.apply_update(update);
    }
}

impl Creatable for Licenses {
    type New = NewLicenses;
    type Created = Vec<License>;
}

impl Updatable for Licenses {
    type Update = LicenseUpdate;

    fn apply(item: &mut License, update: &LicenseUpdate) {
        item.apply_update(update);
    }
}

/// Typed calls for one resource.
pub struct ResourceClient<'a, R> {
    api: &'a ApiClient,
    _resource: PhantomData<R>,
}

impl<R> fmt::Debug for ResourceClient<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &std::any::type_name::<R>())
            .finish_non_exhaustive()
    }
}

impl<'a, R: Resource> ResourceClient<'a, R> {
    pub const fn new(api: &'a ApiClient) -> Self {
        Self {
            api,
            _resource: PhantomData,
        }
    }

    /// All items in `scope`, in server order.
    pub async fn list(&self, scope: impl fmt::Display) -> Result<Vec<R::Item>, ClientError> {
        self.api
            .get_json(&R::list_endpoint(&scope.to_string()))
            .await
    }

    pub async fn get(&self, id: &<R::Item as Identified>::Id) -> Result<R::Item, ClientError> {
        self.api.get_json(&R::item_endpoint(id)).await
    }
}

impl<R: Creatable> ResourceClient<'_, R> {
    pub async fn create(&self, body: &R::New) -> Result<R::Created, ClientError> {
        self.api
            .post_json(&Endpoint::new(R::COLLECTION), body)
            .await
    }
}

impl<R: Updatable> ResourceClient<'_, R> {
    /// Full replacement of the item's mutable fields. Success carries no
    /// data; callers patch their own copies with [`Updatable::apply`].
    pub async fn update(
        &self,
        id: &<R::Item as Identified>::Id,
        body: &R::Update,
    ) -> Result<(), ClientError> {
        self.api.put_json(&R::item_endpoint(id), body).await
    }
}

impl<R: Deletable> ResourceClient<'_, R> {
    pub async fn delete(&self, id: &<R::Item as Identified>::Id) -> Result<(), ClientError> {
        self.api.delete(&R::item_endpoint(id)).await
    }
}

impl ResourceClient<'_, Files> {
    /// `POST /files/upload/{applicationId}` as multipart field `file`.
    pub async fn upload(
        &self,
        application_id: &str,
        file_name: &str,
        contents: Vec<u8>,
    ) -> Result<File, ClientError> {
        let part = reqwest::multipart::Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str("application/octet-stream")?;
        let form = reqwest::multipart::Form::new().part("file", part);
        let endpoint = Endpoint::new(Files::COLLECTION)
            .push("upload")
            .push(application_id);
        self.api.post_multipart(&endpoint, form).await
    }
}
