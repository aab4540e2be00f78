use super::IUserRepo;
use crate::services::appwrite::{AppwriteQuery, AppwriteRestApi};
use crate::StoreError;
use companion_reminders_domain::{NewUser, User, ID};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserAttributes<'a> {
    name: &'a str,
    email: &'a str,
    username: &'a str,
    #[serde(rename = "shareable_id")]
    shareable_id: &'a str,
    account_id: &'a str,
    can_companion_add_task: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PermissionAttributes {
    can_companion_add_task: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDocument {
    #[serde(rename = "$id")]
    id: String,
    name: String,
    email: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(rename = "shareable_id")]
    shareable_id: String,
    #[serde(default)]
    can_companion_add_task: Option<bool>,
}

impl TryFrom<UserDocument> for User {
    type Error = StoreError;

    fn try_from(doc: UserDocument) -> Result<Self, Self::Error> {
        let id = doc
            .id
            .parse::<ID>()
            .map_err(|_| StoreError::Decode(format!("Invalid id in user document: {}", doc.id)))?;
        Ok(Self {
            id,
            username: doc.username.unwrap_or_else(|| doc.name.clone()),
            name: doc.name,
            email: doc.email,
            shareable_id: doc.shareable_id,
            can_companion_add_task: doc.can_companion_add_task.unwrap_or(false),
        })
    }
}

pub struct AppwriteUserRepo {
    api: Arc<AppwriteRestApi>,
    collection_id: String,
}

impl AppwriteUserRepo {
    pub fn new(api: Arc<AppwriteRestApi>, collection_id: String) -> Self {
        Self { api, collection_id }
    }
}

#[async_trait::async_trait]
impl IUserRepo for AppwriteUserRepo {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        // The user document shares its id with the account it belongs to
        let id = ID::new();
        let attributes = UserAttributes {
            name: &user.name,
            email: &user.email,
            username: &user.username,
            shareable_id: &user.shareable_id,
            account_id: id.as_str(),
            can_companion_add_task: false,
        };
        let doc: UserDocument = self
            .api
            .create_document(&self.collection_id, id.as_str(), &attributes)
            .await?;
        doc.try_into()
    }

    async fn find(&self, user_id: &ID) -> Result<Option<User>, StoreError> {
        let doc: Option<UserDocument> = self
            .api
            .get_document(&self.collection_id, user_id.as_str())
            .await?;
        doc.map(User::try_from).transpose()
    }

    async fn find_by_shareable_id(&self, shareable_id: &str) -> Result<Option<User>, StoreError> {
        let mut docs: Vec<UserDocument> = self
            .api
            .list_documents(
                &self.collection_id,
                &[
                    AppwriteQuery::equal("shareable_id", shareable_id),
                    AppwriteQuery::Limit(1),
                ],
            )
            .await?;
        docs.pop().map(User::try_from).transpose()
    }

    async fn set_companion_can_add_task(&self, user_id: &ID, allowed: bool) -> Result<User, StoreError> {
        let doc: UserDocument = self
            .api
            .update_document(
                &self.collection_id,
                user_id.as_str(),
                &PermissionAttributes {
                    can_companion_add_task: allowed,
                },
            )
            .await?;
        doc.try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_user_document_without_permission_flag() {
        let doc: UserDocument = serde_json::from_str(
            r#"{
                "$id": "user1",
                "name": "Ada",
                "email": "ada@example.com",
                "shareable_id": "ABC123",
                "accountId": "user1"
            }"#,
        )
        .unwrap();

        let user = User::try_from(doc).unwrap();
        assert_eq!(user.username, "Ada");
        assert!(!user.can_companion_add_task);
    }

    #[test]
    fn writes_original_attribute_names() {
        let id = ID::new();
        let json = serde_json::to_value(UserAttributes {
            name: "Ada",
            email: "ada@example.com",
            username: "ada",
            shareable_id: "ABC123",
            account_id: id.as_str(),
            can_companion_add_task: false,
        })
        .unwrap();
        assert_eq!(json["shareable_id"], "ABC123");
        assert_eq!(json["accountId"], id.as_str());
        assert_eq!(json["canCompanionAddTask"], false);
    }
}
