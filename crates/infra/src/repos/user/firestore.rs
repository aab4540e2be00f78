use super::IUserRepo;
use crate::services::firestore::{
    FieldOperator, FirestoreDocument, FirestoreRestApi, StructuredQuery, Value,
};
use crate::StoreError;
use companion_reminders_domain::{NewUser, User, ID};
use std::collections::HashMap;
use std::sync::Arc;

fn from_document(doc: &FirestoreDocument) -> Result<User, StoreError> {
    let name = doc.get_string("name")?;
    Ok(User {
        id: doc.id()?,
        username: doc
            .get_optional_string("username")
            .unwrap_or_else(|| name.clone()),
        name,
        email: doc.get_string("email")?,
        shareable_id: doc.get_string("shareable_id")?,
        can_companion_add_task: doc.get_bool("canCompanionAddTask")?,
    })
}

pub struct FirestoreUserRepo {
    api: Arc<FirestoreRestApi>,
    collection: String,
}

impl FirestoreUserRepo {
    pub fn new(api: Arc<FirestoreRestApi>, collection: String) -> Self {
        Self { api, collection }
    }
}

#[async_trait::async_trait]
impl IUserRepo for FirestoreUserRepo {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let id = ID::new();
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), Value::string(&user.name));
        fields.insert("email".to_string(), Value::string(&user.email));
        fields.insert("username".to_string(), Value::string(&user.username));
        fields.insert("shareable_id".to_string(), Value::string(&user.shareable_id));
        fields.insert("accountId".to_string(), Value::string(id.as_str()));
        fields.insert("canCompanionAddTask".to_string(), Value::BooleanValue(false));

        let doc = self
            .api
            .create_document(&self.collection, Some(id.as_str()), &fields)
            .await?;
        from_document(&doc)
    }

    async fn find(&self, user_id: &ID) -> Result<Option<User>, StoreError> {
        self.api
            .get_document(&self.collection, user_id.as_str())
            .await?
            .as_ref()
            .map(from_document)
            .transpose()
    }

    async fn find_by_shareable_id(&self, shareable_id: &str) -> Result<Option<User>, StoreError> {
        let query = StructuredQuery::new(&self.collection)
            .filter("shareable_id", FieldOperator::Equal, Value::string(shareable_id))
            .limit(1);
        self.api
            .run_query(&query)
            .await?
            .first()
            .map(from_document)
            .transpose()
    }

    async fn set_companion_can_add_task(&self, user_id: &ID, allowed: bool) -> Result<User, StoreError> {
        let mut fields = HashMap::new();
        fields.insert("canCompanionAddTask".to_string(), Value::BooleanValue(allowed));
        let doc = self
            .api
            .patch_document(&self.collection, user_id.as_str(), &fields)
            .await?;
        from_document(&doc)
    }
}
