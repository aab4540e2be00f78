mod appwrite;
mod firestore;
mod inmemory;

pub use appwrite::AppwriteUserRepo;
pub use firestore::FirestoreUserRepo;
pub use inmemory::InMemoryUserRepo;

use crate::StoreError;
use companion_reminders_domain::{NewUser, User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find(&self, user_id: &ID) -> Result<Option<User>, StoreError>;
    async fn find_by_shareable_id(&self, shareable_id: &str) -> Result<Option<User>, StoreError>;
    async fn set_companion_can_add_task(&self, user_id: &ID, allowed: bool) -> Result<User, StoreError>;
}

#[cfg(test)]
mod tests {
    use crate::{Repos, StoreError};
    use companion_reminders_domain::{NewUser, ID};

    fn new_user(name: &str, shareable_id: &str) -> NewUser {
        NewUser {
            name: name.into(),
            email: format!("{}@example.com", name),
            username: name.into(),
            shareable_id: shareable_id.into(),
        }
    }

    #[tokio::test]
    async fn insert_and_find_by_shareable_id() {
        let repos = Repos::create_inmemory();
        let user = repos.users.insert(new_user("ada", "ABC123")).await.unwrap();
        repos.users.insert(new_user("bob", "XYZ789")).await.unwrap();

        assert!(!user.can_companion_add_task);
        assert_eq!(repos.users.find(&user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(
            repos.users.find_by_shareable_id("ABC123").await.unwrap(),
            Some(user)
        );
        assert_eq!(repos.users.find_by_shareable_id("NOPE00").await.unwrap(), None);
    }

    #[tokio::test]
    async fn toggles_companion_permission() {
        let repos = Repos::create_inmemory();
        let user = repos.users.insert(new_user("ada", "ABC123")).await.unwrap();

        let user = repos
            .users
            .set_companion_can_add_task(&user.id, true)
            .await
            .unwrap();
        assert!(user.can_companion_add_task);
        assert_eq!(repos.users.find(&user.id).await.unwrap(), Some(user));

        assert_eq!(
            repos.users.set_companion_can_add_task(&ID::new(), true).await,
            Err(StoreError::NotFound)
        );
    }
}
