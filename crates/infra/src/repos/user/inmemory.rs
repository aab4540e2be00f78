use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::StoreError;
use companion_reminders_domain::{NewUser, User, ID};

pub struct InMemoryUserRepo {
    users: std::sync::Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub fn new() -> Self {
        Self {
            users: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: NewUser) -> Result<User, StoreError> {
        let user = user.into_user(ID::new());
        insert(&user, &self.users);
        Ok(user)
    }

    async fn find(&self, user_id: &ID) -> Result<Option<User>, StoreError> {
        Ok(find(user_id, &self.users))
    }

    async fn find_by_shareable_id(&self, shareable_id: &str) -> Result<Option<User>, StoreError> {
        Ok(find_by(&self.users, |u| u.shareable_id == shareable_id).pop())
    }

    async fn set_companion_can_add_task(&self, user_id: &ID, allowed: bool) -> Result<User, StoreError> {
        update(user_id, &self.users, |u| u.can_companion_add_task = allowed).ok_or(StoreError::NotFound)
    }
}
