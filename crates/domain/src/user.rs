use crate::shared::entity::{Entity, ID};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub username: String,
    /// Token handed to companions so they can find this account
    pub shareable_id: String,
    /// Whether paired companions are allowed to create reminders for this user
    pub can_companion_add_task: bool,
}

impl User {
    /// Whether `author` may create a `Reminder` for this user
    pub fn accepts_reminders_from(&self, author: &ID) -> bool {
        self.id == *author || self.can_companion_add_task
    }
}

impl Entity<ID> for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub username: String,
    pub shareable_id: String,
}

impl NewUser {
    pub fn into_user(self, id: ID) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            username: self.username,
            shareable_id: self.shareable_id,
            can_companion_add_task: false,
        }
    }
}
