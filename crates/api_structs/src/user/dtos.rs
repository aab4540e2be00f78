use companion_reminders_domain::{User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDTO {
    pub id: ID,
    pub name: String,
    pub email: String,
    pub username: String,
    pub shareable_id: String,
    pub can_companion_add_task: bool,
}

impl UserDTO {
    pub fn new(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            username: user.username,
            shareable_id: user.shareable_id,
            can_companion_add_task: user.can_companion_add_task,
        }
    }
}
