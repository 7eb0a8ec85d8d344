use serde::{Deserialize, Serialize};

use crate::store::User;

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
    pub department_id: i32,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub department_id: i32,
    pub role: String,
    /// Blank or absent means "keep the current password".
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EmailUniqueQuery {
    pub email: String,
}

/// Public projection of a user record; the password hash never appears.
#[derive(Debug, Serialize)]
pub struct UserData {
    pub id: i32,
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub department_id: i32,
    pub role: String,
    pub active: bool,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            email: user.email,
            department_id: user.department_id,
            role: user.role,
            active: user.active,
        }
    }
}
