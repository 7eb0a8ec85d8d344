use serde::{Deserialize, Serialize};

use crate::store::User;

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User block of a login response; omits both the password hash and the
/// active flag.
#[derive(Debug, Serialize)]
pub struct LoginUserData {
    pub id: i32,
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    pub department_id: i32,
    pub role: String,
}

impl From<User> for LoginUserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            email: user.email,
            department_id: user.department_id,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: LoginUserData,
    pub role: String,
    pub token: String,
}
