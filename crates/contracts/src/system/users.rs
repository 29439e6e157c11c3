use serde::{Deserialize, Serialize};

/// Access level of a dealership staff account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StaffRole {
    Admin,
    Manager,
    #[default]
    Executive,
}

impl StaffRole {
    pub fn code(&self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Manager => "manager",
            StaffRole::Executive => "executive",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "admin" => Some(StaffRole::Admin),
            "manager" => Some(StaffRole::Manager),
            "executive" => Some(StaffRole::Executive),
            _ => None,
        }
    }

    /// Managers and admins both clear the manager gate
    pub fn is_manager(&self) -> bool {
        matches!(self, StaffRole::Admin | StaffRole::Manager)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, StaffRole::Admin)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: StaffRole,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
    pub last_login_at: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserDto {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    #[serde(default)]
    pub role: StaffRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserDto {
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub role: StaffRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordDto {
    pub user_id: String,
    pub old_password: Option<String>, // None if admin changing someone else's password
    pub new_password: String,
}
