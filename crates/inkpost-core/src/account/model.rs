//! Account and profile domain models.

use serde::{Deserialize, Serialize};

/// The authenticated author's profile, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// The fields of the registration form, submitted as a multipart body
/// together with an optional profile image.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Registration {
    pub name: String,
    pub dob: String,
    pub place: String,
    pub address: String,
    pub email: String,
    pub password: String,
}

/// A message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}
