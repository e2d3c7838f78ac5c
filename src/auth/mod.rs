//! Cookie-session authentication.

pub mod jwt;
pub mod middleware;

use serde::{Deserialize, Serialize};

use espeat_core::{Role, User};

pub const AUTH_COOKIE_NAME: &str = "espeat_session";

/// The authenticated user as seen by every page handler, refreshed from the
/// store on each request by the auth middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub role: Role,
}

impl SessionUser {
    pub fn nom_complet(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        SessionUser {
            id: user.id,
            nom: user.nom,
            prenom: user.prenom,
            email: user.email,
            role: user.role,
        }
    }
}
