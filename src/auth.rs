//! Session Login
//!
//! Matches credentials against the in-memory user list held by the store.

use crate::error::AuthError;
use crate::models::User;

/// Role given to self-registered accounts
pub const DEFAULT_ROLE: &str = "Quality Inspector";

fn seed(id: &str, email: &str, password: &str, username: &str, role: &str) -> User {
    User {
        id: id.to_string(),
        email: email.to_string(),
        username: username.to_string(),
        role: role.to_string(),
        password: Some(password.to_string()),
    }
}

pub fn seed_users() -> Vec<User> {
    vec![
        seed("1", "inspector@alco.com", "password123", "Inspector", "Quality Inspector"),
        seed("2", "supervisor@alco.com", "password456", "Supervisor", "Production Supervisor"),
        seed("3", "gerente@alco.com", "password789", "Gerente", "Plant Manager"),
    ]
}

/// Exact email and password match; the returned user carries no password
pub fn authenticate(users: &[User], email: &str, password: &str) -> Result<User, AuthError> {
    users
        .iter()
        .find(|u| u.email == email && u.password.as_deref() == Some(password))
        .map(|u| User { password: None, ..u.clone() })
        .ok_or(AuthError::InvalidCredentials)
}

/// Append a new account. Emails are unique.
pub fn register(
    users: &mut Vec<User>,
    username: &str,
    email: &str,
    password: &str,
    id: String,
) -> Result<User, AuthError> {
    if users.iter().any(|u| u.email == email) {
        return Err(AuthError::EmailTaken(email.to_string()));
    }
    let user = User {
        id,
        email: email.to_string(),
        username: username.to_string(),
        role: DEFAULT_ROLE.to_string(),
        password: Some(password.to_string()),
    };
    users.push(user.clone());
    log::info!("[AUTH] Registered {}", user.email);
    Ok(User { password: None, ..user })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticate() {
        let users = seed_users();
        let user = authenticate(&users, "supervisor@alco.com", "password456").unwrap();
        assert_eq!(user.username, "Supervisor");
        assert_eq!(user.password, None);

        assert_eq!(
            authenticate(&users, "supervisor@alco.com", "password123"),
            Err(AuthError::InvalidCredentials)
        );
        assert!(authenticate(&users, "SUPERVISOR@alco.com", "password456").is_err());
    }

    #[test]
    fn test_register_then_login() {
        let mut users = seed_users();
        let user = register(&mut users, "Ana", "ana@alco.com", "secreto", "42".to_string()).unwrap();
        assert_eq!(user.role, DEFAULT_ROLE);
        assert_eq!(users.len(), 4);
        assert_eq!(authenticate(&users, "ana@alco.com", "secreto").unwrap().id, "42");
    }

    #[test]
    fn test_register_duplicate_email() {
        let mut users = seed_users();
        let err = register(&mut users, "Otro", "inspector@alco.com", "x", "9".to_string());
        assert_eq!(err, Err(AuthError::EmailTaken("inspector@alco.com".to_string())));
        assert_eq!(users.len(), 3);
    }
}
