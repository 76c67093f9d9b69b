// Copyright 2023 Remi Bernotavicius

use crate::database::models::{User, UserId};
use crate::database::{self, query};
use crate::error::{AuthError, ValidationError};
use crate::{Error, Result};

pub const MIN_PASSWORD_LEN: usize = 6;

#[cfg(not(test))]
const PASSWORD_COST: u32 = bcrypt::DEFAULT_COST;
#[cfg(test)]
const PASSWORD_COST: u32 = 4;

fn normalize_email(email: &str) -> std::result::Result<String, ValidationError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(ValidationError::InvalidEmail),
    }
}

pub fn sign_up(conn: &mut database::Connection, email: &str, password: &str) -> Result<User> {
    let email = normalize_email(email)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN).into());
    }
    if query::find_credentials(conn, &email)?.is_some() {
        return Err(AuthError::EmailTaken.into());
    }

    let hash = bcrypt::hash(password, PASSWORD_COST)?;
    let user = query::insert_user(conn, &email, &hash).map_err(|e| match e {
        Error::Database(diesel::result::Error::DatabaseError(
            diesel::result::DatabaseErrorKind::UniqueViolation,
            _,
        )) => AuthError::EmailTaken.into(),
        e => e,
    })?;
    log::info!("signed up {}", user.email);
    Ok(user)
}

pub fn sign_in(conn: &mut database::Connection, email: &str, password: &str) -> Result<User> {
    let email = normalize_email(email).map_err(|_| AuthError::InvalidCredentials)?;
    let Some(credentials) = query::find_credentials(conn, &email)? else {
        log::warn!("sign in failed for {email}");
        return Err(AuthError::InvalidCredentials.into());
    };
    if !bcrypt::verify(password, &credentials.password_hash)? {
        log::warn!("sign in failed for {email}");
        return Err(AuthError::InvalidCredentials.into());
    }
    query::get_user(conn, credentials.id)
}

/// Who is signed in. Operations that act on a user's data take the [`UserId`] from here
/// explicitly.
#[derive(Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_up(
        &mut self,
        conn: &mut database::Connection,
        email: &str,
        password: &str,
    ) -> Result<&User> {
        let user = sign_up(conn, email, password)?;
        Ok(self.user.insert(user))
    }

    pub fn sign_in(
        &mut self,
        conn: &mut database::Connection,
        email: &str,
        password: &str,
    ) -> Result<&User> {
        let user = sign_in(conn, email, password)?;
        log::info!("signed in {}", user.email);
        Ok(self.user.insert(user))
    }

    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            log::info!("signed out {}", user.email);
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Result<UserId> {
        self.user
            .as_ref()
            .map(|u| u.id)
            .ok_or_else(|| AuthError::NotSignedIn.into())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn sign_up_then_in() {
        let mut conn = database::test_connection();
        let user = sign_up(&mut conn, " Cook@Example.com ", "hunter22").unwrap();
        assert_eq!(user.email, "cook@example.com");

        let signed_in = sign_in(&mut conn, "COOK@example.com", "hunter22").unwrap();
        assert_eq!(signed_in, user);
    }

    #[test]
    fn wrong_credentials() {
        let mut conn = database::test_connection();
        sign_up(&mut conn, "cook@example.com", "hunter22").unwrap();

        for (email, password) in [
            ("cook@example.com", "hunter23"),
            ("chef@example.com", "hunter22"),
            ("not an email", "hunter22"),
        ] {
            assert!(matches!(
                sign_in(&mut conn, email, password),
                Err(Error::Auth(AuthError::InvalidCredentials))
            ));
        }
    }

    #[test]
    fn sign_up_validation() {
        let mut conn = database::test_connection();
        assert!(matches!(
            sign_up(&mut conn, "cook", "hunter22"),
            Err(Error::Validation(ValidationError::InvalidEmail))
        ));
        assert!(matches!(
            sign_up(&mut conn, "@example.com", "hunter22"),
            Err(Error::Validation(ValidationError::InvalidEmail))
        ));
        assert!(matches!(
            sign_up(&mut conn, "cook@example.com", "short"),
            Err(Error::Validation(ValidationError::PasswordTooShort(6)))
        ));

        sign_up(&mut conn, "cook@example.com", "hunter22").unwrap();
        assert!(matches!(
            sign_up(&mut conn, "Cook@Example.com", "hunter22"),
            Err(Error::Auth(AuthError::EmailTaken))
        ));
    }

    #[test]
    fn session() {
        let mut conn = database::test_connection();
        let mut session = Session::new();
        assert!(session.current_user().is_none());
        assert!(matches!(
            session.user_id(),
            Err(Error::Auth(AuthError::NotSignedIn))
        ));

        let id = session
            .sign_up(&mut conn, "cook@example.com", "hunter22")
            .unwrap()
            .id;
        assert_eq!(session.user_id().unwrap(), id);

        session.sign_out();
        assert!(session.current_user().is_none());

        assert!(session
            .sign_in(&mut conn, "cook@example.com", "wrong password")
            .is_err());
        assert!(session.current_user().is_none());

        session
            .sign_in(&mut conn, "cook@example.com", "hunter22")
            .unwrap();
        assert_eq!(session.current_user().map(|u| u.id), Some(id));
    }
}
