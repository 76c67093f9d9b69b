// Copyright 2023 Remi Bernotavicius

use thiserror::Error;

/// Form input that was rejected before reaching the database.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("quantity must be greater than zero")]
    NonPositiveQuantity,
    #[error("unit is required")]
    BlankUnit,
    #[error("a recipe needs at least one ingredient")]
    NoIngredients,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("password must be at least {0} characters")]
    PasswordTooShort(usize),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("an account with that email already exists")]
    EmailTaken,
    #[error("not signed in")]
    NotSignedIn,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("failed to open database: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("failed to run migrations: {0}")]
    Migration(Box<dyn std::error::Error + Send + Sync + 'static>),
    #[error("password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
