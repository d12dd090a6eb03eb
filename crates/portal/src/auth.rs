//! Mock authentication.
//!
//! There is no user database: three fixed accounts share one demo password,
//! and registration accepts anyone whose form is complete. This module holds
//! the account table and the form checks; the flows that persist a session
//! live on [`Portal`](crate::Portal).

use deer_hub_core::{Email, Role};
use secrecy::{ExposeSecret, SecretString};

use crate::forms::FieldErrors;

/// Password accepted for every mock account.
pub const MOCK_PASSWORD: &str = "password123";

pub const LOGIN_SUCCESS: &str = "Login successful!";
pub const INVALID_CREDENTIALS: &str =
    "Invalid credentials. Try employee@deer.com / manager@deer.com with password: password123";
pub const LOGOUT_SUCCESS: &str = "Logged out successfully!";
pub const LOGOUT_FAILED: &str = "Logout failed. Please try again.";
pub const REGISTRATION_SUCCESS: &str = "Registration successful! Welcome to DEER Hub!";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const LOGIN_FAILED: &str = "Login failed. Please try again.";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";

/// A built-in demo account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockAccount {
    pub email: &'static str,
    pub name: &'static str,
    pub role: Role,
}

/// The demo accounts, one per role.
pub const MOCK_ACCOUNTS: &[MockAccount] = &[
    MockAccount {
        email: "employee@deer.com",
        name: "John Employee",
        role: Role::Employee,
    },
    MockAccount {
        email: "manager@deer.com",
        name: "Jane Manager",
        role: Role::Manager,
    },
    MockAccount {
        email: "admin@deer.com",
        name: "Admin User",
        role: Role::Admin,
    },
];

/// Look up a demo account by exact email.
#[must_use]
pub fn find_account(email: &str) -> Option<&'static MockAccount> {
    MOCK_ACCOUNTS.iter().find(|a| a.email == email)
}

/// The account matching `email` and `password`, if both are right.
#[must_use]
pub fn verify_credentials(email: &str, password: &SecretString) -> Option<&'static MockAccount> {
    find_account(email).filter(|_| password.expose_secret() == MOCK_PASSWORD)
}

/// Contents of the sign-in form.
#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// Check that both fields are filled in.
    ///
    /// # Errors
    ///
    /// Returns the blank fields.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("email", &self.email);
        errors.require("password", self.password.expose_secret());
        errors.into_result()
    }
}

/// Contents of the registration form.
#[derive(Debug)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub role: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

/// A registration that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: Email,
    pub role: Role,
}

impl RegistrationForm {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
            password: SecretString::from(password.into()),
            confirm_password: SecretString::from(confirm_password.into()),
        }
    }

    /// Validate the form and extract the new user's details.
    ///
    /// Required fields are checked first; the email format, role and
    /// password confirmation only once everything is filled in.
    ///
    /// # Errors
    ///
    /// Returns the fields that failed, in form order.
    pub fn validate(&self) -> Result<Registration, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.require("name", &self.name);
        errors.require("email", &self.email);
        errors.require("role", &self.role);
        errors.require("password", self.password.expose_secret());
        errors.require("confirmPassword", self.confirm_password.expose_secret());
        if !errors.is_empty() {
            return Err(errors);
        }

        let email = Email::parse(self.email.trim());
        if email.is_err() {
            errors.add("email", INVALID_EMAIL);
        }
        let role = self.role.trim().parse::<Role>();
        if let Err(e) = &role {
            errors.add("role", e.clone());
        }
        if self.password.expose_secret() != self.confirm_password.expose_secret() {
            errors.add("confirmPassword", PASSWORDS_DO_NOT_MATCH);
        }

        match (email, role) {
            (Ok(email), Ok(role)) if errors.is_empty() => Ok(Registration {
                name: self.name.trim().to_owned(),
                email,
                role,
            }),
            _ => Err(errors),
        }
    }
}
