//! Sign-in and the active storefront session.

use crate::auth::{Role, User};
use crate::cart::Cart;
use crate::checkout::Customer;
use crate::config::CommerceConfig;
use crate::error::CommerceError;
use crate::ids::UserId;
use tracing::info;

/// ID of the built-in admin account.
pub const ADMIN_USER_ID: &str = "admin-1";

/// Display name of the built-in admin account.
pub const ADMIN_NAME: &str = "MediHub Admin";

/// Checks credentials against the configured admin account.
///
/// There is no customer registry: any other email signs in as a new
/// customer.
#[derive(Debug, Clone)]
pub struct Authenticator {
    admin_email: String,
    admin_password: String,
    customer_name: String,
}

impl Authenticator {
    pub fn from_config(config: &CommerceConfig) -> Self {
        Self {
            admin_email: config.admin_email.clone(),
            admin_password: config.admin_password.clone(),
            customer_name: config.default_customer_name.clone(),
        }
    }

    /// Sign in with an email and password.
    pub fn login(&self, email: &str, password: &str) -> Result<User, CommerceError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CommerceError::Validation("email is required".to_string()));
        }

        let user = if email == self.admin_email && password == self.admin_password {
            User {
                id: UserId::new(ADMIN_USER_ID),
                name: ADMIN_NAME.to_string(),
                email: email.to_string(),
                role: Role::Admin,
            }
        } else {
            User {
                id: UserId::generate(),
                name: self.customer_name.clone(),
                email: email.to_string(),
                role: Role::Customer,
            }
        };

        info!(user_id = %user.id, role = %user.role, "user signed in");
        Ok(user)
    }
}

/// The active session: who is signed in and what is in their cart.
#[derive(Debug, Clone)]
pub struct Session {
    user: Option<User>,
    cart: Cart,
}

impl Session {
    /// A signed-out session with an empty cart.
    pub fn new(config: &CommerceConfig) -> Self {
        Self {
            user: None,
            cart: Cart::with_max_quantity(config.max_quantity_per_item),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Check if someone is signed in.
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn sign_in(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Sign out. The cart is emptied too.
    pub fn sign_out(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "user signed out");
        }
        self.cart.clear();
    }

    /// Check if an admin is signed in.
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Fail with [`CommerceError::Forbidden`] unless an admin is signed in.
    pub fn require_admin(&self) -> Result<&User, CommerceError> {
        self.user
            .as_ref()
            .filter(|user| user.is_admin())
            .ok_or(CommerceError::Forbidden)
    }

    /// The customer orders are placed for: the signed-in user, or the guest.
    pub fn customer(&self) -> Customer {
        self.user
            .as_ref()
            .map(Customer::from_user)
            .unwrap_or_else(Customer::guest)
    }
}
