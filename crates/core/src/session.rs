//! # Session Context
//!
//! Per-user storefront state: the cart, the auth token pair issued by the
//! identity provider, and the code of the last order placed.
//!
//! A context is a plain value. Every change consumes the context and returns
//! the updated one, so each page or request works on the state it was handed
//! instead of reaching into shared globals.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthTokens {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    /// Both halves are needed to restore a session.
    pub fn is_complete(&self) -> bool {
        !self.access_token.trim().is_empty() && !self.refresh_token.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    cart: BTreeMap<i64, u32>,
    auth: Option<AuthTokens>,
    last_order_code: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `qty` (which may be negative) to a cart line. Lines that drop to
    /// zero or below are removed.
    #[must_use]
    pub fn with_item_added(mut self, product_id: i64, qty: i64) -> Self {
        let current = self.cart.get(&product_id).copied().map_or(0, i64::from);
        self.set_line(product_id, current.saturating_add(qty));
        self
    }

    /// Replaces a cart line's quantity; zero or below removes it.
    #[must_use]
    pub fn with_quantity(mut self, product_id: i64, qty: i64) -> Self {
        self.set_line(product_id, qty);
        self
    }

    #[must_use]
    pub fn with_cart_cleared(mut self) -> Self {
        self.cart.clear();
        self
    }

    /// Stores the token pair. An incomplete pair leaves the session signed out.
    #[must_use]
    pub fn signed_in(mut self, tokens: AuthTokens) -> Self {
        self.auth = tokens.is_complete().then_some(tokens);
        self
    }

    #[must_use]
    pub fn signed_out(mut self) -> Self {
        self.auth = None;
        self
    }

    /// Records a placed order and empties the cart it was placed from.
    #[must_use]
    pub fn with_last_order(mut self, order_code: impl Into<String>) -> Self {
        self.last_order_code = Some(order_code.into());
        self.cart.clear();
        self
    }

    pub fn cart(&self) -> &BTreeMap<i64, u32> {
        &self.cart
    }

    pub fn auth(&self) -> Option<&AuthTokens> {
        self.auth.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.auth.is_some()
    }

    pub fn last_order_code(&self) -> Option<&str> {
        self.last_order_code.as_deref()
    }

    /// Total units across all cart lines.
    pub fn item_count(&self) -> u64 {
        self.cart.values().map(|&qty| u64::from(qty)).sum()
    }

    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn set_line(&mut self, product_id: i64, qty: i64) {
        if qty <= 0 {
            self.cart.remove(&product_id);
        } else {
            self.cart
                .insert(product_id, u32::try_from(qty).unwrap_or(u32::MAX));
        }
    }
}
