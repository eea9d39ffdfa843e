//! Mirror of the server-side cart.
//!
//! Every mutation is a single round trip whose response replaces the held
//! snapshot. There is no optimistic update: a failed call puts the previous
//! snapshot back and reports the server's message.

use std::future::Future;
use std::sync::Arc;

use bikeshop_client::{ApiClient, ClientError};
use bikeshop_core::Cart;
use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::error::ActionError;

pub const QUANTITY_TOO_LOW: &str = "Quantity must be at least 1";

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CartState {
    /// No signed-in user.
    #[default]
    Absent,
    /// A fetch or mutation is in flight; `previous` is what was held before.
    Loading { previous: Option<Cart> },
    Present(Cart),
}

impl CartState {
    /// The snapshot to render: the held cart, or the previous one while loading.
    #[must_use]
    pub fn cart(&self) -> Option<&Cart> {
        match self {
            CartState::Absent => None,
            CartState::Loading { previous } => previous.as_ref(),
            CartState::Present(cart) => Some(cart),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, CartState::Loading { .. })
    }

    fn settled(previous: Option<Cart>) -> Self {
        previous.map_or(CartState::Absent, CartState::Present)
    }
}

#[derive(Debug)]
pub struct CartStore {
    client: Arc<ApiClient>,
    state: watch::Sender<CartState>,
}

impl CartStore {
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (state, _rx) = watch::channel(CartState::Absent);
        Self { client, state }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> CartState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<Cart> {
        self.state.borrow().cart().cloned()
    }

    /// Sum of item quantities; 0 when there is no cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.state.borrow().cart().map_or(0, Cart::item_count)
    }

    /// Sum of price times quantity; 0 when there is no cart.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.state.borrow().cart().map_or(Decimal::ZERO, Cart::total)
    }

    /// Fetches the cart for the signed-in user, or drops it when nobody is
    /// signed in. A failed fetch is logged and the previous snapshot kept.
    pub async fn load(&self) {
        if self.client.tokens().token().is_none() {
            self.reset();
            return;
        }

        let previous = self.begin();
        match self.client.get_cart().await {
            Ok(cart) => {
                self.state.send_replace(CartState::Present(cart));
            }
            Err(e) => {
                tracing::error!(error = %e, "error loading cart");
                self.state.send_replace(CartState::settled(previous));
            }
        }
    }

    /// Forgets the cart, e.g. after logout.
    pub fn reset(&self) {
        self.state.send_replace(CartState::Absent);
    }

    /// # Errors
    ///
    /// Refuses a quantity below 1 without calling the server; otherwise
    /// returns the server's message or `"Failed to add to cart"`.
    pub async fn add(&self, product_id: &str, quantity: u32) -> Result<(), ActionError> {
        ensure_quantity(quantity)?;
        self.mutate("Failed to add to cart", self.client.add_to_cart(product_id, quantity))
            .await
    }

    /// # Errors
    ///
    /// Refuses a quantity below 1 without calling the server; otherwise
    /// returns the server's message or `"Failed to update cart"`.
    pub async fn update(&self, item_id: &str, quantity: u32) -> Result<(), ActionError> {
        ensure_quantity(quantity)?;
        self.mutate(
            "Failed to update cart",
            self.client.update_cart_item(item_id, quantity),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns the server's message or `"Failed to remove from cart"`.
    pub async fn remove(&self, item_id: &str) -> Result<(), ActionError> {
        self.mutate(
            "Failed to remove from cart",
            self.client.remove_from_cart(item_id),
        )
        .await
    }

    /// Empties the cart. The store then holds an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns the server's message or `"Failed to clear cart"`.
    pub async fn clear(&self) -> Result<(), ActionError> {
        let cleared = async {
            self.client.clear_cart().await?;
            Ok::<_, ClientError>(Cart::default())
        };
        self.mutate("Failed to clear cart", cleared).await
    }

    fn begin(&self) -> Option<Cart> {
        let previous = self.snapshot();
        self.state.send_replace(CartState::Loading {
            previous: previous.clone(),
        });
        previous
    }

    async fn mutate<F>(&self, fallback: &str, call: F) -> Result<(), ActionError>
    where
        F: Future<Output = Result<Cart, ClientError>>,
    {
        let previous = self.begin();
        match call.await {
            Ok(cart) => {
                self.state.send_replace(CartState::Present(cart));
                Ok(())
            }
            Err(e) => {
                tracing::debug!(error = %e, "cart mutation failed");
                self.state.send_replace(CartState::settled(previous));
                Err(ActionError::from_client(&e, fallback))
            }
        }
    }
}

fn ensure_quantity(quantity: u32) -> Result<(), ActionError> {
    if quantity < 1 {
        return Err(ActionError::new(QUANTITY_TOO_LOW));
    }
    Ok(())
}
