use clap::Subcommand;

use super::App;
use crate::views;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show the cart page
    Show,
    /// Add a product
    Add {
        product_id: String,
        #[arg(long, default_value = "1")]
        quantity: u32,
    },
    /// Set the quantity of a cart item
    Update { item_id: String, quantity: u32 },
    /// Remove a cart item
    Remove { item_id: String },
    /// Remove every item
    Clear,
}

pub(crate) async fn run_cart(app: &App, command: CartCommands) -> anyhow::Result<()> {
    let session = app.session();
    let cart = app.cart();

    if session.restore().await.is_none() {
        println!("{}", views::cart_page(None));
        return Ok(());
    }

    let outcome = match command {
        CartCommands::Show => {
            cart.load().await;
            None
        }
        CartCommands::Add {
            product_id,
            quantity,
        } => Some(cart.add(&product_id, quantity).await.map(|()| "Added to cart")),
        CartCommands::Update { item_id, quantity } => {
            Some(cart.update(&item_id, quantity).await.map(|()| "Cart updated"))
        }
        CartCommands::Remove { item_id } => {
            Some(cart.remove(&item_id).await.map(|()| "Item removed from cart"))
        }
        CartCommands::Clear => Some(cart.clear().await.map(|()| "Cart cleared")),
    };

    match outcome {
        Some(Ok(message)) => println!("{}\n", views::success(message)),
        Some(Err(e)) => {
            println!("{}", views::failure(&e.message));
            return Ok(());
        }
        None if cart.snapshot().is_none() => {
            println!("{}", views::failure("Failed to load cart"));
            return Ok(());
        }
        None => {}
    }
    println!("{}", views::cart_page(cart.snapshot().as_ref()));
    Ok(())
}
