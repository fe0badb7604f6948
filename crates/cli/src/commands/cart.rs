//! Cart and coupon commands.

use std::io::Write;

use clap::Subcommand;
use everaura_core::{Decrement, ProductId};
use everaura_storefront::AppState;
use everaura_storefront::services::AddOutcome;

use super::CommandResult;
use crate::output::Output;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart with totals
    Show,
    /// Add a product, or one more of it
    Add {
        /// Product id
        id: String,
    },
    /// Remove a product's line
    Remove {
        /// Product id
        id: String,
    },
    /// Increase a line's quantity by one
    Inc {
        /// Product id
        id: String,
    },
    /// Decrease a line's quantity by one, removing it at zero
    Dec {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
pub enum CouponAction {
    /// Apply a coupon code for this session
    Apply {
        code: String,
    },
    /// Remove the applied coupon
    Remove,
    /// Show the applied coupon
    Show,
}

pub async fn cart<W: Write>(state: &AppState, action: CartAction, out: &mut Output<W>) -> CommandResult {
    let cart = state.cart();
    match action {
        CartAction::Show => {}
        CartAction::Add { id } => {
            let message = match cart.add_item(&ProductId::new(id)).await? {
                AddOutcome::Added => "Added to cart.",
                AddOutcome::Incremented => "Quantity updated.",
                AddOutcome::ProductNotFound => "Product not found.",
            };
            out.line(message)?;
        }
        CartAction::Remove { id } => {
            if !cart.remove_item(&ProductId::new(id))? {
                out.line("That product is not in your cart.")?;
            }
        }
        CartAction::Inc { id } => {
            if !cart.increment(&ProductId::new(id))? {
                out.line("That product is not in your cart.")?;
            }
        }
        CartAction::Dec { id } => match cart.decrement(&ProductId::new(id))? {
            Decrement::Decreased => {}
            Decrement::Removed => out.line("Removed from cart.")?,
            Decrement::Missing => out.line("That product is not in your cart.")?,
        },
        CartAction::Clear => {
            cart.clear()?;
        }
    }
    out.cart(&cart.summary()?)?;
    Ok(())
}

pub async fn coupon<W: Write>(
    state: &AppState,
    action: CouponAction,
    out: &mut Output<W>,
) -> CommandResult {
    let cart = state.cart();
    match action {
        CouponAction::Apply { code } => {
            let coupon = cart.apply_coupon(&code).await?;
            out.line(format!("Coupon applied: {}", coupon.label()))?;
            out.cart(&cart.summary()?)?;
        }
        CouponAction::Remove => {
            cart.remove_coupon()?;
            out.line("Coupon removed.")?;
        }
        CouponAction::Show => match cart.applied_coupon()? {
            Some(coupon) => out.line(coupon.label())?,
            None => out.line("No coupon applied.")?,
        },
    }
    Ok(())
}
