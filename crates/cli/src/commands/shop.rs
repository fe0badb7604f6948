//! Catalog browsing and the wishlist.

use std::io::Write;

use clap::Subcommand;
use everaura_core::{Gender, ProductId};
use everaura_storefront::AppState;
use everaura_storefront::StorefrontError;
use everaura_storefront::services::WishlistOutcome;

use super::{CommandResult, FinishArg, GenderArg};
use crate::output::Output;

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List a category for the selected gender
    List {
        /// Category name, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        #[arg(short, long, value_enum, default_value_t = FinishArg::AntiTarnish)]
        finish: FinishArg,
    },
    /// Trending products for the selected gender
    Trending,
    /// Show one product
    Show {
        /// Product id
        id: String,
    },
    /// Show or change whose collection is listed
    Gender {
        #[arg(value_enum)]
        gender: Option<GenderArg>,
    },
}

#[derive(Subcommand)]
pub enum WishlistAction {
    /// List saved products
    Show,
    /// Save a product, or remove it if already saved
    Toggle {
        /// Product id
        id: String,
    },
    /// Remove every saved product
    Clear,
}

pub async fn products<W: Write>(
    state: &AppState,
    action: ProductsAction,
    out: &mut Output<W>,
) -> CommandResult {
    let catalog = state.catalog();
    match action {
        ProductsAction::List { category, finish } => {
            let products = catalog.shop(&category, finish.into()).await?;
            out.products(&products)?;
        }
        ProductsAction::Trending => {
            let products = catalog.trending().await?;
            out.products(&products)?;
        }
        ProductsAction::Show { id } => {
            let id = ProductId::new(id);
            let product = catalog
                .product(&id)
                .await?
                .ok_or_else(|| StorefrontError::NotFound(format!("Product {id}")))?;
            out.product_detail(&product)?;
        }
        ProductsAction::Gender { gender: Some(gender) } => {
            let gender = Gender::from(gender);
            catalog.select_gender(gender)?;
            out.line(format!("Now showing: For {}", gender.label()))?;
        }
        ProductsAction::Gender { gender: None } => {
            out.line(format!("Showing: For {}", catalog.selected_gender()?.label()))?;
        }
    }
    Ok(())
}

pub async fn wishlist<W: Write>(
    state: &AppState,
    action: WishlistAction,
    out: &mut Output<W>,
) -> CommandResult {
    let wishlist = state.wishlist();
    match action {
        WishlistAction::Show => {
            let products = wishlist.list()?;
            if products.is_empty() {
                out.line("Your wishlist is empty.")?;
            } else {
                out.products(&products)?;
            }
        }
        WishlistAction::Toggle { id } => {
            let message = match wishlist.toggle(&ProductId::new(id)).await? {
                WishlistOutcome::Added => "Added to wishlist.",
                WishlistOutcome::Removed => "Removed from wishlist.",
                WishlistOutcome::ProductNotFound => "Product not found.",
            };
            out.line(message)?;
        }
        WishlistAction::Clear => {
            wishlist.clear()?;
            out.line("Wishlist cleared.")?;
        }
    }
    Ok(())
}
