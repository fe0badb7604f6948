//! Store administration commands.
//!
//! # Usage
//!
//! ```bash
//! # Preview the RSN a new product would get
//! everaura admin products preview -c rings -g her -f jewelry -m kundan
//!
//! # Add a product with its image
//! everaura admin products add --name "Kundan Ring" --price 799 -c rings -g her -f jewelry -m kundan --image ring.jpg
//!
//! # Mark an order shipped and attach tracking
//! everaura admin orders status EVR-1001 Shipped
//! everaura admin orders track EVR-1001 https://courier.example/track/123
//! ```
//!
//! # Environment Variables
//!
//! - `EVERAURA_ADMIN_KEY` - Shared admin secret (required)
//! - `EVERAURA_API_URL` - Store API base URL

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use everaura_admin::services::ProductDraft;
use everaura_admin::{AdminConfig, AdminError, AdminState};
use everaura_core::{
    CouponId, Material, OrderId, OrderStatus, Product, ProductId, ProductType, RsnSelection,
    TestimonialId,
};
use rust_decimal::Decimal;

use super::{CategoryArg, CommandResult, FinishArg, GenderArg, MaterialArg};
use crate::output::Output;

#[derive(Subcommand)]
pub enum AdminCommand {
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage coupons
    Coupons {
        #[command(subcommand)]
        action: CouponAdminAction,
    },
    /// Moderate reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewAdminAction,
    },
    /// Fulfil orders
    Orders {
        #[command(subcommand)]
        action: OrderAdminAction,
    },
}

#[derive(Subcommand)]
pub enum ProductAction {
    /// List every product by RSN
    List,
    /// Preview the RSN for a set of selections
    Preview(SelectionArgs),
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: Decimal,
        #[command(flatten)]
        selection: SelectionArgs,
        #[arg(long)]
        trending: bool,
        #[arg(long, default_value = "")]
        description: String,
        /// Product image file
        #[arg(long)]
        image: PathBuf,
    },
    /// Edit a product; omitted fields keep their current value
    Edit {
        /// Product id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(short, long, value_enum)]
        category: Option<CategoryArg>,
        #[arg(short, long, value_enum)]
        gender: Option<GenderArg>,
        #[arg(short, long, value_enum)]
        finish: Option<FinishArg>,
        #[arg(short, long, value_enum)]
        material: Option<MaterialArg>,
        #[arg(long)]
        trending: Option<bool>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Permanently delete a product
    Delete {
        /// Product id
        id: String,
    },
}

/// Selections that determine a product's RSN.
#[derive(Args)]
pub struct SelectionArgs {
    #[arg(short, long, value_enum)]
    category: CategoryArg,
    #[arg(short, long, value_enum, default_value_t = GenderArg::Her)]
    gender: GenderArg,
    #[arg(short, long, value_enum, default_value_t = FinishArg::AntiTarnish)]
    finish: FinishArg,
    /// Only used for jewelry
    #[arg(short, long, value_enum)]
    material: Option<MaterialArg>,
}

impl From<SelectionArgs> for RsnSelection {
    fn from(args: SelectionArgs) -> Self {
        Self {
            category: args.category.into(),
            gender: args.gender.into(),
            product_type: args.finish.into(),
            material: args.material.map_or(Material::AntiTarnish, Into::into),
        }
    }
}

#[derive(Subcommand)]
pub enum CouponAdminAction {
    /// List coupons
    List,
    /// Create a percentage coupon
    Add {
        code: String,
        /// Percent off, more than 0 and at most 100
        discount: Decimal,
    },
    /// Delete a coupon
    Delete {
        /// Coupon id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ReviewAdminAction {
    /// List reviews, pending first
    List {
        /// Only reviews awaiting approval
        #[arg(long)]
        pending: bool,
    },
    /// Make a review public
    Approve {
        /// Testimonial id
        id: String,
    },
    /// Permanently delete a review
    Delete {
        /// Testimonial id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum OrderAdminAction {
    /// List every order
    List,
    /// Change an order's status (Pending, Paid, Packaging, Shipped, Delivered, Cancelled)
    Status {
        order_id: String,
        status: OrderStatus,
    },
    /// Save a courier tracking link
    Track {
        order_id: String,
        link: String,
    },
}

pub async fn run<W: Write>(command: AdminCommand, out: &mut Output<W>) -> CommandResult {
    let config = AdminConfig::from_env()?;
    let state = AdminState::new(config).map_err(AdminError::from)?;

    match command {
        AdminCommand::Products { action } => products(&state, action, out).await,
        AdminCommand::Coupons { action } => coupons(&state, action, out).await,
        AdminCommand::Reviews { action } => reviews(&state, action, out).await,
        AdminCommand::Orders { action } => orders(&state, action, out).await,
    }
}

async fn products<W: Write>(
    state: &AdminState,
    action: ProductAction,
    out: &mut Output<W>,
) -> CommandResult {
    let manager = state.products();
    match action {
        ProductAction::List => {
            out.products(&manager.list().await?)?;
        }
        ProductAction::Preview(selection) => {
            let rsn = manager.preview_rsn(&selection.into()).await?;
            out.line(rsn)?;
        }
        ProductAction::Add {
            name,
            price,
            selection,
            trending,
            description,
            image,
        } => {
            let draft = ProductDraft {
                name,
                price,
                selection: selection.into(),
                trending,
                description,
            };
            let rsn = manager.create(draft, &image).await?;
            out.line(format!("Product added successfully! RSN {rsn}"))?;
        }
        ProductAction::Edit {
            id,
            name,
            price,
            category,
            gender,
            finish,
            material,
            trending,
            description,
        } => {
            let id = ProductId::new(id);
            let current = manager.get(&id).await?;
            let draft = edited_draft(
                &current,
                Edits {
                    name,
                    price,
                    category,
                    gender,
                    finish,
                    material,
                    trending,
                    description,
                },
            );
            let rsn = manager.update(&id, draft).await?;
            out.line(format!("Product updated successfully! RSN {rsn}"))?;
        }
        ProductAction::Delete { id } => {
            manager.delete(&ProductId::new(id)).await?;
            out.line("Product deleted successfully.")?;
        }
    }
    Ok(())
}

struct Edits {
    name: Option<String>,
    price: Option<Decimal>,
    category: Option<CategoryArg>,
    gender: Option<GenderArg>,
    finish: Option<FinishArg>,
    material: Option<MaterialArg>,
    trending: Option<bool>,
    description: Option<String>,
}

fn edited_draft(current: &Product, edits: Edits) -> ProductDraft {
    let product_type = edits.finish.map_or(current.product_type, ProductType::from);
    ProductDraft {
        name: edits.name.unwrap_or_else(|| current.name.clone()),
        price: edits.price.unwrap_or_else(|| current.price.amount()),
        selection: RsnSelection {
            category: edits
                .category
                .map_or_else(|| current.category.clone(), Into::into),
            gender: edits.gender.map_or(current.gender, Into::into),
            product_type,
            material: edits.material.map_or(current.material, Into::into),
        },
        trending: edits.trending.unwrap_or(current.trending),
        description: edits
            .description
            .unwrap_or_else(|| current.description.clone().unwrap_or_default()),
    }
}

async fn coupons<W: Write>(
    state: &AdminState,
    action: CouponAdminAction,
    out: &mut Output<W>,
) -> CommandResult {
    let manager = state.coupons();
    match action {
        CouponAdminAction::List => out.coupons(&manager.list().await?)?,
        CouponAdminAction::Add { code, discount } => {
            manager.create(&code, discount).await?;
            out.line("Coupon created successfully!")?;
        }
        CouponAdminAction::Delete { id } => {
            manager.delete(&CouponId::new(id)).await?;
            out.line("Coupon deleted successfully!")?;
        }
    }
    Ok(())
}

async fn reviews<W: Write>(
    state: &AdminState,
    action: ReviewAdminAction,
    out: &mut Output<W>,
) -> CommandResult {
    let moderation = state.testimonials();
    match action {
        ReviewAdminAction::List { pending: true } => {
            out.testimonials(&moderation.pending().await?, true)?;
        }
        ReviewAdminAction::List { pending: false } => {
            out.testimonials(&moderation.all().await?, true)?;
        }
        ReviewAdminAction::Approve { id } => {
            moderation.approve(&TestimonialId::new(id)).await?;
            out.line("Testimonial approved!")?;
        }
        ReviewAdminAction::Delete { id } => {
            moderation.delete(&TestimonialId::new(id)).await?;
            out.line("Testimonial deleted.")?;
        }
    }
    Ok(())
}

async fn orders<W: Write>(
    state: &AdminState,
    action: OrderAdminAction,
    out: &mut Output<W>,
) -> CommandResult {
    let desk = state.orders();
    match action {
        OrderAdminAction::List => out.admin_orders(&desk.list().await?)?,
        OrderAdminAction::Status { order_id, status } => {
            desk.update_status(&OrderId::new(order_id), status).await?;
            out.line("Status updated! The user will be notified.")?;
        }
        OrderAdminAction::Track { order_id, link } => {
            desk.add_tracking(&OrderId::new(order_id), &link).await?;
            out.line("Tracking link saved! If the order is 'Shipped', the user will be notified.")?;
        }
    }
    Ok(())
}
