//! Everaura CLI - storefront and admin tools for the Everaura jewelry store.
//!
//! # Usage
//!
//! ```bash
//! # Browse and fill the cart
//! everaura products gender her
//! everaura products list -c Necklaces
//! everaura cart add 665f1c2e9b1e8a0012345678
//! everaura coupon apply SAVE10
//!
//! # Log in and check out
//! everaura auth send-otp asha@example.com
//! everaura auth verify asha@example.com 123456
//! everaura checkout place --name Asha --email asha@example.com --phone 9876543210 \
//!     --address "1 MG Road" --city Pune --pincode 411001
//!
//! # Admin (needs EVERAURA_ADMIN_KEY)
//! everaura admin orders list
//! ```
//!
//! # Commands
//!
//! - `products` - Shop listings, trending strip, product details, gender
//! - `cart` / `coupon` - Cart lines and the session coupon
//! - `wishlist` - Saved products
//! - `auth` - OTP login
//! - `checkout` / `orders` - Place orders and view history
//! - `reviews` / `contact` - Testimonials and the contact form
//! - `session` - End the browsing session
//! - `admin` - Products, coupons, review moderation, order fulfilment

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;

use clap::{Parser, Subcommand};
use everaura_core::ContactMessage;
use everaura_storefront::AppState;
use everaura_storefront::config::{ConfigError, StorefrontConfig};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::account::{AuthAction, CheckoutAction, SessionAction};
use commands::admin::AdminCommand;
use commands::cart::{CartAction, CouponAction};
use commands::feedback::ReviewsAction;
use commands::shop::{ProductsAction, WishlistAction};
use commands::CommandResult;
use output::Output;

#[derive(Parser)]
#[command(name = "everaura")]
#[command(author, version, about = "Everaura storefront and admin tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// View and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Apply or remove a coupon
    Coupon {
        #[command(subcommand)]
        action: CouponAction,
    },
    /// Saved products
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Log in with an emailed code
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Place an order
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
    /// Show your orders
    Orders,
    /// Read or write reviews
    Reviews {
        #[command(subcommand)]
        action: ReviewsAction,
    },
    /// Send a message to the store
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        subject: String,
        #[arg(long)]
        message: String,
    },
    /// Manage the browsing session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },
    /// Store administration
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "everaura=info,everaura_storefront=info,everaura_admin=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = run(cli, config).await;

    if let Err(e) = result {
        e.capture();
        let _ = writeln!(std::io::stderr(), "{}", e.user_message());
        // Flush pending Sentry events before exiting
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Result<StorefrontConfig, ConfigError>) -> CommandResult {
    let mut out = Output::stdout();

    // Admin commands only need the admin key, not the storefront settings
    let command = match cli.command {
        Commands::Admin { command } => return commands::admin::run(command, &mut out).await,
        command => command,
    };

    let state = AppState::new(config?)?;
    match command {
        Commands::Products { action } => commands::shop::products(&state, action, &mut out).await,
        Commands::Wishlist { action } => commands::shop::wishlist(&state, action, &mut out).await,
        Commands::Cart { action } => commands::cart::cart(&state, action, &mut out).await,
        Commands::Coupon { action } => commands::cart::coupon(&state, action, &mut out).await,
        Commands::Auth { action } => commands::account::auth(&state, action, &mut out).await,
        Commands::Checkout { action } => {
            commands::account::checkout(&state, action, &mut out).await
        }
        Commands::Orders => commands::account::orders(&state, &mut out).await,
        Commands::Session { action } => commands::account::session(&state, action, &mut out),
        Commands::Reviews { action } => {
            commands::feedback::reviews(&state, action, &mut out).await
        }
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let message = ContactMessage::new(&name, &email, &subject, &message);
            commands::feedback::contact(&state, &message, &mut out).await
        }
        Commands::Admin { command } => commands::admin::run(command, &mut out).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::commands::CommandError;

    fn bad_storefront_config() -> Result<StorefrontConfig, ConfigError> {
        Err(ConfigError::InvalidEnvVar(
            "EVERAURA_CATALOG_CACHE_TTL_SECS".to_string(),
            "invalid digit found in string".to_string(),
        ))
    }

    #[tokio::test]
    #[allow(unsafe_code)]
    async fn test_admin_commands_ignore_storefront_config() {
        // SAFETY: the only test in this binary touching the environment
        unsafe { std::env::remove_var(everaura_admin::config::ADMIN_KEY_VAR) };

        let cli = Cli::try_parse_from(["everaura", "admin", "orders", "list"]).unwrap();
        let err = run(cli, bad_storefront_config()).await.unwrap_err();
        assert!(
            matches!(&err, CommandError::Config(ConfigError::MissingEnvVar(var)) if var == "EVERAURA_ADMIN_KEY"),
            "{err}"
        );
    }

    #[tokio::test]
    async fn test_storefront_commands_report_config_errors() {
        let cli = Cli::try_parse_from(["everaura", "cart", "show"]).unwrap();
        let err = run(cli, bad_storefront_config()).await.unwrap_err();
        assert!(matches!(err, CommandError::Config(ConfigError::InvalidEnvVar(..))));
    }
}
