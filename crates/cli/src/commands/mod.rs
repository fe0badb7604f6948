//! Command implementations.
//!
//! Storefront commands run against [`AppState`](everaura_storefront::AppState);
//! `admin` commands load their own configuration so shoppers never need the
//! admin key.

pub mod account;
pub mod admin;
pub mod cart;
pub mod feedback;
pub mod shop;

use clap::ValueEnum;
use everaura_admin::AdminError;
use everaura_core::{Category, Gender, Material, ProductType};
use everaura_storefront::StorefrontError;
use everaura_storefront::config::ConfigError;
use everaura_storefront::state::StateError;
use thiserror::Error;

/// A failed command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Startup error: {0}")]
    State(#[from] StateError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CommandError {
    /// Text to show on stderr.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Storefront(e) => e.user_message(),
            Self::Admin(e) => e.user_message(),
            _ => self.to_string(),
        }
    }

    /// Log the failure, reporting unexpected ones to Sentry.
    pub fn capture(&self) {
        match self {
            Self::Storefront(e) => e.capture(),
            Self::Admin(e) => e.capture(),
            Self::Config(_) => tracing::error!(error = %self, "Invalid configuration"),
            Self::State(_) | Self::Output(_) => {
                let event_id = sentry::capture_error(self);
                tracing::error!(
                    error = %self,
                    sentry_event_id = %event_id,
                    "Command failed"
                );
            }
        }
    }
}

pub type CommandResult = Result<(), CommandError>;

// =============================================================================
// Argument types
// =============================================================================

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Her,
    Him,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Her => Self::Her,
            GenderArg::Him => Self::Him,
        }
    }
}

/// Anti-tarnish or regular jewelry.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FinishArg {
    AntiTarnish,
    Jewelry,
}

impl From<FinishArg> for ProductType {
    fn from(arg: FinishArg) -> Self {
        match arg {
            FinishArg::AntiTarnish => Self::AntiTarnish,
            FinishArg::Jewelry => Self::Jewelry,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Necklaces,
    Earrings,
    Rings,
    BanglesBracelets,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Necklaces => Self::Necklaces,
            CategoryArg::Earrings => Self::Earrings,
            CategoryArg::Rings => Self::Rings,
            CategoryArg::BanglesBracelets => Self::BanglesBracelets,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MaterialArg {
    Meenakari,
    Kundan,
    AmericanDiamond,
    Resin,
    Chandbali,
    Chanderi,
    Pearl,
}

impl From<MaterialArg> for Material {
    fn from(arg: MaterialArg) -> Self {
        match arg {
            MaterialArg::Meenakari => Self::Meenakari,
            MaterialArg::Kundan => Self::Kundan,
            MaterialArg::AmericanDiamond => Self::AmericanDiamond,
            MaterialArg::Resin => Self::Resin,
            MaterialArg::Chandbali => Self::Chandbali,
            MaterialArg::Chanderi => Self::Chanderi,
            MaterialArg::Pearl => Self::Pearl,
        }
    }
}
