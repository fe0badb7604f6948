//! Login, checkout, order history and the browsing session.

use std::io::Write;

use clap::{Args, Subcommand};
use everaura_core::ShippingAddress;
use everaura_storefront::AppState;
use everaura_storefront::services::LoginRedirect;

use super::CommandResult;
use crate::output::Output;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Email a one-time login code
    SendOtp {
        email: String,
    },
    /// Log in with the emailed code
    Verify {
        email: String,
        otp: String,
    },
    /// Show the logged-in profile
    Me,
    /// Forget the login
    Logout,
}

#[derive(Subcommand)]
pub enum CheckoutAction {
    /// Show the shipping details the form would be prefilled with
    Prefill,
    /// Place the order and print the payment link
    Place(ShippingArgs),
}

#[derive(Args)]
pub struct ShippingArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    pincode: String,
}

impl From<ShippingArgs> for ShippingAddress {
    fn from(args: ShippingArgs) -> Self {
        Self {
            name: args.name.trim().to_string(),
            email: args.email.trim().to_string(),
            phone: args.phone.trim().to_string(),
            address: args.address.trim().to_string(),
            city: args.city.trim().to_string(),
            pincode: args.pincode.trim().to_string(),
        }
    }
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// End the browsing session, dropping the applied coupon
    End,
}

pub async fn auth<W: Write>(state: &AppState, action: AuthAction, out: &mut Output<W>) -> CommandResult {
    let auth = state.auth();
    match action {
        AuthAction::SendOtp { email } => {
            let email = auth.send_otp(&email).await?;
            out.line(format!("OTP sent to {email}."))?;
        }
        AuthAction::Verify { email, otp } => {
            let next = match auth.verify_otp(&email, &otp).await? {
                LoginRedirect::Checkout => "Logged in. Continue with: everaura checkout prefill",
                LoginRedirect::MyOrders => "Logged in. See your orders with: everaura orders",
            };
            out.line(next)?;
        }
        AuthAction::Me => {
            let profile = auth.me().await?;
            out.profile(&profile)?;
        }
        AuthAction::Logout => {
            auth.logout()?;
            out.line("Logged out.")?;
        }
    }
    Ok(())
}

pub async fn checkout<W: Write>(
    state: &AppState,
    action: CheckoutAction,
    out: &mut Output<W>,
) -> CommandResult {
    let checkout = state.checkout();
    match action {
        CheckoutAction::Prefill => {
            let address = checkout.prefill().await?;
            for (field, value) in [
                ("name", &address.name),
                ("email", &address.email),
                ("phone", &address.phone),
                ("address", &address.address),
                ("city", &address.city),
                ("pincode", &address.pincode),
            ] {
                out.line(format!("{field}: {value}"))?;
            }
            out.cart(&state.cart().summary()?)?;
        }
        CheckoutAction::Place(shipping) => {
            let placed = checkout.place_order(&shipping.into()).await?;
            if let Some(order_id) = &placed.order_id {
                out.line(format!("Order {order_id} created."))?;
            }
            out.line(format!("Complete payment at: {}", placed.payment_url))?;
        }
    }
    Ok(())
}

pub async fn orders<W: Write>(state: &AppState, out: &mut Output<W>) -> CommandResult {
    let orders = state.orders().my_orders().await?;
    out.my_orders(&orders)?;
    Ok(())
}

pub fn session<W: Write>(state: &AppState, action: SessionAction, out: &mut Output<W>) -> CommandResult {
    match action {
        SessionAction::End => {
            state
                .storage()
                .end_session()
                .map_err(everaura_storefront::StorefrontError::from)?;
            out.line("Session ended.")?;
        }
    }
    Ok(())
}
