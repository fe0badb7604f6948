//! Reviews and the contact form.

use std::io::Write;

use clap::Subcommand;
use everaura_core::{ContactMessage, NewTestimonial};
use everaura_storefront::AppState;

use super::CommandResult;
use crate::output::Output;

#[derive(Subcommand)]
pub enum ReviewsAction {
    /// Show approved reviews
    List,
    /// Submit a review for approval
    Submit {
        #[arg(long)]
        name: String,
        /// Email or phone, optional
        #[arg(long, default_value = "")]
        contact: String,
        /// One-line summary
        #[arg(long)]
        summary: String,
        #[arg(long, default_value = "")]
        full_review: String,
    },
}

pub async fn reviews<W: Write>(
    state: &AppState,
    action: ReviewsAction,
    out: &mut Output<W>,
) -> CommandResult {
    let feedback = state.feedback();
    match action {
        ReviewsAction::List => {
            let testimonials = feedback.testimonials().await?;
            out.testimonials(&testimonials, false)?;
        }
        ReviewsAction::Submit {
            name,
            contact,
            summary,
            full_review,
        } => {
            let review = NewTestimonial {
                name: name.trim().to_string(),
                contact: contact.trim().to_string(),
                summary: summary.trim().to_string(),
                full_review: full_review.trim().to_string(),
            };
            feedback.submit_testimonial(&review).await?;
            out.line("Thank you! Your review is awaiting approval.")?;
        }
    }
    Ok(())
}

pub async fn contact<W: Write>(state: &AppState, message: &ContactMessage, out: &mut Output<W>) -> CommandResult {
    state.feedback().contact(message).await?;
    out.line("Thank you! Your message has been sent.")?;
    Ok(())
}
