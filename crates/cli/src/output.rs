//! Plain-text rendering of command results.

use std::io::{self, Write};

use everaura_core::{Coupon, Order, Product, Testimonial, Tracking, UserProfile};
use everaura_storefront::services::CartSummary;

/// Line-oriented writer for command output.
pub struct Output<W: Write> {
    out: W,
}

impl Output<io::StdoutLock<'static>> {
    /// Output to a locked stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout().lock())
    }
}

impl<W: Write> Output<W> {
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one line.
    pub fn line(&mut self, text: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    pub fn products(&mut self, products: &[Product]) -> io::Result<()> {
        if products.is_empty() {
            return self.line("No products found in this category.");
        }
        for product in products {
            writeln!(
                self.out,
                "{:<9} {:<32} {:>12}  {} / {}{}  [{}]",
                product.rsn.as_ref().map_or("-", |rsn| rsn.as_str()),
                product.name,
                product.price.to_string(),
                product.category,
                product.product_type.label(),
                if product.trending { "  *trending*" } else { "" },
                product.id,
            )?;
        }
        Ok(())
    }

    pub fn product_detail(&mut self, product: &Product) -> io::Result<()> {
        writeln!(self.out, "{}  {}", product.name, product.price)?;
        writeln!(
            self.out,
            "{} / {} / {} / for {}",
            product.category,
            product.product_type.label(),
            product.material.label(),
            product.gender.label()
        )?;
        if let Some(rsn) = &product.rsn {
            writeln!(self.out, "RSN: {rsn}")?;
        }
        writeln!(self.out, "Image: {}", product.primary_image_or_placeholder())?;
        writeln!(self.out)?;
        writeln!(self.out, "{}", product.description_or_default())
    }

    pub fn cart(&mut self, summary: &CartSummary) -> io::Result<()> {
        if summary.lines.is_empty() {
            return self.line("Your cart is empty.");
        }
        for line in &summary.lines {
            writeln!(
                self.out,
                "{:<32} x{:<3} {:>12}  [{}]",
                line.name,
                line.quantity,
                line.line_total().to_string(),
                line.product_id
            )?;
        }
        writeln!(self.out, "Subtotal: {}", summary.totals.subtotal)?;
        if let Some(coupon) = &summary.coupon {
            writeln!(
                self.out,
                "Discount ({}): -{}",
                coupon.label(),
                summary.totals.discount
            )?;
        }
        writeln!(self.out, "Total: {}", summary.totals.total)?;
        writeln!(self.out, "Items: {}", summary.item_count)
    }

    pub fn my_orders(&mut self, orders: &[Order]) -> io::Result<()> {
        if orders.is_empty() {
            return self.line("You have not placed any orders yet.");
        }
        for order in orders {
            let tracking = match order.tracking() {
                Tracking::Track(link) => format!("Track Package: {link}"),
                Tracking::Delivered => "Delivered".to_string(),
                Tracking::None => String::new(),
            };
            writeln!(
                self.out,
                "{}  {}  {:<10} {:>12}  {}",
                order.order_id,
                order.created_at.format("%Y-%m-%d"),
                order.status,
                order.total_amount.to_string(),
                tracking
            )?;
            writeln!(self.out, "    {}", order.items_summary())?;
        }
        Ok(())
    }

    pub fn admin_orders(&mut self, orders: &[Order]) -> io::Result<()> {
        if orders.is_empty() {
            return self.line("No orders found.");
        }
        for order in orders {
            writeln!(
                self.out,
                "{}  {}  {:<10} {:<10} {:>12}  {}",
                order.order_id,
                order.created_at.format("%Y-%m-%d"),
                order.status,
                order.payment_status,
                order.total_amount.to_string(),
                order.shipping_address.name
            )?;
            writeln!(self.out, "    Items: {}", order.items_summary())?;
            writeln!(self.out, "    Ship to: {}", order.shipping_address.one_line())?;
            if let Some(link) = order.tracking_link.as_deref().filter(|l| !l.is_empty()) {
                writeln!(self.out, "    Tracking: {link}")?;
            }
        }
        Ok(())
    }

    pub fn testimonials(&mut self, testimonials: &[Testimonial], moderation: bool) -> io::Result<()> {
        if testimonials.is_empty() {
            return self.line("No testimonials found.");
        }
        for t in testimonials {
            if moderation {
                writeln!(self.out, "[{}] {}  ({})", t.status.label(), t.name, t.id)?;
            } else {
                writeln!(self.out, "{}", t.name)?;
            }
            writeln!(self.out, "    \"{}\"", t.summary)?;
            if let Some(review) = t.full_review() {
                writeln!(self.out, "    {review}")?;
            }
        }
        Ok(())
    }

    pub fn coupons(&mut self, coupons: &[Coupon]) -> io::Result<()> {
        if coupons.is_empty() {
            return self.line("No coupons found.");
        }
        for coupon in coupons {
            writeln!(
                self.out,
                "{:<16} {:>5}%  [{}]",
                coupon.code,
                coupon.discount_percent.normalize(),
                coupon.id.as_ref().map_or("-", |id| id.as_str())
            )?;
        }
        Ok(())
    }

    pub fn profile(&mut self, profile: &UserProfile) -> io::Result<()> {
        writeln!(self.out, "Email: {}", profile.email)?;
        for (label, value) in [
            ("Name", &profile.name),
            ("Phone", &profile.phone),
            ("Address", &profile.address),
            ("City", &profile.city),
            ("Pincode", &profile.pincode),
        ] {
            if let Some(value) = value {
                writeln!(self.out, "{label}: {value}")?;
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use everaura_core::{Cart, CartTotals, Coupon, Price, ProductId};
    use rust_decimal::Decimal;

    fn render(f: impl FnOnce(&mut Output<Vec<u8>>) -> io::Result<()>) -> String {
        let mut output = Output::new(Vec::new());
        f(&mut output).unwrap();
        String::from_utf8(output.into_inner()).unwrap()
    }

    fn order(status: &str, tracking: Option<&str>) -> Order {
        let tracking = tracking.map_or(String::new(), |t| format!(r#","tracking_link":"{t}""#));
        serde_json::from_str(&format!(
            r#"{{
                "order_id": "EVR-1001",
                "created_at": "2026-10-01T09:30:00Z",
                "status": "{status}",
                "items": [{{"_id": "p1", "name": "Jhumka", "price": 499, "quantity": 2, "image": ""}}],
                "total_amount": 998,
                "shipping_address": {{"name": "Asha"}}
                {tracking}
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_empty_cart() {
        let summary = CartSummary {
            lines: vec![],
            coupon: None,
            totals: CartTotals::compute(&[], None),
            item_count: 0,
        };
        assert_eq!(render(|o| o.cart(&summary)), "Your cart is empty.\n");
    }

    #[test]
    fn test_cart_shows_discount() {
        let mut cart = Cart::new();
        let product: Product = serde_json::from_str(
            r#"{"_id": "p1", "name": "Jhumka", "price": 200, "category": "Earrings"}"#,
        )
        .unwrap();
        cart.add_item(&product);
        let coupon = Coupon::new("SAVE10", Decimal::TEN);
        let summary = CartSummary {
            lines: cart.lines().to_vec(),
            totals: CartTotals::compute(cart.lines(), Some(&coupon)),
            coupon: Some(coupon),
            item_count: 1,
        };

        let text = render(|o| o.cart(&summary));
        assert!(text.contains("Discount (SAVE10 - 10% OFF)"));
        assert!(text.contains(&format!("Total: {}", Price::from_paise(18_000))));
        assert!(text.contains(&format!("[{}]", ProductId::new("p1"))));
    }

    #[test]
    fn test_shipped_order_shows_tracking() {
        let text = render(|o| o.my_orders(&[order("Shipped", Some("https://track.example/1"))]));
        assert!(text.contains("Track Package: https://track.example/1"));
        assert!(text.contains("Jhumka (x2)"));
    }

    #[test]
    fn test_delivered_order() {
        let text = render(|o| o.my_orders(&[order("Delivered", None)]));
        assert!(text.contains("Delivered"));
        assert!(!text.contains("Track Package"));
    }
}
