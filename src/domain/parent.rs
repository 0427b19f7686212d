use crate::error::{PaymentError, Result};

/// An order created beforehand on the payment service.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Order {
    id: String,
}

impl Order {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A batch of orders paid with a single multipayment.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Multiorder {
    id: String,
}

impl Multiorder {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// The context a payment is created under. A payment pays either one order or
/// one multiorder, never both.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum PaymentParent {
    Order(Order),
    Multiorder(Multiorder),
}

impl PaymentParent {
    /// Path the payment is posted to. Fails if the id is not a single path
    /// segment.
    pub fn payments_path(&self) -> Result<String> {
        match self {
            PaymentParent::Order(order) => Ok(format!(
                "/v2/orders/{}/payments",
                path_segment(order.id())?
            )),
            PaymentParent::Multiorder(multiorder) => Ok(format!(
                "/v2/multiorders/{}/multipayments",
                path_segment(multiorder.id())?
            )),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            PaymentParent::Order(_) => "an order",
            PaymentParent::Multiorder(_) => "a multiorder",
        }
    }
}

/// Accepts `id` only if it names exactly one path segment.
pub fn path_segment(id: &str) -> Result<&str> {
    let reserved = |c: char| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace();
    if id.is_empty() || id == "." || id == ".." || id.contains(reserved) {
        return Err(PaymentError::ValidationError(format!(
            "Invalid resource id: {:?}",
            id
        )));
    }
    Ok(id)
}
