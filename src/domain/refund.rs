use super::payment::Payment;

/// A refund resource bound to the payment it reverses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Refund {
    payment_id: Option<String>,
}

impl Refund {
    pub(crate) fn for_payment(payment: &Payment) -> Self {
        Self {
            payment_id: payment.id().map(str::to_string),
        }
    }

    pub fn payment_id(&self) -> Option<&str> {
        self.payment_id.as_deref()
    }

    /// Collection path for refunds of the bound payment. `None` until the
    /// payment has been created on the server.
    pub fn path(&self) -> Option<String> {
        self.payment_id
            .as_ref()
            .map(|id| format!("/v2/payments/{}/refunds", id))
    }
}
