//! Application layer orchestrating payment requests.
//!
//! This module defines the `PaymentService`, the entry point for creating and
//! fetching payments. It turns a built `Payment` into a single HTTP exchange
//! through the transport port and maps the outcome back into the domain.

pub mod payments;
