//! Domain model: the payment builder, its funding instruments, and the ports
//! through which it reaches the payment service.

pub mod customer;
pub mod decode;
pub mod funding_instrument;
pub mod parent;
pub mod payment;
pub mod ports;
pub mod refund;
