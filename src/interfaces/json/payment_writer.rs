use crate::domain::payment::{Payment, PaymentDetails};
use crate::error::Result;
use std::io::Write;

/// Writes the server's view of a payment as pretty-printed JSON.
pub struct PaymentWriter<W: Write> {
    sink: W,
}

impl<W: Write> PaymentWriter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Writes `payment`'s details followed by a newline. A payment that was
    /// never populated is written as an empty object.
    pub fn write_payment(&mut self, payment: &Payment) -> Result<()> {
        let empty = PaymentDetails::default();
        let details = payment.details().unwrap_or(&empty);

        serde_json::to_writer_pretty(&mut self.sink, details)?;
        writeln!(self.sink)?;
        self.sink.flush()?;
        Ok(())
    }
}
