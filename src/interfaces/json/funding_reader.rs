use crate::domain::funding_instrument::FundingInstrument;
use crate::error::Result;
use std::io::Read;

/// Reads a funding instrument from a JSON document.
///
/// The document has the same shape as the wire `fundingInstrument` object,
/// e.g. `{"method": "BOLETO", "boleto": {...}}`.
pub struct FundingReader<R: Read> {
    source: R,
}

impl<R: Read> FundingReader<R> {
    /// Creates a new `FundingReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn read(self) -> Result<FundingInstrument> {
        Ok(serde_json::from_reader(self.source)?)
    }
}
