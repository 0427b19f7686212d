pub mod funding_reader;
pub mod payment_writer;
