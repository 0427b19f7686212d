use super::customer::Holder;
use crate::error::{PaymentError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The means by which a payment is funded.
///
/// Serializes to the wire `fundingInstrument` object: a `method` discriminator
/// next to exactly one variant object.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(tag = "method", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundingInstrument {
    Boleto {
        boleto: Boleto,
    },
    CreditCard {
        #[serde(rename = "creditCard")]
        credit_card: CreditCard,
    },
    OnlineBankDebit {
        #[serde(rename = "onlineBankDebit")]
        online_bank_debit: OnlineBankDebit,
    },
}

impl FundingInstrument {
    /// The value of the `method` discriminator.
    pub fn method(&self) -> &'static str {
        match self {
            FundingInstrument::Boleto { .. } => "BOLETO",
            FundingInstrument::CreditCard { .. } => "CREDIT_CARD",
            FundingInstrument::OnlineBankDebit { .. } => "ONLINE_BANK_DEBIT",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Boleto {
    pub expiration_date: NaiveDate,
    pub instruction_lines: InstructionLines,
    pub logo_uri: String,
}

/// Up to three free-text lines printed on a boleto, filled in order.
///
/// N lines always occupy the first N slots, whether built with
/// [`InstructionLines::new`] or read from JSON.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(try_from = "InstructionLinesWire")]
pub struct InstructionLines {
    #[serde(skip_serializing_if = "Option::is_none")]
    first: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    second: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    third: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct InstructionLinesWire {
    #[serde(default)]
    first: Option<String>,
    #[serde(default)]
    second: Option<String>,
    #[serde(default)]
    third: Option<String>,
}

impl TryFrom<InstructionLinesWire> for InstructionLines {
    type Error = PaymentError;

    fn try_from(wire: InstructionLinesWire) -> Result<Self> {
        let gap = matches!(
            (&wire.first, &wire.second, &wire.third),
            (None, Some(_), _) | (_, None, Some(_))
        );
        if gap {
            return Err(PaymentError::ValidationError(
                "Instruction lines must be filled in order, starting at first".to_string(),
            ));
        }

        Ok(Self {
            first: wire.first,
            second: wire.second,
            third: wire.third,
        })
    }
}

impl InstructionLines {
    pub const MAX_LINES: usize = 3;

    pub fn new<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.len() > Self::MAX_LINES {
            return Err(PaymentError::ValidationError(format!(
                "A boleto accepts at most {} instruction lines, got {}",
                Self::MAX_LINES,
                lines.len()
            )));
        }

        let mut slots = lines.into_iter();
        Ok(Self {
            first: slots.next(),
            second: slots.next(),
            third: slots.next(),
        })
    }

    pub fn first(&self) -> Option<&str> {
        self.first.as_deref()
    }

    pub fn second(&self) -> Option<&str> {
        self.second.as_deref()
    }

    pub fn third(&self) -> Option<&str> {
        self.third.as_deref()
    }

    pub fn len(&self) -> usize {
        [&self.first, &self.second, &self.third]
            .iter()
            .filter(|line| line.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Card data, either in the clear or as an encrypted hash produced client-side.
///
/// Both shapes carry the same holder; they cannot be mixed. A document with a
/// `hash` next to raw card fields, or with only some raw fields, is rejected.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(untagged, rename_all_fields = "camelCase", try_from = "CreditCardWire")]
pub enum CreditCard {
    Hash {
        hash: String,
        holder: Holder,
    },
    Full {
        expiration_month: u8,
        expiration_year: u16,
        number: String,
        cvc: String,
        holder: Holder,
    },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct CreditCardWire {
    hash: Option<String>,
    expiration_month: Option<u8>,
    expiration_year: Option<u16>,
    number: Option<String>,
    cvc: Option<String>,
    holder: Holder,
}

impl TryFrom<CreditCardWire> for CreditCard {
    type Error = PaymentError;

    fn try_from(wire: CreditCardWire) -> Result<Self> {
        let CreditCardWire {
            hash,
            expiration_month,
            expiration_year,
            number,
            cvc,
            holder,
        } = wire;

        match (hash, expiration_month, expiration_year, number, cvc) {
            (Some(hash), None, None, None, None) => Ok(CreditCard::Hash { hash, holder }),
            (None, Some(expiration_month), Some(expiration_year), Some(number), Some(cvc)) => {
                Ok(CreditCard::Full {
                    expiration_month,
                    expiration_year,
                    number,
                    cvc,
                    holder,
                })
            }
            (Some(_), ..) => Err(PaymentError::ValidationError(
                "A credit card carries either a hash or raw card data, not both".to_string(),
            )),
            _ => Err(PaymentError::ValidationError(
                "A raw credit card needs expirationMonth, expirationYear, number and cvc"
                    .to_string(),
            )),
        }
    }
}

impl CreditCard {
    pub fn holder(&self) -> &Holder {
        match self {
            CreditCard::Hash { holder, .. } | CreditCard::Full { holder, .. } => holder,
        }
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditCard::Hash { holder, .. } => f
                .debug_struct("Hash")
                .field("hash", &"*** redacted ***")
                .field("holder", holder)
                .finish(),
            CreditCard::Full {
                expiration_month,
                expiration_year,
                holder,
                ..
            } => f
                .debug_struct("Full")
                .field("expiration_month", expiration_month)
                .field("expiration_year", expiration_year)
                .field("number", &"*** redacted ***")
                .field("cvc", &"*** redacted ***")
                .field("holder", holder)
                .finish(),
        }
    }
}

/// Banks that accept online debit.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum BankNumber {
    #[serde(rename = "001")]
    BancoDoBrasil,
    #[serde(rename = "237")]
    Bradesco,
    #[serde(rename = "341")]
    Itau,
    #[serde(rename = "041")]
    Banrisul,
}

impl BankNumber {
    pub fn code(&self) -> &'static str {
        match self {
            BankNumber::BancoDoBrasil => "001",
            BankNumber::Bradesco => "237",
            BankNumber::Itau => "341",
            BankNumber::Banrisul => "041",
        }
    }
}

impl FromStr for BankNumber {
    type Err = PaymentError;

    fn from_str(code: &str) -> Result<Self> {
        match code {
            "001" => Ok(BankNumber::BancoDoBrasil),
            "237" => Ok(BankNumber::Bradesco),
            "341" => Ok(BankNumber::Itau),
            "041" => Ok(BankNumber::Banrisul),
            other => Err(PaymentError::ValidationError(format!(
                "Unknown bank number: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OnlineBankDebit {
    pub bank_number: BankNumber,
    pub expiration_date: NaiveDate,
    pub return_uri: String,
}
