use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaxDocumentType {
    Cpf,
    Cnpj,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct TaxDocument {
    #[serde(rename = "type")]
    pub document_type: TaxDocumentType,
    pub number: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Phone {
    pub country_code: String,
    pub area_code: String,
    pub number: String,
}

/// The buyer as known to the caller. Only the fields a card holder needs are
/// modelled here; the customer resource itself lives outside this crate.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Customer {
    fullname: String,
    birthdate: NaiveDate,
    tax_document: TaxDocument,
    phone: Phone,
}

impl Customer {
    pub fn new(
        fullname: impl Into<String>,
        birthdate: NaiveDate,
        tax_document: TaxDocument,
        phone: Phone,
    ) -> Self {
        Self {
            fullname: fullname.into(),
            birthdate,
            tax_document,
            phone,
        }
    }

    pub fn fullname(&self) -> &str {
        &self.fullname
    }

    pub fn birthdate(&self) -> NaiveDate {
        self.birthdate
    }

    pub fn tax_document(&self) -> &TaxDocument {
        &self.tax_document
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn set_fullname(&mut self, fullname: impl Into<String>) -> &mut Self {
        self.fullname = fullname.into();
        self
    }

    pub fn set_phone(&mut self, phone: Phone) -> &mut Self {
        self.phone = phone;
        self
    }
}

/// Card holder data as sent inside a credit card funding instrument.
///
/// Built from a [`Customer`] by value: later changes to the customer do not
/// reach a holder that was already taken.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Holder {
    pub fullname: String,
    pub birthdate: NaiveDate,
    pub tax_document: TaxDocument,
    pub phone: Phone,
}

impl From<&Customer> for Holder {
    fn from(customer: &Customer) -> Self {
        Self {
            fullname: customer.fullname().to_string(),
            birthdate: customer.birthdate(),
            tax_document: customer.tax_document().clone(),
            phone: customer.phone().clone(),
        }
    }
}
