#![allow(dead_code)]

use chrono::NaiveDate;
use moip_payments::domain::customer::{Customer, Phone, TaxDocument, TaxDocumentType};
use serde_json::{Value, json};

pub fn customer() -> Customer {
    Customer::new(
        "Jose Silva",
        NaiveDate::from_ymd_opt(1988, 12, 30).unwrap(),
        TaxDocument {
            document_type: TaxDocumentType::Cpf,
            number: "22222222222".to_string(),
        },
        Phone {
            country_code: "55".to_string(),
            area_code: "11".to_string(),
            number: "66778899".to_string(),
        },
    )
}

pub fn expiration_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 11, 20).unwrap()
}

/// A create response as the payment service sends it for an authorized card.
pub fn authorized_response() -> Value {
    json!({
        "id": "PAY-1",
        "status": "AUTHORIZED",
        "amount": { "total": 1000, "currency": "BRL" },
        "installmentCount": 1,
        "fundingInstrument": {
            "method": "CREDIT_CARD",
            "creditCard": {
                "id": "CRC-1",
                "brand": "MASTERCARD",
                "first6": "555566",
                "last4": "8884"
            }
        },
        "fees": [{ "type": "TRANSACTION", "amount": 84 }],
        "refunds": [],
        "_links": { "self": { "href": "https://sandbox.moip.com.br/v2/payments/PAY-1" } }
    })
}
