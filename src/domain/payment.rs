use super::customer::{Customer, Holder};
use super::decode::FieldAccess;
use super::funding_instrument::{
    BankNumber, Boleto, CreditCard, FundingInstrument, InstructionLines, OnlineBankDebit,
};
use super::parent::{Multiorder, Order, PaymentParent};
use super::refund::Refund;
use crate::error::{PaymentError, Result};
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Number of installments a payment is split into. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct InstallmentCount(u32);

impl InstallmentCount {
    pub const ONE: Self = Self(1);

    pub fn new(value: u32) -> Result<Self> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(
                "Installment count must be at least 1".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl Default for InstallmentCount {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u32> for InstallmentCount {
    type Error = PaymentError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

/// The data block sent when a payment is created.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub installment_count: InstallmentCount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_instrument: Option<FundingInstrument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    Created,
    Waiting,
    InAnalysis,
    PreAuthorized,
    Authorized,
    Cancelled,
    Refunded,
    Reversed,
    Settled,
    /// A label this crate does not know yet, kept verbatim.
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Created => "CREATED",
            PaymentStatus::Waiting => "WAITING",
            PaymentStatus::InAnalysis => "IN_ANALYSIS",
            PaymentStatus::PreAuthorized => "PRE_AUTHORIZED",
            PaymentStatus::Authorized => "AUTHORIZED",
            PaymentStatus::Cancelled => "CANCELLED",
            PaymentStatus::Refunded => "REFUNDED",
            PaymentStatus::Reversed => "REVERSED",
            PaymentStatus::Settled => "SETTLED",
            PaymentStatus::Other(label) => label,
        }
    }
}

impl From<&str> for PaymentStatus {
    fn from(label: &str) -> Self {
        match label {
            "CREATED" => PaymentStatus::Created,
            "WAITING" => PaymentStatus::Waiting,
            "IN_ANALYSIS" => PaymentStatus::InAnalysis,
            "PRE_AUTHORIZED" => PaymentStatus::PreAuthorized,
            "AUTHORIZED" => PaymentStatus::Authorized,
            "CANCELLED" => PaymentStatus::Cancelled,
            "REFUNDED" => PaymentStatus::Refunded,
            "REVERSED" => PaymentStatus::Reversed,
            "SETTLED" => PaymentStatus::Settled,
            other => PaymentStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// Amount charged, in minor units of `currency`.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Default)]
pub struct Amount {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

/// The server's view of a payment, as returned by create or get.
///
/// `funding_instrument`, `fees`, `refunds` and `links` are passed through as
/// received.
#[derive(Debug, Serialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installment_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funding_instrument: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refunds: Option<Value>,
    #[serde(rename = "_links", skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

impl PaymentDetails {
    /// Maps a decoded response object field by field. Missing fields stay
    /// `None`; a response without `amount` has no amount at all.
    pub fn from_response(response: &Map<String, Value>) -> Self {
        let amount = response.object_if_set("amount").map(|amount| Amount {
            total: amount.i64_if_set("total"),
            currency: amount.str_if_set("currency").map(str::to_string),
        });

        Self {
            id: response.str_if_set("id").map(str::to_string),
            status: response.str_if_set("status").map(PaymentStatus::from),
            amount,
            installment_count: response.u32_if_set("installmentCount"),
            funding_instrument: response.get_if_set("fundingInstrument").cloned(),
            fees: response.get_if_set("fees").cloned(),
            refunds: response.get_if_set("refunds").cloned(),
            links: response.get_if_set("_links").cloned(),
        }
    }
}

/// A payment attached to an order or a multiorder.
///
/// Built up with the setters, then handed to
/// [`PaymentService::execute`](crate::application::payments::PaymentService::execute),
/// which returns a new, populated `Payment` and leaves this one untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Payment {
    parent: Option<PaymentParent>,
    request: PaymentRequest,
    details: Option<PaymentDetails>,
}

impl Payment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_order(order: Order) -> Self {
        Self {
            parent: Some(PaymentParent::Order(order)),
            ..Self::default()
        }
    }

    pub fn for_multiorder(multiorder: Multiorder) -> Self {
        Self {
            parent: Some(PaymentParent::Multiorder(multiorder)),
            ..Self::default()
        }
    }

    /// Binds the payment to an order. Fails if it is already bound to a
    /// multiorder; a previous order binding is replaced.
    pub fn set_order(&mut self, order: Order) -> Result<&mut Self> {
        self.bind(PaymentParent::Order(order))
    }

    /// Binds the payment to a multiorder. Fails if it is already bound to an
    /// order; a previous multiorder binding is replaced.
    pub fn set_multiorder(&mut self, multiorder: Multiorder) -> Result<&mut Self> {
        self.bind(PaymentParent::Multiorder(multiorder))
    }

    fn bind(&mut self, parent: PaymentParent) -> Result<&mut Self> {
        if let Some(current) = &self.parent
            && std::mem::discriminant(current) != std::mem::discriminant(&parent)
        {
            return Err(PaymentError::ConflictingParent(current.kind().to_string()));
        }
        self.parent = Some(parent);
        Ok(self)
    }

    pub fn set_installment_count(&mut self, installment_count: InstallmentCount) -> &mut Self {
        self.request.installment_count = installment_count;
        self
    }

    /// Replaces the funding instrument, whatever variant was set before.
    pub fn set_funding_instrument(&mut self, funding_instrument: FundingInstrument) -> &mut Self {
        self.request.funding_instrument = Some(funding_instrument);
        self
    }

    pub fn set_boleto(
        &mut self,
        expiration_date: NaiveDate,
        logo_uri: impl Into<String>,
        instruction_lines: InstructionLines,
    ) -> &mut Self {
        self.set_funding_instrument(FundingInstrument::Boleto {
            boleto: Boleto {
                expiration_date,
                instruction_lines,
                logo_uri: logo_uri.into(),
            },
        })
    }

    pub fn set_credit_card_hash(
        &mut self,
        hash: impl Into<String>,
        holder: &Customer,
    ) -> &mut Self {
        self.set_funding_instrument(FundingInstrument::CreditCard {
            credit_card: CreditCard::Hash {
                hash: hash.into(),
                holder: Holder::from(holder),
            },
        })
    }

    pub fn set_credit_card(
        &mut self,
        expiration_month: u8,
        expiration_year: u16,
        number: impl Into<String>,
        cvc: impl Into<String>,
        holder: &Customer,
    ) -> &mut Self {
        self.set_funding_instrument(FundingInstrument::CreditCard {
            credit_card: CreditCard::Full {
                expiration_month,
                expiration_year,
                number: number.into(),
                cvc: cvc.into(),
                holder: Holder::from(holder),
            },
        })
    }

    pub fn set_online_bank_debit(
        &mut self,
        bank_number: BankNumber,
        expiration_date: NaiveDate,
        return_uri: impl Into<String>,
    ) -> &mut Self {
        self.set_funding_instrument(FundingInstrument::OnlineBankDebit {
            online_bank_debit: OnlineBankDebit {
                bank_number,
                expiration_date,
                return_uri: return_uri.into(),
            },
        })
    }

    pub fn parent(&self) -> Option<&PaymentParent> {
        self.parent.as_ref()
    }

    pub fn request(&self) -> &PaymentRequest {
        &self.request
    }

    /// The server's view, present only on a payment returned by execute or get.
    pub fn details(&self) -> Option<&PaymentDetails> {
        self.details.as_ref()
    }

    pub fn id(&self) -> Option<&str> {
        self.details.as_ref().and_then(|d| d.id.as_deref())
    }

    pub fn status(&self) -> Option<&PaymentStatus> {
        self.details.as_ref().and_then(|d| d.status.as_ref())
    }

    pub fn amount(&self) -> Option<&Amount> {
        self.details.as_ref().and_then(|d| d.amount.as_ref())
    }

    /// Serializes the request block into the body sent on create.
    pub fn to_request_body(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.request)?)
    }

    /// Returns a new payment carrying the server's view from `response`.
    ///
    /// The parent binding and request block are carried over; `self` is not
    /// modified.
    pub fn populate(&self, response: &Map<String, Value>) -> Payment {
        let details = PaymentDetails::from_response(response);
        tracing::debug!(
            payment_id = details.id.as_deref().unwrap_or_default(),
            has_amount = details.amount.is_some(),
            "Populated payment from response"
        );

        Payment {
            parent: self.parent.clone(),
            request: self.request.clone(),
            details: Some(details),
        }
    }

    /// A refund bound to this payment.
    pub fn refunds(&self) -> Refund {
        Refund::for_payment(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::customer::{Phone, TaxDocument, TaxDocumentType};
    use serde_json::json;

    fn customer() -> Customer {
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

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn body(payment: &Payment) -> Value {
        serde_json::from_str(&payment.to_request_body().unwrap()).unwrap()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn test_installment_count_validation() {
        assert!(InstallmentCount::new(1).is_ok());
        assert!(InstallmentCount::try_from(12).is_ok());
        assert!(matches!(
            InstallmentCount::new(0),
            Err(PaymentError::ValidationError(_))
        ));
    }

    #[test]
    fn test_new_payment_defaults() {
        let payment = Payment::new();
        assert_eq!(payment.request().installment_count, InstallmentCount::ONE);
        assert!(payment.parent().is_none());
        assert!(payment.details().is_none());
        assert_eq!(body(&payment), json!({ "installmentCount": 1 }));
    }

    #[test]
    fn test_boleto_body() {
        let mut payment = Payment::for_order(Order::new("ORD-1"));
        payment.set_boleto(
            date(2026, 11, 20),
            "http://shop.example.com/logo.png",
            InstructionLines::new(["first line", "second line", "third line"]).unwrap(),
        );

        assert_eq!(
            body(&payment),
            json!({
                "installmentCount": 1,
                "fundingInstrument": {
                    "method": "BOLETO",
                    "boleto": {
                        "expirationDate": "2026-11-20",
                        "instructionLines": {
                            "first": "first line",
                            "second": "second line",
                            "third": "third line"
                        },
                        "logoUri": "http://shop.example.com/logo.png"
                    }
                }
            })
        );
    }

    #[test]
    fn test_body_leaves_slashes_unescaped() {
        let mut payment = Payment::new();
        payment.set_online_bank_debit(
            BankNumber::BancoDoBrasil,
            date(2026, 11, 20),
            "https://shop.example.com/return/ok",
        );

        let raw = payment.to_request_body().unwrap();
        assert!(raw.contains("https://shop.example.com/return/ok"));
        assert!(!raw.contains("\\/"));
    }

    #[test]
    fn test_boleto_slots_follow_line_count() {
        let all = ["one", "two", "three"];
        let keys = ["first", "second", "third"];

        for count in 0..=3 {
            let mut payment = Payment::new();
            payment.set_boleto(
                date(2026, 1, 1),
                "logo",
                InstructionLines::new(all[..count].iter().copied()).unwrap(),
            );
            let value = body(&payment);
            let lines = value["fundingInstrument"]["boleto"]["instructionLines"]
                .as_object()
                .unwrap();

            assert_eq!(lines.len(), count);
            for key in &keys[..count] {
                assert!(lines.contains_key(*key));
            }
        }
    }

    #[test]
    fn test_credit_card_full_body() {
        let mut payment = Payment::new();
        payment
            .set_installment_count(InstallmentCount::new(3).unwrap())
            .set_credit_card(5, 2030, "5555666677778884", "123", &customer());

        let value = body(&payment);
        assert_eq!(value["installmentCount"], json!(3));
        assert_eq!(value["fundingInstrument"]["method"], json!("CREDIT_CARD"));

        let card = value["fundingInstrument"]["creditCard"].as_object().unwrap();
        let mut keys: Vec<&str> = card.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec!["cvc", "expirationMonth", "expirationYear", "holder", "number"]
        );
        assert_eq!(card["holder"]["fullname"], json!("Jose Silva"));
        assert_eq!(card["holder"]["taxDocument"]["type"], json!("CPF"));
    }

    #[test]
    fn test_credit_card_hash_body() {
        let mut payment = Payment::new();
        payment.set_credit_card_hash("encrypted-card", &customer());

        let value = body(&payment);
        let card = value["fundingInstrument"]["creditCard"].as_object().unwrap();
        let mut keys: Vec<&str> = card.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["hash", "holder"]);
        assert_eq!(card["holder"]["phone"]["areaCode"], json!("11"));
    }

    #[test]
    fn test_last_funding_instrument_wins() {
        let mut payment = Payment::new();
        payment
            .set_credit_card(5, 2030, "5555666677778884", "123", &customer())
            .set_online_bank_debit(BankNumber::Bradesco, date(2026, 2, 1), "https://r");

        let value = body(&payment);
        let instrument = value["fundingInstrument"].as_object().unwrap();
        assert_eq!(instrument.len(), 2);
        assert_eq!(instrument["method"], json!("ONLINE_BANK_DEBIT"));
        assert!(!instrument.contains_key("creditCard"));
    }

    #[test]
    fn test_holder_taken_at_setter_time() {
        let mut customer = customer();
        let mut payment = Payment::new();
        payment.set_credit_card_hash("encrypted-card", &customer);

        customer.set_fullname("Someone Else");

        let value = body(&payment);
        assert_eq!(
            value["fundingInstrument"]["creditCard"]["holder"]["fullname"],
            json!("Jose Silva")
        );
    }

    #[test]
    fn test_conflicting_parent_is_rejected() {
        let mut payment = Payment::for_order(Order::new("ORD-1"));
        let result = payment.set_multiorder(Multiorder::new("MOR-1"));
        assert!(matches!(result, Err(PaymentError::ConflictingParent(_))));
        assert_eq!(
            payment.parent(),
            Some(&PaymentParent::Order(Order::new("ORD-1")))
        );

        payment.set_order(Order::new("ORD-2")).unwrap();
        assert_eq!(
            payment
                .parent()
                .map(|parent| parent.payments_path().unwrap()),
            Some("/v2/orders/ORD-2/payments".to_string())
        );
    }

    #[test]
    fn test_populate_returns_new_snapshot() {
        let payment = Payment::for_order(Order::new("ORD-1"));
        let response = object(json!({
            "id": "PAY-1",
            "status": "AUTHORIZED",
            "amount": { "total": 1000, "currency": "BRL" },
            "installmentCount": 2,
            "fundingInstrument": { "method": "BOLETO" },
            "_links": { "self": { "href": "https://api/v2/payments/PAY-1" } }
        }));

        let populated = payment.populate(&response);

        assert_eq!(populated.id(), Some("PAY-1"));
        assert_eq!(populated.status(), Some(&PaymentStatus::Authorized));
        assert_eq!(
            populated.amount(),
            Some(&Amount {
                total: Some(1000),
                currency: Some("BRL".to_string())
            })
        );
        let details = populated.details().unwrap();
        assert_eq!(details.installment_count, Some(2));
        assert_eq!(details.funding_instrument, Some(json!({ "method": "BOLETO" })));
        assert!(details.links.is_some());
        assert_eq!(populated.parent(), payment.parent());

        assert!(payment.details().is_none());
        assert_eq!(payment.id(), None);
    }

    #[test]
    fn test_populate_tolerates_missing_fields() {
        let populated = Payment::new().populate(&object(json!({ "id": "PAY-2" })));
        let details = populated.details().unwrap();

        assert_eq!(details.id.as_deref(), Some("PAY-2"));
        assert!(details.amount.is_none());
        assert!(details.fees.is_none());
        assert!(details.refunds.is_none());
        assert!(details.links.is_none());
        assert!(details.status.is_none());
    }

    #[test]
    fn test_populate_partial_amount() {
        let response = object(json!({ "amount": { "currency": "BRL" } }));
        let populated = Payment::new().populate(&response);
        assert_eq!(
            populated.amount(),
            Some(&Amount {
                total: None,
                currency: Some("BRL".to_string())
            })
        );
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let populated = Payment::new().populate(&object(json!({ "status": "DISPUTED" })));
        assert_eq!(
            populated.status(),
            Some(&PaymentStatus::Other("DISPUTED".to_string()))
        );
        assert_eq!(populated.status().unwrap().to_string(), "DISPUTED");
    }
}
