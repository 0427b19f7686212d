use crate::domain::parent::path_segment;
use crate::domain::payment::Payment;
use crate::domain::ports::{HttpMethod, HttpRequest, HttpResponse, HttpTransportBox};
use crate::error::{PaymentError, Result};
use serde_json::{Map, Value};

/// Creates and fetches payments on the payment service.
///
/// `PaymentService` owns the HTTP transport and performs exactly one request
/// per call. It never retries and never returns a partially populated payment:
/// either the server accepted the request and a fresh snapshot comes back, or
/// an error does.
pub struct PaymentService {
    transport: HttpTransportBox,
}

impl PaymentService {
    /// Creates a new `PaymentService` over the given transport.
    pub fn new(transport: HttpTransportBox) -> Self {
        Self { transport }
    }

    /// Submits `payment` to the order or multiorder it is bound to.
    ///
    /// Returns a new payment populated from the server's response. The
    /// argument is left as it was.
    #[tracing::instrument(
        name = "Create Payment",
        skip_all,
        fields(method = %HttpMethod::Post, path = tracing::field::Empty)
    )]
    pub async fn execute(&self, payment: &Payment) -> Result<Payment> {
        let parent = payment.parent().ok_or(PaymentError::MissingParent)?;
        let path = parent.payments_path()?;
        tracing::Span::current().record("path", path.as_str());

        let body = payment.to_request_body()?;
        let request = HttpRequest::new(HttpMethod::Post, path)
            .add_header("Content-Type", "application/json")
            .add_header("Content-Length", body.len().to_string())
            .set_body(body);

        let response = self.send(request).await?;
        Ok(payment.populate(&response))
    }

    /// Fetches a payment by its server id.
    #[tracing::instrument(
        name = "Get Payment by ID",
        skip(self),
        fields(method = %HttpMethod::Get)
    )]
    pub async fn get(&self, id: &str) -> Result<Payment> {
        let path = format!("/v2/payments/{}", path_segment(id)?);
        let request = HttpRequest::new(HttpMethod::Get, path);
        let response = self.send(request).await?;
        Ok(Payment::new().populate(&response))
    }

    async fn send(&self, request: HttpRequest) -> Result<Map<String, Value>> {
        let method = request.method;
        tracing::info!(%method, path = %request.path, "Sending request");

        let response = self.transport.execute(request).await?;
        let object = decode_response(response)?;

        tracing::info!(%method, "Request accepted");
        Ok(object)
    }
}

/// Accepts 200 and 201 carrying a JSON object; anything else is an error.
fn decode_response(response: HttpResponse) -> Result<Map<String, Value>> {
    if response.status_code != 200 && response.status_code != 201 {
        tracing::warn!(
            status_code = response.status_code,
            status_message = %response.status_message,
            "Payment service rejected the request"
        );
        return Err(PaymentError::RequestFailed {
            status_code: response.status_code,
            status_message: response.status_message,
        });
    }

    match serde_json::from_str::<Value>(&response.content) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => {
            tracing::warn!(kind = json_kind(&other), "Response body is not an object");
            Err(PaymentError::UnexpectedResponseShape(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )))
        }
        Err(e) => {
            tracing::warn!(error = %e, "Response body is not valid JSON");
            Err(PaymentError::UnexpectedResponseShape(format!(
                "body is not valid JSON: {}",
                e
            )))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
