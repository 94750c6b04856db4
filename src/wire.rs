use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{CountryStatus, ServiceStatus, TransportFault, ValidationRequest};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckVatRequest<'a> {
    pub country_code: &'a str,
    pub vat_number: &'a str,
}

impl<'a> From<&'a ValidationRequest> for CheckVatRequest<'a> {
    fn from(request: &'a ValidationRequest) -> Self {
        Self {
            country_code: request.country_code(),
            vat_number: request.identifier().as_str(),
        }
    }
}

/// Returns the fault carried by a check reply, if any.
///
/// Faults may arrive with HTTP 200. Any non-empty `errorWrappers` is a fault,
/// whatever its shape, and so is an `actionSucceed` flag that is not `true`.
pub fn fault_in(reply: &Value) -> Option<TransportFault> {
    match reply.get("errorWrappers") {
        None | Some(Value::Null) => {}
        Some(Value::Array(wrappers)) if wrappers.is_empty() => {}
        Some(Value::Array(wrappers)) => return Some(describe_wrapper(&wrappers[0])),
        Some(other) => return Some(describe_wrapper(other)),
    }

    let succeeded = match reply.get("actionSucceed") {
        None | Some(Value::Null) => true,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag.trim().eq_ignore_ascii_case("true"),
        Some(_) => false,
    };
    (!succeeded).then(|| TransportFault::new("remote action did not succeed"))
}

// Prefers a textual `message`, then the `error` code, then whatever else is there.
fn describe_wrapper(wrapper: &Value) -> TransportFault {
    let message = match wrapper {
        Value::Object(fields) => text(fields.get("message"))
            .or_else(|| text(fields.get("error")))
            .or_else(|| scalar(fields.get("message")))
            .or_else(|| scalar(fields.get("error"))),
        other => text(Some(other)).or_else(|| scalar(Some(other))),
    };
    TransportFault::new(message.unwrap_or_else(|| "unknown error".to_owned()))
}

fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_owned)
}

fn scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::String(_) => None,
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub vow: Option<VowStatus>,
    #[serde(default)]
    pub countries: Vec<CountryEntry>,
}

#[derive(Debug, Deserialize)]
pub struct VowStatus {
    pub available: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryEntry {
    pub country_code: String,
    pub availability: String,
}

impl From<StatusResponse> for ServiceStatus {
    fn from(response: StatusResponse) -> Self {
        Self {
            available: response.vow.is_some_and(|vow| vow.available),
            countries: response
                .countries
                .into_iter()
                .map(|entry| CountryStatus {
                    country_code: entry.country_code,
                    availability: entry.availability,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{fault_in, CheckVatRequest, StatusResponse};
    use crate::{ServiceStatus, ValidationRequest};

    #[test]
    fn check_request_serialization() {
        let request = ValidationRequest::new(123456789u64, "de");
        let json = serde_json::to_string(&CheckVatRequest::from(&request)).unwrap();
        assert!(json.contains("\"countryCode\":\"DE\""));
        assert!(json.contains("\"vatNumber\":\"123456789\""));
    }

    #[test]
    fn error_wrapper_message_wins_over_code() {
        let fault = fault_in(&json!({
            "actionSucceed": false,
            "errorWrappers": [{ "error": "MS_UNAVAILABLE", "message": "member state down" }]
        }))
        .unwrap();
        assert_eq!(fault.message(), "member state down");
    }

    #[test]
    fn error_wrapper_falls_back_to_code() {
        let fault = fault_in(&json!({ "errorWrappers": [{ "error": "INVALID_INPUT" }] })).unwrap();
        assert_eq!(fault.message(), "INVALID_INPUT");
    }

    #[test]
    fn non_string_wrapper_fields_are_still_faults() {
        let fault = fault_in(&json!({
            "actionSucceed": false,
            "errorWrappers": [{ "error": "MS_UNAVAILABLE", "message": 42 }]
        }))
        .unwrap();
        assert_eq!(fault.message(), "MS_UNAVAILABLE");

        let fault = fault_in(&json!({ "errorWrappers": [{ "message": 42 }] })).unwrap();
        assert_eq!(fault.message(), "42");
    }

    #[test]
    fn wrappers_outside_an_array_are_faults() {
        let fault = fault_in(&json!({
            "actionSucceed": false,
            "errorWrappers": "MS_UNAVAILABLE"
        }))
        .unwrap();
        assert_eq!(fault.message(), "MS_UNAVAILABLE");

        let fault = fault_in(&json!({ "errorWrappers": { "error": "TIMEOUT" } })).unwrap();
        assert_eq!(fault.message(), "TIMEOUT");
    }

    #[test]
    fn action_flag_other_than_true_is_a_fault() {
        for reply in [
            json!({ "actionSucceed": false }),
            json!({ "actionSucceed": "false" }),
            json!({ "actionSucceed": 0 }),
        ] {
            let fault = fault_in(&reply).unwrap();
            assert_eq!(fault.message(), "remote action did not succeed");
        }
    }

    #[test]
    fn regular_reply_has_no_fault() {
        assert!(fault_in(&json!({ "valid": true, "name": "ACME" })).is_none());
        assert!(fault_in(&json!({ "valid": false, "actionSucceed": true })).is_none());
        assert!(fault_in(&json!({ "valid": true, "errorWrappers": [] })).is_none());
        assert!(fault_in(&json!({ "valid": true, "errorWrappers": null })).is_none());
    }

    #[test]
    fn status_response_decodes_countries() {
        let response: StatusResponse = serde_json::from_value(json!({
            "vow": { "available": true },
            "countries": [
                { "countryCode": "AT", "availability": "Available" },
                { "countryCode": "DE", "availability": "Unavailable" }
            ]
        }))
        .unwrap();
        let status = ServiceStatus::from(response);
        assert!(status.available);
        assert_eq!(status.countries.len(), 2);
        assert_eq!(status.is_available("de"), Some(false));
    }
}
