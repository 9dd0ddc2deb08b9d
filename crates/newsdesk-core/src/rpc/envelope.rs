//! # SOAP Envelopes
//!
//! Encoding of document/literal wrapped requests and decoding of replies.

use quick_xml::escape::{escape, partial_escape};
use serde_json::Value;

use crate::api::Record;
use crate::xml::{Document, Element};

use super::error::{RpcError, RpcResult};

const SOAP_ENV: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// An operation argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Simple typed value, sent as text.
    Scalar(String),
    /// Complex value, sent as one child element per field.
    Struct(Vec<(String, String)>),
}

impl Param {
    /// Flattens a JSON object into a struct argument. Null fields are left
    /// out; nested values are sent as their JSON text.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::Scalar(scalar_text(value));
        };

        Self::Struct(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), scalar_text(v)))
                .collect(),
        )
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A value carried by a reply's `return` elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Text-only return value.
    Text(String),
    /// Structured return value.
    Record(Record),
}

impl Reply {
    /// Interprets the value as an `xsd:boolean`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Text(t) => match t.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            Self::Record(_) => None,
        }
    }
}

/// Builds the request envelope for `operation`.
#[must_use]
pub fn encode(namespace: &str, operation: &str, params: &[(&str, Param)]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "<soap:Envelope xmlns:soap=\"{SOAP_ENV}\" xmlns:tns=\"{}\"><soap:Body><tns:{operation}>",
        escape(namespace)
    ));

    for (name, param) in params {
        match param {
            Param::Scalar(value) => {
                out.push_str(&format!("<{name}>{}</{name}>", partial_escape(value)));
            }
            Param::Struct(fields) => {
                out.push_str(&format!("<{name}>"));
                for (field, value) in fields {
                    out.push_str(&format!("<{field}>{}</{field}>", partial_escape(value)));
                }
                out.push_str(&format!("</{name}>"));
            }
        }
    }

    out.push_str(&format!("</tns:{operation}></soap:Body></soap:Envelope>"));
    out
}

/// Decodes a reply envelope into its `return` values.
///
/// # Errors
///
/// * [`RpcError::Malformed`] - Body is not XML
/// * [`RpcError::Fault`] - Envelope carries a `Fault`
/// * [`RpcError::UnexpectedReply`] - No `Body` or no `<operation>Response`
pub fn decode(operation: &str, body: &str) -> RpcResult<Vec<Reply>> {
    let doc = Document::parse(body)?;
    let soap_body = doc
        .root
        .child("Body")
        .ok_or_else(|| RpcError::UnexpectedReply("missing soap body".to_string()))?;

    if let Some(fault) = soap_body.child("Fault") {
        let reason = fault
            .child("faultstring")
            .map(Element::text)
            .unwrap_or_else(|| "unspecified fault".to_string());
        return Err(RpcError::Fault(reason));
    }

    let expected = format!("{operation}Response");
    let response = soap_body
        .child(&expected)
        .ok_or_else(|| RpcError::UnexpectedReply(format!("missing {expected}")))?;

    Ok(response
        .elements()
        .filter(|el| el.local_name() == "return")
        .map(|el| {
            if el.has_elements() {
                Reply::Record(to_record(el))
            } else {
                Reply::Text(el.text())
            }
        })
        .collect())
}

fn to_record(el: &Element) -> Record {
    let mut record = Record::new();
    for field in el.elements() {
        let value = if field.has_elements() {
            serde_json::to_value(to_record(field)).unwrap_or(Value::Null)
        } else {
            Value::String(field.text())
        };
        record.set(field.local_name(), value);
    }
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_scalar_and_struct_params() {
        let params = [
            ("authToken", Param::Scalar("jwt<1>".to_string())),
            ("user", Param::from_json(&json!({"username": "ann", "email": null}))),
        ];
        let envelope = encode("http://soap.newsplatform.com/", "addUser", &params);

        assert!(envelope.contains("<tns:addUser>"));
        assert!(envelope.contains("<authToken>jwt&lt;1&gt;</authToken>"));
        assert!(envelope.contains("<user><username>ann</username></user>"));
        assert!(!envelope.contains("email"));
    }

    #[test]
    fn test_decode_list_reply() {
        let body = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
          <soap:Body>
            <ns2:listUsersResponse xmlns:ns2="http://soap.newsplatform.com/">
              <return><id>1</id><username>admin</username><active>true</active></return>
              <return><id>2</id><username>ed</username><active>false</active></return>
            </ns2:listUsersResponse>
          </soap:Body>
        </soap:Envelope>"#;

        let replies = decode("listUsers", body).unwrap();
        assert_eq!(replies.len(), 2);
        let Reply::Record(first) = &replies[0] else {
            panic!("expected a record");
        };
        assert_eq!(first.id(), Some(1));
        assert!(first.flag("active"));
    }

    #[test]
    fn test_decode_boolean_reply() {
        let body = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body>
            <ns2:authenticateUserResponse xmlns:ns2="urn:x"><return>false</return></ns2:authenticateUserResponse>
            </soap:Body></soap:Envelope>"#;

        let replies = decode("authenticateUser", body).unwrap();
        assert_eq!(replies[0].as_bool(), Some(false));
    }

    #[test]
    fn test_decode_fault() {
        let body = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body>
            <soap:Fault><faultcode>soap:Server</faultcode><faultstring>Unauthorized</faultstring></soap:Fault>
            </soap:Body></soap:Envelope>"#;

        match decode("listUsers", body) {
            Err(RpcError::Fault(reason)) => assert_eq!(reason, "Unauthorized"),
            other => panic!("expected fault, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_wrong_response_element() {
        let body = r#"<Envelope><Body><otherResponse/></Body></Envelope>"#;
        assert!(matches!(
            decode("listUsers", body),
            Err(RpcError::UnexpectedReply(_))
        ));
    }
}
