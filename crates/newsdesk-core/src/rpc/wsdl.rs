//! # Service Description
//!
//! Extracts what the client needs from a WSDL 1.1 document.

use crate::xml::Document;

use super::error::{RpcError, RpcResult};

/// The parts of a WSDL document the client uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescription {
    /// Target namespace of the request/response wrapper elements.
    pub namespace: String,
    /// SOAP endpoint address (`soap:address@location`).
    pub endpoint: String,
    /// Operation names declared by the port types.
    pub operations: Vec<String>,
}

impl ServiceDescription {
    /// Parses a WSDL document.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError::ServiceDescription`] when the document is not a
    /// WSDL `definitions` element or lacks a namespace or endpoint address.
    pub fn parse(wsdl: &str) -> RpcResult<Self> {
        let doc = Document::parse(wsdl).map_err(|e| RpcError::ServiceDescription(e.to_string()))?;
        let root = &doc.root;

        if root.local_name() != "definitions" {
            return Err(RpcError::ServiceDescription(format!(
                "expected definitions, found {}",
                root.name
            )));
        }

        let namespace = root
            .attribute("targetNamespace")
            .ok_or_else(|| RpcError::ServiceDescription("missing targetNamespace".to_string()))?
            .to_string();

        let endpoint = root
            .descendants("port")
            .into_iter()
            .find_map(|port| port.child("address")?.attribute("location"))
            .ok_or_else(|| RpcError::ServiceDescription("missing endpoint address".to_string()))?
            .to_string();

        let mut operations: Vec<String> = Vec::new();
        for port_type in root.descendants("portType") {
            for op in port_type.elements().filter(|el| el.local_name() == "operation") {
                if let Some(name) = op.attribute("name") {
                    if !operations.iter().any(|known| known == name) {
                        operations.push(name.to_string());
                    }
                }
            }
        }

        Ok(Self {
            namespace,
            endpoint,
            operations,
        })
    }

    /// Whether the service offers an operation.
    #[must_use]
    pub fn offers(&self, operation: &str) -> bool {
        self.operations.iter().any(|op| op == operation)
    }
}

#[cfg(test)]
pub(crate) const SAMPLE_WSDL: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<wsdl:definitions xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
    xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
    xmlns:tns="http://soap.newsplatform.com/"
    name="UserWebServiceImplService" targetNamespace="http://soap.newsplatform.com/">
  <wsdl:portType name="UserWebService">
    <wsdl:operation name="listUsers"/>
    <wsdl:operation name="addUser"/>
    <wsdl:operation name="updateUser"/>
    <wsdl:operation name="deleteUser"/>
    <wsdl:operation name="authenticateUser"/>
  </wsdl:portType>
  <wsdl:binding name="UserWebServiceImplServiceSoapBinding" type="tns:UserWebService">
    <wsdl:operation name="listUsers"/>
  </wsdl:binding>
  <wsdl:service name="UserWebServiceImplService">
    <wsdl:port binding="tns:UserWebServiceImplServiceSoapBinding" name="UserWebServiceImplPort">
      <soap:address location="{endpoint}"/>
    </wsdl:port>
  </wsdl:service>
</wsdl:definitions>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_description() {
        let wsdl = SAMPLE_WSDL.replace("{endpoint}", "http://localhost:8080/soap/users");
        let desc = ServiceDescription::parse(&wsdl).unwrap();

        assert_eq!(desc.namespace, "http://soap.newsplatform.com/");
        assert_eq!(desc.endpoint, "http://localhost:8080/soap/users");
        assert_eq!(desc.operations.len(), 5);
        assert!(desc.offers("deleteUser"));
        assert!(!desc.offers("authenticate"));
    }

    #[test]
    fn test_non_wsdl_document_is_rejected() {
        let result = ServiceDescription::parse("<html><body>login</body></html>");
        assert!(matches!(result, Err(RpcError::ServiceDescription(_))));
    }

    #[test]
    fn test_missing_address_is_rejected() {
        let result = ServiceDescription::parse(
            r#"<definitions targetNamespace="urn:x"><portType name="p"/></definitions>"#,
        );
        assert!(matches!(result, Err(RpcError::ServiceDescription(_))));
    }
}
