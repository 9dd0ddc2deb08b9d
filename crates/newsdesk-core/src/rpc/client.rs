//! # SOAP Client
//!
//! Client for the user-management web service.

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use crate::api::{Record, UserDraft};

use super::envelope::{self, Param, Reply};
use super::error::{RpcError, RpcResult};
use super::wsdl::ServiceDescription;

/// Path of the service description, relative to the backend base URL.
pub const SERVICE_DESCRIPTION_PATH: &str = "/soap/users?wsdl";

/// SOAP client bound to one session credential.
///
/// Constructed once per login from the fetched service description. Every
/// call sends the credential both as the `authToken` argument and as an
/// `Authorization: Bearer` header.
#[derive(Clone)]
pub struct RpcClient {
    http: Client,
    description: ServiceDescription,
    token: String,
}

impl RpcClient {
    /// Fetches the service description and builds a client from it.
    ///
    /// # Errors
    ///
    /// * [`RpcError::Network`] - Description could not be fetched
    /// * [`RpcError::ServiceDescription`] - Non-success status or unusable document
    pub async fn connect(http: Client, base_url: &str, token: &str) -> RpcResult<Self> {
        let url = format!("{}{}", base_url.trim_end_matches('/'), SERVICE_DESCRIPTION_PATH);
        let res = http.get(&url).bearer_auth(token).send().await?;

        if !res.status().is_success() {
            return Err(RpcError::ServiceDescription(format!(
                "{} answered {}",
                url,
                res.status()
            )));
        }

        let wsdl = res.text().await?;
        let description = ServiceDescription::parse(&wsdl)?;
        tracing::debug!(endpoint = %description.endpoint, "RPC service description loaded");

        Ok(Self {
            http,
            description,
            token: token.to_string(),
        })
    }

    async fn call(&self, operation: &str, params: &[(&str, Param)]) -> RpcResult<Vec<Reply>> {
        if !self.description.offers(operation) {
            return Err(RpcError::UnknownOperation(operation.to_string()));
        }

        let request = envelope::encode(&self.description.namespace, operation, params);
        let res = self
            .http
            .post(&self.description.endpoint)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", "\"\"")
            .bearer_auth(&self.token)
            .body(request)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        match envelope::decode(operation, &body) {
            Err(RpcError::Fault(reason)) => Err(RpcError::Fault(reason)),
            _ if !status.is_success() => Err(RpcError::Status {
                status: status.as_u16(),
                message: body,
            }),
            decoded => decoded,
        }
    }

    fn credential(&self) -> (&'static str, Param) {
        ("authToken", Param::Scalar(self.token.clone()))
    }

    /// Checks a username/password pair against the service.
    ///
    /// # Errors
    ///
    /// Any [`RpcError`]; a reply without a boolean is [`RpcError::UnexpectedReply`].
    pub async fn authenticate_user(&self, username: &str, password: &str) -> RpcResult<bool> {
        let params = [
            ("username", Param::Scalar(username.to_string())),
            ("password", Param::Scalar(password.to_string())),
        ];
        let replies = self.call("authenticateUser", &params).await?;

        replies
            .first()
            .and_then(Reply::as_bool)
            .ok_or_else(|| RpcError::UnexpectedReply("authenticateUser: no boolean".to_string()))
    }

    /// Lists all users. An empty reply is a valid empty list.
    ///
    /// # Errors
    ///
    /// Any [`RpcError`].
    pub async fn list_users(&self) -> RpcResult<Vec<Record>> {
        let replies = self.call("listUsers", &[self.credential()]).await?;

        replies
            .into_iter()
            .map(|reply| match reply {
                Reply::Record(record) => Ok(record),
                Reply::Text(text) => Err(RpcError::UnexpectedReply(format!(
                    "listUsers: expected a user, got {text:?}"
                ))),
            })
            .collect()
    }

    /// Creates a user and returns the stored record.
    ///
    /// # Errors
    ///
    /// Any [`RpcError`]; a reply without a user is [`RpcError::UnexpectedReply`].
    pub async fn add_user(&self, user: &UserDraft) -> RpcResult<Record> {
        let params = [self.credential(), ("user", user_param(user))];
        single_record("addUser", self.call("addUser", &params).await?)
    }

    /// Replaces a user and returns the stored record.
    ///
    /// # Errors
    ///
    /// Any [`RpcError`]; a reply without a user is [`RpcError::UnexpectedReply`].
    pub async fn update_user(&self, id: u64, user: &UserDraft) -> RpcResult<Record> {
        let params = [
            self.credential(),
            ("userId", Param::Scalar(id.to_string())),
            ("user", user_param(user)),
        ];
        single_record("updateUser", self.call("updateUser", &params).await?)
    }

    /// Deletes a user. The operation returns nothing; absence of a fault is
    /// success.
    ///
    /// # Errors
    ///
    /// Any [`RpcError`].
    pub async fn delete_user(&self, id: u64) -> RpcResult<()> {
        let params = [self.credential(), ("userId", Param::Scalar(id.to_string()))];
        self.call("deleteUser", &params).await?;
        Ok(())
    }
}

fn user_param(user: &UserDraft) -> Param {
    Param::from_json(&serde_json::to_value(user).unwrap_or_default())
}

fn single_record(operation: &str, replies: Vec<Reply>) -> RpcResult<Record> {
    match replies.into_iter().next() {
        Some(Reply::Record(record)) => Ok(record),
        _ => Err(RpcError::UnexpectedReply(format!("{operation}: no record returned"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::wsdl::SAMPLE_WSDL;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve_description(server: &MockServer) {
        let wsdl = SAMPLE_WSDL.replace("{endpoint}", &format!("{}/soap/users", server.uri()));
        Mock::given(method("GET"))
            .and(path("/soap/users"))
            .respond_with(ResponseTemplate::new(200).set_body_string(wsdl))
            .mount(server)
            .await;
    }

    fn envelope(inner: &str) -> String {
        format!(
            "<soap:Envelope xmlns:soap=\"http://schemas.xmlsoap.org/soap/envelope/\"><soap:Body>{inner}</soap:Body></soap:Envelope>"
        )
    }

    #[tokio::test]
    async fn test_connect_fails_without_description() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/soap/users"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let result = RpcClient::connect(Client::new(), &mock_server.uri(), "jwt").await;
        assert!(matches!(result, Err(RpcError::ServiceDescription(_))));
    }

    #[tokio::test]
    async fn test_list_users_sends_credential() {
        let mock_server = MockServer::start().await;
        serve_description(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/soap/users"))
            .and(header("authorization", "Bearer jwt"))
            .and(body_string_contains("<authToken>jwt</authToken>"))
            .respond_with(ResponseTemplate::new(200).set_body_string(envelope(
                "<ns2:listUsersResponse xmlns:ns2=\"http://soap.newsplatform.com/\">\
                 <return><id>1</id><username>admin</username></return>\
                 </ns2:listUsersResponse>",
            )))
            .expect(1)
            .mount(&mock_server)
            .await;

        let rpc = RpcClient::connect(Client::new(), &mock_server.uri(), "jwt")
            .await
            .unwrap();
        let users = rpc.list_users().await.unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].text("username"), "admin");
    }

    #[tokio::test]
    async fn test_fault_status_is_reported_as_fault() {
        let mock_server = MockServer::start().await;
        serve_description(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/soap/users"))
            .respond_with(ResponseTemplate::new(500).set_body_string(envelope(
                "<soap:Fault><faultcode>soap:Server</faultcode><faultstring>boom</faultstring></soap:Fault>",
            )))
            .mount(&mock_server)
            .await;

        let rpc = RpcClient::connect(Client::new(), &mock_server.uri(), "jwt")
            .await
            .unwrap();

        assert!(matches!(rpc.delete_user(3).await, Err(RpcError::Fault(_))));
    }

    #[tokio::test]
    async fn test_delete_user_empty_reply_is_success() {
        let mock_server = MockServer::start().await;
        serve_description(&mock_server).await;

        Mock::given(method("POST"))
            .and(path("/soap/users"))
            .and(body_string_contains("<userId>3</userId>"))
            .respond_with(ResponseTemplate::new(200).set_body_string(envelope(
                "<ns2:deleteUserResponse xmlns:ns2=\"http://soap.newsplatform.com/\"/>",
            )))
            .mount(&mock_server)
            .await;

        let rpc = RpcClient::connect(Client::new(), &mock_server.uri(), "jwt")
            .await
            .unwrap();

        assert!(rpc.delete_user(3).await.is_ok());
    }
}
