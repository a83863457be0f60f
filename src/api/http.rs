use std::time::Duration;

use crate::api::types::{
    BatchGetResponse, ConnectionsPage, ContactGroup, ContactGroupList,
};
use crate::config::Config;
use crate::error::{ReportError, ReportResult};

const PERSON_FIELDS: &str =
    "names,birthdays,memberships,emailAddresses,phoneNumbers,addresses,biographies";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The outbound surface of the contacts/mail service. Tests substitute an
/// in-memory implementation.
pub trait ContactsApi {
    /// One page of the connections listing. `page_token` of None starts
    /// the walk.
    fn list_connections(
        &self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> ReportResult<ConnectionsPage>;

    fn list_groups(&self) -> ReportResult<Vec<ContactGroup>>;

    fn batch_get_groups(&self, resource_names: &[String]) -> ReportResult<Vec<ContactGroup>>;

    fn create_group(&self, name: &str) -> ReportResult<ContactGroup>;

    /// Send a fully built, web-safe-base64-encoded MIME message.
    fn send_raw_message(&self, raw: &str) -> ReportResult<()>;
}

/// REST client over ureq.
pub struct HttpContactsApi {
    base_url: String,
    token: String,
    agent: ureq::Agent,
}

impl HttpContactsApi {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    fn get(&self, path: &str) -> ureq::Request {
        self.authorize(self.agent.get(&format!("{}{}", self.base_url, path)))
    }

    fn post(&self, path: &str) -> ureq::Request {
        self.authorize(self.agent.post(&format!("{}{}", self.base_url, path)))
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        if self.token.is_empty() {
            request
        } else {
            request.set("Authorization", &format!("Bearer {}", self.token))
        }
    }
}

/// Maps a ureq failure onto the crate error, keeping a short response excerpt
/// for status errors.
fn api_error(err: ureq::Error) -> ReportError {
    match err {
        ureq::Error::Status(code, resp) => {
            let body = resp.into_string().unwrap_or_default();
            ReportError::Api(format!("HTTP {}: {}", code, body_excerpt(&body)))
        }
        ureq::Error::Transport(t) => ReportError::Api(format!("transport error: {}", t)),
    }
}

/// At most 200 bytes of the body, backed off to a char boundary so the cut
/// never lands inside a multibyte character.
fn body_excerpt(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

fn parse_json<T: serde::de::DeserializeOwned>(response: ureq::Response) -> ReportResult<T> {
    response
        .into_json::<T>()
        .map_err(|e| ReportError::Api(format!("invalid response body: {}", e)))
}

impl ContactsApi for HttpContactsApi {
    fn list_connections(
        &self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> ReportResult<ConnectionsPage> {
        let mut request = self
            .get("/v1/people/me/connections")
            .query("personFields", PERSON_FIELDS)
            .query("pageSize", &page_size.to_string());
        if let Some(token) = page_token {
            request = request.query("pageToken", token);
        }

        let response = request.call().map_err(api_error)?;
        parse_json(response)
    }

    fn list_groups(&self) -> ReportResult<Vec<ContactGroup>> {
        let response = self.get("/v1/contactGroups").call().map_err(api_error)?;
        let list: ContactGroupList = parse_json(response)?;
        Ok(list.contact_groups)
    }

    fn batch_get_groups(&self, resource_names: &[String]) -> ReportResult<Vec<ContactGroup>> {
        let mut request = self.get("/v1/contactGroups:batchGet");
        for name in resource_names {
            request = request.query("resourceNames", name);
        }

        let response = request.call().map_err(api_error)?;
        let batch: BatchGetResponse = parse_json(response)?;
        Ok(batch
            .responses
            .into_iter()
            .filter_map(|r| r.contact_group)
            .collect())
    }

    fn create_group(&self, name: &str) -> ReportResult<ContactGroup> {
        let body = serde_json::json!({ "contactGroup": { "name": name } });
        let response = self
            .post("/v1/contactGroups")
            .send_json(body)
            .map_err(api_error)?;
        parse_json(response)
    }

    fn send_raw_message(&self, raw: &str) -> ReportResult<()> {
        let body = serde_json::json!({ "raw": raw });
        self.post("/gmail/v1/users/me/messages/send")
            .send_json(body)
            .map_err(api_error)?;
        Ok(())
    }
}
