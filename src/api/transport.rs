use std::time::Duration;

use log::debug;
use ureq::{Agent, RequestBuilder};

use super::{Method, Request, Response, Transport};
use crate::config::ClientConfig;
use crate::errors::Result;

const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// Blocking HTTP transport backed by a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
    config: ClientConfig,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            // Statuses go through the classifier instead.
            .http_status_as_error(false)
            .build();
        let agent: Agent = agent_config.into();
        UreqTransport {
            agent,
            config: config.clone(),
        }
    }

    fn prepare<B>(&self, mut builder: RequestBuilder<B>, request: &Request) -> RequestBuilder<B> {
        builder = builder.header("User-Agent", self.config.user_agent.as_str());
        for (key, value) in &request.query {
            builder = builder.query(key.as_str(), value.as_str());
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if request.body.is_some() {
            builder = builder.header("Content-Type", XML_CONTENT_TYPE);
        }
        builder
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &Request) -> Result<Response> {
        let url = self.config.url(&request.path);
        let body = request.body.as_deref().unwrap_or("");
        debug!(method = request.method.as_str(), url = url.as_str(); "Sending request");

        let result = match request.method {
            Method::Get => self.prepare(self.agent.get(&url), request).call(),
            Method::Put => self.prepare(self.agent.put(&url), request).send(body),
            Method::Post => self.prepare(self.agent.post(&url), request).send(body),
            Method::Delete => self.prepare(self.agent.delete(&url), request).force_send_body().send(body),
        };
        let mut response = result?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;
        debug!(method = request.method.as_str(), url = url.as_str(), status = status; "Received response");
        Ok(Response { status, body })
    }
}
