// src/core/net.rs
//
// Blocking HTTPS client shared by the tracker API, the crawlers and the card
// avatar fetch. Non-2xx statuses are errors; callers decide whether to swallow.

use std::{error::Error, time::Duration};

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::consts::{HTTP_TIMEOUT_SECS, USER_AGENT};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

#[derive(Clone)]
pub struct Http {
    client: Client,
    cookie: Option<String>,
}

impl Http {
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .default_headers(headers)
            .build()?;
        Ok(Self { client, cookie: None })
    }

    /// Send `Cookie:` on every request (logged-in crawling).
    pub fn with_cookie(mut self, cookie: &str) -> Self {
        let c = cookie.trim();
        self.cookie = (!c.is_empty()).then(|| s!(c));
        self
    }

    fn prepare(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.cookie {
            Some(c) => req.header(COOKIE, c.as_str()),
            None => req,
        }
    }

    fn send(&self, req: RequestBuilder, url: &str) -> Result<Response, Box<dyn Error>> {
        let resp = self.prepare(req).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("HTTP error: {} {}", status, url).into());
        }
        Ok(resp)
    }

    pub fn get_text(&self, url: &str) -> Result<String, Box<dyn Error>> {
        logd!("HTTP: GET {}", url);
        Ok(self.send(self.client.get(url), url)?.text()?)
    }

    /// GET with extra request headers (e.g. a bearer token for the contest API).
    pub fn get_text_with(&self, url: &str, extra: &[(&str, &str)]) -> Result<String, Box<dyn Error>> {
        logd!("HTTP: GET {} (+{} header(s))", url, extra.len());
        let mut req = self.client.get(url);
        for (k, v) in extra {
            req = req.header(*k, *v);
        }
        Ok(self.send(req, url)?.text()?)
    }

    pub fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, Box<dyn Error>> {
        let body = self.get_text(url)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Body text plus its content type (lowercased, may be empty).
    pub fn get_with_type(&self, url: &str) -> Result<(String, String), Box<dyn Error>> {
        logd!("HTTP: GET {}", url);
        let resp = self.send(self.client.get(url), url)?;
        let ctype = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or_default();
        Ok((resp.text()?, ctype))
    }

    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>, Box<dyn Error>> {
        logd!("HTTP: GET {} (bytes)", url);
        Ok(self.send(self.client.get(url), url)?.bytes()?.to_vec())
    }

    /// POST an already-encoded form body. The body is sent verbatim so callers
    /// control which characters get escaped.
    pub fn post_form<T: DeserializeOwned>(&self, url: &str, body: String) -> Result<T, Box<dyn Error>> {
        logd!("HTTP: POST {} ({} bytes)", url, body.len());
        let req = self.client.post(url).header(CONTENT_TYPE, FORM_CONTENT_TYPE).body(body);
        let text = self.send(req, url)?.text()?;
        Ok(serde_json::from_str(&text)?)
    }

    /// POST with no body; parameters travel in the query string.
    /// An empty or non-JSON reply reads as `{}`.
    pub fn post_empty(&self, url: &str) -> Result<Value, Box<dyn Error>> {
        logd!("HTTP: POST {}", url);
        let text = self.send(self.client.post(url), url)?.text()?;
        Ok(lenient_json(&text))
    }

    pub fn post_json<T: DeserializeOwned>(&self, url: &str, body: &Value) -> Result<T, Box<dyn Error>> {
        logd!("HTTP: POST {} (json)", url);
        let text = self.send(self.client.post(url).json(body), url)?.text()?;
        Ok(serde_json::from_str(&text)?)
    }
}

pub fn lenient_json(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Object(Default::default());
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::Object(Default::default()))
}

/// Hand-built `k=v&…` form body. Values listed in `raw` are left unescaped.
pub fn form_body(pairs: &[(&str, &str)], raw: &[&str]) -> String {
    pairs
        .iter()
        .map(|(k, v)| {
            let value = if raw.contains(k) {
                s!(*v)
            } else {
                url::form_urlencoded::byte_serialize(v.as_bytes()).collect::<String>()
            };
            join!(*k, "=", &value)
        })
        .collect::<Vec<_>>()
        .join("&")
}
