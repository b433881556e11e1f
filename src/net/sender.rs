// src/net/sender.rs
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderValue, CONTENT_TYPE};

use crate::config::AppConfig;
use crate::net::message::{Message, RawResponse};
use crate::net::{probe_reachability, Method, ParamEncoding};

/// Transport seam. The handler is constructed against this trait so tests
/// can script responses without a server.
pub trait NetworkSender {
    /// Execute one prepared message, capturing transport failures into the
    /// returned response instead of propagating them.
    fn execute(&self, message: &Message) -> RawResponse;

    /// Used only to phrase failure messages.
    fn is_reachable(&self) -> bool {
        probe_reachability()
    }
}

pub struct HttpSender {
    client: Client,
}

impl HttpSender {
    pub fn new(cfg: &AppConfig) -> Result<Self, String> {
        let client = Client::builder()
            .user_agent("cinesearch/0.1")
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()
            .map_err(|e| format!("http client: {e}"))?;
        Ok(Self { client })
    }
}

impl NetworkSender for HttpSender {
    fn execute(&self, message: &Message) -> RawResponse {
        let request = match message.method {
            Method::Get => self.client.get(&message.path),
            Method::Post => self.client.post(&message.path),
        };

        let request = match message.encoding {
            ParamEncoding::UrlQuery => request.query(&message.params),
            ParamEncoding::FormBody => request
                .header(
                    CONTENT_TYPE,
                    HeaderValue::from_static("application/x-www-form-urlencoded"),
                )
                .body(form_encode(&message.params)),
        };

        match request.send() {
            Ok(resp) => {
                let status = resp.status().as_u16();
                match resp.bytes() {
                    Ok(bytes) => RawResponse {
                        status: Some(status),
                        body: bytes.to_vec(),
                        transport_error: None,
                    },
                    Err(e) => RawResponse {
                        status: Some(status),
                        body: Vec::new(),
                        transport_error: Some(format!("read body: {e}")),
                    },
                }
            }
            Err(e) => RawResponse {
                status: None,
                body: Vec::new(),
                transport_error: Some(format!("{} {}: {e}", message.method.as_str(), message.path)),
            },
        }
    }
}

fn form_encode(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::form_encode;

    #[test]
    fn form_encoding_escapes_reserved_characters() {
        let params = vec![
            ("query".to_string(), "dark knight & robin".to_string()),
            ("page".to_string(), "1".to_string()),
        ];
        assert_eq!(
            form_encode(&params),
            "query=dark%20knight%20%26%20robin&page=1"
        );
    }
}
