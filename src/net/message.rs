// src/net/message.rs — generic envelope for one API request/response
//
// Processes received data and server-reported errors for every request the
// crate issues. A completed envelope is consumed by `finish`, which resolves
// it into exactly one of success/failure and pushes failure text to the
// warning channel.
use serde_json::Value;
use tracing::{debug, error, info};

use crate::net::{Method, ParamEncoding};
use crate::warning::WarningSink;

pub const NO_CONNECTION_MESSAGE: &str =
    "No internet connection. Please check your connection status and try again.";
pub const SERVER_UNAVAILABLE_MESSAGE: &str =
    "Could not connect to the server. Please try again later.";

/// Raw outcome of one HTTP exchange as captured by the sender. A transport
/// error (DNS, timeout, refused connection) leaves `status` unset.
#[derive(Clone, Debug, Default)]
pub struct RawResponse {
    pub status: Option<u16>,
    pub body: Vec<u8>,
    pub transport_error: Option<String>,
}

#[derive(Debug)]
pub struct Message {
    pub path: String,
    pub method: Method,
    pub params: Vec<(String, String)>,
    pub encoding: ParamEncoding,
    pub response: Option<RawResponse>,
    pub error_message: Option<String>,
}

/// A resolved request. Constructed only by `Message::finish`, so each
/// request produces exactly one of the two.
#[derive(Debug)]
pub enum Completed {
    Success(Message),
    Failure(Message),
}

impl Message {
    pub fn get(path: String) -> Self {
        Self {
            path,
            method: Method::Get,
            params: Vec::new(),
            encoding: ParamEncoding::UrlQuery,
            response: None,
            error_message: None,
        }
    }

    pub fn post(path: String) -> Self {
        Self {
            method: Method::Post,
            encoding: ParamEncoding::FormBody,
            ..Self::get(path)
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    /// Accept only transport-clean responses with a 2xx status and no
    /// server-embedded error message. Derives `error_message` as a side
    /// effect so the failure path can reuse it.
    pub fn check_acceptance(&mut self) -> bool {
        let Some(resp) = &self.response else {
            return false;
        };
        if resp.transport_error.is_some() {
            return false;
        }

        self.error_message = self.server_error_message();

        matches!(resp.status, Some(status) if (200..300).contains(&status))
            && self.error_message.is_none()
    }

    /// Servers report application errors as an `errors` array in an
    /// otherwise well-formed body; concatenate its strings.
    fn server_error_message(&self) -> Option<String> {
        let resp = self.response.as_ref()?;
        let value: Value = serde_json::from_slice(&resp.body).ok()?;
        let errors = value.get("errors")?.as_array()?;

        let joined: String = errors.iter().filter_map(Value::as_str).collect();
        if joined.is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// Single entry point once the sender has filled `response`. Resolves
    /// the envelope, logging the outcome; on failure a message missing
    /// server-supplied text gets one synthesized from reachability, and the
    /// result is pushed to the warning channel.
    pub fn finish<F>(mut self, reachable: F, warnings: &dyn WarningSink) -> Completed
    where
        F: FnOnce() -> bool,
    {
        let status = self.response.as_ref().and_then(|r| r.status);

        if self.check_acceptance() {
            info!("[NETWORK][SUCCESS] {} code: {:?}", self.path, status);
            debug!("response content: {}", self.body_as_string());
            Completed::Success(self)
        } else {
            let transport = self
                .response
                .as_ref()
                .and_then(|r| r.transport_error.clone())
                .unwrap_or_default();
            error!(
                "[NETWORK][FAILURE] {} code: {:?} {} {}",
                self.path,
                status,
                transport,
                self.error_message.as_deref().unwrap_or_default()
            );

            let message = match self.error_message.clone() {
                Some(msg) => msg,
                None => {
                    let msg = if reachable() {
                        SERVER_UNAVAILABLE_MESSAGE
                    } else {
                        NO_CONNECTION_MESSAGE
                    };
                    self.error_message = Some(msg.to_string());
                    msg.to_string()
                }
            };
            warnings.push(&message, "Ok");
            Completed::Failure(self)
        }
    }

    // ---- body parsing helpers (each independently fallible) ----

    pub fn body_as_string(&self) -> String {
        let Some(resp) = &self.response else {
            return String::new();
        };
        match serde_json::from_slice::<Value>(&resp.body) {
            Ok(value) => value.to_string(),
            Err(err) => {
                error!("Error parsing response data: {err}");
                String::new()
            }
        }
    }

    pub fn body_as_map(&self) -> Option<serde_json::Map<String, Value>> {
        let resp = self.response.as_ref()?;
        match serde_json::from_slice::<Value>(&resp.body) {
            Ok(Value::Object(map)) => Some(map),
            Ok(_) => None,
            Err(err) => {
                error!("Error parsing response data: {err}");
                None
            }
        }
    }

    pub fn body_as_list(&self) -> Option<Vec<Value>> {
        let resp = self.response.as_ref()?;
        match serde_json::from_slice::<Value>(&resp.body) {
            Ok(Value::Array(list)) => Some(list),
            Ok(_) => None,
            Err(err) => {
                error!("Error parsing response data: {err}");
                None
            }
        }
    }
}
