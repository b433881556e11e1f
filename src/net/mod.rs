// src/net/mod.rs
use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

pub mod message;
pub mod sender;

pub use message::{Completed, Message, RawResponse};
pub use sender::{HttpSender, NetworkSender};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamEncoding {
    /// Parameters appended to the URL query string.
    UrlQuery,
    /// Parameters form-encoded into the request body.
    FormBody,
}

/// Cheap connectivity probe used only to phrase failure messages: tries a
/// TCP connect to well-known public resolvers with a short timeout.
pub fn probe_reachability() -> bool {
    const PROBE_ADDRS: [&str; 2] = ["1.1.1.1:53", "8.8.8.8:53"];

    for addr in PROBE_ADDRS {
        let Ok(addr) = addr.parse::<SocketAddr>() else {
            continue;
        };
        if TcpStream::connect_timeout(&addr, Duration::from_secs(1)).is_ok() {
            return true;
        }
    }
    false
}
