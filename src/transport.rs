//! Narrow vocabulary shared with the transport runtime.
//!
//! The HTTP server itself lives outside this crate; these types are the only
//! surface the configuration layer needs from it: a request [`Context`], the
//! transport [`Response`] shape, and the plugin-facing intermediate
//! [`CommonResponse`] that independently compiled plugins return. The
//! [`adapt_response`] function is the single point where an intermediate
//! response is translated into a transport response.

use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;

/// Request context handed to handlers by the transport runtime.
#[derive(Debug, Default, Clone)]
pub struct Context {
    pub method: http::Method,
    pub path: String,
    pub params: HashMap<String, String>,
    pub headers: HashMap<String, String>,
}

/// Handler in the transport runtime's native calling convention.
pub type Handler = Arc<dyn Fn(&mut Context) -> Option<Response> + Send + Sync>;

/// Handler in the framework's common calling convention, as exported by
/// plugins. Adapted to [`Handler`] via [`into_handler`].
pub type CommonHandler = Arc<dyn Fn(&mut Context) -> Option<CommonResponse> + Send + Sync>;

/// Factory exported by a plugin: invoked once at initialization with the
/// parsed argument list, producing a common handler.
pub type HandlerFactory = Arc<dyn Fn(&[String]) -> anyhow::Result<CommonHandler> + Send + Sync>;

/// Opaque payload carried by a [`CommonResponse`].
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
    Bytes(Vec<u8>),
}

impl Payload {
    fn kind(&self) -> &'static str {
        match self {
            Payload::Json(_) => "json value",
            Payload::Text(_) => "string",
            Payload::Bytes(_) => "byte slice",
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Payload::Json(v) => v.clone(),
            Payload::Text(s) => Value::String(s.clone()),
            Payload::Bytes(b) => Value::String(String::from_utf8_lossy(b).into_owned()),
        }
    }
}

/// Intermediate response returned by common-convention handlers.
///
/// `content_type` is a free-form tag (`json`, `jsonp`, `text`, `xml`);
/// a status of 204 or 301/302 short-circuits before the tag is consulted.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonResponse {
    pub status: u16,
    pub content_type: String,
    pub value: Payload,
    /// The handler took ownership of the connection; the transport layer
    /// must not write anything further.
    pub adopted: bool,
    /// Callback name, consulted only for `jsonp`.
    pub callback: String,
}

impl CommonResponse {
    pub fn new(status: u16, content_type: &str, value: Payload) -> Self {
        Self {
            status,
            content_type: content_type.to_string(),
            value,
            adopted: false,
            callback: String::new(),
        }
    }

    pub fn json(status: u16, value: Value) -> Self {
        Self::new(status, "json", Payload::Json(value))
    }

    pub fn jsonp(callback: &str, value: Value) -> Self {
        let mut resp = Self::new(200, "jsonp", Payload::Json(value));
        resp.callback = callback.to_string();
        resp
    }

    pub fn text(status: u16, value: &str) -> Self {
        Self::new(status, "text", Payload::Text(value.to_string()))
    }

    pub fn xml(status: u16, value: Vec<u8>) -> Self {
        Self::new(status, "xml", Payload::Bytes(value))
    }

    pub fn redirect(status: u16, location: &str) -> Self {
        Self::new(status, "", Payload::Text(location.to_string()))
    }

    pub fn no_content() -> Self {
        Self::new(204, "", Payload::Text(String::new()))
    }

    pub fn adopted() -> Self {
        let mut resp = Self::new(0, "", Payload::Text(String::new()));
        resp.adopted = true;
        resp
    }
}

/// Response in the transport runtime's vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// 204, no body.
    NoContent,
    /// Sentinel: the handler adopted the connection, emit nothing further.
    Adopted,
    Redirect { status: u16, location: String },
    Json { status: u16, body: Value },
    Jsonp { callback: String, body: Value },
    Text { status: u16, body: Vec<u8> },
    Xml { status: u16, body: Vec<u8> },
}

impl Response {
    pub fn status(&self) -> u16 {
        match self {
            Response::NoContent => 204,
            Response::Adopted => 0,
            Response::Redirect { status, .. }
            | Response::Json { status, .. }
            | Response::Text { status, .. }
            | Response::Xml { status, .. } => *status,
            Response::Jsonp { .. } => 200,
        }
    }
}

/// Wrap a common-convention handler so it speaks the transport convention.
pub fn into_handler(handler: CommonHandler) -> Handler {
    Arc::new(move |ctx: &mut Context| adapt_response(handler(ctx)))
}

/// Translate an intermediate response into a transport response.
///
/// Type mismatches (redirect target that is not a string, text that is
/// neither string nor bytes, XML that is not bytes) are logged and degraded
/// to a 500 text response carrying the error message; they never panic and
/// never abort the serving loop. An unrecognized content-type tag with a
/// non-special status yields `None`.
pub fn adapt_response(resp: Option<CommonResponse>) -> Option<Response> {
    let resp = resp?;
    if resp.adopted {
        return Some(Response::Adopted);
    }

    match resp.status {
        204 => return Some(Response::NoContent),
        301 | 302 => return Some(redirect_response(&resp)),
        _ => {}
    }

    match resp.content_type.as_str() {
        "json" => Some(Response::Json {
            status: resp.status,
            body: resp.value.to_json(),
        }),
        "jsonp" => Some(Response::Jsonp {
            callback: resp.callback.clone(),
            body: resp.value.to_json(),
        }),
        "text" => Some(text_response(&resp)),
        "xml" => Some(xml_response(&resp)),
        _ => None,
    }
}

fn redirect_response(resp: &CommonResponse) -> Response {
    match &resp.value {
        Payload::Text(location) => Response::Redirect {
            status: resp.status,
            location: location.clone(),
        },
        other => {
            let msg = format!(
                "invalid redirect value type, expected string and received {}",
                other.kind()
            );
            error!(value = ?other, "{msg}");
            Response::Text {
                status: 500,
                body: msg.into_bytes(),
            }
        }
    }
}

fn text_response(resp: &CommonResponse) -> Response {
    let body = match &resp.value {
        Payload::Text(s) => s.clone().into_bytes(),
        Payload::Bytes(b) => b.clone(),
        other => {
            let msg = format!(
                "invalid text value type, expected string or byte slice and received {}",
                other.kind()
            );
            error!(value = ?other, "{msg}");
            return Response::Text {
                status: 500,
                body: msg.into_bytes(),
            };
        }
    };

    Response::Text {
        status: resp.status,
        body,
    }
}

fn xml_response(resp: &CommonResponse) -> Response {
    match &resp.value {
        Payload::Bytes(b) => Response::Xml {
            status: resp.status,
            body: b.clone(),
        },
        other => {
            let msg = format!(
                "invalid XML value type, expected byte slice and received {}",
                other.kind()
            );
            error!(value = ?other, "{msg}");
            Response::Text {
                status: 500,
                body: msg.into_bytes(),
            }
        }
    }
}
