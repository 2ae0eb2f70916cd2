//! Declarative response descriptors returned by handlers.
//!
//! Handlers never touch Actix directly. They return a [`Reply`]: status,
//! content type, extra headers, and a body that is either empty, a single
//! buffered value, or a lazy stream of text events. The HTTP service turns it
//! into an [`HttpResponse`] with [`Reply::into_response`].

use std::convert::Infallible;

use actix_web::http::StatusCode;
use actix_web::http::header::{CACHE_CONTROL, ContentType, HeaderName, HeaderValue};
use actix_web::mime;
use actix_web::web::Bytes;
use actix_web::HttpResponse;
use futures_util::stream::{BoxStream, StreamExt};
use serde::Serialize;
use tracing::error;

use crate::domain::{ApiResult, Error, ErrorCode, TRACE_ID_HEADER};

/// Response body variants.
pub enum ReplyBody {
    Empty,
    Bytes(Bytes),
    /// Lazy sequence of text values sent as server-sent events.
    Events(BoxStream<'static, String>),
}

impl std::fmt::Debug for ReplyBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            Self::Events(_) => f.write_str("Events(..)"),
        }
    }
}

/// Response descriptor.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use user_service::inbound::http::reply::Reply;
///
/// let reply = Reply::text("Hello");
/// assert_eq!(reply.status(), StatusCode::OK);
/// ```
#[derive(Debug)]
pub struct Reply {
    status: StatusCode,
    content_type: Option<ContentType>,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: ReplyBody,
}

impl Reply {
    fn new(status: StatusCode, content_type: Option<ContentType>, body: ReplyBody) -> Self {
        Self {
            status,
            content_type,
            headers: Vec::new(),
            body,
        }
    }

    /// Status with no body.
    #[must_use]
    pub fn empty(status: StatusCode) -> Self {
        Self::new(status, None, ReplyBody::Empty)
    }

    /// 200 with an HTML document.
    #[must_use]
    pub fn html(document: impl Into<String>) -> Self {
        Self::new(
            StatusCode::OK,
            Some(ContentType(mime::TEXT_HTML_UTF_8)),
            ReplyBody::Bytes(Bytes::from(document.into())),
        )
    }

    /// 200 with a plain text body.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(
            StatusCode::OK,
            Some(ContentType(mime::TEXT_PLAIN)),
            ReplyBody::Bytes(Bytes::from(text.into())),
        )
    }

    /// `status` with `value` serialised as JSON.
    ///
    /// # Errors
    /// Serialisation failures surface as internal errors.
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> ApiResult<Self> {
        let body = serde_json::to_vec(value)
            .map_err(|err| Error::internal(format!("response serialisation failed: {err}")))?;
        Ok(Self::new(
            status,
            Some(ContentType::json()),
            ReplyBody::Bytes(Bytes::from(body)),
        ))
    }

    /// 200 with a stream of server-sent events.
    #[must_use]
    pub fn events(events: BoxStream<'static, String>) -> Self {
        Self::new(
            StatusCode::OK,
            Some(ContentType(mime::TEXT_EVENT_STREAM)),
            ReplyBody::Events(events),
        )
    }

    /// Render a domain error.
    ///
    /// Not-found is an empty 404. Internal and unavailable errors keep their
    /// status and trace id but replace the message so store or runtime
    /// details never reach the client.
    #[must_use]
    pub fn from_error(err: &Error) -> Self {
        let status = status_for(err.code());
        let reply = match err.code() {
            ErrorCode::NotFound => Self::empty(status),
            ErrorCode::InvalidRequest => Self::error_json(status, err),
            ErrorCode::ServiceUnavailable => {
                Self::error_json(status, &redact(err, "Service unavailable"))
            }
            _ => Self::error_json(status, &redact(err, "Internal server error")),
        };
        reply.with_trace_header(err.trace_id())
    }

    fn error_json(status: StatusCode, err: &Error) -> Self {
        match Self::json(status, err) {
            Ok(reply) => reply,
            Err(serialisation) => {
                error!(error = %serialisation, "error payload serialisation failed");
                Self::empty(status)
            }
        }
    }

    fn with_trace_header(self, trace_id: Option<&str>) -> Self {
        match trace_id.map(HeaderValue::from_str) {
            Some(Ok(value)) => self.with_header(HeaderName::from_static(TRACE_ID_HEADER), value),
            _ => self,
        }
    }

    /// Append a response header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.push((name, value));
        self
    }

    /// Mark the response as non-cacheable.
    #[must_use]
    pub fn no_store(self) -> Self {
        self.with_header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
    }

    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&ContentType> {
        self.content_type.as_ref()
    }

    /// First header value stored under `name`.
    #[must_use]
    pub fn header(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn body(&self) -> &ReplyBody {
        &self.body
    }

    #[must_use]
    pub fn into_body(self) -> ReplyBody {
        self.body
    }

    /// Convert into an Actix response, streaming event bodies incrementally.
    pub fn into_response(self) -> HttpResponse {
        let Self {
            status,
            content_type,
            headers,
            body,
        } = self;

        let mut builder = HttpResponse::build(status);
        if let Some(content_type) = content_type {
            builder.insert_header(content_type);
        }
        for header in headers {
            builder.append_header(header);
        }

        match body {
            ReplyBody::Empty => builder.finish(),
            ReplyBody::Bytes(bytes) => builder.body(bytes),
            ReplyBody::Events(events) => builder.streaming(
                events.map(|event| Ok::<_, Infallible>(Bytes::from(sse_frame(&event)))),
            ),
        }
    }
}

pub(crate) fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact(err: &Error, message: &str) -> Error {
    let redacted = Error::new(err.code(), message);
    match err.trace_id() {
        Some(id) => redacted.with_trace_id(id),
        None => redacted,
    }
}

/// Frame one value as a server-sent event; multi-line values become
/// consecutive `data:` lines.
pub fn sse_frame(value: &str) -> String {
    let mut frame = String::with_capacity(value.len() + 8);
    for line in value.split('\n') {
        frame.push_str("data:");
        frame.push_str(line.strip_suffix('\r').unwrap_or(line));
        frame.push('\n');
    }
    frame.push('\n');
    frame
}
