//! Page and demonstration stream handlers.
//!
//! ```text
//! GET /             rendered "index" template
//! GET /hello        "Hello"
//! GET /hello-event  one server-sent event
//! GET /date         five timestamps, one second apart
//! ```

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};

use crate::domain::ports::TemplateRenderer;
use crate::domain::{ApiResult, DateStream, Error};
use crate::inbound::http::reply::Reply;
use crate::inbound::http::router::HandlerRequest;

/// Template rendered for `GET /`.
pub const INDEX_TEMPLATE: &str = "index";
/// Single value emitted by `GET /hello-event`.
pub const HELLO_EVENT: &str = "Hello Mono";

/// Render the index page.
pub async fn index(
    renderer: Arc<dyn TemplateRenderer>,
    _request: HandlerRequest,
) -> ApiResult<Reply> {
    let document = renderer
        .render(INDEX_TEMPLATE)
        .map_err(|err| Error::internal(err.to_string()))?;
    Ok(Reply::html(document))
}

pub async fn hello(_request: HandlerRequest) -> ApiResult<Reply> {
    Ok(Reply::text("Hello"))
}

/// One event, then end of stream.
pub async fn hello_event(_request: HandlerRequest) -> ApiResult<Reply> {
    Ok(Reply::events(
        stream::once(async { HELLO_EVENT.to_owned() }).boxed(),
    ))
}

/// Stream timestamps from `dates`. The producer starts when the response
/// body is first polled and stops when the client goes away.
pub async fn date(dates: Arc<DateStream>, _request: HandlerRequest) -> ApiResult<Reply> {
    Ok(Reply::events(
        dates.events().map(|millis| millis.to_string()).boxed(),
    ))
}
