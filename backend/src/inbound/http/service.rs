//! Actix glue feeding every request through the [`Router`].
//!
//! The router is mounted as the application's default service, so Actix does
//! no routing of its own:
//!
//! ```
//! use actix_web::{App, web};
//! use user_service::inbound::http::router::Router;
//! use user_service::inbound::http::service::dispatch;
//!
//! let app = App::new()
//!     .app_data(web::Data::new(Router::new()))
//!     .default_service(web::to(dispatch));
//! ```

use actix_web::{HttpRequest, HttpResponse, web};

use crate::inbound::http::router::{IncomingRequest, Router};

/// Route one request and render the handler's reply.
pub async fn dispatch(
    router: web::Data<Router>,
    req: HttpRequest,
    body: web::Bytes,
) -> HttpResponse {
    let request = IncomingRequest::new(req.method().clone(), req.path(), body);
    router.dispatch(request).await.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApiResult;
    use crate::inbound::http::reply::Reply;
    use crate::inbound::http::router::HandlerRequest;
    use actix_web::http::{Method, StatusCode};
    use actix_web::{App, test};
    use rstest::rstest;

    async fn shout(request: HandlerRequest) -> ApiResult<Reply> {
        let name = request.param("name")?.to_uppercase();
        Ok(Reply::text(name))
    }

    #[rstest]
    #[case(Method::GET, "/shout/ala", StatusCode::OK)]
    #[case(Method::POST, "/shout/ala", StatusCode::NOT_FOUND)]
    #[case(Method::GET, "/shout/", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn requests_reach_the_router(
        #[case] method: Method,
        #[case] uri: &str,
        #[case] expected: StatusCode,
    ) {
        let mut router = Router::new();
        router
            .register(Method::GET, "/shout/{name}", shout)
            .expect("route registers");
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(router))
                .default_service(web::to(dispatch)),
        )
        .await;

        let req = test::TestRequest::default()
            .method(method)
            .uri(uri)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), expected);
        if expected == StatusCode::OK {
            assert_eq!(test::read_body(res).await, "ALA");
        }
    }
}
