use bytes::Bytes;
use futures::stream;
use http::header::{HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use serverlink_core::body::Body;
use serverlink_core::context::RequestContext;
use serverlink_core::error::ServeError;
use serverlink_core::Response;
use std::convert::Infallible;

#[derive(Deserialize)]
struct GreetRequest {
    name: String,
}

#[derive(Serialize)]
struct GreetReply {
    greeting: String,
}

fn greeting(name: &str) -> String {
    format!("Hello, {}!", name)
}

pub(crate) async fn index(_ctx: RequestContext) -> Result<&'static str, ServeError> {
    Ok("Serverlink Demo App")
}

pub(crate) async fn greet(ctx: RequestContext) -> Result<String, ServeError> {
    let name = ctx
        .param("name")
        .ok_or_else(|| ServeError::bad_request("missing name"))?;
    Ok(greeting(name))
}

pub(crate) async fn greet_json(ctx: RequestContext) -> Result<Response, ServeError> {
    let GreetRequest { name } = ctx.json()?;
    let reply = serde_json::to_vec(&GreetReply {
        greeting: greeting(&name),
    })
    .map_err(ServeError::internal)?;

    let mut response = Response::new(Body::from(reply));
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(response)
}

pub(crate) async fn whoami(ctx: RequestContext) -> Result<String, ServeError> {
    let agent = ctx.header(USER_AGENT.as_str()).unwrap_or("anonymous");
    Ok(format!("you are {}", agent))
}

pub(crate) async fn countdown(_ctx: RequestContext) -> Result<Response, ServeError> {
    let lines = ["3\n", "2\n", "1\n", "liftoff\n"]
        .map(|line| Ok::<_, Infallible>(Bytes::from_static(line.as_bytes())));

    let mut response = Response::new(Body::from_stream(stream::iter(lines)));
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    Ok(response)
}
