use serverlink_core::app::Hooks;
use serverlink_core::router::RouterService;

use crate::handlers::{countdown, greet, greet_json, index, whoami};

/// The demo application. `serverlink.toml` may rename it through `[app] name`.
pub struct DemoApp;

impl Hooks for DemoApp {
    fn routes() -> RouterService {
        build_router()
    }

    fn name() -> &'static str {
        "app-demo"
    }
}

pub fn build_router() -> RouterService {
    RouterService::builder()
        .get("/", index)
        .get("/greet/{name}", greet)
        .post("/greet", greet_json)
        .get("/whoami", whoami)
        .get("/countdown", countdown)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use http::header::{CONTENT_TYPE, USER_AGENT};
    use http::{Method, StatusCode};
    use serverlink_core::body::Body;
    use serverlink_core::manifest::ManifestLoader;
    use serverlink_core::{Request, Response};

    fn send(request: Request) -> (StatusCode, String) {
        let app = DemoApp::build_app();
        let response: Response = block_on(app.router().oneshot(request));
        let status = response.status();
        let bytes = block_on(response.into_body().collect()).expect("body");
        (status, String::from_utf8(bytes.to_vec()).expect("utf-8"))
    }

    fn request(method: Method, uri: &str, body: Body) -> Request {
        http::Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .expect("request")
    }

    #[test]
    fn index_names_the_demo() {
        let (status, body) = send(request(Method::GET, "/", Body::empty()));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Serverlink Demo App");
    }

    #[test]
    fn greets_by_path_segment() {
        let (status, body) = send(request(Method::GET, "/greet/ada", Body::empty()));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Hello, ada!");
    }

    #[test]
    fn greets_from_json_payload() {
        let mut req = request(Method::POST, "/greet", Body::from(r#"{"name":"grace"}"#));
        req.headers_mut()
            .insert(CONTENT_TYPE, "application/json".parse().expect("mime"));
        let (status, body) = send(req);
        assert_eq!(status, StatusCode::OK);

        let reply: serde_json::Value = serde_json::from_str(&body).expect("json");
        assert_eq!(reply["greeting"], "Hello, grace!");
    }

    #[test]
    fn malformed_json_is_a_400() {
        let (status, body) = send(request(Method::POST, "/greet", Body::from("{name")));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("malformed JSON body"));
    }

    #[test]
    fn whoami_echoes_the_user_agent() {
        let mut req = request(Method::GET, "/whoami", Body::empty());
        req.headers_mut()
            .insert(USER_AGENT, "curl/8.5".parse().expect("agent"));
        assert_eq!(send(req).1, "you are curl/8.5");

        let (_, anonymous) = send(request(Method::GET, "/whoami", Body::empty()));
        assert_eq!(anonymous, "you are anonymous");
    }

    #[test]
    fn countdown_streams_to_liftoff() {
        let (status, body) = send(request(Method::GET, "/countdown", Body::empty()));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "3\n2\n1\nliftoff\n");
    }

    #[test]
    fn unsupported_method_is_a_405() {
        let (status, _) = send(request(Method::DELETE, "/greet", Body::empty()));
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[test]
    fn manifest_renames_the_app() {
        let loader =
            ManifestLoader::load_from_str("[app]\nname = \"Serverlink Demo\"\n").expect("manifest");
        let app = DemoApp::try_build_with_manifest(loader.manifest()).expect("app");
        assert_eq!(app.name(), "Serverlink Demo");
        assert_eq!(DemoApp::build_app().name(), "app-demo");
    }
}
