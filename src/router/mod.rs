//! Request routing.
//!
//! A [`Router`] holds a fixed table of routes checked in order; the first
//! route whose method and path pattern match handles the request. Anything
//! unmatched gets an empty 404.

pub mod handlers;

use tracing::debug;

use crate::files::FileStore;
use crate::http::request::{Method, Request};
use crate::http::response::Response;

/// How a route matches the request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(p) => path == *p,
            PathPattern::Prefix(p) => path.starts_with(p),
        }
    }
}

/// The behaviors a route can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Root,
    Echo,
    UserAgent,
    GetFile,
    PostFile,
}

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub pattern: PathPattern,
    pub handler: Handler,
}

impl Route {
    pub fn new(method: Method, pattern: PathPattern, handler: Handler) -> Self {
        Self { method, pattern, handler }
    }

    fn matches(&self, req: &Request) -> bool {
        self.method == req.method && self.pattern.matches(&req.path)
    }
}

pub struct Router {
    routes: Vec<Route>,
    files: FileStore,
}

impl Router {
    /// Builds the server's route table over the given file store.
    pub fn new(files: FileStore) -> Self {
        let routes = vec![
            Route::new(Method::GET, PathPattern::Exact("/"), Handler::Root),
            Route::new(Method::GET, PathPattern::Prefix("/echo/"), Handler::Echo),
            Route::new(Method::GET, PathPattern::Exact("/user-agent"), Handler::UserAgent),
            Route::new(Method::GET, PathPattern::Prefix("/files/"), Handler::GetFile),
            Route::new(Method::POST, PathPattern::Prefix("/files"), Handler::PostFile),
        ];

        Self { routes, files }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Finds the handler for a request, if any route matches.
    pub fn route(&self, req: &Request) -> Option<Handler> {
        self.routes
            .iter()
            .find(|route| route.matches(req))
            .map(|route| route.handler)
    }

    /// Produces exactly one response for the request.
    pub async fn dispatch(&self, req: &Request) -> Response {
        let Some(handler) = self.route(req) else {
            debug!(method = %req.method, path = %req.path, "No route matched");
            return Response::not_found();
        };

        match handler {
            Handler::Root => handlers::root(),
            Handler::Echo => {
                let message = req.path.strip_prefix("/echo/").unwrap_or_default();
                handlers::echo(message, req.headers.get_all("Accept-Encoding"))
            }
            Handler::UserAgent => handlers::user_agent(req.header("User-Agent").unwrap_or_default()),
            Handler::GetFile => {
                let name = req.path.strip_prefix("/files/").unwrap_or_default();
                handlers::get_file(&self.files, name).await
            }
            Handler::PostFile => {
                let name = req.path.strip_prefix("/files").unwrap_or_default();
                handlers::post_file(&self.files, name.trim_start_matches('/'), req.payload()).await
            }
        }
    }
}
