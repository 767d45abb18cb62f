//! In-memory routing tree owned by the hosting web layer.
//!
//! The tree mirrors the way a request router is usually assembled at startup: an
//! [`App`] lazily owns a root [`Router`], routers hold an ordered stack of
//! [`RoutingNode`]s, and each dispatch leaf ([`Route`]) carries the handler chain
//! registered for one literal path pattern.
//!
//! Nothing in this crate mutates the tree after registration; the walker only reads it.
//!
//! # Example
//!
//! ```
//! use route_swagger::router::{App, Handler, Router};
//! use std::sync::Arc;
//!
//! let mut app = App::new();
//! app.router_mut().get("/users", [Handler::new("list_users")]);
//!
//! let mut nested = Router::new();
//! nested.post("/users", [Handler::new("create_user")]);
//! app.router_mut().use_router("/", nested);
//!
//! app.router_mut().mount("/admin", Arc::new(App::new()));
//! assert_eq!(app.router().map(|r| r.stack.len()), Some(3));
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// HTTP methods a dispatch leaf recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// HTTP GET method
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP DELETE method
    Delete,
    /// HTTP PATCH method
    Patch,
    /// HTTP OPTIONS method
    Options,
    /// HTTP HEAD method
    Head,
    /// HTTP CONNECT method
    Connect,
    /// HTTP TRACE method
    Trace,
}

impl HttpMethod {
    /// Every verb a leaf declared for "all verbs" expands to, in declaration order.
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Connect,
        HttpMethod::Trace,
    ];

    /// Lower-case verb name, as used for document keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Connect => "connect",
            HttpMethod::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unsupported HTTP method: {}", s))
    }
}

/// Validation metadata attached to a handler, keyed by parameter location
/// (`query`, `body`, `params`, ...). Values are raw schema descriptions.
pub type ValidationSchema = IndexMap<String, serde_json::Value>;

/// Opaque handler reference. The walker never looks inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Handler {
    /// Handler name, for diagnostics
    pub name: String,
    /// Validation metadata, if the handler carries any
    pub schema: Option<ValidationSchema>,
}

impl Handler {
    /// Create a handler without validation metadata
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
        }
    }

    /// Create a handler carrying validation metadata
    pub fn with_schema(name: impl Into<String>, schema: ValidationSchema) -> Self {
        Self {
            name: name.into(),
            schema: Some(schema),
        }
    }
}

/// One entry of a route's handler chain.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Verb this handler is bound to; `None` binds it to every verb
    pub method: Option<HttpMethod>,
    /// The bound handler
    pub handle: Arc<Handler>,
}

impl Layer {
    /// Whether this layer runs for `method`
    pub fn matches(&self, method: HttpMethod) -> bool {
        self.method.map_or(true, |bound| bound == method)
    }
}

/// A dispatch leaf: one literal path pattern and its handler chain.
#[derive(Debug, Clone, Default)]
pub struct Route {
    /// Path pattern exactly as registered (e.g. `/users/:id`)
    pub path: String,
    /// Declared verbs, in declaration order, without duplicates
    pub methods: Vec<HttpMethod>,
    /// Handler chain in registration order
    pub stack: Vec<Layer>,
}

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            methods: Vec::new(),
            stack: Vec::new(),
        }
    }

    /// Bind `handlers` to `method`
    pub fn on<I>(&mut self, method: HttpMethod, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.declare(method);
        self.stack.extend(handlers.into_iter().map(|handler| Layer {
            method: Some(method),
            handle: Arc::new(handler),
        }));
        self
    }

    /// Bind `handlers` to every supported verb
    pub fn all<I>(&mut self, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        for method in HttpMethod::ALL {
            self.declare(method);
        }
        self.stack.extend(handlers.into_iter().map(|handler| Layer {
            method: None,
            handle: Arc::new(handler),
        }));
        self
    }

    fn declare(&mut self, method: HttpMethod) {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
    }
}

/// A node in a router's stack.
#[derive(Debug, Clone)]
pub enum RoutingNode {
    /// Concrete path + verb handler chain
    Dispatch(Route),
    /// Nested routing table
    SubRouter { path: String, router: Router },
    /// Independently rooted application mounted at `path`
    MountedApplication { path: String, app: Arc<App> },
    /// Generic middleware (static files, body parsers, ...)
    Other { path: String, name: String },
}

/// An ordered routing table.
#[derive(Debug, Clone, Default)]
pub struct Router {
    pub stack: Vec<RoutingNode>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fresh dispatch leaf for `path` and return it for verb registration
    pub fn route(&mut self, path: impl Into<String>) -> &mut Route {
        self.stack.push(RoutingNode::Dispatch(Route::new(path)));
        match self.stack.last_mut() {
            Some(RoutingNode::Dispatch(route)) => route,
            _ => unreachable!("a dispatch leaf was just pushed"),
        }
    }

    /// Register `handlers` for `method` on a new leaf at `path`
    pub fn on<I>(&mut self, method: HttpMethod, path: impl Into<String>, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.route(path).on(method, handlers);
        self
    }

    pub fn get<I>(&mut self, path: impl Into<String>, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.on(HttpMethod::Get, path, handlers)
    }

    pub fn post<I>(&mut self, path: impl Into<String>, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.on(HttpMethod::Post, path, handlers)
    }

    pub fn put<I>(&mut self, path: impl Into<String>, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.on(HttpMethod::Put, path, handlers)
    }

    pub fn delete<I>(&mut self, path: impl Into<String>, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.on(HttpMethod::Delete, path, handlers)
    }

    pub fn patch<I>(&mut self, path: impl Into<String>, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.on(HttpMethod::Patch, path, handlers)
    }

    pub fn options<I>(&mut self, path: impl Into<String>, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.on(HttpMethod::Options, path, handlers)
    }

    pub fn head<I>(&mut self, path: impl Into<String>, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.on(HttpMethod::Head, path, handlers)
    }

    /// Register `handlers` for every supported verb on a new leaf at `path`
    pub fn all<I>(&mut self, path: impl Into<String>, handlers: I) -> &mut Self
    where
        I: IntoIterator<Item = Handler>,
    {
        self.route(path).all(handlers);
        self
    }

    /// Nest another router
    pub fn use_router(&mut self, path: impl Into<String>, router: Router) -> &mut Self {
        self.stack.push(RoutingNode::SubRouter {
            path: path.into(),
            router,
        });
        self
    }

    /// Add generic middleware
    pub fn use_middleware(&mut self, path: impl Into<String>, name: impl Into<String>) -> &mut Self {
        self.stack.push(RoutingNode::Other {
            path: path.into(),
            name: name.into(),
        });
        self
    }

    /// Mount an independent application
    pub fn mount(&mut self, path: impl Into<String>, app: Arc<App>) -> &mut Self {
        self.stack.push(RoutingNode::MountedApplication {
            path: path.into(),
            app,
        });
        self
    }
}

/// An application whose root router is created on first registration.
#[derive(Debug, Clone, Default)]
pub struct App {
    router: Option<Router>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root router, or `None` if nothing was registered yet
    pub fn router(&self) -> Option<&Router> {
        self.router.as_ref()
    }

    /// The root router, created on first use
    pub fn router_mut(&mut self) -> &mut Router {
        self.router.get_or_insert_with(Router::new)
    }
}
