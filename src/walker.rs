//! Flattens a routing tree into route descriptors.
//!
//! The walk is a depth-first, pre-order descent over the root router's stack:
//!
//! - a dispatch leaf yields one [`RouteDescriptor`] per declared verb,
//! - a sub-router is descended into and its descriptors spliced in place,
//! - a mounted application is left alone (it is an independent routing root),
//! - any other middleware contributes nothing.
//!
//! # Example
//!
//! ```
//! use route_swagger::router::{App, Handler};
//! use route_swagger::walker::walk;
//!
//! let mut app = App::new();
//! app.router_mut().get("/users/:id", [Handler::new("get_user")]);
//!
//! let routes = walk(&app);
//! assert_eq!(routes.len(), 1);
//! assert_eq!(routes[0].path, "/users/:id");
//! ```

use crate::router::{App, HttpMethod, Handler, Route, Router, RoutingNode};
use log::debug;
use std::sync::Arc;

/// One (path, verb) pair and the handlers that run for it.
#[derive(Debug, Clone)]
pub struct RouteDescriptor {
    /// HTTP verb
    pub method: HttpMethod,
    /// Literal path pattern as registered
    pub path: String,
    /// Handlers bound to `method`, in chain order
    pub stack: Vec<Arc<Handler>>,
}

/// Walk an application's routing tree.
///
/// Returns an empty vector when the application has no router yet.
pub fn walk(app: &App) -> Vec<RouteDescriptor> {
    match app.router() {
        Some(router) => walk_router(router),
        None => Vec::new(),
    }
}

/// Walk a single router and everything nested below it.
pub fn walk_router(router: &Router) -> Vec<RouteDescriptor> {
    debug!("Walking router with {} layers", router.stack.len());

    let mut routes = Vec::new();
    for node in &router.stack {
        match node {
            RoutingNode::Dispatch(route) => routes.extend(walk_route(route)),
            RoutingNode::SubRouter { router, .. } => routes.extend(walk_router(router)),
            RoutingNode::MountedApplication { path, .. } => {
                debug!("Not descending into application mounted at {}", path);
            }
            RoutingNode::Other { .. } => {}
        }
    }
    routes
}

fn walk_route(route: &Route) -> Vec<RouteDescriptor> {
    debug!("Route {} declares {} method(s)", route.path, route.methods.len());

    route
        .methods
        .iter()
        .map(|&method| RouteDescriptor {
            method,
            path: route.path.clone(),
            stack: route
                .stack
                .iter()
                .filter(|layer| layer.matches(method))
                .map(|layer| Arc::clone(&layer.handle))
                .collect(),
        })
        .collect()
}
