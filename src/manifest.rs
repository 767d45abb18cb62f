//! Route manifests: routing tables described in YAML or JSON.
//!
//! A manifest lets the command-line tool document a service without linking against
//! it. Each entry of `routes` is tagged with a `kind`:
//!
//! ```yaml
//! routes:
//!   - kind: route
//!     path: /users
//!     handlers:
//!       - method: get
//!         name: list_users
//!       - method: post
//!         name: create_user
//!         schema:
//!           body:
//!             type: object
//!             children:
//!               name: { type: string, description: display name }
//!   - kind: router
//!     path: /
//!     routes:
//!       - kind: route
//!         path: /health
//!         handlers: [{ method: all, name: health }]
//!   - kind: mounted_app
//!     path: /admin
//!     routes: []
//!   - kind: middleware
//!     path: /
//!     name: logger
//! ```

use crate::error::{Error, Result};
use crate::router::{App, Handler, HttpMethod, Router, ValidationSchema};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Top-level manifest document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteManifest {
    #[serde(default)]
    pub routes: Vec<ManifestNode>,
}

/// One entry of a routing table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ManifestNode {
    Route {
        path: String,
        #[serde(default)]
        handlers: Vec<ManifestHandler>,
    },
    Router {
        #[serde(default = "root_path")]
        path: String,
        #[serde(default)]
        routes: Vec<ManifestNode>,
    },
    MountedApp {
        path: String,
        #[serde(default)]
        routes: Vec<ManifestNode>,
    },
    Middleware {
        #[serde(default = "root_path")]
        path: String,
        name: String,
    },
}

/// A handler bound to one verb, or to every verb with `method: all`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestHandler {
    pub method: String,
    #[serde(default = "anonymous")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<ValidationSchema>,
}

fn root_path() -> String {
    "/".to_string()
}

fn anonymous() -> String {
    "anonymous".to_string()
}

impl RouteManifest {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a manifest, choosing the format from the file extension
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading route manifest from {}", path.display());
        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(Error::InvalidManifest(format!(
                "unsupported manifest file: {}",
                path.display()
            ))),
        }
    }

    /// Build the application the manifest describes
    pub fn into_app(self) -> Result<App> {
        build_app(self.routes)
    }
}

fn build_app(nodes: Vec<ManifestNode>) -> Result<App> {
    let mut app = App::new();
    if !nodes.is_empty() {
        fill_router(app.router_mut(), nodes)?;
    }
    Ok(app)
}

fn fill_router(router: &mut Router, nodes: Vec<ManifestNode>) -> Result<()> {
    for node in nodes {
        match node {
            ManifestNode::Route { path, handlers } => {
                let route = router.route(path);
                for handler in handlers {
                    let bound = Handler {
                        name: handler.name,
                        schema: handler.schema,
                    };
                    if handler.method.eq_ignore_ascii_case("all") {
                        route.all([bound]);
                    } else {
                        let method = handler
                            .method
                            .parse::<HttpMethod>()
                            .map_err(|e| Error::InvalidManifest(format!("{} on {}", e, route.path)))?;
                        route.on(method, [bound]);
                    }
                }
            }
            ManifestNode::Router { path, routes } => {
                let mut nested = Router::new();
                fill_router(&mut nested, routes)?;
                router.use_router(path, nested);
            }
            ManifestNode::MountedApp { path, routes } => {
                router.mount(path, Arc::new(build_app(routes)?));
            }
            ManifestNode::Middleware { path, name } => {
                router.use_middleware(path, name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RoutingNode;
    use crate::walker::walk;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_manifest_has_no_router() {
        let app = RouteManifest::from_yaml_str("routes: []").unwrap().into_app().unwrap();
        assert!(app.router().is_none());
        assert!(walk(&app).is_empty());
    }

    #[test]
    fn test_route_with_several_verbs() {
        let manifest = RouteManifest::from_yaml_str(
            r#"
routes:
  - kind: route
    path: /b/:id
    handlers:
      - { method: GET, name: read }
      - { method: put, name: update }
"#,
        )
        .unwrap();

        let app = manifest.into_app().unwrap();
        let routes = walk(&app);
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].method, HttpMethod::Get);
        assert_eq!(routes[1].method, HttpMethod::Put);
        assert_eq!(routes[1].stack[0].name, "update");
    }

    #[test]
    fn test_all_binding() {
        let manifest = RouteManifest::from_json_str(
            r#"{ "routes": [ { "kind": "route", "path": "/a", "handlers": [ { "method": "all" } ] } ] }"#,
        )
        .unwrap();

        let routes = walk(&manifest.into_app().unwrap());
        assert_eq!(routes.len(), HttpMethod::ALL.len());
        assert!(routes.iter().all(|r| r.stack[0].name == "anonymous"));
    }

    #[test]
    fn test_schema_is_carried() {
        let manifest = RouteManifest::from_yaml_str(
            r#"
routes:
  - kind: route
    path: /search
    handlers:
      - method: get
        name: search
        schema:
          query:
            type: object
            children:
              q: { type: string }
"#,
        )
        .unwrap();

        let routes = walk(&manifest.into_app().unwrap());
        let schema = routes[0].stack[0].schema.as_ref().unwrap();
        assert_eq!(schema["query"]["children"]["q"]["type"], "string");
    }

    #[test]
    fn test_nested_kinds() {
        let manifest = RouteManifest::from_yaml_str(
            r#"
routes:
  - kind: middleware
    name: logger
  - kind: router
    routes:
      - kind: route
        path: /inner
        handlers: [{ method: get }]
  - kind: mounted_app
    path: /admin
    routes:
      - kind: route
        path: /hidden
        handlers: [{ method: get }]
"#,
        )
        .unwrap();

        let app = manifest.into_app().unwrap();
        let stack = &app.router().unwrap().stack;
        assert!(matches!(&stack[0], RoutingNode::Other { path, .. } if path == "/"));
        assert!(matches!(&stack[1], RoutingNode::SubRouter { .. }));

        let paths: Vec<_> = walk(&app).into_iter().map(|r| r.path).collect();
        assert_eq!(paths, vec!["/inner"]);

        match &stack[2] {
            RoutingNode::MountedApplication { app: mounted, .. } => {
                assert_eq!(walk(mounted)[0].path, "/hidden");
            }
            other => panic!("expected mounted application, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_verb_is_rejected() {
        let manifest = RouteManifest::from_yaml_str(
            "routes:\n  - kind: route\n    path: /x\n    handlers: [{ method: fetch }]\n",
        )
        .unwrap();

        assert!(matches!(manifest.into_app(), Err(Error::InvalidManifest(_))));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        assert!(RouteManifest::from_yaml_str("routes:\n  - kind: socket\n    path: /x\n").is_err());
    }
}
