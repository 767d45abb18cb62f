use crate::router::HttpMethod;
use crate::schema_translator::{Definition, DefinitionRegistry, SchemaRef};
use crate::walker::RouteDescriptor;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

/// Swagger document builder.
///
/// One builder is one document build: it owns the definition counter, so two builds
/// never share model numbering.
pub struct SwaggerBuilder {
    /// Route serving the viewer page, excluded from the document
    documentation_path: String,
    /// Route serving the document itself, excluded from the document
    json_path: String,
    /// path -> method -> entry
    paths: IndexMap<String, IndexMap<String, PathEntry>>,
    /// Definitions registered while adding routes
    registry: DefinitionRegistry,
}

/// Documentation for one path + method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathEntry {
    pub tags: Vec<String>,
    pub summary: String,
    #[serde(rename = "operationId")]
    pub operation_id: String,
    pub parameters: Vec<Parameter>,
    pub responses: IndexMap<String, Response>,
}

/// Swagger Parameter object pointing at a registered definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter location (query, body, params, ...)
    #[serde(rename = "in")]
    pub location: String,
    /// Parameter name; same as the location
    pub name: String,
    pub schema: SchemaRef,
}

/// Swagger Response object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    pub schema: ResponseSchema,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSchema {
    #[serde(rename = "type")]
    pub schema_type: String,
}

/// Complete Swagger 2.0 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaggerDocument {
    /// Always "2.0"
    pub swagger: String,
    pub tags: Vec<String>,
    pub paths: IndexMap<String, IndexMap<String, PathEntry>>,
    pub definitions: IndexMap<String, Definition>,
}

impl SwaggerBuilder {
    /// Create a builder that leaves out the two documentation routes
    pub fn new(documentation_path: impl Into<String>, json_path: impl Into<String>) -> Self {
        debug!("Initializing SwaggerBuilder");
        Self {
            documentation_path: documentation_path.into(),
            json_path: json_path.into(),
            paths: IndexMap::new(),
            registry: DefinitionRegistry::new(),
        }
    }

    /// Whether `route` is one of the documentation routes
    fn is_self_route(&self, route: &RouteDescriptor) -> bool {
        route.method == HttpMethod::Get
            && (route.path == self.documentation_path || route.path == self.json_path)
    }

    /// Add a route to the document.
    ///
    /// Returns `false` when the route is a documentation route and was skipped. A
    /// route already present for the same path and method is replaced.
    pub fn add_route(&mut self, route: &RouteDescriptor) -> bool {
        if self.is_self_route(route) {
            debug!("Skipping documentation route: {} {}", route.method, route.path);
            return false;
        }

        debug!("Adding route: {} {}", route.method, route.path);

        let mut parameters = Vec::new();
        for handler in &route.stack {
            let Some(schema) = &handler.schema else {
                continue;
            };
            for (location, raw) in schema {
                if let Some(reference) = self.registry.register(raw) {
                    parameters.push(Parameter {
                        location: location.clone(),
                        name: location.clone(),
                        schema: reference,
                    });
                }
            }
        }

        let entry = PathEntry {
            tags: vec!["api".to_string()],
            summary: "Expand for route details".to_string(),
            operation_id: Self::operation_id(route.method, &route.path),
            parameters,
            responses: Self::default_responses(),
        };

        // Literal key lookups only: the path is never interpreted.
        self.paths
            .entry(route.path.clone())
            .or_default()
            .insert(route.method.as_str().to_string(), entry);
        true
    }

    /// `<method>_<path>` with the first `/` of the path replaced by `_`
    fn operation_id(method: HttpMethod, path: &str) -> String {
        format!("{}_{}", method, path.replacen('/', "_", 1))
    }

    fn default_responses() -> IndexMap<String, Response> {
        let mut responses = IndexMap::new();
        responses.insert(
            "default".to_string(),
            Response {
                description: "Successful".to_string(),
                schema: ResponseSchema {
                    schema_type: "string".to_string(),
                },
            },
        );
        responses
    }

    /// Build the final document
    pub fn build(self) -> SwaggerDocument {
        debug!(
            "Building Swagger document with {} paths and {} definitions",
            self.paths.len(),
            self.registry.len()
        );

        SwaggerDocument {
            swagger: "2.0".to_string(),
            tags: Vec::new(),
            paths: self.paths,
            definitions: self.registry.into_definitions(),
        }
    }
}

/// Assemble a document from walked routes in a single pass.
pub fn assemble(
    routes: &[RouteDescriptor],
    documentation_path: &str,
    json_path: &str,
) -> SwaggerDocument {
    let mut builder = SwaggerBuilder::new(documentation_path, json_path);
    for route in routes {
        builder.add_route(route);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{Handler, ValidationSchema};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    const DOCS: &str = "/documentation";
    const JSON: &str = "/documentation/json";

    fn route(method: HttpMethod, path: &str, stack: Vec<Handler>) -> RouteDescriptor {
        RouteDescriptor {
            method,
            path: path.to_string(),
            stack: stack.into_iter().map(Arc::new).collect(),
        }
    }

    fn query_schema() -> ValidationSchema {
        let mut schema = ValidationSchema::new();
        schema.insert(
            "query".to_string(),
            json!({
                "type": "object",
                "children": { "page": { "type": "number", "description": "page index" } }
            }),
        );
        schema
    }

    #[test]
    fn test_add_simple_route() {
        let mut builder = SwaggerBuilder::new(DOCS, JSON);

        assert!(builder.add_route(&route(HttpMethod::Get, "/users", vec![Handler::new("list")])));

        let document = builder.build();
        let entry = &document.paths["/users"]["get"];
        assert_eq!(entry.tags, vec!["api"]);
        assert_eq!(entry.summary, "Expand for route details");
        assert_eq!(entry.operation_id, "get__users");
        assert!(entry.parameters.is_empty());
        assert_eq!(entry.responses["default"].description, "Successful");
        assert_eq!(entry.responses["default"].schema.schema_type, "string");
        assert!(document.definitions.is_empty());
    }

    #[test]
    fn test_operation_id_replaces_first_separator_only() {
        assert_eq!(
            SwaggerBuilder::operation_id(HttpMethod::Delete, "/b/:id"),
            "delete__b/:id"
        );
        assert_eq!(SwaggerBuilder::operation_id(HttpMethod::Get, "/"), "get__");
        assert_eq!(SwaggerBuilder::operation_id(HttpMethod::Get, "plain"), "get_plain");
    }

    #[test]
    fn test_self_routes_are_skipped() {
        let mut builder = SwaggerBuilder::new(DOCS, JSON);

        assert!(!builder.add_route(&route(HttpMethod::Get, DOCS, vec![])));
        assert!(!builder.add_route(&route(HttpMethod::Get, JSON, vec![])));
        // Only GET is excluded
        assert!(builder.add_route(&route(HttpMethod::Post, JSON, vec![])));

        let document = builder.build();
        assert_eq!(document.paths.len(), 1);
        assert!(document.paths[JSON].contains_key("post"));
    }

    #[test]
    fn test_self_routes_follow_configuration() {
        let mut builder = SwaggerBuilder::new("/docs", "/docs.json");

        assert!(builder.add_route(&route(HttpMethod::Get, DOCS, vec![])));
        assert!(!builder.add_route(&route(HttpMethod::Get, "/docs", vec![])));
        assert!(!builder.add_route(&route(HttpMethod::Get, "/docs.json", vec![])));
    }

    #[test]
    fn test_schema_attachment_becomes_parameter() {
        let mut builder = SwaggerBuilder::new(DOCS, JSON);
        let validate = Handler::with_schema("validate", query_schema());
        builder.add_route(&route(
            HttpMethod::Get,
            "/search",
            vec![validate, Handler::new("search")],
        ));

        let document = builder.build();
        let parameters = &document.paths["/search"]["get"].parameters;
        assert_eq!(
            parameters,
            &vec![Parameter {
                location: "query".to_string(),
                name: "query".to_string(),
                schema: SchemaRef {
                    reference: "#/definitions/Model 1".to_string(),
                },
            }]
        );

        let model = &document.definitions["Model 1"];
        assert_eq!(model.properties["page"].kind.as_deref(), Some("number"));
        assert_eq!(model.properties["page"].description.as_deref(), Some("page index"));
    }

    #[test]
    fn test_multiple_locations_and_handlers() {
        let mut schema = query_schema();
        schema.insert("body".to_string(), json!({ "type": "object", "children": {} }));
        schema.insert("params".to_string(), json!("not a schema"));

        let mut extra = ValidationSchema::new();
        extra.insert("headers".to_string(), json!({ "type": "string" }));

        let mut builder = SwaggerBuilder::new(DOCS, JSON);
        builder.add_route(&route(
            HttpMethod::Post,
            "/items",
            vec![
                Handler::with_schema("validate", schema),
                Handler::with_schema("headers", extra),
            ],
        ));

        let document = builder.build();
        let locations: Vec<_> = document.paths["/items"]["post"]
            .parameters
            .iter()
            .map(|p| p.location.as_str())
            .collect();
        assert_eq!(locations, vec!["query", "body", "headers"]);

        let names: Vec<_> = document.definitions.keys().cloned().collect();
        assert_eq!(names, vec!["Model 1", "Model 2", "Model 3"]);
        assert!(document.definitions["Model 3"].properties.is_empty());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut builder = SwaggerBuilder::new(DOCS, JSON);
        builder.add_route(&route(
            HttpMethod::Get,
            "/dup",
            vec![Handler::with_schema("first", query_schema())],
        ));
        builder.add_route(&route(HttpMethod::Get, "/dup", vec![Handler::new("second")]));

        let document = builder.build();
        assert_eq!(document.paths["/dup"].len(), 1);
        assert!(document.paths["/dup"]["get"].parameters.is_empty());
        // The overwritten entry's definition is still emitted
        assert_eq!(document.definitions.len(), 1);
    }

    #[test]
    fn test_paths_with_dots_are_literal_keys() {
        let mut builder = SwaggerBuilder::new(DOCS, JSON);
        builder.add_route(&route(HttpMethod::Get, "/files/report.v1.json", vec![]));
        builder.add_route(&route(HttpMethod::Get, "/a[0]/b", vec![]));

        let document = builder.build();
        assert!(document.paths.contains_key("/files/report.v1.json"));
        assert!(document.paths.contains_key("/a[0]/b"));
        assert_eq!(document.paths.len(), 2);
    }

    #[test]
    fn test_assemble_counts() {
        let routes = vec![
            route(HttpMethod::Get, "/", vec![]),
            route(HttpMethod::Get, DOCS, vec![]),
            route(HttpMethod::Get, JSON, vec![]),
            route(HttpMethod::Put, "/b/:id", vec![]),
        ];

        let document = assemble(&routes, DOCS, JSON);
        assert_eq!(document.swagger, "2.0");
        assert!(document.tags.is_empty());
        let entries: usize = document.paths.values().map(|methods| methods.len()).sum();
        assert_eq!(entries, 2);
    }

    #[test]
    fn test_numbering_restarts_per_build() {
        let routes = vec![route(
            HttpMethod::Get,
            "/search",
            vec![Handler::with_schema("validate", query_schema())],
        )];

        let first = assemble(&routes, DOCS, JSON);
        let second = assemble(&routes, DOCS, JSON);
        assert_eq!(first, second);
        assert!(second.definitions.contains_key("Model 1"));
    }

    #[test]
    fn test_serialized_shape() {
        let document = SwaggerBuilder::new(DOCS, JSON).build();

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(
            value,
            json!({
                "swagger": "2.0",
                "tags": [],
                "paths": {},
                "definitions": {}
            })
        );
    }
}
