//! Route Swagger - Swagger documentation for a live routing table.
//!
//! This library walks the routing tree an application builds at startup and turns it
//! into a Swagger 2.0 document, along with the context a viewer page needs to display it.
//! The document is rebuilt on every request, so it always describes the routes as they
//! are registered at that moment.
//!
//! # Architecture
//!
//! 1. [`router`] - The routing tree: apps, routers, dispatch leaves and middleware
//! 2. [`walker`] - Flattens the tree into one descriptor per path and verb
//! 3. [`schema_translator`] - Turns validation metadata into named definitions
//! 4. [`swagger_builder`] - Assembles descriptors and definitions into a document
//! 5. [`config`] - Registration options and their validation
//! 6. [`docs`] - Registers the documentation routes and answers them
//! 7. [`manifest`] - Routing tables described in YAML or JSON files
//! 8. [`serializer`] - Serializes the document to JSON or YAML
//!
//! # Example Usage
//!
//! ```
//! use route_swagger::config::DocsOptions;
//! use route_swagger::docs::register;
//! use route_swagger::router::{App, Handler};
//!
//! let mut app = App::new();
//! app.router_mut()
//!     .get("/pets", [Handler::new("list_pets")])
//!     .post("/pets", [Handler::new("create_pet")]);
//!
//! let docs = register(&mut app, DocsOptions::default()).unwrap();
//! let document = docs.json(&app);
//!
//! assert_eq!(document.swagger, "2.0");
//! assert_eq!(document.paths["/pets"].len(), 2);
//! ```
//!
//! # Command-Line Interface
//!
//! The [`cli`] module documents a routing table described by a manifest file.

pub mod cli;
pub mod config;
pub mod docs;
pub mod error;
pub mod manifest;
pub mod router;
pub mod schema_translator;
pub mod serializer;
pub mod swagger_builder;
pub mod walker;
