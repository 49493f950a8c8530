//! OpenAPI document for the contacts API.
//!
//! Component schemas come from the `ToSchema` derives on the wire types. The
//! paths are assembled from static route metadata ([`ROUTES`]), never by
//! inspecting the router at runtime. The `contacts-server docs` command
//! writes the document to disk; [`docs_router`] serves a pre-rendered copy
//! at `/api-docs`.

use std::sync::Arc;

use axum::{Router, http::header, routing::get};
use contacts_core::{Contact, ContactFields};
use utoipa::{
  OpenApi,
  openapi::{
    self, Content, ContentBuilder, RefOr, Required, Response, ResponseBuilder,
    path::{
      HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn,
      PathItem, Paths, PathsBuilder,
    },
    request_body::RequestBodyBuilder,
    schema::{ArrayBuilder, Object, Ref, Schema, Type},
    server::Server,
  },
};

use crate::{contacts::Created, error::ErrorBody};

pub const TAG: &str = "Contacts";
pub const DEFAULT_HOST: &str = "localhost:8080";

const JSON: &str = "application/json";

#[derive(OpenApi)]
#[openapi(
  info(
    title = "Contacts API",
    version = "1.0.0",
    description = "API documentation for managing contacts."
  ),
  components(schemas(Contact, ContactFields, Created, ErrorBody)),
  tags((name = "Contacts", description = "Endpoints for managing contacts"))
)]
struct ApiDoc;

// ─── Route metadata ───────────────────────────────────────────────────────────

/// What a successful response carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
  Empty,
  Contact,
  ContactList,
  Created,
}

/// Static description of one route.
#[derive(Debug, Clone)]
pub struct RouteDoc {
  pub method:   HttpMethod,
  /// Path in template form (`/contacts/{id}`).
  pub path:     &'static str,
  pub summary:  &'static str,
  /// Description of the `id` path parameter, if the route takes one.
  pub id_param: Option<&'static str>,
  /// Description of the JSON request body, if the route takes one.
  pub body:     Option<&'static str>,
  pub success:  (u16, &'static str, Payload),
  pub failures: &'static [(u16, &'static str)],
}

const BAD_REQUEST: (u16, &str) = (400, "Invalid ID or missing fields");
const NOT_FOUND: (u16, &str) = (404, "Contact not found");
const SERVER_ERROR: (u16, &str) = (500, "Database error");

pub const ROUTES: &[RouteDoc] = &[
  RouteDoc {
    method:   HttpMethod::Get,
    path:     "/contacts",
    summary:  "Get all contacts",
    id_param: None,
    body:     None,
    success:  (200, "List of all contacts", Payload::ContactList),
    failures: &[SERVER_ERROR],
  },
  RouteDoc {
    method:   HttpMethod::Get,
    path:     "/contacts/{id}",
    summary:  "Get a contact by ID",
    id_param: Some("Contact ID"),
    body:     None,
    success:  (200, "Contact found", Payload::Contact),
    failures: &[BAD_REQUEST, NOT_FOUND, SERVER_ERROR],
  },
  RouteDoc {
    method:   HttpMethod::Post,
    path:     "/contacts",
    summary:  "Create a new contact",
    id_param: None,
    body:     Some("Contact data"),
    success:  (201, "Contact created successfully", Payload::Created),
    failures: &[BAD_REQUEST, SERVER_ERROR],
  },
  RouteDoc {
    method:   HttpMethod::Put,
    path:     "/contacts/{id}",
    summary:  "Update a contact by ID",
    id_param: Some("Contact ID"),
    body:     Some("Updated contact data"),
    success:  (204, "Contact updated successfully", Payload::Empty),
    failures: &[BAD_REQUEST, NOT_FOUND, SERVER_ERROR],
  },
  RouteDoc {
    method:   HttpMethod::Delete,
    path:     "/contacts/{id}",
    summary:  "Delete a contact by ID",
    id_param: Some("Contact ID"),
    body:     None,
    success:  (204, "Contact deleted successfully", Payload::Empty),
    failures: &[BAD_REQUEST, NOT_FOUND, SERVER_ERROR],
  },
];

// ─── Generation ───────────────────────────────────────────────────────────────

/// Build the document, advertising `http://{host}` as its server.
pub fn generate(host: &str) -> openapi::OpenApi {
  let mut doc = ApiDoc::openapi();
  doc.paths = paths();
  doc.servers = Some(vec![Server::new(format!("http://{host}"))]);
  doc
}

fn paths() -> Paths {
  ROUTES
    .iter()
    .fold(PathsBuilder::new(), |paths, route| {
      let item = PathItem::new(route.method.clone(), operation(route));
      paths.path(route.path, item)
    })
    .build()
}

fn schema_ref(name: &str) -> RefOr<Schema> {
  Ref::from_schema_name(name).into()
}

fn json_content(schema: RefOr<Schema>) -> Content {
  ContentBuilder::new().schema(Some(schema)).build()
}

fn operation(route: &RouteDoc) -> Operation {
  let mut op = OperationBuilder::new()
    .tags(Some(vec![TAG]))
    .summary(Some(route.summary));

  if let Some(description) = route.id_param {
    op = op.parameter(
      ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some(description))
        .schema(Some(Object::with_type(Type::String))),
    );
  }
  if let Some(description) = route.body {
    op = op.request_body(Some(
      RequestBodyBuilder::new()
        .description(Some(description))
        .required(Some(Required::True))
        .content(JSON, json_content(schema_ref("ContactFields")))
        .build(),
    ));
  }

  let (code, description, payload) = route.success;
  let success = match payload {
    Payload::Empty => None,
    Payload::Contact => Some(schema_ref("Contact")),
    Payload::ContactList => Some(
      ArrayBuilder::new()
        .items(Ref::from_schema_name("Contact"))
        .build()
        .into(),
    ),
    Payload::Created => Some(schema_ref("Created")),
  };
  op = op.response(code.to_string(), response(description, success));

  for &(code, description) in route.failures {
    op = op.response(
      code.to_string(),
      response(description, Some(schema_ref("ErrorBody"))),
    );
  }

  op.build()
}

fn response(description: &str, schema: Option<RefOr<Schema>>) -> Response {
  let builder = ResponseBuilder::new().description(description);
  match schema {
    Some(schema) => builder.content(JSON, json_content(schema)).build(),
    None => builder.build(),
  }
}

// ─── Serving ──────────────────────────────────────────────────────────────────

/// Router serving `doc` as JSON at `GET /api-docs`.
///
/// The document is rendered once here, not per request.
pub fn docs_router(doc: &openapi::OpenApi) -> serde_json::Result<Router<()>> {
  let rendered: Arc<str> = doc.to_pretty_json()?.into();
  Ok(Router::new().route(
    "/api-docs",
    get(move || {
      let body = Arc::clone(&rendered);
      async move { ([(header::CONTENT_TYPE, JSON)], body.to_string()) }
    }),
  ))
}

#[cfg(test)]
mod tests {
  use serde_json::Value;

  use super::*;

  fn doc_json() -> Value {
    serde_json::to_value(generate(DEFAULT_HOST)).unwrap()
  }

  fn method_key(method: &HttpMethod) -> &'static str {
    match method {
      HttpMethod::Get => "get",
      HttpMethod::Post => "post",
      HttpMethod::Put => "put",
      HttpMethod::Delete => "delete",
      other => panic!("unexpected method {other:?}"),
    }
  }

  #[test]
  fn header_fields() {
    let v = doc_json();
    assert!(v["openapi"].as_str().unwrap().starts_with("3."));
    assert_eq!(v["info"]["title"], "Contacts API");
    assert_eq!(v["info"]["version"], "1.0.0");
    assert_eq!(v["servers"][0]["url"], "http://localhost:8080");
    assert_eq!(v["tags"][0]["name"], TAG);
  }

  #[test]
  fn every_route_is_documented() {
    let v = doc_json();
    for route in ROUTES {
      let op = &v["paths"][route.path][method_key(&route.method)];
      assert_eq!(op["summary"], route.summary, "{}", route.path);
      assert_eq!(op["tags"][0], TAG);
      assert!(op["responses"][route.success.0.to_string()].is_object());
    }
    assert_eq!(v["paths"].as_object().unwrap().len(), 2);
    assert_eq!(v["paths"]["/contacts/{id}"].as_object().unwrap().len(), 3);
  }

  #[test]
  fn parameters_match_route_shape() {
    let v = doc_json();
    let put = &v["paths"]["/contacts/{id}"]["put"];
    assert_eq!(put["parameters"][0]["in"], "path");
    assert_eq!(put["parameters"][0]["description"], "Contact ID");
    assert_eq!(
      put["requestBody"]["content"][JSON]["schema"]["$ref"],
      "#/components/schemas/ContactFields"
    );
    assert!(put["responses"]["204"]["content"].is_null());

    let list = &v["paths"]["/contacts"]["get"];
    assert!(list["parameters"].is_null());
    let ok = &list["responses"]["200"]["content"][JSON]["schema"];
    assert_eq!(ok["type"], "array");
    assert_eq!(ok["items"]["$ref"], "#/components/schemas/Contact");
    assert!(list["responses"]["400"].is_null());
  }

  #[test]
  fn schemas_carry_the_example_contact() {
    let v = doc_json();
    let schemas = &v["components"]["schemas"];
    let fields = &schemas["ContactFields"];
    assert_eq!(fields["properties"]["lastName"]["example"], "Pérez");
    assert_eq!(fields["properties"]["birthday"]["example"], "1998-04-12");
    assert_eq!(fields["required"].as_array().unwrap().len(), 5);
    for name in ["Contact", "Created", "ErrorBody"] {
      assert!(schemas[name].is_object(), "{name} schema missing");
    }
  }

  #[test]
  fn host_is_configurable() {
    let v = serde_json::to_value(generate("contacts.example.com")).unwrap();
    assert_eq!(v["servers"][0]["url"], "http://contacts.example.com");
  }
}
