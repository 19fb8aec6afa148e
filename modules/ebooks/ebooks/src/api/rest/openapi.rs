//! `OpenAPI` document assembled from the operations registered alongside
//! the routes.

use std::collections::BTreeMap;

use axum::http::{Method, StatusCode, header};
use axum::routing::MethodRouter;
use axum::{Json, Router};
use utoipa::openapi::{
    OpenApi, OpenApiBuilder, Ref, RefOr, Required,
    content::ContentBuilder,
    info::InfoBuilder,
    path::{
        HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder,
        PathsBuilder,
    },
    request_body::RequestBodyBuilder,
    response::{ResponseBuilder, ResponsesBuilder},
    schema::{
        ArrayBuilder, ComponentsBuilder, KnownFormat, ObjectBuilder, Schema, SchemaFormat,
        SchemaType, Type,
    },
    security::{HttpAuthScheme, HttpBuilder, SecurityRequirement, SecurityScheme},
};

use crate::api::rest::dto::{
    DetachAuthorDto, EbookDto, EbookPatchReq, EbookReq, ReviewDto, ReviewPatchReq,
    ReviewReplaceReq, ReviewReq,
};
use crate::api::rest::problem::{APPLICATION_PROBLEM_JSON, Problem};

pub const OPENAPI_PATH: &str = "/openapi.json";

/// Body of a documented response.
#[derive(Debug, Clone, Copy)]
pub enum ResponseBody {
    Empty,
    One(&'static str),
    Many(&'static str),
    Problem,
}

#[derive(Debug, Clone, Copy)]
pub struct ResponseSpec {
    pub status: u16,
    pub description: &'static str,
    pub body: ResponseBody,
}

/// One documented route.
#[derive(Debug, Clone)]
pub struct OperationSpec {
    pub method: Method,
    pub path: &'static str,
    pub operation_id: &'static str,
    pub summary: &'static str,
    pub tag: &'static str,
    pub request_body: Option<&'static str>,
    pub responses: Vec<ResponseSpec>,
    pub authenticated: bool,
}

impl OperationSpec {
    #[must_use]
    pub fn new(method: Method, path: &'static str, operation_id: &'static str) -> Self {
        Self {
            method,
            path,
            operation_id,
            summary: "",
            tag: "",
            request_body: None,
            responses: Vec::new(),
            authenticated: false,
        }
    }

    #[must_use]
    pub fn summary(mut self, summary: &'static str) -> Self {
        self.summary = summary;
        self
    }

    #[must_use]
    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    #[must_use]
    pub fn json_request(mut self, schema: &'static str) -> Self {
        self.request_body = Some(schema);
        self
    }

    #[must_use]
    pub fn response(mut self, status: u16, description: &'static str, body: ResponseBody) -> Self {
        self.responses.push(ResponseSpec {
            status,
            description,
            body,
        });
        self
    }

    #[must_use]
    pub fn problem(self, status: u16, description: &'static str) -> Self {
        self.response(status, description, ResponseBody::Problem)
    }

    /// Documents the bearer requirement. The middleware still lets anonymous
    /// requests through; policies decide.
    #[must_use]
    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }
}

/// Collects operation specs while routes are registered.
#[derive(Debug, Default)]
pub struct OpenApiRegistry {
    specs: Vec<OperationSpec>,
}

impl OpenApiRegistry {
    /// Register `handler` under `spec.path` and remember the spec.
    ///
    /// Fails for methods the document cannot describe (`CONNECT` and
    /// extension methods).
    pub fn route(
        &mut self,
        router: Router,
        spec: OperationSpec,
        handler: MethodRouter,
    ) -> anyhow::Result<Router> {
        if http_method(&spec.method).is_none() {
            anyhow::bail!(
                "unsupported method {} for operation {} at {}",
                spec.method,
                spec.operation_id,
                spec.path
            );
        }
        tracing::debug!(
            method = %spec.method,
            path = spec.path,
            operation_id = spec.operation_id,
            "Registered API operation"
        );
        let router = router.route(spec.path, handler);
        self.specs.push(spec);
        Ok(router)
    }

    #[must_use]
    pub fn operations(&self) -> &[OperationSpec] {
        &self.specs
    }

    #[must_use]
    pub fn build(&self) -> OpenApi {
        // Several verbs share one path item.
        let mut items: BTreeMap<&str, PathItemBuilder> = BTreeMap::new();
        for spec in &self.specs {
            let Some(method) = http_method(&spec.method) else {
                continue;
            };
            let item = items.remove(spec.path).unwrap_or_default();
            items.insert(spec.path, item.operation(method, build_operation(spec)));
        }
        let paths = items
            .into_iter()
            .fold(PathsBuilder::new(), |paths, (path, item)| {
                paths.path(path, item.build())
            });

        let components = ComponentsBuilder::new()
            .schema_from::<EbookDto>()
            .schema_from::<ReviewDto>()
            .schema_from::<EbookReq>()
            .schema_from::<EbookPatchReq>()
            .schema_from::<ReviewReq>()
            .schema_from::<ReviewReplaceReq>()
            .schema_from::<ReviewPatchReq>()
            .schema_from::<DetachAuthorDto>()
            .schema_from::<Problem>()
            .security_scheme(
                "bearerAuth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            )
            .build();

        OpenApiBuilder::new()
            .info(
                InfoBuilder::new()
                    .title("Ebooks API")
                    .version(env!("CARGO_PKG_VERSION"))
                    .description(Some("Ebooks and their reader reviews"))
                    .build(),
            )
            .paths(paths.build())
            .components(Some(components))
            .build()
    }

    /// Methods served under each registered path, in the form of an `Allow`
    /// header value. `HEAD` follows `GET`; `OPTIONS` is always present.
    #[must_use]
    pub fn allowed_methods(&self) -> BTreeMap<&'static str, String> {
        let mut by_path: BTreeMap<&'static str, Vec<Method>> = BTreeMap::new();
        for spec in &self.specs {
            let methods = by_path.entry(spec.path).or_default();
            if !methods.contains(&spec.method) {
                methods.push(spec.method.clone());
            }
        }

        by_path
            .into_iter()
            .map(|(path, mut methods)| {
                if methods.contains(&Method::GET) && !methods.contains(&Method::HEAD) {
                    methods.push(Method::HEAD);
                }
                if !methods.contains(&Method::OPTIONS) {
                    methods.push(Method::OPTIONS);
                }
                let allow = methods
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                (path, allow)
            })
            .collect()
    }

    /// Serve the built document at [`OPENAPI_PATH`] and answer `OPTIONS` on
    /// every registered path with its `Allow` header.
    pub fn into_router(self, mut router: Router) -> Router {
        for (path, allow) in self.allowed_methods() {
            let explicit = self
                .specs
                .iter()
                .any(|s| s.path == path && s.method == Method::OPTIONS);
            if explicit {
                continue;
            }
            router = router.route(
                path,
                axum::routing::options(move || {
                    let allow = allow.clone();
                    async move { (StatusCode::OK, [(header::ALLOW, allow)]) }
                }),
            );
        }

        let doc = self.build();
        router.route(
            OPENAPI_PATH,
            axum::routing::get(move || {
                let doc = doc.clone();
                async move { Json(doc) }
            }),
        )
    }
}

fn http_method(method: &Method) -> Option<HttpMethod> {
    let method = match *method {
        Method::GET => HttpMethod::Get,
        Method::HEAD => HttpMethod::Head,
        Method::OPTIONS => HttpMethod::Options,
        Method::POST => HttpMethod::Post,
        Method::PUT => HttpMethod::Put,
        Method::PATCH => HttpMethod::Patch,
        Method::DELETE => HttpMethod::Delete,
        Method::TRACE => HttpMethod::Trace,
        _ => return None,
    };
    Some(method)
}

fn schema_ref(name: &str) -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(name))
}

fn path_params(path: &str) -> impl Iterator<Item = &str> {
    path.split('/')
        .filter_map(|seg| seg.strip_prefix('{').and_then(|s| s.strip_suffix('}')))
}

fn build_operation(spec: &OperationSpec) -> Operation {
    let mut op = OperationBuilder::new()
        .operation_id(Some(spec.operation_id))
        .summary(Some(spec.summary))
        .tag(spec.tag);

    for name in path_params(spec.path) {
        let (ty, format) = if name == "user_id" {
            (Type::String, KnownFormat::Uuid)
        } else {
            (Type::Integer, KnownFormat::Int64)
        };
        let schema = Schema::Object(
            ObjectBuilder::new()
                .schema_type(SchemaType::Type(ty))
                .format(Some(SchemaFormat::KnownFormat(format)))
                .build(),
        );
        op = op.parameter(
            ParameterBuilder::new()
                .name(name)
                .parameter_in(ParameterIn::Path)
                .required(Required::True)
                .schema(Some(schema))
                .build(),
        );
    }

    if let Some(name) = spec.request_body {
        op = op.request_body(Some(
            RequestBodyBuilder::new()
                .content(
                    "application/json",
                    ContentBuilder::new().schema(Some(schema_ref(name))).build(),
                )
                .required(Some(Required::True))
                .build(),
        ));
    }

    let mut responses = ResponsesBuilder::new();
    for r in &spec.responses {
        let builder = ResponseBuilder::new().description(r.description);
        let resp = match r.body {
            ResponseBody::Empty => builder,
            ResponseBody::One(name) => builder.content(
                "application/json",
                ContentBuilder::new().schema(Some(schema_ref(name))).build(),
            ),
            ResponseBody::Many(name) => builder.content(
                "application/json",
                ContentBuilder::new()
                    .schema(Some(Schema::Array(
                        ArrayBuilder::new().items(schema_ref(name)).build(),
                    )))
                    .build(),
            ),
            ResponseBody::Problem => builder.content(
                APPLICATION_PROBLEM_JSON,
                ContentBuilder::new().schema(Some(schema_ref("Problem"))).build(),
            ),
        };
        responses = responses.response(r.status.to_string(), resp.build());
    }
    op = op.responses(responses.build());

    if spec.authenticated {
        op = op.security(SecurityRequirement::new("bearerAuth", Vec::<String>::new()));
    }

    op.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(method: &Method) -> MethodRouter {
        let filter = axum::routing::MethodFilter::try_from(method.clone()).unwrap();
        axum::routing::on(filter, || async {})
    }

    #[test]
    fn head_and_options_keep_their_own_verb() {
        assert!(matches!(http_method(&Method::HEAD), Some(HttpMethod::Head)));
        assert!(matches!(
            http_method(&Method::OPTIONS),
            Some(HttpMethod::Options)
        ));
        assert!(matches!(http_method(&Method::GET), Some(HttpMethod::Get)));
        assert!(http_method(&Method::CONNECT).is_none());
    }

    #[test]
    fn unsupported_method_fails_registration() {
        let mut registry = OpenApiRegistry::default();
        let res = registry.route(
            Router::new(),
            OperationSpec::new(Method::CONNECT, "/tunnel/", "tunnel.open"),
            noop(&Method::GET),
        );
        let err = res.err().unwrap().to_string();
        assert!(err.contains("CONNECT"), "{err}");
        assert!(registry.operations().is_empty());
    }

    #[test]
    fn allow_header_lists_registered_verbs_plus_head_and_options() {
        let mut registry = OpenApiRegistry::default();
        let mut router = Router::new();
        for (method, path) in [
            (Method::GET, "/things/"),
            (Method::POST, "/things/"),
            (Method::DELETE, "/things/{id}/"),
        ] {
            let handler = noop(&method);
            router = registry
                .route(router, OperationSpec::new(method, path, "things.op"), handler)
                .unwrap();
        }

        let allowed = registry.allowed_methods();
        assert_eq!(allowed["/things/"], "GET, POST, HEAD, OPTIONS");
        assert_eq!(allowed["/things/{id}/"], "DELETE, OPTIONS");
    }

    #[test]
    fn path_params_are_extracted_in_order() {
        let names: Vec<&str> = path_params("/authors/{user_id}/reviews/{id}/").collect();
        assert_eq!(names, ["user_id", "id"]);
        assert_eq!(path_params("/ebooks/").count(), 0);
    }
}
