//! Framework-agnostic docs endpoint.
//!
//! [`DocsEndpoint`] answers `GET <path>` (default `/docs`) with the JSON array
//! produced by one fresh generation pass. Hosts forward requests to
//! [`DocsEndpoint::handle`] and fall through to their own routing when it
//! returns `None`.

use crate::descriptor::MetadataSource;
use crate::generator::DocsGenerator;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use log::{debug, error};

/// Default path the endpoint is served at.
pub const DEFAULT_DOCS_PATH: &str = "/docs";

pub struct DocsEndpoint<S> {
    path: String,
    generator: DocsGenerator,
    source: S,
}

impl<S: MetadataSource> DocsEndpoint<S> {
    pub fn new(source: S) -> Self {
        Self {
            path: DEFAULT_DOCS_PATH.to_string(),
            generator: DocsGenerator::default(),
            source,
        }
    }

    /// Serve at `path` instead of [`DEFAULT_DOCS_PATH`].
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Use a generator with non-default conventions.
    pub fn generator(mut self, generator: DocsGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// The path this endpoint answers on.
    pub fn docs_path(&self) -> &str {
        &self.path
    }

    /// Handle `request` if it targets this endpoint.
    ///
    /// Returns `None` for any other method or path. A failed generation pass
    /// becomes a `500` carrying the error text.
    pub fn handle<B>(&self, request: &Request<B>) -> Option<Response<String>> {
        if request.method() != Method::GET || request.uri().path() != self.path {
            return None;
        }
        debug!("Serving operation docs at {}", self.path);

        let body = self
            .generator
            .generate(&self.source)
            .and_then(|records| serde_json::to_string_pretty(&records).map_err(Into::into));

        Some(match body {
            Ok(json) => {
                let mut response = Response::new(json);
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                response
            }
            Err(e) => {
                error!("Failed to generate operation docs: {}", e);
                let mut response = Response::new(e.to_string());
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"));
                response
            }
        })
    }
}
