//! Scripted in-memory backend for transport and controller tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::backend::{HttpBackend, HttpRequest, Method, RawResponse};
use super::transport::TransportError;

type Reply = Result<RawResponse, TransportError>;

/// Records every dispatched request and answers from a route table.
/// Unscripted routes answer `404 {"detail":"Not Found"}`.
#[derive(Clone, Default)]
pub struct FakeBackend {
    routes: Rc<RefCell<HashMap<String, Reply>>>,
    sent: Rc<RefCell<Vec<HttpRequest>>>,
}

fn route_key(method: Method, path: &str) -> String {
    format!("{} {path}", method.as_str())
}

impl FakeBackend {
    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.routes
            .borrow_mut()
            .insert(route_key(method, path), Ok(RawResponse { status, body: body.to_owned() }));
        self
    }

    pub fn fail(&self, method: Method, path: &str, error: TransportError) -> &Self {
        self.routes.borrow_mut().insert(route_key(method, path), Err(error));
        self
    }

    pub fn sent(&self) -> Vec<HttpRequest> {
        self.sent.borrow().clone()
    }

    /// `"METHOD /path"` for every request seen, in order.
    pub fn sent_routes(&self) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .map(|req| route_key(req.method, &path_of(&req.url)))
            .collect()
    }
}

fn path_of(url: &str) -> String {
    url::Url::parse(url).map_or_else(|_| url.to_owned(), |parsed| parsed.path().to_owned())
}

impl HttpBackend for FakeBackend {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse, TransportError> {
        let key = route_key(request.method, &path_of(&request.url));
        self.sent.borrow_mut().push(request);
        self.routes.borrow().get(&key).cloned().unwrap_or_else(|| {
            Ok(RawResponse { status: 404, body: r#"{"detail":"Not Found"}"#.to_owned() })
        })
    }
}
