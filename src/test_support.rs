//! Test support utilities shared across unit and integration tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::{Value, json};

use crate::transport::{Method, Transport, TransportError, TransportFuture};

/// Records a single request made through [`ScriptedTransport`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordedRequest {
    /// HTTP verb.
    pub method: Method,
    /// API path including any query string.
    pub path: String,
    /// JSON body, when one was sent.
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// Returns `METHOD path` for assertions.
    #[must_use]
    pub fn line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Scripted transport that returns pre-seeded responses in FIFO order.
///
/// Used to drive the resource layer deterministically without a network.
#[derive(Clone, Debug, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<Vec<u8>, TransportError>>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedTransport {
    /// Creates a new transport with no queued responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all requests recorded so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    /// Returns the `METHOD path` line of every recorded request.
    #[must_use]
    pub fn request_lines(&self) -> Vec<String> {
        lock(&self.requests).iter().map(RecordedRequest::line).collect()
    }

    /// Queues a JSON response body.
    pub fn push_json(&self, body: &Value) {
        self.push_body(body.to_string());
    }

    /// Queues a raw response body.
    pub fn push_body(&self, body: impl Into<String>) {
        lock(&self.responses).push_back(Ok(body.into().into_bytes()));
    }

    /// Queues a `{"result": "success"}` acknowledgment.
    pub fn push_success(&self) {
        self.push_json(&json!({"result": "success"}));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: TransportError) {
        lock(&self.responses).push_back(Err(error));
    }
}

impl Transport for ScriptedTransport {
    fn send<'a>(
        &'a self,
        method: Method,
        path: &'a str,
        body: Option<&'a Value>,
    ) -> TransportFuture<'a> {
        lock(&self.requests).push(RecordedRequest {
            method,
            path: path.to_owned(),
            body: body.cloned(),
        });
        let next = lock(&self.responses).pop_front().unwrap_or_else(|| {
            Err(TransportError::Request {
                message: String::from("no scripted response available"),
            })
        });
        Box::pin(async move { next })
    }
}

/// Produces a volume listing entry with the fields the queries inspect.
#[must_use]
pub fn json_volume(id: &str, name: &str, cluster_id: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "instance_id": "",
        "cluster_id": cluster_id,
        "network_id": "net-default",
        "mountpoint": "",
        "status": "available",
        "volume_type": "csi-s3",
        "size_gb": 10,
        "bootable": false,
        "created_at": "2024-03-01T10:00:00Z"
    })
}

/// Produces a JSON array of volumes from `(id, name, cluster_id)` triples.
#[must_use]
pub fn json_volumes(volumes: &[(&str, &str, &str)]) -> Value {
    Value::Array(
        volumes
            .iter()
            .map(|(id, name, cluster_id)| json_volume(id, name, cluster_id))
            .collect(),
    )
}

/// Produces a paginated cluster listing from `(id, name)` pairs.
#[must_use]
pub fn json_clusters(clusters: &[(&str, &str)]) -> Value {
    let items = clusters
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name, "status": "ACTIVE"}))
        .collect::<Vec<_>>();
    json!({
        "page": 1,
        "per_page": 20,
        "pages": 1,
        "items": items
    })
}

/// Produces a JSON array of firewalls from `(id, name)` pairs.
#[must_use]
pub fn json_firewalls(firewalls: &[(&str, &str)]) -> Value {
    Value::Array(
        firewalls
            .iter()
            .map(|(id, name)| {
                json!({
                    "id": id,
                    "name": name,
                    "rules_count": "0",
                    "instances_count": "0",
                    "region": "LON1"
                })
            })
            .collect(),
    )
}
