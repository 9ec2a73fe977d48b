//! Fetch state controller.
//!
//! Wraps a single HTTP request/response cycle with observable `data`,
//! `error`, and `loading` state. A cycle can be started manually via
//! [`FetchController::execute`], once at mount time via
//! [`FetchController::mount`], or automatically whenever a watched
//! dependency cell changes via [`FetchController::watch`].
//!
//! Overlapping cycles are neither merged nor cancelled: whichever cycle
//! settles last wins the shared state.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use requery_core::{
    ErrorRecord, HttpResponse, Payload, RequestConfig, RequestOverrides, RequestPlan, UrlResolver,
};

use crate::cell::Cell;
use crate::client::HttpClient;
use crate::transport::Transport;

/// Callback invoked with the interpreted payload after a successful cycle.
pub type SuccessCallback = Box<dyn Fn(&Payload, &HttpResponse) + Send + Sync>;

/// Callback invoked with the error record after a failed cycle.
///
/// The response is present for HTTP errors and body-decode faults, absent
/// for validation errors and transport failures.
pub type ErrorCallback = Box<dyn Fn(&ErrorRecord, Option<&HttpResponse>) + Send + Sync>;

// ============================================================================
// Fetch Controller
// ============================================================================

/// Controller for one logical request with observable state.
///
/// State invariant: after a completed cycle exactly one of `data` and
/// `error` holds a value; both are empty while idle or in-flight, and
/// `loading` is true exactly between dispatch and settlement.
pub struct FetchController {
    config: RequestConfig,
    resolver: UrlResolver,
    transport: Arc<dyn Transport>,
    data: Cell<Option<Payload>>,
    error: Cell<Option<ErrorRecord>>,
    loading: Cell<bool>,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

impl FetchController {
    /// Creates a builder for a new controller.
    pub fn builder() -> FetchControllerBuilder {
        FetchControllerBuilder::new()
    }

    /// Returns a handle to the interpreted payload of the last successful
    /// cycle.
    pub fn data(&self) -> Cell<Option<Payload>> {
        self.data.clone()
    }

    /// Returns a handle to the error record of the last failed cycle.
    pub fn error(&self) -> Cell<Option<ErrorRecord>> {
        self.error.clone()
    }

    /// Returns a handle to the in-flight flag.
    pub fn loading(&self) -> Cell<bool> {
        self.loading.clone()
    }

    /// Runs one fetch cycle.
    ///
    /// Merges `overrides` over the base configuration, validates the URL,
    /// dispatches the request, and settles the state cells. Failures are
    /// surfaced through the error cell and the `on_error` callback; this
    /// method itself never fails.
    pub async fn execute(&self, overrides: RequestOverrides) {
        let plan = self.config.merge(overrides);
        if !plan.has_url() {
            warn!("execute called without a url");
            let record = ErrorRecord::validation("request url is required");
            self.error.set(Some(record.clone()));
            self.emit_error(&record, None);
            return;
        }

        self.loading.set(true);
        self.data.set(None);
        self.error.set(None);

        self.dispatch(plan).await;

        self.loading.set(false);
    }

    /// Schedules one fetch at mount time.
    ///
    /// No-op unless the controller was configured with `fetch_on_mount` and
    /// a non-empty base URL. The owning context calls this once when it
    /// comes up; the fetch runs as a spawned task with no overrides.
    pub fn mount(self: &Arc<Self>) {
        if !self.config.fetch_on_mount || self.config.url.is_empty() {
            return;
        }

        let controller = Arc::clone(self);
        tokio::spawn(async move {
            controller.execute(RequestOverrides::default()).await;
        });
    }

    /// Re-fetches whenever a watched dependency changes.
    ///
    /// No-op for an empty dependency list or an empty base URL. Each change
    /// of a dependency cell (deep comparison, via the cell's change gating)
    /// spawns a fresh no-override fetch. Subscriptions hold only a weak
    /// reference: dropping the controller orphans pending notifications
    /// instead of keeping it alive.
    pub fn watch(self: &Arc<Self>, deps: &[Cell<Value>]) {
        if deps.is_empty() || self.config.url.is_empty() {
            return;
        }

        for dep in deps {
            let weak = Arc::downgrade(self);
            dep.subscribe(move |_| {
                if let Some(controller) = weak.upgrade() {
                    tokio::spawn(async move {
                        controller.execute(RequestOverrides::default()).await;
                    });
                }
            });
        }
    }

    async fn dispatch(&self, plan: RequestPlan) {
        let request = match plan.assemble(&self.resolver) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "request assembly failed");
                let record = ErrorRecord::fault(e.to_string());
                self.error.set(Some(record.clone()));
                self.emit_error(&record, None);
                return;
            }
        };

        debug!(url = %request.url, method = %request.method, "dispatching request");

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "transport failure");
                let record = ErrorRecord::fault(e.to_string());
                self.error.set(Some(record.clone()));
                self.emit_error(&record, None);
                return;
            }
        };

        let payload = match Payload::from_response(&response) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "failed to decode response body");
                let record = ErrorRecord::fault(format!("failed to decode response body: {e}"));
                self.error.set(Some(record.clone()));
                self.emit_error(&record, Some(&response));
                return;
            }
        };

        if response.is_success() {
            debug!(status = response.status, "request settled");
            self.data.set(Some(payload.clone()));
            if let Some(on_success) = &self.on_success {
                on_success(&payload, &response);
            }
        } else {
            warn!(status = response.status, "request settled with http error");
            let record = ErrorRecord::http(&response, payload);
            self.error.set(Some(record.clone()));
            self.emit_error(&record, Some(&response));
        }
    }

    fn emit_error(&self, record: &ErrorRecord, response: Option<&HttpResponse>) {
        if let Some(on_error) = &self.on_error {
            on_error(record, response);
        }
    }
}

impl std::fmt::Debug for FetchController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchController")
            .field("config", &self.config)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for constructing a [`FetchController`].
pub struct FetchControllerBuilder {
    config: RequestConfig,
    base_url: String,
    transport: Option<Arc<dyn Transport>>,
    on_success: Option<SuccessCallback>,
    on_error: Option<ErrorCallback>,
}

impl FetchControllerBuilder {
    /// Creates a new builder with an empty GET configuration.
    pub fn new() -> Self {
        Self {
            config: RequestConfig::default(),
            base_url: String::new(),
            transport: None,
            on_success: None,
            on_error: None,
        }
    }

    /// Sets the base origin paths are resolved against.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request path or full URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// Sets the HTTP method.
    pub fn method(mut self, method: requery_core::Method) -> Self {
        self.config.method = method;
        self
    }

    /// Sets the request body.
    pub fn body(mut self, body: impl Into<requery_core::Body>) -> Self {
        self.config.body = Some(body.into());
        self
    }

    /// Adds a request header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.headers.insert(name.into(), value.into());
        self
    }

    /// Runs one fetch when the owning context mounts.
    pub fn fetch_on_mount(mut self, fetch_on_mount: bool) -> Self {
        self.config.fetch_on_mount = fetch_on_mount;
        self
    }

    /// Sets the success callback.
    pub fn on_success(
        mut self,
        callback: impl Fn(&Payload, &HttpResponse) + Send + Sync + 'static,
    ) -> Self {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Sets the error callback.
    pub fn on_error(
        mut self,
        callback: impl Fn(&ErrorRecord, Option<&HttpResponse>) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    /// Sets the transport implementation.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the controller.
    ///
    /// Falls back to the default [`HttpClient`] when no transport was set;
    /// see [`HttpClient::default`] for the panic conditions of that
    /// fallback.
    pub fn build(self) -> Arc<FetchController> {
        Arc::new(FetchController {
            config: self.config,
            resolver: UrlResolver::new(self.base_url),
            transport: self
                .transport
                .unwrap_or_else(|| Arc::new(HttpClient::default())),
            data: Cell::new(None),
            error: Cell::new(None),
            loading: Cell::new(false),
            on_success: self.on_success,
            on_error: self.on_error,
        })
    }
}

impl Default for FetchControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
