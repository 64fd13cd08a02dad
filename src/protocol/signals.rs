//! Signal types exchanged between producers, issuers and the surface.
//!
//! This module defines the three-signal protocol of the engine and its JSON wire
//! form. It also implements tracing context propagation across the bus, so a
//! span opened by a producer becomes the parent of the spans the surface opens
//! while handling the signal.

use crate::domain::{Toast, ToastDetails, ToastId};
use serde::{Deserialize, Serialize};

/// Distributed tracing context carried alongside a signal.
///
/// Captures the current trace and span IDs from OpenTelemetry when a signal
/// is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across the bus.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid or not sampled,
    /// which is always the case when no OpenTelemetry layer is installed.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }

    /// Attaches this context as the remote parent of spans opened on the
    /// current thread.
    ///
    /// Returns a guard that must be held while the signal is delivered, or
    /// `None` if the IDs are not valid hex.
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }
}

/// Discriminant of a [`Signal`], used to subscribe to one signal kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Show,
    RequestDismiss,
    Dismissed,
}

impl SignalKind {
    /// Event name on the wire.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Show => "toaster",
            Self::RequestDismiss => "toaster-dismiss",
            Self::Dismissed => "toaster-dismissed",
        }
    }
}

/// Payload of a dismiss request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissRequest {
    /// Toast to dismiss.
    pub id: ToastId,
}

/// The three signals of the toast protocol.
///
/// Serialized as `{"event": "<name>", "detail": <payload>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "detail")]
pub enum Signal {
    /// Request to display a new toast.
    #[serde(rename = "toaster")]
    Show(ToastDetails),

    /// Request to begin the exit transition of a toast.
    #[serde(rename = "toaster-dismiss")]
    RequestDismiss(DismissRequest),

    /// A toast finished its exit animation and left the store.
    #[serde(rename = "toaster-dismissed")]
    Dismissed(Toast),
}

impl Signal {
    /// Builds a dismiss request for `id`.
    #[must_use]
    pub const fn request_dismiss(id: ToastId) -> Self {
        Self::RequestDismiss(DismissRequest { id })
    }

    /// The signal's kind.
    #[must_use]
    pub const fn kind(&self) -> SignalKind {
        match self {
            Self::Show(_) => SignalKind::Show,
            Self::RequestDismiss(_) => SignalKind::RequestDismiss,
            Self::Dismissed(_) => SignalKind::Dismissed,
        }
    }

    /// The toast the signal refers to.
    #[must_use]
    pub const fn toast_id(&self) -> &ToastId {
        match self {
            Self::Show(details) => &details.id,
            Self::RequestDismiss(request) => &request.id,
            Self::Dismissed(toast) => toast.id(),
        }
    }
}

/// A signal plus the tracing context it was published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// The signal itself.
    #[serde(flatten)]
    pub signal: Signal,

    /// Trace context for linking spans across the bus.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_context: Option<TraceContext>,
}

impl Envelope {
    /// Wraps a signal with the current trace context.
    #[must_use]
    pub fn new(signal: Signal) -> Self {
        Self {
            signal,
            trace_context: TraceContext::from_current(),
        }
    }

    /// Decodes an envelope from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`ToasterError::Decode`](crate::ToasterError::Decode) when the
    /// input is not a valid signal.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encodes the envelope to its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns [`ToasterError::Decode`](crate::ToasterError::Decode) if
    /// serialization fails.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
