#![forbid(unsafe_code)]

//! Tracing output of the masking loop.
//!
//! Every content change opens a `mask.edit` span carrying the field name,
//! caret and digit count; silent outcomes (rejections, refused switches)
//! leave events behind.
//!
//! Run:
//!   cargo test -p fmask-widgets --test tracing_mask_spans

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fmask_core::{Event, KeyCode, KeyEvent};
use fmask_widgets::{DateField, InputKind, PhoneField, PresentationError, PresentationHost};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
struct CapturedSpan {
    name: String,
    level: tracing::Level,
    fields: HashMap<String, String>,
}

#[derive(Debug, Clone)]
struct CapturedEvent {
    level: tracing::Level,
    message: String,
    parent_span_name: Option<String>,
}

#[derive(Default, Clone)]
struct Capture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl Capture {
    fn spans_named(&self, name: &str) -> Vec<CapturedSpan> {
        self.spans
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect()
    }

    fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().unwrap().clone()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        self.spans.lock().unwrap().push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            level: *attrs.metadata().level(),
            fields: visitor.0.into_iter().collect(),
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let message = visitor
            .0
            .iter()
            .find(|(k, _)| k == "message")
            .map(|(_, v)| v.clone())
            .unwrap_or_default();
        let parent_span_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());
        self.events.lock().unwrap().push(CapturedEvent {
            level: *event.metadata().level(),
            message,
            parent_span_name,
        });
    }
}

fn with_capture(f: impl FnOnce()) -> Capture {
    let capture = Capture::default();
    let subscriber = tracing_subscriber::registry().with(capture.clone());
    tracing::subscriber::with_default(subscriber, f);
    capture
}

fn key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c)))
}

#[derive(Debug)]
struct RefusingHost;

impl PresentationHost for RefusingHost {
    fn switch_kind(&mut self, _kind: InputKind) -> Result<(), PresentationError> {
        Err(PresentationError::Unsupported)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn every_edit_opens_a_mask_edit_span() {
    let capture = with_capture(|| {
        let mut field = DateField::free_text();
        for c in "1508".chars() {
            field.handle_event(&key(c));
        }
    });

    let spans = capture.spans_named("mask.edit");
    assert_eq!(spans.len(), 4);
    let last = &spans[3];
    assert_eq!(last.level, tracing::Level::DEBUG);
    assert_eq!(last.fields["field"], "date");
    assert_eq!(last.fields["operation"], "content_changed");
    assert_eq!(last.fields["cursor_position"], "5");
    assert_eq!(last.fields["digit_count"], "4");
    assert_eq!(last.fields["rejected"], "false");
}

#[test]
fn caret_moves_do_not_open_spans() {
    let capture = with_capture(|| {
        let mut field = PhoneField::new().with_value("(11)9");
        field.handle_event(&Event::Key(KeyEvent::new(KeyCode::Left)));
        field.handle_event(&Event::Key(KeyEvent::new(KeyCode::Home)));
    });
    assert!(capture.spans_named("mask.edit").is_empty());
}

#[test]
fn rejection_is_traced_inside_the_span() {
    let capture = with_capture(|| {
        let mut field = DateField::free_text();
        for c in "3102".chars() {
            field.handle_event(&key(c));
        }
    });

    let spans = capture.spans_named("mask.edit");
    assert_eq!(spans[3].fields["rejected"], "true");
    let rejected: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.message == "digits rejected")
        .collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].level, tracing::Level::TRACE);
    assert_eq!(rejected[0].parent_span_name.as_deref(), Some("mask.edit"));
}

#[test]
fn refused_switch_logs_a_warning() {
    let capture = with_capture(|| {
        let mut field = DateField::native(Box::new(RefusingHost));
        field.handle_event(&Event::Focus(true));
    });

    let warnings: Vec<_> = capture
        .events()
        .into_iter()
        .filter(|e| e.level == tracing::Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("presentation switch failed"));
}
