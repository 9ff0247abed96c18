//! Contact form
//!
//! Fields of `#contact-form` are validated on blur and re-validated together
//! on submit. A valid submission puts the submit button into a pending state
//! and hands the data to a [`SubmissionTransport`]; whatever the outcome, the
//! button is released and a status message appears above the form for a few
//! seconds. Only one submission is in flight at a time.
//!
//! Field values live in each field's `value` attribute, kept current by
//! input events.

use folio_animation::TaskId;
use folio_core::{Element, NodeId};
use folio_platform::{Event, FieldEvent, InputEvent};

use crate::component::Component;
use crate::context::PageContext;
use crate::messages::{AppMessage, Wake};
use crate::transport::{ContactSubmission, SubmissionTransport};
use crate::validation::{FieldKind, ValidationError};

pub const BLOCKED_MESSAGE: &str = "Please correct the errors above.";
pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been sent successfully.";
pub const FAILURE_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again.";

/// Kind of status message shown above the form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    fn class(self) -> &'static str {
        match self {
            MessageKind::Success => "success",
            MessageKind::Error => "error",
        }
    }

    fn color(self) -> &'static str {
        match self {
            MessageKind::Success => "#4ecdc4",
            MessageKind::Error => "#ff6b6b",
        }
    }

    fn background(self) -> &'static str {
        match self {
            MessageKind::Success => "rgba(78, 205, 196, 0.1)",
            MessageKind::Error => "rgba(255, 107, 107, 0.1)",
        }
    }
}

pub struct ContactForm {
    transport: Box<dyn SubmissionTransport>,
    form: Option<NodeId>,
    submit_button: Option<NodeId>,
    pending: Option<ContactSubmission>,
    message: Option<(NodeId, TaskId)>,
}

impl std::fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForm")
            .field("form", &self.form)
            .field("pending", &self.pending.is_some())
            .field("message", &self.message)
            .finish()
    }
}

impl ContactForm {
    pub fn new(transport: Box<dyn SubmissionTransport>) -> Self {
        Self {
            transport,
            form: None,
            submit_button: None,
            pending: None,
            message: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn field(&self, ctx: &PageContext<'_>, kind: FieldKind) -> Option<NodeId> {
        let form = self.form?;
        let selector = format!("[name=\"{}\"]", kind.name());
        ctx.doc.query_within(form, &selector).first().copied()
    }

    /// The form field `node` is, if any
    fn field_kind(&self, ctx: &PageContext<'_>, node: NodeId) -> Option<FieldKind> {
        let form = self.form?;
        if !ctx.doc.contains(form, node) {
            return None;
        }
        ctx.doc
            .attr(node, "name")
            .and_then(|name| FieldKind::from_name(&name))
    }

    fn value(ctx: &PageContext<'_>, field: NodeId) -> String {
        ctx.doc.attr(field, "value").unwrap_or_default()
    }

    /// Validate one field and reflect the result in the page
    fn validate_field(ctx: &mut PageContext<'_>, field: NodeId, kind: FieldKind) -> bool {
        let value = Self::value(ctx, field);
        let result = kind.validate(&value);
        let message = result.err().map(|err: ValidationError| err.to_string());

        if let Some(error) = ctx.doc.element_by_id(&kind.error_id()) {
            ctx.doc.set_text(error, message.clone().unwrap_or_default());
        }
        let valid = message.is_none();
        ctx.doc.set_class(field, "error", !valid);
        ctx.doc.set_class(field, "success", valid && !value.trim().is_empty());
        valid
    }

    fn clear_field_error(ctx: &mut PageContext<'_>, field: NodeId, kind: FieldKind) {
        if let Some(error) = ctx.doc.element_by_id(&kind.error_id()) {
            ctx.doc.set_text(error, "");
        }
        ctx.doc.remove_class(field, "error");
    }

    fn show_message(&mut self, ctx: &mut PageContext<'_>, text: &str, kind: MessageKind) {
        let Some(form) = self.form else {
            return;
        };
        if let Some((node, expiry)) = self.message.take() {
            ctx.cancel(expiry);
            ctx.doc.remove(node);
        }
        for stale in ctx.doc.query_selector_all(".form-message") {
            ctx.doc.remove(stale);
        }

        let element = Element::new("div")
            .with_classes(&format!("form-message {}", kind.class()))
            .with_text(text)
            .with_style("padding", "1rem")
            .with_style("border-radius", "0.5rem")
            .with_style("margin-bottom", "1rem")
            .with_style("font-size", "0.875rem")
            .with_style("font-weight", "500")
            .with_style("background-color", kind.background())
            .with_style("color", kind.color())
            .with_style("border", format!("1px solid {}", kind.color()));
        let node = ctx.doc.prepend(form, element);

        let duration = ctx.config.form.message_duration;
        let expiry = ctx.set_timeout(duration, Wake::MessageExpired { node });
        self.message = Some((node, expiry));
    }

    fn set_button_pending(&self, ctx: &mut PageContext<'_>, pending: bool) {
        let Some(button) = self.submit_button else {
            return;
        };
        ctx.doc.set_class(button, "loading", pending);
        if pending {
            ctx.doc.set_attr(button, "disabled", "");
        } else {
            ctx.doc.remove_attr(button, "disabled");
        }
    }

    fn submit(&mut self, ctx: &mut PageContext<'_>) {
        if self.pending.is_some() {
            tracing::debug!("submission already in flight; ignoring submit");
            return;
        }

        let mut valid = true;
        let mut values = Vec::with_capacity(FieldKind::ALL.len());
        for kind in FieldKind::ALL {
            match self.field(ctx, kind) {
                Some(field) => {
                    // Every field is validated so each shows its own error
                    valid &= Self::validate_field(ctx, field, kind);
                    values.push(Self::value(ctx, field).trim().to_string());
                }
                None => values.push(String::new()),
            }
        }
        if !valid {
            self.show_message(ctx, BLOCKED_MESSAGE, MessageKind::Error);
            return;
        }

        let [name, email, subject, message]: [String; 4] = match values.try_into() {
            Ok(values) => values,
            Err(_) => return,
        };
        self.pending = Some(ContactSubmission {
            name,
            email,
            subject,
            message,
        });
        self.set_button_pending(ctx, true);
        ctx.set_timeout(self.transport.latency(), Wake::SubmissionDue);
    }

    fn settle(&mut self, ctx: &mut PageContext<'_>) {
        let Some(submission) = self.pending.take() else {
            return;
        };

        let success = match self.transport.deliver(&submission, &mut *ctx.rng) {
            Ok(()) => {
                self.show_message(ctx, SUCCESS_MESSAGE, MessageKind::Success);
                self.reset_fields(ctx);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "contact submission failed");
                self.show_message(ctx, FAILURE_MESSAGE, MessageKind::Error);
                false
            }
        };

        self.set_button_pending(ctx, false);
        ctx.publish(AppMessage::SubmissionSettled { success });
    }

    fn reset_fields(&self, ctx: &mut PageContext<'_>) {
        let Some(form) = self.form else {
            return;
        };
        for field in ctx.doc.query_within(form, "input, textarea") {
            if ctx.doc.attr(field, "value").is_some() {
                ctx.doc.set_attr(field, "value", "");
            }
            ctx.doc.remove_class(field, "success");
            ctx.doc.remove_class(field, "error");
        }
    }
}

impl Component for ContactForm {
    fn name(&self) -> &'static str {
        "form"
    }

    fn attach(&mut self, ctx: &mut PageContext<'_>) {
        self.form = ctx.doc.element_by_id("contact-form");
        self.submit_button = self
            .form
            .and_then(|form| ctx.doc.query_within(form, ".btn-submit").first().copied());
        self.pending = None;
        self.message = None;
        if self.form.is_none() {
            tracing::debug!("no #contact-form; contact form inert");
        }
    }

    fn detach(&mut self, ctx: &mut PageContext<'_>) {
        if self.pending.take().is_some() {
            self.set_button_pending(ctx, false);
        }
        if let Some((node, _)) = self.message.take() {
            ctx.doc.remove(node);
        }
        self.form = None;
        self.submit_button = None;
    }

    fn handle_event(&mut self, event: &Event, ctx: &mut PageContext<'_>) {
        let Event::Input(input) = event else {
            return;
        };
        match input {
            InputEvent::Field(FieldEvent::Input { target, value }) => {
                if let Some(kind) = self.field_kind(ctx, *target) {
                    ctx.doc.set_attr(*target, "value", value.as_str());
                    Self::clear_field_error(ctx, *target, kind);
                }
            }
            InputEvent::Field(FieldEvent::Blur { target }) => {
                if let Some(kind) = self.field_kind(ctx, *target) {
                    Self::validate_field(ctx, *target, kind);
                }
            }
            InputEvent::Submit { form } if Some(*form) == self.form => self.submit(ctx),
            _ => {}
        }
    }

    fn on_wake(&mut self, wake: Wake, ctx: &mut PageContext<'_>) {
        match wake {
            Wake::SubmissionDue => self.settle(ctx),
            Wake::MessageExpired { node } => {
                if matches!(self.message, Some((current, _)) if current == node) {
                    self.message = None;
                }
                ctx.doc.remove(node);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_styles() {
        assert_eq!(MessageKind::Success.class(), "success");
        assert_eq!(MessageKind::Error.color(), "#ff6b6b");
        assert_eq!(MessageKind::Success.background(), "rgba(78, 205, 196, 0.1)");
    }
}
