mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::*;
use folio_app::components::{BLOCKED_MESSAGE, FAILURE_MESSAGE, SUCCESS_MESSAGE};
use folio_app::prelude::*;
use folio_app::{ContactSubmission, FieldKind, SubmissionError};
use rand::RngCore;

fn form_page() -> Page {
    let mut page = Page::new();
    let section = page.section("contact", "contact", 0.0, 900.0);
    let form = page.add(section, Element::new("form").with_id("contact-form"));
    for kind in FieldKind::ALL {
        let tag = if kind == FieldKind::Message { "textarea" } else { "input" };
        page.add(
            form,
            Element::new(tag)
                .with_id(kind.name())
                .with_attr("name", kind.name())
                .with_attr("value", ""),
        );
        page.add(form, Element::new("div").with_id(kind.error_id()).with_class("error-message"));
    }
    page.add(form, Element::new("button").with_classes("btn btn-submit"));
    page
}

fn app_with_failure_rate(rate: f64) -> PortfolioApp {
    let mut config = config();
    config.form.failure_rate = rate;
    form_page().into_app(desktop(), config)
}

fn type_into(app: &mut PortfolioApp, kind: FieldKind, value: &str) {
    let target = by_id(app, kind.name());
    app.dispatch(Event::Input(InputEvent::Field(FieldEvent::Input {
        target,
        value: value.to_string(),
    })));
}

fn blur(app: &mut PortfolioApp, kind: FieldKind) {
    let target = by_id(app, kind.name());
    app.dispatch(Event::Input(InputEvent::Field(FieldEvent::Blur { target })));
}

fn fill_valid(app: &mut PortfolioApp) {
    type_into(app, FieldKind::Name, "  Ada Lovelace ");
    type_into(app, FieldKind::Email, "ada@example.com");
    type_into(app, FieldKind::Subject, "Engines");
    type_into(app, FieldKind::Message, "Let us talk about the analytical engine.");
}

fn submit(app: &mut PortfolioApp) {
    let form = by_id(app, "contact-form");
    app.dispatch(Event::Input(InputEvent::Submit { form }));
}

fn messages(app: &PortfolioApp) -> Vec<String> {
    let doc = app.document();
    doc.query_selector_all(".form-message")
        .into_iter()
        .filter_map(|node| doc.text(node).map(str::to_string))
        .collect()
}

fn error_text(app: &PortfolioApp, kind: FieldKind) -> String {
    let node = by_id(app, &kind.error_id());
    app.document().text(node).unwrap_or_default().to_string()
}

fn submit_button(app: &PortfolioApp) -> NodeId {
    app.document().query_selector(".btn-submit").unwrap()
}

/// Records what reaches it and always succeeds
struct Recording {
    sent: Rc<RefCell<Vec<ContactSubmission>>>,
}

impl SubmissionTransport for Recording {
    fn latency(&self) -> Millis {
        500
    }

    fn deliver(
        &mut self,
        submission: &ContactSubmission,
        _rng: &mut dyn RngCore,
    ) -> std::result::Result<(), SubmissionError> {
        self.sent.borrow_mut().push(submission.clone());
        Ok(())
    }
}

#[test]
fn test_successful_submission() {
    let mut app = app_with_failure_rate(0.0);
    start(&mut app);
    fill_valid(&mut app);
    submit(&mut app);

    let button = submit_button(&app);
    assert!(app.document().has_class(button, "loading"));
    assert!(app.document().attr(button, "disabled").is_some());

    app.advance(1999);
    assert!(messages(&app).is_empty());

    app.advance(1);
    assert_eq!(messages(&app), vec![SUCCESS_MESSAGE.to_string()]);
    assert!(app.document().query_selector(".form-message.success").is_some());
    assert!(!app.document().has_class(button, "loading"));
    assert!(app.document().attr(button, "disabled").is_none());
    for kind in FieldKind::ALL {
        let field = by_id(&app, kind.name());
        assert_eq!(app.document().attr(field, "value").as_deref(), Some(""));
    }
}

#[test]
fn test_failed_submission_keeps_fields() {
    let mut app = app_with_failure_rate(1.0);
    start(&mut app);
    fill_valid(&mut app);
    submit(&mut app);
    app.advance(2000);

    assert_eq!(messages(&app), vec![FAILURE_MESSAGE.to_string()]);
    assert!(app.document().query_selector(".form-message.error").is_some());
    let email = by_id(&app, "email");
    assert_eq!(
        app.document().attr(email, "value").as_deref(),
        Some("ada@example.com")
    );
    let button = submit_button(&app);
    assert!(!app.document().has_class(button, "loading"));
    assert!(app.document().attr(button, "disabled").is_none());
}

#[test]
fn test_submit_while_pending_is_ignored() {
    let sent = Rc::new(RefCell::new(Vec::new()));
    let transport = Recording { sent: sent.clone() };
    let page = form_page();
    let mut app = PortfolioApp::with_transport(page.doc, desktop(), config(), Box::new(transport));
    start(&mut app);
    fill_valid(&mut app);

    submit(&mut app);
    app.advance(100);
    submit(&mut app);
    app.advance(1000);

    let sent = sent.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].name, "Ada Lovelace");
    assert_eq!(sent[0].subject, "Engines");
}

#[test]
fn test_invalid_submit_is_blocked() {
    let mut app = app_with_failure_rate(0.0);
    start(&mut app);
    type_into(&mut app, FieldKind::Name, "A");
    type_into(&mut app, FieldKind::Subject, "Hello there");
    submit(&mut app);

    assert_eq!(messages(&app), vec![BLOCKED_MESSAGE.to_string()]);
    assert_eq!(error_text(&app, FieldKind::Name), "Name must be at least 2 characters");
    assert_eq!(error_text(&app, FieldKind::Email), "Email is required");
    assert_eq!(error_text(&app, FieldKind::Subject), "");
    assert_eq!(error_text(&app, FieldKind::Message), "Message is required");

    let name = by_id(&app, "name");
    assert!(app.document().has_class(name, "error"));
    let subject = by_id(&app, "subject");
    assert!(app.document().has_class(subject, "success"));

    let button = submit_button(&app);
    assert!(!app.document().has_class(button, "loading"));
    assert!(app.document().attr(button, "disabled").is_none());
}

#[test]
fn test_blur_validates_and_input_clears() {
    let mut app = app_with_failure_rate(0.0);
    start(&mut app);

    type_into(&mut app, FieldKind::Email, "a@b");
    blur(&mut app, FieldKind::Email);
    assert_eq!(
        error_text(&app, FieldKind::Email),
        "Please enter a valid email address"
    );
    let email = by_id(&app, "email");
    assert!(app.document().has_class(email, "error"));

    type_into(&mut app, FieldKind::Email, "a@b.com");
    assert_eq!(error_text(&app, FieldKind::Email), "");
    assert!(!app.document().has_class(email, "error"));

    blur(&mut app, FieldKind::Email);
    assert!(app.document().has_class(email, "success"));
}

#[test]
fn test_message_expires() {
    let mut app = app_with_failure_rate(0.0);
    start(&mut app);
    submit(&mut app);
    assert_eq!(messages(&app).len(), 1);

    app.advance(4999);
    assert_eq!(messages(&app).len(), 1);
    app.advance(1);
    assert!(messages(&app).is_empty());
}

#[test]
fn test_new_message_replaces_old() {
    let mut app = app_with_failure_rate(0.0);
    start(&mut app);
    submit(&mut app);
    app.advance(1000);
    submit(&mut app);

    assert_eq!(messages(&app).len(), 1);
    // The first expiry was cancelled with its message
    app.advance(4500);
    assert_eq!(messages(&app).len(), 1);
    app.advance(500);
    assert!(messages(&app).is_empty());
}

#[test]
fn test_message_is_first_child_of_form() {
    let mut app = app_with_failure_rate(0.0);
    start(&mut app);
    submit(&mut app);

    let form = by_id(&app, "contact-form");
    let first = app.document().children(form)[0];
    assert!(app.document().has_class(first, "form-message"));
}

#[test]
fn test_fields_outside_the_form_are_ignored() {
    let mut page = form_page();
    let body = page.body();
    let stray = page.add(body, Element::new("input").with_attr("name", "name"));
    let mut app = page.into_app(desktop(), config());
    start(&mut app);

    app.dispatch(Event::Input(InputEvent::Field(FieldEvent::Blur { target: stray })));
    assert_eq!(error_text(&app, FieldKind::Name), "");
    assert!(!app.document().has_class(stray, "error"));
}
