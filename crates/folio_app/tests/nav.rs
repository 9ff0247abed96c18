mod common;

use common::*;
use folio_app::prelude::*;
use proptest::prelude::*;

fn nav_page() -> PortfolioApp {
    let mut page = Page::new();
    page.navbar(80.0, &["home", "about"]);
    page.section("home", "hero", 0.0, 500.0);
    page.section("about", "about", 500.0, 500.0);
    page.into_app(phone(), config())
}

fn is_open(app: &PortfolioApp) -> bool {
    let menu = by_id(app, "nav-menu");
    app.document().has_class(menu, "active")
}

fn is_locked(app: &PortfolioApp) -> bool {
    let body = app.document().body();
    style(app, body, "overflow") == Some("hidden")
}

#[test]
fn test_toggle_opens_and_locks() {
    let mut app = nav_page();
    start(&mut app);
    let toggle = by_id(&app, "nav-toggle");

    click(&mut app, toggle);
    assert!(is_open(&app));
    assert!(app.document().has_class(toggle, "active"));
    assert!(is_locked(&app));

    click(&mut app, toggle);
    assert!(!is_open(&app));
    assert!(!is_locked(&app));
}

#[test]
fn test_link_click_closes() {
    let mut app = nav_page();
    start(&mut app);
    click_id(&mut app, "nav-toggle");

    let link = app.document().query_selector(".nav-link").unwrap();
    click(&mut app, link);
    assert!(!is_open(&app));
    assert!(!is_locked(&app));
}

#[test]
fn test_outside_click_closes() {
    let mut app = nav_page();
    start(&mut app);
    click_id(&mut app, "nav-toggle");

    // Inside the menu but not on a link keeps it open
    click_id(&mut app, "nav-menu");
    assert!(is_open(&app));

    click_id(&mut app, "about");
    assert!(!is_open(&app));
    assert!(!is_locked(&app));
}

#[test]
fn test_widening_past_breakpoint_closes() {
    let mut app = nav_page();
    start(&mut app);
    click_id(&mut app, "nav-toggle");

    resize(&mut app, 768.0, 844.0);
    assert!(is_open(&app));

    resize(&mut app, 1024.0, 844.0);
    assert!(!is_open(&app));
    assert!(!is_locked(&app));
}

#[test]
fn test_unload_releases_lock() {
    let mut app = nav_page();
    start(&mut app);
    click_id(&mut app, "nav-toggle");
    assert!(is_locked(&app));

    app.dispatch(Event::Lifecycle(LifecycleEvent::Unload));
    assert!(!is_open(&app));
    assert!(!is_locked(&app));
}

#[test]
fn test_toggle_without_menu_is_inert() {
    let mut page = Page::new();
    let body = page.body();
    page.add(body, Element::new("div").with_id("nav-toggle").with_class("nav-toggle"));
    page.add(
        body,
        Element::new("a").with_class("nav-link").with_attr("href", "#home"),
    );
    page.section("home", "hero", 0.0, 500.0);
    let mut app = page.into_app(phone(), config());
    start(&mut app);

    let toggle = by_id(&app, "nav-toggle");
    click(&mut app, toggle);
    assert!(!app.document().has_class(toggle, "active"));
    assert!(!is_locked(&app));

    // Closing paths leave a host-set lock alone
    let body = app.document().body();
    app.document_mut().set_style(body, "overflow", "hidden");
    let link = app.document().query_selector(".nav-link").unwrap();
    click(&mut app, link);
    assert!(is_locked(&app));
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Toggle,
    Link,
    Menu,
    Outside,
    Resize(f32),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Toggle),
        Just(Action::Link),
        Just(Action::Menu),
        Just(Action::Outside),
        (300.0f32..1400.0).prop_map(Action::Resize),
    ]
}

proptest! {
    #[test]
    fn prop_lock_tracks_open_state(actions in prop::collection::vec(action(), 1..40)) {
        let mut app = nav_page();
        start(&mut app);

        for action in actions {
            match action {
                Action::Toggle => click_id(&mut app, "nav-toggle"),
                Action::Link => {
                    let link = app.document().query_selector(".nav-link").unwrap();
                    click(&mut app, link);
                }
                Action::Menu => click_id(&mut app, "nav-menu"),
                Action::Outside => click_id(&mut app, "home"),
                Action::Resize(width) => resize(&mut app, width, 844.0),
            }
            app.advance(5);

            let toggle = by_id(&app, "nav-toggle");
            prop_assert_eq!(is_open(&app), is_locked(&app));
            prop_assert_eq!(is_open(&app), app.document().has_class(toggle, "active"));
            if app.environment().viewport.width > 768.0 {
                if let Action::Resize(_) = action {
                    prop_assert!(!is_open(&app));
                }
            }
        }
    }
}
