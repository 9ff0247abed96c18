mod common;

use common::*;
use folio_app::folio_animation::TypingTimings;
use folio_app::prelude::*;

fn load(app: &mut PortfolioApp) {
    app.dispatch(Event::Lifecycle(LifecycleEvent::Load));
}

fn count(app: &PortfolioApp, selector: &str) -> usize {
    app.document().query_selector_all(selector).len()
}

/// Loader overlay, an about section in view and a skills section below the fold
fn full_page() -> Page {
    let mut page = Page::new();
    let body = page.body();
    let overlay = page.add(body, Element::new("div").with_id("pageLoader"));
    page.add(overlay, Element::new("div").with_id("loadingBar"));

    let about = page.section("about", "about", 0.0, 700.0);
    page.add(about, Element::new("div").with_class("animated-bg"));
    page.add(
        about,
        Element::new("div")
            .with_class("about-content")
            .with_layout(Rect::band(100.0, 300.0)),
    );

    let skills = page.section("skills", "skills", 2000.0, 600.0);
    let grid = page.add(skills, Element::new("div").with_class("skills-grid"));
    for (index, level) in ["85", "40"].into_iter().enumerate() {
        let top = 2100.0 + index as f32 * 120.0;
        let item = page.add(
            grid,
            Element::new("div")
                .with_classes("skill-item stagger-item")
                .with_layout(Rect::band(top, 100.0)),
        );
        page.add(
            item,
            Element::new("div")
                .with_class("skill-progress")
                .with_attr("data-level", level),
        );
    }
    page
}

#[test]
fn test_loader_fades_then_page_is_ready() {
    let mut app = full_page().into_app(desktop(), config());
    start(&mut app);
    load(&mut app);

    assert!(app.run_until_idle(10_000));

    let overlay = by_id(&app, "pageLoader");
    let bar = by_id(&app, "loadingBar");
    assert!(app.document().has_class(overlay, "fade-out"));
    assert_eq!(style(&app, bar, "width"), Some("0%"));
}

#[test]
fn test_loader_reaches_full_width_before_fading() {
    let mut app = full_page().into_app(desktop(), config());
    start(&mut app);
    load(&mut app);
    let overlay = by_id(&app, "pageLoader");
    let bar = by_id(&app, "loadingBar");

    let mut last = 0.0f32;
    loop {
        app.advance(50);
        if app.document().has_class(overlay, "fade-out") {
            break;
        }
        if let Some(width) = style(&app, bar, "width") {
            let value: f32 = width.trim_end_matches('%').parse().unwrap();
            assert!(value >= last);
            last = value;
        }
        assert!(app.now() < 60_000, "loader never finished");
    }
    assert_eq!(last, 100.0);
}

#[test]
fn test_stagger_waits_for_page_ready_and_viewport() {
    let mut app = full_page().into_app(desktop(), config());
    start(&mut app);
    scroll(&mut app, 1800.0);
    app.advance(1000);
    assert_eq!(count(&app, ".stagger-item.animate"), 0, "page not ready yet");

    scroll(&mut app, 0.0);
    load(&mut app);
    assert!(app.run_until_idle(10_000));
    assert_eq!(count(&app, ".stagger-item.animate"), 0, "grid is below the fold");

    scroll(&mut app, 1800.0);
    app.advance(50);
    assert_eq!(count(&app, ".stagger-item.animate"), 1);
    app.advance(50);
    assert_eq!(count(&app, ".stagger-item.animate"), 2);
}

#[test]
fn test_missing_loader_is_ready_on_load() {
    let mut page = Page::new();
    let hero = page.section("home", "hero", 0.0, 800.0);
    let grid = page.add(hero, Element::new("div").with_class("skills-grid"));
    page.add(
        grid,
        Element::new("div")
            .with_classes("stagger-item fade-in")
            .with_layout(Rect::band(200.0, 100.0)),
    );
    let mut app = page.into_app(desktop(), config());
    start(&mut app);
    assert_eq!(count(&app, ".fade-in.animate"), 0);

    load(&mut app);
    assert_eq!(count(&app, ".fade-in.animate"), 1);
}

#[test]
fn test_content_reveal_and_section_fade() {
    let mut app = full_page().into_app(desktop(), config());
    start(&mut app);

    let about = by_id(&app, "about");
    let skills = by_id(&app, "skills");
    assert_eq!(style(&app, about, "opacity"), Some("1"));
    assert_eq!(style(&app, skills, "opacity"), Some("0"));
    assert_eq!(count(&app, ".about-content.animate-fadeInUp"), 1);
    assert_eq!(count(&app, ".skill-item.animate-fadeInUp"), 0);

    let background = app.document().query_selector(".about .animated-bg").unwrap();
    assert!(app.document().has_class(background, "about-active"));

    scroll(&mut app, 1800.0);
    assert_eq!(style(&app, skills, "opacity"), Some("1"));
    assert_eq!(count(&app, ".skill-item.animate-fadeInUp"), 2);
    assert!(!app.document().has_class(background, "about-active"));
    assert_eq!(style(&app, background, "opacity"), Some("0.7"));
}

#[test]
fn test_skill_bars_fill_after_skills_appear() {
    let mut app = full_page().into_app(desktop(), config());
    start(&mut app);
    let bars = app.document().query_selector_all(".skill-progress");

    app.advance(1000);
    assert_eq!(style(&app, bars[0], "width"), None);

    scroll(&mut app, 1800.0);
    app.advance(499);
    assert_eq!(style(&app, bars[0], "width"), None);
    app.advance(1);
    assert_eq!(style(&app, bars[0], "width"), Some("0%"));

    assert!(app.run_until_idle(5_000));
    assert_eq!(style(&app, bars[0], "width"), Some("85%"));
    assert_eq!(style(&app, bars[1], "width"), Some("40%"));

    // Revealing again does not restart the fill
    scroll(&mut app, 0.0);
    scroll(&mut app, 1800.0);
    app.advance(1000);
    assert_eq!(style(&app, bars[0], "width"), Some("85%"));
}

#[test]
fn test_typing_timeline() {
    let mut page = Page::new();
    let body = page.body();
    let text = page.add(body, Element::new("span").with_id("typingText"));
    let mut config = config();
    config.typing.phrases = vec!["Hi".to_string()];
    let mut app = page.into_app(desktop(), config);
    start(&mut app);

    let shown = |app: &PortfolioApp| app.document().text(text).unwrap_or_default().to_string();
    let timeline = [
        (999, ""),
        (1000, "H"),
        (1100, "Hi"),
        (3099, "Hi"),
        (3100, "H"),
        (3150, ""),
        (3650, "H"),
        (3750, "Hi"),
    ];
    for (at, expected) in timeline {
        app.advance_to(at);
        assert_eq!(shown(&app), expected, "at {} ms", at);
    }
}

#[test]
fn test_zero_typing_timings_do_not_stall_the_clock() {
    let mut page = Page::new();
    let body = page.body();
    let text = page.add(body, Element::new("span").with_id("typingText"));
    let mut config = config();
    config.typing.phrases = vec!["Hi".to_string()];
    config.typing.timings = TypingTimings {
        type_interval: 0,
        delete_interval: 0,
        pause_after_complete: 0,
        pause_between_phrases: 0,
        start_delay: 0,
    };
    let mut app = page.into_app(desktop(), config);
    start(&mut app);

    app.advance(100);
    assert_eq!(app.now(), 100);
    let shown = app.document().text(text).unwrap_or_default();
    assert!("Hi".starts_with(shown), "unexpected text {:?}", shown);
}

#[test]
fn test_unload_cancels_everything() {
    let mut page = full_page();
    let body = page.body();
    page.add(body, Element::new("span").with_id("typingText"));
    page.add(body, Element::new("div").with_class("floating-item"));
    let mut app = page.into_app(desktop(), config());
    start(&mut app);
    load(&mut app);
    scroll(&mut app, 1800.0);
    app.advance(600);
    assert!(app.pending_tasks() > 0);
    assert_eq!(count(&app, ".floating-particles"), 1);

    app.dispatch(Event::Lifecycle(LifecycleEvent::Unload));
    assert!(!app.is_attached());
    assert_eq!(app.pending_tasks(), 0);
    assert_eq!(count(&app, ".floating-particles"), 0);

    let item = app.document().query_selector(".floating-item").unwrap();
    assert_eq!(style(&app, item, "transform"), None);
}

#[test]
fn test_empty_document_stays_inert() {
    let mut app = PortfolioApp::with_config(Document::new(), desktop(), config());
    let body = app.document().body();
    start(&mut app);
    load(&mut app);
    scroll(&mut app, 500.0);
    click(&mut app, body);
    resize(&mut app, 400.0, 700.0);
    app.dispatch(Event::Input(InputEvent::Pointer(PointerEvent::Moved {
        x: 10.0,
        y: 10.0,
        target: body,
    })));
    app.dispatch(Event::Input(InputEvent::Submit { form: body }));
    assert!(app.run_until_idle(10_000));
    assert!(app.take_host_requests().is_empty());

    app.dispatch(Event::Lifecycle(LifecycleEvent::Unload));
    assert_eq!(app.document().len(), 1);
}

fn particle_page() -> Page {
    let mut page = Page::new();
    for (index, id) in ["home", "about"].into_iter().enumerate() {
        let section = page.section(id, id, index as f32 * 800.0, 800.0);
        page.add(section, Element::new("div").with_class("animated-bg"));
    }
    page
}

#[test]
fn test_particle_budget_follows_tier() {
    for (env, per_container) in [(desktop(), 15), (phone(), 8)] {
        let mut app = particle_page().into_app(env, config());
        start(&mut app);

        let containers = app.document().query_selector_all(".floating-particles");
        assert_eq!(containers.len(), 2);
        for container in containers {
            assert_eq!(app.document().children(container).len(), per_container);
        }
    }
}

#[test]
fn test_weak_hardware_is_low_tier() {
    let env = Environment::new(Viewport::new(1280.0, 800.0)).with_hardware_concurrency(2);
    let mut app = particle_page().into_app(env, config());
    start(&mut app);
    assert_eq!(count(&app, ".floating-particles .particle"), 16);
}

#[test]
fn test_pointer_particles_are_rate_limited_and_expire() {
    let mut app = particle_page().into_app(desktop(), config());
    start(&mut app);
    let about = by_id(&app, "about");
    let moved = |app: &mut PortfolioApp, x: f32| {
        app.dispatch(Event::Input(InputEvent::Pointer(PointerEvent::Moved {
            x,
            y: 300.0,
            target: about,
        })));
    };

    moved(&mut app, 100.0);
    app.advance(50);
    moved(&mut app, 120.0);
    assert_eq!(count(&app, ".mouse-particle"), 1);

    app.advance(51);
    moved(&mut app, 140.0);
    assert_eq!(count(&app, ".mouse-particle"), 2);

    app.advance(699);
    assert_eq!(count(&app, ".mouse-particle"), 1);
    app.advance(101);
    assert_eq!(count(&app, ".mouse-particle"), 0);
}

#[test]
fn test_pointer_leave_resets_parallax() {
    let mut page = particle_page();
    let about = page.doc.element_by_id("about").unwrap();
    let code = page.add(about, Element::new("div").with_class("code-element"));
    let mut app = page.into_app(desktop(), config());
    start(&mut app);

    app.dispatch(Event::Input(InputEvent::Pointer(PointerEvent::Moved {
        x: 1200.0,
        y: 100.0,
        target: about,
    })));
    app.advance(16);
    assert!(style(&app, code, "transform").is_some());

    app.dispatch(Event::Input(InputEvent::Pointer(PointerEvent::Left { target: about })));
    assert_eq!(style(&app, code, "transform"), None);
    assert_eq!(style(&app, code, "filter"), None);
}

#[test]
fn test_portfolio_filter() {
    let mut page = Page::new();
    let section = page.section("portfolio", "portfolio", 0.0, 800.0);
    for filter in ["all", "web", "mobile"] {
        page.add(
            section,
            Element::new("button")
                .with_class("filter-btn")
                .with_attr("data-filter", filter),
        );
    }
    for category in ["web", "mobile", "web"] {
        page.add(
            section,
            Element::new("div")
                .with_class("portfolio-item")
                .with_attr("data-category", category),
        );
    }
    let mut app = page.into_app(desktop(), config());
    start(&mut app);

    let web = app.document().query_selector(".filter-btn[data-filter=\"web\"]").unwrap();
    click(&mut app, web);
    let shown: Vec<_> = app
        .document()
        .query_selector_all(".portfolio-item")
        .into_iter()
        .map(|item| style(&app, item, "display").unwrap_or_default().to_string())
        .collect();
    assert_eq!(shown, ["block", "none", "block"]);
    assert_eq!(count(&app, ".filter-btn.active"), 1);
    assert!(app.document().has_class(web, "active"));

    let all = app.document().query_selector(".filter-btn").unwrap();
    click(&mut app, all);
    assert_eq!(count(&app, ".portfolio-item.animate-fadeInUp"), 3);
    assert!(!app.document().has_class(web, "active"));
}

#[test]
fn test_button_lift() {
    let mut page = Page::new();
    let body = page.body();
    let button = page.add(body, Element::new("a").with_classes("btn btn-primary"));
    let mut app = page.into_app(desktop(), config());
    start(&mut app);

    app.dispatch(Event::Input(InputEvent::Pointer(PointerEvent::Entered { target: button })));
    assert_eq!(style(&app, button, "transform"), Some("translateY(-2px)"));
    app.dispatch(Event::Input(InputEvent::Pointer(PointerEvent::Left { target: button })));
    assert_eq!(style(&app, button, "transform"), Some("translateY(0px)"));
}

#[test]
fn test_components_attach_in_order() {
    let app = Page::new().into_app(desktop(), config());
    assert_eq!(
        app.component_names(),
        [
            "loader", "nav", "scroll", "anchors", "reveal", "skills", "typing", "filter",
            "form", "background", "floating", "buttons"
        ]
    );
}
