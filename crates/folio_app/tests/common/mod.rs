#![allow(dead_code)]

use folio_app::prelude::*;

pub fn config() -> AppConfig {
    AppConfig::default().with_seed(7)
}

pub fn desktop() -> Environment {
    Environment::new(Viewport::new(1280.0, 800.0)).with_hardware_concurrency(8)
}

pub fn phone() -> Environment {
    Environment::new(Viewport::new(390.0, 844.0)).with_hardware_concurrency(8)
}

/// Builds test documents
pub struct Page {
    pub doc: Document,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    pub fn new() -> Self {
        Self {
            doc: Document::new(),
        }
    }

    pub fn body(&self) -> NodeId {
        self.doc.body()
    }

    pub fn add(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.doc.append(parent, element)
    }

    pub fn section(&mut self, id: &str, class: &str, top: f32, height: f32) -> NodeId {
        let body = self.body();
        self.add(
            body,
            Element::new("section")
                .with_id(id)
                .with_classes(class)
                .with_layout(Rect::band(top, height)),
        )
    }

    /// Fixed navbar with a link per section id
    pub fn navbar(&mut self, height: f32, links: &[&str]) -> NodeId {
        let body = self.body();
        let nav = self.add(
            body,
            Element::new("nav")
                .with_id("navbar")
                .with_class("navbar")
                .with_layout(Rect::band(0.0, height)),
        );
        let toggle = Element::new("div").with_id("nav-toggle").with_class("nav-toggle");
        self.add(nav, toggle);
        let menu = self.add(nav, Element::new("ul").with_id("nav-menu").with_class("nav-menu"));
        for id in links {
            self.add(
                menu,
                Element::new("a")
                    .with_class("nav-link")
                    .with_attr("href", format!("#{}", id)),
            );
        }
        nav
    }

    pub fn into_app(self, env: Environment, config: AppConfig) -> PortfolioApp {
        PortfolioApp::with_config(self.doc, env, config)
    }
}

pub fn start(app: &mut PortfolioApp) {
    app.dispatch(Event::Lifecycle(LifecycleEvent::DomContentLoaded));
}

pub fn scroll(app: &mut PortfolioApp, y: f32) {
    app.dispatch(Event::Input(InputEvent::Scroll { y }));
}

pub fn click(app: &mut PortfolioApp, target: NodeId) {
    app.dispatch(Event::Input(InputEvent::Click { target }));
}

/// Click the element with the given id
pub fn click_id(app: &mut PortfolioApp, id: &str) {
    let target = by_id(app, id);
    click(app, target);
}

pub fn resize(app: &mut PortfolioApp, width: f32, height: f32) {
    app.dispatch(Event::Window(WindowEvent::Resized { width, height }));
}

pub fn by_id(app: &PortfolioApp, id: &str) -> NodeId {
    app.document()
        .element_by_id(id)
        .unwrap_or_else(|| panic!("no #{}", id))
}

pub fn style<'a>(app: &'a PortfolioApp, node: NodeId, property: &str) -> Option<&'a str> {
    app.document().style(node, property)
}

/// `href` of every active nav link
pub fn active_links(app: &PortfolioApp) -> Vec<String> {
    let doc = app.document();
    doc.query_selector_all(".nav-link.active")
        .into_iter()
        .filter_map(|link| doc.attr(link, "href"))
        .collect()
}
