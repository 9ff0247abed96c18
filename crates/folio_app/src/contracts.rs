//! Markup contracts
//!
//! The selectors each component looks for. A missing contract only makes
//! its component inert, so this is a diagnostic, not a validation step.

use folio_core::Document;
use serde::Serialize;

/// A selector a component depends on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarkupContract {
    pub component: &'static str,
    pub selector: &'static str,
    /// Without it the component does nothing at all
    pub essential: bool,
}

pub const CONTRACTS: &[MarkupContract] = &[
    MarkupContract { component: "loader", selector: "#pageLoader", essential: false },
    MarkupContract { component: "loader", selector: "#loadingBar", essential: false },
    MarkupContract { component: "reveal", selector: ".about-content, .portfolio-item, .skill-item, .contact-content, #skills", essential: false },
    MarkupContract { component: "reveal", selector: ".skills-grid .stagger-item", essential: false },
    MarkupContract { component: "reveal", selector: "section", essential: false },
    MarkupContract { component: "scroll", selector: ".navbar", essential: false },
    MarkupContract { component: "scroll", selector: "#back-to-top", essential: false },
    MarkupContract { component: "scroll", selector: "section[id]", essential: true },
    MarkupContract { component: "scroll", selector: ".nav-link", essential: true },
    MarkupContract { component: "typing", selector: "#typingText", essential: true },
    MarkupContract { component: "skills", selector: ".skill-progress", essential: true },
    MarkupContract { component: "background", selector: ".animated-bg", essential: false },
    MarkupContract { component: "background", selector: "section[class]", essential: false },
    MarkupContract { component: "nav", selector: "#nav-toggle", essential: true },
    MarkupContract { component: "nav", selector: "#nav-menu", essential: true },
    MarkupContract { component: "form", selector: "#contact-form", essential: true },
    MarkupContract { component: "form", selector: "#contact-form .btn-submit", essential: false },
    MarkupContract { component: "filter", selector: ".filter-btn", essential: true },
    MarkupContract { component: "filter", selector: ".portfolio-item", essential: false },
    MarkupContract { component: "floating", selector: ".floating-item", essential: true },
    MarkupContract { component: "buttons", selector: ".btn", essential: true },
];

/// How well a document satisfies one contract
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContractReport {
    pub component: &'static str,
    pub selector: &'static str,
    pub essential: bool,
    pub matches: usize,
}

impl ContractReport {
    pub fn is_satisfied(&self) -> bool {
        self.matches > 0
    }
}

/// Count the matches of every contract in `doc`
pub fn check_markup(doc: &Document) -> Vec<ContractReport> {
    CONTRACTS
        .iter()
        .map(|contract| ContractReport {
            component: contract.component,
            selector: contract.selector,
            essential: contract.essential,
            matches: doc.query_selector_all(contract.selector).len(),
        })
        .collect()
}

/// Components that will stay inert on this document
pub fn inert_components(reports: &[ContractReport]) -> Vec<&'static str> {
    let mut inert: Vec<&'static str> = reports
        .iter()
        .filter(|report| report.essential && !report.is_satisfied())
        .map(|report| report.component)
        .collect();
    inert.dedup();
    inert
}
