//! Session scripts
//!
//! A session is a TOML list of timestamped steps replayed against a page:
//!
//! ```toml
//! settle = 3000
//!
//! [[step]]
//! at = 0
//! event = "load"
//!
//! [[step]]
//! at = 2500
//! event = "click"
//! target = ".nav-link[href=\"#about\"]"
//! ```
//!
//! Targets are selectors resolved against the page before replay starts.
//! `DOMContentLoaded` is implied at time 0 unless the script sends it.

use anyhow::{bail, Context, Result};
use folio_core::{Document, Millis, NodeId};
use folio_platform::{
    ControlFlow, Event, EventLoop, FieldEvent, InputEvent, LifecycleEvent, PlatformError,
    PointerEvent, WindowEvent,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// =============================================================================
// Script format
// =============================================================================

/// A scripted browsing session
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Session {
    /// Time to keep the clock running after the last step, ms
    #[serde(default = "default_settle")]
    pub settle: Millis,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

fn default_settle() -> Millis {
    3000
}

impl Default for Session {
    /// Load the page and let it settle
    fn default() -> Self {
        Self {
            settle: default_settle(),
            steps: vec![Step {
                at: 0,
                action: Action::Load,
            }],
        }
    }
}

/// One timestamped action
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Step {
    /// Page time of the step, ms
    pub at: Millis,
    #[serde(flatten)]
    pub action: Action,
}

/// What the visitor does
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Action {
    DomContentLoaded,
    Load,
    Unload,
    Scroll { y: f32 },
    Resize { width: f32, height: f32 },
    Click { target: String },
    PointerMove { x: f32, y: f32, target: String },
    PointerEnter { target: String },
    PointerLeave { target: String },
    Input { target: String, value: String },
    Blur { target: String },
    Submit { target: String },
}

impl Session {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse session script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("In {}", path.display()))
    }

    /// Turn the steps into page events for `doc`
    pub fn resolve(&self, doc: &Document) -> Result<ScriptedEventLoop> {
        let mut events = Vec::with_capacity(self.steps.len() + 1);
        let opens_itself = self
            .steps
            .first()
            .is_some_and(|step| step.action == Action::DomContentLoaded);
        if !opens_itself {
            events.push((0, Event::Lifecycle(LifecycleEvent::DomContentLoaded)));
        }

        let mut last = 0;
        for (index, step) in self.steps.iter().enumerate() {
            if step.at < last {
                bail!(
                    "Step {} at {} ms comes before the previous step at {} ms",
                    index + 1,
                    step.at,
                    last
                );
            }
            last = step.at;
            let event = step
                .action
                .to_event(doc)
                .with_context(|| format!("Step {} ({} ms)", index + 1, step.at))?;
            events.push((step.at, event));
        }

        Ok(ScriptedEventLoop { events })
    }

    /// Time of the last step
    pub fn end(&self) -> Millis {
        self.steps.last().map_or(0, |step| step.at)
    }
}

fn target(doc: &Document, selector: &str) -> Result<NodeId> {
    match doc.query_selector(selector) {
        Some(node) => Ok(node),
        None => bail!("No element matches '{}'", selector),
    }
}

impl Action {
    fn to_event(&self, doc: &Document) -> Result<Event> {
        let event = match self {
            Action::DomContentLoaded => Event::Lifecycle(LifecycleEvent::DomContentLoaded),
            Action::Load => Event::Lifecycle(LifecycleEvent::Load),
            Action::Unload => Event::Lifecycle(LifecycleEvent::Unload),
            Action::Scroll { y } => Event::Input(InputEvent::Scroll { y: *y }),
            Action::Resize { width, height } => Event::Window(WindowEvent::Resized {
                width: *width,
                height: *height,
            }),
            Action::Click { target: selector } => Event::Input(InputEvent::Click {
                target: target(doc, selector)?,
            }),
            Action::PointerMove {
                x,
                y,
                target: selector,
            } => Event::Input(InputEvent::Pointer(PointerEvent::Moved {
                x: *x,
                y: *y,
                target: target(doc, selector)?,
            })),
            Action::PointerEnter { target: selector } => {
                Event::Input(InputEvent::Pointer(PointerEvent::Entered {
                    target: target(doc, selector)?,
                }))
            }
            Action::PointerLeave { target: selector } => {
                Event::Input(InputEvent::Pointer(PointerEvent::Left {
                    target: target(doc, selector)?,
                }))
            }
            Action::Input {
                target: selector,
                value,
            } => Event::Input(InputEvent::Field(FieldEvent::Input {
                target: target(doc, selector)?,
                value: value.clone(),
            })),
            Action::Blur { target: selector } => Event::Input(InputEvent::Field(FieldEvent::Blur {
                target: target(doc, selector)?,
            })),
            Action::Submit { target: selector } => Event::Input(InputEvent::Submit {
                form: target(doc, selector)?,
            }),
        };
        Ok(event)
    }
}

// =============================================================================
// Replay
// =============================================================================

/// Replays resolved events in order
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedEventLoop {
    events: Vec<(Millis, Event)>,
}

impl ScriptedEventLoop {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventLoop for ScriptedEventLoop {
    fn run<F>(self, mut handler: F) -> std::result::Result<(), PlatformError>
    where
        F: FnMut(Event, Millis) -> ControlFlow,
    {
        for (at, event) in self.events {
            if handler(event, at) == ControlFlow::Exit {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::Element;

    fn doc() -> Document {
        let mut doc = Document::new();
        let body = doc.body();
        let nav = doc.append(body, Element::new("nav").with_class("navbar"));
        doc.append(
            nav,
            Element::new("a")
                .with_class("nav-link")
                .with_attr("href", "#about"),
        );
        doc.append(body, Element::new("form").with_id("contact-form"));
        doc
    }

    #[test]
    fn test_parse_steps() {
        let session = Session::from_toml_str(
            r##"
            settle = 500

            [[step]]
            at = 0
            event = "load"

            [[step]]
            at = 100
            event = "scroll"
            y = 450

            [[step]]
            at = 200
            event = "click"
            target = ".nav-link[href=\"#about\"]"
            "##,
        )
        .unwrap();

        assert_eq!(session.settle, 500);
        assert_eq!(session.end(), 200);
        assert_eq!(session.steps[1].action, Action::Scroll { y: 450.0 });
        assert_eq!(
            session.steps[2].action,
            Action::Click {
                target: ".nav-link[href=\"#about\"]".into()
            }
        );
    }

    #[test]
    fn test_settle_defaults() {
        let session = Session::from_toml_str("").unwrap();
        assert_eq!(session.settle, 3000);
        assert!(session.steps.is_empty());
    }

    #[test]
    fn test_resolve_implies_dom_content_loaded() {
        let doc = doc();
        let events = Session::default().resolve(&doc).unwrap();
        assert_eq!(
            events.events,
            vec![
                (0, Event::Lifecycle(LifecycleEvent::DomContentLoaded)),
                (0, Event::Lifecycle(LifecycleEvent::Load)),
            ]
        );

        let explicit = Session {
            settle: 0,
            steps: vec![Step {
                at: 0,
                action: Action::DomContentLoaded,
            }],
        };
        assert_eq!(explicit.resolve(&doc).unwrap().len(), 1);
    }

    #[test]
    fn test_resolve_targets() {
        let doc = doc();
        let session = Session {
            settle: 0,
            steps: vec![Step {
                at: 10,
                action: Action::Submit {
                    target: "#contact-form".into(),
                },
            }],
        };
        let events = session.resolve(&doc).unwrap();
        let form = doc.element_by_id("contact-form").unwrap();
        assert_eq!(events.events[1], (10, Event::Input(InputEvent::Submit { form })));
    }

    #[test]
    fn test_unknown_target_is_reported() {
        let session = Session {
            settle: 0,
            steps: vec![Step {
                at: 0,
                action: Action::Click {
                    target: "#missing".into(),
                },
            }],
        };
        let err = session.resolve(&doc()).unwrap_err();
        let chain = format!("{:#}", err);
        assert!(chain.contains("Step 1"), "{}", chain);
        assert!(chain.contains("#missing"), "{}", chain);
    }

    #[test]
    fn test_steps_must_not_go_back_in_time() {
        let session = Session {
            settle: 0,
            steps: vec![
                Step {
                    at: 100,
                    action: Action::Load,
                },
                Step {
                    at: 50,
                    action: Action::Scroll { y: 10.0 },
                },
            ],
        };
        assert!(session.resolve(&doc()).is_err());
    }

    #[test]
    fn test_replay_stops_on_exit() {
        let events = Session {
            settle: 0,
            steps: vec![
                Step {
                    at: 0,
                    action: Action::Unload,
                },
                Step {
                    at: 10,
                    action: Action::Load,
                },
            ],
        }
        .resolve(&doc())
        .unwrap();

        let mut seen = Vec::new();
        events
            .run(|event, at| {
                let exit = matches!(event, Event::Lifecycle(LifecycleEvent::Unload));
                seen.push(at);
                if exit {
                    ControlFlow::Exit
                } else {
                    ControlFlow::Continue
                }
            })
            .unwrap();
        assert_eq!(seen, vec![0, 0]);
    }
}
