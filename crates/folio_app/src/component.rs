//! The component contract
//!
//! A component is one self-contained effect on the page. It receives host
//! events, its own scheduled wake-ups and bus messages, and acts on the page
//! only through the [`PageContext`] it is handed.

use folio_platform::Event;

use crate::context::PageContext;
use crate::messages::{AppMessage, Wake};

/// An independently attachable page effect
///
/// Components never reference each other. A component whose markup is
/// missing stays inert rather than failing the page.
pub trait Component {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Look up markup and register initial work
    fn attach(&mut self, ctx: &mut PageContext<'_>);

    /// Release everything created in `attach`
    ///
    /// Pending tasks owned by the component are cancelled by the page after
    /// this returns; implementations only undo document side effects.
    fn detach(&mut self, _ctx: &mut PageContext<'_>) {}

    /// React to a host event
    fn handle_event(&mut self, _event: &Event, _ctx: &mut PageContext<'_>) {}

    /// Run a task this component scheduled
    fn on_wake(&mut self, _wake: Wake, _ctx: &mut PageContext<'_>) {}

    /// React to a bus message
    fn on_message(&mut self, _message: &AppMessage, _ctx: &mut PageContext<'_>) {}
}
