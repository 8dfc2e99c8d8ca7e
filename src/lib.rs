//! A hash-routed single-page site. The [`router`] maps a URL fragment to a
//! template, sections dispatch sub-pages to the [`embed`] renderer, and a
//! [`session`] owns the content container across navigations.

pub mod config;
pub mod embed;
mod functions;
pub mod markdown;
pub mod page;
pub mod router;
pub mod session;
pub mod site;
pub mod subpage;
pub mod templates;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use router::{RouteMatch, Router};
pub use session::{Container, NavState, QueuedLoader, ScriptLoader, Session, Ticket, View};
pub use site::Site;
