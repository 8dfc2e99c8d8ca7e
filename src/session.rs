use std::collections::HashMap;

use log::{debug, info, warn};
use serde::Serialize;
use url::Url;

use crate::{
    embed,
    router::{RouteMatch, Router, SubpageRequest},
};

/// Identifies one navigation. Async work started under an older ticket is
/// dropped when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ticket(u64);

impl Ticket {
    fn next(self) -> Self {
        Ticket(self.0 + 1)
    }
}

/// Per-navigation state: `Idle -> Resolving -> Rendered | NotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Idle,
    /// Transient: `navigate` enters and leaves it within one call, so callers
    /// only ever see `Idle`, `Rendered` or `NotFound`.
    Resolving,
    Rendered,
    NotFound,
}

/// A freshly instantiated template plus the adjustments made to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub template: String,
    pub route: String,
    pub root: bool,
    pub header_hidden: bool,
    /// Replaces the template's own `.page-content` body when set.
    pub content: Option<String>,
    pub scripts: Vec<Url>,
}

impl View {
    pub fn new(template: &str, route: &str, root: bool) -> Self {
        Self {
            template: template.to_string(),
            route: route.to_string(),
            root,
            header_hidden: false,
            content: None,
            scripts: vec![],
        }
    }
}

/// The single content container the router swaps pages into.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Container {
    #[default]
    Empty,
    NotFound,
    Page(View),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    pub ticket: Ticket,
    pub src: Url,
}

/// Loads external scripts on behalf of the session. Completion is reported
/// back through [`Session::settle`] with the request's ticket.
pub trait ScriptLoader {
    fn load(&mut self, request: ScriptRequest);
}

/// Holds requests until the host drains and settles them.
#[derive(Debug, Default)]
pub struct QueuedLoader {
    requests: Vec<ScriptRequest>,
}

impl QueuedLoader {
    pub fn drain(&mut self) -> Vec<ScriptRequest> {
        std::mem::take(&mut self.requests)
    }
}

impl ScriptLoader for QueuedLoader {
    fn load(&mut self, request: ScriptRequest) {
        self.requests.push(request);
    }
}

/// Callback run against the view after its script has loaded.
pub type Initializer = Box<dyn Fn(&mut View)>;

struct Pending {
    ticket: Ticket,
    src: Url,
    initializer: Option<String>,
}

/// Navigation state for one page: owns the content container and threads
/// each fragment through the router.
pub struct Session<'r, L> {
    router: &'r Router,
    loader: L,
    initializers: HashMap<String, Initializer>,
    container: Container,
    state: NavState,
    current: Ticket,
    pending: Option<Pending>,
}

impl<'r, L: ScriptLoader> Session<'r, L> {
    pub fn new(router: &'r Router, loader: L) -> Self {
        Self {
            router,
            loader,
            initializers: HashMap::new(),
            container: Container::Empty,
            state: NavState::Idle,
            current: Ticket::default(),
            pending: None,
        }
    }

    pub fn with_initializer(mut self, name: &str, initializer: Initializer) -> Self {
        self.initializers.insert(name.to_string(), initializer);
        self
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn current(&self) -> Ticket {
        self.current
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    /// Handles one navigation event. The previous page is discarded and any
    /// script still loading for it will be ignored when it settles.
    pub fn navigate(&mut self, fragment: &str) -> Ticket {
        self.current = self.current.next();
        self.pending = None;
        self.state = NavState::Resolving;
        self.container = Container::Empty;

        match self.router.resolve(fragment) {
            RouteMatch::NotFound => {
                info!("nothing to show for '{fragment}'");
                self.container = Container::NotFound;
                self.state = NavState::NotFound;
            }
            RouteMatch::Found(resolved) => {
                let mut view = View::new(&resolved.template, &resolved.key, resolved.is_root);

                if let Some(request) = &resolved.subpage {
                    self.render_subpage(&mut view, request);
                }

                self.container = Container::Page(view);
                self.state = NavState::Rendered;
            }
        }

        self.current
    }

    fn render_subpage(&mut self, view: &mut View, request: &SubpageRequest) {
        view.header_hidden = true;

        let entry = self
            .router
            .section(&request.section)
            .and_then(|section| section.get(&request.slug));

        let Some(entry) = entry else {
            debug!("no sub-page '{}' in {}", request.slug, request.section);
            view.content = Some(embed::subpage_not_found(&request.slug));
            return;
        };

        if let Some(src) = embed::render(view, entry) {
            debug!("loading {src} for {:?}", self.current);
            self.pending = Some(Pending {
                ticket: self.current,
                src: src.clone(),
                initializer: entry.initializer.clone(),
            });
            self.loader.load(ScriptRequest {
                ticket: self.current,
                src,
            });
        }
    }

    /// Reports the outcome of a script load. Returns false when the
    /// completion was stale and nothing changed.
    pub fn settle(&mut self, ticket: Ticket, outcome: anyhow::Result<()>) -> bool {
        let pending = match self.pending.take() {
            Some(pending) if pending.ticket == ticket => pending,
            other => {
                self.pending = other;
                debug!("dropping stale script completion for {ticket:?}");
                return false;
            }
        };

        let Container::Page(view) = &mut self.container else {
            return false;
        };

        match outcome {
            Ok(()) => {
                let Some(name) = pending.initializer else {
                    return true;
                };
                match self.initializers.get(&name) {
                    Some(initializer) => initializer(view),
                    None => warn!("{} loaded but no initializer named '{name}'", pending.src),
                }
            }
            Err(error) => {
                warn!("failed to load {}: {error}", pending.src);
                view.scripts.retain(|src| src != &pending.src);
                view.content = Some(embed::load_error(&pending.src, &error));
            }
        }

        true
    }
}
