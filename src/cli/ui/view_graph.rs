//! Focus-routing state machine over a graph of views.
//!
//! Views live in an arena and refer to each other by [`ViewId`], so a child
//! view can route back to its parent without an ownership cycle. Exactly one
//! view has focus. Each frame draws the focused view, reads one key and
//! applies it:
//!
//! 1. a key bound as a transition moves focus (the outgoing view's region is
//!    cleared first);
//! 2. otherwise a key bound as an action runs it, and `false` stops the loop;
//! 3. any other key is ignored.
//!
//! A key bound both ways is a transition.

use std::{collections::HashMap, io};

use super::navigation::NavKey;
use super::surface::{Region, Surface};

pub type DrawFn<C> = Box<dyn Fn(&mut C, Region) -> io::Result<()>>;
pub type ActionFn<C> = Box<dyn FnMut(&mut C) -> bool>;

/// Access to the surface owned by the context a view graph runs against.
pub trait HasSurface {
    fn surface(&mut self) -> &mut dyn Surface;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(usize);

/// What applying one key did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Moved { from: ViewId, to: ViewId },
    Handled,
    Stop,
    Ignored,
}

pub struct ViewNode<C> {
    title: Option<String>,
    region: Region,
    draw: Option<DrawFn<C>>,
    transitions: HashMap<NavKey, ViewId>,
    actions: HashMap<NavKey, ActionFn<C>>,
}

impl<C> ViewNode<C> {
    pub fn new(region: Region) -> Self {
        Self {
            title: None,
            region,
            draw: None,
            transitions: HashMap::new(),
            actions: HashMap::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_draw<F>(mut self, draw: F) -> Self
    where
        F: Fn(&mut C, Region) -> io::Result<()> + 'static,
    {
        self.draw = Some(Box::new(draw));
        self
    }

    /// Binds `key` to a local action; returning `false` ends the loop.
    pub fn on_key<F>(mut self, key: NavKey, action: F) -> Self
    where
        F: FnMut(&mut C) -> bool + 'static,
    {
        self.actions.insert(key, Box::new(action));
        self
    }

    pub fn route(mut self, key: NavKey, target: ViewId) -> Self {
        self.transitions.insert(key, target);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn region(&self) -> Region {
        self.region
    }
}

pub struct ViewGraph<C> {
    nodes: Vec<ViewNode<C>>,
    focus: ViewId,
}

impl<C: HasSurface> ViewGraph<C> {
    /// Creates a graph whose root, and initial focus, is `root`.
    pub fn new(root: ViewNode<C>) -> Self {
        Self {
            nodes: vec![root],
            focus: ViewId(0),
        }
    }

    pub fn root(&self) -> ViewId {
        ViewId(0)
    }

    pub fn focus(&self) -> ViewId {
        self.focus
    }

    pub fn add(&mut self, node: ViewNode<C>) -> ViewId {
        self.nodes.push(node);
        ViewId(self.nodes.len() - 1)
    }

    pub fn node(&self, id: ViewId) -> &ViewNode<C> {
        &self.nodes[id.0]
    }

    /// Adds a transition after both views exist, which is how cycles are closed.
    pub fn connect(&mut self, from: ViewId, key: NavKey, to: ViewId) {
        self.nodes[from.0].transitions.insert(key, to);
    }

    /// Draws the focused view: clear, custom content, then frame and title.
    pub fn render(&mut self, context: &mut C) -> io::Result<()> {
        let node = &self.nodes[self.focus.0];
        context.surface().clear(node.region)?;
        if let Some(draw) = &node.draw {
            draw(context, node.region)?;
        }
        let surface = context.surface();
        surface.draw_frame(node.region, node.title.as_deref())?;
        surface.flush()
    }

    /// Applies one key to the focused view.
    pub fn apply(&mut self, context: &mut C, key: NavKey) -> io::Result<Transition> {
        let from = self.focus;
        let node = &mut self.nodes[from.0];

        if let Some(&to) = node.transitions.get(&key) {
            context.surface().clear(node.region)?;
            self.focus = to;
            tracing::debug!(from = from.0, to = to.0, %key, "focus moved");
            return Ok(Transition::Moved { from, to });
        }

        if let Some(action) = node.actions.get_mut(&key) {
            return Ok(if action(context) {
                Transition::Handled
            } else {
                Transition::Stop
            });
        }

        Ok(Transition::Ignored)
    }

    /// Runs frames until an action returns `false`.
    pub fn run(&mut self, context: &mut C) -> io::Result<()> {
        loop {
            self.render(context)?;
            let key = context.surface().read_key()?;
            if self.apply(context, key)? == Transition::Stop {
                return Ok(());
            }
        }
    }
}
