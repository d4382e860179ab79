//! Node tree that tools are mounted into
//!
//! A `Surface` is an arena of nodes. Each node carries its own markup, an
//! optional class, an ordered list of children and the listeners subscribed
//! to it. Events dispatched at a node are delivered to that node's listeners
//! first and then to every ancestor's, mirroring bubbling in a browser DOM.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::events::ToolEvent;
use crate::markup;

/// Handle to a node on a [`Surface`].
///
/// Slots are reused once a node is removed; the generation tells a stale
/// handle apart from the node that now lives in its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Slot index, unique among live nodes.
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.generation {
            0 => write!(f, "#{}", self.index),
            generation => write!(f, "#{}.{}", self.index, generation),
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.index as u64)
    }
}

/// Handle returned by [`Surface::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    node: NodeId,
    id: u64,
}

impl Subscription {
    /// Node the listener is attached to.
    pub fn node(&self) -> NodeId {
        self.node
    }
}

type Listener = Box<dyn FnMut(&ToolEvent, &Surface)>;

#[derive(Default)]
struct Node {
    parent: Option<NodeId>,
    class: Option<String>,
    markup: String,
    children: Vec<NodeId>,
    listeners: Vec<(u64, Listener)>,
}

#[derive(Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Arena of nodes with parent/child containment and event subscriptions.
#[derive(Default)]
pub struct Surface {
    slots: Vec<Slot>,
    free: Vec<usize>,
    next_subscription: u64,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached node. Attach it with [`Surface::append_child`] or
    /// use it as the root of its own tree.
    pub fn create_node(&mut self) -> NodeId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.node = Some(Node::default());
            return NodeId::new(index, slot.generation);
        }
        self.slots.push(Slot {
            generation: 0,
            node: Some(Node::default()),
        });
        NodeId::new(self.slots.len() - 1, 0)
    }

    /// Create a node and attach it under `parent`.
    pub fn create_child(&mut self, parent: NodeId) -> Result<NodeId> {
        self.node(parent)?;
        let child = self.create_node();
        self.append_child(parent, child)?;
        Ok(child)
    }

    /// Whether `node` is alive on this surface.
    pub fn contains(&self, node: NodeId) -> bool {
        self.node(node).is_ok()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).ok().and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Own markup of `node`, excluding its children.
    pub fn markup(&self, node: NodeId) -> Option<&str> {
        self.node(node).ok().map(|n| n.markup.as_str())
    }

    pub fn class(&self, node: NodeId) -> Option<&str> {
        self.node(node).ok().and_then(|n| n.class.as_deref())
    }

    pub fn set_markup(&mut self, node: NodeId, markup: impl Into<String>) -> Result<()> {
        self.node_mut(node)?.markup = markup.into();
        Ok(())
    }

    pub fn set_class(&mut self, node: NodeId, class: impl Into<String>) -> Result<()> {
        self.node_mut(node)?.class = Some(class.into());
        Ok(())
    }

    /// Attach a detached `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::AlreadyAttached { node: child });
        }
        self.node(parent)?;
        let child_node = self.node_mut(child)?;
        if child_node.parent.is_some() {
            return Err(Error::AlreadyAttached { node: child });
        }
        child_node.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Remove the markup and every descendant of `node`.
    ///
    /// Listeners on `node` itself survive; listeners on removed descendants
    /// are dropped with them.
    pub fn clear(&mut self, node: NodeId) -> Result<()> {
        let target = self.node_mut(node)?;
        target.markup.clear();
        let mut pending = std::mem::take(&mut target.children);
        while let Some(child) = pending.pop() {
            if let Some(removed) = self.release(child) {
                pending.extend(removed.children);
            }
        }
        Ok(())
    }

    /// Free the slot of `node` for reuse and hand back its contents.
    fn release(&mut self, node: NodeId) -> Option<Node> {
        let slot = self
            .slots
            .get_mut(node.index)
            .filter(|slot| slot.generation == node.generation)?;
        let removed = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(node.index);
        Some(removed)
    }

    /// Replace everything inside `node` with `markup`.
    pub fn replace_content(&mut self, node: NodeId, markup: impl Into<String>) -> Result<()> {
        self.clear(node)?;
        self.set_markup(node, markup)
    }

    /// Render the inner markup of `node`: its own markup followed by each
    /// child wrapped in a `div`.
    pub fn render(&self, node: NodeId) -> Option<String> {
        let mut out = String::new();
        self.render_into(node, &mut out).ok()?;
        Some(out)
    }

    fn render_into(&self, node: NodeId, out: &mut String) -> Result<()> {
        let n = self.node(node)?;
        out.push_str(&n.markup);
        for &child in &n.children {
            let open = match self.class(child) {
                Some(class) => format!(r#"<div class="{}">"#, markup::escape(class)),
                None => "<div>".to_string(),
            };
            out.push_str(&open);
            self.render_into(child, out)?;
            out.push_str("</div>");
        }
        Ok(())
    }

    /// Attach a listener to `node`. It receives every event dispatched at
    /// `node` or any of its descendants.
    pub fn subscribe<F>(&mut self, node: NodeId, listener: F) -> Result<Subscription>
    where
        F: FnMut(&ToolEvent, &Surface) + 'static,
    {
        let id = self.next_subscription;
        self.node_mut(node)?.listeners.push((id, Box::new(listener)));
        self.next_subscription += 1;
        Ok(Subscription { node, id })
    }

    /// Detach a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let Ok(node) = self.node_mut(subscription.node) else {
            return false;
        };
        let before = node.listeners.len();
        node.listeners.retain(|(id, _)| *id != subscription.id);
        node.listeners.len() != before
    }

    /// Deliver `event` to the listeners of `target` and then of each ancestor,
    /// innermost first. Returns how many listeners ran.
    pub fn dispatch(&mut self, target: NodeId, event: &ToolEvent) -> Result<usize> {
        self.node(target)?;
        let mut delivered = 0;
        let mut current = Some(target);
        while let Some(node) = current {
            let mut listeners = match self.node_mut(node) {
                Ok(n) => std::mem::take(&mut n.listeners),
                Err(_) => break,
            };
            for (_, listener) in listeners.iter_mut() {
                listener(event, self);
                delivered += 1;
            }
            if let Ok(n) = self.node_mut(node) {
                n.listeners = listeners;
            }
            current = self.parent(node);
        }
        Ok(delivered)
    }

    fn is_ancestor(&self, candidate: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(n) = current {
            if n == candidate {
                return true;
            }
            current = self.parent(n);
        }
        false
    }

    fn node(&self, node: NodeId) -> Result<&Node> {
        self.slots
            .get(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.node.as_ref())
            .ok_or(Error::UnknownNode { node })
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(node.index)
            .filter(|slot| slot.generation == node.generation)
            .and_then(|slot| slot.node.as_mut())
            .ok_or(Error::UnknownNode { node })
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("nodes", &(self.slots.len() - self.free.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn unloaded(id: &str) -> ToolEvent {
        ToolEvent::Unloaded {
            tool_id: id.to_string(),
        }
    }

    #[test]
    fn test_create_and_attach() {
        let mut surface = Surface::new();
        let root = surface.create_node();
        let child = surface.create_child(root).unwrap();

        assert_eq!(surface.parent(child), Some(root));
        assert_eq!(surface.children(root), &[child]);
        assert!(surface.parent(root).is_none());
    }

    #[test]
    fn test_append_rejects_attached_and_cycles() {
        let mut surface = Surface::new();
        let root = surface.create_node();
        let child = surface.create_child(root).unwrap();
        let other = surface.create_node();

        assert!(matches!(
            surface.append_child(other, child),
            Err(Error::AlreadyAttached { .. })
        ));
        assert!(matches!(
            surface.append_child(child, root),
            Err(Error::AlreadyAttached { .. })
        ));
        assert!(matches!(
            surface.append_child(root, root),
            Err(Error::AlreadyAttached { .. })
        ));
    }

    #[test]
    fn test_clear_removes_descendants() {
        let mut surface = Surface::new();
        let root = surface.create_node();
        let child = surface.create_child(root).unwrap();
        let grandchild = surface.create_child(child).unwrap();
        surface.set_markup(root, "<p>old</p>").unwrap();

        surface.clear(root).unwrap();

        assert!(surface.contains(root));
        assert!(!surface.contains(child));
        assert!(!surface.contains(grandchild));
        assert_eq!(surface.render(root).unwrap(), "");
    }

    #[test]
    fn test_render_nested() {
        let mut surface = Surface::new();
        let root = surface.create_node();
        surface.set_markup(root, "<h1>Tools</h1>").unwrap();
        let child = surface.create_child(root).unwrap();
        surface.set_class(child, "tool-content").unwrap();
        surface.set_markup(child, "<p>hi</p>").unwrap();

        assert_eq!(
            surface.render(root).unwrap(),
            r#"<h1>Tools</h1><div class="tool-content"><p>hi</p></div>"#
        );
    }

    #[test]
    fn test_dispatch_bubbles_innermost_first() {
        let mut surface = Surface::new();
        let root = surface.create_node();
        let container = surface.create_child(root).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for (node, label) in [(root, "root"), (container, "container")] {
            let seen = Rc::clone(&seen);
            surface
                .subscribe(node, move |event, _| {
                    seen.borrow_mut().push(format!("{label}:{}", event.tool_id()))
                })
                .unwrap();
        }

        let delivered = surface.dispatch(container, &unloaded("calc")).unwrap();

        assert_eq!(delivered, 2);
        assert_eq!(*seen.borrow(), vec!["container:calc", "root:calc"]);
    }

    #[test]
    fn test_dispatch_does_not_reach_descendants() {
        let mut surface = Surface::new();
        let root = surface.create_node();
        let child = surface.create_child(root).unwrap();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        surface
            .subscribe(child, move |_, _| *counter.borrow_mut() += 1)
            .unwrap();

        assert_eq!(surface.dispatch(root, &unloaded("x")).unwrap(), 0);
        assert_eq!(*hits.borrow(), 0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut surface = Surface::new();
        let root = surface.create_node();
        let sub = surface.subscribe(root, |_, _| {}).unwrap();

        assert!(surface.unsubscribe(sub));
        assert!(!surface.unsubscribe(sub));
        assert_eq!(surface.dispatch(root, &unloaded("x")).unwrap(), 0);
    }

    #[test]
    fn test_cleared_slots_are_reused() {
        let mut surface = Surface::new();
        let root = surface.create_node();

        for _ in 0..1000 {
            surface.create_child(root).unwrap();
            surface.clear(root).unwrap();
        }

        assert_eq!(surface.slots.len(), 2);
        assert_eq!(surface.children(root).len(), 0);
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut surface = Surface::new();
        let root = surface.create_node();
        let stale = surface.create_child(root).unwrap();
        surface.clear(root).unwrap();

        let fresh = surface.create_child(root).unwrap();
        surface.set_markup(fresh, "<p>fresh</p>").unwrap();

        assert_eq!(fresh.index(), stale.index());
        assert_ne!(fresh, stale);
        assert!(!surface.contains(stale));
        assert!(matches!(
            surface.set_markup(stale, "<p>stale</p>"),
            Err(Error::UnknownNode { .. })
        ));
        assert_eq!(surface.markup(fresh), Some("<p>fresh</p>"));
        assert_eq!(stale.to_string(), "#1");
        assert_eq!(fresh.to_string(), "#1.1");
    }

    #[test]
    fn test_unknown_node() {
        let mut surface = Surface::new();
        let ghost = NodeId::new(42, 0);

        assert!(!surface.contains(ghost));
        assert!(surface.render(ghost).is_none());
        assert!(matches!(
            surface.set_markup(ghost, "x"),
            Err(Error::UnknownNode { .. })
        ));
        assert!(surface.dispatch(ghost, &unloaded("x")).is_err());
    }
}
