//! Plugin, renderer and un-escaper registration.

use crate::context::Context;
use crate::node::Node;
use crate::writer::Writer;
use crate::Result;

/// Ordering of renderers and un-escapers. Lower runs first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub u32);

impl Priority {
    /// Runs before the standard rules
    pub const EARLY: Priority = Priority(100);
    /// Default priority for general purpose rules
    pub const STANDARD: Priority = Priority(500);
    /// Runs after everything else
    pub const LATE: Priority = Priority(1000);
}

impl Default for Priority {
    fn default() -> Self {
        Priority::STANDARD
    }
}

/// Outcome of offering a node to a renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// The node was rendered, stop dispatching
    Success,
    /// Not a node this renderer handles, offer it to the next one
    TryNext,
}

/// Type alias for node renderers
pub type RenderFn =
    Box<dyn Fn(&mut Context<'_>, &mut dyn Writer, &Node) -> Result<RenderStatus> + Send + Sync>;

/// Type alias for un-escapers.
///
/// Called with the raw text and the byte index of a character the escaper
/// marked. Returning `Some(len)` leaves `len` bytes from that index
/// unescaped.
pub type UnEscapeFn = Box<dyn Fn(&[u8], usize) -> Option<usize> + Send + Sync>;

struct Prioritized<T> {
    priority: Priority,
    value: T,
}

/// Collects everything plugins register with the converter
#[derive(Default)]
pub struct Register {
    renderers: Vec<Prioritized<RenderFn>>,
    unescapers: Vec<Prioritized<UnEscapeFn>>,
}

impl Register {
    /// Create an empty register
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node renderer
    pub fn renderer<F>(&mut self, renderer: F, priority: Priority)
    where
        F: Fn(&mut Context<'_>, &mut dyn Writer, &Node) -> Result<RenderStatus>
            + Send
            + Sync
            + 'static,
    {
        insert_sorted(
            &mut self.renderers,
            Prioritized {
                priority,
                value: Box::new(renderer),
            },
        );
    }

    /// Add an un-escaper
    pub fn unescaper<F>(&mut self, unescaper: F, priority: Priority)
    where
        F: Fn(&[u8], usize) -> Option<usize> + Send + Sync + 'static,
    {
        insert_sorted(
            &mut self.unescapers,
            Prioritized {
                priority,
                value: Box::new(unescaper),
            },
        );
    }

    /// Renderers in priority order
    pub fn renderers(&self) -> impl Iterator<Item = &RenderFn> {
        self.renderers.iter().map(|r| &r.value)
    }

    /// Un-escapers in priority order
    pub fn unescapers(&self) -> impl Iterator<Item = &UnEscapeFn> {
        self.unescapers.iter().map(|u| &u.value)
    }

    /// Number of registered renderers
    pub fn renderer_count(&self) -> usize {
        self.renderers.len()
    }
}

// Stable: equal priorities keep registration order.
fn insert_sorted<T>(items: &mut Vec<Prioritized<T>>, item: Prioritized<T>) {
    let index = items.partition_point(|existing| existing.priority <= item.priority);
    items.insert(index, item);
}

/// A bundle of renderers and un-escapers.
///
/// Plugins are registered with the converter by name; registering a second
/// plugin with the same name replaces the first.
pub trait Plugin: Send + Sync {
    /// Unique plugin name
    fn name(&self) -> &str;

    /// Register renderers and un-escapers
    fn init(&self, register: &mut Register) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagging(tag: &'static str) -> impl Fn(&[u8], usize) -> Option<usize> + Send + Sync {
        move |_, _| Some(tag.len())
    }

    #[test]
    fn test_priority_order() {
        assert!(Priority::EARLY < Priority::STANDARD);
        assert!(Priority::STANDARD < Priority::LATE);
        assert_eq!(Priority::default(), Priority::STANDARD);
    }

    #[test]
    fn test_unescapers_sorted_and_stable() {
        let mut register = Register::new();
        register.unescaper(tagging("llll"), Priority::LATE);
        register.unescaper(tagging("ss"), Priority::STANDARD);
        register.unescaper(tagging("e"), Priority::EARLY);
        register.unescaper(tagging("sss"), Priority::STANDARD);

        let lengths: Vec<_> = register.unescapers().map(|u| u(b"", 0)).collect();
        assert_eq!(lengths, vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_renderer_count() {
        let mut register = Register::new();
        register.renderer(|_, _, _| Ok(RenderStatus::TryNext), Priority::LATE);
        register.renderer(|_, _, _| Ok(RenderStatus::Success), Priority::EARLY);
        assert_eq!(register.renderer_count(), 2);
    }
}
