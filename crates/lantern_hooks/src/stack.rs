//! Multi-receiver composition.
//!
//! A [`HookStack`] owns any number of `(receiver, dispatcher)` entries of
//! different concrete types and fans each emitted payload out to every
//! entry that handles its tag — in the order the entries were declared.
//! That ordering is a correctness property user code may rely on (a stats
//! receiver declared after a game-logic receiver always observes state the
//! game-logic receiver already mutated).

use crate::dispatcher::Dispatcher;
use crate::hook::{Hook, HookTag};

/// One type-erased receiver/dispatcher pair.
trait StackEntry {
    fn emit(&mut self, hook: &Hook);
    fn has_handler(&self, tag: HookTag) -> bool;
}

struct Bound<R> {
    receiver: R,
    dispatcher: Dispatcher<R>,
}

impl<R> StackEntry for Bound<R> {
    fn emit(&mut self, hook: &Hook) {
        self.dispatcher.emit(&mut self.receiver, hook);
    }

    fn has_handler(&self, tag: HookTag) -> bool {
        self.dispatcher.has_handler(tag)
    }
}

/// An ordered collection of independent hook receivers.
///
/// Entries are owned by the stack; receivers that need to share state with
/// the outside hold it behind `Rc<RefCell<…>>` (owned context objects, not
/// globals). Entries must be `'static` so the stack cannot outlive data a
/// receiver references.
#[derive(Default)]
pub struct HookStack {
    entries: Vec<Box<dyn StackEntry>>,
}

impl HookStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a receiver with its dispatcher (builder form).
    #[must_use]
    pub fn with<R: 'static>(mut self, receiver: R, dispatcher: Dispatcher<R>) -> Self {
        self.push(receiver, dispatcher);
        self
    }

    /// Append a receiver with its dispatcher.
    ///
    /// Emission order follows push order.
    pub fn push<R: 'static>(&mut self, receiver: R, dispatcher: Dispatcher<R>) {
        self.entries.push(Box::new(Bound {
            receiver,
            dispatcher,
        }));
    }

    /// Fan one payload out to every entry handling its tag, in declaration
    /// order. Entries without a handler are skipped; none short-circuits
    /// another.
    pub fn emit(&mut self, hook: &Hook) {
        for entry in &mut self.entries {
            entry.emit(hook);
        }
    }

    /// Returns `true` if any entry handles `tag`.
    #[must_use]
    pub fn has_handler(&self, tag: HookTag) -> bool {
        self.entries.iter().any(|entry| entry.has_handler(tag))
    }

    /// Number of receivers in the stack.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the stack holds no receivers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::bindings::HookBindings;
    use crate::hook::SceneInfo;

    /// Shared call log the test receivers append to.
    type Log = Rc<RefCell<Vec<&'static str>>>;

    struct GameLogic {
        log: Log,
    }

    struct Stats {
        log: Log,
    }

    fn stack_with_log(log: &Log) -> HookStack {
        HookStack::new()
            .with(
                GameLogic { log: log.clone() },
                HookBindings::new()
                    .on_scene_load(|r: &mut GameLogic, _| r.log.borrow_mut().push("logic"))
                    .build(),
            )
            .with(
                Stats { log: log.clone() },
                HookBindings::new()
                    .on_scene_load(|r: &mut Stats, _| r.log.borrow_mut().push("stats"))
                    .on_game_deinit(|r: &mut Stats| r.log.borrow_mut().push("stats_deinit"))
                    .build(),
            )
    }

    #[test]
    fn test_emit_runs_receivers_in_declaration_order() {
        let log: Log = Rc::default();
        let mut stack = stack_with_log(&log);

        stack.emit(&Hook::SceneLoad(SceneInfo::new("intro")));
        assert_eq!(*log.borrow(), vec!["logic", "stats"]);

        // The order holds on every emission, not just the first.
        stack.emit(&Hook::SceneLoad(SceneInfo::new("intro")));
        assert_eq!(*log.borrow(), vec!["logic", "stats", "logic", "stats"]);
    }

    #[test]
    fn test_emit_skips_receivers_without_handler() {
        let log: Log = Rc::default();
        let mut stack = stack_with_log(&log);

        stack.emit(&Hook::GameDeinit);
        assert_eq!(*log.borrow(), vec!["stats_deinit"]);
    }

    #[test]
    fn test_has_handler_is_or_over_entries() {
        let log: Log = Rc::default();
        let stack = stack_with_log(&log);

        assert!(stack.has_handler(HookTag::SceneLoad));
        assert!(stack.has_handler(HookTag::GameDeinit));
        assert!(!stack.has_handler(HookTag::FrameStart));
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_empty_stack_emit_is_noop() {
        let mut stack = HookStack::new();
        assert!(stack.is_empty());
        stack.emit(&Hook::GameInit);
    }
}
