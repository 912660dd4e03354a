//! Single-receiver event routing.
//!
//! A [`Dispatcher`] is the immutable result of building a
//! [`HookBindings`] table. It never owns the receiver: `emit` borrows it
//! for the duration of the call, runs the matching handler synchronously,
//! and returns. Tags with no handler are silently dropped — partial hook
//! coverage is the normal case.

use crate::bindings::{BoundHandler, HookBindings};
use crate::error::HookError;
use crate::hook::{Hook, HookTag};

/// Routes hook payloads to the handlers bound for a receiver type `R`.
#[derive(Debug)]
pub struct Dispatcher<R> {
    handlers: std::collections::BTreeMap<HookTag, BoundHandler<R>>,
}

impl<R> HookBindings<R> {
    /// Build a dispatcher. Tags without handlers are allowed (their events
    /// are dropped for this receiver).
    #[must_use]
    pub fn build(self) -> Dispatcher<R> {
        Dispatcher {
            handlers: self.handlers,
        }
    }

    /// Build a dispatcher that must cover every declared tag.
    ///
    /// # Errors
    ///
    /// Returns [`HookError::MissingHandler`] naming the first tag (in
    /// declaration order) that has no handler.
    pub fn build_exhaustive(self) -> Result<Dispatcher<R>, HookError> {
        for tag in HookTag::ALL {
            if !self.handlers.contains_key(&tag) {
                return Err(HookError::MissingHandler(tag));
            }
        }
        Ok(self.build())
    }
}

impl<R> Dispatcher<R> {
    /// Returns `true` if a handler is bound for `tag`.
    #[must_use]
    pub fn has_handler(&self, tag: HookTag) -> bool {
        self.handlers.contains_key(&tag)
    }

    /// Returns the bound tags in declaration order.
    pub fn handled_tags(&self) -> impl Iterator<Item = HookTag> + '_ {
        HookTag::ALL
            .into_iter()
            .filter(|tag| self.handlers.contains_key(tag))
    }

    /// Route one payload to the receiver.
    ///
    /// Runs the handler bound for the payload's tag, if any, before
    /// returning. A payload whose tag has no handler is a silent no-op.
    pub fn emit(&self, receiver: &mut R, hook: &Hook) {
        let Some(handler) = self.handlers.get(&hook.tag()) else {
            return;
        };
        match (handler, hook) {
            (BoundHandler::Payload(f), _) => f(receiver, hook),
            (BoundHandler::Bare(f), Hook::GameInit | Hook::GameDeinit) => f(receiver),
            (BoundHandler::Frame(f), Hook::FrameStart(info) | Hook::FrameEnd(info)) => {
                f(receiver, *info);
            }
            (
                BoundHandler::Scene(f),
                Hook::SceneBeforeLoad(info) | Hook::SceneLoad(info) | Hook::SceneUnload(info),
            ) => f(receiver, info),
            (
                BoundHandler::Entity(f),
                Hook::EntityCreated(info) | Hook::EntityDestroyed(info),
            ) => f(receiver, info),
            // The typed binding methods key each handler shape under a tag
            // of the matching data family, so no other pairing can exist.
            _ => unreachable!("handler shape does not match tag data family"),
        }
    }
}
