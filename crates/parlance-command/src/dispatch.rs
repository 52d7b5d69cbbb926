//! Type-indexed handler dispatch.
//!
//! Parsed command objects are routed to their handler by concrete type: one
//! `TypeId` hash lookup, one indirect call. Handlers capture whatever state
//! they need; the registry never inspects command contents itself.

use std::any::{Any, TypeId};
use std::collections::HashMap;

use parlance_types::error::ConfigError;

/// Anything dispatchable through a [`HandlerRegistry`].
///
/// The single method recovers the concrete type behind a trait object so a
/// handler registered for that type can receive it.
pub trait Handleable: Any {
    fn as_any(&self) -> &dyn Any;
}

type Thunk = Box<dyn FnMut(&dyn Handleable)>;

/// One type-to-handler pairing, detached from any registry.
///
/// Entries let a module hand its handlers to the composition root without
/// exposing the handler state; see [`help_handler_entry`](crate::help::help_handler_entry).
pub struct HandlerEntry {
    type_id: TypeId,
    type_name: &'static str,
    thunk: Thunk,
}

impl HandlerEntry {
    /// Pair concrete type `T` with `handler`.
    pub fn new<T, F>(mut handler: F) -> Self
    where
        T: Handleable + 'static,
        F: FnMut(&T) + 'static,
    {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            thunk: Box::new(move |object| {
                if let Some(concrete) = object.as_any().downcast_ref::<T>() {
                    handler(concrete);
                }
            }),
        }
    }
}

/// Per-worker handler table. Each worker owns its own registry, so handlers
/// may hold mutable state without synchronization.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<TypeId, HandlerEntry>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for concrete type `T`. At most one handler per
    /// type; a second registration is a configuration mistake.
    pub fn register<T, F>(&mut self, handler: F) -> Result<(), ConfigError>
    where
        T: Handleable + 'static,
        F: FnMut(&T) + 'static,
    {
        self.install(HandlerEntry::new(handler))
    }

    /// Install a pre-built entry.
    pub fn install(&mut self, entry: HandlerEntry) -> Result<(), ConfigError> {
        if self.handlers.contains_key(&entry.type_id) {
            return Err(ConfigError::DuplicateHandler {
                type_name: entry.type_name,
            });
        }
        log::debug!("installed handler for {}", entry.type_name);
        self.handlers.insert(entry.type_id, entry);
        Ok(())
    }

    /// Install several entries; stops at the first duplicate.
    pub fn install_all(
        &mut self,
        entries: impl IntoIterator<Item = HandlerEntry>,
    ) -> Result<(), ConfigError> {
        for entry in entries {
            self.install(entry)?;
        }
        Ok(())
    }

    /// Route `object` to the handler registered for its concrete type.
    /// Returns whether a handler ran.
    pub fn try_handle(&mut self, object: &dyn Handleable) -> bool {
        match self.handlers.get_mut(&object.as_any().type_id()) {
            Some(entry) => {
                (entry.thunk)(object);
                true
            },
            None => {
                log::debug!("no handler for dispatched object");
                false
            },
        }
    }
}
