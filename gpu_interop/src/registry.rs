/// Object registry: native object addresses to generational handles.
///
/// One registry per object category (resources, views) per device. Entries
/// are non-owning: registering or unregistering never touches the native
/// reference count. Handles are slot map keys, so a handle freed by
/// `unregister` stays invalid forever even when its slot (or the native
/// address behind it) gets reused by a later registration.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, Key, KeyData, SlotMap};
use crate::error::{Error, Result};
use crate::{interop_trace, interop_warn};

const LOG_SOURCE: &str = "gpu_interop::registry";

// ===== NATIVE OBJECT =====

/// Opaque native object address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NativeObject(pub u64);

impl NativeObject {
    pub const NULL: NativeObject = NativeObject(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NativeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

// ===== HANDLES =====

new_key_type! {
    /// Handle to a registered native resource (buffer or texture)
    pub struct ResourceHandle;

    /// Handle to a registered native resource view
    pub struct ResourceViewHandle;
}

/// Conversion of handles to and from the `u64` used across the flat
/// extension function table
pub trait RawHandle: Key {
    /// Stable 64-bit value (slot index and version)
    fn to_raw(self) -> u64 {
        self.data().as_ffi()
    }

    /// Rebuild a handle from `to_raw` output
    ///
    /// Arbitrary values never alias a live entry unless they were issued for it.
    fn from_raw(raw: u64) -> Self {
        KeyData::from_ffi(raw).into()
    }
}

impl<K: Key> RawHandle for K {}

// ===== REGISTRY =====

struct RegistryInner<K: Key> {
    objects: SlotMap<K, NativeObject>,
    handles: FxHashMap<NativeObject, K>,
}

/// Thread-safe handle table for one category of native objects
///
/// A single mutex guards both maps and is held only for the map operation
/// itself. Logging happens after it is released.
pub struct ObjectRegistry<K: Key> {
    /// Category name used in log and error messages ("resource", "view")
    kind: &'static str,
    /// Trace every registration and removal
    trace: bool,
    inner: Mutex<RegistryInner<K>>,
}

impl<K: Key> ObjectRegistry<K> {
    /// Create an empty registry
    ///
    /// # Arguments
    ///
    /// * `kind` - Category name for messages
    /// * `trace` - Log every registration and removal at TRACE level
    pub fn new(kind: &'static str, trace: bool) -> Self {
        Self {
            kind,
            trace,
            inner: Mutex::new(RegistryInner {
                objects: SlotMap::with_key(),
                handles: FxHashMap::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner<K>> {
        // Map updates never leave the two maps inconsistent mid-way
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a live native object and issue a fresh handle for it
    ///
    /// # Errors
    ///
    /// * `InvalidResource` - `object` is null
    /// * `AlreadyRegistered` - `object` is still registered under another handle
    pub fn register(&self, object: NativeObject) -> Result<K> {
        if object.is_null() {
            return Err(Error::InvalidResource(format!("cannot register null {}", self.kind)));
        }

        let handle = {
            let mut inner = self.lock();
            if let Some(existing) = inner.handles.get(&object) {
                return Err(Error::AlreadyRegistered(format!(
                    "{} {} is live as handle {:#x}",
                    self.kind, object, existing.to_raw()
                )));
            }
            let handle = inner.objects.insert(object);
            inner.handles.insert(object, handle);
            handle
        };

        if self.trace {
            interop_trace!(LOG_SOURCE, "Registered {} {} as {:#x}", self.kind, object, handle.to_raw());
        }
        Ok(handle)
    }

    /// Remove a handle if it is live
    ///
    /// Lookup and removal happen under one lock, so when several callers race
    /// to remove the same handle exactly one of them gets the object back.
    pub fn take(&self, handle: K) -> Option<NativeObject> {
        let removed = {
            let mut inner = self.lock();
            let removed = inner.objects.remove(handle);
            if let Some(object) = removed {
                inner.handles.remove(&object);
            }
            removed
        };

        if let (true, Some(object)) = (self.trace, removed) {
            interop_trace!(LOG_SOURCE, "Unregistered {} {} ({:#x})", self.kind, object, handle.to_raw());
        }
        removed
    }

    /// Remove a handle
    ///
    /// Unregistering a handle that is not live is a caller bug: it asserts in
    /// debug builds and leaves the registry untouched otherwise.
    ///
    /// # Returns
    ///
    /// The native object the handle referred to
    pub fn unregister(&self, handle: K) -> Option<NativeObject> {
        let removed = self.take(handle);
        if removed.is_none() {
            interop_warn!(LOG_SOURCE, "Unregister of stale {} handle {:#x}", self.kind, handle.to_raw());
            debug_assert!(false, "unregister of stale {} handle {:#x}", self.kind, handle.to_raw());
        }
        removed
    }

    /// Remove the entry for a native object, as reported by a destruction notification
    ///
    /// Objects the registry never saw are ignored.
    pub fn unregister_object(&self, object: NativeObject) -> Option<K> {
        let removed = {
            let mut inner = self.lock();
            let removed = inner.handles.remove(&object);
            if let Some(handle) = removed {
                inner.objects.remove(handle);
            }
            removed
        };

        if self.trace {
            match removed {
                Some(handle) => interop_trace!(
                    LOG_SOURCE, "Unregistered {} {} ({:#x}) on destruction", self.kind, object, handle.to_raw()
                ),
                None => interop_trace!(LOG_SOURCE, "Ignoring destruction of unknown {} {}", self.kind, object),
            }
        }
        removed
    }

    /// Check whether `handle` is registered and not yet removed
    pub fn is_valid(&self, handle: K) -> bool {
        self.lock().objects.contains_key(handle)
    }

    /// Native object behind a live handle
    pub fn resolve(&self, handle: K) -> Option<NativeObject> {
        self.lock().objects.get(handle).copied()
    }

    /// Live handle of a native object
    pub fn find(&self, object: NativeObject) -> Option<K> {
        self.lock().handles.get(&object).copied()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.lock().objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of every live entry
    pub fn entries(&self) -> Vec<(K, NativeObject)> {
        self.lock().objects.iter().map(|(handle, object)| (handle, *object)).collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
