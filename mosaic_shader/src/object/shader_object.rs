/// Shader objects - persistent per-pass resources kept across frames
///
/// A shader object carries state a pass needs beyond one builder's lifetime:
/// a generated lookup texture, a peak-detection buffer, a dither matrix...
/// The caller owns the handle (starting empty) and decides when to destroy
/// it; the store owns the contents and hands them to passes on demand.
///
/// The store is a plain value scoped to whatever GPU context the caller
/// threads through, never a global. It provides no locking: a single object
/// must not be used by two in-flight passes without external
/// synchronization.

use std::any::{type_name, Any};
use slotmap::{new_key_type, SlotMap};
use crate::error::{Error, Result};

const SOURCE: &str = "mosaic::ShaderObjectStore";

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key of a shader object within a store
    pub struct ShaderObjectKey;
}

// ===== OBJECT TYPE =====

/// What a shader object is used for
///
/// A handle is bound to one type for its whole life; passing it to a pass
/// expecting another type is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderObjectType {
    /// Generated lookup texture (1D/2D/3D LUT)
    Lut,
    /// Dither matrix texture
    Dither,
    /// Peak / average luminance detection buffer
    PeakDetect,
    /// Debanding state (PRNG seed texture)
    Deband,
    /// Precomputed filter kernel for scaling
    Sampler,
    /// Temporal accumulation buffer
    Accumulation,
}

// ===== HANDLE =====

/// Caller-owned handle to a shader object
///
/// `ShaderObjectHandle::default()` is the empty state required before first
/// use. The handle is deliberately not `Clone`: it has a single owner who is
/// responsible for calling `ShaderObjectStore::destroy`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ShaderObjectHandle {
    key: Option<ShaderObjectKey>,
}

impl ShaderObjectHandle {
    /// Empty handle
    pub fn new() -> Self {
        Self::default()
    }

    /// No object has been created for this handle (or it was destroyed)
    pub fn is_empty(&self) -> bool {
        self.key.is_none()
    }

    pub fn key(&self) -> Option<ShaderObjectKey> {
        self.key
    }
}

// ===== STORE =====

struct ShaderObjectEntry {
    object_type: ShaderObjectType,
    type_name: &'static str,
    payload: Box<dyn Any + Send>,
}

/// Arena of shader objects
///
/// Object contents are dropped on `destroy`; dropping a backend resource
/// wrapper releases the resource.
#[derive(Default)]
pub struct ShaderObjectStore {
    objects: SlotMap<ShaderObjectKey, ShaderObjectEntry>,
}

impl ShaderObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the object behind `handle`, creating it with `factory` if the
    /// handle is empty
    ///
    /// # Errors
    ///
    /// - Whatever `factory` returns; the handle then stays empty so a later
    ///   call can retry
    /// - `InvalidResource` if the handle holds an object of another type
    pub fn get_or_create<T, F>(
        &mut self,
        handle: &mut ShaderObjectHandle,
        object_type: ShaderObjectType,
        factory: F,
    ) -> Result<&mut T>
    where
        T: Any + Send,
        F: FnOnce() -> Result<T>,
    {
        self.update_or_create(handle, object_type, factory, |_| Ok(()))
    }

    /// Like `get_or_create`, but runs `update` on an already existing object
    /// to refresh its contents in place (e.g. re-upload a LUT whose
    /// parameters changed). `update` is not called on freshly created objects.
    ///
    /// An `update` error is returned as is; the object stays in the store.
    pub fn update_or_create<T, F, U>(
        &mut self,
        handle: &mut ShaderObjectHandle,
        object_type: ShaderObjectType,
        factory: F,
        update: U,
    ) -> Result<&mut T>
    where
        T: Any + Send,
        F: FnOnce() -> Result<T>,
        U: FnOnce(&mut T) -> Result<()>,
    {
        if let Some(key) = handle.key {
            match self.objects.get(key) {
                None => {
                    crate::engine_warn!(SOURCE, "Stale {:?} handle, recreating object", object_type);
                    handle.key = None;
                }
                Some(entry) if entry.object_type != object_type || !entry.payload.is::<T>() => {
                    return Err(Error::InvalidResource(format!(
                        "shader object holds {:?} ({}), expected {:?} ({})",
                        entry.object_type,
                        entry.type_name,
                        object_type,
                        type_name::<T>()
                    )));
                }
                Some(_) => {}
            }
        }

        let key = match handle.key {
            Some(key) => {
                let object = self.payload_mut::<T>(key)?;
                update(object)?;
                key
            }
            None => {
                let object = factory()?;
                let key = self.objects.insert(ShaderObjectEntry {
                    object_type,
                    type_name: type_name::<T>(),
                    payload: Box::new(object),
                });
                handle.key = Some(key);
                crate::engine_debug!(SOURCE, "Created {:?} object ({})", object_type, type_name::<T>());
                key
            }
        };

        self.payload_mut::<T>(key)
    }

    /// Borrow the object behind `handle` without creating anything
    pub fn get<T: Any + Send>(&self, handle: &ShaderObjectHandle) -> Option<&T> {
        let key = handle.key?;
        self.objects.get(key)?.payload.downcast_ref::<T>()
    }

    /// Type of the object behind `handle`, if it exists
    pub fn object_type(&self, handle: &ShaderObjectHandle) -> Option<ShaderObjectType> {
        let key = handle.key?;
        self.objects.get(key).map(|entry| entry.object_type)
    }

    /// The handle refers to a live object in this store
    pub fn contains(&self, handle: &ShaderObjectHandle) -> bool {
        handle.key.is_some_and(|key| self.objects.contains_key(key))
    }

    /// Release the object behind `handle` and reset the handle to empty
    ///
    /// Safe to call on an empty or stale handle (no-op).
    pub fn destroy(&mut self, handle: &mut ShaderObjectHandle) {
        if let Some(key) = handle.key.take() {
            if let Some(entry) = self.objects.remove(key) {
                crate::engine_debug!(SOURCE, "Destroyed {:?} object ({})", entry.object_type, entry.type_name);
            }
        }
    }

    /// Number of live objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn payload_mut<T: Any + Send>(&mut self, key: ShaderObjectKey) -> Result<&mut T> {
        self.objects
            .get_mut(key)
            .and_then(|entry| entry.payload.downcast_mut::<T>())
            .ok_or_else(|| Error::InvalidResource(format!("no {} object for key {:?}", type_name::<T>(), key)))
    }
}

impl Drop for ShaderObjectStore {
    fn drop(&mut self) {
        if !self.objects.is_empty() {
            crate::engine_warn!(
                SOURCE,
                "{} shader object(s) were never destroyed, releasing with the store",
                self.objects.len()
            );
        }
    }
}

#[cfg(test)]
#[path = "shader_object_tests.rs"]
mod tests;
