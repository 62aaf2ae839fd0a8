//! Opaque handle registry for plugin instances.
//!
//! The host never holds a pointer to a native plugin. It holds an integer
//! token issued here and passes it back on every call; the registry owns the
//! instances and maps tokens to them. Generation tags make stale tokens
//! detectable: disposing a plugin bumps its slot's generation, so a token
//! issued before the dispose can never resolve to whatever reuses the slot.

use crate::error::{Error, Result};
use crate::format::FormatPlugin;

/// Opaque token identifying a registered plugin.
///
/// Layout: high 32 bits slot generation, low 32 bits slot index. Hosts that
/// can only carry primitives round-trip it through
/// [`into_raw`](Self::into_raw) / [`from_raw`](Self::from_raw).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PluginHandle(u64);

impl PluginHandle {
    fn new(index: u32, generation: u32) -> Self {
        Self(((generation as u64) << 32) | index as u64)
    }

    fn index(self) -> usize {
        self.0 as u32 as usize
    }

    fn generation(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Raw token value.
    pub fn into_raw(self) -> u64 {
        self.0
    }

    /// Reconstruct a handle from a raw token. No validation happens here;
    /// a bad token surfaces as [`Error::InvalidHandle`] at first use.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

struct Slot {
    generation: u32,
    plugin: Option<Box<dyn FormatPlugin>>,
}

/// Owning arena mapping tokens to live plugin instances.
#[derive(Default)]
pub struct PluginRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a plugin and issue its token.
    pub fn register(&mut self, plugin: Box<dyn FormatPlugin>) -> PluginHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.plugin = Some(plugin);
            PluginHandle::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                plugin: Some(plugin),
            });
            PluginHandle::new(index, 0)
        }
    }

    /// Drop the plugin behind `handle` and retire the token.
    pub fn dispose(&mut self, handle: PluginHandle) -> Result<()> {
        let slot = self
            .slots
            .get_mut(handle.index())
            .filter(|s| s.generation == handle.generation() && s.plugin.is_some())
            .ok_or(Error::InvalidHandle(handle.into_raw()))?;
        slot.plugin = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index() as u32);
        Ok(())
    }

    /// Resolve a token to its plugin.
    pub fn resolve(&self, handle: PluginHandle) -> Result<&dyn FormatPlugin> {
        self.slots
            .get(handle.index())
            .filter(|s| s.generation == handle.generation())
            .and_then(|s| s.plugin.as_deref())
            .ok_or(Error::InvalidHandle(handle.into_raw()))
    }

    /// Number of live plugins.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
