//! Capability-instance access
//!
//! Surface creation needs three things from the Vulkan instance: its raw
//! handle, the set of instance extensions it was created with, and a way to
//! resolve instance-scoped entry points. [`SurfaceInstance`] is the seam that
//! provides them, so the dispatch logic can be exercised against mocks while
//! [`AshInstance`] wires it to a live `ash` instance.

use ash::vk;
use std::collections::HashSet;
use std::ffi::{CStr, CString};

use crate::error::{SurfaceError, SurfaceResult};

/// Instance-side facilities surface creation depends on
///
/// The implementor owns nothing on behalf of this crate; the instance must
/// outlive every call made with it.
pub trait SurfaceInstance {
    /// Raw handle of the instance the surface will belong to.
    fn handle(&self) -> vk::Instance;

    /// Names of the instance extensions the instance was created with.
    fn enabled_extensions(&self) -> &[CString];

    /// Looks up an instance-scoped entry point by name. Returns `None` when
    /// the loader cannot provide the command.
    fn load(&self, name: &CStr) -> vk::PFN_vkVoidFunction;
}

/// [`SurfaceInstance`] implementation over a live `ash` entry and instance
pub struct AshInstance<'a> {
    entry: &'a ash::Entry,
    instance: &'a ash::Instance,
    enabled_extensions: &'a [CString],
}

impl<'a> AshInstance<'a> {
    /// Bundles the entry, instance, and the extension names the instance was
    /// created with. The extension list is the caller's record of what it
    /// passed to `vkCreateInstance`; it is not re-queried here.
    #[must_use]
    pub fn new(
        entry: &'a ash::Entry,
        instance: &'a ash::Instance,
        enabled_extensions: &'a [CString],
    ) -> Self {
        Self {
            entry,
            instance,
            enabled_extensions,
        }
    }
}

impl SurfaceInstance for AshInstance<'_> {
    fn handle(&self) -> vk::Instance {
        self.instance.handle()
    }

    fn enabled_extensions(&self) -> &[CString] {
        self.enabled_extensions
    }

    fn load(&self, name: &CStr) -> vk::PFN_vkVoidFunction {
        unsafe {
            (self.entry.static_fn().get_instance_proc_addr)(
                self.instance.handle(),
                name.as_ptr(),
            )
        }
    }
}

/// Enabled-extension set materialized for O(1) membership tests
///
/// Rebuilt from the instance on every surface-creation call; nothing is
/// cached between calls.
pub(crate) struct ExtensionSet<'a> {
    names: HashSet<&'a CStr>,
}

impl<'a> ExtensionSet<'a> {
    pub fn new(enabled: &'a [CString]) -> Self {
        Self {
            names: enabled.iter().map(CString::as_c_str).collect(),
        }
    }

    /// Fails with the missing extension's name if it is not in the set.
    pub fn require(&self, name: &'static CStr) -> SurfaceResult<()> {
        log::trace!("checking instance extension {}", name.to_string_lossy());
        if self.names.contains(name) {
            Ok(())
        } else {
            Err(SurfaceError::ExtensionNotPresent { name })
        }
    }
}
