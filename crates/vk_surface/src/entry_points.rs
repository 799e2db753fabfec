//! Instance-scoped entry-point resolution
//!
//! The surface-creation commands live in instance extensions and are not part
//! of the statically-linked dispatch table, so each is resolved by name
//! against the instance. Resolution is repeated on every creation call; the
//! crate holds no function-pointer cache, which keeps it free of process-wide
//! state.

use std::ffi::CStr;
use std::mem;

use crate::error::{SurfaceError, SurfaceResult};
use crate::instance::SurfaceInstance;

pub(crate) const CREATE_WIN32_SURFACE: &CStr =
    unsafe { CStr::from_bytes_with_nul_unchecked(b"vkCreateWin32SurfaceKHR\0") };
pub(crate) const CREATE_XLIB_SURFACE: &CStr =
    unsafe { CStr::from_bytes_with_nul_unchecked(b"vkCreateXlibSurfaceKHR\0") };
pub(crate) const CREATE_WAYLAND_SURFACE: &CStr =
    unsafe { CStr::from_bytes_with_nul_unchecked(b"vkCreateWaylandSurfaceKHR\0") };
pub(crate) const CREATE_ANDROID_SURFACE: &CStr =
    unsafe { CStr::from_bytes_with_nul_unchecked(b"vkCreateAndroidSurfaceKHR\0") };
pub(crate) const CREATE_METAL_SURFACE: &CStr =
    unsafe { CStr::from_bytes_with_nul_unchecked(b"vkCreateMetalSurfaceEXT\0") };

/// Resolves `name` against the instance and casts it to the command's typed
/// pointer, failing with [`SurfaceError::EntryPointNotFound`] on a null
/// lookup.
///
/// # Safety
///
/// `F` must be the exact Vulkan function-pointer type of the command `name`
/// refers to.
pub(crate) unsafe fn resolve<I, F>(instance: &I, name: &'static CStr) -> SurfaceResult<F>
where
    I: SurfaceInstance + ?Sized,
    F: Copy,
{
    debug_assert_eq!(
        mem::size_of::<F>(),
        mem::size_of::<unsafe extern "system" fn()>()
    );
    match instance.load(name) {
        Some(command) => Ok(mem::transmute_copy(&command)),
        None => Err(SurfaceError::EntryPointNotFound { name }),
    }
}
