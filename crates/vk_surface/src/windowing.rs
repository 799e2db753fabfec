//! Native windowing-system calls behind surface creation
//!
//! Three surface paths need one native preprocessing call before the Vulkan
//! command can run: an Android `Surface` object is normalized to an
//! `ANativeWindow`, an `NSWindow` is reduced to its content view, and
//! AppKit/UIKit views get a `CAMetalLayer` as their backing store.
//! [`WindowingBridge`] is the seam for those calls; [`NativeWindowing`] wires
//! it to the real OS frameworks on the targets that have them.
//!
//! Layers attached here become part of the view's layer tree and are owned by
//! the view; the crate never tracks or releases them.

use std::ffi::c_void;

use crate::error::{SurfaceError, SurfaceResult};

/// Windowing-system operations some surface paths depend on
///
/// # Safety
///
/// All methods receive raw native handles. Callers must pass handles of the
/// documented kind, valid for the duration of the call, from a thread the
/// windowing system allows to touch them.
pub trait WindowingBridge {
    /// Normalizes an Android `Surface` object to an `ANativeWindow` pointer.
    ///
    /// # Safety
    ///
    /// `jni_env` must be the calling thread's `JNIEnv*` and `surface` a live
    /// `android.view.Surface` reference valid in that environment.
    unsafe fn android_native_window(
        &self,
        jni_env: *mut c_void,
        surface: *mut c_void,
    ) -> SurfaceResult<*mut c_void>;

    /// Returns the content view of an `NSWindow`.
    ///
    /// # Safety
    ///
    /// `ns_window` must point to a live `NSWindow`.
    unsafe fn content_view(&self, ns_window: *mut c_void) -> SurfaceResult<*mut c_void>;

    /// Attempts to reinterpret the view's current layer as a `CAMetalLayer`.
    /// Returns `None` when the view has no layer or the layer is of another
    /// class.
    ///
    /// # Safety
    ///
    /// `view` must point to a live `NSView` or `UIView`.
    unsafe fn existing_metal_layer(&self, view: *mut c_void) -> Option<*mut c_void>;

    /// Creates a `CAMetalLayer` and installs it as the view's layer,
    /// replacing whatever the view had. Used on the macOS paths.
    ///
    /// # Safety
    ///
    /// `view` must point to a live `NSView`, and the calling thread must be
    /// allowed to mutate it.
    unsafe fn attach_metal_layer(&self, view: *mut c_void) -> SurfaceResult<*mut c_void>;

    /// Creates a `CAMetalLayer` sized and placed like the view, marks it
    /// opaque, and appends it as a sublayer of the view's existing layer.
    /// Used on the iOS path; the view's own layer is left in place.
    ///
    /// # Safety
    ///
    /// `view` must point to a live `UIView`, and the calling thread must be
    /// allowed to mutate it.
    unsafe fn attach_metal_sublayer(&self, view: *mut c_void) -> SurfaceResult<*mut c_void>;
}

/// [`WindowingBridge`] backed by the operating system's own frameworks
///
/// On targets without the corresponding framework every method fails with
/// [`SurfaceError::Windowing`]; the dispatch logic itself is identical on all
/// targets.
pub struct NativeWindowing;

impl WindowingBridge for NativeWindowing {
    unsafe fn android_native_window(
        &self,
        jni_env: *mut c_void,
        surface: *mut c_void,
    ) -> SurfaceResult<*mut c_void> {
        native_android_window(jni_env, surface)
    }

    unsafe fn content_view(&self, ns_window: *mut c_void) -> SurfaceResult<*mut c_void> {
        native_content_view(ns_window)
    }

    unsafe fn existing_metal_layer(&self, view: *mut c_void) -> Option<*mut c_void> {
        native_existing_metal_layer(view)
    }

    unsafe fn attach_metal_layer(&self, view: *mut c_void) -> SurfaceResult<*mut c_void> {
        native_attach_metal_layer(view)
    }

    unsafe fn attach_metal_sublayer(&self, view: *mut c_void) -> SurfaceResult<*mut c_void> {
        native_attach_metal_sublayer(view)
    }
}

fn unavailable(call: &str) -> SurfaceError {
    SurfaceError::Windowing {
        reason: format!("{} is not available on this build", call),
    }
}

// --- Android ---

#[cfg(target_os = "android")]
#[link(name = "android")]
extern "C" {
    fn ANativeWindow_fromSurface(env: *mut c_void, surface: *mut c_void) -> *mut c_void;
}

#[cfg(target_os = "android")]
unsafe fn native_android_window(
    jni_env: *mut c_void,
    surface: *mut c_void,
) -> SurfaceResult<*mut c_void> {
    let window = ANativeWindow_fromSurface(jni_env, surface);
    if window.is_null() {
        return Err(SurfaceError::Windowing {
            reason: "ANativeWindow_fromSurface returned null".to_string(),
        });
    }
    Ok(window)
}

#[cfg(not(target_os = "android"))]
unsafe fn native_android_window(
    _jni_env: *mut c_void,
    _surface: *mut c_void,
) -> SurfaceResult<*mut c_void> {
    Err(unavailable("ANativeWindow_fromSurface"))
}

// --- AppKit / UIKit ---

#[cfg(target_os = "macos")]
unsafe fn native_content_view(ns_window: *mut c_void) -> SurfaceResult<*mut c_void> {
    use objc::runtime::Object;
    use objc::{msg_send, sel, sel_impl};

    let window = ns_window.cast::<Object>();
    let view: *mut Object = msg_send![window, contentView];
    if view.is_null() {
        return Err(SurfaceError::Windowing {
            reason: "NSWindow has no content view".to_string(),
        });
    }
    Ok(view.cast())
}

#[cfg(not(target_os = "macos"))]
unsafe fn native_content_view(_ns_window: *mut c_void) -> SurfaceResult<*mut c_void> {
    Err(unavailable("NSWindow.contentView"))
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
mod apple {
    use std::ffi::c_void;

    use objc::runtime::{Object, BOOL, YES};
    use objc::{class, msg_send, sel, sel_impl};

    use crate::error::SurfaceResult;

    // CAMetalLayer lives in QuartzCore; make sure the framework is linked so
    // the runtime class lookup can succeed.
    #[link(name = "QuartzCore", kind = "framework")]
    extern "C" {}

    #[repr(C)]
    #[derive(Clone, Copy)]
    struct CGPoint {
        x: f64,
        y: f64,
    }

    #[repr(C)]
    #[derive(Clone, Copy)]
    struct CGSize {
        width: f64,
        height: f64,
    }

    #[repr(C)]
    #[derive(Clone, Copy)]
    struct CGRect {
        origin: CGPoint,
        size: CGSize,
    }

    pub unsafe fn existing_metal_layer(view: *mut c_void) -> Option<*mut c_void> {
        let view = view.cast::<Object>();
        let layer: *mut Object = msg_send![view, layer];
        if layer.is_null() {
            return None;
        }
        let is_metal: BOOL = msg_send![layer, isKindOfClass: class!(CAMetalLayer)];
        if is_metal == YES {
            Some(layer.cast())
        } else {
            None
        }
    }

    pub unsafe fn attach_metal_layer(view: *mut c_void) -> SurfaceResult<*mut c_void> {
        let view = view.cast::<Object>();
        let layer: *mut Object = msg_send![class!(CAMetalLayer), new];
        let () = msg_send![view, setWantsLayer: YES];
        let () = msg_send![view, setLayer: layer];
        Ok(layer.cast())
    }

    pub unsafe fn attach_metal_sublayer(view: *mut c_void) -> SurfaceResult<*mut c_void> {
        let view = view.cast::<Object>();
        let layer: *mut Object = msg_send![class!(CAMetalLayer), new];
        let frame: CGRect = msg_send![view, frame];
        let () = msg_send![layer, setFrame: frame];
        let () = msg_send![layer, setOpaque: YES];
        let view_layer: *mut Object = msg_send![view, layer];
        let () = msg_send![view_layer, addSublayer: layer];
        Ok(layer.cast())
    }
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
unsafe fn native_existing_metal_layer(view: *mut c_void) -> Option<*mut c_void> {
    apple::existing_metal_layer(view)
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
unsafe fn native_attach_metal_layer(view: *mut c_void) -> SurfaceResult<*mut c_void> {
    apple::attach_metal_layer(view)
}

#[cfg(any(target_os = "macos", target_os = "ios"))]
unsafe fn native_attach_metal_sublayer(view: *mut c_void) -> SurfaceResult<*mut c_void> {
    apple::attach_metal_sublayer(view)
}

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
unsafe fn native_existing_metal_layer(_view: *mut c_void) -> Option<*mut c_void> {
    None
}

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
unsafe fn native_attach_metal_layer(_view: *mut c_void) -> SurfaceResult<*mut c_void> {
    Err(unavailable("CAMetalLayer"))
}

#[cfg(not(any(target_os = "macos", target_os = "ios")))]
unsafe fn native_attach_metal_sublayer(_view: *mut c_void) -> SurfaceResult<*mut c_void> {
    Err(unavailable("CAMetalLayer"))
}
