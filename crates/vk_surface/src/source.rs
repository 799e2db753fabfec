//! Window-source descriptions across windowing systems
//!
//! [`WindowSource`] identifies where a surface should be created: one variant
//! per supported windowing system, each carrying the raw native handles that
//! system's Vulkan surface extension consumes. The set is closed; dispatch
//! over it is exhaustive, so supporting another windowing system is a
//! compile-time-visible change.

use ash::extensions::{ext, khr};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle};
use std::ffi::{c_void, CStr};
use std::os::raw::c_ulong;

use crate::error::{SurfaceError, SurfaceResult};

/// A platform-tagged description of the window to create a surface for
///
/// All handles are borrowed: they must stay valid for the duration of the
/// surface-creation call. The crate never frees or retains them.
#[derive(Debug, Clone, Copy)]
pub enum WindowSource {
    /// An Xlib window
    Xlib {
        /// `Display*` connection the window belongs to
        display: *mut c_void,
        /// Xlib window identifier
        window: c_ulong,
    },
    /// A Wayland surface
    Wayland {
        /// `wl_display*` the surface belongs to
        display: *mut c_void,
        /// `wl_surface*` to present into
        surface: *mut c_void,
    },
    /// A Win32 window
    Win32 {
        /// `HWND` of the window
        hwnd: *mut c_void,
        /// `HINSTANCE` of the owning module
        hinstance: *mut c_void,
    },
    /// An Android `Surface` object, not yet normalized to a native window
    AndroidSurface {
        /// `jobject` reference to the `android.view.Surface`
        surface: *mut c_void,
        /// `JNIEnv*` of the calling thread
        jni_env: *mut c_void,
    },
    /// An Android `ANativeWindow`, already normalized
    AndroidWindow {
        /// `ANativeWindow*` to present into
        window: *mut c_void,
    },
    /// A macOS `NSWindow`; its content view receives the Metal layer
    NsWindow {
        /// `NSWindow*` to present into
        ns_window: *mut c_void,
    },
    /// A macOS `NSView`; the view receives the Metal layer
    NsView {
        /// `NSView*` to present into
        ns_view: *mut c_void,
    },
    /// An iOS `UIView`; a Metal layer is inserted as a sublayer
    UiView {
        /// `UIView*` to present into
        ui_view: *mut c_void,
    },
}

impl WindowSource {
    /// Describes an Xlib window on the given display connection.
    #[must_use]
    pub fn xlib(display: *mut c_void, window: c_ulong) -> Self {
        Self::Xlib { display, window }
    }

    /// Describes a Wayland surface on the given display.
    #[must_use]
    pub fn wayland(display: *mut c_void, surface: *mut c_void) -> Self {
        Self::Wayland { display, surface }
    }

    /// Describes a Win32 window owned by the given module.
    #[must_use]
    pub fn win32(hwnd: *mut c_void, hinstance: *mut c_void) -> Self {
        Self::Win32 { hwnd, hinstance }
    }

    /// Describes an Android `Surface` object. It is normalized to an
    /// `ANativeWindow` during surface creation.
    #[must_use]
    pub fn android_surface(surface: *mut c_void, jni_env: *mut c_void) -> Self {
        Self::AndroidSurface { surface, jni_env }
    }

    /// Describes an already-normalized `ANativeWindow`.
    #[must_use]
    pub fn android_window(window: *mut c_void) -> Self {
        Self::AndroidWindow { window }
    }

    /// Describes a macOS `NSWindow`.
    #[must_use]
    pub fn ns_window(ns_window: *mut c_void) -> Self {
        Self::NsWindow { ns_window }
    }

    /// Describes a macOS `NSView`.
    #[must_use]
    pub fn ns_view(ns_view: *mut c_void) -> Self {
        Self::NsView { ns_view }
    }

    /// Describes an iOS `UIView`.
    #[must_use]
    pub fn ui_view(ui_view: *mut c_void) -> Self {
        Self::UiView { ui_view }
    }

    /// Maps a raw-window-handle pair onto the closed variant set.
    ///
    /// Handle kinds outside the supported set are rejected with
    /// [`SurfaceError::UnsupportedSource`] before any instance state is
    /// touched.
    pub fn from_raw_handles(
        display: RawDisplayHandle,
        window: RawWindowHandle,
    ) -> SurfaceResult<Self> {
        match (display, window) {
            (RawDisplayHandle::Xlib(display), RawWindowHandle::Xlib(window)) => {
                Ok(Self::xlib(display.display, window.window))
            }
            (RawDisplayHandle::Wayland(display), RawWindowHandle::Wayland(window)) => {
                Ok(Self::wayland(display.display, window.surface))
            }
            (RawDisplayHandle::Windows(_), RawWindowHandle::Win32(window)) => {
                Ok(Self::win32(window.hwnd, window.hinstance))
            }
            (RawDisplayHandle::Android(_), RawWindowHandle::AndroidNdk(window)) => {
                Ok(Self::android_window(window.a_native_window))
            }
            (RawDisplayHandle::AppKit(_), RawWindowHandle::AppKit(window)) => {
                Ok(Self::ns_view(window.ns_view))
            }
            (RawDisplayHandle::UiKit(_), RawWindowHandle::UiKit(window)) => {
                Ok(Self::ui_view(window.ui_view))
            }
            _ => Err(SurfaceError::UnsupportedSource),
        }
    }

    /// The instance extension this source needs in addition to
    /// `VK_KHR_surface`.
    #[must_use]
    pub fn required_extension(&self) -> &'static CStr {
        match self {
            Self::Xlib { .. } => khr::XlibSurface::name(),
            Self::Wayland { .. } => khr::WaylandSurface::name(),
            Self::Win32 { .. } => khr::Win32Surface::name(),
            Self::AndroidSurface { .. } | Self::AndroidWindow { .. } => {
                khr::AndroidSurface::name()
            }
            Self::NsWindow { .. } | Self::NsView { .. } | Self::UiView { .. } => {
                ext::MetalSurface::name()
            }
        }
    }

    /// Both instance extensions a caller must enable at instance creation to
    /// later create a surface for this source.
    #[must_use]
    pub fn required_extensions(&self) -> [&'static CStr; 2] {
        [khr::Surface::name(), self.required_extension()]
    }

    /// Short name of the windowing system, for logs and error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Xlib { .. } => "xlib",
            Self::Wayland { .. } => "wayland",
            Self::Win32 { .. } => "win32",
            Self::AndroidSurface { .. } => "android-surface",
            Self::AndroidWindow { .. } => "android-window",
            Self::NsWindow { .. } => "ns-window",
            Self::NsView { .. } => "ns-view",
            Self::UiView { .. } => "ui-view",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raw_window_handle::{
        WaylandDisplayHandle, WaylandWindowHandle, WebDisplayHandle, WebWindowHandle,
        XlibDisplayHandle, XlibWindowHandle,
    };

    #[test]
    fn raw_xlib_handles_map_to_xlib_source() {
        let mut display = XlibDisplayHandle::empty();
        display.display = 0x10 as *mut _;
        let mut window = XlibWindowHandle::empty();
        window.window = 42;

        let source = WindowSource::from_raw_handles(
            RawDisplayHandle::Xlib(display),
            RawWindowHandle::Xlib(window),
        )
        .unwrap();

        match source {
            WindowSource::Xlib { display, window } => {
                assert_eq!(display as usize, 0x10);
                assert_eq!(window, 42);
            }
            other => panic!("expected Xlib source, got {:?}", other),
        }
    }

    #[test]
    fn raw_wayland_handles_map_to_wayland_source() {
        let mut display = WaylandDisplayHandle::empty();
        display.display = 0x20 as *mut _;
        let mut window = WaylandWindowHandle::empty();
        window.surface = 0x21 as *mut _;

        let source = WindowSource::from_raw_handles(
            RawDisplayHandle::Wayland(display),
            RawWindowHandle::Wayland(window),
        )
        .unwrap();
        assert_eq!(source.kind(), "wayland");
    }

    #[test]
    fn web_handles_are_rejected() {
        let result = WindowSource::from_raw_handles(
            RawDisplayHandle::Web(WebDisplayHandle::empty()),
            RawWindowHandle::Web(WebWindowHandle::empty()),
        );
        assert!(matches!(result, Err(SurfaceError::UnsupportedSource)));
    }

    #[test]
    fn mismatched_display_and_window_are_rejected() {
        let result = WindowSource::from_raw_handles(
            RawDisplayHandle::Xlib(XlibDisplayHandle::empty()),
            RawWindowHandle::Wayland(WaylandWindowHandle::empty()),
        );
        assert!(matches!(result, Err(SurfaceError::UnsupportedSource)));
    }

    #[test]
    fn apple_sources_share_the_metal_extension() {
        let ns_view = WindowSource::ns_view(std::ptr::null_mut());
        let ns_window = WindowSource::ns_window(std::ptr::null_mut());
        let ui_view = WindowSource::ui_view(std::ptr::null_mut());

        assert_eq!(ns_view.required_extension(), ext::MetalSurface::name());
        assert_eq!(ns_window.required_extension(), ext::MetalSurface::name());
        assert_eq!(ui_view.required_extension(), ext::MetalSurface::name());
    }

    #[test]
    fn required_extensions_always_include_the_base_surface_extension() {
        let source = WindowSource::android_window(std::ptr::null_mut());
        let [base, specific] = source.required_extensions();
        assert_eq!(base, khr::Surface::name());
        assert_eq!(specific, khr::AndroidSurface::name());
    }
}
