//! Vulkan surface creation across windowing systems
//!
//! Composes the capability gate, the per-call entry-point resolver, and one
//! builder per windowing system: validate that the instance was created with
//! the extensions the source needs, resolve the platform's creation command,
//! perform the platform's native preprocessing where one exists, fill the
//! create-info record, and invoke the command.
//!
//! The whole sequence is synchronous and stateless. Either it completes and
//! yields a surface the caller owns, or it stops at the first failing step
//! with a classified [`SurfaceError`] and no surface is left allocated.

use ash::extensions::khr;
use ash::vk;
use std::ffi::c_void;
use std::os::raw::c_ulong;
use std::ptr;

use crate::entry_points;
use crate::error::{SurfaceError, SurfaceResult};
use crate::instance::{ExtensionSet, SurfaceInstance};
use crate::source::WindowSource;
use crate::windowing::{NativeWindowing, WindowingBridge};

/// Creates a surface for `source` on the given instance.
///
/// Native preprocessing (Android `Surface` normalization, AppKit/UIKit layer
/// attachment) goes through [`NativeWindowing`]. The returned surface is
/// owned by the caller; this crate never destroys it.
///
/// On the view paths a `CAMetalLayer` may be attached to the view as a side
/// effect even when the call ultimately fails at the native invocation; the
/// layer belongs to the view and needs no cleanup.
///
/// # Errors
///
/// See [`SurfaceError`] for the failure taxonomy. No error is retried
/// internally.
///
/// # Safety
///
/// The instance behind `instance` must be live for the duration of the call,
/// and every native handle in `source` must be valid and of the documented
/// kind. View-mutating paths (macOS/iOS) must be called from a thread the
/// windowing system permits to touch the view, and concurrent calls against
/// the same view must be serialized by the caller.
pub unsafe fn create_surface<I>(
    instance: &I,
    source: &WindowSource,
) -> SurfaceResult<vk::SurfaceKHR>
where
    I: SurfaceInstance + ?Sized,
{
    create_surface_with(instance, &NativeWindowing, source)
}

/// [`create_surface`] with an explicit windowing bridge.
///
/// # Errors
///
/// See [`SurfaceError`].
///
/// # Safety
///
/// Same contract as [`create_surface`].
pub unsafe fn create_surface_with<I, B>(
    instance: &I,
    windowing: &B,
    source: &WindowSource,
) -> SurfaceResult<vk::SurfaceKHR>
where
    I: SurfaceInstance + ?Sized,
    B: WindowingBridge + ?Sized,
{
    log::debug!("creating {} surface", source.kind());

    let enabled = ExtensionSet::new(instance.enabled_extensions());
    enabled.require(khr::Surface::name())?;
    enabled.require(source.required_extension())?;

    match *source {
        WindowSource::Xlib { display, window } => {
            let create_xlib_surface: vk::PFN_vkCreateXlibSurfaceKHR =
                entry_points::resolve(instance, entry_points::CREATE_XLIB_SURFACE)?;
            xlib_surface(instance, create_xlib_surface, display, window)
        }
        WindowSource::Wayland { display, surface } => {
            let create_wayland_surface: vk::PFN_vkCreateWaylandSurfaceKHR =
                entry_points::resolve(instance, entry_points::CREATE_WAYLAND_SURFACE)?;
            wayland_surface(instance, create_wayland_surface, display, surface)
        }
        WindowSource::Win32 { hwnd, hinstance } => {
            let create_win32_surface: vk::PFN_vkCreateWin32SurfaceKHR =
                entry_points::resolve(instance, entry_points::CREATE_WIN32_SURFACE)?;
            win32_surface(instance, create_win32_surface, hwnd, hinstance)
        }
        WindowSource::AndroidSurface { surface, jni_env } => {
            let create_android_surface: vk::PFN_vkCreateAndroidSurfaceKHR =
                entry_points::resolve(instance, entry_points::CREATE_ANDROID_SURFACE)?;
            let window = windowing.android_native_window(jni_env, surface)?;
            android_surface(instance, create_android_surface, window)
        }
        WindowSource::AndroidWindow { window } => {
            let create_android_surface: vk::PFN_vkCreateAndroidSurfaceKHR =
                entry_points::resolve(instance, entry_points::CREATE_ANDROID_SURFACE)?;
            android_surface(instance, create_android_surface, window)
        }
        WindowSource::NsWindow { ns_window } => {
            let create_metal_surface: vk::PFN_vkCreateMetalSurfaceEXT =
                entry_points::resolve(instance, entry_points::CREATE_METAL_SURFACE)?;
            // An NSWindow source is sugar over its content view.
            let ns_view = windowing.content_view(ns_window)?;
            ns_view_surface(instance, windowing, create_metal_surface, ns_view)
        }
        WindowSource::NsView { ns_view } => {
            let create_metal_surface: vk::PFN_vkCreateMetalSurfaceEXT =
                entry_points::resolve(instance, entry_points::CREATE_METAL_SURFACE)?;
            ns_view_surface(instance, windowing, create_metal_surface, ns_view)
        }
        WindowSource::UiView { ui_view } => {
            let create_metal_surface: vk::PFN_vkCreateMetalSurfaceEXT =
                entry_points::resolve(instance, entry_points::CREATE_METAL_SURFACE)?;
            ui_view_surface(instance, windowing, create_metal_surface, ui_view)
        }
    }
}

fn check(result: vk::Result, surface: vk::SurfaceKHR) -> SurfaceResult<vk::SurfaceKHR> {
    if result == vk::Result::SUCCESS {
        Ok(surface)
    } else {
        Err(SurfaceError::Creation(result))
    }
}

unsafe fn xlib_surface<I>(
    instance: &I,
    create_xlib_surface: vk::PFN_vkCreateXlibSurfaceKHR,
    display: *mut c_void,
    window: c_ulong,
) -> SurfaceResult<vk::SurfaceKHR>
where
    I: SurfaceInstance + ?Sized,
{
    let create_info = vk::XlibSurfaceCreateInfoKHR {
        s_type: vk::StructureType::XLIB_SURFACE_CREATE_INFO_KHR,
        dpy: display.cast(),
        window,
        ..Default::default()
    };
    let mut surface = vk::SurfaceKHR::null();
    check(
        create_xlib_surface(instance.handle(), &create_info, ptr::null(), &mut surface),
        surface,
    )
}

unsafe fn wayland_surface<I>(
    instance: &I,
    create_wayland_surface: vk::PFN_vkCreateWaylandSurfaceKHR,
    display: *mut c_void,
    surface_ptr: *mut c_void,
) -> SurfaceResult<vk::SurfaceKHR>
where
    I: SurfaceInstance + ?Sized,
{
    let create_info = vk::WaylandSurfaceCreateInfoKHR {
        s_type: vk::StructureType::WAYLAND_SURFACE_CREATE_INFO_KHR,
        display: display.cast(),
        surface: surface_ptr.cast(),
        ..Default::default()
    };
    let mut surface = vk::SurfaceKHR::null();
    check(
        create_wayland_surface(instance.handle(), &create_info, ptr::null(), &mut surface),
        surface,
    )
}

unsafe fn win32_surface<I>(
    instance: &I,
    create_win32_surface: vk::PFN_vkCreateWin32SurfaceKHR,
    hwnd: *mut c_void,
    hinstance: *mut c_void,
) -> SurfaceResult<vk::SurfaceKHR>
where
    I: SurfaceInstance + ?Sized,
{
    let create_info = vk::Win32SurfaceCreateInfoKHR {
        s_type: vk::StructureType::WIN32_SURFACE_CREATE_INFO_KHR,
        hinstance: hinstance as _,
        hwnd: hwnd as _,
        ..Default::default()
    };
    let mut surface = vk::SurfaceKHR::null();
    check(
        create_win32_surface(instance.handle(), &create_info, ptr::null(), &mut surface),
        surface,
    )
}

unsafe fn android_surface<I>(
    instance: &I,
    create_android_surface: vk::PFN_vkCreateAndroidSurfaceKHR,
    window: *mut c_void,
) -> SurfaceResult<vk::SurfaceKHR>
where
    I: SurfaceInstance + ?Sized,
{
    let create_info = vk::AndroidSurfaceCreateInfoKHR {
        s_type: vk::StructureType::ANDROID_SURFACE_CREATE_INFO_KHR,
        window: window.cast(),
        ..Default::default()
    };
    let mut surface = vk::SurfaceKHR::null();
    check(
        create_android_surface(instance.handle(), &create_info, ptr::null(), &mut surface),
        surface,
    )
}

unsafe fn ns_view_surface<I, B>(
    instance: &I,
    windowing: &B,
    create_metal_surface: vk::PFN_vkCreateMetalSurfaceEXT,
    ns_view: *mut c_void,
) -> SurfaceResult<vk::SurfaceKHR>
where
    I: SurfaceInstance + ?Sized,
    B: WindowingBridge + ?Sized,
{
    let layer = match windowing.existing_metal_layer(ns_view) {
        Some(layer) => layer,
        None => {
            log::debug!("attaching a new CAMetalLayer to the target NSView");
            windowing.attach_metal_layer(ns_view)?
        }
    };
    metal_surface(instance, create_metal_surface, layer)
}

unsafe fn ui_view_surface<I, B>(
    instance: &I,
    windowing: &B,
    create_metal_surface: vk::PFN_vkCreateMetalSurfaceEXT,
    ui_view: *mut c_void,
) -> SurfaceResult<vk::SurfaceKHR>
where
    I: SurfaceInstance + ?Sized,
    B: WindowingBridge + ?Sized,
{
    let layer = match windowing.existing_metal_layer(ui_view) {
        Some(layer) => layer,
        None => {
            log::debug!("attaching a new CAMetalLayer sublayer to the target UIView");
            windowing.attach_metal_sublayer(ui_view)?
        }
    };
    metal_surface(instance, create_metal_surface, layer)
}

unsafe fn metal_surface<I>(
    instance: &I,
    create_metal_surface: vk::PFN_vkCreateMetalSurfaceEXT,
    layer: *mut c_void,
) -> SurfaceResult<vk::SurfaceKHR>
where
    I: SurfaceInstance + ?Sized,
{
    let create_info = vk::MetalSurfaceCreateInfoEXT {
        s_type: vk::StructureType::METAL_SURFACE_CREATE_INFO_EXT,
        p_layer: layer.cast_const().cast(),
        ..Default::default()
    };
    let mut surface = vk::SurfaceKHR::null();
    check(
        create_metal_surface(instance.handle(), &create_info, ptr::null(), &mut surface),
        surface,
    )
}
