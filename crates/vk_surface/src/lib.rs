//! # vk_surface
//!
//! Platform-surface dispatch for Vulkan: turns a platform-tagged window
//! description into a presentable `vk::SurfaceKHR`.
//!
//! The crate does one thing. Given an initialized instance and a
//! [`WindowSource`], it validates that the instance carries the extensions
//! that source needs, resolves the platform's surface-creation entry point,
//! performs the platform's native preprocessing (Android `Surface`
//! normalization, `CAMetalLayer` attachment on Apple views), and invokes the
//! native call. Instance lifecycle, window creation, and everything
//! downstream of the surface (swapchains, presentation, resizing) belong to
//! the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::ffi::{c_void, CString};
//! use vk_surface::{create_surface, AshInstance, WindowSource};
//!
//! fn make_surface(
//!     entry: &ash::Entry,
//!     instance: &ash::Instance,
//!     enabled_extensions: &[CString],
//!     hwnd: *mut c_void,
//!     hinstance: *mut c_void,
//! ) -> vk_surface::SurfaceResult<ash::vk::SurfaceKHR> {
//!     let source = WindowSource::win32(hwnd, hinstance);
//!     let instance = AshInstance::new(entry, instance, enabled_extensions);
//!     unsafe { create_surface(&instance, &source) }
//! }
//! ```
//!
//! The returned surface is owned by the caller; destroy it through
//! `vkDestroySurfaceKHR` once presentation is done with it.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

mod entry_points;
pub mod error;
pub mod instance;
pub mod source;
pub mod surface;
pub mod windowing;

pub use error::{SurfaceError, SurfaceResult};
pub use instance::{AshInstance, SurfaceInstance};
pub use source::WindowSource;
pub use surface::{create_surface, create_surface_with};
pub use windowing::{NativeWindowing, WindowingBridge};
