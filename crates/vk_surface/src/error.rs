//! Error types for surface creation

use ash::vk;
use std::ffi::CStr;
use thiserror::Error;

/// Failure modes of surface creation
///
/// Every error carries enough context to diagnose the failure without
/// re-running: the missing extension name, the unresolved entry-point name,
/// or the raw Vulkan result code.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// A required instance extension is absent from the instance's
    /// enabled-extension set. Recoverable only by recreating the instance
    /// with the extension enabled.
    #[error("required instance extension was not available: {}", .name.to_string_lossy())]
    ExtensionNotPresent {
        /// Name of the missing extension
        name: &'static CStr,
    },

    /// An instance-scoped entry point could not be resolved even though the
    /// capability checks passed. The runtime environment is inconsistent;
    /// treated as fatal for the call.
    #[error("instance entry point could not be resolved: {}", .name.to_string_lossy())]
    EntryPointNotFound {
        /// Name of the unresolvable command
        name: &'static CStr,
    },

    /// The native surface-creation call returned a non-success status code.
    /// The code is propagated verbatim and the call is never retried.
    #[error("native surface creation failed: {0:?}")]
    Creation(vk::Result),

    /// The window description does not match any supported windowing system.
    #[error("window source cannot be used to create a Vulkan surface")]
    UnsupportedSource,

    /// A native windowing-system call failed or is unavailable on this build.
    #[error("windowing system call failed: {reason}")]
    Windowing {
        /// Description of the failed call
        reason: String,
    },
}

/// Result type for surface operations
pub type SurfaceResult<T> = Result<T, SurfaceError>;
