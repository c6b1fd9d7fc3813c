/// Runtime loading of the NVIDIA driver library and `nvapi_QueryInterface` lookup.
use std::ffi::c_void;

use libloading::Library;

use super::errors::{NvapiError, check_enumeration, check_status};
use super::status::{FunctionId, NVAPI_END_ENUMERATION, NvStatus};

/// Driver library shipped with the NVIDIA display driver.
#[cfg(target_pointer_width = "64")]
pub const LIBRARY_NAME: &str = "nvapi64.dll";
#[cfg(not(target_pointer_width = "64"))]
pub const LIBRARY_NAME: &str = "nvapi.dll";

/// Opaque `NvDisplayHandle`.
pub type DisplayHandle = *mut c_void;

type QueryInterfaceFn = unsafe extern "C" fn(id: u32) -> *const c_void;
type InitializeFn = unsafe extern "C" fn() -> NvStatus;
type UnloadFn = unsafe extern "C" fn() -> NvStatus;
type EnumNvidiaDisplayHandleFn =
    unsafe extern "C" fn(index: u32, handle: *mut DisplayHandle) -> NvStatus;

/// An initialized NVAPI session.
///
/// Holds the loaded library so every function pointer resolved through
/// [`Nvapi::function`] stays valid for the lifetime of this value.
/// `NvAPI_Unload` is called on drop, before the library is released.
pub struct Nvapi {
    query_interface: QueryInterfaceFn,
    _library: Library,
}

impl std::fmt::Debug for Nvapi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Nvapi")
            .field("library", &LIBRARY_NAME)
            .finish_non_exhaustive()
    }
}

impl Nvapi {
    /// Load the driver library and call `NvAPI_Initialize`.
    ///
    /// # Errors
    ///
    /// Returns `NvapiError::LibraryNotFound` if no NVIDIA driver is installed,
    /// `NvapiError::SymbolNotFound` / `NvapiError::FunctionUnavailable` if the
    /// library is incomplete, or `NvapiError::Status` if initialization fails.
    pub fn load() -> Result<Self, NvapiError> {
        // SAFETY: loading the driver library runs its DllMain, which has no
        // preconditions on our side.
        let library = unsafe { Library::new(LIBRARY_NAME) }.map_err(|source| {
            NvapiError::LibraryNotFound {
                name: LIBRARY_NAME,
                source,
            }
        })?;

        // SAFETY: `nvapi_QueryInterface` takes a u32 id and returns a pointer.
        let query_interface = unsafe { library.get::<QueryInterfaceFn>(b"nvapi_QueryInterface\0") }
            .map(|symbol| *symbol)
            .map_err(|source| NvapiError::SymbolNotFound {
                symbol: "nvapi_QueryInterface",
                source,
            })?;

        let nvapi = Self {
            query_interface,
            _library: library,
        };

        // SAFETY: `InitializeFn` matches the NvAPI_Initialize signature.
        let initialize: InitializeFn = unsafe { nvapi.function(FunctionId::Initialize)? };
        // SAFETY: no arguments; the library is loaded.
        check_status(unsafe { initialize() }, FunctionId::Initialize.name())?;

        Ok(nvapi)
    }

    /// Resolve a driver function by interface id.
    ///
    /// # Safety
    ///
    /// `F` must be an `unsafe extern "C" fn` type whose signature matches the
    /// driver function behind `id`.
    ///
    /// # Errors
    ///
    /// Returns `NvapiError::FunctionUnavailable` if the driver returns null.
    pub unsafe fn function<F: Copy>(&self, id: FunctionId) -> Result<F, NvapiError> {
        debug_assert_eq!(size_of::<F>(), size_of::<*const c_void>());

        // SAFETY: `query_interface` was resolved from the loaded library.
        let ptr = unsafe { (self.query_interface)(id.id()) };
        if ptr.is_null() {
            return Err(NvapiError::FunctionUnavailable { name: id.name() });
        }
        // SAFETY: non-null code pointer; the caller guarantees `F` matches.
        Ok(unsafe { std::mem::transmute_copy::<*const c_void, F>(&ptr) })
    }

    /// Handle for the NVIDIA display at `index` (zero-based, driver order).
    ///
    /// # Errors
    ///
    /// Returns `NvapiError::Status` with `NVAPI_END_ENUMERATION` when `index`
    /// is past the last display, or any other enumeration failure.
    pub fn display_handle(&self, index: u32) -> Result<DisplayHandle, NvapiError> {
        // SAFETY: signature matches NvAPI_EnumNvidiaDisplayHandle.
        let enumerate: EnumNvidiaDisplayHandleFn =
            unsafe { self.function(FunctionId::EnumNvidiaDisplayHandle)? };

        let mut handle: DisplayHandle = std::ptr::null_mut();
        // SAFETY: `handle` is a valid out-pointer for the duration of the call.
        let status = unsafe { enumerate(index, &raw mut handle) };
        check_status(status, FunctionId::EnumNvidiaDisplayHandle.name())?;
        Ok(handle)
    }

    /// Handles for every NVIDIA display, in driver order.
    ///
    /// Enumerates indices from 0 until the driver reports
    /// `NVAPI_END_ENUMERATION`.
    ///
    /// # Errors
    ///
    /// Returns `NvapiError::Status` if enumeration fails, including when no
    /// display is found at all.
    pub fn display_handles(&self) -> Result<Vec<DisplayHandle>, NvapiError> {
        // SAFETY: signature matches NvAPI_EnumNvidiaDisplayHandle.
        let enumerate: EnumNvidiaDisplayHandleFn =
            unsafe { self.function(FunctionId::EnumNvidiaDisplayHandle)? };
        let call = FunctionId::EnumNvidiaDisplayHandle.name();

        let mut handles = Vec::new();
        for index in 0.. {
            let mut handle: DisplayHandle = std::ptr::null_mut();
            // SAFETY: `handle` is a valid out-pointer for the duration of the call.
            let status = unsafe { enumerate(index, &raw mut handle) };
            if !check_enumeration(status, call)? {
                break;
            }
            handles.push(handle);
        }

        if handles.is_empty() {
            return Err(NvapiError::Status {
                call,
                status: NVAPI_END_ENUMERATION,
            });
        }
        Ok(handles)
    }
}

impl Drop for Nvapi {
    fn drop(&mut self) {
        // SAFETY: signature matches NvAPI_Unload; the library is still loaded.
        if let Ok(unload) = unsafe { self.function::<UnloadFn>(FunctionId::Unload) } {
            // SAFETY: no arguments. A failed unload is not actionable here.
            let _ = unsafe { unload() };
        }
    }
}
