/// Digital vibrance control (DVC) through the undocumented NVAPI entry points.
use std::rc::Rc;

use super::errors::{NvapiError, check_status};
use super::library::{DisplayHandle, Nvapi};
use super::status::{FunctionId, NvStatus};
use crate::vibrance::{VibranceError, VibranceProvider, VibranceState};

/// Output id passed alongside the display handle; 0 selects the display itself.
const DEFAULT_OUTPUT_ID: u32 = 0;

/// `NV_DISPLAY_DVC_INFO` as filled by `NvAPI_GetDVCInfo`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
struct DvcInfo {
    version: u32,
    current: i32,
    min: i32,
    max: i32,
}

impl DvcInfo {
    /// Structure version the driver expects: size in the low word, revision 1.
    #[allow(clippy::cast_possible_truncation)]
    const VERSION: u32 = size_of::<Self>() as u32 | 0x1_0000;

    fn request() -> Self {
        Self {
            version: Self::VERSION,
            ..Self::default()
        }
    }
}

impl From<DvcInfo> for VibranceState {
    fn from(info: DvcInfo) -> Self {
        Self {
            version: info.version,
            current: info.current,
            min: info.min,
            max: info.max,
        }
    }
}

type GetDvcInfoFn =
    unsafe extern "C" fn(handle: DisplayHandle, output_id: u32, info: *mut DvcInfo) -> NvStatus;
type SetDvcLevelFn =
    unsafe extern "C" fn(handle: DisplayHandle, output_id: u32, level: i32) -> NvStatus;

/// [`VibranceProvider`] backed by the NVIDIA driver for a single display.
///
/// Providers opened together share one NVAPI session; it is unloaded when
/// the last of them is dropped.
#[derive(Debug)]
pub struct NvapiProvider {
    handle: DisplayHandle,
    get_dvc_info: GetDvcInfoFn,
    set_dvc_level: SetDvcLevelFn,
    _nvapi: Rc<Nvapi>,
}

impl NvapiProvider {
    /// Initialize NVAPI and bind to the NVIDIA display at `display`.
    ///
    /// # Errors
    ///
    /// Returns `NvapiError` if the driver cannot be loaded, a DVC entry point
    /// is missing, or the display index does not exist.
    pub fn open(display: u32) -> Result<Self, NvapiError> {
        let nvapi = Rc::new(Nvapi::load()?);
        let handle = nvapi.display_handle(display)?;
        Self::bind(&nvapi, handle)
    }

    /// Initialize NVAPI once and bind a provider to every NVIDIA display.
    ///
    /// # Errors
    ///
    /// Returns `NvapiError` if the driver cannot be loaded, a DVC entry point
    /// is missing, or no display is found.
    pub fn open_all() -> Result<Vec<Self>, NvapiError> {
        let nvapi = Rc::new(Nvapi::load()?);
        nvapi
            .display_handles()?
            .into_iter()
            .map(|handle| Self::bind(&nvapi, handle))
            .collect()
    }

    fn bind(nvapi: &Rc<Nvapi>, handle: DisplayHandle) -> Result<Self, NvapiError> {
        // SAFETY: both aliases match the driver's DVC signatures.
        let get_dvc_info = unsafe { nvapi.function::<GetDvcInfoFn>(FunctionId::GetDvcInfo)? };
        let set_dvc_level = unsafe { nvapi.function::<SetDvcLevelFn>(FunctionId::SetDvcLevel)? };
        Ok(Self {
            handle,
            get_dvc_info,
            set_dvc_level,
            _nvapi: Rc::clone(nvapi),
        })
    }

    fn read_info(&self) -> Result<DvcInfo, NvapiError> {
        let mut info = DvcInfo::request();
        // SAFETY: `info` is a properly versioned out-struct; the handle came
        // from NvAPI_EnumNvidiaDisplayHandle on this session.
        let status = unsafe { (self.get_dvc_info)(self.handle, DEFAULT_OUTPUT_ID, &raw mut info) };
        check_status(status, FunctionId::GetDvcInfo.name())?;
        Ok(info)
    }

    fn write_level(&self, level: i32) -> Result<(), NvapiError> {
        // SAFETY: plain values; the handle belongs to this session.
        let status = unsafe { (self.set_dvc_level)(self.handle, DEFAULT_OUTPUT_ID, level) };
        check_status(status, FunctionId::SetDvcLevel.name())
    }

    /// Range-checked write against a fresh reading. Skips the driver call when
    /// the level is already current.
    fn apply(&self, level: i32) -> Result<(), VibranceError> {
        let state = VibranceState::from(self.read_info()?);
        if state.check_level(level)? {
            self.write_level(level)?;
        }
        Ok(())
    }
}

impl VibranceProvider for NvapiProvider {
    fn query(&self) -> Result<VibranceState, VibranceError> {
        Ok(self.read_info()?.into())
    }

    fn set(&mut self, level: i32) -> Result<(), VibranceError> {
        self.apply(level)
    }

    fn toggle(&mut self) -> Result<(), VibranceError> {
        let state: VibranceState = self.read_info()?.into();
        self.write_level(state.toggle_target())?;
        Ok(())
    }

    fn enable(&mut self) -> Result<(), VibranceError> {
        let info = self.read_info()?;
        self.apply(info.max)
    }

    fn disable(&mut self) -> Result<(), VibranceError> {
        let info = self.read_info()?;
        self.apply(info.min)
    }
}
