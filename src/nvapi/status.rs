//! `NvAPI_Status` codes and the `nvapi_QueryInterface` function ids used here.

/// Raw `NvAPI_Status` as returned by every driver call.
pub type NvStatus = i32;

pub const NVAPI_OK: NvStatus = 0;
/// Returned by enumeration calls once the index is past the last item.
pub const NVAPI_END_ENUMERATION: NvStatus = -7;

/// Readable name for an `NvAPI_Status` value.
#[must_use]
pub fn status_name(status: NvStatus) -> &'static str {
    match status {
        0 => "NVAPI_OK",
        -1 => "NVAPI_ERROR",
        -2 => "NVAPI_LIBRARY_NOT_FOUND",
        -3 => "NVAPI_NO_IMPLEMENTATION",
        -4 => "NVAPI_API_NOT_INITIALIZED",
        -5 => "NVAPI_INVALID_ARGUMENT",
        -6 => "NVAPI_NVIDIA_DEVICE_NOT_FOUND",
        -7 => "NVAPI_END_ENUMERATION",
        -8 => "NVAPI_INVALID_HANDLE",
        -9 => "NVAPI_INCOMPATIBLE_STRUCT_VERSION",
        -10 => "NVAPI_HANDLE_INVALIDATED",
        _ => "unknown NVAPI status",
    }
}

/// Driver entry points resolved through `nvapi_QueryInterface`.
///
/// The DVC ids are undocumented; they are the ones every vibrance tool uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionId {
    Initialize,
    Unload,
    EnumNvidiaDisplayHandle,
    GetDvcInfo,
    SetDvcLevel,
}

impl FunctionId {
    /// Interface id passed to `nvapi_QueryInterface`.
    #[must_use]
    pub fn id(self) -> u32 {
        match self {
            Self::Initialize => 0x0150_E828,
            Self::Unload => 0xD22B_DD7E,
            Self::EnumNvidiaDisplayHandle => 0x9ABD_D40D,
            Self::GetDvcInfo => 0x4085_DE45,
            Self::SetDvcLevel => 0x1724_09B4,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Initialize => "NvAPI_Initialize",
            Self::Unload => "NvAPI_Unload",
            Self::EnumNvidiaDisplayHandle => "NvAPI_EnumNvidiaDisplayHandle",
            Self::GetDvcInfo => "NvAPI_GetDVCInfo",
            Self::SetDvcLevel => "NvAPI_SetDVCLevel",
        }
    }
}
