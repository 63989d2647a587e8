//! Descriptor records exchanged with the compositor and the modern device.

use crate::foundation::{Hmonitor, Hwnd, Luid, Rect};

/// Compositor pixel format (`DXGI_FORMAT`).
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DxgiFormat(pub u32);

impl DxgiFormat {
    pub const UNKNOWN: Self = Self(0);
    pub const R16G16B16A16_FLOAT: Self = Self(10);
    pub const R10G10B10A2_UNORM: Self = Self(24);
    pub const R8G8B8A8_UNORM: Self = Self(28);
    pub const D32_FLOAT: Self = Self(40);
    pub const D24_UNORM_S8_UINT: Self = Self(45);
    pub const D16_UNORM: Self = Self(55);
    pub const B5G6R5_UNORM: Self = Self(85);
    pub const B5G5R5A1_UNORM: Self = Self(86);
    pub const B8G8R8A8_UNORM: Self = Self(87);
    pub const B8G8R8X8_UNORM: Self = Self(88);
    pub const B4G4R4A4_UNORM: Self = Self(115);

    pub fn is_depth(self) -> bool {
        matches!(
            self,
            Self::D32_FLOAT | Self::D24_UNORM_S8_UINT | Self::D16_UNORM
        )
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rational {
    pub numerator: u32,
    pub denominator: u32,
}

impl Rational {
    pub const fn new(numerator: u32, denominator: u32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Whole hertz, truncated. A zero denominator yields zero.
    pub fn whole_hz(self) -> u32 {
        self.numerator.checked_div(self.denominator).unwrap_or(0)
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanlineOrder {
    #[default]
    Unspecified = 0,
    Progressive = 1,
    UpperFieldFirst = 2,
    LowerFieldFirst = 3,
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scaling {
    #[default]
    Unspecified = 0,
    Centered = 1,
    Stretched = 2,
}

/// One display mode (`DXGI_MODE_DESC`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeDesc {
    pub width: u32,
    pub height: u32,
    pub refresh_rate: Rational,
    pub format: DxgiFormat,
    pub scanline_ordering: ScanlineOrder,
    pub scaling: Scaling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleDesc {
    pub count: u32,
    pub quality: u32,
}

impl Default for SampleDesc {
    fn default() -> Self {
        Self {
            count: 1,
            quality: 0,
        }
    }
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SwapEffect {
    #[default]
    Discard = 0,
    Sequential = 1,
    FlipSequential = 3,
    FlipDiscard = 4,
}

/// `DXGI_USAGE` bits.
pub mod usage {
    pub const SHADER_INPUT: u32 = 0x10;
    pub const RENDER_TARGET_OUTPUT: u32 = 0x20;
    pub const BACK_BUFFER: u32 = 0x40;
}

/// Swap chain creation parameters (`DXGI_SWAP_CHAIN_DESC`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SwapChainDesc {
    pub buffer_desc: ModeDesc,
    pub sample_desc: SampleDesc,
    pub buffer_usage: u32,
    pub buffer_count: u32,
    pub output_window: Hwnd,
    pub windowed: bool,
    pub swap_effect: SwapEffect,
    pub flags: u32,
}

/// Adapter description (`DXGI_ADAPTER_DESC1`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterDesc {
    pub description: [u16; 128],
    pub vendor_id: u32,
    pub device_id: u32,
    pub sub_sys_id: u32,
    pub revision: u32,
    pub dedicated_video_memory: usize,
    pub dedicated_system_memory: usize,
    pub shared_system_memory: usize,
    pub adapter_luid: Luid,
    pub flags: u32,
}

impl Default for AdapterDesc {
    fn default() -> Self {
        Self {
            description: [0; 128],
            vendor_id: 0,
            device_id: 0,
            sub_sys_id: 0,
            revision: 0,
            dedicated_video_memory: 0,
            dedicated_system_memory: 0,
            shared_system_memory: 0,
            adapter_luid: Luid::default(),
            flags: 0,
        }
    }
}

impl AdapterDesc {
    /// Stores `name` as a NUL-terminated UTF-16 description, truncating if needed.
    pub fn set_description(&mut self, name: &str) {
        self.description = [0; 128];
        let max = self.description.len() - 1;
        for (slot, unit) in self.description[..max].iter_mut().zip(name.encode_utf16()) {
            *slot = unit;
        }
    }

    /// The description up to its first NUL.
    pub fn description(&self) -> String {
        let len = self
            .description
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(self.description.len());
        String::from_utf16_lossy(&self.description[..len])
    }
}

/// Output description (`DXGI_OUTPUT_DESC`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutputDesc {
    pub device_name: String,
    pub desktop_coordinates: Rect,
    pub attached_to_desktop: bool,
    pub monitor: Hmonitor,
}

/// Description of a 2D texture (`D3D11_TEXTURE2D_DESC`, the fields we need).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Texture2DDesc {
    pub width: u32,
    pub height: u32,
    pub mip_levels: u32,
    pub array_size: u32,
    pub format: DxgiFormat,
    pub sample_desc: SampleDesc,
    pub bind_flags: u32,
}

/// `D3D11_BIND_FLAG` bits.
pub mod bind {
    pub const SHADER_RESOURCE: u32 = 0x8;
    pub const RENDER_TARGET: u32 = 0x20;
    pub const DEPTH_STENCIL: u32 = 0x40;
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DriverType {
    #[default]
    Unknown = 0,
    Hardware = 1,
    Reference = 2,
    Null = 3,
    Software = 4,
    Warp = 5,
}

#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum FeatureLevel {
    Level9_1 = 0x9100,
    Level9_2 = 0x9200,
    Level9_3 = 0x9300,
    Level10_0 = 0xa000,
    Level10_1 = 0xa100,
    Level11_0 = 0xb000,
    Level11_1 = 0xb100,
}

/// `D3D11_SDK_VERSION`.
pub const D3D11_SDK_VERSION: u32 = 7;

/// Arguments to the combined device + swap chain factory call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceCreateInfo {
    pub driver_type: DriverType,
    pub flags: u32,
    /// Empty selects the runtime's default feature level list.
    pub feature_levels: Vec<FeatureLevel>,
    pub sdk_version: u32,
}

impl Default for DeviceCreateInfo {
    fn default() -> Self {
        Self {
            driver_type: DriverType::Unknown,
            flags: 0,
            feature_levels: Vec::new(),
            sdk_version: D3D11_SDK_VERSION,
        }
    }
}
