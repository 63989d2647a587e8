//! Legacy Direct3D 9 ABI records and constants.
//!
//! Layouts follow `d3d9types.h` / `d3d9caps.h` so these records can be
//! handed to a host process unchanged. Field names keep the SDK spelling.

#![allow(non_snake_case, non_camel_case_types)]

use dxgi_interop::{Guid, Hwnd, HRESULT};

pub use dxgi_interop::{E_FAIL, E_NOINTERFACE, S_OK};

// ============================================================================
// Result codes
// ============================================================================

pub const D3D_OK: HRESULT = S_OK;
pub const D3DERR_NOTFOUND: HRESULT = HRESULT::from_u32(0x8876_0866);
pub const D3DERR_NOTAVAILABLE: HRESULT = HRESULT::from_u32(0x8876_086A);
pub const D3DERR_INVALIDCALL: HRESULT = HRESULT::from_u32(0x8876_086C);

// ============================================================================
// Interface ids
// ============================================================================

pub const IID_IUNKNOWN: Guid = Guid::from_u128(0x00000000_0000_0000_c000_000000000046);
pub const IID_IDIRECT3D9: Guid = Guid::from_u128(0x81bdcbca_64d4_426d_ae8d_ad0147f4275c);
pub const IID_IDIRECT3DDEVICE9: Guid = Guid::from_u128(0xd0223b96_bf7a_43fd_92bd_a43b0d82b9eb);
pub const IID_IDIRECT3DRESOURCE9: Guid = Guid::from_u128(0x05eec05d_8f7d_4362_b999_d1baf357c704);
pub const IID_IDIRECT3DSURFACE9: Guid = Guid::from_u128(0x0cfbaf3a_9ff6_429a_99b3_a2796af8b89b);

/// `D3D_SDK_VERSION` for the 9.0c runtime.
pub const D3D_SDK_VERSION: u32 = 32;

// ============================================================================
// Enumerations
// ============================================================================

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct D3DFORMAT(pub u32);

impl D3DFORMAT {
    pub const UNKNOWN: Self = Self(0);
    pub const R8G8B8: Self = Self(20);
    pub const A8R8G8B8: Self = Self(21);
    pub const X8R8G8B8: Self = Self(22);
    pub const R5G6B5: Self = Self(23);
    pub const X1R5G5B5: Self = Self(24);
    pub const A1R5G5B5: Self = Self(25);
    pub const A4R4G4B4: Self = Self(26);
    pub const A2B10G10R10: Self = Self(31);
    pub const A8B8G8R8: Self = Self(32);
    pub const X8B8G8R8: Self = Self(33);
    pub const A2R10G10B10: Self = Self(35);
    pub const D16_LOCKABLE: Self = Self(70);
    pub const D32: Self = Self(71);
    pub const D24S8: Self = Self(75);
    pub const D24X8: Self = Self(77);
    pub const D16: Self = Self(80);
    pub const D32F_LOCKABLE: Self = Self(82);
    pub const A16B16G16R16F: Self = Self(113);
}

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DSWAPEFFECT(pub u32);

impl D3DSWAPEFFECT {
    pub const DISCARD: Self = Self(1);
    pub const FLIP: Self = Self(2);
    pub const COPY: Self = Self(3);
    pub const OVERLAY: Self = Self(4);
    pub const FLIPEX: Self = Self(5);
}

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DMULTISAMPLE_TYPE(pub u32);

impl D3DMULTISAMPLE_TYPE {
    pub const NONE: Self = Self(0);
    pub const NONMASKABLE: Self = Self(1);
    pub const SAMPLES_2: Self = Self(2);
    pub const SAMPLES_4: Self = Self(4);
    pub const SAMPLES_8: Self = Self(8);
    pub const SAMPLES_16: Self = Self(16);
}

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DDEVTYPE(pub u32);

impl D3DDEVTYPE {
    pub const HAL: Self = Self(1);
    pub const REF: Self = Self(2);
    pub const SW: Self = Self(3);
    pub const NULLREF: Self = Self(4);
}

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DRESOURCETYPE(pub u32);

impl D3DRESOURCETYPE {
    pub const SURFACE: Self = Self(1);
    pub const TEXTURE: Self = Self(3);
}

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DPOOL(pub u32);

impl D3DPOOL {
    pub const DEFAULT: Self = Self(0);
    pub const MANAGED: Self = Self(1);
    pub const SYSTEMMEM: Self = Self(2);
}

#[repr(transparent)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DBACKBUFFER_TYPE(pub u32);

impl D3DBACKBUFFER_TYPE {
    pub const MONO: Self = Self(0);
    pub const LEFT: Self = Self(1);
    pub const RIGHT: Self = Self(2);
}

pub const D3DUSAGE_RENDERTARGET: u32 = 0x0000_0001;
pub const D3DUSAGE_DEPTHSTENCIL: u32 = 0x0000_0002;

/// Win32 `BOOL`.
pub type BOOL = i32;
pub const TRUE: BOOL = 1;
pub const FALSE: BOOL = 0;

// ============================================================================
// Records
// ============================================================================

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DPRESENT_PARAMETERS {
    pub BackBufferWidth: u32,
    pub BackBufferHeight: u32,
    pub BackBufferFormat: D3DFORMAT,
    pub BackBufferCount: u32,
    pub MultiSampleType: D3DMULTISAMPLE_TYPE,
    pub MultiSampleQuality: u32,
    pub SwapEffect: D3DSWAPEFFECT,
    pub hDeviceWindow: Hwnd,
    pub Windowed: BOOL,
    pub EnableAutoDepthStencil: BOOL,
    pub AutoDepthStencilFormat: D3DFORMAT,
    pub Flags: u32,
    pub FullScreen_RefreshRateInHz: u32,
    pub PresentationInterval: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DDEVICE_CREATION_PARAMETERS {
    pub AdapterOrdinal: u32,
    pub DeviceType: D3DDEVTYPE,
    pub hFocusWindow: Hwnd,
    pub BehaviorFlags: u32,
}

pub const MAX_DEVICE_IDENTIFIER_STRING: usize = 512;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct D3DADAPTER_IDENTIFIER9 {
    pub Driver: [u8; MAX_DEVICE_IDENTIFIER_STRING],
    pub Description: [u8; MAX_DEVICE_IDENTIFIER_STRING],
    pub DeviceName: [u8; 32],
    pub DriverVersion: i64,
    pub VendorId: u32,
    pub DeviceId: u32,
    pub SubSysId: u32,
    pub Revision: u32,
    pub DeviceIdentifier: Guid,
    pub WHQLLevel: u32,
}

impl Default for D3DADAPTER_IDENTIFIER9 {
    fn default() -> Self {
        Self {
            Driver: [0; MAX_DEVICE_IDENTIFIER_STRING],
            Description: [0; MAX_DEVICE_IDENTIFIER_STRING],
            DeviceName: [0; 32],
            DriverVersion: 0,
            VendorId: 0,
            DeviceId: 0,
            SubSysId: 0,
            Revision: 0,
            DeviceIdentifier: Guid::zeroed(),
            WHQLLevel: 0,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DDISPLAYMODE {
    pub Width: u32,
    pub Height: u32,
    pub RefreshRate: u32,
    pub Format: D3DFORMAT,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DSURFACE_DESC {
    pub Format: D3DFORMAT,
    pub Type: D3DRESOURCETYPE,
    pub Usage: u32,
    pub Pool: D3DPOOL,
    pub MultiSampleType: D3DMULTISAMPLE_TYPE,
    pub MultiSampleQuality: u32,
    pub Width: u32,
    pub Height: u32,
}

// ============================================================================
// Fixed-capacity strings
// ============================================================================

/// Copies `src` into a zero-filled fixed buffer, always leaving a trailing NUL.
pub fn write_fixed_str(dst: &mut [u8], src: &str) {
    dst.fill(0);
    let len = src.len().min(dst.len().saturating_sub(1));
    dst[..len].copy_from_slice(&src.as_bytes()[..len]);
}

/// Reads a NUL-terminated fixed buffer back as text.
pub fn read_fixed_str(src: &[u8]) -> String {
    let len = src.iter().position(|&b| b == 0).unwrap_or(src.len());
    String::from_utf8_lossy(&src[..len]).into_owned()
}
