#![cfg(windows)]

use windows::core::Interface;
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Direct3D::{D3D_DRIVER_TYPE, D3D_FEATURE_LEVEL};
use windows::Win32::Graphics::Direct3D11::{
    D3D11CreateDeviceAndSwapChain, ID3D11DepthStencilView, ID3D11Device, ID3D11DeviceContext,
    ID3D11RenderTargetView, ID3D11Texture2D, D3D11_CREATE_DEVICE_FLAG, D3D11_TEXTURE2D_DESC,
};
use windows::Win32::Graphics::Dxgi::Common::{
    DXGI_FORMAT, DXGI_MODE_DESC, DXGI_MODE_SCALING, DXGI_MODE_SCANLINE_ORDER, DXGI_RATIONAL,
    DXGI_SAMPLE_DESC,
};
use windows::Win32::Graphics::Dxgi::{
    CreateDXGIFactory1, IDXGIAdapter, IDXGIAdapter1, IDXGIFactory1, IDXGIOutput, IDXGISwapChain,
    DXGI_SWAP_CHAIN_DESC, DXGI_SWAP_EFFECT, DXGI_USAGE,
};
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;

use crate::backend::{
    Backend, D3D11Device, DeviceAndSwapChain, DeviceContext, DxgiAdapter, DxgiOutput,
    DxgiSwapChain, Texture2D,
};
use crate::desc::{
    AdapterDesc, DeviceCreateInfo, DxgiFormat, FeatureLevel, ModeDesc, OutputDesc, Rational,
    SampleDesc, Scaling, ScanlineOrder, SwapChainDesc, Texture2DDesc,
};
use crate::error::{InteropError, InteropResult};
use crate::foundation::{Hmonitor, Hwnd, Luid, Rect, DXGI_ERROR_NOT_FOUND, E_FAIL, HRESULT};

fn failed(call: &'static str) -> impl FnOnce(windows::core::Error) -> InteropError {
    move |err| InteropError::new(call, HRESULT(err.code().0))
}

fn hwnd(window: Hwnd) -> HWND {
    HWND(window.0 as _)
}

/// The system compositor and Direct3D 11 runtime.
pub struct Win32Backend {
    factory: IDXGIFactory1,
}

impl Win32Backend {
    pub fn new() -> InteropResult<Self> {
        let factory: IDXGIFactory1 =
            unsafe { CreateDXGIFactory1() }.map_err(failed("CreateDXGIFactory1"))?;
        Ok(Self { factory })
    }
}

impl Backend for Win32Backend {
    type Adapter = IDXGIAdapter1;
    type Output = IDXGIOutput;
    type Device = ID3D11Device;
    type Context = ID3D11DeviceContext;
    type SwapChain = IDXGISwapChain;
    type Texture2D = ID3D11Texture2D;
    type RenderTargetView = ID3D11RenderTargetView;
    type DepthStencilView = ID3D11DepthStencilView;

    fn enum_adapters(&self) -> InteropResult<Vec<IDXGIAdapter1>> {
        let mut adapters = Vec::new();

        for index in 0.. {
            match unsafe { self.factory.EnumAdapters1(index) } {
                Ok(adapter) => adapters.push(adapter),
                Err(err) if err.code().0 == DXGI_ERROR_NOT_FOUND.0 => break,
                Err(err) => return Err(failed("IDXGIFactory1::EnumAdapters1")(err)),
            }
        }

        Ok(adapters)
    }

    fn client_rect(&self, window: Hwnd) -> InteropResult<Rect> {
        let mut rect = RECT::default();
        unsafe { GetClientRect(hwnd(window), &mut rect) }.map_err(failed("GetClientRect"))?;
        Ok(Rect::new(rect.left, rect.top, rect.right, rect.bottom))
    }

    fn create_device_and_swap_chain(
        &self,
        adapter: &IDXGIAdapter1,
        info: &DeviceCreateInfo,
        desc: &SwapChainDesc,
    ) -> InteropResult<DeviceAndSwapChain<Self>> {
        const CALL: &str = "D3D11CreateDeviceAndSwapChain";

        let adapter: IDXGIAdapter = adapter
            .cast()
            .map_err(failed("IDXGIAdapter1::QueryInterface"))?;

        let levels: Vec<D3D_FEATURE_LEVEL> = info
            .feature_levels
            .iter()
            .map(|level| D3D_FEATURE_LEVEL(*level as i32))
            .collect();

        let raw_desc = DXGI_SWAP_CHAIN_DESC {
            BufferDesc: to_raw_mode(&desc.buffer_desc),
            SampleDesc: DXGI_SAMPLE_DESC {
                Count: desc.sample_desc.count,
                Quality: desc.sample_desc.quality,
            },
            BufferUsage: DXGI_USAGE(desc.buffer_usage),
            BufferCount: desc.buffer_count,
            OutputWindow: hwnd(desc.output_window),
            Windowed: desc.windowed.into(),
            SwapEffect: DXGI_SWAP_EFFECT(desc.swap_effect as i32),
            Flags: desc.flags,
        };

        let mut swap_chain: Option<IDXGISwapChain> = None;
        let mut device: Option<ID3D11Device> = None;
        let mut context: Option<ID3D11DeviceContext> = None;
        let mut level = D3D_FEATURE_LEVEL::default();

        unsafe {
            D3D11CreateDeviceAndSwapChain(
                &adapter,
                D3D_DRIVER_TYPE(info.driver_type as i32),
                None,
                D3D11_CREATE_DEVICE_FLAG(info.flags as _),
                (!levels.is_empty()).then_some(levels.as_slice()),
                info.sdk_version,
                Some(&raw_desc),
                Some(&mut swap_chain),
                Some(&mut device),
                Some(&mut level),
                Some(&mut context),
            )
        }
        .map_err(failed(CALL))?;

        let missing = || InteropError::new(CALL, E_FAIL);
        Ok(DeviceAndSwapChain {
            swap_chain: swap_chain.ok_or_else(missing)?,
            device: device.ok_or_else(missing)?,
            feature_level: feature_level(level),
            context: context.ok_or_else(missing)?,
        })
    }
}

fn feature_level(level: D3D_FEATURE_LEVEL) -> FeatureLevel {
    match level.0 {
        0x9100 => FeatureLevel::Level9_1,
        0x9200 => FeatureLevel::Level9_2,
        0x9300 => FeatureLevel::Level9_3,
        0xa000 => FeatureLevel::Level10_0,
        0xa100 => FeatureLevel::Level10_1,
        0xb100 => FeatureLevel::Level11_1,
        _ => FeatureLevel::Level11_0,
    }
}

fn to_raw_mode(mode: &ModeDesc) -> DXGI_MODE_DESC {
    DXGI_MODE_DESC {
        Width: mode.width,
        Height: mode.height,
        RefreshRate: DXGI_RATIONAL {
            Numerator: mode.refresh_rate.numerator,
            Denominator: mode.refresh_rate.denominator,
        },
        Format: DXGI_FORMAT(mode.format.0 as i32),
        ScanlineOrdering: DXGI_MODE_SCANLINE_ORDER(mode.scanline_ordering as i32),
        Scaling: DXGI_MODE_SCALING(mode.scaling as i32),
    }
}

fn from_raw_mode(raw: &DXGI_MODE_DESC) -> ModeDesc {
    ModeDesc {
        width: raw.Width,
        height: raw.Height,
        refresh_rate: Rational::new(raw.RefreshRate.Numerator, raw.RefreshRate.Denominator),
        format: DxgiFormat(raw.Format.0 as u32),
        scanline_ordering: match raw.ScanlineOrdering.0 {
            1 => ScanlineOrder::Progressive,
            2 => ScanlineOrder::UpperFieldFirst,
            3 => ScanlineOrder::LowerFieldFirst,
            _ => ScanlineOrder::Unspecified,
        },
        scaling: match raw.Scaling.0 {
            1 => Scaling::Centered,
            2 => Scaling::Stretched,
            _ => Scaling::Unspecified,
        },
    }
}

impl DxgiAdapter<Win32Backend> for IDXGIAdapter1 {
    fn enum_outputs(&self, index: u32) -> InteropResult<IDXGIOutput> {
        unsafe { self.EnumOutputs(index) }.map_err(failed("IDXGIAdapter::EnumOutputs"))
    }

    fn desc1(&self) -> InteropResult<AdapterDesc> {
        let raw = unsafe { self.GetDesc1() }.map_err(failed("IDXGIAdapter1::GetDesc1"))?;

        Ok(AdapterDesc {
            description: raw.Description,
            vendor_id: raw.VendorId,
            device_id: raw.DeviceId,
            sub_sys_id: raw.SubSysId,
            revision: raw.Revision,
            dedicated_video_memory: raw.DedicatedVideoMemory,
            dedicated_system_memory: raw.DedicatedSystemMemory,
            shared_system_memory: raw.SharedSystemMemory,
            adapter_luid: Luid::new(raw.AdapterLuid.LowPart, raw.AdapterLuid.HighPart),
            flags: raw.Flags,
        })
    }
}

impl DxgiOutput for IDXGIOutput {
    fn desc(&self) -> InteropResult<OutputDesc> {
        let raw = unsafe { self.GetDesc() }.map_err(failed("IDXGIOutput::GetDesc"))?;
        let name_len = raw
            .DeviceName
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(raw.DeviceName.len());
        let coords = raw.DesktopCoordinates;

        Ok(OutputDesc {
            device_name: String::from_utf16_lossy(&raw.DeviceName[..name_len]),
            desktop_coordinates: Rect::new(coords.left, coords.top, coords.right, coords.bottom),
            attached_to_desktop: raw.AttachedToDesktop.as_bool(),
            monitor: Hmonitor(raw.Monitor.0 as isize),
        })
    }

    fn display_mode_list(
        &self,
        format: DxgiFormat,
        flags: u32,
        count: &mut u32,
        modes: Option<&mut [ModeDesc]>,
    ) -> InteropResult<()> {
        const CALL: &str = "IDXGIOutput::GetDisplayModeList";
        let format = DXGI_FORMAT(format.0 as i32);

        let Some(buffer) = modes else {
            return unsafe { self.GetDisplayModeList(format, flags, count, None) }
                .map_err(failed(CALL));
        };

        *count = (*count).min(buffer.len() as u32);
        let mut raw = vec![DXGI_MODE_DESC::default(); *count as usize];
        unsafe { self.GetDisplayModeList(format, flags, count, Some(raw.as_mut_ptr())) }
            .map_err(failed(CALL))?;

        for (slot, mode) in buffer.iter_mut().zip(&raw[..*count as usize]) {
            *slot = from_raw_mode(mode);
        }
        Ok(())
    }
}

impl DxgiSwapChain<Win32Backend> for IDXGISwapChain {
    fn buffer(&self, index: u32) -> InteropResult<ID3D11Texture2D> {
        unsafe { self.GetBuffer::<ID3D11Texture2D>(index) }
            .map_err(failed("IDXGISwapChain::GetBuffer"))
    }
}

impl D3D11Device<Win32Backend> for ID3D11Device {
    fn create_render_target_view(
        &self,
        resource: &ID3D11Texture2D,
    ) -> InteropResult<ID3D11RenderTargetView> {
        const CALL: &str = "ID3D11Device::CreateRenderTargetView";

        let mut view = None;
        unsafe { self.CreateRenderTargetView(resource, None, Some(&mut view)) }
            .map_err(failed(CALL))?;
        view.ok_or_else(|| InteropError::new(CALL, E_FAIL))
    }

    fn create_depth_stencil_view(
        &self,
        resource: &ID3D11Texture2D,
    ) -> InteropResult<ID3D11DepthStencilView> {
        const CALL: &str = "ID3D11Device::CreateDepthStencilView";

        let mut view = None;
        unsafe { self.CreateDepthStencilView(resource, None, Some(&mut view)) }
            .map_err(failed(CALL))?;
        view.ok_or_else(|| InteropError::new(CALL, E_FAIL))
    }
}

impl DeviceContext<Win32Backend> for ID3D11DeviceContext {
    fn om_set_render_targets(
        &self,
        render_targets: &[Option<ID3D11RenderTargetView>],
        depth_stencil: Option<&ID3D11DepthStencilView>,
    ) {
        unsafe { self.OMSetRenderTargets(Some(render_targets), depth_stencil) }
    }
}

impl Texture2D for ID3D11Texture2D {
    fn desc(&self) -> Texture2DDesc {
        let mut raw = D3D11_TEXTURE2D_DESC::default();
        unsafe { self.GetDesc(&mut raw) };

        Texture2DDesc {
            width: raw.Width,
            height: raw.Height,
            mip_levels: raw.MipLevels,
            array_size: raw.ArraySize,
            format: DxgiFormat(raw.Format.0 as u32),
            sample_desc: SampleDesc {
                count: raw.SampleDesc.Count,
                quality: raw.SampleDesc.Quality,
            },
            bind_flags: raw.BindFlags as u32,
        }
    }
}
