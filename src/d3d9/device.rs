//! The legacy device, backed by a modern device, immediate context and swap
//! chain created together from the caller's presentation parameters.
//!
//! The device owns its default render target and the currently bound
//! depth-stencil surface, and keeps the immediate context's output merger in
//! sync with both through [`Device::update_om_views`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use dxgi_interop::{
    usage, Backend, DeviceAndSwapChain, DeviceContext, DeviceCreateInfo, DxgiSwapChain,
    FeatureLevel, Guid, ModeDesc, Rational, SampleDesc, Scaling, ScanlineOrder, SwapChainDesc,
    SwapEffect, HRESULT,
};

use super::adapter::Adapter;
use super::caps::{fill_caps, D3DCAPS9};
use super::format::surface_format_to_dxgi;
use super::interface::Direct3D9;
use super::surface::{Surface, SurfaceUsage, SurfaceView};
use super::types::{
    D3DBACKBUFFER_TYPE, D3DDEVICE_CREATION_PARAMETERS, D3DERR_INVALIDCALL, D3DERR_NOTFOUND,
    D3DMULTISAMPLE_TYPE, D3DPRESENT_PARAMETERS, D3DSWAPEFFECT, D3D_OK, E_NOINTERFACE, FALSE,
    IID_IDIRECT3DDEVICE9, IID_IUNKNOWN, S_OK,
};
use crate::error::{ShimError, ShimResult};

/// Used unless a fullscreen rate is requested. Windowed devices should use
/// the desktop rate instead, which is not queried yet.
const DEFAULT_REFRESH_RATE: Rational = Rational::new(60, 1);

/// Only the single-buffer DISCARD path is supported, so the swap chain never
/// gets more than one back buffer.
const MAX_BACK_BUFFERS: u32 = 1;

pub struct Device<B: Backend> {
    parent: Weak<Direct3D9<B>>,
    adapter: Weak<Adapter<B>>,
    creation_params: D3DDEVICE_CREATION_PARAMETERS,

    device: B::Device,
    context: B::Context,
    swap_chain: B::SwapChain,
    feature_level: FeatureLevel,

    back_buffer: Rc<Surface<B>>,
    render_target: RefCell<Rc<Surface<B>>>,
    depth_stencil: RefCell<Option<Rc<Surface<B>>>>,
}

impl<B: Backend> Device<B> {
    /// Creates the device and its swap chain.
    ///
    /// `pp` is updated with the back buffer size and count actually used.
    /// Nothing is handed out unless every step succeeds.
    pub fn new(
        parent: &Rc<Direct3D9<B>>,
        adapter: &Rc<Adapter<B>>,
        creation_params: D3DDEVICE_CREATION_PARAMETERS,
        pp: &mut D3DPRESENT_PARAMETERS,
    ) -> ShimResult<Rc<Self>> {
        let backend = parent.backend();
        let dxgi_adapter = adapter.adapter();

        // The focus window is only a fallback for the back buffer window.
        let window = if pp.hDeviceWindow.is_null() {
            creation_params.hFocusWindow
        } else {
            pp.hDeviceWindow
        };

        if pp.BackBufferWidth == 0 || pp.BackBufferHeight == 0 {
            let client = backend.client_rect(window).map_err(|e| {
                ShimError::DeviceCreateFailed(format!("no client area for {:?}: {}", window, e))
            })?;
            pp.BackBufferWidth = client.width();
            pp.BackBufferHeight = client.height();
        }

        let refresh_rate = if pp.Windowed == FALSE && pp.FullScreen_RefreshRateInHz != 0 {
            Rational::new(pp.FullScreen_RefreshRateInHz, 1)
        } else {
            DEFAULT_REFRESH_RATE
        };

        let mode = ModeDesc {
            width: pp.BackBufferWidth,
            height: pp.BackBufferHeight,
            refresh_rate,
            format: surface_format_to_dxgi(pp.BackBufferFormat),
            scanline_ordering: ScanlineOrder::Unspecified,
            scaling: Scaling::Unspecified,
        };

        if pp.SwapEffect != D3DSWAPEFFECT::DISCARD {
            log::warn!("[DEVICE] Multisampling is only supported when the swap effect is DISCARD");
            log::warn!("[DEVICE] Disabling multisampling");
        } else if pp.MultiSampleType != D3DMULTISAMPLE_TYPE::NONE {
            log::debug!(
                "[DEVICE] Ignoring multisample request {:?}, quality {}",
                pp.MultiSampleType,
                pp.MultiSampleQuality
            );
        }
        // Multisampling is off in every path until sample state is translated.
        let sample_desc = SampleDesc {
            count: 1,
            quality: 0,
        };

        // A count of zero means one back buffer.
        let buffer_count = pp.BackBufferCount.clamp(1, MAX_BACK_BUFFERS);
        pp.BackBufferCount = buffer_count;

        let desc = SwapChainDesc {
            buffer_desc: mode,
            sample_desc,
            buffer_usage: usage::BACK_BUFFER | usage::RENDER_TARGET_OUTPUT,
            buffer_count,
            output_window: window,
            windowed: pp.Windowed != FALSE,
            swap_effect: SwapEffect::Discard,
            flags: 0,
        };

        let DeviceAndSwapChain {
            swap_chain,
            device,
            feature_level,
            context,
        } = backend
            .create_device_and_swap_chain(dxgi_adapter, &DeviceCreateInfo::default(), &desc)
            .map_err(|e| {
                log::error!("[DEVICE] D3D11CreateDeviceAndSwapChain failed: {}", e.code);
                ShimError::DeviceCreateFailed(e.to_string())
            })?;

        let back_buffer = swap_chain
            .buffer(0)
            .map_err(|e| ShimError::BackBufferAcquireFailed(e.to_string()))?;
        let view = SurfaceView::<B>::create(&device, &back_buffer, SurfaceUsage::RenderTarget)?;

        if pp.EnableAutoDepthStencil != FALSE {
            log::error!("[DEVICE] Automatically creating depth buffer not yet supported");
        }

        let device = Rc::new_cyclic(|this: &Weak<Self>| {
            let render_target = Rc::new(Surface::from_parts(this.clone(), back_buffer, view));
            Self {
                parent: Rc::downgrade(parent),
                adapter: Rc::downgrade(adapter),
                creation_params,
                device,
                context,
                swap_chain,
                feature_level,
                back_buffer: Rc::clone(&render_target),
                render_target: RefCell::new(render_target),
                depth_stencil: RefCell::new(None),
            }
        });

        device.update_om_views();

        log::info!(
            "[DEVICE] Created {}x{} device, feature level {:?}",
            pp.BackBufferWidth,
            pp.BackBufferHeight,
            device.feature_level
        );

        Ok(device)
    }

    /// Binds the current render target and depth-stencil views to the
    /// output merger. Must run after either of them changes.
    fn update_om_views(&self) {
        let render_target = self.render_target.borrow();
        let depth_stencil = self.depth_stencil.borrow();

        let render_targets = [render_target.render_target_view().cloned()];
        let depth_stencil_view = depth_stencil
            .as_ref()
            .and_then(|surface| surface.depth_stencil_view());

        self.context
            .om_set_render_targets(&render_targets, depth_stencil_view);
    }

    pub(crate) fn d3d11_device(&self) -> &B::Device {
        &self.device
    }

    pub fn context(&self) -> &B::Context {
        &self.context
    }

    pub fn swap_chain(&self) -> &B::SwapChain {
        &self.swap_chain
    }

    pub fn feature_level(&self) -> FeatureLevel {
        self.feature_level
    }

    /// The adapter this device was created on, while the factory is alive.
    pub fn adapter(&self) -> Option<Rc<Adapter<B>>> {
        self.adapter.upgrade()
    }

    pub fn query_interface(self: &Rc<Self>, iid: &Guid, out: &mut Option<Rc<Self>>) -> HRESULT {
        *out = None;

        if *iid == IID_IUNKNOWN || *iid == IID_IDIRECT3DDEVICE9 {
            *out = Some(Rc::clone(self));
            return S_OK;
        }

        log::warn!("[DEVICE] QueryInterface: Unknown interface query");
        log::warn!("[DEVICE] {}", iid);
        E_NOINTERFACE
    }

    pub fn get_direct3d(&self, out: Option<&mut Option<Rc<Direct3D9<B>>>>) -> HRESULT {
        let Some(out) = out else {
            return D3DERR_INVALIDCALL;
        };

        *out = self.parent.upgrade();
        match out {
            Some(_) => D3D_OK,
            None => D3DERR_INVALIDCALL,
        }
    }

    pub fn get_device_caps(&self, caps: Option<&mut D3DCAPS9>) -> HRESULT {
        let Some(caps) = caps else {
            return D3DERR_INVALIDCALL;
        };

        // Caps are the same for every device on an adapter.
        fill_caps(self.creation_params.AdapterOrdinal, caps);
        D3D_OK
    }

    pub fn get_creation_parameters(
        &self,
        params: Option<&mut D3DDEVICE_CREATION_PARAMETERS>,
    ) -> HRESULT {
        let Some(params) = params else {
            return D3DERR_INVALIDCALL;
        };

        *params = self.creation_params;
        D3D_OK
    }

    pub fn get_render_target(
        &self,
        index: u32,
        out: Option<&mut Option<Rc<Surface<B>>>>,
    ) -> HRESULT {
        let Some(out) = out else {
            return D3DERR_INVALIDCALL;
        };
        *out = None;

        if index != 0 {
            return D3DERR_INVALIDCALL;
        }

        *out = Some(Rc::clone(&self.render_target.borrow()));
        D3D_OK
    }

    pub fn set_render_target(&self, index: u32, surface: Option<&Rc<Surface<B>>>) -> HRESULT {
        // Slot 0 can't be unbound.
        let Some(surface) = surface else {
            return D3DERR_INVALIDCALL;
        };
        if index != 0
            || surface.usage() != SurfaceUsage::RenderTarget
            || !surface.belongs_to(self)
        {
            return D3DERR_INVALIDCALL;
        }

        *self.render_target.borrow_mut() = Rc::clone(surface);
        self.update_om_views();
        D3D_OK
    }

    pub fn get_depth_stencil_surface(&self, out: Option<&mut Option<Rc<Surface<B>>>>) -> HRESULT {
        let Some(out) = out else {
            return D3DERR_INVALIDCALL;
        };

        *out = self.depth_stencil.borrow().clone();
        match out {
            Some(_) => D3D_OK,
            None => D3DERR_NOTFOUND,
        }
    }

    pub fn set_depth_stencil_surface(&self, surface: Option<&Rc<Surface<B>>>) -> HRESULT {
        if let Some(surface) = surface {
            if surface.usage() != SurfaceUsage::DepthStencil || !surface.belongs_to(self) {
                return D3DERR_INVALIDCALL;
            }
        }

        *self.depth_stencil.borrow_mut() = surface.cloned();
        self.update_om_views();
        D3D_OK
    }

    pub fn get_back_buffer(
        &self,
        swap_chain: u32,
        index: u32,
        _kind: D3DBACKBUFFER_TYPE,
        out: Option<&mut Option<Rc<Surface<B>>>>,
    ) -> HRESULT {
        let Some(out) = out else {
            return D3DERR_INVALIDCALL;
        };
        *out = None;

        if swap_chain != 0 || index != 0 {
            return D3DERR_INVALIDCALL;
        }

        *out = Some(Rc::clone(&self.back_buffer));
        D3D_OK
    }

    pub fn test_cooperative_level(&self) -> ShimResult<()> {
        Err(stub("TestCooperativeLevel"))
    }

    pub fn reset(&self, _pp: Option<&mut D3DPRESENT_PARAMETERS>) -> ShimResult<()> {
        Err(stub("Reset"))
    }

    pub fn get_available_texture_mem(&self) -> ShimResult<u32> {
        Err(stub("GetAvailableTextureMem"))
    }

    pub fn evict_managed_resources(&self) -> ShimResult<()> {
        Err(stub("EvictManagedResources"))
    }
}

fn stub(method: &'static str) -> ShimError {
    log::error!("[DEVICE] {} stub", method);
    ShimError::not_supported(method)
}

