//! In-memory compositor for hosts without a display stack.
//!
//! Adapters, outputs and windows are declared up front; devices, swap chains
//! and views are handed out with unique ids so callers can check identity.
//! The backend keeps a journal of every swap chain it was asked to build and
//! every immediate context it created, and individual calls can be made to
//! fail to exercise error paths.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use crate::backend::{
    Backend, D3D11Device, DeviceAndSwapChain, DeviceContext, DxgiAdapter, DxgiOutput,
    DxgiSwapChain, Texture2D,
};
use crate::desc::{
    bind, AdapterDesc, DeviceCreateInfo, DxgiFormat, FeatureLevel, ModeDesc, OutputDesc,
    SwapChainDesc, Texture2DDesc,
};
use crate::error::{InteropError, InteropResult};
use crate::foundation::{Hmonitor, Hwnd, Rect, DXGI_ERROR_NOT_FOUND, E_FAIL, E_INVALIDARG, HRESULT};

pub const DXGI_ERROR_INVALID_CALL: HRESULT = HRESULT::from_u32(0x887A_0001);
pub const ERROR_INVALID_WINDOW_HANDLE: HRESULT = HRESULT::from_u32(0x8007_0578);

/// Calls that can be made to fail.
#[derive(Default)]
struct Faults {
    device_creation: Cell<Option<HRESULT>>,
    back_buffer: Cell<Option<HRESULT>>,
    render_target_view: Cell<Option<HRESULT>>,
    depth_stencil_view: Cell<Option<HRESULT>>,
}

#[derive(Default)]
struct Journal {
    swap_chains: Vec<SwapChainDesc>,
    create_infos: Vec<DeviceCreateInfo>,
    contexts: Vec<HeadlessContext>,
}

#[derive(Default)]
pub struct HeadlessBackend {
    adapters: Vec<HeadlessAdapter>,
    windows: HashMap<Hwnd, Rect>,
    faults: Rc<Faults>,
    journal: RefCell<Journal>,
    next_id: Rc<Cell<u64>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_adapter(mut self, adapter: HeadlessAdapter) -> Self {
        self.adapters.push(adapter);
        self
    }

    /// Registers a window with the given client rectangle.
    pub fn with_window(mut self, window: Hwnd, client: Rect) -> Self {
        self.windows.insert(window, client);
        self
    }

    pub fn fail_device_creation(&self, code: Option<HRESULT>) {
        self.faults.device_creation.set(code);
    }

    pub fn fail_back_buffer(&self, code: Option<HRESULT>) {
        self.faults.back_buffer.set(code);
    }

    pub fn fail_render_target_view(&self, code: Option<HRESULT>) {
        self.faults.render_target_view.set(code);
    }

    pub fn fail_depth_stencil_view(&self, code: Option<HRESULT>) {
        self.faults.depth_stencil_view.set(code);
    }

    /// Every swap chain descriptor passed to the device factory, in order.
    pub fn swap_chain_descs(&self) -> Vec<SwapChainDesc> {
        self.journal.borrow().swap_chains.clone()
    }

    pub fn device_create_infos(&self) -> Vec<DeviceCreateInfo> {
        self.journal.borrow().create_infos.clone()
    }

    /// The immediate context of the most recently created device.
    pub fn last_context(&self) -> Option<HeadlessContext> {
        self.journal.borrow().contexts.last().cloned()
    }

    /// A free-standing texture, e.g. for surfaces not backed by a swap chain.
    pub fn create_texture(&self, desc: Texture2DDesc) -> HeadlessTexture {
        HeadlessTexture::new(next_id(&self.next_id), desc)
    }
}

fn next_id(counter: &Cell<u64>) -> u64 {
    let id = counter.get() + 1;
    counter.set(id);
    id
}

impl Backend for HeadlessBackend {
    type Adapter = HeadlessAdapter;
    type Output = HeadlessOutput;
    type Device = HeadlessDevice;
    type Context = HeadlessContext;
    type SwapChain = HeadlessSwapChain;
    type Texture2D = HeadlessTexture;
    type RenderTargetView = HeadlessRenderTargetView;
    type DepthStencilView = HeadlessDepthStencilView;

    fn enum_adapters(&self) -> InteropResult<Vec<HeadlessAdapter>> {
        Ok(self.adapters.clone())
    }

    fn client_rect(&self, window: Hwnd) -> InteropResult<Rect> {
        self.windows
            .get(&window)
            .copied()
            .ok_or_else(|| InteropError::new("GetClientRect", ERROR_INVALID_WINDOW_HANDLE))
    }

    fn create_device_and_swap_chain(
        &self,
        _adapter: &HeadlessAdapter,
        info: &DeviceCreateInfo,
        desc: &SwapChainDesc,
    ) -> InteropResult<DeviceAndSwapChain<Self>> {
        const CALL: &str = "D3D11CreateDeviceAndSwapChain";

        {
            let mut journal = self.journal.borrow_mut();
            journal.create_infos.push(info.clone());
            journal.swap_chains.push(*desc);
        }

        if let Some(code) = self.faults.device_creation.get() {
            return Err(InteropError::new(CALL, code));
        }

        let mode = &desc.buffer_desc;
        if mode.width == 0
            || mode.height == 0
            || desc.buffer_count == 0
            || desc.buffer_count > 16
            || desc.output_window.is_null()
            || desc.sample_desc.count == 0
        {
            return Err(InteropError::new(CALL, DXGI_ERROR_INVALID_CALL));
        }

        let level = match info.feature_levels.iter().max() {
            Some(level) => *level,
            None => FeatureLevel::Level11_0,
        };

        let back_buffers = (0..desc.buffer_count)
            .map(|_| {
                HeadlessTexture::new(
                    next_id(&self.next_id),
                    Texture2DDesc {
                        width: mode.width,
                        height: mode.height,
                        mip_levels: 1,
                        array_size: 1,
                        format: mode.format,
                        sample_desc: desc.sample_desc,
                        bind_flags: bind::RENDER_TARGET | bind::SHADER_RESOURCE,
                    },
                )
            })
            .collect();

        let context = HeadlessContext::default();
        self.journal.borrow_mut().contexts.push(context.clone());

        debug!(
            width = mode.width,
            height = mode.height,
            buffers = desc.buffer_count,
            "headless device created"
        );

        Ok(DeviceAndSwapChain {
            swap_chain: HeadlessSwapChain {
                back_buffers,
                faults: self.faults.clone(),
            },
            device: HeadlessDevice {
                faults: self.faults.clone(),
                next_id: self.next_id.clone(),
            },
            feature_level: level,
            context,
        })
    }
}

struct AdapterState {
    desc: AdapterDesc,
    outputs: Vec<HeadlessOutput>,
    desc_failure: Cell<Option<HRESULT>>,
}

#[derive(Clone)]
pub struct HeadlessAdapter(Rc<AdapterState>);

impl HeadlessAdapter {
    pub fn new(desc: AdapterDesc, outputs: Vec<HeadlessOutput>) -> Self {
        Self(Rc::new(AdapterState {
            desc,
            outputs,
            desc_failure: Cell::new(None),
        }))
    }

    pub fn fail_desc(&self, code: Option<HRESULT>) {
        self.0.desc_failure.set(code);
    }
}

impl DxgiAdapter<HeadlessBackend> for HeadlessAdapter {
    fn enum_outputs(&self, index: u32) -> InteropResult<HeadlessOutput> {
        self.0
            .outputs
            .get(index as usize)
            .cloned()
            .ok_or_else(|| InteropError::new("IDXGIAdapter::EnumOutputs", DXGI_ERROR_NOT_FOUND))
    }

    fn desc1(&self) -> InteropResult<AdapterDesc> {
        match self.0.desc_failure.get() {
            Some(code) => Err(InteropError::new("IDXGIAdapter1::GetDesc1", code)),
            None => Ok(self.0.desc.clone()),
        }
    }
}

struct OutputState {
    desc: OutputDesc,
    modes: Vec<ModeDesc>,
    mode_list_failure: Cell<Option<HRESULT>>,
    mode_list_calls: Cell<u32>,
}

#[derive(Clone)]
pub struct HeadlessOutput(Rc<OutputState>);

impl HeadlessOutput {
    pub fn new(monitor: Hmonitor, modes: Vec<ModeDesc>) -> Self {
        Self(Rc::new(OutputState {
            desc: OutputDesc {
                device_name: String::from("\\\\.\\DISPLAY1"),
                desktop_coordinates: Rect::default(),
                attached_to_desktop: true,
                monitor,
            },
            modes,
            mode_list_failure: Cell::new(None),
            mode_list_calls: Cell::new(0),
        }))
    }

    pub fn fail_mode_list(&self, code: Option<HRESULT>) {
        self.0.mode_list_failure.set(code);
    }

    /// Number of `display_mode_list` calls served so far.
    pub fn mode_list_calls(&self) -> u32 {
        self.0.mode_list_calls.get()
    }
}

impl DxgiOutput for HeadlessOutput {
    fn desc(&self) -> InteropResult<OutputDesc> {
        Ok(self.0.desc.clone())
    }

    fn display_mode_list(
        &self,
        format: DxgiFormat,
        _flags: u32,
        count: &mut u32,
        modes: Option<&mut [ModeDesc]>,
    ) -> InteropResult<()> {
        self.0.mode_list_calls.set(self.0.mode_list_calls.get() + 1);

        if let Some(code) = self.0.mode_list_failure.get() {
            return Err(InteropError::new("IDXGIOutput::GetDisplayModeList", code));
        }

        let available = self.0.modes.len() as u32;
        match modes {
            None => *count = available,
            Some(buffer) => {
                let written = (*count).min(available).min(buffer.len() as u32);
                for (slot, mode) in buffer.iter_mut().zip(&self.0.modes).take(written as usize) {
                    *slot = ModeDesc { format, ..*mode };
                }
                *count = written;
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
struct TextureState {
    id: u64,
    desc: Texture2DDesc,
}

#[derive(Clone, Debug)]
pub struct HeadlessTexture(Rc<TextureState>);

impl HeadlessTexture {
    fn new(id: u64, desc: Texture2DDesc) -> Self {
        Self(Rc::new(TextureState { id, desc }))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }
}

impl PartialEq for HeadlessTexture {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for HeadlessTexture {}

impl Texture2D for HeadlessTexture {
    fn desc(&self) -> Texture2DDesc {
        self.0.desc
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadlessRenderTargetView {
    pub id: u64,
    pub resource: HeadlessTexture,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadlessDepthStencilView {
    pub id: u64,
    pub resource: HeadlessTexture,
}

pub struct HeadlessSwapChain {
    back_buffers: Vec<HeadlessTexture>,
    faults: Rc<Faults>,
}

impl DxgiSwapChain<HeadlessBackend> for HeadlessSwapChain {
    fn buffer(&self, index: u32) -> InteropResult<HeadlessTexture> {
        const CALL: &str = "IDXGISwapChain::GetBuffer";

        if let Some(code) = self.faults.back_buffer.get() {
            return Err(InteropError::new(CALL, code));
        }

        self.back_buffers
            .get(index as usize)
            .cloned()
            .ok_or_else(|| InteropError::new(CALL, DXGI_ERROR_INVALID_CALL))
    }
}

pub struct HeadlessDevice {
    faults: Rc<Faults>,
    next_id: Rc<Cell<u64>>,
}

impl D3D11Device<HeadlessBackend> for HeadlessDevice {
    fn create_render_target_view(
        &self,
        resource: &HeadlessTexture,
    ) -> InteropResult<HeadlessRenderTargetView> {
        const CALL: &str = "ID3D11Device::CreateRenderTargetView";

        if let Some(code) = self.faults.render_target_view.get() {
            return Err(InteropError::new(CALL, code));
        }
        if resource.desc().bind_flags & bind::RENDER_TARGET == 0 {
            return Err(InteropError::new(CALL, E_INVALIDARG));
        }

        Ok(HeadlessRenderTargetView {
            id: next_id(&self.next_id),
            resource: resource.clone(),
        })
    }

    fn create_depth_stencil_view(
        &self,
        resource: &HeadlessTexture,
    ) -> InteropResult<HeadlessDepthStencilView> {
        const CALL: &str = "ID3D11Device::CreateDepthStencilView";

        if let Some(code) = self.faults.depth_stencil_view.get() {
            return Err(InteropError::new(CALL, code));
        }
        let desc = resource.desc();
        if desc.bind_flags & bind::DEPTH_STENCIL == 0 {
            return Err(InteropError::new(CALL, E_INVALIDARG));
        }
        if !desc.format.is_depth() {
            return Err(InteropError::new(CALL, E_FAIL));
        }

        Ok(HeadlessDepthStencilView {
            id: next_id(&self.next_id),
            resource: resource.clone(),
        })
    }
}

#[derive(Default)]
struct ContextState {
    render_targets: RefCell<Vec<Option<HeadlessRenderTargetView>>>,
    depth_stencil: RefCell<Option<HeadlessDepthStencilView>>,
    bind_calls: Cell<u32>,
}

/// Immediate context that remembers its output-merger binding.
#[derive(Clone, Default)]
pub struct HeadlessContext(Rc<ContextState>);

impl HeadlessContext {
    pub fn bound_render_targets(&self) -> Vec<Option<HeadlessRenderTargetView>> {
        self.0.render_targets.borrow().clone()
    }

    pub fn bound_depth_stencil(&self) -> Option<HeadlessDepthStencilView> {
        self.0.depth_stencil.borrow().clone()
    }

    /// Number of `om_set_render_targets` calls so far.
    pub fn bind_calls(&self) -> u32 {
        self.0.bind_calls.get()
    }
}

impl DeviceContext<HeadlessBackend> for HeadlessContext {
    fn om_set_render_targets(
        &self,
        render_targets: &[Option<HeadlessRenderTargetView>],
        depth_stencil: Option<&HeadlessDepthStencilView>,
    ) {
        *self.0.render_targets.borrow_mut() = render_targets.to_vec();
        *self.0.depth_stencil.borrow_mut() = depth_stencil.cloned();
        self.0.bind_calls.set(self.0.bind_calls.get() + 1);
    }
}
