//! The compositor / modern-API surface the driver consumes.
//!
//! A [`Backend`] names one family of handle types and provides the free
//! entry points (adapter enumeration, the combined device + swap chain
//! factory, client-rect queries). Handles are reference counted by the
//! platform, so cloning one adds a reference and dropping it releases one.
//!
//! Like the platform API itself, nothing here is thread safe: the device and
//! immediate context must only be used from one thread at a time.

use std::fmt;

use crate::desc::{
    AdapterDesc, DeviceCreateInfo, DxgiFormat, FeatureLevel, ModeDesc, OutputDesc,
    SwapChainDesc, Texture2DDesc,
};
use crate::error::InteropResult;
use crate::foundation::{Hwnd, Rect};

pub trait Backend: Sized + 'static {
    type Adapter: DxgiAdapter<Self>;
    type Output: DxgiOutput;
    type Device: D3D11Device<Self>;
    type Context: DeviceContext<Self>;
    type SwapChain: DxgiSwapChain<Self>;
    type Texture2D: Texture2D;
    type RenderTargetView: Clone + fmt::Debug;
    type DepthStencilView: Clone + fmt::Debug;

    /// All adapters, in enumeration order.
    fn enum_adapters(&self) -> InteropResult<Vec<Self::Adapter>>;

    /// Client area of `window`, in client coordinates.
    fn client_rect(&self, window: Hwnd) -> InteropResult<Rect>;

    /// Creates a device, its immediate context and a swap chain in one call.
    fn create_device_and_swap_chain(
        &self,
        adapter: &Self::Adapter,
        info: &DeviceCreateInfo,
        desc: &SwapChainDesc,
    ) -> InteropResult<DeviceAndSwapChain<Self>>;
}

/// Everything produced by [`Backend::create_device_and_swap_chain`].
pub struct DeviceAndSwapChain<B: Backend> {
    pub swap_chain: B::SwapChain,
    pub device: B::Device,
    pub feature_level: FeatureLevel,
    pub context: B::Context,
}

pub trait DxgiAdapter<B: Backend>: Clone {
    /// Output `index`; `DXGI_ERROR_NOT_FOUND` past the last one.
    fn enum_outputs(&self, index: u32) -> InteropResult<B::Output>;

    fn desc1(&self) -> InteropResult<AdapterDesc>;
}

pub trait DxgiOutput {
    fn desc(&self) -> InteropResult<OutputDesc>;

    /// Two-call mode enumeration: with `modes == None` only `count` is
    /// written; otherwise up to `*count` entries are filled and `count` is
    /// updated to the number written.
    fn display_mode_list(
        &self,
        format: DxgiFormat,
        flags: u32,
        count: &mut u32,
        modes: Option<&mut [ModeDesc]>,
    ) -> InteropResult<()>;
}

pub trait DxgiSwapChain<B: Backend> {
    fn buffer(&self, index: u32) -> InteropResult<B::Texture2D>;
}

pub trait D3D11Device<B: Backend> {
    fn create_render_target_view(
        &self,
        resource: &B::Texture2D,
    ) -> InteropResult<B::RenderTargetView>;

    fn create_depth_stencil_view(
        &self,
        resource: &B::Texture2D,
    ) -> InteropResult<B::DepthStencilView>;
}

pub trait DeviceContext<B: Backend> {
    fn om_set_render_targets(
        &self,
        render_targets: &[Option<B::RenderTargetView>],
        depth_stencil: Option<&B::DepthStencilView>,
    );
}

pub trait Texture2D: Clone + fmt::Debug {
    fn desc(&self) -> Texture2DDesc;
}
