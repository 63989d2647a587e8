//! Legacy surfaces backed by a 2D texture and at most one view.

use std::rc::{Rc, Weak};

use dxgi_interop::{Backend, D3D11Device, Guid, Texture2D, HRESULT};

use super::device::Device;
use super::format::dxgi_format_to_surface;
use super::types::{
    D3DERR_INVALIDCALL, D3DMULTISAMPLE_TYPE, D3DPOOL, D3DRESOURCETYPE, D3DSURFACE_DESC,
    D3DUSAGE_DEPTHSTENCIL, D3DUSAGE_RENDERTARGET, D3D_OK, E_NOINTERFACE, IID_IDIRECT3DRESOURCE9,
    IID_IDIRECT3DSURFACE9, IID_IUNKNOWN, S_OK,
};
use crate::error::{ShimError, ShimResult};

/// What a surface is bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceUsage {
    Plain,
    RenderTarget,
    DepthStencil,
}

impl SurfaceUsage {
    /// Reads the usage tag from `D3DUSAGE_*` flags.
    pub fn from_flags(flags: u32) -> Self {
        if flags & D3DUSAGE_RENDERTARGET != 0 {
            SurfaceUsage::RenderTarget
        } else if flags & D3DUSAGE_DEPTHSTENCIL != 0 {
            SurfaceUsage::DepthStencil
        } else {
            SurfaceUsage::Plain
        }
    }

    pub fn flags(self) -> u32 {
        match self {
            SurfaceUsage::Plain => 0,
            SurfaceUsage::RenderTarget => D3DUSAGE_RENDERTARGET,
            SurfaceUsage::DepthStencil => D3DUSAGE_DEPTHSTENCIL,
        }
    }
}

/// The single view a surface owns. Its kind always matches the usage tag.
pub enum SurfaceView<B: Backend> {
    RenderTarget(B::RenderTargetView),
    DepthStencil(B::DepthStencilView),
    None,
}

impl<B: Backend> SurfaceView<B> {
    /// Creates the view kind `usage` calls for on `texture`.
    pub(crate) fn create(
        device: &B::Device,
        texture: &B::Texture2D,
        usage: SurfaceUsage,
    ) -> ShimResult<Self> {
        match usage {
            SurfaceUsage::RenderTarget => device
                .create_render_target_view(texture)
                .map(SurfaceView::RenderTarget)
                .map_err(|e| ShimError::RenderTargetCreateFailed(e.to_string())),
            SurfaceUsage::DepthStencil => device
                .create_depth_stencil_view(texture)
                .map(SurfaceView::DepthStencil)
                .map_err(|e| ShimError::RenderTargetCreateFailed(e.to_string())),
            SurfaceUsage::Plain => Ok(SurfaceView::None),
        }
    }

    pub fn usage(&self) -> SurfaceUsage {
        match self {
            SurfaceView::RenderTarget(_) => SurfaceUsage::RenderTarget,
            SurfaceView::DepthStencil(_) => SurfaceUsage::DepthStencil,
            SurfaceView::None => SurfaceUsage::Plain,
        }
    }
}

pub struct Surface<B: Backend> {
    device: Weak<Device<B>>,
    texture: B::Texture2D,
    view: SurfaceView<B>,
}

impl<B: Backend> Surface<B> {
    /// Wraps `texture` for `device`, creating the view `usage` calls for.
    pub fn new(
        device: &Rc<Device<B>>,
        texture: B::Texture2D,
        usage: SurfaceUsage,
    ) -> ShimResult<Rc<Self>> {
        let view = SurfaceView::<B>::create(device.d3d11_device(), &texture, usage)?;
        Ok(Rc::new(Self::from_parts(Rc::downgrade(device), texture, view)))
    }

    /// Assembles a surface whose view already exists.
    pub(crate) fn from_parts(
        device: Weak<Device<B>>,
        texture: B::Texture2D,
        view: SurfaceView<B>,
    ) -> Self {
        Self {
            device,
            texture,
            view,
        }
    }

    pub fn texture(&self) -> &B::Texture2D {
        &self.texture
    }

    pub fn usage(&self) -> SurfaceUsage {
        self.view.usage()
    }

    pub fn view(&self) -> &SurfaceView<B> {
        &self.view
    }

    pub fn render_target_view(&self) -> Option<&B::RenderTargetView> {
        match &self.view {
            SurfaceView::RenderTarget(view) => Some(view),
            _ => None,
        }
    }

    pub fn depth_stencil_view(&self) -> Option<&B::DepthStencilView> {
        match &self.view {
            SurfaceView::DepthStencil(view) => Some(view),
            _ => None,
        }
    }

    /// Whether this surface was created for `device`.
    pub(crate) fn belongs_to(&self, device: &Device<B>) -> bool {
        std::ptr::eq(self.device.as_ptr(), device)
    }

    pub fn get_device(&self, out: Option<&mut Option<Rc<Device<B>>>>) -> HRESULT {
        let Some(out) = out else {
            return D3DERR_INVALIDCALL;
        };

        *out = self.device.upgrade();
        match out {
            Some(_) => D3D_OK,
            None => D3DERR_INVALIDCALL,
        }
    }

    pub fn get_desc(&self, out: Option<&mut D3DSURFACE_DESC>) -> HRESULT {
        let Some(out) = out else {
            return D3DERR_INVALIDCALL;
        };

        let desc = self.texture.desc();
        let multisample = if desc.sample_desc.count > 1 {
            D3DMULTISAMPLE_TYPE(desc.sample_desc.count)
        } else {
            D3DMULTISAMPLE_TYPE::NONE
        };

        *out = D3DSURFACE_DESC {
            Format: dxgi_format_to_surface(desc.format),
            Type: D3DRESOURCETYPE::SURFACE,
            Usage: self.usage().flags(),
            Pool: D3DPOOL::DEFAULT,
            MultiSampleType: multisample,
            MultiSampleQuality: desc.sample_desc.quality,
            Width: desc.width,
            Height: desc.height,
        };

        D3D_OK
    }

    pub fn query_interface(self: &Rc<Self>, iid: &Guid, out: &mut Option<Rc<Self>>) -> HRESULT {
        *out = None;

        if *iid == IID_IUNKNOWN || *iid == IID_IDIRECT3DRESOURCE9 || *iid == IID_IDIRECT3DSURFACE9 {
            *out = Some(Rc::clone(self));
            return S_OK;
        }

        log::warn!("[SURFACE] QueryInterface: unknown interface {}", iid);
        E_NOINTERFACE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_from_flags() {
        assert_eq!(SurfaceUsage::from_flags(D3DUSAGE_RENDERTARGET), SurfaceUsage::RenderTarget);
        assert_eq!(SurfaceUsage::from_flags(D3DUSAGE_DEPTHSTENCIL), SurfaceUsage::DepthStencil);
        assert_eq!(SurfaceUsage::from_flags(0), SurfaceUsage::Plain);
    }

    #[test]
    fn test_usage_round_trips_through_flags() {
        for usage in [SurfaceUsage::Plain, SurfaceUsage::RenderTarget, SurfaceUsage::DepthStencil] {
            assert_eq!(SurfaceUsage::from_flags(usage.flags()), usage);
        }
    }
}
