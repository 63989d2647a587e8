//! The `IDirect3D9` factory: adapter enumeration and device creation.

use std::rc::Rc;

use dxgi_interop::{Backend, Guid, Hmonitor, Hwnd, HRESULT};

use super::adapter::{Adapter, IdentifierOverrides};
use super::caps::{fill_caps, D3DCAPS9};
use super::device::Device;
use super::types::{
    D3DADAPTER_IDENTIFIER9, D3DDEVICE_CREATION_PARAMETERS, D3DDEVTYPE, D3DDISPLAYMODE,
    D3DERR_INVALIDCALL, D3DFORMAT, D3DPRESENT_PARAMETERS, D3D_OK, E_NOINTERFACE, IID_IDIRECT3D9,
    IID_IUNKNOWN, S_OK,
};
use crate::config::DriverConfig;
use crate::error::ShimResult;

pub struct Direct3D9<B: Backend> {
    backend: B,
    adapters: Vec<Rc<Adapter<B>>>,
}

impl<B: Backend> Direct3D9<B> {
    pub fn new(backend: B) -> ShimResult<Rc<Self>> {
        Self::with_config(backend, &DriverConfig::default())
    }

    /// Enumerates the backend's adapters. Adapters that can't be used, e.g.
    /// because no monitor is attached, are skipped.
    pub fn with_config(backend: B, config: &DriverConfig) -> ShimResult<Rc<Self>> {
        let overrides = IdentifierOverrides::from(config);

        let adapters = backend
            .enum_adapters()?
            .into_iter()
            .enumerate()
            .filter_map(|(index, adapter)| match Adapter::<B>::new(adapter, overrides.clone()) {
                Ok(adapter) => Some(Rc::new(adapter)),
                Err(e) => {
                    log::warn!("[D3D9] Skipping adapter {}: {}", index, e);
                    None
                }
            })
            .collect::<Vec<_>>();

        log::info!("[D3D9] Found {} usable adapter(s)", adapters.len());

        Ok(Rc::new(Self { backend, adapters }))
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn adapter(&self, ordinal: u32) -> Option<&Rc<Adapter<B>>> {
        self.adapters.get(ordinal as usize)
    }

    pub fn query_interface(self: &Rc<Self>, iid: &Guid, out: &mut Option<Rc<Self>>) -> HRESULT {
        *out = None;

        if *iid == IID_IUNKNOWN || *iid == IID_IDIRECT3D9 {
            *out = Some(Rc::clone(self));
            return S_OK;
        }

        log::warn!("[D3D9] QueryInterface: unknown interface {}", iid);
        E_NOINTERFACE
    }

    pub fn get_adapter_count(&self) -> u32 {
        self.adapters.len() as u32
    }

    pub fn get_adapter_identifier(
        &self,
        ordinal: u32,
        _flags: u32,
        identifier: Option<&mut D3DADAPTER_IDENTIFIER9>,
    ) -> HRESULT {
        match self.adapter(ordinal) {
            Some(adapter) => adapter.get_identifier(identifier),
            None => D3DERR_INVALIDCALL,
        }
    }

    /// Mode count for `ordinal`. Every format shares one mode list.
    pub fn get_adapter_mode_count(&self, ordinal: u32, _format: D3DFORMAT) -> u32 {
        self.adapter(ordinal)
            .map(|adapter| adapter.get_mode_count())
            .unwrap_or(0)
    }

    pub fn enum_adapter_modes(
        &self,
        ordinal: u32,
        format: D3DFORMAT,
        index: u32,
        mode: Option<&mut D3DDISPLAYMODE>,
    ) -> HRESULT {
        let (Some(adapter), Some(mode)) = (self.adapter(ordinal), mode) else {
            return D3DERR_INVALIDCALL;
        };
        if index >= adapter.get_mode_count() {
            return D3DERR_INVALIDCALL;
        }

        adapter.get_mode(index, mode);
        mode.Format = format;
        D3D_OK
    }

    pub fn get_adapter_monitor(&self, ordinal: u32) -> Hmonitor {
        self.adapter(ordinal)
            .map(|adapter| adapter.monitor())
            .unwrap_or(Hmonitor::NULL)
    }

    pub fn get_device_caps(
        &self,
        ordinal: u32,
        _device_type: D3DDEVTYPE,
        caps: Option<&mut D3DCAPS9>,
    ) -> HRESULT {
        let (Some(_), Some(caps)) = (self.adapter(ordinal), caps) else {
            return D3DERR_INVALIDCALL;
        };

        fill_caps(ordinal, caps);
        D3D_OK
    }

    pub fn create_device(
        self: &Rc<Self>,
        ordinal: u32,
        device_type: D3DDEVTYPE,
        focus_window: Hwnd,
        behavior_flags: u32,
        pp: Option<&mut D3DPRESENT_PARAMETERS>,
        out: Option<&mut Option<Rc<Device<B>>>>,
    ) -> HRESULT {
        let Some(out) = out else {
            return D3DERR_INVALIDCALL;
        };
        *out = None;

        let (Some(adapter), Some(pp)) = (self.adapter(ordinal), pp) else {
            return D3DERR_INVALIDCALL;
        };

        let creation_params = D3DDEVICE_CREATION_PARAMETERS {
            AdapterOrdinal: ordinal,
            DeviceType: device_type,
            hFocusWindow: focus_window,
            BehaviorFlags: behavior_flags,
        };

        match Device::new(self, adapter, creation_params, pp) {
            Ok(device) => {
                *out = Some(device);
                D3D_OK
            }
            Err(e) => {
                log::error!("[D3D9] CreateDevice failed: {}", e);
                e.hresult()
            }
        }
    }
}

/// Builds a factory over the system compositor, loading the driver
/// configuration and logging first.
#[cfg(windows)]
pub fn direct3d_create9(sdk_version: u32) -> Option<Rc<Direct3D9<dxgi_interop::Win32Backend>>> {
    let loaded = crate::config::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    crate::logging::init_logging(&config);
    if let Err(e) = loaded {
        log::error!("[D3D9] Using default configuration: {}", e);
    }

    if sdk_version != super::types::D3D_SDK_VERSION {
        log::warn!("[D3D9] Unexpected SDK version {}", sdk_version);
    }

    let backend = match dxgi_interop::Win32Backend::new() {
        Ok(backend) => backend,
        Err(e) => {
            log::error!("[D3D9] Failed to create DXGI factory: {}", e);
            return None;
        }
    };

    match Direct3D9::with_config(backend, &config) {
        Ok(factory) => Some(factory),
        Err(e) => {
            log::error!("[D3D9] Failed to enumerate adapters: {}", e);
            None
        }
    }
}
