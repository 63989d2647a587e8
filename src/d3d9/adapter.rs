//! One compositor adapter as the legacy runtime sees it.

use dxgi_interop::{Backend, DxgiAdapter, DxgiOutput, Hmonitor, ModeDesc, HRESULT};

use super::format::MODE_LIST_FORMAT;
use super::types::{
    write_fixed_str, D3DADAPTER_IDENTIFIER9, D3DDISPLAYMODE, D3DERR_INVALIDCALL, D3D_OK,
};
use crate::config::DriverConfig;
use crate::error::{ShimError, ShimResult};

const DESCRIPTION_SUFFIX: &str = " (D3D9 DXVK Driver)";
const DRIVER_NAME: &str = "DXVK";

/// Identifier fields a user can override from the driver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierOverrides {
    pub vendor_id: Option<u32>,
    pub device_id: Option<u32>,
    pub device_desc: Option<String>,
}

impl From<&DriverConfig> for IdentifierOverrides {
    fn from(config: &DriverConfig) -> Self {
        Self {
            vendor_id: config.custom_vendor_id,
            device_id: config.custom_device_id,
            device_desc: config.custom_device_desc.clone(),
        }
    }
}

/// A GPU with at least one output, plus the display modes of that output.
///
/// The mode list is read once, for [`MODE_LIST_FORMAT`] only, and every other
/// format is assumed to expose the same modes.
pub struct Adapter<B: Backend> {
    adapter: B::Adapter,
    // Held so the output stays alive alongside the adapter.
    #[allow(dead_code)]
    output: B::Output,
    monitor: Hmonitor,
    modes: Vec<ModeDesc>,
    overrides: IdentifierOverrides,
}

impl<B: Backend> Adapter<B> {
    pub fn new(adapter: B::Adapter, overrides: IdentifierOverrides) -> ShimResult<Self> {
        let output = adapter.enum_outputs(0).map_err(|e| {
            log::debug!("[ADAPTER] EnumOutputs(0) failed: {}", e);
            ShimError::NoMonitor
        })?;

        let monitor = output
            .desc()
            .map_err(|e| ShimError::ModeListFailed(e.to_string()))?
            .monitor;

        let mut count = 0u32;
        output
            .display_mode_list(MODE_LIST_FORMAT, 0, &mut count, None)
            .map_err(|e| ShimError::ModeListFailed(e.to_string()))?;

        let mut modes = vec![ModeDesc::default(); count as usize];
        output
            .display_mode_list(MODE_LIST_FORMAT, 0, &mut count, Some(&mut modes))
            .map_err(|e| ShimError::ModeListFailed(e.to_string()))?;
        // The second call may report fewer modes than the first.
        modes.truncate(count as usize);

        log::debug!("[ADAPTER] {} display modes on monitor {:?}", modes.len(), monitor);

        Ok(Self {
            adapter,
            output,
            monitor,
            modes,
            overrides,
        })
    }

    /// Fills the legacy identifier record from the compositor descriptor.
    pub fn get_identifier(&self, identifier: Option<&mut D3DADAPTER_IDENTIFIER9>) -> HRESULT {
        let Some(identifier) = identifier else {
            return D3DERR_INVALIDCALL;
        };

        let desc = match self.adapter.desc1() {
            Ok(desc) => desc,
            Err(e) => {
                log::error!("[ADAPTER] GetIdentifier: {}", e);
                return D3DERR_INVALIDCALL;
            }
        };

        *identifier = D3DADAPTER_IDENTIFIER9::default();

        let device_name = match &self.overrides.device_desc {
            Some(name) => name.clone(),
            None => desc.description(),
        };
        write_fixed_str(&mut identifier.DeviceName, &device_name);
        write_fixed_str(
            &mut identifier.Description,
            &format!("{}{}", device_name, DESCRIPTION_SUFFIX),
        );
        write_fixed_str(&mut identifier.Driver, DRIVER_NAME);

        identifier.DriverVersion = 1;
        identifier.VendorId = self.overrides.vendor_id.unwrap_or(desc.vendor_id);
        identifier.DeviceId = self.overrides.device_id.unwrap_or(desc.device_id);
        identifier.SubSysId = desc.sub_sys_id;
        identifier.Revision = desc.revision;

        let mut guid = [0u8; 16];
        guid[..8].copy_from_slice(&desc.adapter_luid.to_le_bytes());
        identifier.DeviceIdentifier = dxgi_interop::Guid::from_le_bytes(guid);

        identifier.WHQLLevel = 1;

        D3D_OK
    }

    pub fn get_mode_count(&self) -> u32 {
        self.modes.len() as u32
    }

    /// Writes mode `index`. The caller validates the index.
    pub fn get_mode(&self, index: u32, mode: &mut D3DDISPLAYMODE) {
        let Some(source) = self.modes.get(index as usize) else {
            return;
        };

        mode.Width = source.width;
        mode.Height = source.height;
        // Refresh rate is rate * 1000 / 1000, truncated to whole Hz.
        mode.RefreshRate = source.refresh_rate.whole_hz();
    }

    /// The compositor adapter, shared with devices created on it.
    pub fn adapter(&self) -> &B::Adapter {
        &self.adapter
    }

    pub fn monitor(&self) -> Hmonitor {
        self.monitor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::d3d9::types::read_fixed_str;
    use dxgi_interop::headless::{HeadlessAdapter, HeadlessBackend, HeadlessOutput};
    use dxgi_interop::{AdapterDesc, Luid, Rational, E_FAIL};

    fn rtx_desc() -> AdapterDesc {
        let mut desc = AdapterDesc {
            vendor_id: 0x10DE,
            device_id: 0x2684,
            sub_sys_id: 0,
            revision: 0xA1,
            adapter_luid: Luid::new(0x1234, 0x5678),
            ..Default::default()
        };
        desc.set_description("NVIDIA GeForce RTX 4090");
        desc
    }

    fn mode(width: u32, height: u32, numerator: u32, denominator: u32) -> ModeDesc {
        ModeDesc {
            width,
            height,
            refresh_rate: Rational::new(numerator, denominator),
            ..Default::default()
        }
    }

    fn adapter_with(desc: AdapterDesc, modes: Vec<ModeDesc>) -> (HeadlessAdapter, HeadlessOutput) {
        let output = HeadlessOutput::new(Hmonitor(0x42), modes);
        (HeadlessAdapter::new(desc, vec![output.clone()]), output)
    }

    #[test]
    fn test_adapter_identifier() {
        let (raw, _) = adapter_with(rtx_desc(), Vec::new());
        let adapter = Adapter::<HeadlessBackend>::new(raw, IdentifierOverrides::default()).unwrap();

        let mut id = D3DADAPTER_IDENTIFIER9::default();
        assert_eq!(adapter.get_identifier(Some(&mut id)), D3D_OK);

        assert_eq!(read_fixed_str(&id.DeviceName), "NVIDIA GeForce RTX 4090");
        assert_eq!(
            read_fixed_str(&id.Description),
            "NVIDIA GeForce RTX 4090 (D3D9 DXVK Driver)"
        );
        assert_eq!(read_fixed_str(&id.Driver), "DXVK");
        assert_eq!(id.VendorId, 0x10DE);
        assert_eq!(id.DeviceId, 0x2684);
        assert_eq!(id.SubSysId, 0);
        assert_eq!(id.Revision, 0xA1);
        assert_eq!(id.DriverVersion, 1);
        assert_eq!(id.WHQLLevel, 1);
    }

    #[test]
    fn test_identifier_carries_luid_in_low_bytes() {
        let (raw, _) = adapter_with(rtx_desc(), Vec::new());
        let adapter = Adapter::<HeadlessBackend>::new(raw, IdentifierOverrides::default()).unwrap();

        let mut id = D3DADAPTER_IDENTIFIER9::default();
        adapter.get_identifier(Some(&mut id));

        let bytes = id.DeviceIdentifier.to_le_bytes();
        assert_eq!(&bytes[..8], &Luid::new(0x1234, 0x5678).to_le_bytes());
        assert_eq!(&bytes[8..], &[0u8; 8]);
    }

    #[test]
    fn test_identifier_strings_are_zero_padded() {
        let (raw, _) = adapter_with(rtx_desc(), Vec::new());
        let adapter = Adapter::<HeadlessBackend>::new(raw, IdentifierOverrides::default()).unwrap();

        let mut id = D3DADAPTER_IDENTIFIER9::default();
        id.Driver = [0xAA; 512];
        adapter.get_identifier(Some(&mut id));

        assert!(id.Driver[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_identifier_overrides() {
        let (raw, _) = adapter_with(rtx_desc(), Vec::new());
        let overrides = IdentifierOverrides {
            vendor_id: Some(0x1002),
            device_id: None,
            device_desc: Some("Radeon".to_string()),
        };
        let adapter = Adapter::<HeadlessBackend>::new(raw, overrides).unwrap();

        let mut id = D3DADAPTER_IDENTIFIER9::default();
        adapter.get_identifier(Some(&mut id));

        assert_eq!(id.VendorId, 0x1002);
        assert_eq!(id.DeviceId, 0x2684);
        assert_eq!(read_fixed_str(&id.Description), "Radeon (D3D9 DXVK Driver)");
    }

    #[test]
    fn test_identifier_failure_is_invalid_call() {
        let (raw, _) = adapter_with(rtx_desc(), Vec::new());
        raw.fail_desc(Some(E_FAIL));
        let adapter = Adapter::<HeadlessBackend>::new(raw, IdentifierOverrides::default()).unwrap();

        let mut id = D3DADAPTER_IDENTIFIER9::default();
        assert_eq!(adapter.get_identifier(Some(&mut id)), D3DERR_INVALIDCALL);
        assert_eq!(adapter.get_identifier(None), D3DERR_INVALIDCALL);
    }

    #[test]
    fn test_no_output_is_no_monitor() {
        let raw = HeadlessAdapter::new(rtx_desc(), Vec::new());
        let result = Adapter::<HeadlessBackend>::new(raw, IdentifierOverrides::default());
        assert!(matches!(result, Err(ShimError::NoMonitor)));
    }

    #[test]
    fn test_mode_list_failure() {
        let (raw, output) = adapter_with(rtx_desc(), vec![mode(800, 600, 60, 1)]);
        output.fail_mode_list(Some(E_FAIL));
        let result = Adapter::<HeadlessBackend>::new(raw, IdentifierOverrides::default());
        assert!(matches!(result, Err(ShimError::ModeListFailed(_))));
    }

    #[test]
    fn test_mode_list_queried_twice() {
        let (raw, output) = adapter_with(rtx_desc(), vec![mode(800, 600, 60, 1), mode(1024, 768, 75, 1)]);
        let adapter = Adapter::<HeadlessBackend>::new(raw, IdentifierOverrides::default()).unwrap();

        assert_eq!(output.mode_list_calls(), 2);
        assert_eq!(adapter.get_mode_count(), 2);
        assert_eq!(adapter.monitor(), Hmonitor(0x42));
    }

    #[test]
    fn test_mode_refresh_truncation() {
        let (raw, _) = adapter_with(rtx_desc(), vec![mode(1920, 1080, 59997, 1000)]);
        let adapter = Adapter::<HeadlessBackend>::new(raw, IdentifierOverrides::default()).unwrap();

        let mut first = D3DDISPLAYMODE::default();
        adapter.get_mode(0, &mut first);
        assert_eq!((first.Width, first.Height, first.RefreshRate), (1920, 1080, 59));

        let mut second = D3DDISPLAYMODE::default();
        adapter.get_mode(0, &mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_mode_is_readable() {
        let modes = vec![mode(640, 480, 60, 1), mode(800, 600, 0, 0), mode(1280, 720, 120, 1)];
        let (raw, _) = adapter_with(rtx_desc(), modes);
        let adapter = Adapter::<HeadlessBackend>::new(raw, IdentifierOverrides::default()).unwrap();

        for index in 0..adapter.get_mode_count() {
            let mut out = D3DDISPLAYMODE::default();
            adapter.get_mode(index, &mut out);
            assert_ne!(out.Width, 0);
        }
    }
}
