//! Device and surface tests against the headless backend.
//!
//! Tests are organized by component:
//! - Device construction from presentation parameters
//! - Output-merger binding
//! - Device contracts and stubs
//! - Surfaces

#[cfg(test)]
mod fixture {
    use std::rc::Rc;

    use dxgi_interop::headless::{HeadlessAdapter, HeadlessBackend, HeadlessOutput};
    use dxgi_interop::{
        bind, AdapterDesc, DxgiFormat, Hmonitor, Hwnd, ModeDesc, Rational, Rect, SampleDesc,
        Texture2DDesc,
    };

    use crate::d3d9::types::{
        D3DDEVICE_CREATION_PARAMETERS, D3DDEVTYPE, D3DFORMAT, D3DPRESENT_PARAMETERS,
        D3DSWAPEFFECT, TRUE,
    };
    use crate::d3d9::{Device, Direct3D9};
    use crate::error::ShimResult;

    pub const DEVICE_WINDOW: Hwnd = Hwnd(0x100);
    pub const FOCUS_WINDOW: Hwnd = Hwnd(0x200);

    pub type TestDevice = Rc<Device<HeadlessBackend>>;
    pub type TestFactory = Rc<Direct3D9<HeadlessBackend>>;

    pub fn backend() -> HeadlessBackend {
        let output = HeadlessOutput::new(
            Hmonitor(1),
            vec![ModeDesc {
                width: 1920,
                height: 1080,
                refresh_rate: Rational::new(60, 1),
                ..Default::default()
            }],
        );

        HeadlessBackend::new()
            .with_adapter(HeadlessAdapter::new(AdapterDesc::default(), vec![output]))
            .with_window(DEVICE_WINDOW, Rect::new(0, 0, 1280, 720))
            .with_window(FOCUS_WINDOW, Rect::new(100, 100, 900, 700))
    }

    pub fn factory() -> TestFactory {
        Direct3D9::new(backend()).unwrap()
    }

    pub fn creation_params() -> D3DDEVICE_CREATION_PARAMETERS {
        D3DDEVICE_CREATION_PARAMETERS {
            AdapterOrdinal: 0,
            DeviceType: D3DDEVTYPE::HAL,
            hFocusWindow: FOCUS_WINDOW,
            BehaviorFlags: 0x40,
        }
    }

    pub fn present_params() -> D3DPRESENT_PARAMETERS {
        D3DPRESENT_PARAMETERS {
            BackBufferWidth: 640,
            BackBufferHeight: 480,
            BackBufferFormat: D3DFORMAT::X8R8G8B8,
            BackBufferCount: 1,
            SwapEffect: D3DSWAPEFFECT::DISCARD,
            hDeviceWindow: DEVICE_WINDOW,
            Windowed: TRUE,
            ..Default::default()
        }
    }

    pub fn create_on(d3d9: &TestFactory, pp: &mut D3DPRESENT_PARAMETERS) -> ShimResult<TestDevice> {
        let adapter = Rc::clone(d3d9.adapter(0).unwrap());
        Device::new(d3d9, &adapter, creation_params(), pp)
    }

    pub fn create(pp: &mut D3DPRESENT_PARAMETERS) -> (TestFactory, TestDevice) {
        let d3d9 = factory();
        let device = create_on(&d3d9, pp).unwrap();
        (d3d9, device)
    }

    pub fn depth_texture_desc() -> Texture2DDesc {
        Texture2DDesc {
            width: 640,
            height: 480,
            mip_levels: 1,
            array_size: 1,
            format: DxgiFormat::D24_UNORM_S8_UINT,
            sample_desc: SampleDesc::default(),
            bind_flags: bind::DEPTH_STENCIL,
        }
    }

    pub fn color_texture_desc() -> Texture2DDesc {
        Texture2DDesc {
            format: DxgiFormat::B8G8R8A8_UNORM,
            bind_flags: bind::RENDER_TARGET | bind::SHADER_RESOURCE,
            ..depth_texture_desc()
        }
    }
}

#[cfg(test)]
mod construction_tests {
    use super::fixture::*;
    use crate::d3d9::types::*;
    use crate::error::ShimError;
    use crate::test_support::{capture_logs, logged};
    use dxgi_interop::{usage, DriverType, DxgiFormat, Hwnd, Rational, SwapEffect, D3D11_SDK_VERSION};
    use log::Level;

    #[test]
    fn zero_dimensions_come_from_client_rect() {
        let mut pp = present_params();
        pp.BackBufferWidth = 0;
        pp.BackBufferHeight = 0;

        let (d3d9, _device) = create(&mut pp);

        assert_eq!((pp.BackBufferWidth, pp.BackBufferHeight), (1280, 720));
        let desc = d3d9.backend().swap_chain_descs()[0];
        assert_eq!((desc.buffer_desc.width, desc.buffer_desc.height), (1280, 720));
    }

    #[test]
    fn one_zero_dimension_replaces_both() {
        let mut pp = present_params();
        pp.BackBufferHeight = 0;

        create(&mut pp);
        assert_eq!((pp.BackBufferWidth, pp.BackBufferHeight), (1280, 720));
    }

    #[test]
    fn explicit_dimensions_are_kept() {
        let mut pp = present_params();
        pp.BackBufferWidth = 640;
        pp.BackBufferHeight = 360;

        let (d3d9, _device) = create(&mut pp);

        let desc = d3d9.backend().swap_chain_descs()[0];
        assert_eq!((desc.buffer_desc.width, desc.buffer_desc.height), (640, 360));
        assert_eq!((pp.BackBufferWidth, pp.BackBufferHeight), (640, 360));
    }

    #[test]
    fn focus_window_is_the_fallback() {
        let mut pp = present_params();
        pp.hDeviceWindow = Hwnd::NULL;
        pp.BackBufferWidth = 0;

        let (d3d9, _device) = create(&mut pp);

        assert_eq!((pp.BackBufferWidth, pp.BackBufferHeight), (800, 600));
        assert_eq!(d3d9.backend().swap_chain_descs()[0].output_window, FOCUS_WINDOW);
    }

    #[test]
    fn back_buffer_count_is_clamped() {
        let mut pp = present_params();
        pp.BackBufferCount = 3;
        let (d3d9, _device) = create(&mut pp);
        assert_eq!(pp.BackBufferCount, 1);
        assert_eq!(d3d9.backend().swap_chain_descs()[0].buffer_count, 1);

        let mut pp = present_params();
        pp.BackBufferCount = 0;
        create(&mut pp);
        assert_eq!(pp.BackBufferCount, 1);
    }

    #[test]
    fn swap_effect_is_forced_to_discard() {
        let mut pp = present_params();
        pp.SwapEffect = D3DSWAPEFFECT::FLIP;
        pp.MultiSampleType = D3DMULTISAMPLE_TYPE::SAMPLES_4;

        let ((d3d9, _device), records) = capture_logs(|| create(&mut pp));

        let desc = d3d9.backend().swap_chain_descs()[0];
        assert_eq!(desc.swap_effect, SwapEffect::Discard);
        assert_eq!(desc.sample_desc.count, 1);
        assert_eq!(desc.sample_desc.quality, 0);
        assert!(logged(&records, Level::Warn, "Disabling multisampling"));
    }

    #[test]
    fn multisampling_is_disabled_with_discard_too() {
        let mut pp = present_params();
        pp.MultiSampleType = D3DMULTISAMPLE_TYPE::SAMPLES_8;
        pp.MultiSampleQuality = 2;

        let ((d3d9, _device), records) = capture_logs(|| create(&mut pp));

        let desc = d3d9.backend().swap_chain_descs()[0];
        assert_eq!((desc.sample_desc.count, desc.sample_desc.quality), (1, 0));
        assert!(!records.iter().any(|(level, _)| *level == Level::Warn));
    }

    #[test]
    fn refresh_rate_defaults_to_60() {
        let mut pp = present_params();
        pp.FullScreen_RefreshRateInHz = 144;
        let (d3d9, _device) = create(&mut pp);
        assert_eq!(
            d3d9.backend().swap_chain_descs()[0].buffer_desc.refresh_rate,
            Rational::new(60, 1)
        );

        let mut pp = present_params();
        pp.Windowed = FALSE;
        let (d3d9, _device) = create(&mut pp);
        assert_eq!(
            d3d9.backend().swap_chain_descs()[0].buffer_desc.refresh_rate,
            Rational::new(60, 1)
        );
    }

    #[test]
    fn fullscreen_refresh_rate_is_honored() {
        let mut pp = present_params();
        pp.Windowed = FALSE;
        pp.FullScreen_RefreshRateInHz = 75;

        let (d3d9, _device) = create(&mut pp);

        let desc = d3d9.backend().swap_chain_descs()[0];
        assert_eq!(desc.buffer_desc.refresh_rate, Rational::new(75, 1));
        assert!(!desc.windowed);
    }

    #[test]
    fn swap_chain_descriptor() {
        let mut pp = present_params();
        let (d3d9, _device) = create(&mut pp);

        let desc = d3d9.backend().swap_chain_descs()[0];
        assert_eq!(desc.buffer_desc.format, DxgiFormat::B8G8R8X8_UNORM);
        assert_eq!(desc.buffer_usage, usage::BACK_BUFFER | usage::RENDER_TARGET_OUTPUT);
        assert_eq!(desc.output_window, DEVICE_WINDOW);
        assert!(desc.windowed);
        assert_eq!(desc.flags, 0);
    }

    #[test]
    fn device_is_created_with_defaults() {
        let mut pp = present_params();
        let (d3d9, _device) = create(&mut pp);

        let info = &d3d9.backend().device_create_infos()[0];
        assert_eq!(info.driver_type, DriverType::Unknown);
        assert_eq!(info.flags, 0);
        assert!(info.feature_levels.is_empty());
        assert_eq!(info.sdk_version, D3D11_SDK_VERSION);
    }

    #[test]
    fn device_creation_failure() {
        let d3d9 = factory();
        d3d9.backend().fail_device_creation(Some(E_FAIL));

        let mut pp = present_params();
        let (result, records) = capture_logs(|| create_on(&d3d9, &mut pp));

        assert!(matches!(result, Err(ShimError::DeviceCreateFailed(_))));
        assert!(logged(&records, Level::Error, "D3D11CreateDeviceAndSwapChain failed"));
    }

    #[test]
    fn back_buffer_failure() {
        let d3d9 = factory();
        d3d9.backend().fail_back_buffer(Some(E_FAIL));

        let mut pp = present_params();
        let result = create_on(&d3d9, &mut pp);
        assert!(matches!(result, Err(ShimError::BackBufferAcquireFailed(_))));
    }

    #[test]
    fn render_target_view_failure() {
        let d3d9 = factory();
        d3d9.backend().fail_render_target_view(Some(E_FAIL));

        let mut pp = present_params();
        let result = create_on(&d3d9, &mut pp);
        assert!(matches!(result, Err(ShimError::RenderTargetCreateFailed(_))));
    }

    #[test]
    fn unknown_window_without_dimensions_fails() {
        let d3d9 = factory();
        let mut pp = present_params();
        pp.hDeviceWindow = Hwnd(0x999);
        pp.BackBufferWidth = 0;

        let result = create_on(&d3d9, &mut pp);
        assert!(matches!(result, Err(ShimError::DeviceCreateFailed(_))));
        assert!(d3d9.backend().swap_chain_descs().is_empty());
    }

    #[test]
    fn auto_depth_stencil_is_not_created() {
        let mut pp = present_params();
        pp.EnableAutoDepthStencil = TRUE;
        pp.AutoDepthStencilFormat = D3DFORMAT::D24S8;

        let ((_d3d9, device), records) = capture_logs(|| create(&mut pp));

        assert!(logged(&records, Level::Error, "not yet supported"));
        let mut out = None;
        assert_eq!(device.get_depth_stencil_surface(Some(&mut out)), D3DERR_NOTFOUND);
        assert!(out.is_none());
    }

    #[test]
    fn factory_translates_failures() {
        let d3d9 = factory();
        d3d9.backend().fail_device_creation(Some(E_FAIL));

        let mut pp = present_params();
        let mut out = None;
        let hr = d3d9.create_device(
            0,
            D3DDEVTYPE::HAL,
            FOCUS_WINDOW,
            0,
            Some(&mut pp),
            Some(&mut out),
        );

        assert_eq!(hr, D3DERR_NOTAVAILABLE);
        assert!(out.is_none());
    }

    #[test]
    fn factory_creates_device() {
        let d3d9 = factory();
        let mut pp = present_params();
        pp.BackBufferCount = 2;
        let mut out = None;

        let hr = d3d9.create_device(
            0,
            D3DDEVTYPE::HAL,
            FOCUS_WINDOW,
            0x20,
            Some(&mut pp),
            Some(&mut out),
        );

        assert_eq!(hr, D3D_OK);
        assert_eq!(pp.BackBufferCount, 1);

        let device = out.unwrap();
        let mut params = D3DDEVICE_CREATION_PARAMETERS::default();
        device.get_creation_parameters(Some(&mut params));
        assert_eq!(params.BehaviorFlags, 0x20);
        assert_eq!(params.hFocusWindow, FOCUS_WINDOW);
    }
}

#[cfg(test)]
mod output_merger_tests {
    use std::rc::Rc;

    use super::fixture::*;
    use crate::d3d9::types::*;
    use crate::d3d9::{Surface, SurfaceUsage};

    #[test]
    fn render_target_is_bound_after_construction() {
        let mut pp = present_params();
        let (d3d9, device) = create(&mut pp);

        let mut render_target = None;
        assert_eq!(device.get_render_target(0, Some(&mut render_target)), D3D_OK);
        let render_target = render_target.unwrap();

        let context = d3d9.backend().last_context().unwrap();
        assert_eq!(
            context.bound_render_targets(),
            vec![render_target.render_target_view().cloned()]
        );
        assert!(context.bound_render_targets()[0].is_some());
        assert!(context.bound_depth_stencil().is_none());
        assert_eq!(context.bind_calls(), 1);
    }

    #[test]
    fn render_target_view_refers_to_back_buffer() {
        let mut pp = present_params();
        let (_d3d9, device) = create(&mut pp);

        let mut surface = None;
        device.get_back_buffer(0, 0, D3DBACKBUFFER_TYPE::MONO, Some(&mut surface));
        let surface = surface.unwrap();

        let view = surface.render_target_view().unwrap();
        assert_eq!(&view.resource, surface.texture());
    }

    #[test]
    fn depth_stencil_rebinds_output_merger() {
        let mut pp = present_params();
        let (d3d9, device) = create(&mut pp);
        let context = d3d9.backend().last_context().unwrap();

        let texture = d3d9.backend().create_texture(depth_texture_desc());
        let depth = Surface::new(&device, texture, SurfaceUsage::DepthStencil).unwrap();

        assert_eq!(device.set_depth_stencil_surface(Some(&depth)), D3D_OK);
        assert_eq!(context.bound_depth_stencil().as_ref(), depth.depth_stencil_view());
        assert!(context.bound_render_targets()[0].is_some());

        let mut current = None;
        assert_eq!(device.get_depth_stencil_surface(Some(&mut current)), D3D_OK);
        assert!(Rc::ptr_eq(current.as_ref().unwrap(), &depth));

        assert_eq!(device.set_depth_stencil_surface(None), D3D_OK);
        assert!(context.bound_depth_stencil().is_none());
        assert_eq!(context.bind_calls(), 3);
    }

    #[test]
    fn depth_stencil_requires_depth_surface() {
        let mut pp = present_params();
        let (d3d9, device) = create(&mut pp);

        let texture = d3d9.backend().create_texture(color_texture_desc());
        let color = Surface::new(&device, texture, SurfaceUsage::RenderTarget).unwrap();

        assert_eq!(device.set_depth_stencil_surface(Some(&color)), D3DERR_INVALIDCALL);
    }

    #[test]
    fn set_render_target_rebinds_slot_zero() {
        let mut pp = present_params();
        let (d3d9, device) = create(&mut pp);
        let context = d3d9.backend().last_context().unwrap();

        let texture = d3d9.backend().create_texture(color_texture_desc());
        let target = Surface::new(&device, texture, SurfaceUsage::RenderTarget).unwrap();

        assert_eq!(device.set_render_target(0, Some(&target)), D3D_OK);
        assert_eq!(
            context.bound_render_targets(),
            vec![target.render_target_view().cloned()]
        );

        let mut current = None;
        device.get_render_target(0, Some(&mut current));
        assert!(Rc::ptr_eq(current.as_ref().unwrap(), &target));

        // The back buffer is unaffected.
        let mut back_buffer = None;
        device.get_back_buffer(0, 0, D3DBACKBUFFER_TYPE::MONO, Some(&mut back_buffer));
        assert!(!Rc::ptr_eq(back_buffer.as_ref().unwrap(), &target));
    }

    #[test]
    fn set_render_target_rejects_invalid_surfaces() {
        let mut pp = present_params();
        let (d3d9, device) = create(&mut pp);

        let texture = d3d9.backend().create_texture(color_texture_desc());
        let target = Surface::new(&device, texture, SurfaceUsage::RenderTarget).unwrap();
        let depth_texture = d3d9.backend().create_texture(depth_texture_desc());
        let depth = Surface::new(&device, depth_texture, SurfaceUsage::DepthStencil).unwrap();

        assert_eq!(device.set_render_target(1, Some(&target)), D3DERR_INVALIDCALL);
        assert_eq!(device.set_render_target(0, None), D3DERR_INVALIDCALL);
        assert_eq!(device.set_render_target(0, Some(&depth)), D3DERR_INVALIDCALL);
    }

    #[test]
    fn surfaces_from_other_devices_are_rejected() {
        let mut pp = present_params();
        let (d3d9, device) = create(&mut pp);
        let mut pp = present_params();
        let other = create_on(&d3d9, &mut pp).unwrap();

        let mut foreign = None;
        other.get_render_target(0, Some(&mut foreign));

        assert_eq!(
            device.set_render_target(0, foreign.as_ref()),
            D3DERR_INVALIDCALL
        );
    }

    #[test]
    fn only_render_target_zero_exists() {
        let mut pp = present_params();
        let (_d3d9, device) = create(&mut pp);

        let mut out = None;
        assert_eq!(device.get_render_target(1, Some(&mut out)), D3DERR_INVALIDCALL);
        assert!(out.is_none());
        assert_eq!(device.get_render_target(0, None), D3DERR_INVALIDCALL);
    }
}

#[cfg(test)]
mod contract_tests {
    use std::rc::Rc;

    use super::fixture::*;
    use crate::d3d9::types::*;
    use crate::d3d9::D3DCAPS9;
    use crate::error::ShimError;
    use crate::test_support::{capture_logs, logged};
    use log::Level;

    #[test]
    fn query_interface_returns_same_device() {
        let mut pp = present_params();
        let (_d3d9, device) = create(&mut pp);

        for iid in [IID_IUNKNOWN, IID_IDIRECT3DDEVICE9] {
            let before = Rc::strong_count(&device);
            let mut out = None;

            assert_eq!(device.query_interface(&iid, &mut out), S_OK);
            assert!(Rc::ptr_eq(out.as_ref().unwrap(), &device));
            assert_eq!(Rc::strong_count(&device), before + 1);
        }
    }

    #[test]
    fn query_interface_unknown_id() {
        let mut pp = present_params();
        let (_d3d9, device) = create(&mut pp);

        let mut out = Some(Rc::clone(&device));
        let (hr, records) = capture_logs(|| device.query_interface(&IID_IDIRECT3DSURFACE9, &mut out));

        assert_eq!(hr, E_NOINTERFACE);
        assert!(out.is_none());
        assert!(logged(&records, Level::Warn, &IID_IDIRECT3DSURFACE9.to_string()));
    }

    #[test]
    fn get_direct3d_returns_parent() {
        let mut pp = present_params();
        let (d3d9, device) = create(&mut pp);

        let mut parent = None;
        assert_eq!(device.get_direct3d(Some(&mut parent)), D3D_OK);
        assert!(Rc::ptr_eq(parent.as_ref().unwrap(), &d3d9));
        assert_eq!(device.get_direct3d(None), D3DERR_INVALIDCALL);
    }

    #[test]
    fn parent_is_observed_not_owned() {
        let mut pp = present_params();
        let (d3d9, device) = create(&mut pp);
        assert!(device.adapter().is_some());

        drop(d3d9);

        let mut parent = None;
        assert_eq!(device.get_direct3d(Some(&mut parent)), D3DERR_INVALIDCALL);
        assert!(parent.is_none());
        assert!(device.adapter().is_none());
    }

    #[test]
    fn device_caps() {
        let mut pp = present_params();
        let (_d3d9, device) = create(&mut pp);

        let mut caps = D3DCAPS9::default();
        assert_eq!(device.get_device_caps(Some(&mut caps)), D3D_OK);
        assert_eq!(caps.DeviceType, D3DDEVTYPE::HAL);
        assert_eq!(caps.AdapterOrdinal, 0);
        assert_eq!(device.get_device_caps(None), D3DERR_INVALIDCALL);
    }

    #[test]
    fn creation_parameters_round_trip() {
        let mut pp = present_params();
        let (_d3d9, device) = create(&mut pp);

        let mut params = D3DDEVICE_CREATION_PARAMETERS::default();
        assert_eq!(device.get_creation_parameters(Some(&mut params)), D3D_OK);
        assert_eq!(params, creation_params());
        assert_eq!(device.get_creation_parameters(None), D3DERR_INVALIDCALL);
    }

    #[test]
    fn back_buffer_lookup() {
        let mut pp = present_params();
        let (_d3d9, device) = create(&mut pp);

        let mut back_buffer = None;
        let mut render_target = None;
        assert_eq!(
            device.get_back_buffer(0, 0, D3DBACKBUFFER_TYPE::MONO, Some(&mut back_buffer)),
            D3D_OK
        );
        device.get_render_target(0, Some(&mut render_target));
        assert!(Rc::ptr_eq(back_buffer.as_ref().unwrap(), render_target.as_ref().unwrap()));

        let mut out = None;
        assert_eq!(
            device.get_back_buffer(0, 1, D3DBACKBUFFER_TYPE::MONO, Some(&mut out)),
            D3DERR_INVALIDCALL
        );
        assert_eq!(
            device.get_back_buffer(1, 0, D3DBACKBUFFER_TYPE::MONO, Some(&mut out)),
            D3DERR_INVALIDCALL
        );
        assert!(out.is_none());
    }

    #[test]
    fn stubs_fail_loudly() {
        let mut pp = present_params();
        let (_d3d9, device) = create(&mut pp);

        let (results, records) = capture_logs(|| {
            vec![
                ("TestCooperativeLevel", device.test_cooperative_level().err()),
                ("Reset", device.reset(Some(&mut present_params())).err()),
                ("GetAvailableTextureMem", device.get_available_texture_mem().err()),
                ("EvictManagedResources", device.evict_managed_resources().err()),
            ]
        });

        for (method, error) in results {
            match error {
                Some(ShimError::NotSupported { method: name }) => assert_eq!(name, method),
                other => panic!("{} returned {:?}", method, other),
            }
            assert!(logged(&records, Level::Error, &format!("{} stub", method)));
        }
    }
}

#[cfg(test)]
mod surface_tests {
    use std::rc::Rc;

    use super::fixture::*;
    use crate::d3d9::types::*;
    use crate::d3d9::{Surface, SurfaceUsage, SurfaceView};
    use crate::error::ShimError;
    use dxgi_interop::{bind, DxgiFormat, Texture2DDesc};

    #[test]
    fn back_buffer_description() {
        let mut pp = present_params();
        let (_d3d9, device) = create(&mut pp);

        let mut surface = None;
        device.get_back_buffer(0, 0, D3DBACKBUFFER_TYPE::MONO, Some(&mut surface));
        let surface = surface.unwrap();

        let mut desc = D3DSURFACE_DESC::default();
        assert_eq!(surface.get_desc(Some(&mut desc)), D3D_OK);
        assert_eq!(
            desc,
            D3DSURFACE_DESC {
                Format: D3DFORMAT::X8R8G8B8,
                Type: D3DRESOURCETYPE::SURFACE,
                Usage: D3DUSAGE_RENDERTARGET,
                Pool: D3DPOOL::DEFAULT,
                MultiSampleType: D3DMULTISAMPLE_TYPE::NONE,
                MultiSampleQuality: 0,
                Width: 640,
                Height: 480,
            }
        );
        assert_eq!(surface.get_desc(None), D3DERR_INVALIDCALL);
    }

    #[test]
    fn surface_knows_its_device() {
        let mut pp = present_params();
        let (_d3d9, device) = create(&mut pp);

        let mut surface = None;
        device.get_render_target(0, Some(&mut surface));
        let surface = surface.unwrap();

        let mut owner = None;
        assert_eq!(surface.get_device(Some(&mut owner)), D3D_OK);
        assert!(Rc::ptr_eq(owner.as_ref().unwrap(), &device));

        drop(owner);
        drop(device);

        let mut owner = None;
        assert_eq!(surface.get_device(Some(&mut owner)), D3DERR_INVALIDCALL);
        assert!(owner.is_none());
    }

    #[test]
    fn surface_query_interface() {
        let mut pp = present_params();
        let (_d3d9, device) = create(&mut pp);

        let mut surface = None;
        device.get_render_target(0, Some(&mut surface));
        let surface = surface.unwrap();

        for iid in [IID_IUNKNOWN, IID_IDIRECT3DRESOURCE9, IID_IDIRECT3DSURFACE9] {
            let mut out = None;
            assert_eq!(surface.query_interface(&iid, &mut out), S_OK);
            assert!(Rc::ptr_eq(out.as_ref().unwrap(), &surface));
        }

        let mut out = None;
        assert_eq!(surface.query_interface(&IID_IDIRECT3D9, &mut out), E_NOINTERFACE);
        assert!(out.is_none());
    }

    #[test]
    fn view_kind_matches_usage() {
        let mut pp = present_params();
        let (d3d9, device) = create(&mut pp);

        let texture = d3d9.backend().create_texture(depth_texture_desc());
        let depth = Surface::new(&device, texture.clone(), SurfaceUsage::DepthStencil).unwrap();
        assert_eq!(depth.usage(), SurfaceUsage::DepthStencil);
        assert!(depth.render_target_view().is_none());
        assert_eq!(depth.depth_stencil_view().unwrap().resource, texture);

        let plain_texture = d3d9.backend().create_texture(Texture2DDesc {
            bind_flags: bind::SHADER_RESOURCE,
            ..color_texture_desc()
        });
        let plain = Surface::new(&device, plain_texture, SurfaceUsage::Plain).unwrap();
        assert!(matches!(plain.view(), SurfaceView::None));

        let mut desc = D3DSURFACE_DESC::default();
        plain.get_desc(Some(&mut desc));
        assert_eq!(desc.Usage, 0);
        assert_eq!(desc.Format, D3DFORMAT::A8R8G8B8);
    }

    #[test]
    fn depth_view_needs_depth_format() {
        let mut pp = present_params();
        let (d3d9, device) = create(&mut pp);

        let texture = d3d9.backend().create_texture(Texture2DDesc {
            format: DxgiFormat::B8G8R8A8_UNORM,
            ..depth_texture_desc()
        });
        let result = Surface::new(&device, texture, SurfaceUsage::DepthStencil);
        assert!(matches!(result, Err(ShimError::RenderTargetCreateFailed(_))));
    }
}
