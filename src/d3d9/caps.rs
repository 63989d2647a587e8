//! Device capabilities.
//!
//! Every adapter reports the same fixed capability set: a shader model 3.0
//! part with a single back buffer and up to four simultaneous render targets.

#![allow(non_snake_case)]

use super::types::D3DDEVTYPE;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DVSHADERCAPS2_0 {
    pub Caps: u32,
    pub DynamicFlowControlDepth: i32,
    pub NumTemps: i32,
    pub StaticFlowControlDepth: i32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct D3DPSHADERCAPS2_0 {
    pub Caps: u32,
    pub DynamicFlowControlDepth: i32,
    pub NumTemps: i32,
    pub StaticFlowControlDepth: i32,
    pub NumInstructionSlots: i32,
}

/// `D3DCAPS9` from `d3d9caps.h`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct D3DCAPS9 {
    pub DeviceType: D3DDEVTYPE,
    pub AdapterOrdinal: u32,
    pub Caps: u32,
    pub Caps2: u32,
    pub Caps3: u32,
    pub PresentationIntervals: u32,
    pub CursorCaps: u32,
    pub DevCaps: u32,
    pub PrimitiveMiscCaps: u32,
    pub RasterCaps: u32,
    pub ZCmpCaps: u32,
    pub SrcBlendCaps: u32,
    pub DestBlendCaps: u32,
    pub AlphaCmpCaps: u32,
    pub ShadeCaps: u32,
    pub TextureCaps: u32,
    pub TextureFilterCaps: u32,
    pub CubeTextureFilterCaps: u32,
    pub VolumeTextureFilterCaps: u32,
    pub TextureAddressCaps: u32,
    pub VolumeTextureAddressCaps: u32,
    pub LineCaps: u32,
    pub MaxTextureWidth: u32,
    pub MaxTextureHeight: u32,
    pub MaxVolumeExtent: u32,
    pub MaxTextureRepeat: u32,
    pub MaxTextureAspectRatio: u32,
    pub MaxAnisotropy: u32,
    pub MaxVertexW: f32,
    pub GuardBandLeft: f32,
    pub GuardBandTop: f32,
    pub GuardBandRight: f32,
    pub GuardBandBottom: f32,
    pub ExtentsAdjust: f32,
    pub StencilCaps: u32,
    pub FVFCaps: u32,
    pub TextureOpCaps: u32,
    pub MaxTextureBlendStages: u32,
    pub MaxSimultaneousTextures: u32,
    pub VertexProcessingCaps: u32,
    pub MaxActiveLights: u32,
    pub MaxUserClipPlanes: u32,
    pub MaxVertexBlendMatrices: u32,
    pub MaxVertexBlendMatrixIndex: u32,
    pub MaxPointSize: f32,
    pub MaxPrimitiveCount: u32,
    pub MaxVertexIndex: u32,
    pub MaxStreams: u32,
    pub MaxStreamStride: u32,
    pub VertexShaderVersion: u32,
    pub MaxVertexShaderConst: u32,
    pub PixelShaderVersion: u32,
    pub PixelShader1xMaxValue: f32,
    pub DevCaps2: u32,
    pub MaxNpatchTessellationLevel: f32,
    pub Reserved5: u32,
    pub MasterAdapterOrdinal: u32,
    pub AdapterOrdinalInGroup: u32,
    pub NumberOfAdaptersInGroup: u32,
    pub DeclTypes: u32,
    pub NumSimultaneousRTs: u32,
    pub StretchRectFilterCaps: u32,
    pub VS20Caps: D3DVSHADERCAPS2_0,
    pub PS20Caps: D3DPSHADERCAPS2_0,
    pub VertexTextureFilterCaps: u32,
    pub MaxVShaderInstructionsExecuted: u32,
    pub MaxPShaderInstructionsExecuted: u32,
    pub MaxVertexShader30InstructionSlots: u32,
    pub MaxPixelShader30InstructionSlots: u32,
}

const fn vs_version(major: u32, minor: u32) -> u32 {
    0xFFFE_0000 | (major << 8) | minor
}

const fn ps_version(major: u32, minor: u32) -> u32 {
    0xFFFF_0000 | (major << 8) | minor
}

// Capability bits, named as in d3d9caps.h.
mod bits {
    pub const CAPS_READ_SCANLINE: u32 = 0x0002_0000;

    pub const CAPS2_FULLSCREENGAMMA: u32 = 0x0002_0000;
    pub const CAPS2_CANMANAGERESOURCE: u32 = 0x1000_0000;
    pub const CAPS2_DYNAMICTEXTURES: u32 = 0x2000_0000;
    pub const CAPS2_CANAUTOGENMIPMAP: u32 = 0x4000_0000;

    pub const CAPS3_ALPHA_FULLSCREEN_FLIP_OR_DISCARD: u32 = 0x0000_0020;
    pub const CAPS3_LINEAR_TO_SRGB_PRESENTATION: u32 = 0x0000_0080;
    pub const CAPS3_COPY_TO_VIDMEM: u32 = 0x0000_0100;
    pub const CAPS3_COPY_TO_SYSTEMMEM: u32 = 0x0000_0200;

    pub const PRESENT_INTERVAL_ONE: u32 = 0x0000_0001;
    pub const PRESENT_INTERVAL_TWO: u32 = 0x0000_0002;
    pub const PRESENT_INTERVAL_THREE: u32 = 0x0000_0004;
    pub const PRESENT_INTERVAL_FOUR: u32 = 0x0000_0008;
    pub const PRESENT_INTERVAL_IMMEDIATE: u32 = 0x8000_0000;

    pub const CURSORCAPS_COLOR: u32 = 0x0000_0001;
    pub const CURSORCAPS_LOWRES: u32 = 0x0000_0002;

    pub const DEVCAPS_EXECUTESYSTEMMEMORY: u32 = 0x0000_0010;
    pub const DEVCAPS_EXECUTEVIDEOMEMORY: u32 = 0x0000_0020;
    pub const DEVCAPS_TLVERTEXSYSTEMMEMORY: u32 = 0x0000_0040;
    pub const DEVCAPS_TLVERTEXVIDEOMEMORY: u32 = 0x0000_0080;
    pub const DEVCAPS_TEXTURESYSTEMMEMORY: u32 = 0x0000_0100;
    pub const DEVCAPS_TEXTUREVIDEOMEMORY: u32 = 0x0000_0200;
    pub const DEVCAPS_DRAWPRIMTLVERTEX: u32 = 0x0000_0400;
    pub const DEVCAPS_CANRENDERAFTERFLIP: u32 = 0x0000_0800;
    pub const DEVCAPS_TEXTURENONLOCALVIDMEM: u32 = 0x0000_1000;
    pub const DEVCAPS_DRAWPRIMITIVES2: u32 = 0x0000_2000;
    pub const DEVCAPS_DRAWPRIMITIVES2EX: u32 = 0x0000_8000;
    pub const DEVCAPS_HWTRANSFORMANDLIGHT: u32 = 0x0001_0000;
    pub const DEVCAPS_CANBLTSYSTONONLOCAL: u32 = 0x0002_0000;
    pub const DEVCAPS_HWRASTERIZATION: u32 = 0x0008_0000;
    pub const DEVCAPS_PUREDEVICE: u32 = 0x0010_0000;

    pub const PMISCCAPS_MASKZ: u32 = 0x0000_0002;
    pub const PMISCCAPS_CULLNONE: u32 = 0x0000_0010;
    pub const PMISCCAPS_CULLCW: u32 = 0x0000_0020;
    pub const PMISCCAPS_CULLCCW: u32 = 0x0000_0040;
    pub const PMISCCAPS_COLORWRITEENABLE: u32 = 0x0000_0080;
    pub const PMISCCAPS_CLIPTLVERTS: u32 = 0x0000_0200;
    pub const PMISCCAPS_BLENDOP: u32 = 0x0000_0800;
    pub const PMISCCAPS_INDEPENDENTWRITEMASKS: u32 = 0x0000_4000;
    pub const PMISCCAPS_SEPARATEALPHABLEND: u32 = 0x0002_0000;
    pub const PMISCCAPS_MRTINDEPENDENTBITDEPTHS: u32 = 0x0004_0000;
    pub const PMISCCAPS_MRTPOSTPIXELSHADERBLENDING: u32 = 0x0008_0000;

    pub const PRASTERCAPS_DITHER: u32 = 0x0000_0001;
    pub const PRASTERCAPS_ZTEST: u32 = 0x0000_0010;
    pub const PRASTERCAPS_FOGVERTEX: u32 = 0x0000_0080;
    pub const PRASTERCAPS_FOGTABLE: u32 = 0x0000_0100;
    pub const PRASTERCAPS_MIPMAPLODBIAS: u32 = 0x0000_2000;
    pub const PRASTERCAPS_ZBIAS: u32 = 0x0000_4000;
    pub const PRASTERCAPS_FOGRANGE: u32 = 0x0001_0000;
    pub const PRASTERCAPS_ANISOTROPY: u32 = 0x0002_0000;
    pub const PRASTERCAPS_SCISSORTEST: u32 = 0x0100_0000;
    pub const PRASTERCAPS_SLOPESCALEDEPTHBIAS: u32 = 0x0200_0000;
    pub const PRASTERCAPS_DEPTHBIAS: u32 = 0x0400_0000;

    /// All eight comparison functions.
    pub const PCMPCAPS_ALL: u32 = 0x0000_00FF;
    /// ZERO through BLENDFACTOR/INVBLENDFACTOR.
    pub const PBLENDCAPS_ALL: u32 = 0x0000_3FFF;

    pub const PSHADECAPS_COLORGOURAUDRGB: u32 = 0x0000_0008;
    pub const PSHADECAPS_SPECULARGOURAUDRGB: u32 = 0x0000_0200;
    pub const PSHADECAPS_ALPHAGOURAUDBLEND: u32 = 0x0000_4000;
    pub const PSHADECAPS_FOGGOURAUD: u32 = 0x0008_0000;

    pub const PTEXTURECAPS_PERSPECTIVE: u32 = 0x0000_0001;
    pub const PTEXTURECAPS_ALPHA: u32 = 0x0000_0004;
    pub const PTEXTURECAPS_PROJECTED: u32 = 0x0000_0400;
    pub const PTEXTURECAPS_CUBEMAP: u32 = 0x0000_0800;
    pub const PTEXTURECAPS_VOLUMEMAP: u32 = 0x0000_2000;
    pub const PTEXTURECAPS_MIPMAP: u32 = 0x0000_4000;
    pub const PTEXTURECAPS_MIPVOLUMEMAP: u32 = 0x0000_8000;
    pub const PTEXTURECAPS_MIPCUBEMAP: u32 = 0x0001_0000;

    pub const PTFILTERCAPS_MINFPOINT: u32 = 0x0000_0100;
    pub const PTFILTERCAPS_MINFLINEAR: u32 = 0x0000_0200;
    pub const PTFILTERCAPS_MINFANISOTROPIC: u32 = 0x0000_0400;
    pub const PTFILTERCAPS_MIPFPOINT: u32 = 0x0001_0000;
    pub const PTFILTERCAPS_MIPFLINEAR: u32 = 0x0002_0000;
    pub const PTFILTERCAPS_MAGFPOINT: u32 = 0x0100_0000;
    pub const PTFILTERCAPS_MAGFLINEAR: u32 = 0x0200_0000;
    pub const PTFILTERCAPS_MAGFANISOTROPIC: u32 = 0x0400_0000;

    /// WRAP, MIRROR, CLAMP, BORDER, INDEPENDENTUV, MIRRORONCE.
    pub const PTADDRESSCAPS_ALL: u32 = 0x0000_003F;

    pub const LINECAPS_TEXTURE: u32 = 0x0000_0001;
    pub const LINECAPS_ZTEST: u32 = 0x0000_0002;
    pub const LINECAPS_BLEND: u32 = 0x0000_0004;
    pub const LINECAPS_ALPHACMP: u32 = 0x0000_0008;
    pub const LINECAPS_FOG: u32 = 0x0000_0010;

    /// KEEP through DECR, plus TWOSIDED.
    pub const STENCILCAPS_ALL: u32 = 0x0000_01FF;

    /// Texture coordinate sets, stored in the TEXCOORDCOUNTMASK bits.
    pub const FVFCAPS_TEXCOORDCOUNT: u32 = 8;
    pub const FVFCAPS_PSIZE: u32 = 0x0010_0000;

    /// Every texture stage operation up to LERP.
    pub const TEXOPCAPS_ALL: u32 = 0x03FF_FFFF;

    pub const VTXPCAPS_TEXGEN: u32 = 0x0000_0001;
    pub const VTXPCAPS_MATERIALSOURCE7: u32 = 0x0000_0002;
    pub const VTXPCAPS_DIRECTIONALLIGHTS: u32 = 0x0000_0008;
    pub const VTXPCAPS_POSITIONALLIGHTS: u32 = 0x0000_0010;
    pub const VTXPCAPS_LOCALVIEWER: u32 = 0x0000_0020;
    pub const VTXPCAPS_TWEENING: u32 = 0x0000_0040;
    pub const VTXPCAPS_TEXGEN_SPHEREMAP: u32 = 0x0000_0100;

    pub const DEVCAPS2_STREAMOFFSET: u32 = 0x0000_0001;
    pub const DEVCAPS2_CAN_STRETCHRECT_FROM_TEXTURES: u32 = 0x0000_0010;
    pub const DEVCAPS2_VERTEXELEMENTSCANSHARESTREAMOFFSET: u32 = 0x0000_0040;

    /// UBYTE4 through FLOAT16_4.
    pub const DTCAPS_ALL: u32 = 0x0000_03FF;

    pub const VS20CAPS_PREDICATION: u32 = 0x0000_0001;
    /// ARBITRARYSWIZZLE, GRADIENTINSTRUCTIONS, PREDICATION,
    /// NODEPENDENTREADLIMIT and NOTEXINSTRUCTIONLIMIT.
    pub const PS20CAPS_ALL: u32 = 0x0000_001F;
}

use bits::*;

/// Writes the fixed capability record for `ordinal`.
pub fn fill_caps(ordinal: u32, caps: &mut D3DCAPS9) {
    let filter = PTFILTERCAPS_MINFPOINT
        | PTFILTERCAPS_MINFLINEAR
        | PTFILTERCAPS_MINFANISOTROPIC
        | PTFILTERCAPS_MIPFPOINT
        | PTFILTERCAPS_MIPFLINEAR
        | PTFILTERCAPS_MAGFPOINT
        | PTFILTERCAPS_MAGFLINEAR
        | PTFILTERCAPS_MAGFANISOTROPIC;

    *caps = D3DCAPS9 {
        DeviceType: D3DDEVTYPE::HAL,
        AdapterOrdinal: ordinal,
        Caps: CAPS_READ_SCANLINE,
        Caps2: CAPS2_FULLSCREENGAMMA
            | CAPS2_CANMANAGERESOURCE
            | CAPS2_DYNAMICTEXTURES
            | CAPS2_CANAUTOGENMIPMAP,
        Caps3: CAPS3_ALPHA_FULLSCREEN_FLIP_OR_DISCARD
            | CAPS3_LINEAR_TO_SRGB_PRESENTATION
            | CAPS3_COPY_TO_VIDMEM
            | CAPS3_COPY_TO_SYSTEMMEM,
        PresentationIntervals: PRESENT_INTERVAL_ONE
            | PRESENT_INTERVAL_TWO
            | PRESENT_INTERVAL_THREE
            | PRESENT_INTERVAL_FOUR
            | PRESENT_INTERVAL_IMMEDIATE,
        CursorCaps: CURSORCAPS_COLOR | CURSORCAPS_LOWRES,
        DevCaps: DEVCAPS_EXECUTESYSTEMMEMORY
            | DEVCAPS_EXECUTEVIDEOMEMORY
            | DEVCAPS_TLVERTEXSYSTEMMEMORY
            | DEVCAPS_TLVERTEXVIDEOMEMORY
            | DEVCAPS_TEXTURESYSTEMMEMORY
            | DEVCAPS_TEXTUREVIDEOMEMORY
            | DEVCAPS_DRAWPRIMTLVERTEX
            | DEVCAPS_CANRENDERAFTERFLIP
            | DEVCAPS_TEXTURENONLOCALVIDMEM
            | DEVCAPS_DRAWPRIMITIVES2
            | DEVCAPS_DRAWPRIMITIVES2EX
            | DEVCAPS_HWTRANSFORMANDLIGHT
            | DEVCAPS_CANBLTSYSTONONLOCAL
            | DEVCAPS_HWRASTERIZATION
            | DEVCAPS_PUREDEVICE,
        PrimitiveMiscCaps: PMISCCAPS_MASKZ
            | PMISCCAPS_CULLNONE
            | PMISCCAPS_CULLCW
            | PMISCCAPS_CULLCCW
            | PMISCCAPS_COLORWRITEENABLE
            | PMISCCAPS_CLIPTLVERTS
            | PMISCCAPS_BLENDOP
            | PMISCCAPS_INDEPENDENTWRITEMASKS
            | PMISCCAPS_SEPARATEALPHABLEND
            | PMISCCAPS_MRTINDEPENDENTBITDEPTHS
            | PMISCCAPS_MRTPOSTPIXELSHADERBLENDING,
        RasterCaps: PRASTERCAPS_DITHER
            | PRASTERCAPS_ZTEST
            | PRASTERCAPS_FOGVERTEX
            | PRASTERCAPS_FOGTABLE
            | PRASTERCAPS_MIPMAPLODBIAS
            | PRASTERCAPS_ZBIAS
            | PRASTERCAPS_FOGRANGE
            | PRASTERCAPS_ANISOTROPY
            | PRASTERCAPS_SCISSORTEST
            | PRASTERCAPS_SLOPESCALEDEPTHBIAS
            | PRASTERCAPS_DEPTHBIAS,
        ZCmpCaps: PCMPCAPS_ALL,
        SrcBlendCaps: PBLENDCAPS_ALL,
        DestBlendCaps: PBLENDCAPS_ALL,
        AlphaCmpCaps: PCMPCAPS_ALL,
        ShadeCaps: PSHADECAPS_COLORGOURAUDRGB
            | PSHADECAPS_SPECULARGOURAUDRGB
            | PSHADECAPS_ALPHAGOURAUDBLEND
            | PSHADECAPS_FOGGOURAUD,
        TextureCaps: PTEXTURECAPS_PERSPECTIVE
            | PTEXTURECAPS_ALPHA
            | PTEXTURECAPS_PROJECTED
            | PTEXTURECAPS_CUBEMAP
            | PTEXTURECAPS_VOLUMEMAP
            | PTEXTURECAPS_MIPMAP
            | PTEXTURECAPS_MIPVOLUMEMAP
            | PTEXTURECAPS_MIPCUBEMAP,
        TextureFilterCaps: filter,
        CubeTextureFilterCaps: filter,
        VolumeTextureFilterCaps: filter,
        TextureAddressCaps: PTADDRESSCAPS_ALL,
        VolumeTextureAddressCaps: PTADDRESSCAPS_ALL,
        LineCaps: LINECAPS_TEXTURE | LINECAPS_ZTEST | LINECAPS_BLEND | LINECAPS_ALPHACMP | LINECAPS_FOG,
        MaxTextureWidth: 16384,
        MaxTextureHeight: 16384,
        MaxVolumeExtent: 2048,
        MaxTextureRepeat: 8192,
        MaxTextureAspectRatio: 8192,
        MaxAnisotropy: 16,
        MaxVertexW: 1e10,
        GuardBandLeft: -32768.0,
        GuardBandTop: -32768.0,
        GuardBandRight: 32768.0,
        GuardBandBottom: 32768.0,
        ExtentsAdjust: 0.0,
        StencilCaps: STENCILCAPS_ALL,
        FVFCaps: FVFCAPS_TEXCOORDCOUNT | FVFCAPS_PSIZE,
        TextureOpCaps: TEXOPCAPS_ALL,
        MaxTextureBlendStages: 8,
        MaxSimultaneousTextures: 8,
        VertexProcessingCaps: VTXPCAPS_TEXGEN
            | VTXPCAPS_MATERIALSOURCE7
            | VTXPCAPS_DIRECTIONALLIGHTS
            | VTXPCAPS_POSITIONALLIGHTS
            | VTXPCAPS_LOCALVIEWER
            | VTXPCAPS_TWEENING
            | VTXPCAPS_TEXGEN_SPHEREMAP,
        MaxActiveLights: 8,
        MaxUserClipPlanes: 6,
        MaxVertexBlendMatrices: 4,
        MaxVertexBlendMatrixIndex: 8,
        MaxPointSize: 256.0,
        MaxPrimitiveCount: 0x0055_5555,
        MaxVertexIndex: 0x00FF_FFFF,
        MaxStreams: 16,
        MaxStreamStride: 508,
        VertexShaderVersion: vs_version(3, 0),
        MaxVertexShaderConst: 256,
        PixelShaderVersion: ps_version(3, 0),
        PixelShader1xMaxValue: 8.0,
        DevCaps2: DEVCAPS2_STREAMOFFSET
            | DEVCAPS2_CAN_STRETCHRECT_FROM_TEXTURES
            | DEVCAPS2_VERTEXELEMENTSCANSHARESTREAMOFFSET,
        MaxNpatchTessellationLevel: 0.0,
        Reserved5: 0,
        MasterAdapterOrdinal: 0,
        AdapterOrdinalInGroup: 0,
        NumberOfAdaptersInGroup: 1,
        DeclTypes: DTCAPS_ALL,
        NumSimultaneousRTs: 4,
        StretchRectFilterCaps: PTFILTERCAPS_MINFPOINT
            | PTFILTERCAPS_MINFLINEAR
            | PTFILTERCAPS_MAGFPOINT
            | PTFILTERCAPS_MAGFLINEAR,
        VS20Caps: D3DVSHADERCAPS2_0 {
            Caps: VS20CAPS_PREDICATION,
            DynamicFlowControlDepth: 24,
            NumTemps: 32,
            StaticFlowControlDepth: 4,
        },
        PS20Caps: D3DPSHADERCAPS2_0 {
            Caps: PS20CAPS_ALL,
            DynamicFlowControlDepth: 24,
            NumTemps: 32,
            StaticFlowControlDepth: 4,
            NumInstructionSlots: 512,
        },
        VertexTextureFilterCaps: PTFILTERCAPS_MINFPOINT | PTFILTERCAPS_MAGFPOINT,
        MaxVShaderInstructionsExecuted: u32::MAX,
        MaxPShaderInstructionsExecuted: u32::MAX,
        MaxVertexShader30InstructionSlots: 32768,
        MaxPixelShader30InstructionSlots: 32768,
    };
}
