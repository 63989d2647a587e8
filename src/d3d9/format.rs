//! Legacy surface formats to compositor formats.

use dxgi_interop::DxgiFormat;

use super::types::D3DFORMAT;

/// Format used to enumerate display modes. Modes for every other format are
/// assumed to be identical to this one.
pub const MODE_LIST_FORMAT: DxgiFormat = DxgiFormat::B8G8R8A8_UNORM;

/// Maps a legacy surface format to its compositor equivalent.
///
/// Formats without a direct equivalent map to `DxgiFormat::UNKNOWN`.
pub fn surface_format_to_dxgi(format: D3DFORMAT) -> DxgiFormat {
    match format {
        D3DFORMAT::A8R8G8B8 => DxgiFormat::B8G8R8A8_UNORM,
        D3DFORMAT::X8R8G8B8 => DxgiFormat::B8G8R8X8_UNORM,
        D3DFORMAT::R5G6B5 => DxgiFormat::B5G6R5_UNORM,
        D3DFORMAT::A1R5G5B5 | D3DFORMAT::X1R5G5B5 => DxgiFormat::B5G5R5A1_UNORM,
        D3DFORMAT::A4R4G4B4 => DxgiFormat::B4G4R4A4_UNORM,
        D3DFORMAT::A8B8G8R8 | D3DFORMAT::X8B8G8R8 => DxgiFormat::R8G8B8A8_UNORM,
        D3DFORMAT::A2B10G10R10 => DxgiFormat::R10G10B10A2_UNORM,
        D3DFORMAT::A16B16G16R16F => DxgiFormat::R16G16B16A16_FLOAT,
        D3DFORMAT::D16 | D3DFORMAT::D16_LOCKABLE => DxgiFormat::D16_UNORM,
        D3DFORMAT::D24S8 | D3DFORMAT::D24X8 => DxgiFormat::D24_UNORM_S8_UINT,
        D3DFORMAT::D32F_LOCKABLE => DxgiFormat::D32_FLOAT,
        _ => DxgiFormat::UNKNOWN,
    }
}

/// Inverse of [`surface_format_to_dxgi`] for the formats a surface can report.
pub fn dxgi_format_to_surface(format: DxgiFormat) -> D3DFORMAT {
    match format {
        DxgiFormat::B8G8R8A8_UNORM => D3DFORMAT::A8R8G8B8,
        DxgiFormat::B8G8R8X8_UNORM => D3DFORMAT::X8R8G8B8,
        DxgiFormat::B5G6R5_UNORM => D3DFORMAT::R5G6B5,
        DxgiFormat::B5G5R5A1_UNORM => D3DFORMAT::A1R5G5B5,
        DxgiFormat::B4G4R4A4_UNORM => D3DFORMAT::A4R4G4B4,
        DxgiFormat::R8G8B8A8_UNORM => D3DFORMAT::A8B8G8R8,
        DxgiFormat::R10G10B10A2_UNORM => D3DFORMAT::A2B10G10R10,
        DxgiFormat::R16G16B16A16_FLOAT => D3DFORMAT::A16B16G16R16F,
        DxgiFormat::D16_UNORM => D3DFORMAT::D16,
        DxgiFormat::D24_UNORM_S8_UINT => D3DFORMAT::D24S8,
        DxgiFormat::D32_FLOAT => D3DFORMAT::D32F_LOCKABLE,
        _ => D3DFORMAT::UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_buffer_formats() {
        assert_eq!(
            surface_format_to_dxgi(D3DFORMAT::X8R8G8B8),
            DxgiFormat::B8G8R8X8_UNORM
        );
        assert_eq!(
            surface_format_to_dxgi(D3DFORMAT::A8R8G8B8),
            DxgiFormat::B8G8R8A8_UNORM
        );
        assert_eq!(surface_format_to_dxgi(D3DFORMAT::R8G8B8), DxgiFormat::UNKNOWN);
    }

    #[test]
    fn test_depth_formats_map_to_depth() {
        for format in [D3DFORMAT::D16, D3DFORMAT::D24S8, D3DFORMAT::D24X8, D3DFORMAT::D32F_LOCKABLE] {
            assert!(surface_format_to_dxgi(format).is_depth(), "{:?}", format);
        }
    }

    #[test]
    fn test_reverse_mapping() {
        for format in [D3DFORMAT::A8R8G8B8, D3DFORMAT::X8R8G8B8, D3DFORMAT::D24S8] {
            assert_eq!(dxgi_format_to_surface(surface_format_to_dxgi(format)), format);
        }
    }
}
