//! Direct3D 9 driver that runs on Direct3D 11 and DXGI.
//!
//! The host loads this library in place of the system `d3d9.dll`. Adapters
//! and devices are translated onto the modern runtime through the
//! [`dxgi_interop::Backend`] abstraction, so the same code runs against the
//! Windows compositor or the in-memory `headless` backend.

pub mod config;
pub mod d3d9;
pub mod error;
pub mod logging;

#[cfg(test)]
mod test_support;

pub use config::DriverConfig;
pub use d3d9::{Adapter, Device, Direct3D9, Surface, SurfaceUsage, SurfaceView};
pub use error::{ShimError, ShimResult};

#[cfg(windows)]
pub use d3d9::direct3d_create9;
