//! Compositor (DXGI) and Direct3D 11 plumbing for the D3D9 driver.
//!
//! The driver core is written against the [`Backend`] trait family. On
//! Windows, [`Win32Backend`] forwards to the system runtime through the
//! `windows` crate; the `headless` feature adds an in-memory implementation.

pub mod backend;
pub mod desc;
pub mod error;
pub mod foundation;

#[cfg(any(test, feature = "headless"))]
pub mod headless;

#[cfg(windows)]
mod win;

pub use backend::{
    Backend, D3D11Device, DeviceAndSwapChain, DeviceContext, DxgiAdapter, DxgiOutput,
    DxgiSwapChain, Texture2D,
};
pub use desc::*;
pub use error::{InteropError, InteropResult};
pub use foundation::*;

#[cfg(windows)]
pub use win::Win32Backend;
