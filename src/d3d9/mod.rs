//! Direct3D 9 objects implemented over Direct3D 11 and DXGI.
//!
//! ## Architecture
//!
//! ```text
//!   Direct3D9 (factory)
//!     ├── Adapter ×N ─────────── DXGI adapter, output 0, mode list
//!     └── creates ──► Device
//!                       ├── D3D11 device + immediate context + swap chain
//!                       ├── render target ──► Surface ── back buffer + RTV
//!                       └── depth stencil ──► Surface ── texture + DSV (optional)
//! ```
//!
//! Ownership runs downward. Devices point back at their factory and adapter
//! weakly, and surfaces point back at their device weakly, so the host's
//! release order never leaves a dangling parent.
//!
//! Everything here is single-threaded: the D3D11 immediate context may only
//! be used from one thread at a time, and these objects add no locking.

pub mod adapter;
pub mod caps;
pub mod device;
pub mod format;
pub mod interface;
pub mod surface;
pub mod types;

#[cfg(test)]
mod tests;

pub use adapter::{Adapter, IdentifierOverrides};
pub use caps::{fill_caps, D3DCAPS9};
pub use device::Device;
pub use interface::Direct3D9;
pub use surface::{Surface, SurfaceUsage, SurfaceView};

#[cfg(windows)]
pub use interface::direct3d_create9;
