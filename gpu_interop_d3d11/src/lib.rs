/*!
# GPU Interop - Direct3D 11 Backend

Direct3D 11 implementation of the gpu_interop device and command traits.

Native entry points are reached through the [`d3d11_native::NativeDevice`]
and [`d3d11_native::NativeDeviceContext`] traits, implemented by the hooking
layer on top of the real COM interfaces. Everything above that seam (handle
registries, descriptor conversion, error mapping) lives here.
*/

// Native seam and descriptor conversion (public for the hooking layer)
pub mod d3d11_native;
pub mod d3d11_convert;

// Device and execution contexts
mod d3d11_device;
mod d3d11_command_list;

#[cfg(test)]
mod d3d11_mock;

pub use d3d11_device::D3D11Device;
pub use d3d11_command_list::{D3D11DeviceContext, D3D11CommandList};
