/*!
# GPU Interop - Direct3D 12 Backend

Direct3D 12 implementation of the gpu_interop device and command traits.

Native entry points are reached through the [`d3d12_native::NativeDevice`],
[`d3d12_native::NativeCommandList`] and [`d3d12_native::NativeCommandQueue`]
traits, implemented by the hooking layer on top of the real COM interfaces.
*/

// Native seam and descriptor conversion (public for the hooking layer)
pub mod d3d12_native;
pub mod d3d12_convert;

// Device, command lists and queues
mod d3d12_device;
mod d3d12_command_list;

#[cfg(test)]
mod d3d12_mock;

pub use d3d12_device::D3D12Device;
pub use d3d12_command_list::{D3D12CommandList, D3D12CommandQueue};
