//! Headless wgpu device setup and the shared GPU error type.

use std::sync::Arc;
use wgpu::{Adapter, Device, Instance, Queue};

/// Errors that can occur during GPU operations.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    #[error("No suitable GPU adapter found")]
    NoAdapter,
    #[error("Failed to request device: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
    #[error("First pass target is incomplete: {format:?} lacks {missing}")]
    IncompleteTarget {
        format: wgpu::TextureFormat,
        missing: &'static str,
    },
    #[error("{resource} {what} of {requested} exceeds the device limit of {limit}")]
    Limits {
        resource: &'static str,
        what: &'static str,
        requested: u64,
        limit: u64,
    },
    #[error("Failed to read back frame: {0}")]
    Readback(String),
}

/// Headless device the scene renders with. No surface is ever created.
pub struct GpuContext {
    pub instance: Instance,
    pub adapter: Arc<Adapter>,
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
}

impl GpuContext {
    /// Create a headless context.
    ///
    /// Hardware adapters on Metal or Vulkan are preferred. CI machines without
    /// a GPU usually only expose a software rasterizer (llvmpipe over GL or
    /// lavapipe over Vulkan), so the fallback adapter is requested second.
    pub async fn new() -> Result<Self, GpuError> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::METAL | wgpu::Backends::VULKAN | wgpu::Backends::GL,
            ..Default::default()
        });

        let adapter = match request_adapter(&instance, false).await {
            Some(adapter) => adapter,
            None => {
                log::warn!("No hardware adapter, trying the fallback adapter");
                request_adapter(&instance, true)
                    .await
                    .ok_or(GpuError::NoAdapter)?
            }
        };

        // The renderer checks resolution and mesh sizes against these limits.
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("ribbon-scene"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await?;

        let info = adapter.get_info();
        log::info!(
            "Using GPU adapter {} ({:?}, {:?})",
            info.name,
            info.backend,
            info.device_type
        );

        Ok(Self {
            instance,
            adapter: Arc::new(adapter),
            device: Arc::new(device),
            queue: Arc::new(queue),
        })
    }

    /// Get info about the GPU adapter.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Limits the device was created with.
    pub fn limits(&self) -> wgpu::Limits {
        self.device.limits()
    }
}

async fn request_adapter(instance: &Instance, fallback: bool) -> Option<Adapter> {
    instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: fallback,
            compatible_surface: None,
        })
        .await
        .ok()
}
