//! Error types for glowtrail.
//!
//! The particle core is total and never fails. Errors only come from the
//! edges: loading configuration, creating the window and setting up the GPU.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reported no usable texture formats.
    NoSurfaceFormat,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
            GpuError::NoSurfaceFormat => write!(f, "Surface does not support any texture format"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur while loading or validating configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    Io(std::io::Error),
    /// The configuration file is not valid JSON for [`EffectConfig`](crate::EffectConfig).
    Parse(serde_json::Error),
    /// The theme table is empty.
    NoThemes,
    /// A color string could not be parsed.
    InvalidColor(String),
    /// A numeric setting is out of range.
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::NoThemes => write!(f, "At least one theme is required"),
            ConfigError::InvalidColor(s) => write!(f, "Invalid color '{}', expected #rgb or #rrggbb", s),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid setting: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Errors that can occur when running an effect.
#[derive(Debug)]
pub enum EffectError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The effect configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for EffectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            EffectError::Window(e) => write!(f, "Failed to create window: {}", e),
            EffectError::Gpu(e) => write!(f, "GPU error: {}", e),
            EffectError::Config(e) => write!(f, "Configuration error: {}", e),
        }
    }
}

impl std::error::Error for EffectError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EffectError::EventLoop(e) => Some(e),
            EffectError::Window(e) => Some(e),
            EffectError::Gpu(e) => Some(e),
            EffectError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for EffectError {
    fn from(e: winit::error::EventLoopError) -> Self {
        EffectError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for EffectError {
    fn from(e: winit::error::OsError) -> Self {
        EffectError::Window(e)
    }
}

impl From<GpuError> for EffectError {
    fn from(e: GpuError) -> Self {
        EffectError::Gpu(e)
    }
}

impl From<ConfigError> for EffectError {
    fn from(e: ConfigError) -> Self {
        EffectError::Config(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidColor("#12".into());
        assert!(err.to_string().contains("#12"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_effect_error_wraps_config_source() {
        let err = EffectError::from(ConfigError::NoThemes);
        assert!(err.to_string().starts_with("Configuration error"));
        assert!(err.source().is_some());
    }
}
