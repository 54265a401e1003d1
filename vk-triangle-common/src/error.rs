use ash::vk;
use thiserror::Error;

pub type SetupResult<T> = Result<T, SetupError>;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("failed to load the Vulkan library: {0}")]
    Loading(#[from] ash::LoadingError),
    #[error("Vulkan call failed: {0}")]
    Vulkan(#[from] vk::Result),
    #[error("no Vulkan capable device available")]
    NoPhysicalDevices,
    #[error("failed to find a suitable physical device")]
    NoSuitableDevice,
    #[error("missing required validation layer: {0}")]
    MissingValidationLayer(String),
    #[error("missing required extension: {0}")]
    MissingExtension(String),
    #[error("surface reports no formats")]
    NoSurfaceFormats,
    #[error("window system error: {0}")]
    Platform(String),
    #[error("name contains an interior NUL byte: {0}")]
    InvalidName(#[from] std::ffi::NulError),
}
