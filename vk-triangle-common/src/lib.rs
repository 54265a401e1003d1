pub mod config;
pub mod device;
pub mod error;
pub mod instance;
pub mod probe;
pub mod queue_family;
pub mod selection;
pub mod swapchain;
pub mod swapchain_params;
pub mod swapchain_support;

pub use error::{SetupError, SetupResult};

/// Device extensions every selected device must offer.
pub const REQUIRED_DEVICE_EXTENSIONS: &[&str] = &["VK_KHR_swapchain"];

pub const VALIDATION_LAYERS: &[&str] = &["VK_LAYER_KHRONOS_validation"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swapchain_extension_name_matches_loader() {
        assert_eq!(
            ash::extensions::khr::Swapchain::name().to_str().unwrap(),
            REQUIRED_DEVICE_EXTENSIONS[0]
        );
    }
}
