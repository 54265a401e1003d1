use ash::extensions::khr;
use ash::vk;

use crate::error::SetupResult;

#[derive(Clone, Debug, Default)]
pub struct SwapchainSupportDetails {
    pub capabilities: vk::SurfaceCapabilitiesKHR,
    pub formats: Vec<vk::SurfaceFormatKHR>,
    pub present_modes: Vec<vk::PresentModeKHR>,
}

impl SwapchainSupportDetails {
    pub unsafe fn query(
        surface_loader: &khr::Surface,
        physical_device: vk::PhysicalDevice,
        surface: vk::SurfaceKHR,
    ) -> SetupResult<Self> {
        let capabilities =
            surface_loader.get_physical_device_surface_capabilities(physical_device, surface)?;
        let formats = surface_loader.get_physical_device_surface_formats(physical_device, surface)?;
        let present_modes =
            surface_loader.get_physical_device_surface_present_modes(physical_device, surface)?;

        log::trace!(
            "supported formats ({}): {:?}",
            formats.len(),
            formats.iter().map(|f| f.format).collect::<Vec<_>>()
        );

        Ok(Self {
            capabilities,
            formats,
            present_modes,
        })
    }

    /// Presentation needs at least one format and one present mode.
    pub fn is_adequate(&self) -> bool {
        !self.formats.is_empty() && !self.present_modes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adequacy_needs_formats_and_modes() {
        let mut details = SwapchainSupportDetails::default();
        assert!(!details.is_adequate());

        details.formats.push(vk::SurfaceFormatKHR {
            format: vk::Format::B8G8R8A8_SRGB,
            color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
        });
        assert!(!details.is_adequate());

        details.present_modes.push(vk::PresentModeKHR::FIFO);
        assert!(details.is_adequate());

        details.formats.clear();
        assert!(!details.is_adequate());
    }
}
