//! Swapchain parameter negotiation for a selected device.
//!
//! Every function here only reads the support details captured during
//! device selection.

use ash::vk;

use crate::error::{SetupError, SetupResult};
use crate::queue_family::QueueFamilies;
use crate::swapchain_support::SwapchainSupportDetails;

/// `current_extent.width` value meaning the window, not the surface, decides the extent.
pub const UNDEFINED_EXTENT_WIDTH: u32 = u32::MAX;

pub const PREFERRED_SURFACE_FORMAT: vk::SurfaceFormatKHR = vk::SurfaceFormatKHR {
    format: vk::Format::B8G8R8A8_SRGB,
    color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SurfaceExtent {
    /// The surface dictates the swapchain extent exactly.
    SurfaceDefined(vk::Extent2D),
    /// The extent follows the drawable size, within the surface limits.
    WindowDefined,
}

impl SurfaceExtent {
    pub fn from_capabilities(capabilities: &vk::SurfaceCapabilitiesKHR) -> Self {
        if capabilities.current_extent.width == UNDEFINED_EXTENT_WIDTH {
            SurfaceExtent::WindowDefined
        } else {
            SurfaceExtent::SurfaceDefined(capabilities.current_extent)
        }
    }
}

/// The preferred BGRA8 sRGB pair if offered, otherwise whatever comes first.
///
/// The fallback does not rank the remaining formats.
pub fn choose_surface_format(formats: &[vk::SurfaceFormatKHR]) -> Option<vk::SurfaceFormatKHR> {
    formats
        .iter()
        .find(|f| {
            f.format == PREFERRED_SURFACE_FORMAT.format
                && f.color_space == PREFERRED_SURFACE_FORMAT.color_space
        })
        .or_else(|| formats.first())
        .copied()
}

/// Mailbox when available; FIFO is always supported.
pub fn choose_present_mode(present_modes: &[vk::PresentModeKHR]) -> vk::PresentModeKHR {
    if present_modes.contains(&vk::PresentModeKHR::MAILBOX) {
        vk::PresentModeKHR::MAILBOX
    } else {
        vk::PresentModeKHR::FIFO
    }
}

pub fn choose_extent(capabilities: &vk::SurfaceCapabilitiesKHR, drawable: vk::Extent2D) -> vk::Extent2D {
    match SurfaceExtent::from_capabilities(capabilities) {
        SurfaceExtent::SurfaceDefined(extent) => extent,
        SurfaceExtent::WindowDefined => vk::Extent2D {
            width: clamp(
                drawable.width,
                capabilities.min_image_extent.width,
                capabilities.max_image_extent.width,
            ),
            height: clamp(
                drawable.height,
                capabilities.min_image_extent.height,
                capabilities.max_image_extent.height,
            ),
        },
    }
}

// `Ord::clamp` panics on min > max, which a misbehaving driver could report.
fn clamp(value: u32, min: u32, max: u32) -> u32 {
    value.max(min).min(max)
}

/// One image above the minimum, bounded by the maximum unless that is 0 (unbounded).
pub fn choose_image_count(capabilities: &vk::SurfaceCapabilitiesKHR) -> u32 {
    let image_count = capabilities.min_image_count + 1;
    if capabilities.max_image_count > 0 {
        image_count.min(capabilities.max_image_count)
    } else {
        image_count
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ImageSharing {
    Exclusive,
    Concurrent([u32; 2]),
}

impl ImageSharing {
    pub fn for_families(families: &QueueFamilies) -> Self {
        if families.is_shared() {
            ImageSharing::Exclusive
        } else {
            ImageSharing::Concurrent([families.graphics, families.present])
        }
    }

    pub fn mode(&self) -> vk::SharingMode {
        match self {
            ImageSharing::Exclusive => vk::SharingMode::EXCLUSIVE,
            ImageSharing::Concurrent(_) => vk::SharingMode::CONCURRENT,
        }
    }

    pub fn queue_family_indices(&self) -> &[u32] {
        match self {
            ImageSharing::Exclusive => &[],
            ImageSharing::Concurrent(indices) => &indices[..],
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct SwapchainParams {
    pub surface_format: vk::SurfaceFormatKHR,
    pub present_mode: vk::PresentModeKHR,
    pub extent: vk::Extent2D,
    pub min_image_count: u32,
    pub image_sharing: ImageSharing,
    pub image_usage: vk::ImageUsageFlags,
    pub image_array_layers: u32,
    pub pre_transform: vk::SurfaceTransformFlagsKHR,
    pub composite_alpha: vk::CompositeAlphaFlagsKHR,
    pub clipped: bool,
}

impl SwapchainParams {
    /// First-time creation info; there is never an old swapchain to hand over.
    pub fn create_info(&self, surface: vk::SurfaceKHR) -> vk::SwapchainCreateInfoKHRBuilder<'_> {
        vk::SwapchainCreateInfoKHR::builder()
            .surface(surface)
            .min_image_count(self.min_image_count)
            .image_format(self.surface_format.format)
            .image_color_space(self.surface_format.color_space)
            .image_extent(self.extent)
            .image_array_layers(self.image_array_layers)
            .image_usage(self.image_usage)
            .image_sharing_mode(self.image_sharing.mode())
            .queue_family_indices(self.image_sharing.queue_family_indices())
            .pre_transform(self.pre_transform)
            .composite_alpha(self.composite_alpha)
            .present_mode(self.present_mode)
            .clipped(self.clipped)
            .old_swapchain(vk::SwapchainKHR::null())
    }
}

pub fn derive_swapchain_params(
    support: &SwapchainSupportDetails,
    families: &QueueFamilies,
    drawable: vk::Extent2D,
) -> SetupResult<SwapchainParams> {
    let surface_format = choose_surface_format(&support.formats).ok_or(SetupError::NoSurfaceFormats)?;
    let capabilities = &support.capabilities;

    Ok(SwapchainParams {
        surface_format,
        present_mode: choose_present_mode(&support.present_modes),
        extent: choose_extent(capabilities, drawable),
        min_image_count: choose_image_count(capabilities),
        image_sharing: ImageSharing::for_families(families),
        image_usage: vk::ImageUsageFlags::COLOR_ATTACHMENT,
        image_array_layers: 1,
        pre_transform: capabilities.current_transform,
        composite_alpha: vk::CompositeAlphaFlagsKHR::OPAQUE,
        clipped: true,
    })
}
