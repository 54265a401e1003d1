use ash::extensions::khr;
use ash::vk;

use crate::error::SetupResult;
use crate::swapchain_params::SwapchainParams;

pub struct Swapchain {
    loader: khr::Swapchain,
    pub swapchain: vk::SwapchainKHR,
    pub images: Vec<vk::Image>,
    pub format: vk::Format,
    pub extent: vk::Extent2D,
}

impl Swapchain {
    pub unsafe fn new(
        instance: &ash::Instance,
        device: &ash::Device,
        surface: vk::SurfaceKHR,
        params: &SwapchainParams,
    ) -> SetupResult<Self> {
        let loader = khr::Swapchain::new(instance, device);
        let swapchain = loader.create_swapchain(&params.create_info(surface), None)?;
        let images = match loader.get_swapchain_images(swapchain) {
            Ok(images) => images,
            Err(err) => {
                loader.destroy_swapchain(swapchain, None);
                return Err(err.into());
            }
        };

        let format = params.surface_format.format;
        let extent = params.extent;
        log::info!(
            "created {} swapchain images, format {:?}, extent {}x{}, present mode {:?}",
            images.len(),
            format,
            extent.width,
            extent.height,
            params.present_mode
        );

        Ok(Self {
            loader,
            swapchain,
            images,
            format,
            extent,
        })
    }

    pub unsafe fn destroy(&self) {
        self.loader.destroy_swapchain(self.swapchain, None);
    }
}

pub unsafe fn create_image_views(
    device: &ash::Device,
    images: &[vk::Image],
    format: vk::Format,
) -> SetupResult<Vec<vk::ImageView>> {
    let mut views = Vec::with_capacity(images.len());

    for image in images {
        let create_info = vk::ImageViewCreateInfo::builder()
            .image(*image)
            .view_type(vk::ImageViewType::TYPE_2D)
            .format(format)
            .components(vk::ComponentMapping {
                r: vk::ComponentSwizzle::IDENTITY,
                g: vk::ComponentSwizzle::IDENTITY,
                b: vk::ComponentSwizzle::IDENTITY,
                a: vk::ComponentSwizzle::IDENTITY,
            })
            .subresource_range(vk::ImageSubresourceRange {
                aspect_mask: vk::ImageAspectFlags::COLOR,
                base_mip_level: 0,
                level_count: 1,
                base_array_layer: 0,
                layer_count: 1,
            });

        match device.create_image_view(&create_info, None) {
            Ok(view) => views.push(view),
            Err(err) => {
                destroy_image_views(device, &views);
                return Err(err.into());
            }
        }
    }

    Ok(views)
}

pub unsafe fn destroy_image_views(device: &ash::Device, views: &[vk::ImageView]) {
    for view in views {
        device.destroy_image_view(*view, None);
    }
}
