//  05_create_swapchain
#[macro_use(defer)]
extern crate scopeguard;
use ash::extensions::khr;
use vk_triangle_common::device::LogicalDevice;
use vk_triangle_common::swapchain::{create_image_views, destroy_image_views, Swapchain};
use vk_triangle_common::{config, instance, probe, selection, swapchain_params, REQUIRED_DEVICE_EXTENSIONS};
use vulkan_triangle_ash::window::AppWindow;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let config = config::Configs::new("create_swapchain");
    let mut app_window = AppWindow::new(&config, true)?;

    let entry = unsafe { ash::Entry::load()? };
    let instance = unsafe {
        instance::create_instance(&entry, &config, &app_window.required_instance_extensions()?)?
    };
    defer! {
        unsafe { instance.destroy_instance(None); }
    }

    let messenger = if config.validation {
        Some(unsafe { instance::DebugMessenger::new(&entry, &instance, config.debug_mode)? })
    } else {
        None
    };
    defer! {
        if let Some(messenger) = &messenger {
            unsafe { messenger.destroy(); }
        }
    }

    let surface_loader = khr::Surface::new(&entry, &instance);
    let surface = unsafe { app_window.create_surface(&instance)? };
    defer! {
        unsafe { surface_loader.destroy_surface(surface, None); }
    }

    let candidates = unsafe { probe::enumerate_candidates(&instance, &surface_loader, surface)? };
    let selected = selection::select_device(candidates, REQUIRED_DEVICE_EXTENSIONS)?;

    let logical_device = unsafe { LogicalDevice::new(&instance, &selected, config.validation)? };
    defer! {
        unsafe { logical_device.destroy(); }
    }

    let params = swapchain_params::derive_swapchain_params(
        &selected.swapchain_support,
        &selected.queue_families,
        app_window.drawable_extent(),
    )?;
    let swapchain = unsafe { Swapchain::new(&instance, &logical_device.device, surface, &params)? };
    defer! {
        unsafe { swapchain.destroy(); }
    }

    let image_views =
        unsafe { create_image_views(&logical_device.device, &swapchain.images, swapchain.format)? };
    defer! {
        unsafe { destroy_image_views(&logical_device.device, &image_views); }
    }

    log::info!(
        "{} ready: {} image views at {}x{}",
        config.prog_name,
        image_views.len(),
        swapchain.extent.width,
        swapchain.extent.height
    );

    app_window.run();

    unsafe { logical_device.device.device_wait_idle()? };
    Ok(())
}
