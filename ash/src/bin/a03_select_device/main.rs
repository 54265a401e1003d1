//  03_select_device
#[macro_use(defer)]
extern crate scopeguard;
use ash::extensions::khr;
use vk_triangle_common::{config, instance, probe, selection, swapchain_params, REQUIRED_DEVICE_EXTENSIONS};
use vulkan_triangle_ash::window::AppWindow;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let config = config::Configs::new("select_device");
    let app_window = AppWindow::new(&config, false)?;

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
    let params = swapchain_params::derive_swapchain_params(
        &selected.swapchain_support,
        &selected.queue_families,
        app_window.drawable_extent(),
    )?;

    println!("selected device: {}", selected.name);
    println!(
        "  queue families: graphics {}, present {}",
        selected.queue_families.graphics, selected.queue_families.present
    );
    println!("  swapchain");
    println!(
        "    format {:?} / {:?}",
        params.surface_format.format, params.surface_format.color_space
    );
    println!("    present mode {:?}", params.present_mode);
    println!("    extent {}x{}", params.extent.width, params.extent.height);
    println!("    images {}", params.min_image_count);
    println!("    sharing {:?}", params.image_sharing.mode());

    Ok(())
}
