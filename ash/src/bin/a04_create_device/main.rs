//  04_create_device
#[macro_use(defer)]
extern crate scopeguard;
use ash::extensions::khr;
use vk_triangle_common::device::LogicalDevice;
use vk_triangle_common::{config, instance, probe, selection, REQUIRED_DEVICE_EXTENSIONS};
use vulkan_triangle_ash::window::AppWindow;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let config = config::Configs::new("create_device");
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

    let logical_device = unsafe { LogicalDevice::new(&instance, &selected, config.validation)? };
    defer! {
        unsafe { logical_device.destroy(); }
    }

    println!("logical device created on {}", selected.name);
    println!(
        "  graphics queue {:?} (family {})",
        logical_device.graphics_queue, selected.queue_families.graphics
    );
    println!(
        "  present queue {:?} (family {})",
        logical_device.present_queue, selected.queue_families.present
    );

    Ok(())
}
