//  02_list_devices
#[macro_use(defer)]
extern crate scopeguard;
use ash::extensions::khr;
use ash::vk;
use vk_triangle_common::{config, instance, probe, selection, REQUIRED_DEVICE_EXTENSIONS};
use vulkan_triangle_ash::window::AppWindow;

fn device_type_name(device_type: vk::PhysicalDeviceType) -> &'static str {
    match device_type {
        vk::PhysicalDeviceType::INTEGRATED_GPU => "integrated GPU",
        vk::PhysicalDeviceType::DISCRETE_GPU => "discrete GPU",
        vk::PhysicalDeviceType::VIRTUAL_GPU => "virtual GPU",
        vk::PhysicalDeviceType::CPU => "CPU",
        _ => "other device",
    }
}

fn version(ver: u32) -> String {
    format!(
        "{}.{}.{}",
        vk::api_version_major(ver),
        vk::api_version_minor(ver),
        vk::api_version_patch(ver)
    )
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let config = config::Configs::new("list_devices");
    // Suitability depends on presentation support, which needs a surface.
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
    if candidates.is_empty() {
        eprintln!("no Vulkan devices available");
        return Ok(());
    }

    for (index, candidate) in candidates.iter().enumerate() {
        let props = unsafe { instance.get_physical_device_properties(candidate.handle) };
        println!("{}: {} ({})", index, candidate.name, device_type_name(props.device_type));
        println!("  API version");
        println!("    {}", version(props.api_version));
        println!("  driver version");
        println!("    {}", version(props.driver_version));
        println!("  vendor ID");
        println!("    {:#06x}", props.vendor_id);
        println!("  device ID");
        println!("    {:#06x}", props.device_id);
        println!("  queue families");
        for (family, support) in candidate.queue_families.iter().enumerate() {
            println!(
                "    {}: {:?}{}",
                family,
                support.flags,
                if support.present { ", present" } else { "" }
            );
        }

        if config.list {
            println!("  extensions");
            for name in candidate.extensions.iter() {
                println!("    {}", name);
            }
        }

        match selection::check_suitability(candidate, REQUIRED_DEVICE_EXTENSIONS) {
            Ok(families) => println!(
                "  suitable (graphics queue family {}, present queue family {})",
                families.graphics, families.present
            ),
            Err(reason) => println!("  not suitable: {}", reason),
        }
    }

    Ok(())
}
