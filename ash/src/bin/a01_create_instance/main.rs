//  01_create_instance
#[macro_use(defer)]
extern crate scopeguard;
use vk_triangle_common::{config, instance};
use vulkan_triangle_ash::window;

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let config = config::Configs::new("create_instance");
    let glfw = window::init_glfw()?;
    let window_extensions = window::window_instance_extensions(&glfw)?;

    let entry = unsafe { ash::Entry::load()? };
    let instance = unsafe { instance::create_instance(&entry, &config, &window_extensions)? };
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

    println!("instance created");
    println!("  extensions");
    for name in instance::required_instance_extensions(&window_extensions, config.validation) {
        println!("    {}", name);
    }
    println!("  validation {}", if config.validation { "enabled" } else { "disabled" });

    Ok(())
}
