use std::sync::mpsc::Receiver;

use ash::vk;
use ash::vk::Handle;
use vk_triangle_common::config::Configs;
use vk_triangle_common::{SetupError, SetupResult};

pub const WINDOW_TITLE: &str = "Hello Triangle";

pub fn init_glfw() -> SetupResult<glfw::Glfw> {
    let glfw = glfw::init(glfw::LOG_ERRORS)
        .map_err(|err| SetupError::Platform(format!("failed to initialize GLFW: {:?}", err)))?;
    if !glfw.vulkan_supported() {
        return Err(SetupError::Platform("GLFW reports no Vulkan loader".to_string()));
    }
    Ok(glfw)
}

/// Instance extensions the window system needs for presentation.
pub fn window_instance_extensions(glfw: &glfw::Glfw) -> SetupResult<Vec<String>> {
    glfw.get_required_instance_extensions()
        .ok_or_else(|| SetupError::Platform("no Vulkan surface extensions available".to_string()))
}

pub struct AppWindow {
    pub glfw: glfw::Glfw,
    pub window: glfw::Window,
    events: Receiver<(f64, glfw::WindowEvent)>,
}

impl AppWindow {
    pub fn new(config: &Configs, visible: bool) -> SetupResult<Self> {
        let mut glfw = init_glfw()?;
        glfw.window_hint(glfw::WindowHint::ClientApi(glfw::ClientApiHint::NoApi));
        glfw.window_hint(glfw::WindowHint::Resizable(false));
        glfw.window_hint(glfw::WindowHint::Visible(visible));

        let (width, height) = (config.width, config.height);
        let fullscreen = config.fullscreen;
        let created = glfw.with_primary_monitor(|glfw, m| {
            glfw.create_window(
                width,
                height,
                WINDOW_TITLE,
                if fullscreen {
                    m.map_or(glfw::WindowMode::Windowed, |m| glfw::WindowMode::FullScreen(m))
                } else {
                    glfw::WindowMode::Windowed
                },
            )
        });
        let (mut window, events) = created
            .ok_or_else(|| SetupError::Platform("failed to create window".to_string()))?;
        window.set_close_polling(true);
        window.set_key_polling(true);
        log::info!(
            "window created ({}x{}{})",
            width,
            height,
            if config.fullscreen { ", fullscreen" } else { "" }
        );

        Ok(Self {
            glfw,
            window,
            events,
        })
    }

    pub fn required_instance_extensions(&self) -> SetupResult<Vec<String>> {
        window_instance_extensions(&self.glfw)
    }

    pub unsafe fn create_surface(&self, instance: &ash::Instance) -> SetupResult<vk::SurfaceKHR> {
        let mut raw_surface: vk_sys::SurfaceKHR = 0;
        let result = self.window.create_window_surface(
            instance.handle().as_raw() as vk_sys::Instance,
            std::ptr::null(),
            &mut raw_surface,
        );
        if result != 0 {
            return Err(SetupError::Platform(format!(
                "failed to create window surface ({})",
                result
            )));
        }
        Ok(vk::SurfaceKHR::from_raw(raw_surface))
    }

    /// Framebuffer size in pixels, which differs from the window size on high density displays.
    pub fn drawable_extent(&self) -> vk::Extent2D {
        let (width, height) = self.window.get_framebuffer_size();
        vk::Extent2D {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }
    }

    /// Blocks on window events until the user closes the window or presses Escape.
    pub fn run(&mut self) {
        while !self.window.should_close() {
            self.glfw.wait_events();
            for (_, event) in glfw::flush_messages(&self.events) {
                match event {
                    glfw::WindowEvent::Close => log::debug!("close requested"),
                    glfw::WindowEvent::Key(glfw::Key::Escape, _, glfw::Action::Press, _) => {
                        self.window.set_should_close(true)
                    }
                    _ => {}
                }
            }
        }
        log::info!("window closed");
    }
}
