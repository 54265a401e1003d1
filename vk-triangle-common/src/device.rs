use std::ffi::CString;

use ash::vk;

use crate::error::SetupResult;
use crate::selection::SelectedDevice;
use crate::{REQUIRED_DEVICE_EXTENSIONS, VALIDATION_LAYERS};

pub struct LogicalDevice {
    pub device: ash::Device,
    pub graphics_queue: vk::Queue,
    pub present_queue: vk::Queue,
}

impl LogicalDevice {
    pub unsafe fn new(
        instance: &ash::Instance,
        selected: &SelectedDevice<vk::PhysicalDevice>,
        validation: bool,
    ) -> SetupResult<Self> {
        let families = selected.queue_families;
        let priorities = [1.0_f32];
        let queue_infos = families
            .unique()
            .into_iter()
            .map(|index| {
                vk::DeviceQueueCreateInfo::builder()
                    .queue_family_index(index)
                    .queue_priorities(&priorities)
                    .build()
            })
            .collect::<Vec<_>>();

        let extensions = REQUIRED_DEVICE_EXTENSIONS
            .iter()
            .map(|name| CString::new(*name))
            .collect::<Result<Vec<_>, _>>()?;
        let extensions_raw = extensions.iter().map(|name| name.as_ptr()).collect::<Vec<_>>();

        // Device layers are ignored by current loaders but still honoured by older ones.
        let layers = if validation {
            VALIDATION_LAYERS
                .iter()
                .map(|name| CString::new(*name))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            Vec::new()
        };
        let layers_raw = layers.iter().map(|name| name.as_ptr()).collect::<Vec<_>>();

        let features = vk::PhysicalDeviceFeatures::default();
        let create_info = vk::DeviceCreateInfo::builder()
            .queue_create_infos(&queue_infos)
            .enabled_extension_names(&extensions_raw)
            .enabled_layer_names(&layers_raw)
            .enabled_features(&features);

        let device = instance.create_device(selected.handle, &create_info, None)?;
        let graphics_queue = device.get_device_queue(families.graphics, 0);
        let present_queue = device.get_device_queue(families.present, 0);

        log::info!(
            "logical device created with {} queue famil{}",
            queue_infos.len(),
            if queue_infos.len() == 1 { "y" } else { "ies" }
        );

        Ok(Self {
            device,
            graphics_queue,
            present_queue,
        })
    }

    pub unsafe fn destroy(&self) {
        self.device.destroy_device(None);
    }
}
