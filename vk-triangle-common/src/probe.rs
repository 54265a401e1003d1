use std::ffi::CStr;
use std::os::raw::c_char;

use ash::extensions::khr;
use ash::vk;

use crate::error::SetupResult;
use crate::queue_family::QueueFamilySupport;
use crate::selection::DeviceCandidate;
use crate::swapchain_support::SwapchainSupportDetails;

/// Reads a NUL terminated fixed size name as Vulkan reports them.
pub fn name_from_raw(raw: &[c_char]) -> String {
    let bytes = raw
        .iter()
        .take_while(|c| **c != 0)
        .map(|c| *c as u8)
        .collect::<Vec<_>>();
    String::from_utf8_lossy(&bytes).into_owned()
}

pub fn extension_names(properties: &[vk::ExtensionProperties]) -> Vec<String> {
    properties
        .iter()
        .map(|ext| name_from_raw(&ext.extension_name))
        .collect()
}

pub fn layer_names(properties: &[vk::LayerProperties]) -> Vec<String> {
    properties
        .iter()
        .map(|layer| name_from_raw(&layer.layer_name))
        .collect()
}

pub unsafe fn device_name(instance: &ash::Instance, physical_device: vk::PhysicalDevice) -> String {
    let props = instance.get_physical_device_properties(physical_device);
    CStr::from_ptr(props.device_name.as_ptr())
        .to_string_lossy()
        .into_owned()
}

pub unsafe fn probe_device(
    instance: &ash::Instance,
    surface_loader: &khr::Surface,
    surface: vk::SurfaceKHR,
    physical_device: vk::PhysicalDevice,
) -> SetupResult<DeviceCandidate<vk::PhysicalDevice>> {
    let queue_families = instance
        .get_physical_device_queue_family_properties(physical_device)
        .iter()
        .enumerate()
        .map(|(index, props)| -> SetupResult<QueueFamilySupport> {
            let present = surface_loader.get_physical_device_surface_support(
                physical_device,
                index as u32,
                surface,
            )?;
            Ok(QueueFamilySupport::new(props.queue_flags, present))
        })
        .collect::<SetupResult<Vec<_>>>()?;

    let extensions = extension_names(&instance.enumerate_device_extension_properties(physical_device)?);
    let swapchain_support = SwapchainSupportDetails::query(surface_loader, physical_device, surface)?;

    Ok(DeviceCandidate {
        handle: physical_device,
        name: device_name(instance, physical_device),
        queue_families,
        extensions,
        swapchain_support,
    })
}

/// All physical devices in the order the platform enumerates them.
pub unsafe fn enumerate_candidates(
    instance: &ash::Instance,
    surface_loader: &khr::Surface,
    surface: vk::SurfaceKHR,
) -> SetupResult<Vec<DeviceCandidate<vk::PhysicalDevice>>> {
    instance
        .enumerate_physical_devices()?
        .into_iter()
        .map(|physical_device| probe_device(instance, surface_loader, surface, physical_device))
        .collect()
}
