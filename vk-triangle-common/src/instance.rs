use std::borrow::Cow;
use std::ffi::{CStr, CString};
use std::os::raw::c_void;

use ash::extensions::ext;
use ash::vk;

use crate::config::Configs;
use crate::error::{SetupError, SetupResult};
use crate::probe::{extension_names, layer_names};
use crate::VALIDATION_LAYERS;

pub const PORTABILITY_ENUMERATION_EXTENSION: &str = "VK_KHR_portability_enumeration";

/// The window system's extensions plus what this program needs on top.
pub fn required_instance_extensions(window_extensions: &[String], validation: bool) -> Vec<String> {
    let mut extensions = window_extensions.to_vec();

    if cfg!(target_os = "macos") {
        extensions.push(PORTABILITY_ENUMERATION_EXTENSION.to_string());
    }

    if validation {
        extensions.push(ext::DebugUtils::name().to_string_lossy().into_owned());
    }

    extensions
}

pub fn check_validation_layers(available: &[String], required: &[&str]) -> SetupResult<()> {
    match required
        .iter()
        .find(|layer| !available.iter().any(|name| name == *layer))
    {
        Some(missing) => Err(SetupError::MissingValidationLayer(missing.to_string())),
        None => Ok(()),
    }
}

unsafe extern "system" fn vulkan_debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    p_callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data: *mut c_void,
) -> vk::Bool32 {
    let message = if p_callback_data.is_null() || (*p_callback_data).p_message.is_null() {
        Cow::from("")
    } else {
        CStr::from_ptr((*p_callback_data).p_message).to_string_lossy()
    };

    if message_severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::ERROR) {
        log::error!("validation layer ({:?}): {}", message_type, message);
    } else if message_severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING) {
        log::warn!("validation layer ({:?}): {}", message_type, message);
    } else if message_severity.contains(vk::DebugUtilsMessageSeverityFlagsEXT::INFO) {
        log::debug!("validation layer ({:?}): {}", message_type, message);
    } else {
        log::trace!("validation layer ({:?}): {}", message_type, message);
    }

    vk::FALSE
}

pub fn debug_messenger_create_info(verbose: bool) -> vk::DebugUtilsMessengerCreateInfoEXT {
    let mut severity =
        vk::DebugUtilsMessageSeverityFlagsEXT::WARNING | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR;
    if verbose {
        severity |=
            vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE | vk::DebugUtilsMessageSeverityFlagsEXT::INFO;
    }

    vk::DebugUtilsMessengerCreateInfoEXT::builder()
        .message_severity(severity)
        .message_type(
            vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
        )
        .pfn_user_callback(Some(vulkan_debug_callback))
        .build()
}

pub struct DebugMessenger {
    loader: ext::DebugUtils,
    messenger: vk::DebugUtilsMessengerEXT,
}

impl DebugMessenger {
    pub unsafe fn new(entry: &ash::Entry, instance: &ash::Instance, verbose: bool) -> SetupResult<Self> {
        let loader = ext::DebugUtils::new(entry, instance);
        let messenger = loader.create_debug_utils_messenger(&debug_messenger_create_info(verbose), None)?;
        Ok(Self { loader, messenger })
    }

    pub unsafe fn destroy(&self) {
        self.loader.destroy_debug_utils_messenger(self.messenger, None);
    }
}

fn to_cstrings<S: AsRef<str>>(names: &[S]) -> SetupResult<Vec<CString>> {
    names
        .iter()
        .map(|name| CString::new(name.as_ref()).map_err(SetupError::from))
        .collect()
}

/// Logs what the loader offers and fails if a requested validation layer is missing.
pub unsafe fn validation_layers(entry: &ash::Entry, validation: bool) -> SetupResult<Vec<&'static str>> {
    if !validation {
        return Ok(Vec::new());
    }

    let available = layer_names(&entry.enumerate_instance_layer_properties()?);
    log::debug!("available layers ({}):", available.len());
    for layer in available.iter() {
        log::debug!("  {}", layer);
    }

    check_validation_layers(&available, VALIDATION_LAYERS)?;
    log::info!("enabled layers: {}", VALIDATION_LAYERS.join(", "));
    Ok(VALIDATION_LAYERS.to_vec())
}

pub unsafe fn create_instance(
    entry: &ash::Entry,
    config: &Configs,
    window_extensions: &[String],
) -> SetupResult<ash::Instance> {
    let supported = entry.enumerate_instance_extension_properties(None)?;
    log::debug!("supported instance extensions ({}):", supported.len());
    for (name, ext) in extension_names(&supported).iter().zip(supported.iter()) {
        log::debug!("  {} v{}", name, ext.spec_version);
    }

    let extensions = required_instance_extensions(window_extensions, config.validation);
    log::debug!("required instance extensions ({}):", extensions.len());
    for name in extensions.iter() {
        log::debug!("  {}", name);
    }
    let supported_names = extension_names(&supported);
    if let Some(missing) = extensions.iter().find(|name| !supported_names.contains(*name)) {
        return Err(SetupError::MissingExtension(missing.clone()));
    }

    let layers = to_cstrings(&validation_layers(entry, config.validation)?)?;
    let extensions = to_cstrings(&extensions)?;
    let layers_raw = layers.iter().map(|name| name.as_ptr()).collect::<Vec<_>>();
    let extensions_raw = extensions.iter().map(|name| name.as_ptr()).collect::<Vec<_>>();

    let app_name = CString::new("Hello Triangle")?;
    let engine_name = CString::new("No Engine")?;
    let app_info = vk::ApplicationInfo::builder()
        .application_name(app_name.as_c_str())
        .application_version(vk::make_api_version(0, 1, 0, 0))
        .engine_name(engine_name.as_c_str())
        .engine_version(vk::make_api_version(0, 1, 0, 0))
        .api_version(vk::API_VERSION_1_0);

    let flags = if cfg!(target_os = "macos") {
        vk::InstanceCreateFlags::ENUMERATE_PORTABILITY_KHR
    } else {
        vk::InstanceCreateFlags::empty()
    };

    // Covers vkCreateInstance / vkDestroyInstance, which the messenger proper cannot see.
    let mut debug_info = debug_messenger_create_info(config.debug_mode);

    let mut create_info = vk::InstanceCreateInfo::builder()
        .application_info(&app_info)
        .enabled_layer_names(&layers_raw)
        .enabled_extension_names(&extensions_raw)
        .flags(flags);
    if config.validation {
        create_info = create_info.push_next(&mut debug_info);
    }

    let instance = entry.create_instance(&create_info, None)?;
    log::info!("Vulkan instance created");
    Ok(instance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn validation_adds_debug_utils() {
        let window = names(&["VK_KHR_surface", "VK_KHR_xcb_surface"]);

        let without = required_instance_extensions(&window, false);
        assert_eq!(&without[..2], &window[..]);
        assert!(!without.contains(&"VK_EXT_debug_utils".to_string()));

        let with = required_instance_extensions(&window, true);
        assert_eq!(with.last().map(String::as_str), Some("VK_EXT_debug_utils"));
        assert_eq!(
            with.contains(&PORTABILITY_ENUMERATION_EXTENSION.to_string()),
            cfg!(target_os = "macos")
        );
    }

    #[test]
    fn validation_layer_lookup() {
        let available = names(&["VK_LAYER_MESA_device_select", "VK_LAYER_KHRONOS_validation"]);
        assert!(check_validation_layers(&available, VALIDATION_LAYERS).is_ok());
        assert!(check_validation_layers(&available, &[]).is_ok());

        match check_validation_layers(&names(&["VK_LAYER_MESA_device_select"]), VALIDATION_LAYERS) {
            Err(SetupError::MissingValidationLayer(name)) => {
                assert_eq!(name, "VK_LAYER_KHRONOS_validation")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn messenger_severities() {
        let quiet = debug_messenger_create_info(false);
        assert!(quiet
            .message_severity
            .contains(vk::DebugUtilsMessageSeverityFlagsEXT::WARNING));
        assert!(!quiet
            .message_severity
            .contains(vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE));
        assert!(quiet.pfn_user_callback.is_some());

        let verbose = debug_messenger_create_info(true);
        assert!(verbose
            .message_severity
            .contains(vk::DebugUtilsMessageSeverityFlagsEXT::VERBOSE));
    }
}
