use std::collections::HashSet;
use std::fmt;

use crate::error::{SetupError, SetupResult};
use crate::queue_family::{QueueFamilies, QueueFamilyIndices, QueueFamilySupport};
use crate::swapchain_support::SwapchainSupportDetails;

/// Everything the selector needs to know about one physical device.
///
/// The handle type is left open so the selection can run over plain values;
/// the application instantiates it with `vk::PhysicalDevice`.
#[derive(Clone, Debug)]
pub struct DeviceCandidate<H> {
    pub handle: H,
    pub name: String,
    pub queue_families: Vec<QueueFamilySupport>,
    pub extensions: Vec<String>,
    pub swapchain_support: SwapchainSupportDetails,
}

#[derive(Clone, Debug)]
pub struct SelectedDevice<H> {
    pub handle: H,
    pub name: String,
    pub queue_families: QueueFamilies,
    pub swapchain_support: SwapchainSupportDetails,
}

/// Why a candidate was rejected, in the order the checks are made.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Unsuitability {
    IncompleteQueueFamilies,
    MissingExtensions(Vec<String>),
    NoSurfaceFormats,
    NoPresentModes,
}

impl fmt::Display for Unsuitability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unsuitability::IncompleteQueueFamilies => {
                write!(f, "no graphics and present queue families")
            }
            Unsuitability::MissingExtensions(names) => {
                write!(f, "missing device extensions: {}", names.join(", "))
            }
            Unsuitability::NoSurfaceFormats => write!(f, "surface reports no formats"),
            Unsuitability::NoPresentModes => write!(f, "surface reports no present modes"),
        }
    }
}

/// Set inclusion of `required` in `available`, exact and case sensitive.
/// The error holds the missing names in `required` order.
pub fn check_device_extensions(available: &[String], required: &[&str]) -> Result<(), Vec<String>> {
    let available = available.iter().map(String::as_str).collect::<HashSet<_>>();
    let missing = required
        .iter()
        .filter(|name| !available.contains(*name))
        .map(|name| name.to_string())
        .collect::<Vec<_>>();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

pub fn check_suitability<H>(
    candidate: &DeviceCandidate<H>,
    required_extensions: &[&str],
) -> Result<QueueFamilies, Unsuitability> {
    let queue_families = QueueFamilyIndices::find(&candidate.queue_families)
        .complete()
        .ok_or(Unsuitability::IncompleteQueueFamilies)?;

    check_device_extensions(&candidate.extensions, required_extensions)
        .map_err(Unsuitability::MissingExtensions)?;

    if candidate.swapchain_support.formats.is_empty() {
        return Err(Unsuitability::NoSurfaceFormats);
    }
    if candidate.swapchain_support.present_modes.is_empty() {
        return Err(Unsuitability::NoPresentModes);
    }

    Ok(queue_families)
}

pub fn is_suitable<H>(candidate: &DeviceCandidate<H>, required_extensions: &[&str]) -> bool {
    check_suitability(candidate, required_extensions).is_ok()
}

/// Picks the first suitable candidate in enumeration order. Candidates after
/// the winner are never examined.
pub fn select_device<H, I>(candidates: I, required_extensions: &[&str]) -> SetupResult<SelectedDevice<H>>
where
    I: IntoIterator<Item = DeviceCandidate<H>>,
{
    let mut seen_any = false;

    for candidate in candidates {
        seen_any = true;
        match check_suitability(&candidate, required_extensions) {
            Ok(queue_families) => {
                log::info!(
                    "selected physical device `{}` (graphics family {}, present family {})",
                    candidate.name,
                    queue_families.graphics,
                    queue_families.present
                );
                return Ok(SelectedDevice {
                    handle: candidate.handle,
                    name: candidate.name,
                    queue_families,
                    swapchain_support: candidate.swapchain_support,
                });
            }
            Err(reason) => {
                log::warn!("skipping physical device `{}`: {}", candidate.name, reason);
            }
        }
    }

    if seen_any {
        Err(SetupError::NoSuitableDevice)
    } else {
        Err(SetupError::NoPhysicalDevices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::REQUIRED_DEVICE_EXTENSIONS;
    use ash::vk;

    fn support(formats: &[vk::Format], present_modes: &[vk::PresentModeKHR]) -> SwapchainSupportDetails {
        SwapchainSupportDetails {
            capabilities: vk::SurfaceCapabilitiesKHR::default(),
            formats: formats
                .iter()
                .map(|&format| vk::SurfaceFormatKHR {
                    format,
                    color_space: vk::ColorSpaceKHR::SRGB_NONLINEAR,
                })
                .collect(),
            present_modes: present_modes.to_vec(),
        }
    }

    fn candidate(handle: u32, name: &str) -> DeviceCandidate<u32> {
        DeviceCandidate {
            handle,
            name: name.to_string(),
            queue_families: vec![QueueFamilySupport::new(vk::QueueFlags::GRAPHICS, true)],
            extensions: vec!["VK_KHR_swapchain".to_string()],
            swapchain_support: support(&[vk::Format::B8G8R8A8_SRGB], &[vk::PresentModeKHR::FIFO]),
        }
    }

    #[test]
    fn extension_inclusion() {
        let available = vec![
            "VK_KHR_maintenance1".to_string(),
            "VK_KHR_swapchain".to_string(),
        ];
        assert_eq!(check_device_extensions(&available, &["VK_KHR_swapchain"]), Ok(()));
        assert_eq!(check_device_extensions(&available, &[]), Ok(()));
        assert_eq!(
            check_device_extensions(&available, &["vk_khr_swapchain", "VK_KHR_maintenance1"]),
            Err(vec!["vk_khr_swapchain".to_string()])
        );
    }

    #[test]
    fn each_criterion_rejects() {
        let mut no_present = candidate(0, "a");
        no_present.queue_families = vec![QueueFamilySupport::new(vk::QueueFlags::GRAPHICS, false)];
        assert_eq!(
            check_suitability(&no_present, REQUIRED_DEVICE_EXTENSIONS),
            Err(Unsuitability::IncompleteQueueFamilies)
        );

        let mut no_swapchain = candidate(0, "b");
        no_swapchain.extensions.clear();
        assert_eq!(
            check_suitability(&no_swapchain, REQUIRED_DEVICE_EXTENSIONS),
            Err(Unsuitability::MissingExtensions(vec!["VK_KHR_swapchain".to_string()]))
        );

        let mut no_formats = candidate(0, "c");
        no_formats.swapchain_support.formats.clear();
        assert_eq!(
            check_suitability(&no_formats, REQUIRED_DEVICE_EXTENSIONS),
            Err(Unsuitability::NoSurfaceFormats)
        );

        let mut no_modes = candidate(0, "d");
        no_modes.swapchain_support.present_modes.clear();
        assert!(!is_suitable(&no_modes, REQUIRED_DEVICE_EXTENSIONS));
        assert_eq!(
            check_suitability(&no_modes, REQUIRED_DEVICE_EXTENSIONS),
            Err(Unsuitability::NoPresentModes)
        );
    }

    #[test]
    fn only_second_of_three_is_suitable() {
        let mut first = candidate(1, "first");
        first.extensions.clear();
        first.swapchain_support = support(&[vk::Format::R8G8B8A8_UNORM], &[vk::PresentModeKHR::IMMEDIATE]);

        let mut second = candidate(2, "second");
        second.queue_families = vec![
            QueueFamilySupport::new(vk::QueueFlags::GRAPHICS, false),
            QueueFamilySupport::new(vk::QueueFlags::TRANSFER, true),
        ];
        second.swapchain_support = support(&[vk::Format::B8G8R8A8_UNORM], &[vk::PresentModeKHR::MAILBOX]);

        let mut third = candidate(3, "third");
        third.swapchain_support.present_modes.clear();

        let selected = select_device(vec![first, second, third], REQUIRED_DEVICE_EXTENSIONS).unwrap();
        assert_eq!(selected.handle, 2);
        assert_eq!(selected.name, "second");
        assert_eq!(selected.queue_families, QueueFamilies { graphics: 0, present: 1 });
        assert_eq!(selected.swapchain_support.formats[0].format, vk::Format::B8G8R8A8_UNORM);
        assert_eq!(selected.swapchain_support.present_modes, vec![vk::PresentModeKHR::MAILBOX]);
    }

    #[test]
    fn first_suitable_wins() {
        let selected = select_device(
            vec![candidate(7, "first"), candidate(8, "second")],
            REQUIRED_DEVICE_EXTENSIONS,
        )
        .unwrap();
        assert_eq!(selected.handle, 7);
    }

    #[test]
    fn later_candidates_are_not_examined() {
        let mut examined = Vec::new();
        let candidates = vec![candidate(1, "a"), candidate(2, "b"), candidate(3, "c")]
            .into_iter()
            .inspect(|c| examined.push(c.handle));
        let selected = select_device(candidates, REQUIRED_DEVICE_EXTENSIONS).unwrap();
        assert_eq!(selected.handle, 1);
        assert_eq!(examined, vec![1]);
    }

    #[test]
    fn none_suitable() {
        let mut only = candidate(1, "only");
        only.queue_families.clear();
        assert!(matches!(
            select_device(vec![only], REQUIRED_DEVICE_EXTENSIONS),
            Err(SetupError::NoSuitableDevice)
        ));
    }

    #[test]
    fn no_candidates() {
        assert!(matches!(
            select_device(Vec::<DeviceCandidate<u32>>::new(), REQUIRED_DEVICE_EXTENSIONS),
            Err(SetupError::NoPhysicalDevices)
        ));
    }
}
