use ash::vk;

/// What a single queue family of a device can do for us.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueueFamilySupport {
    pub flags: vk::QueueFlags,
    pub present: bool,
}

impl QueueFamilySupport {
    pub fn new(flags: vk::QueueFlags, present: bool) -> Self {
        Self { flags, present }
    }

    pub fn supports_graphics(&self) -> bool {
        self.flags.contains(vk::QueueFlags::GRAPHICS)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueFamilyIndices {
    pub graphics: Option<u32>,
    pub present: Option<u32>,
}

impl QueueFamilyIndices {
    /// Records the first graphics capable family and, independently, the
    /// first family able to present. Both may name the same family.
    pub fn find(families: &[QueueFamilySupport]) -> Self {
        let mut indices = Self::default();
        for (index, family) in families.iter().enumerate() {
            let index = index as u32;
            if indices.graphics.is_none() && family.supports_graphics() {
                indices.graphics = Some(index);
            }
            if indices.present.is_none() && family.present {
                indices.present = Some(index);
            }
            if indices.is_complete() {
                break;
            }
        }
        indices
    }

    pub fn is_complete(&self) -> bool {
        self.graphics.is_some() && self.present.is_some()
    }

    pub fn complete(&self) -> Option<QueueFamilies> {
        match (self.graphics, self.present) {
            (Some(graphics), Some(present)) => Some(QueueFamilies { graphics, present }),
            _ => None,
        }
    }
}

/// Queue family indices of a selected device; both are always known.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QueueFamilies {
    pub graphics: u32,
    pub present: u32,
}

impl QueueFamilies {
    pub fn is_shared(&self) -> bool {
        self.graphics == self.present
    }

    /// Distinct families, graphics first. One queue is created per entry.
    pub fn unique(&self) -> Vec<u32> {
        if self.is_shared() {
            vec![self.graphics]
        } else {
            vec![self.graphics, self.present]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn family(flags: vk::QueueFlags, present: bool) -> QueueFamilySupport {
        QueueFamilySupport::new(flags, present)
    }

    #[test]
    fn single_family_serves_both() {
        let indices = QueueFamilyIndices::find(&[family(
            vk::QueueFlags::GRAPHICS | vk::QueueFlags::COMPUTE,
            true,
        )]);
        assert_eq!(indices.complete(), Some(QueueFamilies { graphics: 0, present: 0 }));
    }

    #[test]
    fn first_match_is_kept_for_each_role() {
        let indices = QueueFamilyIndices::find(&[
            family(vk::QueueFlags::GRAPHICS, false),
            family(vk::QueueFlags::GRAPHICS, true),
            family(vk::QueueFlags::TRANSFER, true),
        ]);
        assert_eq!(indices.graphics, Some(0));
        assert_eq!(indices.present, Some(1));
    }

    #[test]
    fn missing_present_is_incomplete() {
        let indices = QueueFamilyIndices::find(&[
            family(vk::QueueFlags::GRAPHICS, false),
            family(vk::QueueFlags::COMPUTE, false),
        ]);
        assert_eq!(indices.graphics, Some(0));
        assert!(!indices.is_complete());
        assert_eq!(indices.complete(), None);
    }

    #[test]
    fn no_families() {
        assert_eq!(QueueFamilyIndices::find(&[]), QueueFamilyIndices::default());
    }

    #[test]
    fn unique_families() {
        assert_eq!(QueueFamilies { graphics: 1, present: 1 }.unique(), vec![1]);
        assert_eq!(QueueFamilies { graphics: 0, present: 2 }.unique(), vec![0, 2]);
    }
}
