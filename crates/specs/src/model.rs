//! Tablet model detection

/// reMarkable hardware generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    /// reMarkable 1
    Rm1,
    /// reMarkable 2
    Rm2,
    /// Not a reMarkable, or the machine string could not be read
    Unknown,
}

impl Model {
    /// Device-tree file holding the machine description
    pub const MACHINE_PATH: &'static str = "/sys/devices/soc0/machine";

    /// Classify the contents of [`Model::MACHINE_PATH`]
    ///
    /// ```
    /// use carta_specs::Model;
    ///
    /// assert_eq!(Model::from_machine("reMarkable 2.0\n"), Model::Rm2);
    /// assert_eq!(Model::from_machine("reMarkable 1.0"), Model::Rm1);
    /// assert_eq!(Model::from_machine("Raspberry Pi 4"), Model::Unknown);
    /// ```
    pub fn from_machine(machine: &str) -> Self {
        let machine = machine.trim();
        if machine.contains("reMarkable 2") {
            Self::Rm2
        } else if machine.contains("reMarkable 1") || machine.contains("reMarkable Prototype 1") {
            Self::Rm1
        } else {
            Self::Unknown
        }
    }

    /// Read and classify the local machine
    ///
    /// Unreadable machine files yield [`Model::Unknown`].
    #[cfg(feature = "std")]
    pub fn detect() -> Self {
        std::fs::read_to_string(Self::MACHINE_PATH)
            .map(|machine| Self::from_machine(&machine))
            .unwrap_or(Self::Unknown)
    }

    /// Whether renderers must be wrapped in `rm2fb-client`
    pub fn needs_framebuffer_shim(self) -> bool {
        matches!(self, Self::Rm2)
    }

    /// Human-readable model name
    pub fn name(self) -> &'static str {
        match self {
            Self::Rm1 => "reMarkable 1",
            Self::Rm2 => "reMarkable 2",
            Self::Unknown => "unknown",
        }
    }
}

impl core::fmt::Display for Model {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_machine() {
        assert_eq!(Model::from_machine("reMarkable 2.0"), Model::Rm2);
        assert_eq!(Model::from_machine("  reMarkable 1.0 \n"), Model::Rm1);
        assert_eq!(Model::from_machine("reMarkable Prototype 1"), Model::Rm1);
        assert_eq!(Model::from_machine(""), Model::Unknown);
    }

    #[test]
    fn test_only_rm2_needs_shim() {
        assert!(Model::Rm2.needs_framebuffer_shim());
        assert!(!Model::Rm1.needs_framebuffer_shim());
        assert!(!Model::Unknown.needs_framebuffer_shim());
    }

    #[test]
    fn test_names() {
        assert_eq!(Model::Rm2.name(), "reMarkable 2");
        assert_eq!(Model::Unknown.name(), "unknown");
    }
}
