//! Android target architectures shipped in the module

use std::fmt;

/// Architectures a florida-server binary is packaged for, in download order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Arm,
    Arm64,
    X86,
    X86_64,
}

impl Arch {
    pub const ALL: [Arch; 4] = [Arch::Arm, Arch::Arm64, Arch::X86, Arch::X86_64];

    /// Name used by upstream in release asset names
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Arm => "arm",
            Arch::Arm64 => "arm64",
            Arch::X86 => "x86",
            Arch::X86_64 => "x86_64",
        }
    }

    /// Name the module's install script expects (`x86_64` ships as `x64`)
    pub fn output_name(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x64",
            other => other.as_str(),
        }
    }

    /// Upstream asset file name for a given release tag
    pub fn asset_name(&self, tag: &str) -> String {
        format!("florida-server-{}-android-{}.gz", tag, self.as_str())
    }

    /// File name written under the binaries directory
    pub fn output_file_name(&self) -> String {
        format!("florida-{}.gz", self.output_name())
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_order() {
        let names: Vec<&str> = Arch::ALL.iter().map(Arch::as_str).collect();
        assert_eq!(names, vec!["arm", "arm64", "x86", "x86_64"]);
    }

    #[test]
    fn test_output_names() {
        assert_eq!(Arch::X86_64.output_file_name(), "florida-x64.gz");
        assert_eq!(Arch::Arm64.output_file_name(), "florida-arm64.gz");
        assert_eq!(Arch::Arm.output_file_name(), "florida-arm.gz");
        assert_eq!(Arch::X86.output_file_name(), "florida-x86.gz");
    }

    #[test]
    fn test_asset_name() {
        assert_eq!(
            Arch::X86_64.asset_name("16.5.9"),
            "florida-server-16.5.9-android-x86_64.gz"
        );
    }
}
