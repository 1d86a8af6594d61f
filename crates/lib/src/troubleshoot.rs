//! Platform-specific troubleshooting guidance.

use crate::platform::Platform;
use crate::platform::tag::PlatformTag;

const WINDOWS: &str = "\
Windows Troubleshooting:
- Run PowerShell as Administrator for permission issues
- Enable Long Paths: New-ItemProperty -Path \"HKLM:\\SYSTEM\\CurrentControlSet\\Control\\FileSystem\" -Name \"LongPathsEnabled\" -Value 1 -PropertyType DWORD -Force
- Set Execution Policy: Set-ExecutionPolicy -ExecutionPolicy RemoteSigned -Scope CurrentUser
- Check PATH: echo $env:PATH
";

const MACOS: &str = "\
macOS Troubleshooting:
- Install Xcode Command Line Tools: xcode-select --install
- Fix permissions: sudo chown -R $(whoami) ~/.claude
- Check shell: echo $SHELL
";

const LINUX: &str = "\
Linux Troubleshooting:
- Fix permissions: sudo chown -R $(whoami) ~/.claude
- Check dependencies: python3, node, git
- Install missing packages via your package manager (apt, yum, dnf, etc.)
";

pub fn troubleshooting_info(tag: PlatformTag) -> &'static str {
  match tag {
    PlatformTag::Windows => WINDOWS,
    PlatformTag::MacOs => MACOS,
    PlatformTag::Linux => LINUX,
  }
}

impl Platform {
  pub fn troubleshooting_info(&self) -> &'static str {
    troubleshooting_info(self.tag)
  }
}
