//! Tailwind CLI release lookup.
//!
//! The standalone CLI is taken from the tailwind-cli-extra releases, which
//! bundle daisyUI. Only the download URL is computed here.

use crate::{ConfigError, ConfigResult};

pub const TAILWIND_VERSION: &str = "2.1.37";

const TAILWIND_EXTRA_URL: &str =
    "https://github.com/dobicinaitis/tailwind-cli-extra/releases/download/v{version}/tailwindcss-extra-{arch}";

// This might need to be updated when the version is updated
const ARCHITECTURE_MAP: &[(&str, &str, &str)] = &[
    ("linux", "x86_64", "linux-x64"),
    ("linux", "arm64", "linux-arm64"),
    ("linux", "arm7", "linux-arm7"),
    ("darwin", "x86_64", "macos-x64"),
    ("darwin", "arm", "macos-arm64"),
    ("darwin", "arm64", "macos-arm64"),
    ("windows", "x86_64", "windows-x64"),
    ("windows", "arm64", "windows-arm64"),
];

/// An operating system and processor pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub system: String,
    pub processor: String,
}

impl Platform {
    pub fn new(system: impl Into<String>, processor: impl Into<String>) -> Self {
        Self {
            system: system.into().to_lowercase(),
            processor: processor.into().to_lowercase(),
        }
    }

    /// The platform this binary was built for, in release naming.
    pub fn current() -> Self {
        let system = match std::env::consts::OS {
            "macos" => "darwin",
            other => other,
        };
        let mut processor = match std::env::consts::ARCH {
            "aarch64" => "arm64",
            "arm" => "arm7",
            other => other,
        }
        .to_string();
        if cfg!(target_env = "musl") {
            processor.push_str("-musl");
        }
        Self::new(system, processor)
    }

    /// Suffix of the release asset for this platform.
    pub fn filename_fragment(&self) -> ConfigResult<String> {
        let fragment = ARCHITECTURE_MAP
            .iter()
            .find(|(system, processor, _)| *system == self.system && *processor == self.processor)
            .map(|(_, _, fragment)| *fragment)
            .ok_or_else(|| ConfigError::UnsupportedPlatform {
                system: self.system.clone(),
                processor: self.processor.clone(),
            })?;

        if self.system == "windows" {
            Ok(format!("{}.exe", fragment))
        } else {
            Ok(fragment.to_string())
        }
    }
}

/// Release URL for a version and filename fragment.
pub fn download_url(version: &str, fragment: &str) -> String {
    TAILWIND_EXTRA_URL
        .replace("{version}", version)
        .replace("{arch}", fragment)
}
