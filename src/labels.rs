// Type-code labels for score detail rows
//
// The backend tags distribution and ecosystem detail rows with small integer
// codes. Codes outside the known set map to `Unknown` so new backend values
// render instead of failing.

use std::fmt;

/// Distribution a package was found in (`distDetail[].type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    Debian,
    Arch,
    Homebrew,
    Nix,
    Alpine,
    Centos,
    Aur,
    Deepin,
    Fedora,
    Gentoo,
    Ubuntu,
    Unknown,
}

impl Distribution {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Debian,
            Some(1) => Self::Arch,
            Some(2) => Self::Homebrew,
            Some(3) => Self::Nix,
            Some(4) => Self::Alpine,
            Some(5) => Self::Centos,
            Some(6) => Self::Aur,
            Some(7) => Self::Deepin,
            Some(8) => Self::Fedora,
            Some(9) => Self::Gentoo,
            Some(10) => Self::Ubuntu,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Debian => "Debian",
            Self::Arch => "Arch",
            Self::Homebrew => "Homebrew",
            Self::Nix => "Nix",
            Self::Alpine => "Alpine",
            Self::Centos => "Centos",
            Self::Aur => "Aur",
            Self::Deepin => "Deepin",
            Self::Fedora => "Fedora",
            Self::Gentoo => "Gentoo",
            Self::Ubuntu => "Ubuntu",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Language ecosystem a dependency count comes from (`langDetail[].type`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ecosystem {
    Npm,
    Go,
    Maven,
    Pypi,
    Nuget,
    Cargo,
    Others,
    Unknown,
}

impl Ecosystem {
    pub fn from_code(code: Option<i64>) -> Self {
        match code {
            Some(0) => Self::Npm,
            Some(1) => Self::Go,
            Some(2) => Self::Maven,
            Some(3) => Self::Pypi,
            Some(4) => Self::Nuget,
            Some(5) => Self::Cargo,
            Some(6) => Self::Others,
            _ => Self::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Npm => "Npm",
            Self::Go => "Go",
            Self::Maven => "Maven",
            Self::Pypi => "Pypi",
            Self::Nuget => "Nuget",
            Self::Cargo => "Cargo",
            Self::Others => "Others",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_codes() {
        let labels: Vec<&str> = (0..=10)
            .map(|c| Distribution::from_code(Some(c)).label())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Debian", "Arch", "Homebrew", "Nix", "Alpine", "Centos", "Aur", "Deepin",
                "Fedora", "Gentoo", "Ubuntu"
            ]
        );
    }

    #[test]
    fn test_ecosystem_codes() {
        let labels: Vec<&str> = (0..=6)
            .map(|c| Ecosystem::from_code(Some(c)).label())
            .collect();
        assert_eq!(
            labels,
            vec!["Npm", "Go", "Maven", "Pypi", "Nuget", "Cargo", "Others"]
        );
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(Distribution::from_code(Some(99)).to_string(), "Unknown");
        assert_eq!(Distribution::from_code(Some(-1)), Distribution::Unknown);
        assert_eq!(Distribution::from_code(None), Distribution::Unknown);
        assert_eq!(Ecosystem::from_code(Some(7)).to_string(), "Unknown");
        assert_eq!(Ecosystem::from_code(Some(99)), Ecosystem::Unknown);
    }
}
