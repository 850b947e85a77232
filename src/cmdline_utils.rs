use serde::Serialize;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailableFlavors {
    Ultra,       // Arithmetic and accumulator, Blake3 transcript
    UltraKeccak, // Same as Ultra, Keccak256 transcript
    UltraZk,     // Ultra with masked witnesses
    Mega,        // Ultra plus booleanity
    Plonkish,    // Arithmetic and booleanity, no shifts
    PlonkishZk,  // Plonkish with masked witnesses
    Linear,      // Linear gates only
    LinearZk,    // Linear with masked witnesses
}

impl AvailableFlavors {
    pub const ALL: [Self; 8] = [
        Self::Ultra,
        Self::UltraKeccak,
        Self::UltraZk,
        Self::Mega,
        Self::Plonkish,
        Self::PlonkishZk,
        Self::Linear,
        Self::LinearZk,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ultra => "ultra",
            Self::UltraKeccak => "ultra-keccak",
            Self::UltraZk => "ultra-zk",
            Self::Mega => "mega",
            Self::Plonkish => "plonkish",
            Self::PlonkishZk => "plonkish-zk",
            Self::Linear => "linear",
            Self::LinearZk => "linear-zk",
        }
    }
}

impl fmt::Display for AvailableFlavors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailableFlavors {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flavor| flavor.as_str() == s)
            .ok_or_else(|| format!("Invalid flavor: {s}"))
    }
}
