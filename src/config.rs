use crate::error::CoreResult;
use crate::features::codec::Symbology;
use serde::{Deserialize, Serialize};

pub const DEFAULT_VIBRATE_MS: u64 = 100;
pub const DEFAULT_MAX_DECODE_DIMENSION: u32 = 1000;
pub const DEFAULT_CAMERA_FORMATS: [Symbology; 2] = [Symbology::QrCode, Symbology::Code39];

/// What to do when the camera delivers the text that is already displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Identical re-delivery is ignored: no vibration, no clipboard write.
    #[default]
    Suppress,
    /// Every delivery re-triggers vibration and clipboard write.
    Retrigger,
}

/// Tunables the host may push with the `configure` command. Missing fields keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub duplicate_policy: DuplicatePolicy,
    pub vibrate_ms: u64,
    pub max_decode_dimension: u32,
    /// Symbologies the camera path looks for. Empty means the defaults.
    pub camera_formats: Vec<Symbology>,
}

impl ScannerConfig {
    pub const fn new() -> Self {
        Self {
            duplicate_policy: DuplicatePolicy::Suppress,
            vibrate_ms: DEFAULT_VIBRATE_MS,
            max_decode_dimension: DEFAULT_MAX_DECODE_DIMENSION,
            camera_formats: Vec::new(),
        }
    }

    pub fn from_json(raw: &str) -> CoreResult<Self> {
        let parsed: ScannerConfig = serde_json::from_str(raw)?;
        Ok(parsed.normalized())
    }

    pub fn camera_formats(&self) -> Vec<Symbology> {
        if self.camera_formats.is_empty() {
            DEFAULT_CAMERA_FORMATS.to_vec()
        } else {
            self.camera_formats.clone()
        }
    }

    fn normalized(mut self) -> Self {
        if self.max_decode_dimension == 0 {
            self.max_decode_dimension = DEFAULT_MAX_DECODE_DIMENSION;
        }
        self.camera_formats.dedup();
        self
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self::new()
    }
}
