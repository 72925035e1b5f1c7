use serde::{Deserialize, Serialize};

fn default_output_dir() -> String {
    "i".to_string()
}

fn default_batch_size() -> usize {
    30
}

fn default_size_unit() -> String {
    "px".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory under the output root receiving copied images
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Concurrent copies per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// CSS unit for image width and height when the image declares none
    #[serde(default = "default_size_unit")]
    pub size_unit: String,
}

impl AssetsConfig {
    /// `ASSET_DIR`, `ASSET_BATCH_SIZE` and `IMAGE_SIZE_UNIT`
    pub fn apply_overrides(&mut self, lookup: &impl Fn(&str) -> Option<String>) {
        if let Some(output_dir) = lookup("ASSET_DIR") {
            self.output_dir = output_dir;
        }

        if let Some(batch_size) = lookup("ASSET_BATCH_SIZE")
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n > 0)
        {
            self.batch_size = batch_size;
        }

        if let Some(size_unit) = lookup("IMAGE_SIZE_UNIT") {
            self.size_unit = size_unit;
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            batch_size: default_batch_size(),
            size_unit: default_size_unit(),
        }
    }
}
