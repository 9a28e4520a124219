//! Generated radiance glass materials.

use std::fs;
use std::path::{Path, PathBuf};

use dg_core::{DgError, DgResult};

/// File name the combined material definition is written under.
pub const MATERIAL_FILE_NAME: &str = "daylight.mat";

/// A single-pane glass material parameterized by visible transmittance.
///
/// The name encodes the transmittance as a rounded percentage, so two
/// materials with distinct rounded values never collide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlassMaterial {
    transmittance: f64,
}

impl GlassMaterial {
    /// Transmittance must lie strictly inside (0, 1).
    pub fn new(transmittance: f64) -> DgResult<Self> {
        dg_core::ensure_finite(transmittance, "transmittance")?;
        if transmittance <= 0.0 || transmittance >= 1.0 {
            return Err(DgError::OutOfRange {
                what: "transmittance",
                value: transmittance,
                expected: "0 < t < 1",
            });
        }
        Ok(Self { transmittance })
    }

    pub fn transmittance(&self) -> f64 {
        self.transmittance
    }

    pub fn name(&self) -> String {
        format!("rad_glass_{}", (self.transmittance * 100.0).round() as u32)
    }

    /// The radiance primitive block appended to a material file.
    pub fn radiance_block(&self) -> String {
        let t = self.transmittance;
        format!("\n\nvoid glass {}\n0\n0\n3 {t} {t} {t}\n", self.name())
    }
}

/// Copy the line-oriented reference material file into `target_dir` and
/// append the generated glass block. Returns the written path.
pub fn write_material_file(
    reference: &Path,
    material: &GlassMaterial,
    target_dir: &Path,
) -> std::io::Result<PathBuf> {
    let mut data = fs::read_to_string(reference)?;
    data.push_str(&material.radiance_block());

    let mat_file_path = target_dir.join(MATERIAL_FILE_NAME);
    fs::write(&mat_file_path, data)?;
    Ok(mat_file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_encodes_rounded_percentage() {
        assert_eq!(GlassMaterial::new(0.6).unwrap().name(), "rad_glass_60");
        assert_eq!(GlassMaterial::new(0.347).unwrap().name(), "rad_glass_35");
        assert_eq!(GlassMaterial::new(0.005).unwrap().name(), "rad_glass_1");
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(GlassMaterial::new(0.0).is_err());
        assert!(GlassMaterial::new(1.0).is_err());
        assert!(GlassMaterial::new(-0.2).is_err());
        assert!(GlassMaterial::new(f64::NAN).is_err());
    }

    #[test]
    fn block_holds_three_channel_transmittance() {
        let mat = GlassMaterial::new(0.6).unwrap();
        let block = mat.radiance_block();
        assert!(block.contains("void glass rad_glass_60"));
        assert!(block.ends_with("3 0.6 0.6 0.6\n"));
    }
}
