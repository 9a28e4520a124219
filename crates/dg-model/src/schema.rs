//! Intermediate model document schema.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelDocument {
    pub name: String,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub layers: Vec<String>,
    #[serde(default)]
    pub named_views: Vec<NamedView>,
}

/// A named camera saved in the source model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NamedView {
    pub name: String,
    pub position: [f64; 3],
    pub direction: [f64; 3],
    pub up_vector: [f64; 3],
}

/// A named view fixed to the hemispherical fish-eye projection used for
/// glare rendering (180 degrees in both axes).
#[derive(Debug, Clone, PartialEq)]
pub struct HemisphericalView {
    pub name: String,
    pub position: [f64; 3],
    pub direction: [f64; 3],
    pub up_vector: [f64; 3],
}

impl HemisphericalView {
    /// Radiance view argument string.
    pub fn to_view_string(&self) -> String {
        let [px, py, pz] = self.position;
        let [dx, dy, dz] = self.direction;
        let [ux, uy, uz] = self.up_vector;
        format!(
            "-vth -vp {px} {py} {pz} -vd {dx} {dy} {dz} -vu {ux} {uy} {uz} -vh 180 -vv 180"
        )
    }
}

impl ModelDocument {
    /// Every named camera as a hemispherical rendering view.
    pub fn hemispherical_views(&self) -> Vec<HemisphericalView> {
        self.named_views
            .iter()
            .map(|view| HemisphericalView {
                name: view.name.clone(),
                position: view.position,
                direction: view.direction,
                up_vector: view.up_vector,
            })
            .collect()
    }
}
