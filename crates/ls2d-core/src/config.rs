//! Tunable thresholds and verbosity for the pipeline.

/// Snap and degeneracy thresholds.
///
/// `eps` is the snap threshold: field values with `|phi| < eps` are candidates for
/// snapping to exactly zero. `epsd` is the degeneracy threshold, `epsd << eps`: values
/// below it are treated as numerically indistinguishable from zero when deciding whether
/// an edge straddles the level set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub eps: f64,
    pub epsd: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            eps: 1e-6,
            epsd: 1e-30,
        }
    }
}

/// Verbosity level mirroring the source's `imprim` convention: magnitude gates the
/// amount of detail, sign is not otherwise interpreted by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Verbosity(pub i32);

impl Verbosity {
    pub fn quiet() -> Self {
        Self(0)
    }

    /// `|imprim| > 3`: print a banner at the start of the run.
    pub fn prints_banners(self) -> bool {
        self.0.abs() > 3
    }

    /// `|imprim| > 5`: print per-phase counts.
    pub fn prints_counts(self) -> bool {
        self.0.abs() > 5
    }
}
