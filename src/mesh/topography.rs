//! Bottom topography (bed elevation) rules.
//!
//! The bed B(x) enters the momentum equation through the gravity
//! source term S_hu = -g h dB/dx. Analytic rules expose both the
//! elevation and its exact gradient so the source term does not rely
//! on a finite-difference approximation.

/// Bed elevation profile.
#[derive(Clone, Debug, Default)]
pub enum Topography {
    /// Flat bottom, B = 0 everywhere.
    #[default]
    FlatBottom,
    /// Linear slope B(x) = slope * (x - x0).
    LinearSlope { x0: f64, slope: f64 },
    /// Smooth parabolic bump of the given height and half-width
    /// centered at x0: B(x) = height * max(0, 1 - ((x-x0)/half_width)²).
    ParabolicBump {
        x0: f64,
        height: f64,
        half_width: f64,
    },
}

impl Topography {
    /// Bed elevation B(x).
    pub fn elevation(&self, x: f64) -> f64 {
        match self {
            Topography::FlatBottom => 0.0,
            Topography::LinearSlope { x0, slope } => slope * (x - x0),
            Topography::ParabolicBump {
                x0,
                height,
                half_width,
            } => {
                let xi = (x - x0) / half_width;
                if xi.abs() < 1.0 {
                    height * (1.0 - xi * xi)
                } else {
                    0.0
                }
            }
        }
    }

    /// Bed slope dB/dx at x.
    pub fn gradient(&self, x: f64) -> f64 {
        match self {
            Topography::FlatBottom => 0.0,
            Topography::LinearSlope { slope, .. } => *slope,
            Topography::ParabolicBump {
                x0,
                height,
                half_width,
            } => {
                let xi = (x - x0) / half_width;
                if xi.abs() < 1.0 {
                    -2.0 * height * xi / half_width
                } else {
                    0.0
                }
            }
        }
    }

    /// Whether the bed is flat (no momentum source contribution).
    pub fn is_flat(&self) -> bool {
        matches!(self, Topography::FlatBottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_bottom() {
        let topo = Topography::FlatBottom;
        assert_eq!(topo.elevation(3.7), 0.0);
        assert_eq!(topo.gradient(3.7), 0.0);
        assert!(topo.is_flat());
    }

    #[test]
    fn test_linear_slope() {
        let topo = Topography::LinearSlope { x0: 1.0, slope: 0.1 };
        assert!((topo.elevation(1.0) - 0.0).abs() < 1e-14);
        assert!((topo.elevation(2.0) - 0.1).abs() < 1e-14);
        assert!((topo.gradient(5.0) - 0.1).abs() < 1e-14);
        assert!(!topo.is_flat());
    }

    #[test]
    fn test_parabolic_bump() {
        let topo = Topography::ParabolicBump {
            x0: 5.0,
            height: 0.2,
            half_width: 2.0,
        };

        // Peak at center, zero outside the support
        assert!((topo.elevation(5.0) - 0.2).abs() < 1e-14);
        assert_eq!(topo.elevation(10.0), 0.0);
        assert_eq!(topo.gradient(10.0), 0.0);

        // Gradient sign: uphill left of center, downhill right
        assert!(topo.gradient(4.0) > 0.0);
        assert!(topo.gradient(6.0) < 0.0);
        assert!((topo.gradient(5.0)).abs() < 1e-14);
    }

    #[test]
    fn test_bump_gradient_matches_finite_difference() {
        let topo = Topography::ParabolicBump {
            x0: 0.0,
            height: 1.0,
            half_width: 1.0,
        };
        let eps = 1e-7;
        for &x in &[-0.8, -0.3, 0.2, 0.7] {
            let fd = (topo.elevation(x + eps) - topo.elevation(x - eps)) / (2.0 * eps);
            assert!((topo.gradient(x) - fd).abs() < 1e-6);
        }
    }
}
