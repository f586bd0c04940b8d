//! Simulation scenarios.
//!
//! A scenario bundles the initial-condition rule with an optional
//! exact-solution rule. Scenarios with a closed-form exact solution
//! feed the error evaluator; the others only provide the initial
//! state, and error norms are skipped for them.

use crate::error::ConfigError;
use crate::mesh::Topography;
use crate::solver::SweState;

/// Initial/exact-solution rule keyed by scenario name.
#[derive(Clone, Debug)]
pub enum Scenario {
    /// Motionless water of constant depth on a flat bottom.
    /// Exact solution: the initial state, for all time.
    StillWater { depth: f64 },

    /// Motionless water with a constant free surface over arbitrary
    /// topography (h = surface - B). Exact solution: the initial
    /// state; a well-balanced scheme must preserve it.
    LakeAtRest { surface: f64 },

    /// Dam break over a dry bed: depth h_left for x < x0, dry to the
    /// right. Exact solution: the Ritter rarefaction fan.
    DamBreakDry { x0: f64, h_left: f64 },

    /// Dam break into standing water (Stoker problem). No closed-form
    /// rule here (the star depth needs a root find), so error norms
    /// are skipped.
    DamBreakWet { x0: f64, h_left: f64, h_right: f64 },

    /// Gaussian free-surface hump on still water. No exact solution.
    GaussianHump {
        x0: f64,
        base_depth: f64,
        amplitude: f64,
        width: f64,
    },
}

impl Scenario {
    /// Look up a scenario by configuration name, with canonical
    /// parameters on the unit-ish domain [0, 10].
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name {
            "StillWater" => Ok(Scenario::StillWater { depth: 2.0 }),
            "LakeAtRest" => Ok(Scenario::LakeAtRest { surface: 2.0 }),
            "DamBreakDry" => Ok(Scenario::DamBreakDry {
                x0: 5.0,
                h_left: 1.0,
            }),
            "DamBreakWet" => Ok(Scenario::DamBreakWet {
                x0: 5.0,
                h_left: 2.0,
                h_right: 1.0,
            }),
            "GaussianHump" => Ok(Scenario::GaussianHump {
                x0: 5.0,
                base_depth: 1.0,
                amplitude: 0.1,
                width: 0.5,
            }),
            other => Err(ConfigError::UnknownScenario(other.to_string())),
        }
    }

    /// Configuration name of this scenario.
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::StillWater { .. } => "StillWater",
            Scenario::LakeAtRest { .. } => "LakeAtRest",
            Scenario::DamBreakDry { .. } => "DamBreakDry",
            Scenario::DamBreakWet { .. } => "DamBreakWet",
            Scenario::GaussianHump { .. } => "GaussianHump",
        }
    }

    /// Initial state at position x.
    pub fn initial_state(&self, x: f64, topo: &Topography) -> SweState {
        match *self {
            Scenario::StillWater { depth } => SweState::new(depth, 0.0),
            Scenario::LakeAtRest { surface } => {
                SweState::new((surface - topo.elevation(x)).max(0.0), 0.0)
            }
            Scenario::DamBreakDry { x0, h_left } => {
                if x < x0 {
                    SweState::new(h_left, 0.0)
                } else {
                    SweState::zero()
                }
            }
            Scenario::DamBreakWet { x0, h_left, h_right } => {
                if x < x0 {
                    SweState::new(h_left, 0.0)
                } else {
                    SweState::new(h_right, 0.0)
                }
            }
            Scenario::GaussianHump {
                x0,
                base_depth,
                amplitude,
                width,
            } => {
                let xi = (x - x0) / width;
                SweState::new(base_depth + amplitude * (-xi * xi).exp(), 0.0)
            }
        }
    }

    /// Whether this scenario carries an exact-solution rule.
    pub fn has_exact_solution(&self) -> bool {
        matches!(
            self,
            Scenario::StillWater { .. }
                | Scenario::LakeAtRest { .. }
                | Scenario::DamBreakDry { .. }
        )
    }

    /// Exact state at (x, t), or None when the scenario has no
    /// closed-form solution.
    pub fn exact_state(&self, x: f64, t: f64, g: f64, topo: &Topography) -> Option<SweState> {
        match *self {
            Scenario::StillWater { .. } | Scenario::LakeAtRest { .. } => {
                // Steady states
                Some(self.initial_state(x, topo))
            }
            Scenario::DamBreakDry { x0, h_left } => Some(ritter_solution(x, t, x0, h_left, g)),
            Scenario::DamBreakWet { .. } | Scenario::GaussianHump { .. } => None,
        }
    }
}

/// Ritter solution for a dam break over a dry bed.
///
/// For a dam at x0 holding depth h0 to its left, the solution at t > 0
/// is a centered rarefaction fan (ξ = (x - x0)/t, c0 = sqrt(g h0)):
///
/// - ξ ≤ -c0:       undisturbed lake, h = h0, u = 0
/// - -c0 < ξ < 2c0: h = (2c0 - ξ)²/9g, u = 2(ξ + c0)/3
/// - ξ ≥ 2c0:       dry bed ahead of the wetting front
///
/// Reference: Toro, "Shock-Capturing Methods for Free-Surface Shallow
/// Flows", ch. 4.
pub fn ritter_solution(x: f64, t: f64, x0: f64, h0: f64, g: f64) -> SweState {
    if t <= 0.0 {
        return if x < x0 {
            SweState::new(h0, 0.0)
        } else {
            SweState::zero()
        };
    }

    let c0 = (g * h0).sqrt();
    let xi = (x - x0) / t;

    if xi <= -c0 {
        SweState::new(h0, 0.0)
    } else if xi < 2.0 * c0 {
        let h = (2.0 * c0 - xi).powi(2) / (9.0 * g);
        let u = 2.0 * (xi + c0) / 3.0;
        SweState::from_primitives(h, u)
    } else {
        SweState::zero()
    }
}
