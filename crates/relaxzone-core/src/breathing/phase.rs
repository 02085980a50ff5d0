use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Ready,
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    /// Next phase in the breathing ring. `Ready` leads into `Inhale`.
    pub fn next(self) -> Phase {
        match self {
            Phase::Ready | Phase::Exhale => Phase::Inhale,
            Phase::Inhale => Phase::Hold,
            Phase::Hold => Phase::Exhale,
        }
    }

    pub fn is_active(self) -> bool {
        self != Phase::Ready
    }

    /// Instruction shown to the user for this phase.
    pub fn instruction(self) -> &'static str {
        match self {
            Phase::Ready => "Get Ready...",
            Phase::Inhale => "Breathe In...",
            Phase::Hold => "Hold...",
            Phase::Exhale => "Release...",
        }
    }

    /// Relative size of the breathing circle.
    pub fn circle_scale(self) -> f64 {
        match self {
            Phase::Inhale => 1.0,
            Phase::Hold => 0.75,
            Phase::Exhale | Phase::Ready => 0.5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Inhale => "inhale",
            Phase::Hold => "hold",
            Phase::Exhale => "exhale",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-phase durations in whole seconds.
///
/// All scheduling and progress calculations go through [`PhaseDurations::duration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseDurations {
    pub inhale_secs: u32,
    pub hold_secs: u32,
    pub exhale_secs: u32,
}

impl PhaseDurations {
    /// Build a validated set of durations. Every phase must last at least one second.
    pub fn new(inhale_secs: u32, hold_secs: u32, exhale_secs: u32) -> Result<Self, ValidationError> {
        for (field, value) in [
            ("inhale_secs", inhale_secs),
            ("hold_secs", hold_secs),
            ("exhale_secs", exhale_secs),
        ] {
            if value == 0 {
                return Err(ValidationError::InvalidDuration {
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(Self {
            inhale_secs,
            hold_secs,
            exhale_secs,
        })
    }

    /// The 8-6-6 pattern.
    pub fn relaxing() -> Self {
        Self {
            inhale_secs: 8,
            hold_secs: 6,
            exhale_secs: 6,
        }
    }

    /// The shorter 4-4-6 pattern.
    pub fn short() -> Self {
        Self {
            inhale_secs: 4,
            hold_secs: 4,
            exhale_secs: 6,
        }
    }

    /// Parse a preset name such as `8-6-6` or `4-4-6`.
    pub fn from_preset(name: &str) -> Result<Self, ValidationError> {
        let parts: Vec<&str> = name.trim().split('-').collect();
        if parts.len() != 3 {
            return Err(ValidationError::InvalidValue {
                field: "preset".to_string(),
                message: format!("expected <inhale>-<hold>-<exhale>, got '{name}'"),
            });
        }
        let mut secs = [0u32; 3];
        for (slot, part) in secs.iter_mut().zip(parts) {
            *slot = part.parse().map_err(|_| ValidationError::InvalidValue {
                field: "preset".to_string(),
                message: format!("'{part}' is not a whole number of seconds"),
            })?;
        }
        Self::new(secs[0], secs[1], secs[2])
    }

    /// Seconds for `phase`; `Ready` has no duration.
    pub fn duration(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Ready => 0,
            Phase::Inhale => self.inhale_secs,
            Phase::Hold => self.hold_secs,
            Phase::Exhale => self.exhale_secs,
        }
    }

    /// Length of one full inhale-hold-exhale cycle.
    pub fn cycle_secs(&self) -> u32 {
        self.inhale_secs
            .saturating_add(self.hold_secs)
            .saturating_add(self.exhale_secs)
    }

    /// Short display form, e.g. `8-6-6`.
    pub fn pattern(&self) -> String {
        format!("{}-{}-{}", self.inhale_secs, self.hold_secs, self.exhale_secs)
    }
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self::relaxing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_order() {
        assert_eq!(Phase::Ready.next(), Phase::Inhale);
        assert_eq!(Phase::Inhale.next(), Phase::Hold);
        assert_eq!(Phase::Hold.next(), Phase::Exhale);
        assert_eq!(Phase::Exhale.next(), Phase::Inhale);
    }

    #[test]
    fn default_is_eight_six_six() {
        let d = PhaseDurations::default();
        assert_eq!(d.duration(Phase::Inhale), 8);
        assert_eq!(d.duration(Phase::Hold), 6);
        assert_eq!(d.duration(Phase::Exhale), 6);
        assert_eq!(d.duration(Phase::Ready), 0);
        assert_eq!(d.cycle_secs(), 20);
    }

    #[test]
    fn rejects_zero_duration() {
        let err = PhaseDurations::new(4, 0, 6).unwrap_err();
        assert!(err.to_string().contains("hold_secs"));
    }

    #[test]
    fn parses_presets() {
        assert_eq!(PhaseDurations::from_preset("4-4-6").unwrap(), PhaseDurations::short());
        assert_eq!(PhaseDurations::from_preset(" 8-6-6 ").unwrap(), PhaseDurations::relaxing());
        assert!(PhaseDurations::from_preset("8-6").is_err());
        assert!(PhaseDurations::from_preset("8-x-6").is_err());
        assert!(PhaseDurations::from_preset("8-0-6").is_err());
    }

    #[test]
    fn instructions_and_scale() {
        assert_eq!(Phase::Ready.instruction(), "Get Ready...");
        assert_eq!(Phase::Exhale.instruction(), "Release...");
        assert_eq!(Phase::Hold.circle_scale(), 0.75);
        assert_eq!(Phase::Ready.circle_scale(), 0.5);
    }
}
