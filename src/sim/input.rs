//! Steering input injected by the frontend.
//!
//! The frontend forwards key state per event; the server holds the latest
//! value and feeds it into every simulation step.

use serde::{Deserialize, Serialize};

/// Current steering intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SteerInput {
    pub left: bool,
    pub right: bool,
}

impl SteerInput {
    pub const NEUTRAL: Self = Self {
        left: false,
        right: false,
    };

    /// Signed steering axis: -1 left, +1 right, 0 neutral or both held.
    pub fn axis(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_values() {
        assert_eq!(SteerInput::NEUTRAL.axis(), 0.0);
        assert_eq!(
            SteerInput {
                left: true,
                right: false
            }
            .axis(),
            -1.0
        );
        assert_eq!(
            SteerInput {
                left: false,
                right: true
            }
            .axis(),
            1.0
        );
    }

    #[test]
    fn both_keys_cancel() {
        let input = SteerInput {
            left: true,
            right: true,
        };
        assert_eq!(input.axis(), 0.0);
    }
}
