use crate::error::MazeError;

pub const DEFAULT_WIDTH: usize = 42;
pub const DEFAULT_HEIGHT: usize = 27;
pub const DEFAULT_MAX_LIFE: u8 = 9;
pub const DEFAULT_LOOP_THRESHOLD: f64 = 0.95;

/// What happens to moves once the target has been reached.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Moves keep working; the caller decides when to stop.
    #[default]
    Permissive,
    /// Moves are rejected with `AlreadyCompleted` until the next reset.
    LockOnCompletion,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MazeConfig {
    pub width: usize,
    pub height: usize,
    pub max_life: u8,
    pub completion_policy: CompletionPolicy,
    /// Samples above this value open one extra wall during finalization.
    pub loop_threshold: f64,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_life: DEFAULT_MAX_LIFE,
            completion_policy: CompletionPolicy::default(),
            loop_threshold: DEFAULT_LOOP_THRESHOLD,
        }
    }
}

impl MazeConfig {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_max_life(mut self, max_life: u8) -> Self {
        self.max_life = max_life;
        self
    }

    pub fn with_completion_policy(mut self, policy: CompletionPolicy) -> Self {
        self.completion_policy = policy;
        self
    }

    pub fn with_loop_threshold(mut self, threshold: f64) -> Self {
        self.loop_threshold = threshold;
        self
    }

    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    pub fn target(&self) -> (usize, usize) {
        (self.width - 1, self.height - 1)
    }

    pub fn validate(&self) -> Result<(), MazeError> {
        if self.width == 0 || self.height == 0 {
            return Err(MazeError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.loop_threshold) {
            return Err(MazeError::InvalidLoopThreshold(self.loop_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_board() {
        let config = MazeConfig::default();
        assert_eq!((config.width, config.height), (42, 27));
        assert_eq!(config.max_life, 9);
        assert_eq!(config.completion_policy, CompletionPolicy::Permissive);
        assert_eq!(config.target(), (41, 26));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            MazeConfig::new(0, 3).validate(),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(MazeConfig::new(4, 0).validate().is_err());
    }

    #[test]
    fn loop_threshold_must_be_a_probability() {
        let config = MazeConfig::new(3, 3).with_loop_threshold(1.5);
        assert_eq!(config.validate(), Err(MazeError::InvalidLoopThreshold(1.5)));
        assert!(MazeConfig::new(3, 3)
            .with_loop_threshold(1.0)
            .validate()
            .is_ok());
    }
}
