use crate::{misc::log::targets, types::err::ConfigError};

/// A named configuration value, together with the (inclusive) bounds on the value.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone + PartialOrd> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }

    /// Sets the value of the option, so long as the value is within the bounds of the option.
    pub fn set(&mut self, value: T) -> Result<(), ConfigError> {
        if value < self.min || self.max < value {
            log::warn!(target: targets::CONFIG, "Rejected value for '{}' outside of its bounds", self.name);
            return Err(ConfigError::OutOfBounds);
        }
        self.value = value;
        Ok(())
    }
}
