use embedded_hal::digital::{InputPin, OutputPin};

/// The gpio driver is a wrapper for the embedded-hal digital output pin trait.
/// It wraps the low-active and high-active pins, and provides a way to set the pin state
pub(crate) struct OutputController<P: OutputPin> {
    pin: P,
    low_active: bool,
}

impl<P: OutputPin> OutputController<P> {
    /// Create a new OutputController instance
    pub fn new(pin: P, low_active: bool) -> Self {
        Self { pin, low_active }
    }

    /// Activate the GPIO pin
    pub fn activate(&mut self) {
        if self.low_active {
            self.pin.set_low().ok();
        } else {
            self.pin.set_high().ok();
        }
    }

    /// Deactivate the GPIO pin
    pub fn deactivate(&mut self) {
        if self.low_active {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

/// Input counterpart of [`OutputController`]: reads whether the pin is at its active level.
pub(crate) struct InputSense<P: InputPin> {
    pin: P,
    low_active: bool,
}

impl<P: InputPin> InputSense<P> {
    pub fn new(pin: P, low_active: bool) -> Self {
        Self { pin, low_active }
    }

    /// Check if the GPIO pin is active, a failed read counts as inactive
    pub fn is_active(&mut self) -> bool {
        if self.low_active {
            self.pin.is_low().ok().unwrap_or_default()
        } else {
            self.pin.is_high().ok().unwrap_or_default()
        }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}
