//! Pin level helpers shared by the line implementations

pub(crate) mod gpio;
