//! SI unit helpers. Everything inside the crate is stored in base units
//! (F, S, V, A, s); these helpers convert at the boundaries.

pub const PICO: f64 = 1e-12;
pub const NANO: f64 = 1e-9;
pub const MILLI: f64 = 1e-3;

/// Picofarads to farads.
#[inline]
pub fn pf(x: f64) -> f64 {
    x * PICO
}

/// Nanosiemens to siemens.
#[inline]
pub fn ns(x: f64) -> f64 {
    x * NANO
}

/// Millivolts to volts.
#[inline]
pub fn mv(x: f64) -> f64 {
    x * MILLI
}

/// Picoamperes to amperes.
#[inline]
pub fn pa(x: f64) -> f64 {
    x * PICO
}

/// Nanoamperes to amperes.
#[inline]
pub fn na(x: f64) -> f64 {
    x * NANO
}

/// Milliseconds to seconds.
#[inline]
pub fn ms(x: f64) -> f64 {
    x * MILLI
}

#[inline]
pub fn to_mv(volts: f64) -> f64 {
    volts / MILLI
}

#[inline]
pub fn to_na(amps: f64) -> f64 {
    amps / NANO
}

#[inline]
pub fn to_ms(seconds: f64) -> f64 {
    seconds / MILLI
}
