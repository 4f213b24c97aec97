//! AdEx parameter set, stored in SI base units.

use crate::error::{AdexError, AdexResult};

/// Names accepted by [`AdexParams::from_named`], in field order.
pub const PARAM_NAMES: [&str; 11] = [
    "c_m", "g_l", "e_l", "v_t", "d_t", "a", "tau_w", "b", "v_r", "i_stim", "v_fire",
];

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdexParams {
    /// Membrane capacitance (F)
    pub c_m: f64,
    /// Leak conductance (S)
    pub g_l: f64,
    /// Leak potential (V)
    pub e_l: f64,
    /// Exponential threshold (V)
    pub v_t: f64,
    /// Slope factor (V)
    pub d_t: f64,
    /// Subthreshold adaptation conductance (S)
    pub a: f64,
    /// Adaptation time constant (s)
    pub tau_w: f64,
    /// Spike-triggered adaptation increment (A)
    pub b: f64,
    /// Reset potential (V)
    pub v_r: f64,
    /// Stimulus current (A)
    pub i_stim: f64,
    /// Firing threshold (V)
    pub v_fire: f64,
}

impl AdexParams {
    /// Build from `(name, value)` pairs in SI units. Every name in
    /// [`PARAM_NAMES`] must appear; `t_f` is accepted for `v_fire`.
    /// A repeated name keeps the last value.
    pub fn from_named<I, K>(pairs: I) -> AdexResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: AsRef<str>,
    {
        let mut slots = [None; PARAM_NAMES.len()];
        for (key, value) in pairs {
            let key = key.as_ref();
            let key = if key == "t_f" { "v_fire" } else { key };
            let idx = PARAM_NAMES
                .iter()
                .position(|&n| n == key)
                .ok_or_else(|| AdexError::UnknownParameter(key.to_string()))?;
            slots[idx] = Some(value);
        }

        let take = |i: usize| slots[i].ok_or(AdexError::MissingParameter(PARAM_NAMES[i]));
        let params = Self {
            c_m: take(0)?,
            g_l: take(1)?,
            e_l: take(2)?,
            v_t: take(3)?,
            d_t: take(4)?,
            a: take(5)?,
            tau_w: take(6)?,
            b: take(7)?,
            v_r: take(8)?,
            i_stim: take(9)?,
            v_fire: take(10)?,
        };
        params.validate()?;
        Ok(params)
    }

    /// Look up a parameter by name (SI units).
    pub fn get(&self, name: &str) -> Option<f64> {
        let v = match name {
            "c_m" => self.c_m,
            "g_l" => self.g_l,
            "e_l" => self.e_l,
            "v_t" => self.v_t,
            "d_t" => self.d_t,
            "a" => self.a,
            "tau_w" => self.tau_w,
            "b" => self.b,
            "v_r" => self.v_r,
            "i_stim" => self.i_stim,
            "v_fire" | "t_f" => self.v_fire,
            _ => return None,
        };
        Some(v)
    }

    /// Reject non-physical values. Called by every constructor path that
    /// starts a run.
    pub fn validate(&self) -> AdexResult<()> {
        for name in PARAM_NAMES {
            // get() covers every listed name
            let value = self.get(name).unwrap_or(f64::NAN);
            if !value.is_finite() {
                return Err(AdexError::InvalidParameter { name, value, reason: "must be finite" });
            }
        }
        positive("c_m", self.c_m)?;
        positive("d_t", self.d_t)?;
        positive("tau_w", self.tau_w)?;
        if self.g_l < 0.0 {
            return Err(AdexError::InvalidParameter {
                name: "g_l",
                value: self.g_l,
                reason: "must not be negative",
            });
        }
        if self.v_r >= self.v_fire {
            return Err(AdexError::InvalidParameter {
                name: "v_r",
                value: self.v_r,
                reason: "must lie below the firing threshold",
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> AdexResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(AdexError::InvalidParameter { name, value, reason: "must be positive" })
    }
}
