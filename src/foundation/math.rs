pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Map `v` from `[lo, hi]` onto `[0, 1]`, clamped. A degenerate interval resolves to `1`.
pub(crate) fn unit_t(v: f64, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return if v < lo { 0.0 } else { 1.0 };
    }
    ((v - lo) / (hi - lo)).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
