//! Hit rate and attribute bonus.

use crate::species::Attribute;

/// Bonus for the attribute triangle Vaccine > Virus > Data > Vaccine.
///
/// `Free`, missing attributes and mirror matches get no bonus.
pub fn attribute_bonus(attacker: Option<Attribute>, defender: Option<Attribute>) -> i32 {
    use Attribute::*;

    match (attacker, defender) {
        (Some(Vaccine), Some(Virus)) | (Some(Virus), Some(Data)) | (Some(Data), Some(Vaccine)) => 5,
        (Some(Virus), Some(Vaccine)) | (Some(Data), Some(Virus)) | (Some(Vaccine), Some(Data)) => -5,
        _ => 0,
    }
}

/// Hit rate used when both sides have zero power.
pub const ZERO_POWER_HIT_RATE: f64 = 50.0;

/// Chance (0-100) that an attack connects.
///
/// # Formula
///
/// ```text
/// hit_rate = attacker * 100 / (attacker + defender) + bonus
/// clamped to [0, 100]
/// ```
///
/// Both powers at zero is defined as 50, bonus ignored.
pub fn hit_rate(attacker_power: u32, defender_power: u32, bonus: i32) -> f64 {
    let total = u64::from(attacker_power) + u64::from(defender_power);
    if total == 0 {
        return ZERO_POWER_HIT_RATE;
    }
    let base = f64::from(attacker_power) * 100.0 / total as f64;
    (base + f64::from(bonus)).clamp(0.0, 100.0)
}

/// Audit string for one hit rate computation.
pub fn hit_rate_formula(attacker_power: u32, defender_power: u32, bonus: i32) -> String {
    let rate = hit_rate(attacker_power, defender_power, bonus);
    if attacker_power == 0 && defender_power == 0 {
        return format!("Hit Rate: both powers are 0 = {rate:.2}%");
    }
    format!(
        "Hit Rate: (({attacker_power} * 100) / ({attacker_power} + {defender_power})) + {bonus} = {rate:.2}%"
    )
}
