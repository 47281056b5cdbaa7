//! Text formatting for UI readouts.

use bevy::math::DVec3;

/// "x, y, z" with one decimal.
pub fn format_vec3(v: DVec3) -> String {
    format!("{:.1}, {:.1}, {:.1}", v.x, v.y, v.z)
}

/// Mass in scientific notation, e.g. "2.50e10".
pub fn format_mass(mass: f64) -> String {
    format!("{mass:.2e}")
}

/// Simulation time as the two most significant units, e.g. "3d 04h".
pub fn format_duration(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "--".to_string();
    }
    if seconds < 60.0 {
        return format!("{seconds:.1}s");
    }

    let total = seconds as u64;
    let (days, rem) = (total / 86_400, total % 86_400);
    let (hours, rem) = (rem / 3600, rem % 3600);
    let (minutes, secs) = (rem / 60, rem % 60);

    if days > 0 {
        format!("{days}d {hours:02}h")
    } else if hours > 0 {
        format!("{hours}h {minutes:02}m")
    } else {
        format!("{minutes}m {secs:02}s")
    }
}

/// Time multiplier label, e.g. "10000x".
pub fn format_multiplier(multiplier: f64) -> String {
    if multiplier >= 10.0 {
        format!("{multiplier:.0}x")
    } else {
        format!("{multiplier:.1}x")
    }
}
