use std::cmp::min;

/// Adds two costs, saturating at `inf`
///
/// # Arguments
///
/// * `cost_a`: First cost
/// * `cost_b`: Second cost
/// * `inf`: the metric that means unreachable
///
/// returns: u16
///
/// # Examples
///
/// ```
/// assert_eq!(dvr::util::sum_inf(3, 4, 60), 7);
/// assert_eq!(dvr::util::sum_inf(59, 1, 60), 60);
/// assert_eq!(dvr::util::sum_inf(60, 1, 60), 60);
/// assert_eq!(dvr::util::sum_inf(u16::MAX, u16::MAX, 60), 60);
/// ```
pub fn sum_inf(cost_a: u16, cost_b: u16, inf: u16) -> u16 {
    if cost_a >= inf || cost_b >= inf {
        inf
    } else {
        min(inf as u32, cost_a as u32 + cost_b as u32) as u16
    }
}

/// Whether `since + window` has been reached at `now`
pub fn elapsed(since: u64, window: u64, now: u64) -> bool {
    since.saturating_add(window) <= now
}
