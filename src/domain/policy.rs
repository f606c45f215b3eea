/// Accrual rates and upgrade thresholds.
///
/// The two upgrade gates are deliberately separate: the loyalty threshold
/// latches the eligibility flag inside the domain, while the attendance
/// threshold is enforced by the upgrade command before the domain method
/// runs. With the default rates they coincide (5 points per visit, both
/// thresholds at 30), but nothing relies on that coincidence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoyaltyPolicy {
    /// Points a regular member earns per visit.
    pub regular_points_per_visit: f64,
    /// Points a premium member earns per visit.
    pub premium_points_per_visit: f64,
    /// Loyalty total at which a regular member becomes upgrade-eligible.
    pub upgrade_loyalty_threshold: f64,
    /// Minimum attendance before an upgrade request is entertained.
    pub upgrade_attendance_threshold: u32,
}

impl Default for LoyaltyPolicy {
    fn default() -> Self {
        Self {
            regular_points_per_visit: 5.0,
            premium_points_per_visit: 10.0,
            upgrade_loyalty_threshold: 30.0,
            upgrade_attendance_threshold: 30,
        }
    }
}
