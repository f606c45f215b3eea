use chrono::{DateTime, Utc};
use uuid::Uuid;

pub mod plan;
pub mod policy;
pub mod statement;

pub use plan::{plan_price, Plan, INVALID_PLAN_PRICE};
pub use policy::LoyaltyPolicy;

/// Unique identifier for a member, assigned by the caller at enrollment.
pub type MemberId = u32;

/// Fixed charge for a premium membership.
pub const PREMIUM_CHARGE: f64 = 50_000.0;

/// Discount rate granted once a premium membership is fully paid.
pub const FULL_PAYMENT_DISCOUNT_RATE: f64 = 0.10;

/// A gym member of either tier.
///
/// Common attributes live on this record; tier-specific state lives in
/// [`MemberKind`]. All state transitions go through the methods below so
/// that related fields always change together.
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub profile: MemberProfile,
    /// Number of visits since enrollment (or the last revert).
    pub attendance_count: u32,
    pub loyalty: Loyalty,
    pub active: bool,
    pub kind: MemberKind,
}

/// Identity and contact details.
///
/// These are opaque strings as far as the domain is concerned; validation,
/// if any, belongs to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct MemberProfile {
    pub name: String,
    pub location: String,
    pub phone: String,
    pub email: String,
    pub gender: String,
    pub date_of_birth: String,
    pub membership_start_date: String,
}

/// Tier-specific state for a member.
#[derive(Clone, Debug, PartialEq)]
pub enum MemberKind {
    Regular(RegularDetails),
    Premium(PremiumDetails),
}

impl MemberKind {
    pub fn tier_name(&self) -> &'static str {
        match self {
            MemberKind::Regular(_) => "Regular",
            MemberKind::Premium(_) => "Premium",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegularDetails {
    /// Current plan. The price is derived from it, so the two can never
    /// fall out of sync.
    pub plan: Plan,
    /// Latched once the loyalty total reaches the policy threshold.
    /// Cleared only by a revert.
    pub eligible_for_upgrade: bool,
    pub referral_source: String,
    /// Empty until the member is reverted.
    pub removal_reason: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PremiumDetails {
    pub personal_trainer: String,
    /// Cumulative payments toward [`PREMIUM_CHARGE`]. Never exceeds it.
    pub paid_amount: f64,
    pub full_payment: bool,
    pub discount_amount: f64,
}

impl PremiumDetails {
    /// Remaining balance toward the premium charge.
    pub fn due_amount(&self) -> f64 {
        PREMIUM_CHARGE - self.paid_amount
    }

    /// Recomputes the discount from the current payment state.
    ///
    /// Idempotent; safe to call at any time.
    pub fn calculate_discount(&mut self) -> f64 {
        self.discount_amount = if self.full_payment {
            PREMIUM_CHARGE * FULL_PAYMENT_DISCOUNT_RATE
        } else {
            0.0
        };
        self.discount_amount
    }

    pub fn net_amount_paid(&self) -> f64 {
        self.paid_amount - self.discount_amount
    }
}

/// Loyalty data for a member: the running total plus a ledger of every
/// change.
#[derive(Clone, Debug, PartialEq)]
pub struct Loyalty {
    /// Current amount of loyalty points
    pub points: f64,
    /// Loyalty events for the member
    pub events: Vec<LoyaltyEvent>,
}

impl Loyalty {
    fn new() -> Self {
        Self {
            points: 0.0,
            events: Vec::default(),
        }
    }

    fn credit(&mut self, delta_points: f64, reason: impl Into<String>) {
        self.points += delta_points;
        self.events.push(LoyaltyEvent {
            event_id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            delta_points,
            reason: reason.into(),
        });
    }

    /// Zeroes the total, recording the forfeiture. Skipped when there is
    /// nothing to forfeit, so repeated reverts leave a single entry.
    fn forfeit(&mut self, reason: impl Into<String>) {
        if self.points == 0.0 {
            return;
        }
        let delta_points = -self.points;
        self.points = 0.0;
        self.events.push(LoyaltyEvent {
            event_id: Uuid::new_v4(),
            recorded_at: Utc::now(),
            delta_points,
            reason: reason.into(),
        });
    }
}

/// Details for a loyalty event
#[derive(Clone, Debug, PartialEq)]
pub struct LoyaltyEvent {
    pub event_id: Uuid,
    pub recorded_at: DateTime<Utc>,
    /// Difference in points
    ///
    /// A positive number adds points to the current total. A negative number removes from it.
    pub delta_points: f64,
    /// Message explaining the reason for this event.
    ///
    /// Since the reasons could evolve over time, we log this as a string instead of an enum.
    pub reason: String,
}

/// An operation was invoked on a member of the wrong tier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TierError {
    #[error("member {0} is not on a regular membership")]
    NotRegular(MemberId),
    #[error("member {0} is not on a premium membership")]
    NotPremium(MemberId),
}

/// Result of marking attendance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttendanceOutcome {
    Marked {
        attendance_count: u32,
        loyalty_points: f64,
    },
    /// Inactive members accrue nothing; this is not an error, the caller
    /// decides how to present it.
    MembershipInactive,
}

/// Result of a plan upgrade request on a regular member.
#[derive(Clone, Debug, PartialEq)]
pub enum UpgradeOutcome {
    NotEligible,
    AlreadyOnPlan(Plan),
    InvalidPlan(String),
    Upgraded { plan: Plan, price: f64 },
}

/// Result of a payment on a premium member.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaymentOutcome {
    /// The charge is already settled; nothing changed.
    AlreadyPaid,
    /// Non-positive amounts are rejected without a state change.
    InvalidAmount { amount: f64 },
    /// The amount would push the total past the charge. Payments are
    /// all-or-nothing, so nothing changed.
    ExceedsRemaining { amount: f64, max_payable: f64 },
    Accepted {
        amount: f64,
        remaining: f64,
        full_payment: bool,
        discount_amount: f64,
    },
}

impl Member {
    pub fn new_regular(
        id: MemberId,
        profile: MemberProfile,
        referral_source: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            profile,
            MemberKind::Regular(RegularDetails {
                plan: Plan::Basic,
                eligible_for_upgrade: false,
                referral_source: referral_source.into(),
                removal_reason: String::new(),
            }),
        )
    }

    pub fn new_premium(
        id: MemberId,
        profile: MemberProfile,
        personal_trainer: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            profile,
            MemberKind::Premium(PremiumDetails {
                personal_trainer: personal_trainer.into(),
                paid_amount: 0.0,
                full_payment: false,
                discount_amount: 0.0,
            }),
        )
    }

    fn new(id: MemberId, profile: MemberProfile, kind: MemberKind) -> Self {
        Self {
            id,
            profile,
            attendance_count: 0,
            loyalty: Loyalty::new(),
            active: true,
            kind,
        }
    }

    pub fn loyalty_points(&self) -> f64 {
        self.loyalty.points
    }

    /// Records a visit and accrues loyalty points at the tier's rate.
    ///
    /// Inactive members are left untouched. Regular members become
    /// eligible for a plan upgrade once the post-increment loyalty total
    /// reaches the policy threshold; the flag is sticky until a revert.
    pub fn mark_attendance(&mut self, policy: &LoyaltyPolicy) -> AttendanceOutcome {
        if !self.active {
            return AttendanceOutcome::MembershipInactive;
        }
        let accrued = match self.kind {
            MemberKind::Regular(_) => policy.regular_points_per_visit,
            MemberKind::Premium(_) => policy.premium_points_per_visit,
        };
        self.attendance_count += 1;
        self.loyalty.credit(accrued, "Attendance");
        if let MemberKind::Regular(details) = &mut self.kind {
            if self.loyalty.points >= policy.upgrade_loyalty_threshold {
                details.eligible_for_upgrade = true;
            }
        }
        AttendanceOutcome::Marked {
            attendance_count: self.attendance_count,
            loyalty_points: self.loyalty.points,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Moves a regular member to a new plan.
    ///
    /// Checks run in a fixed order: eligibility, then a no-op request for
    /// the current plan, then plan validity. Eligibility is left set, so a
    /// member can upgrade again later.
    pub fn upgrade_plan(&mut self, new_plan: &str) -> Result<UpgradeOutcome, TierError> {
        let id = self.id;
        let details = match &mut self.kind {
            MemberKind::Regular(details) => details,
            MemberKind::Premium(_) => return Err(TierError::NotRegular(id)),
        };
        if !details.eligible_for_upgrade {
            return Ok(UpgradeOutcome::NotEligible);
        }
        if new_plan.eq_ignore_ascii_case(details.plan.name()) {
            return Ok(UpgradeOutcome::AlreadyOnPlan(details.plan));
        }
        let Some(plan) = Plan::parse(new_plan) else {
            return Ok(UpgradeOutcome::InvalidPlan(new_plan.to_string()));
        };
        details.plan = plan;
        Ok(UpgradeOutcome::Upgraded {
            plan,
            price: plan.price(),
        })
    }

    /// Applies a payment toward the premium charge.
    ///
    /// The paid total and the full-payment flag move as one step, and the
    /// discount is computed the moment the charge is settled. Completion
    /// is detected by exact equality with [`PREMIUM_CHARGE`].
    pub fn pay_due(&mut self, amount: f64) -> Result<PaymentOutcome, TierError> {
        let id = self.id;
        let details = match &mut self.kind {
            MemberKind::Premium(details) => details,
            MemberKind::Regular(_) => return Err(TierError::NotPremium(id)),
        };
        if details.full_payment {
            return Ok(PaymentOutcome::AlreadyPaid);
        }
        if amount <= 0.0 {
            return Ok(PaymentOutcome::InvalidAmount { amount });
        }
        if details.paid_amount + amount > PREMIUM_CHARGE {
            return Ok(PaymentOutcome::ExceedsRemaining {
                amount,
                max_payable: details.due_amount(),
            });
        }
        details.paid_amount += amount;
        details.full_payment = details.paid_amount == PREMIUM_CHARGE;
        if details.full_payment {
            details.calculate_discount();
        }
        Ok(PaymentOutcome::Accepted {
            amount,
            remaining: details.due_amount(),
            full_payment: details.full_payment,
            discount_amount: details.discount_amount,
        })
    }

    /// Reverts a regular member: progress is zeroed, the plan drops back
    /// to Basic, and the caller-supplied reason is recorded. Identity
    /// fields are preserved.
    pub fn revert_regular(&mut self, removal_reason: impl Into<String>) -> Result<(), TierError> {
        match &mut self.kind {
            MemberKind::Regular(details) => {
                details.eligible_for_upgrade = false;
                details.plan = Plan::Basic;
                details.removal_reason = removal_reason.into();
            }
            MemberKind::Premium(_) => return Err(TierError::NotRegular(self.id)),
        }
        self.reset();
        Ok(())
    }

    /// Reverts a premium member: progress and payment state are zeroed and
    /// the trainer assignment is cleared. Identity fields are preserved.
    pub fn revert_premium(&mut self) -> Result<(), TierError> {
        match &mut self.kind {
            MemberKind::Premium(details) => {
                details.personal_trainer.clear();
                details.full_payment = false;
                details.paid_amount = 0.0;
                details.discount_amount = 0.0;
            }
            MemberKind::Regular(_) => return Err(TierError::NotPremium(self.id)),
        }
        self.reset();
        Ok(())
    }

    fn reset(&mut self) {
        self.active = false;
        self.attendance_count = 0;
        self.loyalty.forfeit("Membership reverted");
    }
}
