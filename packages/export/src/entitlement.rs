//! Entitlement evaluation.
//!
//! A caller may export when they are an admin or their subscription status
//! is exactly `active`. A missing status is a denial, never an error.
//! Decisions are not cached; subscription state can change between calls.

use serde::Serialize;
use std::fmt;
use swatch_common::{AccessContext, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    Admin,
    ActiveSubscription,
    SubscriptionRequired,
}

impl fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DecisionReason::Admin => "admin role",
            DecisionReason::ActiveSubscription => "active subscription",
            DecisionReason::SubscriptionRequired => "subscription required",
        };
        f.write_str(text)
    }
}

/// Why an export was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    SubscriptionRequired,
}

impl DenialReason {
    pub fn code(&self) -> &'static str {
        match self {
            DenialReason::SubscriptionRequired => "SUBSCRIPTION_REQUIRED",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::SubscriptionRequired => f.write_str("subscription required"),
        }
    }
}

/// Outcome of one entitlement check. Only [`evaluate`] builds one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    authorized: bool,
    reason: DecisionReason,
}

/// Proof that an entitlement check passed.
///
/// Only [`Decision::into_grant`] can produce one, and an export artifact
/// cannot be built without it.
#[derive(Debug, PartialEq, Eq)]
pub struct ExportGrant {
    reason: DecisionReason,
}

impl ExportGrant {
    pub fn reason(&self) -> DecisionReason {
        self.reason
    }
}

impl Decision {
    pub fn authorized(&self) -> bool {
        self.authorized
    }

    pub fn reason(&self) -> DecisionReason {
        self.reason
    }

    pub fn into_grant(self) -> Result<ExportGrant, DenialReason> {
        if self.authorized {
            Ok(ExportGrant {
                reason: self.reason,
            })
        } else {
            Err(DenialReason::SubscriptionRequired)
        }
    }
}

/// Decide whether the caller may export code
pub fn evaluate(ctx: &AccessContext) -> Decision {
    if ctx.role == Role::Admin {
        return Decision {
            authorized: true,
            reason: DecisionReason::Admin,
        };
    }

    match &ctx.subscription_status {
        Some(status) if status.is_active() => Decision {
            authorized: true,
            reason: DecisionReason::ActiveSubscription,
        },
        _ => Decision {
            authorized: false,
            reason: DecisionReason::SubscriptionRequired,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_common::SubscriptionStatus;

    #[test]
    fn test_role_and_status_combinations() {
        let statuses = [
            None,
            Some(SubscriptionStatus::Active),
            Some(SubscriptionStatus::Inactive),
            Some(SubscriptionStatus::Other("grace_period".to_string())),
        ];

        for role in [Role::User, Role::Admin] {
            for status in &statuses {
                let ctx = AccessContext::new(role, status.clone());
                let expected = role == Role::Admin
                    || status.as_ref().map(|s| s.as_str()) == Some("active");

                assert_eq!(
                    evaluate(&ctx).authorized(),
                    expected,
                    "role={:?} status={:?}",
                    role,
                    status
                );
            }
        }
    }

    #[test]
    fn test_reasons() {
        assert_eq!(evaluate(&AccessContext::admin()).reason(), DecisionReason::Admin);
        assert_eq!(
            evaluate(&AccessContext::subscriber()).reason(),
            DecisionReason::ActiveSubscription
        );
        assert_eq!(
            evaluate(&AccessContext::anonymous()).reason(),
            DecisionReason::SubscriptionRequired
        );
    }

    #[test]
    fn test_grant_only_when_authorized() {
        let grant = evaluate(&AccessContext::admin()).into_grant().unwrap();
        assert_eq!(grant.reason(), DecisionReason::Admin);

        let denied = evaluate(&AccessContext::anonymous()).into_grant();
        assert_eq!(denied, Err(DenialReason::SubscriptionRequired));
        assert_eq!(DenialReason::SubscriptionRequired.to_string(), "subscription required");
    }
}
