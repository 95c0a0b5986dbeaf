//! Device target dispatch — one grouped call per family domain.
//!
//! Targets are partitioned by the substring before the first `.`; each
//! non-empty group receives that family's cached edge action with the
//! group's identifiers under `target_ids`. Groups are independent: one
//! group's failure never aborts the siblings.

use serde_json::Value;

use daywindow_domain::state::{Edge, ScheduleState};

use crate::ports::DeviceGateway;

/// Partition targets by family domain.
///
/// Relative order is preserved within each group, and groups appear in
/// first-seen order. Entries without a `.` separator are skipped.
#[must_use]
pub fn group_by_domain(targets: &[String]) -> Vec<(String, Vec<String>)> {
    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for target in targets {
        let Some((domain, id)) = target.split_once('.') else {
            tracing::warn!(entity = %target, "skipping target without a family separator");
            continue;
        };
        match groups.iter_mut().find(|(d, _)| d == domain) {
            Some((_, ids)) => ids.push(id.to_string()),
            None => groups.push((domain.to_string(), vec![id.to_string()])),
        }
    }
    groups
}

/// Dispatch the cached actions for `edge` to every target group.
///
/// A no-op when `targets` is empty. Per-group call failures are logged and
/// isolated; the engine never sees them.
pub async fn dispatch<G: DeviceGateway>(
    gateway: &G,
    state: &ScheduleState,
    edge: Edge,
    targets: &[String],
) {
    for (domain, ids) in group_by_domain(targets) {
        let Some(action) = state.action_for(edge, &domain) else {
            continue;
        };
        let mut data = action.data.clone();
        data.insert("target_ids".to_string(), Value::from(ids));
        if let Err(err) = gateway
            .call(&domain, &action.service, Value::Object(data))
            .await
        {
            tracing::warn!(%err, %domain, service = %action.service, "device dispatch failed");
        }
    }
}
