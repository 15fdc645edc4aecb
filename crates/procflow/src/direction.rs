//! Edge direction resolution for timeline items.
//!
//! The policy is binary. A `file` interface is drawn from provider to
//! consumer because the file is pushed by its producer. Every other kind is
//! drawn from consumer to provider because the consumer is the caller.
//! Activities are self-loops on the process owner.

use log::{debug, trace};

use procflow_core::{
    graph::LayoutEdge,
    identifier::Id,
    model::{ActivityRecord, ActivityUsage, InterfaceRecord, InterfaceUsage, ProcessDefinition},
};

use crate::{
    layout::actor_top_id,
    registry::ActorRegistry,
    sequence::{SequenceItem, SequencePayload},
};

/// Resolves the edge for one timeline item at 0-based `position` and
/// vertical coordinate `y`.
///
/// Returns `None` when an endpoint actor is missing or not registered.
pub fn resolve_edge(
    item: &SequenceItem<'_>,
    position: usize,
    y: f32,
    process: &ProcessDefinition,
    registry: &ActorRegistry,
) -> Option<LayoutEdge> {
    let sequence_number = item.sequence_number();
    match item.payload() {
        SequencePayload::Interface { usage, record } => {
            interface_edge(usage, record, sequence_number, position, y, registry)
        }
        SequencePayload::Activity { usage, record } => {
            activity_edge(usage, record, sequence_number, position, y, process, registry)
        }
    }
}

fn interface_edge(
    usage: &InterfaceUsage,
    record: &InterfaceRecord,
    sequence_number: i64,
    position: usize,
    y: f32,
    registry: &ActorRegistry,
) -> Option<LayoutEdge> {
    let (Some(provider), Some(consumer)) = (record.provider(), record.consumer()) else {
        debug!(interface_id:% = record.id(); "Interface lacks provider or consumer, no edge");
        return None;
    };
    if !registry.contains(provider.id()) || !registry.contains(consumer.id()) {
        debug!(interface_id:% = record.id(); "Interface endpoint not registered, no edge");
        return None;
    }

    let (source, target) = if record.kind().is_file() {
        (provider.id(), consumer.id())
    } else {
        (consumer.id(), provider.id())
    };

    trace!(
        interface_id:% = record.id(),
        kind:% = record.kind(),
        source:% = source,
        target:% = target;
        "Resolved interface direction"
    );

    let mut label = format!("{sequence_number}. {}", record.label());
    if let Some(usage_type) = usage.usage_type() {
        label.push_str(&format!(" ({usage_type})"));
    }

    let edge = LayoutEdge::call(
        edge_id("iml", record.id(), position),
        actor_top_id(source),
        actor_top_id(target),
        label,
        sequence_number,
        y,
    )
    .with_usage_type(usage.usage_type())
    .with_interface_kind(record.kind().clone());

    Some(edge)
}

fn activity_edge(
    usage: &ActivityUsage,
    record: Option<&ActivityRecord>,
    sequence_number: i64,
    position: usize,
    y: f32,
    process: &ProcessDefinition,
    registry: &ActorRegistry,
) -> Option<LayoutEdge> {
    let Some(record) = record else {
        debug!(activity_id:% = usage.activity_id(); "Activity not in catalog, no edge");
        return None;
    };
    let Some(owner) = process.owner().filter(|owner| registry.contains(owner.id())) else {
        debug!(activity_id:% = usage.activity_id(); "Process has no owner, activity skipped");
        return None;
    };

    let edge = LayoutEdge::self_loop(
        edge_id("activity", record.id(), position),
        actor_top_id(owner.id()),
        format!("{sequence_number}. {}", record.name()),
        sequence_number,
        y,
    );

    Some(edge)
}

/// `{prefix}-{record}-{position}`; the position keeps ids unique when a
/// record is used more than once in a process.
fn edge_id(prefix: &str, record: Id, position: usize) -> Id {
    record.with_prefix(prefix).with_suffix(position)
}
