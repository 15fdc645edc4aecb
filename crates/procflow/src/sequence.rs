//! Sequence merger: one timeline out of interface and activity usages.
//!
//! Interface usages and activity usages are numbered independently. The
//! merger wraps both into [`SequenceItem`]s, appends interface items before
//! activity items and applies a single stable sort on the sequence number,
//! so at equal numbers interface items come first.
//!
//! Interface usages need their record to be placed at all. Activity usages
//! always occupy a slot; a missing activity record only costs the edge.

use log::debug;

use procflow_core::model::{
    ActivityRecord, ActivityUsage, InterfaceRecord, InterfaceUsage, ProcessDefinition,
};

use crate::catalog::Catalog;

/// What a timeline entry refers to.
#[derive(Debug, Clone, Copy)]
pub enum SequencePayload<'a> {
    Interface {
        usage: &'a InterfaceUsage,
        record: &'a InterfaceRecord,
    },
    Activity {
        usage: &'a ActivityUsage,
        /// `None` when the activity is not in the catalog.
        record: Option<&'a ActivityRecord>,
    },
}

/// One entry of the merged timeline.
#[derive(Debug, Clone, Copy)]
pub struct SequenceItem<'a> {
    sequence_number: i64,
    payload: SequencePayload<'a>,
}

impl<'a> SequenceItem<'a> {
    pub fn sequence_number(&self) -> i64 {
        self.sequence_number
    }

    pub fn payload(&self) -> SequencePayload<'a> {
        self.payload
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.payload, SequencePayload::Interface { .. })
    }
}

/// Merges the usages of `process` into one timeline ordered by sequence number.
///
/// Interface usages whose record is missing from `catalog` do not appear in
/// the timeline and take no vertical slot. Activity usages are always kept.
pub fn merge<'a>(process: &'a ProcessDefinition, catalog: &'a Catalog) -> Vec<SequenceItem<'a>> {
    let interfaces = process.interface_usages().iter().filter_map(|usage| {
        let Some(record) = catalog.interface(usage.interface_id()) else {
            debug!(interface_id:% = usage.interface_id(); "Interface not in catalog, dropped from timeline");
            return None;
        };
        Some(SequenceItem {
            sequence_number: usage.sequence_number(),
            payload: SequencePayload::Interface { usage, record },
        })
    });

    let activities = process.activity_usages().iter().map(|usage| SequenceItem {
        sequence_number: usage.sequence_number(),
        payload: SequencePayload::Activity {
            usage,
            record: catalog.activity(usage.activity_id()),
        },
    });

    let mut items: Vec<_> = interfaces.chain(activities).collect();
    // `sort_by_key` is stable: equal numbers keep concatenation order
    items.sort_by_key(SequenceItem::sequence_number);
    items
}
