//! Process definition model consumed by the diagram generator.
//!
//! These types describe a technical process the way the inventory stores it:
//! a process owned by one application, referencing catalogued interfaces and
//! internal activities through *usages* that carry their own sequence numbers.
//! Records are resolved from the catalog by the caller; the generator never
//! looks anything up on its own.
//!
//! All types deserialize from the inventory's camelCase JSON.

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identifier::Id;

/// An application or system taking part in a process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    id: Id,
    display_name: String,
}

impl Actor {
    pub fn new(id: impl Into<Id>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Transport style of an interface.
///
/// Parsing is case-insensitive and never fails: unknown kinds are kept as
/// [`InterfaceKind::Other`] with their original spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterfaceKind {
    File,
    Rest,
    Soap,
    Graphql,
    Messaging,
    Database,
    Other(String),
}

impl Default for InterfaceKind {
    /// An unspecified kind. It is not a file transfer.
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl InterfaceKind {
    /// Returns true for file transfers, the only kind where data is pushed
    /// by the provider instead of pulled by the consumer.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File)
    }
}

impl FromStr for InterfaceKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "rest" => Self::Rest,
            "soap" => Self::Soap,
            "graphql" => Self::Graphql,
            "messaging" => Self::Messaging,
            "database" => Self::Database,
            _ => Self::Other(s.to_string()),
        };
        Ok(kind)
    }
}

impl From<String> for InterfaceKind {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<InterfaceKind> for String {
    fn from(kind: InterfaceKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::File => "file",
            Self::Rest => "rest",
            Self::Soap => "soap",
            Self::Graphql => "graphql",
            Self::Messaging => "messaging",
            Self::Database => "database",
            Self::Other(name) => name,
        };
        f.write_str(name)
    }
}

/// Whether a process consumes or provides an interface.
///
/// Deserialization goes through [`FromStr`] and ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UsageType {
    Consumes,
    Provides,
}

/// Error returned when a usage type string is not recognized.
#[derive(Debug, Error)]
#[error("unknown usage type `{0}`, expected `consumes` or `provides`")]
pub struct UnknownUsageType(String);

impl FromStr for UsageType {
    type Err = UnknownUsageType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consumes" => Ok(Self::Consumes),
            "provides" => Ok(Self::Provides),
            _ => Err(UnknownUsageType(s.to_string())),
        }
    }
}

impl TryFrom<String> for UsageType {
    type Error = UnknownUsageType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UsageType> for String {
    fn from(usage_type: UsageType) -> Self {
        usage_type.to_string()
    }
}

impl fmt::Display for UsageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Consumes => f.write_str("consumes"),
            Self::Provides => f.write_str("provides"),
        }
    }
}

/// A catalogued interface between a provider and a consumer application.
///
/// Either side may be missing when the catalog entry is incomplete. A
/// missing kind or label deserializes to an empty value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceRecord {
    id: Id,
    #[serde(default)]
    kind: InterfaceKind,
    #[serde(default)]
    provider: Option<Actor>,
    #[serde(default)]
    consumer: Option<Actor>,
    #[serde(default)]
    label: String,
}

impl InterfaceRecord {
    pub fn new(id: impl Into<Id>, kind: InterfaceKind, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            provider: None,
            consumer: None,
            label: label.into(),
        }
    }

    pub fn with_provider(mut self, provider: Actor) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_consumer(mut self, consumer: Actor) -> Self {
        self.consumer = Some(consumer);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn kind(&self) -> &InterfaceKind {
        &self.kind
    }

    pub fn provider(&self) -> Option<&Actor> {
        self.provider.as_ref()
    }

    pub fn consumer(&self) -> Option<&Actor> {
        self.consumer.as_ref()
    }

    /// Catalogue label, e.g. the interface's IML number.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Reference to an interface from within a process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceUsage {
    interface_id: Id,
    #[serde(default)]
    sequence_number: i64,
    #[serde(default)]
    usage_type: Option<UsageType>,
}

impl InterfaceUsage {
    pub fn new(interface_id: impl Into<Id>, sequence_number: i64) -> Self {
        Self {
            interface_id: interface_id.into(),
            sequence_number,
            usage_type: None,
        }
    }

    pub fn with_usage_type(mut self, usage_type: UsageType) -> Self {
        self.usage_type = Some(usage_type);
        self
    }

    pub fn interface_id(&self) -> Id {
        self.interface_id
    }

    pub fn sequence_number(&self) -> i64 {
        self.sequence_number
    }

    pub fn usage_type(&self) -> Option<UsageType> {
        self.usage_type
    }
}

/// An internal step performed by the process's own application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    id: Id,
    name: String,
    #[serde(default)]
    kind: String,
    #[serde(default)]
    description: Option<String>,
}

impl ActivityRecord {
    pub fn new(id: impl Into<Id>, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind: kind.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Activity category such as `validate` or `transform`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Reference to an internal activity from within a process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityUsage {
    activity_id: Id,
    #[serde(default)]
    sequence_number: i64,
}

impl ActivityUsage {
    pub fn new(activity_id: impl Into<Id>, sequence_number: i64) -> Self {
        Self {
            activity_id: activity_id.into(),
            sequence_number,
        }
    }

    pub fn activity_id(&self) -> Id {
        self.activity_id
    }

    pub fn sequence_number(&self) -> i64 {
        self.sequence_number
    }
}

/// A technical process: the unit a diagram is generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessDefinition {
    id: Id,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    owner: Option<Actor>,
    #[serde(default)]
    interface_usages: Vec<InterfaceUsage>,
    #[serde(default)]
    activity_usages: Vec<ActivityUsage>,
}

impl ProcessDefinition {
    pub fn new(id: impl Into<Id>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            owner: None,
            interface_usages: Vec::new(),
            activity_usages: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_owner(mut self, owner: Actor) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_interface_usage(mut self, usage: InterfaceUsage) -> Self {
        self.interface_usages.push(usage);
        self
    }

    pub fn with_activity_usage(mut self, usage: ActivityUsage) -> Self {
        self.activity_usages.push(usage);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The application that owns the process and performs its activities.
    pub fn owner(&self) -> Option<&Actor> {
        self.owner.as_ref()
    }

    pub fn interface_usages(&self) -> &[InterfaceUsage] {
        &self.interface_usages
    }

    pub fn activity_usages(&self) -> &[ActivityUsage] {
        &self.activity_usages
    }
}
