//! Field layout of an info class.
//!
//! Native code and the higher layer both build info classes, so they must agree
//! on one layout. [`InfoField`] is that layout; the library phase exports its
//! positions as named constants and [`InfoSchema`] describes it for consumers
//! outside the process.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Fields of an info class record, with their 1-based positions.
///
/// Positions are exported to the higher layer, so existing discriminants must
/// remain stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum InfoField {
    /// Sequence number assigned when the class is declared.
    Ordinal = 1,
    /// Verbosity threshold; messages above it are suppressed.
    CurrentLevel = 2,
    /// Name the class was declared under.
    ClassName = 3,
    /// Class-specific handler, or `None` to use the default handler.
    Handler = 4,
    /// Output target handed to handlers.
    Output = 5,
}

/// Name of the exported constant holding the number of fields.
pub const INFO_FIELD_COUNT_EXPORT: &str = "INFO_FIELD_COUNT";

impl InfoField {
    pub const COUNT: usize = 5;

    /// All fields in position order.
    pub const ALL: [InfoField; InfoField::COUNT] = [
        InfoField::Ordinal,
        InfoField::CurrentLevel,
        InfoField::ClassName,
        InfoField::Handler,
        InfoField::Output,
    ];

    /// 1-based position in a positional record.
    pub fn position(self) -> usize {
        self as usize
    }

    /// 0-based index into a record slice.
    pub fn index(self) -> usize {
        self.position() - 1
    }

    pub fn from_position(position: usize) -> Option<Self> {
        Self::ALL.get(position.checked_sub(1)?).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            InfoField::Ordinal => "ordinal",
            InfoField::CurrentLevel => "current_level",
            InfoField::ClassName => "class_name",
            InfoField::Handler => "handler",
            InfoField::Output => "output",
        }
    }

    /// Global constant name under which this field's position is exported.
    ///
    /// The ordinal is assigned by whoever declares the class and is not exported.
    pub fn export_name(self) -> Option<&'static str> {
        match self {
            InfoField::Ordinal => None,
            InfoField::CurrentLevel => Some("INFO_FIELD_CURRENT_LEVEL"),
            InfoField::ClassName => Some("INFO_FIELD_CLASS_NAME"),
            InfoField::Handler => Some("INFO_FIELD_HANDLER"),
            InfoField::Output => Some("INFO_FIELD_OUTPUT"),
        }
    }
}

/// One entry of a serialized [`InfoSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub field: InfoField,
    pub label: String,
    pub position: usize,
    pub export: Option<String>,
}

/// Serializable description of the info class layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoSchema {
    pub fields: Vec<FieldLayout>,
    pub count: usize,
    /// Hex SHA-256 over every field's label and position.
    pub fingerprint: String,
}

impl InfoSchema {
    /// The layout compiled into this runtime.
    pub fn current() -> Self {
        let fields = InfoField::ALL
            .iter()
            .map(|&field| FieldLayout {
                field,
                label: field.label().to_string(),
                position: field.position(),
                export: field.export_name().map(str::to_string),
            })
            .collect::<Vec<_>>();
        let fingerprint = to_hex(&layout_hash(&fields));
        Self {
            fields,
            count: InfoField::COUNT,
            fingerprint,
        }
    }

    /// Constants published to the higher layer by the library phase, in
    /// export order: the four field positions followed by the field count.
    pub fn exports() -> Vec<(&'static str, i64)> {
        let mut exports: Vec<(&'static str, i64)> = InfoField::ALL
            .iter()
            .filter_map(|&field| {
                field
                    .export_name()
                    .map(|name| (name, field.position() as i64))
            })
            .collect();
        exports.push((INFO_FIELD_COUNT_EXPORT, InfoField::COUNT as i64));
        exports
    }

    /// Returns `true` when `other` describes exactly the compiled-in layout.
    pub fn is_compatible(&self, other: &InfoSchema) -> bool {
        self.count == other.count
            && self.fingerprint == other.fingerprint
            && to_hex(&layout_hash(&other.fields)) == other.fingerprint
    }
}

fn layout_hash(fields: &[FieldLayout]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update(field.label.as_bytes());
        hasher.update(b":");
        hasher.update((field.position as u64).to_le_bytes());
        hasher.update(b";");
    }
    let result = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&result);
    out
}

fn to_hex(bytes: &[u8; 32]) -> String {
    let mut out = String::with_capacity(64);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
