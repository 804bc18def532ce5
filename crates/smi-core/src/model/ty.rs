//! Resolved `Type` entities and named-type chains (spec §3 "Type").

use super::ids::TypeId;

/// The primitive a type chain eventually bottoms out at (spec §3 "Type").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseType {
    Integer32,
    Unsigned32,
    Counter32,
    Counter64,
    Gauge32,
    TimeTicks,
    IpAddress,
    OctetString,
    ObjectIdentifier,
    Bits,
    Opaque,
    Sequence,
    Unknown,
}

/// A named value in an enumerated `INTEGER` or a `BITS` type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedValue {
    pub name: String,
    pub number: i128,
}

/// An inclusive numeric or size range, e.g. `0..255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub lo: i128,
    pub hi: i128,
}

/// A resolved type: either a textual convention, an anonymous inline
/// refinement, or a bare ASN.1 primitive (spec §3 "Type").
#[derive(Debug, Clone)]
pub struct Type {
    pub id: TypeId,
    pub name: String,
    /// The type this one was defined in terms of, e.g. `MyLabel`'s parent is
    /// `MyString`. `None` for a bare primitive or an unresolved reference.
    pub parent: Option<TypeId>,
    pub base: BaseType,
    pub is_textual_convention: bool,
    pub display_hint: Option<String>,
    pub sizes: Vec<Range>,
    pub ranges: Vec<Range>,
    pub named_values: Vec<NamedValue>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub reference: Option<String>,
    /// True if this Type could not be resolved at all (spec §4.6 phase 4:
    /// "remains registered with base=Unknown ... does not block dependents").
    pub unresolved: bool,
}

impl Type {
    /// The primitive ASN.1 names that are always resolvable without import
    /// (spec §6 "MIB surface").
    pub fn builtin_base(name: &str) -> Option<BaseType> {
        Some(match name {
            "INTEGER" | "Integer32" => BaseType::Integer32,
            "Unsigned32" => BaseType::Unsigned32,
            "OCTET STRING" => BaseType::OctetString,
            "OBJECT IDENTIFIER" => BaseType::ObjectIdentifier,
            "BITS" => BaseType::Bits,
            _ => return None,
        })
    }

    /// Well-known SMIv2 application types, resolvable without import once
    /// `allow-best-guess-fallbacks` is enabled (spec §4.8).
    pub fn well_known_application(name: &str) -> Option<BaseType> {
        Some(match name {
            "Counter32" => BaseType::Counter32,
            "Counter64" => BaseType::Counter64,
            "Gauge32" => BaseType::Gauge32,
            "TimeTicks" => BaseType::TimeTicks,
            "IpAddress" => BaseType::IpAddress,
            "Opaque" => BaseType::Opaque,
            _ => return None,
        })
    }

    /// SMIv1 primitive aliases (spec §4.8).
    pub fn well_known_smiv1(name: &str) -> Option<BaseType> {
        Some(match name {
            "Counter" => BaseType::Counter32,
            "Gauge" => BaseType::Gauge32,
            "NetworkAddress" => BaseType::IpAddress,
            _ => return None,
        })
    }

    /// Well-known SNMPv2-TC textual conventions, resolvable without import
    /// once `allow-best-guess-fallbacks` is enabled (spec §4.8). Loading
    /// SNMPv2-TC normally makes this unnecessary; this only covers a module
    /// that references one of these names without importing it.
    pub fn well_known_textual_convention(name: &str) -> Option<BaseType> {
        Some(match name {
            "DisplayString" => BaseType::OctetString,
            "TruthValue" => BaseType::Integer32,
            "RowStatus" => BaseType::Integer32,
            "TimeStamp" | "TimeInterval" => BaseType::TimeTicks,
            "PhysAddress" | "MacAddress" => BaseType::OctetString,
            "StorageType" | "TestAndIncr" | "AutonomousType" => BaseType::Integer32,
            _ => return None,
        })
    }
}
