//! Well-known SMI OID roots, used only as a last-resort `allow-safe-fallbacks`
//! shortcut when a base module defining them genuinely wasn't loaded (spec
//! §4.8). Loading RFC1155-SMI/SNMPv2-SMI normally makes this unnecessary.

use crate::model::Oid;

/// The three ASN.1 universal roots every OID value ultimately descends
/// from. Unlike [`well_known_oid_root`], these are never gated by
/// strictness: they are not SMI symbols a module could plausibly import,
/// just the fixed top of the tree (spec §3 "Oid").
pub fn asn1_universal_root(name: &str) -> Option<Oid> {
    let arcs: &[u32] = match name {
        "ccitt" => &[0],
        "iso" => &[1],
        "joint-iso-ccitt" | "joint-iso-itu-t" => &[2],
        _ => return None,
    };
    Some(Oid::from_arcs(arcs.to_vec()))
}

pub fn well_known_oid_root(name: &str) -> Option<Oid> {
    let arcs: &[u32] = match name {
        "org" => &[1, 3],
        "dod" => &[1, 3, 6],
        "internet" => &[1, 3, 6, 1],
        "directory" => &[1, 3, 6, 1, 1],
        "mgmt" => &[1, 3, 6, 1, 2],
        "mib-2" => &[1, 3, 6, 1, 2, 1],
        "transmission" => &[1, 3, 6, 1, 2, 1, 10],
        "experimental" => &[1, 3, 6, 1, 3],
        "private" => &[1, 3, 6, 1, 4],
        "enterprises" => &[1, 3, 6, 1, 4, 1],
        "security" => &[1, 3, 6, 1, 5],
        "snmpV2" => &[1, 3, 6, 1, 6],
        "snmpDomains" => &[1, 3, 6, 1, 6, 1],
        "snmpProxys" => &[1, 3, 6, 1, 6, 2],
        "snmpModules" => &[1, 3, 6, 1, 6, 3],
        "zeroDotZero" => &[0, 0],
        _ => return None,
    };
    Some(Oid::from_arcs(arcs.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roots_resolve() {
        assert_eq!(well_known_oid_root("internet"), Some(Oid::from_arcs([1, 3, 6, 1])));
        assert_eq!(
            well_known_oid_root("enterprises"),
            Some(Oid::from_arcs([1, 3, 6, 1, 4, 1]))
        );
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(well_known_oid_root("notARealRoot"), None);
    }
}
