//! Textual OBJECT-TYPE / NOTIFICATION-TYPE / OBJECT-GROUP bodies.

use super::naming::ident;
use super::oids::child;

/// A scalar object under `parent_name` at sub-arc `arc`.
pub fn scalar(parent_name: &str, arc: usize, index: usize) -> (String, String) {
    let name = ident("Scalar", index);
    let text = format!(
        "{name} OBJECT-TYPE\n\
         \x20   SYNTAX      INTEGER\n\
         \x20   MAX-ACCESS  read-only\n\
         \x20   STATUS      current\n\
         \x20   DESCRIPTION \"a generated scalar\"\n\
         \x20   ::= {}\n",
        child(parent_name, arc)
    );
    (name, text)
}

/// A table with `num_columns` INTEGER columns and `num_rows` conceptual
/// rows' worth of schema (tables are schema, not instance data — row count
/// only affects how many index permutations a resolver would see at load
/// time over the wire, irrelevant here; `num_rows` is unused by the schema
/// itself and kept for API symmetry with a real corpus generator).
pub fn table(parent_name: &str, arc: usize, index: usize, num_columns: usize) -> (String, String) {
    let table_name = ident("Table", index);
    let entry_name = ident("Entry", index);
    let row_name = ident("Row", index);
    let mut text = format!(
        "{table_name} OBJECT-TYPE\n\
         \x20   SYNTAX      SEQUENCE OF {row_name}\n\
         \x20   MAX-ACCESS  not-accessible\n\
         \x20   STATUS      current\n\
         \x20   DESCRIPTION \"a generated table\"\n\
         \x20   ::= {}\n\n",
        child(parent_name, arc)
    );
    text += &format!(
        "{entry_name} OBJECT-TYPE\n\
         \x20   SYNTAX      {row_name}\n\
         \x20   MAX-ACCESS  not-accessible\n\
         \x20   STATUS      current\n\
         \x20   DESCRIPTION \"a generated row\"\n\
         \x20   INDEX       {{ {}Index }}\n\
         \x20   ::= {}\n\n",
        row_name,
        child(&table_name, 1)
    );
    text += &format!("{row_name} ::= SEQUENCE {{\n    {row_name}Index INTEGER");
    for col in 0..num_columns {
        text += &format!(",\n    {}Col{col} INTEGER", row_name);
    }
    text += "\n}\n\n";
    text += &format!(
        "{row_name}Index OBJECT-TYPE\n\
         \x20   SYNTAX      INTEGER\n\
         \x20   MAX-ACCESS  not-accessible\n\
         \x20   STATUS      current\n\
         \x20   DESCRIPTION \"row index\"\n\
         \x20   ::= {}\n\n",
        child(&entry_name, 1)
    );
    for col in 0..num_columns {
        text += &format!(
            "{row_name}Col{col} OBJECT-TYPE\n\
             \x20   SYNTAX      INTEGER\n\
             \x20   MAX-ACCESS  read-write\n\
             \x20   STATUS      current\n\
             \x20   DESCRIPTION \"generated column {col}\"\n\
             \x20   ::= {}\n\n",
            child(&entry_name, col + 2)
        );
    }
    (table_name, text)
}

/// A NOTIFICATION-TYPE referencing up to two scalar object names.
pub fn notification(parent_name: &str, arc: usize, index: usize, objects: &[String]) -> (String, String) {
    let name = ident("Notif", index);
    let objects_clause = if objects.is_empty() {
        String::new()
    } else {
        format!("    OBJECTS     {{ {} }}\n", objects.join(", "))
    };
    let text = format!(
        "{name} NOTIFICATION-TYPE\n\
         {objects_clause}\
         \x20   STATUS      current\n\
         \x20   DESCRIPTION \"a generated notification\"\n\
         \x20   ::= {}\n",
        child(parent_name, arc)
    );
    (name, text)
}

/// An OBJECT-GROUP over the given object names.
pub fn object_group(parent_name: &str, arc: usize, index: usize, members: &[String]) -> String {
    let name = ident("Group", index);
    format!(
        "{name} OBJECT-GROUP\n\
         \x20   OBJECTS     {{ {} }}\n\
         \x20   STATUS      current\n\
         \x20   DESCRIPTION \"a generated group\"\n\
         \x20   ::= {}\n",
        members.join(", "),
        child(parent_name, arc)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_text_mentions_its_name() {
        let (name, text) = scalar("benchRoot0", 1, 3);
        assert!(text.contains(&name));
        assert!(text.contains("benchRoot0"));
    }

    #[test]
    fn table_text_defines_entry_and_columns() {
        let (name, text) = table("benchRoot0", 2, 1, 3);
        assert!(text.contains(&name));
        assert!(text.contains("Col0"));
        assert!(text.contains("Col2"));
        assert!(text.contains("INDEX"));
    }
}
