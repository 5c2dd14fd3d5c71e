//! Static integer range tables, one per backend.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Whether an integer column accepts negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signedness {
    Signed,
    Unsigned,
}

impl Signedness {
    /// Signedness implied by the presence of an `unsigned` marker.
    pub fn from_unsigned(unsigned: bool) -> Self {
        if unsigned {
            Self::Unsigned
        } else {
            Self::Signed
        }
    }
}

/// Inclusive range of an integer type, as decimal literals.
///
/// Kept as strings: the unsigned 64-bit maximum does not fit an `i64`, and the
/// values are only ever emitted verbatim into `min:`/`max:` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerBounds {
    pub min: &'static str,
    pub max: &'static str,
}

/// Signed 64-bit range, used for every integer column on SQLite.
pub const GENERIC_64_BIT: IntegerBounds = IntegerBounds {
    min: "-9223372036854775808",
    max: "9223372036854775807",
};

type Entry = (&'static str, Signedness, &'static str, &'static str);

const MYSQL_ENTRIES: &[Entry] = &[
    ("tinyint", Signedness::Signed, "-128", "127"),
    ("tinyint", Signedness::Unsigned, "0", "255"),
    ("smallint", Signedness::Signed, "-32768", "32767"),
    ("smallint", Signedness::Unsigned, "0", "65535"),
    ("mediumint", Signedness::Signed, "-8388608", "8388607"),
    ("mediumint", Signedness::Unsigned, "0", "16777215"),
    ("int", Signedness::Signed, "-2147483648", "2147483647"),
    ("int", Signedness::Unsigned, "0", "4294967295"),
    ("integer", Signedness::Signed, "-2147483648", "2147483647"),
    ("integer", Signedness::Unsigned, "0", "4294967295"),
    ("bigint", Signedness::Signed, "-9223372036854775808", "9223372036854775807"),
    ("bigint", Signedness::Unsigned, "0", "18446744073709551615"),
];

const POSTGRES_ENTRIES: &[Entry] = &[
    ("smallint", Signedness::Signed, "-32768", "32767"),
    ("integer", Signedness::Signed, "-2147483648", "2147483647"),
    ("bigint", Signedness::Signed, "-9223372036854775808", "9223372036854775807"),
];

/// Lookup from integer type name and signedness to its range.
#[derive(Debug)]
pub struct IntegerBoundsTable {
    widths: HashMap<&'static str, HashMap<Signedness, IntegerBounds>>,
}

impl IntegerBoundsTable {
    fn from_entries(entries: &[Entry]) -> Self {
        let mut widths: HashMap<&'static str, HashMap<Signedness, IntegerBounds>> = HashMap::new();
        for &(name, signedness, min, max) in entries {
            widths
                .entry(name)
                .or_default()
                .insert(signedness, IntegerBounds { min, max });
        }
        Self { widths }
    }

    /// MySQL/MariaDB: five width classes, signed and unsigned.
    pub fn mysql() -> &'static Self {
        static TABLE: OnceLock<IntegerBoundsTable> = OnceLock::new();
        TABLE.get_or_init(|| Self::from_entries(MYSQL_ENTRIES))
    }

    /// PostgreSQL: three width classes, no unsigned variants.
    pub fn postgres() -> &'static Self {
        static TABLE: OnceLock<IntegerBoundsTable> = OnceLock::new();
        TABLE.get_or_init(|| Self::from_entries(POSTGRES_ENTRIES))
    }

    pub fn lookup(&self, type_name: &str, signedness: Signedness) -> Option<IntegerBounds> {
        self.widths
            .get(type_name)
            .and_then(|signs| signs.get(&signedness))
            .copied()
    }

    /// Type names with at least one entry.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.widths.keys().copied()
    }
}
