/// The closed set of atomic column types.
///
/// A field whose type is in this set maps to exactly one database column;
/// everything else is treated as a nested mapped entity. The set is fixed by
/// design and not user-extensible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    /// UTF-8 text
    String,

    /// Signed 64-bit integer
    I64,

    /// Single-precision float
    F32,

    /// Double-precision float
    F64,

    /// UTC timestamp
    Timestamp,

    /// Calendar date without a time component
    Date,

    /// Single character
    Char,
}

impl Type {
    /// All atomic types, in no particular order.
    pub const ALL: &'static [Type] = &[
        Type::String,
        Type::I64,
        Type::F32,
        Type::F64,
        Type::Timestamp,
        Type::Date,
        Type::Char,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Type::String => "String",
            Type::I64 => "I64",
            Type::F32 => "F32",
            Type::F64 => "F64",
            Type::Timestamp => "Timestamp",
            Type::Date => "Date",
            Type::Char => "Char",
        }
    }
}
