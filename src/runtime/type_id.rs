use std::fmt;

/// Identity of a runtime type.
///
/// Primitive types have a fixed discriminant. User algebraic types are
/// `User(index)` where `index` is the slot assigned by
/// [`ProgramTables`](crate::runtime::tables::ProgramTables) at load time, so
/// type equality is plain discriminant comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeId {
    /// Tags unresolved identifiers and diagnostic sentinels.
    Unknown,
    Unit,
    Bool,
    Byte,
    Int,
    Double,
    String,
    Closure,
    Array,
    ByteArray,
    Ref,
    FileHandle,
    Pattern,
    User(usize),
}

impl TypeId {
    pub const PRIMITIVES: [TypeId; 13] = [
        TypeId::Unknown,
        TypeId::Unit,
        TypeId::Bool,
        TypeId::Byte,
        TypeId::Int,
        TypeId::Double,
        TypeId::String,
        TypeId::Closure,
        TypeId::Array,
        TypeId::ByteArray,
        TypeId::Ref,
        TypeId::FileHandle,
        TypeId::Pattern,
    ];

    /// Returns the canonical name of a primitive type, `None` for user types.
    ///
    /// These names are user-visible in diagnostics and must stay stable.
    pub fn primitive_name(self) -> Option<&'static str> {
        let name = match self {
            TypeId::Unknown => "Unknown",
            TypeId::Unit => "Unit",
            TypeId::Bool => "Bool",
            TypeId::Byte => "Byte",
            TypeId::Int => "Int",
            TypeId::Double => "Double",
            TypeId::String => "String",
            TypeId::Closure => "Closure",
            TypeId::Array => "Array",
            TypeId::ByteArray => "ByteArray",
            TypeId::Ref => "Ref",
            TypeId::FileHandle => "FileHandle",
            TypeId::Pattern => "Pattern",
            TypeId::User(_) => return None,
        };
        Some(name)
    }

    pub fn from_primitive_name(name: &str) -> Option<TypeId> {
        Self::PRIMITIVES
            .into_iter()
            .find(|ty| ty.primitive_name() == Some(name))
    }

    pub fn is_user(self) -> bool {
        matches!(self, TypeId::User(_))
    }

    /// Index into the type table for user types.
    pub fn user_index(self) -> Option<usize> {
        match self {
            TypeId::User(index) => Some(index),
            _ => None,
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primitive_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "User#{}", self.user_index().unwrap_or_default()),
        }
    }
}
