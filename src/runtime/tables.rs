//! Function and type tables produced by the compiler.
//!
//! Both tables are built once before any program code runs and are read-only
//! afterwards. They contain no boxed values, so a built [`ProgramTables`] is
//! `Send + Sync` and can be shared freely.

use std::{collections::HashMap, ffi::c_void, fmt};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::runtime::{
    bootstrap::Runtime,
    error::{RuntimeError, RuntimeResult},
    type_id::TypeId,
    value::Value,
};

/// Function implemented in Rust and registered directly in the table.
pub type NativeFn = fn(&Runtime, &[Value]) -> RuntimeResult<Value>;

/// Address of a C-ABI function taking `arity` box pointers and returning an
/// owned box pointer. See [`crate::runtime::bridge`] for the call contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternTarget(usize);

impl ExternTarget {
    pub fn new(code: *const c_void) -> Self {
        Self(code as usize)
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    pub fn as_ptr(self) -> *const () {
        self.0 as *const ()
    }
}

#[derive(Clone, Copy)]
pub enum NativeTarget {
    Rust(NativeFn),
    Extern(ExternTarget),
}

impl fmt::Debug for NativeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeTarget::Rust(_) => write!(f, "Rust(<fn>)"),
            NativeTarget::Extern(target) => write!(f, "Extern({:#x})", target.0),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionEntry {
    pub name: String,
    pub arity: usize,
    pub target: NativeTarget,
}

/// One named alternative of a user type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constructor {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Constructor {
    pub fn new(name: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            name: name.into(),
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == field)
    }
}

/// A user algebraic type: its globally unique name and its constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    pub name: String,
    pub constructors: Vec<Constructor>,
}

impl TypeEntry {
    pub fn new(name: impl Into<String>, constructors: Vec<Constructor>) -> Self {
        Self {
            name: name.into(),
            constructors,
        }
    }
}

/// Type table section of the JSON manifest emitted by the compiler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeManifest {
    pub types: Vec<TypeEntry>,
}

#[derive(Debug)]
pub enum TablesError {
    DuplicateType(String),
    ReservedTypeName(String),
    Manifest(serde_json::Error),
}

impl fmt::Display for TablesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TablesError::DuplicateType(name) => write!(f, "type `{}` is defined twice", name),
            TablesError::ReservedTypeName(name) => {
                write!(f, "type `{}` clashes with a primitive type", name)
            }
            TablesError::Manifest(err) => write!(f, "malformed type manifest: {}", err),
        }
    }
}

impl std::error::Error for TablesError {}

impl From<serde_json::Error> for TablesError {
    fn from(err: serde_json::Error) -> Self {
        TablesError::Manifest(err)
    }
}

impl From<TablesError> for RuntimeError {
    fn from(err: TablesError) -> Self {
        RuntimeError::InvalidProgramTables {
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ProgramTablesBuilder {
    functions: Vec<FunctionEntry>,
    types: Vec<TypeEntry>,
}

impl ProgramTablesBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a function and returns its table index.
    pub fn add_function(&mut self, name: impl Into<String>, arity: usize, target: NativeTarget) -> usize {
        self.functions.push(FunctionEntry {
            name: name.into(),
            arity,
            target,
        });
        self.functions.len() - 1
    }

    pub fn add_rust_function(&mut self, name: impl Into<String>, arity: usize, func: NativeFn) -> usize {
        self.add_function(name, arity, NativeTarget::Rust(func))
    }

    /// Appends a user type and returns the identity it will have at run time.
    pub fn add_type(&mut self, entry: TypeEntry) -> TypeId {
        self.types.push(entry);
        TypeId::User(self.types.len() - 1)
    }

    /// Appends every type of a JSON [`TypeManifest`], in manifest order.
    pub fn types_from_json(&mut self, json: &str) -> Result<Vec<TypeId>, TablesError> {
        let manifest: TypeManifest = serde_json::from_str(json)?;
        Ok(manifest
            .types
            .into_iter()
            .map(|entry| self.add_type(entry))
            .collect())
    }

    pub fn build(self) -> Result<ProgramTables, TablesError> {
        let mut type_ids = HashMap::with_capacity(self.types.len());
        for (index, entry) in self.types.iter().enumerate() {
            if TypeId::from_primitive_name(&entry.name).is_some() {
                return Err(TablesError::ReservedTypeName(entry.name.clone()));
            }
            if type_ids.insert(entry.name.clone(), index).is_some() {
                return Err(TablesError::DuplicateType(entry.name.clone()));
            }
        }

        Ok(ProgramTables {
            functions: self.functions,
            types: self.types,
            type_ids,
        })
    }
}

/// The closed-world metadata of one compiled program.
#[derive(Debug, Default)]
pub struct ProgramTables {
    functions: Vec<FunctionEntry>,
    types: Vec<TypeEntry>,
    type_ids: HashMap<String, usize>,
}

#[derive(Serialize)]
struct FingerprintFunction<'a> {
    name: &'a str,
    arity: usize,
}

#[derive(Serialize)]
struct Fingerprint<'a> {
    functions: Vec<FingerprintFunction<'a>>,
    types: &'a [TypeEntry],
}

impl ProgramTables {
    pub fn builder() -> ProgramTablesBuilder {
        ProgramTablesBuilder::new()
    }

    pub fn functions(&self) -> &[FunctionEntry] {
        &self.functions
    }

    pub fn function(&self, index: usize) -> Option<&FunctionEntry> {
        self.functions.get(index)
    }

    pub fn types(&self) -> &[TypeEntry] {
        &self.types
    }

    /// Looks up the type-table entry of a user type.
    ///
    /// Primitive types and indices outside the table are
    /// [`RuntimeError::FunctionTypeNotFound`].
    pub fn find_type(&self, type_id: TypeId) -> RuntimeResult<&TypeEntry> {
        type_id
            .user_index()
            .and_then(|index| self.types.get(index))
            .ok_or_else(|| RuntimeError::FunctionTypeNotFound {
                type_name: self.type_name(type_id).to_string(),
            })
    }

    /// Resolves a type by its qualified name, for code that only knows names.
    pub fn type_id_by_name(&self, name: &str) -> Option<TypeId> {
        TypeId::from_primitive_name(name)
            .or_else(|| self.type_ids.get(name).map(|&index| TypeId::User(index)))
    }

    pub fn type_name(&self, type_id: TypeId) -> &str {
        match type_id {
            TypeId::User(index) => self
                .types
                .get(index)
                .map(|entry| entry.name.as_str())
                .unwrap_or("<unregistered type>"),
            primitive => primitive.primitive_name().unwrap_or("<unregistered type>"),
        }
    }

    /// Hex SHA-256 over function names, arities and the type manifest.
    ///
    /// Native target addresses are not part of it, so two builds of the same
    /// program share a fingerprint.
    pub fn fingerprint(&self) -> String {
        let fingerprint = Fingerprint {
            functions: self
                .functions
                .iter()
                .map(|f| FingerprintFunction {
                    name: &f.name,
                    arity: f.arity,
                })
                .collect(),
            types: &self.types,
        };
        // Serializing plain strings and integers cannot fail.
        let bytes = serde_json::to_vec(&fingerprint).unwrap_or_default();
        to_hex(&hash_bytes(&bytes))
    }
}

pub fn hash_bytes(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
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
