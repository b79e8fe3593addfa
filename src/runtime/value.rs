use std::{any::Any, cell::RefCell, fmt, rc::Rc};

use crate::runtime::{alloc_stats, closure::Closure, type_id::TypeId};

/// Handle to a boxed runtime value.
///
/// Cloning a `Value` shares the underlying box. Generated code only ever
/// holds these handles, never raw payloads.
///
/// ## Identity
///
/// Interned values (Int `0..100`, both Bools, Unit, `0.0`, the empty String)
/// are shared singletons, so [`Value::ptr_eq`] is a valid equality fast path
/// for them. For every other value identity says nothing about equality.
#[derive(Clone)]
pub struct Value(Rc<Boxed>);

/// Payload of a boxed value. The variant is the sole type discriminant.
#[derive(Debug)]
pub enum Boxed {
    /// Undefined identifier or diagnostic sentinel carrying a name.
    Unknown(Box<str>),
    Unit,
    Bool(bool),
    Byte(i8),
    Int(i64),
    Double(f64),
    String(Box<str>),
    Closure(Closure),
    Array(Box<[Value]>),
    ByteArray(Box<[u8]>),
    /// The only mutable slot in the value model.
    Ref(RefCell<Value>),
    Resource(Resource),
    Data(DataValue),
}

/// Instance of a user algebraic type.
#[derive(Debug)]
pub struct DataValue {
    pub type_index: usize,
    /// Index into the owning type's constructor list.
    pub tag: usize,
    /// Field values, positionally matching the constructor's field names.
    pub values: Box<[Value]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    FileHandle,
    Pattern,
}

/// Opaque host resource (open file, compiled pattern) owned by a box.
#[derive(Clone)]
pub struct Resource {
    pub kind: ResourceKind,
    pub payload: Rc<dyn Any>,
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Resource({:?})", self.kind)
    }
}

impl Boxed {
    pub fn type_tag(&self) -> TypeId {
        match self {
            Boxed::Unknown(_) => TypeId::Unknown,
            Boxed::Unit => TypeId::Unit,
            Boxed::Bool(_) => TypeId::Bool,
            Boxed::Byte(_) => TypeId::Byte,
            Boxed::Int(_) => TypeId::Int,
            Boxed::Double(_) => TypeId::Double,
            Boxed::String(_) => TypeId::String,
            Boxed::Closure(_) => TypeId::Closure,
            Boxed::Array(_) => TypeId::Array,
            Boxed::ByteArray(_) => TypeId::ByteArray,
            Boxed::Ref(_) => TypeId::Ref,
            Boxed::Resource(resource) => match resource.kind {
                ResourceKind::FileHandle => TypeId::FileHandle,
                ResourceKind::Pattern => TypeId::Pattern,
            },
            Boxed::Data(data) => TypeId::User(data.type_index),
        }
    }

    /// Returns `true` when the payload holds no references to other boxes.
    pub fn is_untraced(&self) -> bool {
        matches!(
            self,
            Boxed::Unknown(_)
                | Boxed::Unit
                | Boxed::Bool(_)
                | Boxed::Byte(_)
                | Boxed::Int(_)
                | Boxed::Double(_)
                | Boxed::String(_)
                | Boxed::ByteArray(_)
        )
    }
}

impl Value {
    /// Allocates a fresh box. Interning is the caller's job; see
    /// [`Runtime::box_value`](crate::runtime::Runtime::box_value).
    pub(crate) fn alloc(boxed: Boxed) -> Self {
        alloc_stats::record(&boxed);
        Value(Rc::new(boxed))
    }

    /// Allocates a box that lives in the interned table and is not counted
    /// as a heap allocation.
    pub(crate) fn interned(boxed: Boxed) -> Self {
        Value(Rc::new(boxed))
    }

    pub fn boxed(&self) -> &Boxed {
        &self.0
    }

    pub fn type_tag(&self) -> TypeId {
        self.boxed().type_tag()
    }

    pub fn ptr_eq(a: &Value, b: &Value) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(*self.0, Boxed::Unknown(_))
    }

    /// Borrowed pointer to the box, valid while `self` is alive.
    pub fn as_ptr(&self) -> *const Boxed {
        Rc::as_ptr(&self.0)
    }

    /// Transfers this handle's reference to a raw pointer.
    pub fn into_raw(self) -> *const Boxed {
        Rc::into_raw(self.0)
    }

    /// Takes back a reference previously released with [`Value::into_raw`].
    ///
    /// # Safety
    /// `ptr` must come from [`Value::into_raw`] and its reference must not
    /// have been reclaimed already.
    pub unsafe fn from_raw(ptr: *const Boxed) -> Self {
        Value(unsafe { Rc::from_raw(ptr) })
    }

    /// Creates a new handle to a box the caller only borrows.
    ///
    /// # Safety
    /// `ptr` must point to a live box obtained from [`Value::into_raw`] or
    /// [`Value::as_ptr`].
    pub unsafe fn clone_from_raw(ptr: *const Boxed) -> Self {
        unsafe {
            Rc::increment_strong_count(ptr);
            Rc::from_raw(ptr).into()
        }
    }
}

impl From<Rc<Boxed>> for Value {
    fn from(rc: Rc<Boxed>) -> Self {
        Value(rc)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
