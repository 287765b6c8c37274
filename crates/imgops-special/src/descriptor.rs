//! Operation descriptors and arguments
//!
//! An [`OpDescriptor`] names what is being asked for: a kind, a calling
//! style, and the concrete types involved. [`OpArgs`] carries the secondary
//! argument values (constants, iteration counts, inner operations).

use crate::error::ResolutionError;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// Inline capacity for argument lists; built-in ops take at most two.
const INLINE_ARGS: usize = 4;

/// Argument type list stored inline for short signatures
pub type ArgTypes = SmallVec<[OpType; INLINE_ARGS]>;

/// Named category of computation
///
/// Serialized as its dotted name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum OpKind {
    /// Add a constant to every sample
    MathAdd,

    /// Arithmetic mean of all samples
    StatsMean,

    /// Largest sample
    StatsMax,

    /// Smallest sample
    StatsMin,

    /// Sum of all samples
    StatsSum,

    /// Apply an inner op to every element of a container
    Map,

    /// Apply an inner op repeatedly, feeding each output into the next call
    Loop,
}

impl OpKind {
    /// Every kind, in declaration order
    pub const ALL: [OpKind; 7] = [
        OpKind::MathAdd,
        OpKind::StatsMean,
        OpKind::StatsMax,
        OpKind::StatsMin,
        OpKind::StatsSum,
        OpKind::Map,
        OpKind::Loop,
    ];

    /// Dotted name, e.g. `math.add`
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            OpKind::MathAdd => "math.add",
            OpKind::StatsMean => "stats.mean",
            OpKind::StatsMax => "stats.max",
            OpKind::StatsMin => "stats.min",
            OpKind::StatsSum => "stats.sum",
            OpKind::Map => "map",
            OpKind::Loop => "loop",
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OpKind {
    type Err = ResolutionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OpKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ResolutionError::UnknownName(s.to_string()))
    }
}

impl From<OpKind> for &'static str {
    fn from(kind: OpKind) -> Self {
        kind.name()
    }
}

impl TryFrom<String> for OpKind {
    type Error = ResolutionError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// Calling convention of a resolved operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpStyle {
    /// Writes into caller-supplied output
    Computer,

    /// Allocates and returns a new output
    Function,

    /// Overwrites its argument
    Inplace,

    /// Computer and function at once
    Hybrid,
}

impl OpStyle {
    /// Check whether a candidate of this style can serve a `requested` style
    ///
    /// A hybrid serves computer, function and hybrid requests. Every other
    /// style only serves itself.
    #[inline]
    #[must_use]
    pub fn satisfies(self, requested: OpStyle) -> bool {
        self == requested
            || matches!(
                (self, requested),
                (OpStyle::Hybrid, OpStyle::Computer | OpStyle::Function)
            )
    }

    /// Lowercase name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            OpStyle::Computer => "computer",
            OpStyle::Function => "function",
            OpStyle::Inplace => "inplace",
            OpStyle::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for OpStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runtime identity of a Rust type taking part in an operation signature
///
/// Equality and hashing use only the [`TypeId`]; the name is for messages.
#[derive(Clone, Copy)]
pub struct OpType {
    id: TypeId,
    name: &'static str,
}

impl OpType {
    /// Describe type `T`
    #[inline]
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The [`TypeId`]
    #[inline]
    #[must_use]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name
    #[inline]
    #[must_use]
    pub fn full_name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths stripped, e.g. `Img<DoubleType>`
    #[must_use]
    pub fn short_name(&self) -> String {
        shorten_type_name(self.name)
    }
}

impl PartialEq for OpType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for OpType {}

impl Hash for OpType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpType({})", self.short_name())
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

fn shorten_type_name(full: &str) -> String {
    fn push_last_segment(out: &mut String, token: &str) {
        out.push_str(token.rsplit("::").next().unwrap_or(token));
    }

    let mut out = String::with_capacity(full.len());
    let mut token = String::new();
    for ch in full.chars() {
        if ch.is_alphanumeric() || ch == '_' || ch == ':' {
            token.push(ch);
        } else {
            push_last_segment(&mut out, &token);
            token.clear();
            out.push(ch);
        }
    }
    push_last_segment(&mut out, &token);
    out
}

/// Complete signature of an operation request or candidate
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OpDescriptor {
    kind: OpKind,
    style: OpStyle,
    input: OpType,
    output: OpType,
    args: ArgTypes,
}

impl OpDescriptor {
    /// Create new descriptor
    #[must_use]
    pub fn new(
        kind: OpKind,
        style: OpStyle,
        input: OpType,
        output: OpType,
        args: impl IntoIterator<Item = OpType>,
    ) -> Self {
        Self {
            kind,
            style,
            input,
            output,
            args: args.into_iter().collect(),
        }
    }

    /// Operation kind
    #[inline]
    #[must_use]
    pub fn kind(&self) -> OpKind {
        self.kind
    }

    /// Calling style
    #[inline]
    #[must_use]
    pub fn style(&self) -> OpStyle {
        self.style
    }

    /// Input type
    #[inline]
    #[must_use]
    pub fn input(&self) -> OpType {
        self.input
    }

    /// Output type
    #[inline]
    #[must_use]
    pub fn output(&self) -> OpType {
        self.output
    }

    /// Secondary argument types, in order
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[OpType] {
        &self.args
    }

    /// Check whether a candidate described by `self` can serve `request`
    ///
    /// Kinds, input, output and argument types must be identical; the style
    /// must satisfy the requested style.
    #[must_use]
    pub fn serves(&self, request: &OpDescriptor) -> bool {
        self.kind == request.kind
            && self.style.satisfies(request.style)
            && self.input == request.input
            && self.output == request.output
            && self.args == request.args
    }
}

impl fmt::Display for OpDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]({}", self.kind, self.style, self.input)?;
        for arg in &self.args {
            write!(f, ", {arg}")?;
        }
        write!(f, ") -> {}", self.output)
    }
}

#[derive(Clone)]
struct OpArg {
    ty: OpType,
    value: Arc<dyn Any + Send + Sync>,
}

/// Ordered, type-erased secondary arguments
///
/// Values are reference counted so a resolved handle can be passed as an
/// argument while the caller keeps using it.
#[derive(Clone, Default)]
pub struct OpArgs {
    values: SmallVec<[OpArg; INLINE_ARGS]>,
}

impl OpArgs {
    /// Create empty argument list
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument
    #[must_use]
    pub fn with<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.push(value);
        self
    }

    /// Append an argument
    pub fn push<T: Any + Send + Sync>(&mut self, value: T) {
        self.values.push(OpArg {
            ty: OpType::of::<T>(),
            value: Arc::new(value),
        });
    }

    /// Number of arguments
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if there are no arguments
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument types, in order
    #[must_use]
    pub fn types(&self) -> ArgTypes {
        self.values.iter().map(|arg| arg.ty).collect()
    }

    /// Borrow argument `index` as `T`
    ///
    /// Returns `None` if the index is out of range or the type differs.
    #[must_use]
    pub fn get<T: Any>(&self, index: usize) -> Option<&T> {
        self.values.get(index)?.value.downcast_ref::<T>()
    }

    /// Borrow argument `index` as `T`, reporting failure against `kind`
    ///
    /// # Errors
    /// Returns [`ResolutionError::InvalidArgument`] if the argument is
    /// missing or of another type
    pub fn require<T: Any>(&self, kind: OpKind, index: usize) -> Result<&T, ResolutionError> {
        self.get::<T>(index).ok_or_else(|| {
            ResolutionError::invalid_argument(
                kind,
                index,
                format!("expected {}", OpType::of::<T>()),
            )
        })
    }
}

impl fmt::Debug for OpArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.values.iter().map(|arg| arg.ty))
            .finish()
    }
}
