//! Operation service
//!
//! Holds the registered candidates and resolves requests against them.
//! Resolution is a linear scan over the candidates of one kind, so callers
//! that invoke an op repeatedly should resolve once and keep the handle.

use crate::builtin;
use crate::descriptor::{OpArgs, OpDescriptor, OpKind, OpStyle, OpType};
use crate::error::ResolutionError;
use crate::namespace::{MathNamespace, StatsNamespace};
use crate::op::{
    ComputerHandle, ErasedComputerHandle, ErasedView, FunctionHandle, FunctionView, HybridHandle,
    InplaceHandle, UnaryComputerOp, UnaryFunctionOp, UnaryHybridCF, UnaryInplaceOp,
};
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Candidate priority; higher wins, ties go to the earliest registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Priority(pub i32);

impl Priority {
    /// Fallback implementations
    pub const LOW: Priority = Priority(-100);

    /// Built-in implementations
    pub const NORMAL: Priority = Priority(0);

    /// Specialized implementations that should shadow the built-ins
    pub const HIGH: Priority = Priority(100);
}

/// What a builder is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Style(OpStyle),
    Erased,
}

type Builder =
    Box<dyn Fn(Target, &OpArgs) -> Result<Option<Box<dyn Any>>, ResolutionError> + Send + Sync>;

struct Candidate {
    descriptor: OpDescriptor,
    priority: Priority,
    build: Builder,
}

/// Registry and resolver for special operations
#[derive(Default)]
pub struct OpService {
    candidates: IndexMap<OpKind, Vec<Candidate>>,
}

impl fmt::Debug for OpService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.candidates.iter().map(|(kind, list)| (kind, list.len())))
            .finish()
    }
}

impl OpService {
    /// Create new empty service
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create service with the built-in operations registered
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut service = Self::new();
        builtin::register_defaults(&mut service);
        tracing::debug!(candidates = service.len(), "registered built-in operations");
        service
    }

    /// Total number of registered candidates
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.values().map(Vec::len).sum()
    }

    /// Check if nothing is registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Check if any candidate exists for `kind`
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: OpKind) -> bool {
        self.candidates.contains_key(&kind)
    }

    /// Kinds with at least one candidate, in registration order
    pub fn kinds(&self) -> impl Iterator<Item = OpKind> + '_ {
        self.candidates.keys().copied()
    }

    /// Descriptors of the candidates registered for `kind`
    pub fn candidates(&self, kind: OpKind) -> impl Iterator<Item = &OpDescriptor> + '_ {
        self.candidates
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|candidate| &candidate.descriptor)
    }

    /// Math operations resolved on every call
    #[inline]
    #[must_use]
    pub fn math(&self) -> MathNamespace<'_> {
        MathNamespace::new(self)
    }

    /// Statistics resolved on every call
    #[inline]
    #[must_use]
    pub fn stats(&self) -> StatsNamespace<'_> {
        StatsNamespace::new(self)
    }

    /// Register a computer `I -> O`
    ///
    /// `factory` receives the request's arguments, already type-checked
    /// against `args`, and may still reject their values.
    pub fn register_computer<I, O, C, F>(
        &mut self,
        kind: OpKind,
        args: impl IntoIterator<Item = OpType>,
        priority: Priority,
        factory: F,
    ) where
        I: 'static,
        O: 'static,
        C: UnaryComputerOp<I, O> + 'static,
        F: Fn(&OpArgs) -> Result<C, ResolutionError> + Send + Sync + 'static,
    {
        let descriptor = descriptor_for::<I, O>(kind, OpStyle::Computer, args);
        let build: Builder = Box::new(move |target, args| {
            let op = factory(args)?;
            Ok(match target {
                Target::Style(OpStyle::Computer) => {
                    Some(Box::new(Arc::new(op) as ComputerHandle<I, O>) as Box<dyn Any>)
                }
                Target::Erased => Some(Box::new(
                    Arc::new(ErasedView::<I, O, C>::new(op)) as ErasedComputerHandle
                ) as Box<dyn Any>),
                Target::Style(_) => None,
            })
        });
        self.insert(descriptor, priority, build);
    }

    /// Register a function `I -> O`
    pub fn register_function<I, O, C, F>(
        &mut self,
        kind: OpKind,
        args: impl IntoIterator<Item = OpType>,
        priority: Priority,
        factory: F,
    ) where
        I: 'static,
        O: 'static,
        C: UnaryFunctionOp<I, O> + 'static,
        F: Fn(&OpArgs) -> Result<C, ResolutionError> + Send + Sync + 'static,
    {
        let descriptor = descriptor_for::<I, O>(kind, OpStyle::Function, args);
        let build: Builder = Box::new(move |target, args| {
            let op = factory(args)?;
            Ok(match target {
                Target::Style(OpStyle::Function) => {
                    Some(Box::new(Arc::new(op) as FunctionHandle<I, O>) as Box<dyn Any>)
                }
                _ => None,
            })
        });
        self.insert(descriptor, priority, build);
    }

    /// Register an inplace op on `A`
    pub fn register_inplace<A, C, F>(
        &mut self,
        kind: OpKind,
        args: impl IntoIterator<Item = OpType>,
        priority: Priority,
        factory: F,
    ) where
        A: 'static,
        C: UnaryInplaceOp<A> + 'static,
        F: Fn(&OpArgs) -> Result<C, ResolutionError> + Send + Sync + 'static,
    {
        let descriptor = descriptor_for::<A, A>(kind, OpStyle::Inplace, args);
        let build: Builder = Box::new(move |target, args| {
            let op = factory(args)?;
            Ok(match target {
                Target::Style(OpStyle::Inplace) => {
                    Some(Box::new(Arc::new(op) as InplaceHandle<A>) as Box<dyn Any>)
                }
                _ => None,
            })
        });
        self.insert(descriptor, priority, build);
    }

    /// Register a hybrid `I -> O`
    ///
    /// The candidate also serves computer, function and erased requests.
    pub fn register_hybrid<I, O, C, F>(
        &mut self,
        kind: OpKind,
        args: impl IntoIterator<Item = OpType>,
        priority: Priority,
        factory: F,
    ) where
        I: 'static,
        O: 'static,
        C: UnaryHybridCF<I, O> + 'static,
        F: Fn(&OpArgs) -> Result<C, ResolutionError> + Send + Sync + 'static,
    {
        let descriptor = descriptor_for::<I, O>(kind, OpStyle::Hybrid, args);
        let build: Builder = Box::new(move |target, args| {
            let op = factory(args)?;
            Ok(match target {
                Target::Style(OpStyle::Hybrid) => {
                    Some(Box::new(Arc::new(op) as HybridHandle<I, O>) as Box<dyn Any>)
                }
                Target::Style(OpStyle::Computer) => {
                    Some(Box::new(Arc::new(op) as ComputerHandle<I, O>) as Box<dyn Any>)
                }
                Target::Style(OpStyle::Function) => Some(Box::new(
                    Arc::new(FunctionView(op)) as FunctionHandle<I, O>
                ) as Box<dyn Any>),
                Target::Erased => Some(Box::new(
                    Arc::new(ErasedView::<I, O, C>::new(op)) as ErasedComputerHandle
                ) as Box<dyn Any>),
                Target::Style(OpStyle::Inplace) => None,
            })
        });
        self.insert(descriptor, priority, build);
    }

    fn insert(&mut self, descriptor: OpDescriptor, priority: Priority, build: Builder) {
        tracing::trace!(%descriptor, ?priority, "registering candidate");
        self.candidates
            .entry(descriptor.kind())
            .or_default()
            .push(Candidate {
                descriptor,
                priority,
                build,
            });
    }

    /// Resolve a computer `I -> O`
    ///
    /// # Errors
    /// See [`ResolutionError`]
    pub fn resolve_computer<I: 'static, O: 'static>(
        &self,
        kind: OpKind,
        args: &OpArgs,
    ) -> Result<ComputerHandle<I, O>, ResolutionError> {
        self.resolve_typed::<I, O, ComputerHandle<I, O>>(kind, OpStyle::Computer, args)
    }

    /// Resolve a function `I -> O`
    ///
    /// # Errors
    /// See [`ResolutionError`]
    pub fn resolve_function<I: 'static, O: 'static>(
        &self,
        kind: OpKind,
        args: &OpArgs,
    ) -> Result<FunctionHandle<I, O>, ResolutionError> {
        self.resolve_typed::<I, O, FunctionHandle<I, O>>(kind, OpStyle::Function, args)
    }

    /// Resolve an inplace op on `A`
    ///
    /// # Errors
    /// See [`ResolutionError`]
    pub fn resolve_inplace<A: 'static>(
        &self,
        kind: OpKind,
        args: &OpArgs,
    ) -> Result<InplaceHandle<A>, ResolutionError> {
        self.resolve_typed::<A, A, InplaceHandle<A>>(kind, OpStyle::Inplace, args)
    }

    /// Resolve a hybrid `I -> O`
    ///
    /// # Errors
    /// See [`ResolutionError`]
    pub fn resolve_hybrid<I: 'static, O: 'static>(
        &self,
        kind: OpKind,
        args: &OpArgs,
    ) -> Result<HybridHandle<I, O>, ResolutionError> {
        self.resolve_typed::<I, O, HybridHandle<I, O>>(kind, OpStyle::Hybrid, args)
    }

    /// Resolve a computer from runtime type descriptions
    ///
    /// The returned handle checks its arguments on every call. Prefer the
    /// typed `resolve_*` methods, which reject mismatches at compile time.
    ///
    /// # Errors
    /// See [`ResolutionError`]
    pub fn resolve_erased(
        &self,
        kind: OpKind,
        input: OpType,
        output: OpType,
        args: &OpArgs,
    ) -> Result<ErasedComputerHandle, ResolutionError> {
        let request = OpDescriptor::new(kind, OpStyle::Computer, input, output, args.types());
        let built = self.resolve_any(&request, Target::Erased, args)?;
        downcast(built, request, self.considered(kind))
    }

    fn resolve_typed<I: 'static, O: 'static, H: 'static>(
        &self,
        kind: OpKind,
        style: OpStyle,
        args: &OpArgs,
    ) -> Result<H, ResolutionError> {
        let request = OpDescriptor::new(kind, style, OpType::of::<I>(), OpType::of::<O>(), args.types());
        let built = self.resolve_any(&request, Target::Style(style), args)?;
        downcast(built, request, self.considered(kind))
    }

    fn resolve_any(
        &self,
        request: &OpDescriptor,
        target: Target,
        args: &OpArgs,
    ) -> Result<Box<dyn Any>, ResolutionError> {
        let kind = request.kind();
        let candidates = self
            .candidates
            .get(&kind)
            .ok_or(ResolutionError::UnknownKind(kind))?;

        let mut best: Option<&Candidate> = None;
        for candidate in candidates {
            if !candidate.descriptor.serves(request) {
                continue;
            }
            if best.map_or(true, |b| candidate.priority > b.priority) {
                best = Some(candidate);
            }
        }

        let Some(candidate) = best else {
            tracing::debug!(%request, considered = candidates.len(), "no matching candidate");
            return Err(ResolutionError::no_match(request.clone(), candidates.len()));
        };

        match (candidate.build)(target, args)? {
            Some(built) => {
                tracing::debug!(
                    %request,
                    matched = %candidate.descriptor,
                    considered = candidates.len(),
                    "resolved operation"
                );
                Ok(built)
            }
            None => Err(ResolutionError::no_match(request.clone(), candidates.len())),
        }
    }

    fn considered(&self, kind: OpKind) -> usize {
        self.candidates.get(&kind).map_or(0, Vec::len)
    }
}

fn descriptor_for<I: 'static, O: 'static>(
    kind: OpKind,
    style: OpStyle,
    args: impl IntoIterator<Item = OpType>,
) -> OpDescriptor {
    OpDescriptor::new(kind, style, OpType::of::<I>(), OpType::of::<O>(), args)
}

fn downcast<H: 'static>(
    built: Box<dyn Any>,
    request: OpDescriptor,
    considered: usize,
) -> Result<H, ResolutionError> {
    built
        .downcast::<H>()
        .map(|handle| *handle)
        .map_err(|_| ResolutionError::no_match(request, considered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgops_image::{ByteType, DoubleType, Img};

    struct Negate;

    impl UnaryComputerOp<DoubleType, DoubleType> for Negate {
        fn compute(&self, input: &DoubleType, output: &mut DoubleType) {
            output.0 = -input.0;
        }
    }

    #[test]
    fn new_service_is_empty() {
        let service = OpService::new();
        assert!(service.is_empty());
        assert_eq!(service.len(), 0);
        assert!(!service.contains(OpKind::MathAdd));
    }

    #[test]
    fn defaults_cover_every_kind() {
        let service = OpService::with_defaults();
        for kind in OpKind::ALL {
            assert!(service.contains(kind), "missing {kind}");
        }
    }

    #[test]
    fn unknown_kind() {
        let service = OpService::new();
        let err = service
            .resolve_computer::<DoubleType, DoubleType>(OpKind::MathAdd, &OpArgs::new())
            .err()
            .unwrap();
        assert!(matches!(err, ResolutionError::UnknownKind(OpKind::MathAdd)));
    }

    #[test]
    fn register_and_resolve_computer() {
        let mut service = OpService::new();
        service.register_computer::<DoubleType, DoubleType, _, _>(
            OpKind::MathAdd,
            [],
            Priority::NORMAL,
            |_| Ok(Negate),
        );

        let op = service
            .resolve_computer::<DoubleType, DoubleType>(OpKind::MathAdd, &OpArgs::new())
            .unwrap();
        let mut out = DoubleType::default();
        op.compute(&DoubleType(3.0), &mut out);
        assert_eq!(out, DoubleType(-3.0));
    }

    #[test]
    fn computer_does_not_serve_other_styles() {
        let mut service = OpService::new();
        service.register_computer::<DoubleType, DoubleType, _, _>(
            OpKind::MathAdd,
            [],
            Priority::NORMAL,
            |_| Ok(Negate),
        );

        let err = service
            .resolve_hybrid::<DoubleType, DoubleType>(OpKind::MathAdd, &OpArgs::new())
            .err()
            .unwrap();
        assert!(matches!(err, ResolutionError::NoMatch { considered: 1, .. }));
    }

    #[test]
    fn type_mismatch_fails_at_resolution() {
        let service = OpService::with_defaults();
        let err = service
            .resolve_computer::<Img<DoubleType>, Img<ByteType>>(
                OpKind::MathAdd,
                &OpArgs::new().with(5.0_f64),
            )
            .err()
            .unwrap();
        assert!(matches!(err, ResolutionError::NoMatch { .. }));
    }

    #[test]
    fn argument_types_take_part_in_matching() {
        let service = OpService::with_defaults();
        let err = service
            .resolve_computer::<DoubleType, DoubleType>(OpKind::MathAdd, &OpArgs::new().with(5_i32))
            .err()
            .unwrap();
        assert!(matches!(err, ResolutionError::NoMatch { .. }));
    }

    #[test]
    fn candidates_lists_descriptors() {
        let service = OpService::with_defaults();
        assert!(service
            .candidates(OpKind::StatsMean)
            .all(|d| d.kind() == OpKind::StatsMean && d.style() == OpStyle::Hybrid));
        assert_eq!(service.candidates(OpKind::StatsMean).count(), 2);
    }

    #[test]
    fn debug_shows_counts() {
        let service = OpService::with_defaults();
        let debug = format!("{service:?}");
        assert!(debug.contains("MathAdd"));
    }
}
