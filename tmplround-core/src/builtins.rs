// Function registry: the dispatch layer the host compiler routes calls through

use crate::config::EmitConfig;
use crate::expr::SrcExpr;
use crate::function::{BuiltinFunction, TargetArg, check_arity};
use crate::source::SourcePos;
use crate::value::{CompileError, NumericValue};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<&'static str, Arc<dyn BuiltinFunction>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    pub fn register(&mut self, function: Arc<dyn BuiltinFunction>) {
        let name = function.name();
        if self.functions.insert(name, function).is_some() {
            tracing::debug!(function = name, "replaced existing builtin");
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Arc<dyn BuiltinFunction>> {
        self.functions.get(name)
    }

    pub fn doc(&self, name: &str) -> Option<&'static str> {
        self.lookup(name).map(|function| function.doc())
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.functions.keys().copied().collect();
        names.sort_unstable();
        names
    }

    // RUST CONCEPT: Eager validation at the call site
    // Resolves the name and checks the registered arity before the function runs;
    // every failure comes back tagged with the call's position.
    fn resolve(
        &self,
        name: &str,
        arg_count: usize,
        pos: Option<SourcePos>,
    ) -> Result<&Arc<dyn BuiltinFunction>, CompileError> {
        let function = self.lookup(name).ok_or_else(|| CompileError::UnknownFunction {
            name: name.to_string(),
            pos,
        })?;
        check_arity(function.name(), function.valid_arg_counts(), arg_count)
            .map_err(|err| attach(err, pos))?;
        Ok(function)
    }

    pub fn compute_direct(
        &self,
        name: &str,
        args: &[NumericValue],
        pos: Option<SourcePos>,
    ) -> Result<NumericValue, CompileError> {
        self.resolve(name, args.len(), pos)
            .and_then(|function| {
                function
                    .compute_direct(args)
                    .map_err(|err| attach(err, pos))
            })
            .inspect_err(|err| {
                tracing::debug!(function = name, error = %err, "direct evaluation failed");
            })
    }

    pub fn compute_for_js_src(
        &self,
        name: &str,
        args: &[TargetArg<'_>],
        pos: Option<SourcePos>,
    ) -> Result<SrcExpr, CompileError> {
        self.resolve(name, args.len(), pos)
            .and_then(|function| {
                function
                    .compute_for_js_src(args)
                    .map_err(|err| attach(err, pos))
            })
            .inspect_err(|err| {
                tracing::debug!(function = name, error = %err, "js lowering failed");
            })
    }

    pub fn compute_for_py_src(
        &self,
        name: &str,
        args: &[TargetArg<'_>],
        pos: Option<SourcePos>,
    ) -> Result<SrcExpr, CompileError> {
        self.resolve(name, args.len(), pos)
            .and_then(|function| {
                function
                    .compute_for_py_src(args)
                    .map_err(|err| attach(err, pos))
            })
            .inspect_err(|err| {
                tracing::debug!(function = name, error = %err, "python lowering failed");
            })
    }
}

fn attach(err: CompileError, pos: Option<SourcePos>) -> CompileError {
    match pos {
        Some(pos) => err.at(pos),
        None => err,
    }
}

pub fn register_builtins(registry: &mut FunctionRegistry) {
    register_builtins_with_config(registry, &EmitConfig::default());
}

pub fn register_builtins_with_config(registry: &mut FunctionRegistry, config: &EmitConfig) {
    use crate::functions::round::RoundFunction;

    registry.register(Arc::new(RoundFunction::with_config(config.clone())));
}
