use std::{cell::OnceCell, env, fmt, sync::Arc};

use crate::runtime::{
    alloc_stats,
    bridge::{CallBridge, NativeBridge},
    interned::Interned,
    tables::ProgramTables,
    type_id::TypeId,
    value::{Boxed, Value},
};

const VERBOSE_ENV: &str = "KILN_VERBOSE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Print a start-up summary and allocation report to stderr.
    pub verbose: bool,
}

impl RuntimeConfig {
    /// Reads `KILN_VERBOSE`; any value other than empty or `0` enables it.
    pub fn from_env() -> Self {
        let verbose = env::var(VERBOSE_ENV)
            .map(|value| !value.is_empty() && value != "0")
            .unwrap_or(false);
        Self { verbose }
    }
}

/// Process arguments captured at start-up.
#[derive(Debug)]
pub struct Environment {
    pub argc: usize,
    /// Array of String.
    pub argv: Value,
}

/// The single runtime context every primitive operates on.
///
/// Construction is the one-time bootstrap: the interned singletons
/// (small-int cache, Unit, Bools, zero Double, empty String) are built and
/// the externally built program tables are recorded. Nothing in a `Runtime`
/// changes afterwards except the environment, which is captured once.
pub struct Runtime {
    tables: Arc<ProgramTables>,
    pub(crate) interned: Interned,
    environment: OnceCell<Environment>,
    bridge: Box<dyn CallBridge>,
    config: RuntimeConfig,
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("functions", &self.tables.functions().len())
            .field("types", &self.tables.types().len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Runtime {
    pub fn new(tables: Arc<ProgramTables>) -> Self {
        Self::with_config(tables, RuntimeConfig::from_env())
    }

    pub fn with_config(tables: Arc<ProgramTables>, config: RuntimeConfig) -> Self {
        let runtime = Self {
            tables,
            interned: Interned::new(),
            environment: OnceCell::new(),
            bridge: Box::new(NativeBridge),
            config,
        };
        if config.verbose {
            eprintln!(
                "kiln runtime {}: {} functions, {} types, tables {}",
                env!("CARGO_PKG_VERSION"),
                runtime.tables.functions().len(),
                runtime.tables.types().len(),
                &runtime.tables.fingerprint()[..16]
            );
        }
        runtime
    }

    /// Replaces the foreign-call capability used by `apply`.
    pub fn with_bridge(mut self, bridge: impl CallBridge + 'static) -> Self {
        self.bridge = Box::new(bridge);
        self
    }

    pub fn tables(&self) -> &ProgramTables {
        &self.tables
    }

    pub fn config(&self) -> RuntimeConfig {
        self.config
    }

    pub(crate) fn bridge(&self) -> &dyn CallBridge {
        self.bridge.as_ref()
    }

    pub fn type_name(&self, type_id: TypeId) -> &str {
        self.tables.type_name(type_id)
    }

    /// Captures the process arguments as an Array of String.
    ///
    /// Only the first call has an effect.
    pub fn init_environment<I, S>(&self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.environment.get().is_some() {
            return;
        }
        let argv: Vec<Value> = args
            .into_iter()
            .map(|arg| self.make_string(arg.as_ref()))
            .collect();
        let environment = Environment {
            argc: argv.len(),
            argv: self.box_array(argv),
        };
        let _ = self.environment.set(environment);
    }

    pub fn environment(&self) -> Option<&Environment> {
        self.environment.get()
    }

    /// Process arguments as an Array of String; empty before
    /// [`Runtime::init_environment`].
    pub fn get_args(&self) -> Value {
        match self.environment.get() {
            Some(environment) => environment.argv.clone(),
            None => Value::alloc(Boxed::Array(Box::new([]))),
        }
    }

    /// Prints the allocation counters of the current thread when verbose.
    pub fn report_stats(&self) {
        if !self.config.verbose {
            return;
        }
        let stats = alloc_stats::snapshot();
        eprintln!(
            "kiln allocations: {} boxes ({} untraced), {} strings, {} arrays, {} closures, {} records, {} refs",
            stats.boxes,
            stats.untraced,
            stats.strings,
            stats.arrays,
            stats.closures,
            stats.records,
            stats.refs
        );
    }
}
