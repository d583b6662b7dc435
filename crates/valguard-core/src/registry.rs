//! Name-unique catalog of validation functions.
//!
//! A [`RegistryBuilder`] collects constructors during startup; [`RegistryBuilder::build`]
//! runs each one exactly once and freezes the result into a [`FunctionRegistry`].
//! The registry has no mutating methods, so once built it can be shared
//! between threads without locking.

use std::{collections::HashMap, fmt, sync::Arc};

use tracing::{error, info};

use crate::{
    errors::RuleError,
    function::{CallResponse, Function},
    value::Value,
};

/// Produces one function. Fails if the function's configuration is invalid.
pub type FunctionConstructor = Box<dyn Fn() -> Result<Box<dyn Function>, RuleError> + Send + Sync>;

#[derive(Default)]
pub struct RegistryBuilder {
    constructors: Vec<FunctionConstructor>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            constructors: Vec::new(),
        }
    }

    /// Queues a constructor. Nothing runs until [`build`](Self::build).
    pub fn register<F>(&mut self, constructor: F) -> &mut Self
    where
        F: Fn() -> Result<Box<dyn Function>, RuleError> + Send + Sync + 'static,
    {
        self.constructors.push(Box::new(constructor));
        self
    }

    /// Queues an already-built function.
    pub fn register_function(&mut self, function: Arc<dyn Function>) -> &mut Self {
        self.constructors.push(Box::new(move || {
            Ok(Box::new(Shared(Arc::clone(&function))) as Box<dyn Function>)
        }));
        self
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Runs every constructor once and freezes the catalog.
    ///
    /// # Errors
    ///
    /// - Any error returned by a constructor
    /// - `RuleError::DuplicateFunction` if two functions share a name
    pub fn build(self) -> Result<FunctionRegistry, RuleError> {
        let mut functions: Vec<Arc<dyn Function>> = Vec::with_capacity(self.constructors.len());
        let mut index = HashMap::with_capacity(self.constructors.len());

        for constructor in &self.constructors {
            let function: Arc<dyn Function> = Arc::from(constructor()?);
            let name = function.name().to_string();
            if index.contains_key(&name) {
                error!(function = %name, "duplicate function registration");
                return Err(RuleError::DuplicateFunction(name));
            }
            index.insert(name, functions.len());
            functions.push(function);
        }

        info!(functions = functions.len(), "function registry built");
        Ok(FunctionRegistry { functions, index })
    }
}

/// Frozen catalog mapping unique names to functions.
///
/// Iteration follows registration order, which is stable for the life of
/// the process.
pub struct FunctionRegistry {
    functions: Vec<Arc<dyn Function>>,
    index: HashMap<String, usize>,
}

impl FunctionRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Every function, in registration order.
    pub fn functions(&self) -> &[Arc<dyn Function>] {
        self.functions.as_slice()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.iter().map(|f| f.name())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Function>> {
        self.index.get(name).map(|&i| &self.functions[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Invokes the function registered under `name`.
    pub fn call(&self, name: &str, value: &Value) -> Result<CallResponse, RuleError> {
        self.get(name)
            .map(|function| function.call(value))
            .ok_or_else(|| RuleError::UnknownFunction(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

struct Shared(Arc<dyn Function>);

impl Function for Shared {
    fn definition(&self) -> &crate::function::FunctionDefinition {
        self.0.definition()
    }

    fn call(&self, value: &Value) -> CallResponse {
        self.0.call(value)
    }
}
