use std::collections::HashMap;

use crate::{
    errors::errors::ErrorImpl,
    types::types::{Mutability, Type},
    Span,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub ty: Type,
    pub mutability: Mutability,
    /// False while a `undef` declaration has not been assigned.
    pub initialized: bool,
    pub used: bool,
    /// Parameters are never reported as unused.
    pub is_parameter: bool,
    pub span: Span,
}

impl Symbol {
    pub fn variable(name: &str, ty: Type, mutability: Mutability, span: Span) -> Self {
        Symbol {
            name: name.to_string(),
            ty,
            mutability,
            initialized: true,
            used: false,
            is_parameter: false,
            span,
        }
    }

    pub fn parameter(parameter: &Parameter, span: Span) -> Self {
        Symbol {
            is_parameter: true,
            ..Symbol::variable(&parameter.name, parameter.ty.clone(), parameter.mutability, span)
        }
    }

    pub fn uninitialized(mut self) -> Self {
        self.initialized = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub ty: Type,
    pub mutability: Mutability,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub return_type: Type,
    pub span: Span,
}

/// One lexical scope.
#[derive(Debug)]
pub struct Environment {
    variable_lookup: HashMap<String, Symbol>,
    declaration_order: Vec<String>,
    /// Set on the outermost scope of a function body.
    pub function: Option<String>,
}

impl Environment {
    pub fn new(function: Option<String>) -> Self {
        Environment {
            variable_lookup: HashMap::new(),
            declaration_order: vec![],
            function,
        }
    }

    pub fn declare_variable(&mut self, symbol: Symbol) -> Result<(), ErrorImpl> {
        if self.variable_lookup.contains_key(&symbol.name) {
            Err(ErrorImpl::VariableAlreadyDeclared {
                variable: symbol.name,
            })
        } else {
            self.declaration_order.push(symbol.name.clone());
            self.variable_lookup.insert(symbol.name.clone(), symbol);
            Ok(())
        }
    }

    pub fn get_variable(&self, variable_name: &str) -> Option<&Symbol> {
        self.variable_lookup.get(variable_name)
    }

    pub fn get_variable_mut(&mut self, variable_name: &str) -> Option<&mut Symbol> {
        self.variable_lookup.get_mut(variable_name)
    }

    /// Symbols in the order they were declared.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.declaration_order
            .iter()
            .filter_map(|name| self.variable_lookup.get(name))
    }
}

/// Stack of scopes, innermost last.
#[derive(Debug, Default)]
pub struct SymbolTable {
    environments: Vec<Environment>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    pub fn push_scope(&mut self, function: Option<String>) {
        self.environments.push(Environment::new(function));
    }

    pub fn pop_scope(&mut self) -> Option<Environment> {
        self.environments.pop()
    }

    /// Declares `symbol` in the innermost scope. Shadowing an outer scope is allowed.
    pub fn declare(&mut self, symbol: Symbol) -> Result<(), ErrorImpl> {
        match self.environments.last_mut() {
            Some(environment) => environment.declare_variable(symbol),
            None => {
                let mut environment = Environment::new(None);
                let declared = environment.declare_variable(symbol);
                self.environments.push(environment);
                declared
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.get_variable(name))
    }

    pub fn lookup_mut(&mut self, name: &str) -> Option<&mut Symbol> {
        self.environments
            .iter_mut()
            .rev()
            .find_map(|environment| environment.get_variable_mut(name))
    }

    /// Name of the function whose body is being analysed, if any.
    pub fn current_function(&self) -> Option<&str> {
        self.environments
            .iter()
            .rev()
            .find_map(|environment| environment.function.as_deref())
    }
}
