// Copyright (C) 2021-2025 the DTVM authors. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

//! Method Declarations
//!
//! A [`MethodDeclaration`] is the explicit description of one interface
//! method: its name, an optional annotation, the ordered parameter list and
//! the declared return. It is plain data, hashable, and is the input of
//! [`resolve`](crate::contract::resolve).
//!
//! # Usage
//!
//! ```rust
//! use abicodec_rust::abi::TypeDescriptor;
//! use abicodec_rust::contract::{MethodDeclaration, ReturnType};
//!
//! let declaration = MethodDeclaration::new("ERC20", "transfer")
//!     .transaction()
//!     .argument("to", TypeDescriptor::address())
//!     .argument("amount", TypeDescriptor::uint256())
//!     .returns(ReturnType::Value(TypeDescriptor::bool()));
//! assert_eq!(declaration.parameters().len(), 2);
//! ```

use crate::abi::descriptor::TypeDescriptor;

/// Whether a call only reads state or submits a transaction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CallKind {
    View,
    #[default]
    Transaction,
}

/// Annotation attached to a method declaration
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionAnnotation {
    pub kind: CallKind,
    /// On-chain name overriding the declared one when non-blank
    pub name: Option<String>,
}

/// Role of a declared parameter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterRole {
    /// Encoded into the call payload
    Argument,
    /// Call metadata such as attached native value; never encoded
    Cost,
}

/// One declared parameter: name, ABI type and role
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParameterDeclaration {
    name: String,
    /// `None` when the parameter is not an ABI value
    abi_type: Option<TypeDescriptor>,
    role: ParameterRole,
}

impl ParameterDeclaration {
    pub fn argument(name: &str, abi_type: TypeDescriptor) -> Self {
        Self {
            name: name.to_string(),
            abi_type: Some(abi_type),
            role: ParameterRole::Argument,
        }
    }

    pub fn cost(name: &str) -> Self {
        Self {
            name: name.to_string(),
            abi_type: None,
            role: ParameterRole::Cost,
        }
    }

    /// Parameter with no ABI representation
    pub fn host(name: &str) -> Self {
        Self {
            name: name.to_string(),
            abi_type: None,
            role: ParameterRole::Argument,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn abi_type(&self) -> Option<&TypeDescriptor> {
        self.abi_type.as_ref()
    }

    pub fn role(&self) -> ParameterRole {
        self.role
    }

    /// Whether this parameter is part of the encoded argument list
    pub fn is_encoded(&self) -> bool {
        self.role == ParameterRole::Argument && self.abi_type.is_some()
    }
}

/// Inner type of a single-result return
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReturnType {
    /// One value, decoded as an implicit one-field tuple
    Value(TypeDescriptor),
    /// Positional multi-value return
    Tuple(Vec<TypeDescriptor>),
    /// Named-field aggregate, fields in declared order
    Struct {
        name: String,
        fields: Vec<(String, TypeDescriptor)>,
    },
}

/// Declared return of a method
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReturnDeclaration {
    /// Single-result wrapper; `None` when the inner type is unknown
    Result(Option<ReturnType>),
    /// Anything that is not a single-result wrapper
    Other(String),
}

/// Explicit description of one interface method
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodDeclaration {
    interface: String,
    name: String,
    annotation: Option<FunctionAnnotation>,
    parameters: Vec<ParameterDeclaration>,
    returns: ReturnDeclaration,
}

impl MethodDeclaration {
    /// Declaration with no parameters and an undetermined return
    pub fn new(interface: &str, name: &str) -> Self {
        Self {
            interface: interface.to_string(),
            name: name.to_string(),
            annotation: None,
            parameters: Vec::new(),
            returns: ReturnDeclaration::Result(None),
        }
    }

    /// Set the annotation
    pub fn annotated(mut self, kind: CallKind, name: Option<&str>) -> Self {
        self.annotation = Some(FunctionAnnotation {
            kind,
            name: name.map(str::to_string),
        });
        self
    }

    /// Annotate as a read-only call
    pub fn view(self) -> Self {
        let name = self.annotated_name();
        self.annotated(CallKind::View, name.as_deref())
    }

    /// Annotate as a state-changing transaction
    pub fn transaction(self) -> Self {
        let name = self.annotated_name();
        self.annotated(CallKind::Transaction, name.as_deref())
    }

    /// Override the on-chain name, keeping the call kind
    pub fn renamed(self, name: &str) -> Self {
        let kind = self.kind();
        self.annotated(kind, Some(name))
    }

    pub fn parameter(mut self, parameter: ParameterDeclaration) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Add an encoded argument
    pub fn argument(self, name: &str, abi_type: TypeDescriptor) -> Self {
        self.parameter(ParameterDeclaration::argument(name, abi_type))
    }

    /// Add a native-value parameter that is not encoded
    pub fn cost(self, name: &str) -> Self {
        self.parameter(ParameterDeclaration::cost(name))
    }

    /// Declare a single-result return of `return_type`
    pub fn returns(mut self, return_type: ReturnType) -> Self {
        self.returns = ReturnDeclaration::Result(Some(return_type));
        self
    }

    pub fn returns_declaration(mut self, returns: ReturnDeclaration) -> Self {
        self.returns = returns;
        self
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotation(&self) -> Option<&FunctionAnnotation> {
        self.annotation.as_ref()
    }

    pub fn parameters(&self) -> &[ParameterDeclaration] {
        &self.parameters
    }

    pub fn return_declaration(&self) -> &ReturnDeclaration {
        &self.returns
    }

    /// Annotated call kind, [`CallKind::Transaction`] when unannotated
    pub fn kind(&self) -> CallKind {
        self.annotation
            .as_ref()
            .map(|annotation| annotation.kind)
            .unwrap_or_default()
    }

    fn annotated_name(&self) -> Option<String> {
        self.annotation
            .as_ref()
            .and_then(|annotation| annotation.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let declaration = MethodDeclaration::new("Token", "send")
            .view()
            .renamed("transfer")
            .argument("to", TypeDescriptor::address())
            .cost("weiValue")
            .parameter(ParameterDeclaration::host("callback"))
            .returns(ReturnType::Value(TypeDescriptor::bool()));

        assert_eq!(declaration.kind(), CallKind::View);
        assert_eq!(
            declaration.annotation().and_then(|a| a.name.as_deref()),
            Some("transfer")
        );
        let encoded: Vec<&str> = declaration
            .parameters()
            .iter()
            .filter(|p| p.is_encoded())
            .map(ParameterDeclaration::name)
            .collect();
        assert_eq!(encoded, vec!["to"]);
    }

    #[test]
    fn test_kind_keeps_name() {
        let declaration = MethodDeclaration::new("Token", "send")
            .renamed("transfer")
            .view();
        assert_eq!(declaration.kind(), CallKind::View);
        assert_eq!(
            declaration.annotation().and_then(|a| a.name.clone()),
            Some("transfer".to_string())
        );
        assert_eq!(MethodDeclaration::new("Token", "x").kind(), CallKind::Transaction);
    }

    #[test]
    fn test_identity() {
        let a = MethodDeclaration::new("Token", "name").returns(ReturnType::Value(TypeDescriptor::string()));
        let b = MethodDeclaration::new("Token", "name").returns(ReturnType::Value(TypeDescriptor::string()));
        let c = MethodDeclaration::new("Other", "name").returns(ReturnType::Value(TypeDescriptor::string()));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(
            MethodDeclaration::new("Token", "name").return_declaration(),
            &ReturnDeclaration::Result(None)
        );
    }
}
