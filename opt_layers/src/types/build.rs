//! Single build pass turning a declaration tree into compiled types.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::trace;

use super::TypeInfo;
use super::decl::{OwnValidator, ParserKind, TypeDecl};
use super::parse::Parser;
use super::validator::{Rule, Validator};
use crate::error::TypeDefinitionError;

struct Node<'d> {
    decl: &'d TypeDecl,
    parent: Option<&'d str>,
}

/// Compile every declaration under `root`, keyed by type name.
pub(super) fn build(
    root: &TypeDecl,
) -> Result<BTreeMap<String, Arc<TypeInfo>>, TypeDefinitionError> {
    let mut nodes = BTreeMap::new();
    flatten(root, None, &mut nodes)?;

    let mut composer = Composer {
        nodes: &nodes,
        validators: BTreeMap::new(),
        parsers: BTreeMap::new(),
        visiting: BTreeSet::new(),
    };
    let mut types = BTreeMap::new();
    for (&name, node) in &nodes {
        let validator = composer.validator(name, name)?;
        let parser = composer.parser(name, name)?;
        trace!(
            name,
            parent = node.parent,
            parsable = parser.is_some(),
            "registered type"
        );
        types.insert(
            name.to_owned(),
            Arc::new(TypeInfo {
                name: name.to_owned(),
                description: node.decl.description.clone(),
                parent: node.parent.map(str::to_owned),
                children: node
                    .decl
                    .children
                    .iter()
                    .map(|child| child.name.clone())
                    .collect(),
                validator,
                parser,
            }),
        );
    }
    Ok(types)
}

fn flatten<'d>(
    decl: &'d TypeDecl,
    parent: Option<&'d str>,
    nodes: &mut BTreeMap<&'d str, Node<'d>>,
) -> Result<(), TypeDefinitionError> {
    let name = decl.name.as_str();
    if nodes.contains_key(name) {
        return Err(TypeDefinitionError::DuplicateName {
            name: name.to_owned(),
        });
    }
    if decl.validator.is_none() {
        if decl.sub_validation {
            return Err(TypeDefinitionError::RefinementWithoutValidator {
                name: name.to_owned(),
            });
        }
        if decl.children.is_empty() {
            return Err(TypeDefinitionError::EmptyGroup {
                name: name.to_owned(),
            });
        }
    }
    nodes.insert(name, Node { decl, parent });
    for child in &decl.children {
        flatten(child, Some(name), nodes)?;
    }
    Ok(())
}

struct Composer<'n, 'd> {
    nodes: &'n BTreeMap<&'d str, Node<'d>>,
    validators: BTreeMap<String, Arc<Validator>>,
    parsers: BTreeMap<String, Option<Arc<Parser>>>,
    visiting: BTreeSet<String>,
}

impl<'n, 'd> Composer<'n, 'd> {
    fn node(&self, name: &str, referrer: &str) -> Result<&'n Node<'d>, TypeDefinitionError> {
        self.nodes
            .get(name)
            .ok_or_else(|| TypeDefinitionError::UnknownReference {
                name: referrer.to_owned(),
                target: name.to_owned(),
            })
    }

    fn enter(&mut self, name: &str) -> Result<(), TypeDefinitionError> {
        if self.visiting.insert(name.to_owned()) {
            Ok(())
        } else {
            Err(TypeDefinitionError::Cycle {
                name: name.to_owned(),
            })
        }
    }

    fn validator(
        &mut self,
        name: &str,
        referrer: &str,
    ) -> Result<Arc<Validator>, TypeDefinitionError> {
        if let Some(done) = self.validators.get(name) {
            return Ok(Arc::clone(done));
        }
        let node = self.node(name, referrer)?;
        self.enter(name)?;
        let outcome = self.compose(node);
        self.visiting.remove(name);
        let composed = Arc::new(outcome?);
        self.validators
            .insert(name.to_owned(), Arc::clone(&composed));
        Ok(composed)
    }

    fn compose(&mut self, node: &Node<'d>) -> Result<Validator, TypeDefinitionError> {
        let decl = node.decl;
        let Some(own) = &decl.validator else {
            let mut candidates = Vec::with_capacity(decl.children.len());
            for child in &decl.children {
                candidates.push(self.validator(&child.name, &decl.name)?);
            }
            return Ok(Validator::single(Rule::AnyOf(candidates)));
        };

        let rule = match own {
            OwnValidator::Check(check) => Rule::Check(Arc::clone(check)),
            OwnValidator::EachElement(element) => {
                Rule::Elements(self.validator(element, &decl.name)?)
            }
            OwnValidator::EachValue(element) => Rule::Entries(self.validator(element, &decl.name)?),
        };
        if !decl.sub_validation {
            return Ok(Validator::single(rule));
        }

        let parent = node
            .parent
            .ok_or_else(|| TypeDefinitionError::MissingParent {
                name: decl.name.clone(),
            })?;
        if self.node(parent, &decl.name)?.decl.validator.is_none() {
            return Err(TypeDefinitionError::ParentWithoutValidator {
                name: decl.name.clone(),
                parent: parent.to_owned(),
            });
        }
        let inherited = self.validator(parent, &decl.name)?;
        Ok(Validator::refine(&inherited, rule))
    }

    fn parser(
        &mut self,
        name: &str,
        referrer: &str,
    ) -> Result<Option<Arc<Parser>>, TypeDefinitionError> {
        if let Some(done) = self.parsers.get(name) {
            return Ok(done.clone());
        }
        let node = self.node(name, referrer)?;
        self.enter(name)?;
        let outcome = self.compile_parser(node);
        self.visiting.remove(name);
        let compiled = outcome?;
        self.parsers.insert(name.to_owned(), compiled.clone());
        Ok(compiled)
    }

    fn compile_parser(
        &mut self,
        node: &Node<'d>,
    ) -> Result<Option<Arc<Parser>>, TypeDefinitionError> {
        let decl = node.decl;
        let compiled = match &decl.parser {
            Some(ParserKind::Text(parse)) => Parser::Text(Arc::clone(parse)),
            Some(ParserKind::Elements(element)) => {
                Parser::Elements(self.parser(element, &decl.name)?)
            }
            Some(ParserKind::Entries(element)) => {
                Parser::Entries(self.parser(element, &decl.name)?)
            }
            None => {
                return match node.parent {
                    Some(parent) if decl.sub_validation => self.parser(parent, &decl.name),
                    _ => Ok(None),
                };
            }
        };
        Ok(Some(Arc::new(compiled)))
    }
}
