//! Identifier validation, run on the full tree before evaluation.

use crate::whitelist;
use calc_types::ast::{Expr, ExprKind, Ident};
use calc_types::{CalcError, CalcResult};

/// Every identifier in the expression, function names included, in source
/// order.
pub fn identifiers(expr: &Expr) -> Vec<Ident> {
    let mut names = Vec::new();
    expr.walk(&mut |node| match &node.kind {
        ExprKind::Identifier(name) => names.push(Ident::new(name.clone(), node.span)),
        ExprKind::Call { name, .. } => names.push(name.clone()),
        _ => {}
    });
    names
}

/// Rejects the first identifier outside the whitelist.
pub fn validate(expr: &Expr) -> CalcResult<()> {
    let rejected: Vec<Ident> = identifiers(expr)
        .into_iter()
        .filter(|ident| !whitelist::is_allowed(&ident.name))
        .collect();
    match rejected.first() {
        None => Ok(()),
        Some(first) => {
            if rejected.len() > 1 {
                log::debug!(
                    "{} names outside the whitelist: {}",
                    rejected.len(),
                    rejected
                        .iter()
                        .map(|ident| ident.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            Err(CalcError::name_not_allowed(first.name.clone(), first.span))
        }
    }
}
