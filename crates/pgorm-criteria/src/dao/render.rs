//! Rendering scopes into Postgres statements.
//!
//! Predicates carry `?` placeholders. Rendering rewrites each one to `$n` and
//! collects the bound values in order. A list argument expands to
//! `($n, $n+1, ...)`. `??` is the escape for a literal `?`, as needed by the
//! JSONB `?`, `?|` and `?&` operators.

use crate::criteria::{Assignment, Assignments};
use crate::dao::scope::Scope;
use crate::param::{Arg, ParamList};

/// A rendered statement and its bound parameters.
#[derive(Debug, Default)]
pub(crate) struct BuiltQuery {
    pub sql: String,
    pub params: ParamList,
    /// Arguments that had no `?` left to bind to.
    pub unbound: usize,
}

impl BuiltQuery {
    fn push(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a `?` template, binding `args` in order.
    ///
    /// `??` renders a literal `?` without consuming an argument. Surplus `?`
    /// stay literal; surplus arguments are counted in `unbound`.
    fn push_template(&mut self, template: &str, args: &[Arg]) {
        let mut args = args.iter();
        let mut chars = template.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '?' {
                self.sql.push(ch);
                continue;
            }
            if chars.next_if_eq(&'?').is_some() {
                self.sql.push('?');
                continue;
            }
            match args.next() {
                Some(Arg::Scalar(param)) => {
                    let idx = self.params.push_param(param.clone());
                    self.sql.push('$');
                    self.sql.push_str(&idx.to_string());
                }
                Some(Arg::List(items)) if items.is_empty() => self.sql.push_str("(NULL)"),
                Some(Arg::List(items)) => {
                    let placeholders: Vec<String> = items
                        .iter()
                        .map(|p| format!("${}", self.params.push_param(p.clone())))
                        .collect();
                    self.sql.push('(');
                    self.sql.push_str(&placeholders.join(", "));
                    self.sql.push(')');
                }
                None => self.sql.push(ch),
            }
        }
        self.unbound += args.count();
    }

    fn push_where(&mut self, scope: &Scope) {
        if !scope.predicate().is_empty() {
            self.push(" WHERE ");
            self.push_template(scope.predicate(), scope.args());
        }
    }
}

/// `SELECT <cols|*> FROM t [WHERE p] [ORDER BY o] [LIMIT n] [OFFSET m]`
pub(crate) fn select(scope: &Scope) -> BuiltQuery {
    let mut q = BuiltQuery::default();
    q.push("SELECT ");
    if scope.columns().is_empty() {
        q.push("*");
    } else {
        q.push(&scope.columns().join(", "));
    }
    q.push(" FROM ");
    q.push(scope.table());
    q.push_where(scope);
    if !scope.order_clause().is_empty() {
        q.push(" ORDER BY ");
        q.push(scope.order_clause());
    }
    if let Some(limit) = scope.row_limit() {
        q.push(&format!(" LIMIT {limit}"));
    }
    if let Some(offset) = scope.row_offset() {
        q.push(&format!(" OFFSET {offset}"));
    }
    q
}

/// `SELECT COUNT(*) FROM t [WHERE p]`
pub(crate) fn count(scope: &Scope) -> BuiltQuery {
    let mut q = BuiltQuery::default();
    q.push("SELECT COUNT(*) FROM ");
    q.push(scope.table());
    q.push_where(scope);
    q
}

/// `DELETE FROM t [WHERE p]`
pub(crate) fn delete(scope: &Scope) -> BuiltQuery {
    let mut q = BuiltQuery::default();
    q.push("DELETE FROM ");
    q.push(scope.table());
    q.push_where(scope);
    q
}

/// `UPDATE t SET c1 = $1, c2 = <expr> [WHERE p]`
///
/// Assignment parameters are numbered before predicate parameters.
pub(crate) fn update(scope: &Scope, assignments: &Assignments) -> BuiltQuery {
    let mut q = BuiltQuery::default();
    q.push("UPDATE ");
    q.push(scope.table());
    q.push(" SET ");
    for (i, (field, assignment)) in assignments.iter().enumerate() {
        if i > 0 {
            q.push(", ");
        }
        q.push(field);
        q.push(" = ");
        match assignment {
            Assignment::Value(param) => {
                let idx = q.params.push_param(param.clone());
                q.push(&format!("${idx}"));
            }
            Assignment::Expr { sql, args } => q.push_template(sql, args),
        }
    }
    q.push_where(scope);
    q
}
