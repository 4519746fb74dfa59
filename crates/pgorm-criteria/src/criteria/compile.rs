//! Folding a [`Cause`] into predicate, arguments and order.

use crate::criteria::cause::Cause;
use crate::param::Arg;

/// The compiled form of a cause.
#[derive(Clone, Debug, Default)]
pub struct Compiled {
    /// `WHERE` body with `?` placeholders; empty means "no filtering".
    pub predicate: String,
    /// Positional arguments matching the placeholders in `predicate`.
    pub args: Vec<Arg>,
    /// `ORDER BY` body; empty when no sort directive was added.
    pub order: String,
}

impl Compiled {
    /// Whether the predicate is empty.
    pub fn is_empty(&self) -> bool {
        self.predicate.is_empty()
    }

    pub fn has_order(&self) -> bool {
        !self.order.is_empty()
    }
}

/// Compile a cause. Pure: the cause is not modified and the result is the
/// same on every call.
pub fn compile(cause: &Cause) -> Compiled {
    let predicate = match cause.fragments.as_slice() {
        [] => String::new(),
        [only] => only.sql.clone(),
        [first, rest @ ..] => {
            let len = first.sql.len()
                + rest
                    .iter()
                    .map(|f| f.join.separator().len() + f.sql.len())
                    .sum::<usize>();

            let mut out = String::with_capacity(len);
            out.push_str(&first.sql);
            for fragment in rest {
                out.push_str(fragment.join.separator());
                out.push_str(&fragment.sql);
            }
            debug_assert_eq!(out.len(), len);
            out
        }
    };

    Compiled {
        predicate,
        args: cause.args.clone(),
        order: cause.order.join(", "),
    }
}
