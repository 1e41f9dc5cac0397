use super::{fmt::ToSql, Formatter, Params};

/// Comma-delimited list of fragments.
pub(super) struct Comma<L>(pub(super) L);

impl<L> ToSql for Comma<L>
where
    L: IntoIterator,
    L::Item: ToSql,
{
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let mut s = "";

        for fragment in self.0 {
            fmt!(f, s, fragment);
            s = ", ";
        }
    }
}

/// `AND`-delimited list of predicate fragments.
pub(super) struct And<L>(pub(super) L);

impl<L> ToSql for And<L>
where
    L: IntoIterator,
    L::Item: ToSql,
{
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) {
        let mut s = "";

        for fragment in self.0 {
            fmt!(f, s, fragment);
            s = " AND ";
        }
    }
}
