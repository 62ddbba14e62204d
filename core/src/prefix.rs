//! Prefix checks over a set of candidate prefixes.

/// True when `value` starts with at least one of `prefixes`. An empty set
/// matches nothing.
pub fn check_inclusive_prefixes<I>(value: &str, prefixes: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    prefixes.into_iter().any(|p| value.starts_with(p.as_ref()))
}

/// True when `value` starts with none of `prefixes`. An empty set excludes
/// nothing.
pub fn check_exclusive_prefixes<I>(value: &str, prefixes: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    !check_inclusive_prefixes(value, prefixes)
}
