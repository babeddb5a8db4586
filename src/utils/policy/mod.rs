//! Builders for the access policies the sweeps encrypt under, in rabe's
//! human policy language: quoted attribute names joined by `and` / `or`,
//! nested to the right, e.g. `("attribute0" and ("attribute1" and
//! "attribute2"))`. Multi-authority attributes are scoped with the `::`
//! separator the distributed schemes split on (`auth0::attribute0`).

/// Boolean gate joining the leaves of a generated policy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gate {
    And,
    Or,
}

impl Gate {
    /// The policy language keyword of the gate.
    pub fn keyword(self) -> &'static str {
        match self {
            Gate::And => "and",
            Gate::Or => "or",
        }
    }
}

/// `attribute0` .. `attribute{count-1}`.
pub fn attribute_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("attribute{}", i)).collect()
}

/// `{authority}::attribute0` .. `{authority}::attribute{count-1}`.
pub fn authority_attribute_names(authority: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{}::attribute{}", authority, i))
        .collect()
}

/// `auth0` .. `auth{count-1}`.
pub fn authority_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("auth{}", i)).collect()
}

/// A right-nested policy joining `attributes` with `gate`. A single
/// attribute stays unparenthesized. Both pure conjunctions and pure
/// disjunctions are in DNF, so the output is accepted by every scheme.
pub fn flat_policy(gate: Gate, attributes: &[String]) -> String {
    match attributes.split_first() {
        None => String::new(),
        Some((first, [])) => format!(r#""{}""#, first),
        Some((first, rest)) => format!(
            r#"("{}" {} {})"#,
            first,
            gate.keyword(),
            flat_policy(gate, rest)
        ),
    }
}

/// A policy over the first attribute of each of `authorities` distinct
/// authorities, the shape of the cross-authority sweeps.
pub fn cross_authority_policy(gate: Gate, authorities: usize) -> String {
    let leaves: Vec<String> = (0..authorities)
        .map(|i| format!("auth{}::attribute0", i))
        .collect();
    flat_policy(gate, &leaves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_attribute_policy_is_a_bare_leaf() {
        assert_eq!(flat_policy(Gate::And, &attribute_names(1)), r#""attribute0""#);
    }

    #[test]
    fn policies_nest_to_the_right() {
        assert_eq!(
            flat_policy(Gate::And, &attribute_names(2)),
            r#"("attribute0" and "attribute1")"#
        );
        assert_eq!(
            flat_policy(Gate::Or, &attribute_names(3)),
            r#"("attribute0" or ("attribute1" or "attribute2"))"#
        );
    }

    #[test]
    fn parentheses_stay_balanced() {
        let policy = flat_policy(Gate::And, &attribute_names(50));
        let open = policy.matches('(').count();
        let close = policy.matches(')').count();
        assert_eq!(open, close);
        assert_eq!(open, 49);
    }

    #[test]
    fn authority_attributes_are_scoped() {
        assert_eq!(
            authority_attribute_names("auth3", 2),
            ["auth3::attribute0", "auth3::attribute1"]
        );
        assert_eq!(authority_names(2), ["auth0", "auth1"]);
    }

    #[test]
    fn cross_authority_policies_take_one_leaf_per_authority() {
        assert_eq!(
            cross_authority_policy(Gate::Or, 2),
            r#"("auth0::attribute0" or "auth1::attribute0")"#
        );
    }

    #[test]
    fn empty_attribute_set_yields_empty_policy() {
        assert_eq!(flat_policy(Gate::And, &[]), "");
    }
}
