//! fuzzy equivalence of stop names, used to decide whether an existing map
//! object still carries the name found in the feed.

/// demand-responsive (on-demand) service suffix
const ON_DEMAND_SUFFIX: &str = "-tad";

/// replaces ` - ` with `-` and lowercases.
pub fn normalize_name(name: &str) -> String {
    name.replace(" - ", "-").to_lowercase()
}

/// true when `name` designates the same stop as `wanted`, both already
/// normalized.
fn normalized_names_match(name: &str, wanted: &str) -> bool {
    name == wanted
        || name.strip_suffix(ON_DEMAND_SUFFIX) == Some(wanted)
        || wanted.starts_with(&format!("{name}-"))
        || wanted.ends_with(&format!("-{name}"))
        || name.starts_with(&format!("{wanted} ("))
        || name.ends_with(&format!(" ({wanted})"))
}

/// true if any present, non-empty candidate name matches any wanted name.
pub fn names_equivalent(names: &[Option<&str>], wanted: &[&str]) -> bool {
    names
        .iter()
        .flatten()
        .filter(|name| !name.is_empty())
        .map(|name| normalize_name(name))
        .any(|name| {
            wanted
                .iter()
                .map(|w| normalize_name(w))
                .any(|w| normalized_names_match(&name, &w))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_name("Toulouse - Capitole"), "toulouse-capitole");
        assert_eq!(normalize_name("ÉGLISE"), "église");
    }

    #[test]
    fn test_equivalent_patterns() {
        assert!(names_equivalent(&[Some("Capitole")], &["capitole"]));
        assert!(names_equivalent(&[Some("Capitole-TAD")], &["Capitole"]));
        // city prefix or suffix on the wanted name
        assert!(names_equivalent(&[Some("Capitole")], &["Toulouse - Capitole"]));
        assert!(names_equivalent(&[Some("Toulouse")], &["Toulouse - Capitole"]));
        // parenthetical qualifier on the map name
        assert!(names_equivalent(&[Some("Capitole (Toulouse)")], &["Capitole"]));
        assert!(names_equivalent(&[Some("Place du Capitole (Capitole)")], &["Capitole"]));
    }

    #[test]
    fn test_not_equivalent() {
        assert!(!names_equivalent(&[Some("Capitole")], &["Jeanne d'Arc"]));
        assert!(!names_equivalent(&[Some("Capitoles")], &["Capitole"]));
        assert!(!names_equivalent(&[None, Some("")], &["Capitole"]));
        assert!(!names_equivalent(&[], &["Capitole"]));
    }

    #[test]
    fn test_any_candidate_matches() {
        let names = [None, Some("Arènes Romaines"), Some("Arènes")];
        assert!(names_equivalent(&names, &["Les Arènes", "Arènes"]));
    }
}
