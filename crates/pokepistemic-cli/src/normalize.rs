//! Name normalisation for user input. The engine matches names exactly, so the
//! command surface maps what the user typed onto catalog spellings first.

/// Lower-cased alphanumerics only: "Flutter Mane", "fluttermane" and "flutter-mane"
/// share a key.
pub fn canonical_key(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Upper-cases the first letter of every whitespace-separated word.
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Finds the known spelling matching `input`, ignoring case, spaces and punctuation.
pub fn resolve<'a, I>(input: &str, known: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let key = canonical_key(input);
    if key.is_empty() {
        return None;
    }
    known.into_iter().find(|name| canonical_key(name) == key)
}

/// Resolves against `known`, falling back to title case for names nobody mentions.
pub fn resolve_or_title<'a, I>(input: &str, known: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    resolve(input, known)
        .map(str::to_string)
        .unwrap_or_else(|| title_case(input))
}

/// Species whose forms are commonly typed by base name alone. Any input whose key
/// contains the fragment maps to the first target the catalog knows.
const SPECIES_ALIASES: &[(&str, &[&str])] = &[(
    "urshifu",
    &["Urshifu-Rapid-Strike", "Urshifu-Rapid", "Urshifu"],
)];

/// Resolves a species name: exact key match first, then the alias table, then title case.
pub fn resolve_species(input: &str, known: &[&str]) -> String {
    if let Some(found) = resolve(input, known.iter().copied()) {
        return found.to_string();
    }
    let key = canonical_key(input);
    for (fragment, targets) in SPECIES_ALIASES {
        if !key.contains(fragment) {
            continue;
        }
        let known_target = targets
            .iter()
            .find_map(|target| resolve(target, known.iter().copied()));
        if let Some(found) = known_target.or_else(|| targets.first().copied()) {
            return found.to_string();
        }
    }
    title_case(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("  shadow   ball "), "Shadow Ball");
        assert_eq!(title_case("CHOICE specs"), "Choice Specs");
        assert_eq!(title_case("u-turn"), "U-turn");
    }

    #[test]
    fn resolves_aliases_and_hyphenated_names() {
        let species = ["Flutter Mane", "Great Tusk", "Urshifu-Rapid-Strike"];
        assert_eq!(resolve("fluttermane", species), Some("Flutter Mane"));
        assert_eq!(resolve("GREAT TUSK", species), Some("Great Tusk"));
        assert_eq!(resolve("urshifu rapid strike", species), Some("Urshifu-Rapid-Strike"));
        assert_eq!(resolve("Pikachu", species), None);
        assert_eq!(resolve("--", species), None);
    }

    #[test]
    fn falls_back_to_title_case() {
        let moves = ["Will-O-Wisp", "U-turn"];
        assert_eq!(resolve_or_title("will-o-wisp", moves), "Will-O-Wisp");
        assert_eq!(resolve_or_title("uturn", moves), "U-turn");
        assert_eq!(resolve_or_title("splash", moves), "Splash");
    }

    #[test]
    fn species_aliases_map_base_names_onto_catalog_forms() {
        let species = ["Great Tusk", "Urshifu-Rapid-Strike"];
        assert_eq!(resolve_species("urshifu", &species), "Urshifu-Rapid-Strike");
        assert_eq!(resolve_species("Urshifu Rapid", &species), "Urshifu-Rapid-Strike");
        assert_eq!(resolve_species("greattusk", &species), "Great Tusk");
        assert_eq!(resolve_species("urshifu", &[]), "Urshifu-Rapid-Strike");
        assert_eq!(resolve_species("iron valiant", &species), "Iron Valiant");

        let base_only = ["Urshifu"];
        assert_eq!(resolve_species("URSHIFU", &base_only), "Urshifu");
    }
}
