//! String normalization used by identity matching, column resolution and
//! change-set building. All functions are pure.

/// Digits only: "(555) 010-2020" -> "5550102020".
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Fold common Latin accents to their ASCII base letter. Spreadsheet exports
/// mix accented and plain spellings of the same name.
pub fn fold_accents(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
            'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => 'A',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
            'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => 'O',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'ñ' => 'n',
            'Ñ' => 'N',
            'ç' => 'c',
            'Ç' => 'C',
            other => other,
        })
        .collect()
}

/// Case-insensitive, accent-stripped, whitespace-collapsed form used for
/// name comparison.
pub fn normalize_name(raw: &str) -> String {
    fold_accents(raw)
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lower-cased, with whitespace and punctuation stripped. Used to compare
/// spreadsheet headers against accepted aliases.
pub fn normalize_header(raw: &str) -> String {
    fold_accents(raw)
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Title-case each whitespace-separated word: "ana maría" -> "Ana María".
/// Applied to name-like fields on write, independent of diff policy.
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_phone_strips_punctuation() {
        assert_eq!(normalize_phone("(555) 010-2020"), "5550102020");
        assert_eq!(normalize_phone("555-010-2020"), "5550102020");
        assert_eq!(normalize_phone("+1 555.010.2020"), "15550102020");
    }

    #[test]
    fn test_normalize_name_case_accents_whitespace() {
        assert_eq!(normalize_name("  ANA   RUIZ "), "ana ruiz");
        assert_eq!(normalize_name("José Pérez"), "jose perez");
        assert_eq!(normalize_name("Ana Ruiz"), normalize_name("ANA RUIZ"));
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("First Name"), "firstname");
        assert_eq!(normalize_header(" first_name "), "firstname");
        assert_eq!(normalize_header("FIRST-NAME"), "firstname");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ana maría"), "Ana María");
        assert_eq!(title_case("RUIZ"), "Ruiz");
        assert_eq!(title_case("de la cruz"), "De La Cruz");
    }
}
