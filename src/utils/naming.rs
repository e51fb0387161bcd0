//! Identifier splitting for emitters that re-case names.

/// Split an identifier into lowercase words.
///
/// Words break on `_`, `-`, `.` and whitespace, and wherever a lowercase
/// letter or digit is followed by an uppercase one. A run of capitals keeps
/// together except for its last letter when that letter starts a new word
/// (`HTTPServer` -> `http`, `server`).
pub fn split_name(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if matches!(c, '_' | '-' | '.') || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).map_or(false, |n| n.is_lowercase());

            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }

        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_camel_case() {
        assert_eq!(split_name("PlayerCharacter"), vec!["player", "character"]);
        assert_eq!(split_name("itemId"), vec!["item", "id"]);
    }

    #[test]
    fn test_split_separators() {
        assert_eq!(split_name("player_character-sheet.v2"), vec!["player", "character", "sheet", "v2"]);
    }

    #[test]
    fn test_split_acronyms() {
        assert_eq!(split_name("HTTPServer"), vec!["http", "server"]);
        assert_eq!(split_name("ID"), vec!["id"]);
    }
}
