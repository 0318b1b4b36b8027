fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '.' | ';' | ':' | '!' | '?')
}

pub fn split_text_into_words(text: &str) -> Vec<&str> {
    text.split(is_word_separator)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Lowercase search terms, one for each word of the text.
pub fn search_terms(text: &str) -> Vec<String> {
    split_text_into_words(text)
        .into_iter()
        .map(str::to_lowercase)
        .collect()
}

/// `None` if there is nothing to search for.
pub fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}
