//! Forward (prefix) tokenizer
//!
//! Every word is indexed under each of its prefixes, so typing `acc`
//! already finds `ACCOUNT_NUMBER`:
//!
//! - `ACCOUNT_NUMBER` → `["A", "AC", "ACC", …, "ACCOUNT", "N", "NU", …, "NUMBER"]`
//!
//! Words are maximal runs of alphanumeric characters. Lowercasing is left to
//! the `LowerCaser` filter of [`build_forward_analyzer`].

use tantivy::tokenizer::{LowerCaser, TextAnalyzer, Token, TokenStream, Tokenizer};

/// Name under which the analyzer is registered on the index
pub const FORWARD_TOKENIZER: &str = "lineage_forward";

/// Prefix tokenizer over alphanumeric words
#[derive(Clone, Default)]
pub struct ForwardTokenizer;

impl Tokenizer for ForwardTokenizer {
    type TokenStream<'a> = ForwardTokenStream<'a>;

    fn token_stream<'a>(&'a mut self, text: &'a str) -> Self::TokenStream<'a> {
        ForwardTokenStream {
            text,
            tokens: Vec::new(),
            current_index: 0,
            expanded: false,
        }
    }
}

pub struct ForwardTokenStream<'a> {
    text: &'a str,
    tokens: Vec<Token>,
    current_index: usize,
    expanded: bool,
}

impl<'a> ForwardTokenStream<'a> {
    fn expand(&mut self) {
        for (position, (start, word)) in words(self.text).enumerate() {
            for (end, _) in word
                .char_indices()
                .skip(1)
                .chain(std::iter::once((word.len(), ' ')))
            {
                self.tokens.push(Token {
                    offset_from: start,
                    offset_to: start + end,
                    position,
                    text: word[..end].to_string(),
                    position_length: 1,
                });
            }
        }
        self.expanded = true;
    }
}

impl<'a> TokenStream for ForwardTokenStream<'a> {
    fn advance(&mut self) -> bool {
        if !self.expanded {
            self.expand();
        }

        if self.current_index < self.tokens.len() {
            self.current_index += 1;
            true
        } else {
            false
        }
    }

    fn token(&self) -> &Token {
        &self.tokens[self.current_index - 1]
    }

    fn token_mut(&mut self) -> &mut Token {
        &mut self.tokens[self.current_index - 1]
    }
}

/// Alphanumeric words of `text` with their byte offsets
pub(crate) fn words(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest = text.char_indices().peekable();
    std::iter::from_fn(move || {
        while rest.next_if(|(_, c)| !c.is_alphanumeric()).is_some() {}
        let (start, _) = *rest.peek()?;
        let mut end = start;
        while let Some((i, c)) = rest.next_if(|(_, c)| c.is_alphanumeric()) {
            end = i + c.len_utf8();
        }
        Some((start, &text[start..end]))
    })
}

/// Forward tokenizer + lowercase filter
pub fn build_forward_analyzer() -> TextAnalyzer {
    TextAnalyzer::builder(ForwardTokenizer)
        .filter(LowerCaser)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<String> {
        let mut analyzer = build_forward_analyzer();
        let mut stream = analyzer.token_stream(text);

        let mut tokens = Vec::new();
        while stream.advance() {
            tokens.push(stream.token().text.clone());
        }
        tokens
    }

    #[test]
    fn test_prefixes_of_each_word() {
        assert_eq!(collect("AB_cd"), vec!["a", "ab", "c", "cd"]);
    }

    #[test]
    fn test_separators_and_empty() {
        assert!(collect("").is_empty());
        assert!(collect(" -_ ").is_empty());
        assert_eq!(collect("  x  "), vec!["x"]);
    }

    #[test]
    fn test_offsets_point_into_text() {
        let text = "DW_NS_ITEM";
        let mut tokenizer = ForwardTokenizer;
        let mut stream = tokenizer.token_stream(text);
        let mut last = None;
        while stream.advance() {
            let t = stream.token();
            assert_eq!(&text[t.offset_from..t.offset_to], t.text);
            last = Some(t.clone());
        }
        let last = last.unwrap();
        assert_eq!(last.text, "ITEM");
        assert_eq!(last.position, 2);
    }

    #[test]
    fn test_multibyte_words() {
        assert_eq!(collect("Ünïcode"), vec!["ü", "ün", "ünï", "ünïc", "ünïco", "ünïcod", "ünïcode"]);
    }

    #[test]
    fn test_words_helper() {
        let found: Vec<_> = words("Sales Orders - 2024").collect();
        assert_eq!(found, vec![(0, "Sales"), (6, "Orders"), (15, "2024")]);
    }
}
