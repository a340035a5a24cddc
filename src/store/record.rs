//! Single-column CSV records: one word per record, no header.
//!
//! Bare records run to the end of the line. A record containing a comma,
//! quote or line break is written quoted, with inner quotes doubled.

use crate::model::word::Word;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    pub line: usize,
    pub reason: &'static str,
}

/// Splits `text` into raw records. Blank records are kept; callers decide.
pub fn parse_records(text: &str) -> Result<Vec<String>, RecordError> {
    let mut records = Vec::new();
    let mut chars = text.chars().peekable();
    let mut line = 1;

    while chars.peek().is_some() {
        let start_line = line;
        let mut field = String::new();

        // Leading whitespace before an opening quote is tolerated.
        let mut lead = String::new();
        while let Some(&c) = chars.peek() {
            if c == ' ' || c == '\t' {
                lead.push(c);
                chars.next();
            } else {
                break;
            }
        }

        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    None => {
                        return Err(RecordError {
                            line: start_line,
                            reason: "unterminated quoted record",
                        })
                    }
                    Some('"') => {
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            field.push('"');
                        } else {
                            break;
                        }
                    }
                    Some(c) => {
                        if c == '\n' {
                            line += 1;
                        }
                        field.push(c);
                    }
                }
            }

            // Only whitespace may follow the closing quote.
            loop {
                match chars.next() {
                    None => break,
                    Some('\n') => {
                        line += 1;
                        break;
                    }
                    Some(c) if c.is_whitespace() => {}
                    Some(_) => {
                        return Err(RecordError {
                            line,
                            reason: "unexpected text after closing quote",
                        })
                    }
                }
            }
        } else {
            field.push_str(&lead);
            for c in chars.by_ref() {
                if c == '\n' {
                    line += 1;
                    break;
                }
                field.push(c);
            }
            if field.ends_with('\r') {
                field.pop();
            }
        }

        records.push(field);
    }

    Ok(records)
}

pub fn parse_words(text: &str) -> Result<Vec<Word>, RecordError> {
    Ok(parse_records(text)?
        .iter()
        .filter_map(|r| Word::parse(r))
        .collect())
}

pub fn encode_record(word: &str) -> String {
    if word.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", word.replace('"', "\"\""))
    } else {
        word.to_string()
    }
}

pub fn encode_words(words: &[Word]) -> String {
    let mut out = String::new();
    for word in words {
        out.push_str(&encode_record(word.as_str()));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(words: &[Word]) -> Vec<&str> {
        words.iter().map(Word::as_str).collect()
    }

    #[test]
    fn bare_records_one_per_line() {
        let words = parse_words("apple\nbanana\r\ncherry").unwrap();
        assert_eq!(strs(&words), ["apple", "banana", "cherry"]);
    }

    #[test]
    fn blank_records_are_dropped_and_words_trimmed() {
        let words = parse_words("\n  apple  \n\n   \nbanana\n").unwrap();
        assert_eq!(strs(&words), ["apple", "banana"]);
    }

    #[test]
    fn quoted_records_keep_delimiters() {
        let text = "\"salt, pepper\"\n\"say \"\"hi\"\"\"\n\"two\nlines\"\nplain\n";
        let words = parse_words(text).unwrap();
        assert_eq!(strs(&words), ["salt, pepper", "say \"hi\"", "two\nlines", "plain"]);
    }

    #[test]
    fn encoding_quotes_only_when_needed() {
        assert_eq!(encode_record("apple"), "apple");
        assert_eq!(encode_record("a,b"), "\"a,b\"");
        assert_eq!(encode_record("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn encoded_list_reads_back_in_order() {
        let words: Vec<Word> = ["kick off", "a,b", "quote\"d", "z"]
            .iter()
            .filter_map(|s| Word::parse(s))
            .collect();
        let text = encode_words(&words);
        assert_eq!(parse_words(&text).unwrap(), words);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = parse_words("apple\n\"broken\nbanana\n").unwrap_err();
        assert_eq!(err.line, 2);
    }

    #[test]
    fn text_after_closing_quote_is_an_error() {
        let err = parse_words("\"apple\"pie\n").unwrap_err();
        assert_eq!(err.reason, "unexpected text after closing quote");
    }
}
