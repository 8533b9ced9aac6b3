//! Token substitution
//!
//! Replaces `[COLUMN]` tokens in a template body with the row's cell values.
//! All tokens are matched in one left-to-right scan, so a substituted value is
//! never scanned again even if it contains bracket syntax of its own. Tokens
//! that name no column are left as they are.

use crate::domain::{MergeError, Result, Row};
use regex::{Captures, Regex};

/// Substitution engine compiled for a fixed set of columns
///
/// Build once per batch with [`Renderer::for_columns`] and reuse it for every
/// row.
///
/// # Examples
///
/// ```
/// use mailmerge::core::substitute::Renderer;
/// use mailmerge::domain::Row;
///
/// let renderer = Renderer::for_columns(["NAME"]).unwrap();
/// let row = Row::new(1).with("NAME", "Alice");
///
/// assert_eq!(renderer.render("Dear [NAME], re: [REF]", &row), "Dear Alice, re: [REF]");
/// ```
#[derive(Debug, Clone)]
pub struct Renderer {
    pattern: Option<Regex>,
}

impl Renderer {
    /// Compiles a matcher for the `[COLUMN]` token of each column
    ///
    /// Column names are matched literally; regex metacharacters in a name have
    /// no special meaning.
    ///
    /// # Errors
    ///
    /// Returns `DatasetFormatError` if the combined pattern cannot be compiled
    /// (for example, an unreasonably large header).
    pub fn for_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut alternatives: Vec<String> = Vec::new();
        for column in columns {
            let escaped = regex::escape(column.as_ref());
            if !escaped.is_empty() && !alternatives.contains(&escaped) {
                alternatives.push(escaped);
            }
        }

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let pattern = Regex::new(&format!(r"\[({})\]", alternatives.join("|"))).map_err(|e| {
            MergeError::DatasetFormatError(format!("cannot build token pattern for header: {e}"))
        })?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Renders `body` with the values of `row`
    ///
    /// Tokens for columns the row does not carry are left untouched.
    pub fn render(&self, body: &str, row: &Row) -> String {
        let Some(pattern) = &self.pattern else {
            return body.to_string();
        };

        pattern
            .replace_all(body, |caps: &Captures<'_>| match row.get(&caps[1]) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }
}

/// Renders `body` with the values of `row`, compiling a matcher for its columns
///
/// # Errors
///
/// See [`Renderer::for_columns`].
pub fn render(body: &str, row: &Row) -> Result<String> {
    Ok(Renderer::for_columns(row.columns())?.render(body, row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn alice() -> Row {
        Row::new(1)
            .with("NAME", "Alice")
            .with("COMPANY_NAME", "Acme")
            .with("EMAIL_TO", "a@x.com")
            .with("EMAIL_CC", "")
    }

    #[test_case("Dear [NAME]", "Dear Alice" ; "single token")]
    #[test_case("[NAME] of [COMPANY_NAME], [NAME]!", "Alice of Acme, Alice!" ; "repeated tokens")]
    #[test_case("Ref [WAYBILL]", "Ref [WAYBILL]" ; "unknown token untouched")]
    #[test_case("cc: [EMAIL_CC].", "cc: ." ; "empty value")]
    #[test_case("NAME and (NAME)", "NAME and (NAME)" ; "unbracketed text untouched")]
    #[test_case("[[NAME]]", "[Alice]" ; "nested brackets")]
    fn test_render(body: &str, expected: &str) {
        assert_eq!(render(body, &alice()).unwrap(), expected);
    }

    #[test]
    fn test_render_is_idempotent() {
        let row = alice();
        let once = render("<p>Dear [NAME] at [COMPANY_NAME]</p>", &row).unwrap();
        let twice = render(&once, &row).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let row = Row::new(1)
            .with("A", "[B]")
            .with("B", "bee");

        assert_eq!(render("[A] [B]", &row).unwrap(), "[B] bee");
    }

    #[test]
    fn test_column_names_are_literal() {
        let row = Row::new(1).with("AMOUNT ($)", "12.50").with("A.B", "dot");

        assert_eq!(
            render("Total [AMOUNT ($)] [AxB] [A.B]", &row).unwrap(),
            "Total 12.50 [AxB] dot"
        );
    }

    #[test]
    fn test_replacement_values_are_literal() {
        let row = Row::new(1).with("PRICE", "$1 and ${2}");
        assert_eq!(render("[PRICE]", &row).unwrap(), "$1 and ${2}");
    }

    #[test]
    fn test_prefix_columns() {
        let row = Row::new(1).with("NAME", "n").with("NAME_FULL", "full");
        assert_eq!(render("[NAME_FULL]/[NAME]", &row).unwrap(), "full/n");
    }

    #[test]
    fn test_empty_row_returns_body() {
        assert_eq!(render("Dear [NAME]", &Row::new(1)).unwrap(), "Dear [NAME]");
    }

    #[test]
    fn test_renderer_reused_across_rows() {
        let renderer = Renderer::for_columns(["NAME"]).unwrap();
        let bob = Row::new(2).with("NAME", "Bob");
        let missing = Row::new(3);

        assert_eq!(renderer.render("Hi [NAME]", &alice()), "Hi Alice");
        assert_eq!(renderer.render("Hi [NAME]", &bob), "Hi Bob");
        assert_eq!(renderer.render("Hi [NAME]", &missing), "Hi [NAME]");
    }
}
