// Template parser for %%name%% placeholder tokens

use std::collections::HashSet;

use super::ast::{Placeholder, Template, TemplatePart, TOKEN_DELIMITER};
use crate::error::{LocatorError, Result};

pub struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    pub fn parse(template: &'a str) -> Result<Template> {
        let mut parser = Self {
            input: template,
            pos: 0,
        };
        parser.parse_template()
    }

    fn parse_template(&mut self) -> Result<Template> {
        let mut parts = Vec::new();
        let mut seen = HashSet::new();

        while self.pos < self.input.len() {
            match self.rest().find(TOKEN_DELIMITER) {
                // At a token: %%name%%
                Some(0) => {
                    let placeholder = self.parse_placeholder()?;
                    if !seen.insert(placeholder) {
                        return Err(self.error(format!(
                            "duplicate placeholder '{}'",
                            placeholder
                        )));
                    }
                    parts.push(TemplatePart::Placeholder(placeholder));
                }
                // Literal text up to the next token
                Some(offset) => {
                    parts.push(TemplatePart::Literal(self.rest()[..offset].to_string()));
                    self.pos += offset;
                }
                // No more tokens, the rest is literal
                None => {
                    parts.push(TemplatePart::Literal(self.rest().to_string()));
                    self.pos = self.input.len();
                }
            }
        }

        Ok(Template::new(self.input.to_string(), parts))
    }

    fn parse_placeholder(&mut self) -> Result<Placeholder> {
        let start = self.pos;
        // Opening delimiter
        self.expect_delimiter()?;

        // Name runs until the closing delimiter
        let name_len = self
            .rest()
            .find(TOKEN_DELIMITER)
            .ok_or_else(|| self.error(format!("unterminated placeholder at position {}", start)))?;
        let name = &self.rest()[..name_len];

        // Names are camelCase identifiers from the closed set
        if name.is_empty() {
            return Err(self.error(format!("empty placeholder at position {}", start)));
        }
        if let Some(ch) = name.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(self.error(format!(
                "invalid character '{}' in placeholder at position {}",
                ch, start
            )));
        }

        let placeholder = name
            .parse::<Placeholder>()
            .map_err(|_| self.error(format!("unknown placeholder '{}'", name)))?;

        // Skip name and closing delimiter
        self.pos += name_len;
        self.expect_delimiter()?;
        Ok(placeholder)
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn expect_delimiter(&mut self) -> Result<()> {
        if self.rest().starts_with(TOKEN_DELIMITER) {
            self.pos += TOKEN_DELIMITER.len();
            Ok(())
        } else {
            Err(self.error(format!(
                "expected '{}' at position {}",
                TOKEN_DELIMITER, self.pos
            )))
        }
    }

    fn error(&self, reason: String) -> LocatorError {
        LocatorError::invalid_template(self.input, reason)
    }
}
