//! Ticket templates over a check, rendered with `minijinja`.
//!
//! A template sees the fields listed in [`field`] and nothing else. Undefined
//! values are strict: an unknown field or a label/annotation key the check
//! does not carry fails the render instead of producing empty text.

mod field;
mod ticket;

pub use ticket::TicketTemplates;

use minijinja::{AutoEscape, Environment, ErrorKind, UndefinedBehavior};

use crate::error::TemplateError;
use crate::event::Check;

#[derive(Clone, Debug)]
pub struct Template {
    name: &'static str,
    env: Environment<'static>,
}

impl Template {
    /// Compile `source`. `name` labels error messages.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Parse`] when `source` is not valid template
    /// syntax.
    pub fn parse(name: &'static str, source: &str) -> std::result::Result<Self, TemplateError> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        env.add_template_owned(name, source.to_string())
            .map_err(|err| engine_error(name, &err))?;
        Ok(Self { name, env })
    }

    /// # Errors
    ///
    /// Returns [`TemplateError::Undefined`] for references outside the check
    /// context and [`TemplateError::Render`] for any other evaluation failure.
    pub fn render(&self, check: &Check) -> std::result::Result<String, TemplateError> {
        self.env
            .get_template(self.name)
            .and_then(|template| template.render(field::check_context(check)))
            .map_err(|err| engine_error(self.name, &err))
    }
}

fn engine_error(template: &'static str, err: &minijinja::Error) -> TemplateError {
    let message = err.to_string();
    match err.kind() {
        ErrorKind::SyntaxError => TemplateError::Parse { template, message },
        ErrorKind::UndefinedError => TemplateError::Undefined { template, message },
        _ => TemplateError::Render { template, message },
    }
}
