//! Deep links into the external process system.

use crate::config::{DEFAULT_LINK_TEMPLATE, NUMBER_PLACEHOLDER};

/// Link to the process viewer for `number`, using the default template.
pub fn build_external_link(number: &str) -> String {
    build_link_with_template(DEFAULT_LINK_TEMPLATE, number)
}

/// Interpolates the trimmed `number` into every `{number}` placeholder of `template`.
pub fn build_link_with_template(template: &str, number: &str) -> String {
    template.replace(NUMBER_PLACEHOLDER, number.trim())
}
