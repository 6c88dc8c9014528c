use crate::error::{ErrorContext, NixSearchError};

pub fn format_error_chain(error: &NixSearchError) -> String {
    let context = ErrorContext::new(error);
    context.to_string()
}
