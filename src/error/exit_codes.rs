use crate::error::NixSearchError;

pub fn get_exit_code(error: &NixSearchError) -> i32 {
    match error {
        NixSearchError::ValidationError(_) | NixSearchError::ConfigError(_) => 2,

        NixSearchError::ChannelNotFound { .. } => 3,

        NixSearchError::Http(_)
        | NixSearchError::BackendUnexpected { .. }
        | NixSearchError::BackendReported(_)
        | NixSearchError::MalformedResponse(_) => 20,

        _ => 1,
    }
}
