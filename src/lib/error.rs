use crate::api::ApiError;

/// Formats a handler or polling failure for the log. Telegram rejections are
/// shown with their error code; anything else with its full error chain.
pub fn describe_error(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ApiError>() {
        Some(ApiError::Telegram { code, description }) => {
            format!("Telegram API Error:\n[{code}]\n{description}")
        }
        _ => format!("{err:?}"),
    }
}

/// Default error handler: log and move on.
pub fn log_error(err: &anyhow::Error) {
    error!("{}", describe_error(err));
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Context};

    use super::*;

    #[test]
    fn telegram_errors_show_code() {
        let err = anyhow::Error::from(ApiError::Telegram {
            code: 403,
            description: "Forbidden: bot was blocked by the user".to_string(),
        });

        assert_eq!(
            describe_error(&err),
            "Telegram API Error:\n[403]\nForbidden: bot was blocked by the user"
        );
    }

    #[test]
    fn context_does_not_hide_telegram_errors() {
        let err = Err::<(), _>(ApiError::Telegram {
            code: 400,
            description: "Bad Request".to_string(),
        })
        .context("sending reply")
        .unwrap_err();

        assert_eq!(describe_error(&err), "Telegram API Error:\n[400]\nBad Request");
    }

    #[test]
    fn other_errors_show_chain() {
        let err = anyhow!("connection reset").context("polling");
        let description = describe_error(&err);

        assert!(description.contains("polling"));
        assert!(description.contains("connection reset"));
    }
}
