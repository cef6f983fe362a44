use crate::error::BcdError;

pub const DEFAULT_ALIAS: &str = "bcd";
pub const START_MARKER: &str = "# start: bookmark-cd";
pub const END_MARKER: &str = "# end: bookmark-cd";

/// Checks that `alias` can be used as a shell function name.
pub fn validate_alias(alias: &str) -> Result<(), BcdError> {
    let valid = !alias.is_empty()
        && !alias.starts_with('-')
        && alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(BcdError::InvalidAlias(alias.to_string()))
    }
}

/// The shell function that runs the picker and `cd`s into its output.
pub fn shell_function(alias: &str) -> Result<String, BcdError> {
    validate_alias(alias)?;
    Ok(format!(
        r#"{START_MARKER}
{alias}() {{
  TARGETPATH=$(bookmark-cd "$@")

  if [ -n "${{TARGETPATH}}" ] ; then
    cd "${{TARGETPATH}}"
  fi
}}
{END_MARKER}"#
    ))
}
