use crate::catalog::FormatPattern;
use crate::format::ParseError;


/// Errors from the operations that report why they failed, rather than
/// just returning nothing.
#[derive(PartialEq, Eq, Clone, Debug, thiserror::Error)]
pub enum Error {

    /// The text didn’t match the pattern, even leniently.
    #[error("couldn’t read {text:?} as {pattern:?}: {source}")]
    Parse {
        text:    String,
        pattern: FormatPattern,
        #[source]
        source:  ParseError,
    },
}
