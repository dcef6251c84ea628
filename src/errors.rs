use std::io;
use std::string::FromUtf8Error;
use std::time::Duration;

use thiserror::Error;

/// Errors covering one whole query exchange.
///
/// Every variant is terminal: nothing is retried, and the failing phase
/// can be told apart from the variant itself.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The odamex:// link could not be parsed.
    #[error("invalid odamex link '{0}' (expected \"odamex://<host>[:<port>]\")")]
    InvalidUri(String),
    /// The hostname did not resolve to a usable address.
    #[error("cannot resolve '{host}': {source}")]
    Resolution { host: String, source: io::Error },
    /// The socket could not be opened or connected.
    #[error("cannot reach the server: {0}")]
    Connect(#[source] io::Error),
    /// Sending the request datagram failed.
    #[error("write error: {0}")]
    Write(#[source] io::Error),
    /// The request was not sent within the configured time.
    #[error("write timed out after {0:?}")]
    WriteTimeout(Duration),
    /// Reading the reply failed.
    #[error("read error: {0}")]
    Read(#[source] io::Error),
    /// No reply arrived within the configured time.
    #[error("read timed out after {0:?}")]
    ReadTimeout(Duration),
    /// The server answered with a zero length datagram.
    #[error("server has no data to answer with")]
    EmptyResponse,
    /// The reply arrived but could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors while decoding a response buffer.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// A field extends past the end of the reply.
    #[error("truncated response: needed {needed} bytes at offset {offset}, {available} left")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// A string field is missing its NUL terminator.
    #[error("unterminated string at offset {offset}")]
    UnterminatedString { offset: usize },
    /// A string field holds bytes that are not valid utf-8.
    #[error("string is not valid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
    /// The wire declared a collection size the reply cannot hold.
    #[error("{what} count {count} exceeds the {limit} bytes left in the reply")]
    CountOutOfRange {
        what: &'static str,
        count: usize,
        limit: usize,
    },
}

/// A type alias to handle Results with QueryError.
pub type Result<T, V = QueryError> = std::result::Result<T, V>;
