use std::fmt;
use std::str::FromStr;

use crate::errors::QueryError;

/// Port servers listen on when the link does not name one.
pub const DEFAULT_PORT: u16 = 10666;

/// Host and port of one server, usually taken from an `odamex://` link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAddr {
    pub host: String,
    pub port: u16,
}

impl ServerAddr {
    pub fn new<S: Into<String>>(host: S, port: u16) -> ServerAddr {
        ServerAddr {
            host: host.into(),
            port,
        }
    }

    /// Parses an `odamex://<host>[:<port>][/...]` link.
    ///
    /// Anything after a `/` is ignored; QWURL style links carried a path
    /// there and some launchers still emit it.
    pub fn from_oda_uri(link: &str) -> Result<ServerAddr, QueryError> {
        let invalid = || QueryError::InvalidUri(link.to_string());

        let rest = link.strip_prefix("odamex://").ok_or_else(invalid)?;
        let rest = rest.split('/').next().unwrap_or(rest);

        let addr = match rest.split_once(':') {
            Some((host, port)) => {
                let port = port.parse().map_err(|_| invalid())?;
                ServerAddr::new(host, port)
            }
            None => ServerAddr::new(rest, DEFAULT_PORT),
        };

        if addr.host.is_empty() {
            return Err(invalid());
        }
        Ok(addr)
    }
}

impl FromStr for ServerAddr {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<ServerAddr, QueryError> {
        ServerAddr::from_oda_uri(s)
    }
}

impl fmt::Display for ServerAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn port_defaults_when_absent() {
        let addr = ServerAddr::from_oda_uri("odamex://doom.example.org").unwrap();
        assert_eq!(addr, ServerAddr::new("doom.example.org", DEFAULT_PORT));
    }

    #[test]
    fn explicit_port_wins() {
        let addr = ServerAddr::from_oda_uri("odamex://doom.example.org:10670").unwrap();
        assert_eq!(addr, ServerAddr::new("doom.example.org", 10670));
    }

    #[test]
    fn path_suffix_is_ignored() {
        let addr = ServerAddr::from_oda_uri("odamex://doom.example.org:10670/lobby").unwrap();
        assert_eq!(addr.port, 10670);

        let addr = ServerAddr::from_oda_uri("odamex://doom.example.org/lobby").unwrap();
        assert_eq!(addr, ServerAddr::new("doom.example.org", DEFAULT_PORT));
    }

    #[test]
    fn rejects_foreign_schemes_and_empty_hosts() {
        assert!(ServerAddr::from_oda_uri("http://doom.example.org").is_err());
        assert!(ServerAddr::from_oda_uri("doom.example.org").is_err());
        assert!(ServerAddr::from_oda_uri("odamex://").is_err());
        assert!(ServerAddr::from_oda_uri("odamex://:10666").is_err());
        assert!(ServerAddr::from_oda_uri("odamex://host:notaport").is_err());
    }

    #[test]
    fn parses_via_fromstr() {
        let addr: ServerAddr = "odamex://10.0.0.1:10666".parse().unwrap();
        assert_eq!(addr, ServerAddr::new("10.0.0.1", 10666));
        assert_eq!(addr.to_string(), "10.0.0.1:10666");
    }
}
