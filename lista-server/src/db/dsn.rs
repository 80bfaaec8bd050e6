//! Connection string parsing
//!
//! Accepts either a `mysql://` URL or the driver DSN form used by existing
//! deployments:
//!
//! ```text
//! [user[:password]@][net[(addr)]]/dbname[?param1=value1&paramN=valueN]
//! ```
//!
//! Only `tcp` and `unix` networks are supported. Of the query parameters,
//! only `charset` is honored.

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::mysql::MySqlConnectOptions;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 3306;
const DEFAULT_SOCKET: &str = "/tmp/mysql.sock";

/// Connection string parse failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DsnError {
    #[error("missing '/' before database name")]
    MissingDatabaseSeparator,

    #[error("unterminated address in '{0}'")]
    UnterminatedAddress(String),

    #[error("unsupported network '{0}'")]
    UnsupportedNetwork(String),

    #[error("invalid port '{0}'")]
    InvalidPort(String),

    #[error("invalid connection URL: {0}")]
    Url(String),
}

/// Where the server lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Tcp { host: String, port: u16 },
    Unix(PathBuf),
}

/// Parsed driver DSN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverDsn {
    pub user: String,
    pub password: Option<String>,
    pub address: Address,
    pub database: Option<String>,
    pub charset: Option<String>,
}

impl DriverDsn {
    pub fn parse(dsn: &str) -> Result<Self, DsnError> {
        // The database name follows the last '/', so passwords may contain '/'
        let slash = dsn.rfind('/').ok_or(DsnError::MissingDatabaseSeparator)?;
        let (head, tail) = (&dsn[..slash], &dsn[slash + 1..]);

        let (database, params) = tail.split_once('?').unwrap_or((tail, ""));

        // Likewise the address follows the last '@'
        let (credentials, net_addr) = match head.rfind('@') {
            Some(at) => (Some(&head[..at]), &head[at + 1..]),
            None => (None, head),
        };

        let (user, password) = match credentials {
            Some(creds) => match creds.split_once(':') {
                Some((user, password)) => (user.to_string(), Some(password.to_string())),
                None => (creds.to_string(), None),
            },
            None => (String::new(), None),
        };

        let charset = params
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "charset")
            .and_then(|(_, value)| value.split(',').next())
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        Ok(Self {
            user,
            password,
            address: parse_address(net_addr)?,
            database: (!database.is_empty()).then(|| database.to_string()),
            charset,
        })
    }

    pub fn into_connect_options(self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new();

        options = match &self.address {
            Address::Tcp { host, port } => options.host(host).port(*port),
            Address::Unix(path) => options.socket(path),
        };
        if !self.user.is_empty() {
            options = options.username(&self.user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        if let Some(charset) = &self.charset {
            options = options.charset(charset);
        }

        options
    }
}

fn parse_address(net_addr: &str) -> Result<Address, DsnError> {
    if net_addr.is_empty() {
        return Ok(Address::Tcp {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        });
    }

    let (net, addr) = match net_addr.split_once('(') {
        Some((net, rest)) => {
            let addr = rest
                .strip_suffix(')')
                .ok_or_else(|| DsnError::UnterminatedAddress(net_addr.to_string()))?;
            (net, addr)
        }
        None => (net_addr, ""),
    };

    match net {
        "tcp" => parse_tcp(addr),
        "unix" => {
            let path = if addr.is_empty() { DEFAULT_SOCKET } else { addr };
            Ok(Address::Unix(PathBuf::from(path)))
        }
        other => Err(DsnError::UnsupportedNetwork(other.to_string())),
    }
}

fn parse_tcp(addr: &str) -> Result<Address, DsnError> {
    if addr.is_empty() {
        return Ok(Address::Tcp {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        });
    }

    // Bracketed IPv6 without a port
    if addr.starts_with('[') && addr.ends_with(']') {
        let host = &addr[1..addr.len() - 1];
        let host = if host.is_empty() { DEFAULT_HOST } else { host };
        return Ok(Address::Tcp {
            host: host.to_string(),
            port: DEFAULT_PORT,
        });
    }

    let (host, port) = match addr.rsplit_once(':') {
        Some((host, port)) => {
            let port = port
                .parse::<u16>()
                .map_err(|_| DsnError::InvalidPort(port.to_string()))?;
            (host, port)
        }
        None => (addr, DEFAULT_PORT),
    };

    let host = host.trim_start_matches('[').trim_end_matches(']');
    let host = if host.is_empty() { DEFAULT_HOST } else { host };

    Ok(Address::Tcp {
        host: host.to_string(),
        port,
    })
}

/// Build connect options from either accepted connection string form.
pub fn parse_connect_options(dsn: &str) -> Result<MySqlConnectOptions, DsnError> {
    let dsn = dsn.trim();

    if dsn.starts_with("mysql://") || dsn.starts_with("mariadb://") {
        return MySqlConnectOptions::from_str(dsn).map_err(|e| DsnError::Url(e.to_string()));
    }

    Ok(DriverDsn::parse(dsn)?.into_connect_options())
}
