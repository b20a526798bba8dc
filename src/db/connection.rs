use serde::{Deserialize, Serialize};

/// Malformed SQL*Plus-style connect string (`user/password@db`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectError {
    #[error("No single \"@\" sign found to separate user/password from connect string")]
    MissingAtSign,
    #[error("No username and password given")]
    MissingCredentials,
    #[error("No connect string given")]
    MissingConnectString,
    #[error("No single \"/\" sign found to separate user and password")]
    MissingSlash,
    #[error("No username given")]
    MissingUsername,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionInfo {
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub connect_string: String,
}

impl ConnectionInfo {
    pub fn new(username: &str, password: &str, connect_string: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
            connect_string: connect_string.to_string(),
        }
    }

    pub fn display_string(&self) -> String {
        format!("{}@{}", self.username, self.connect_string)
    }

    /// Securely clear the password from memory by overwriting with zeros
    /// then releasing the allocation.
    pub fn clear_password(&mut self) {
        // Overwrite the existing bytes with zeros before dropping
        // SAFETY: we write zeros over the valid UTF-8 bytes (zeros are valid UTF-8)
        let bytes = unsafe { self.password.as_bytes_mut() };
        for byte in bytes.iter_mut() {
            // Use write_volatile to prevent the compiler from optimizing away the zeroing
            unsafe { std::ptr::write_volatile(byte, 0) };
        }
        self.password.clear();
        self.password.shrink_to_fit();
    }
}

/// Parse a `user/password@connectstring` string into its parts. An empty
/// password is allowed; everything else must be present exactly once.
pub fn parse_connect_string(value: &str) -> Result<ConnectionInfo, ConnectError> {
    let segments: Vec<&str> = value.trim().split('@').collect();
    if segments.len() != 2 {
        return Err(ConnectError::MissingAtSign);
    }
    if segments[0].is_empty() {
        return Err(ConnectError::MissingCredentials);
    }
    if segments[1].is_empty() {
        return Err(ConnectError::MissingConnectString);
    }

    let connect_string = segments[1];

    let credentials: Vec<&str> = segments[0].trim().split('/').collect();
    if credentials.len() != 2 {
        return Err(ConnectError::MissingSlash);
    }
    if credentials[0].is_empty() {
        return Err(ConnectError::MissingUsername);
    }

    Ok(ConnectionInfo::new(
        credentials[0],
        credentials[1],
        connect_string,
    ))
}

/// Trim a statement and strip one trailing semicolon before it is handed to
/// a connection provider.
pub fn purify_statement(statement: &str) -> String {
    let trimmed = statement.trim();
    trimmed.strip_suffix(';').unwrap_or(trimmed).to_string()
}

/// Result of executing one statement through a provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub affected_rows: u64,
    pub message: String,
}

/// Seam standing in for the vendor database driver: open and close a
/// session, execute a single statement. Implementations live with the
/// embedding application; this crate only plans what to hand them.
pub trait ConnectionProvider {
    fn connect(&mut self, info: &ConnectionInfo) -> Result<(), Box<dyn std::error::Error>>;

    fn disconnect(&mut self);

    fn is_connected(&self) -> bool;

    fn execute(&mut self, statement: &str)
        -> Result<ExecutionOutcome, Box<dyn std::error::Error>>;
}
