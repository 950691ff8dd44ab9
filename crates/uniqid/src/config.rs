use crate::{AgentAddress, ConfigError};
use core::time::Duration;

/// Per-attempt wait used by [`ClientConfig::with_agents`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(200);

/// Attempt budget used by [`ClientConfig::with_agents`].
pub const DEFAULT_MAX_ATTEMPTS: u8 = 3;

/// Validated construction parameters for a [`crate::UniqIdClient`].
///
/// All three values are checked once here; a client built from a
/// `ClientConfig` never re-validates them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    agents: Vec<AgentAddress>,
    timeout: Duration,
    max_attempts: u8,
}

impl ClientConfig {
    /// Parses `agent_endpoints` (comma-separated `ip:port`) and validates the
    /// retry parameters.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from [`AgentAddress::parse_list`], plus
    /// [`ConfigError::ZeroTimeout`] and [`ConfigError::ZeroAttempts`].
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use uniqid::ClientConfig;
    ///
    /// let config = ClientConfig::new("127.0.0.1:6200", Duration::from_millis(50), 5).unwrap();
    /// assert_eq!(config.max_attempts(), 5);
    /// ```
    pub fn new(
        agent_endpoints: &str,
        timeout: Duration,
        max_attempts: u8,
    ) -> Result<Self, ConfigError> {
        let agents = AgentAddress::parse_list(agent_endpoints)?;
        Self::from_agents(agents, timeout, max_attempts)
    }

    /// Like [`Self::new`] with [`DEFAULT_TIMEOUT`] and
    /// [`DEFAULT_MAX_ATTEMPTS`].
    pub fn with_agents(agent_endpoints: &str) -> Result<Self, ConfigError> {
        Self::new(agent_endpoints, DEFAULT_TIMEOUT, DEFAULT_MAX_ATTEMPTS)
    }

    /// Builds a config from already-parsed addresses.
    pub fn from_agents(
        agents: Vec<AgentAddress>,
        timeout: Duration,
        max_attempts: u8,
    ) -> Result<Self, ConfigError> {
        if agents.is_empty() {
            return Err(ConfigError::NoAgents);
        }
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if max_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        Ok(Self {
            agents,
            timeout,
            max_attempts,
        })
    }

    pub fn agents(&self) -> &[AgentAddress] {
        &self.agents
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_config() {
        let config = ClientConfig::new("1.1.1.1:1,2.2.2.2:2", Duration::from_secs(1), 1).unwrap();
        assert_eq!(config.agents().len(), 2);
        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert_eq!(config.max_attempts(), 1);
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::with_agents("1.1.1.1:1").unwrap();
        assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(config.max_attempts(), DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn rejects_zero_timeout_and_attempts() {
        assert_eq!(
            ClientConfig::new("1.1.1.1:1", Duration::ZERO, 3),
            Err(ConfigError::ZeroTimeout)
        );
        assert_eq!(
            ClientConfig::new("1.1.1.1:1", Duration::from_millis(1), 0),
            Err(ConfigError::ZeroAttempts)
        );
    }

    #[test]
    fn rejects_empty_agent_vec() {
        assert_eq!(
            ClientConfig::from_agents(Vec::new(), DEFAULT_TIMEOUT, 1),
            Err(ConfigError::NoAgents)
        );
    }

    #[test]
    fn endpoint_errors_surface_unchanged() {
        assert_eq!(
            ClientConfig::with_agents("1.1.1.1:99999"),
            Err(ConfigError::InvalidPort {
                entry: "1.1.1.1:99999".into()
            })
        );
    }
}
