use crate::message::{self, MESSAGE_SIZE, Message, MessageBuf, MessageKind};
use crate::mutex::{Mutex, lock};
use crate::{
    AgentAddress, ClientConfig, EndpointSelector, Error, RandSource, Result, ThreadRandom,
    Transport, TransportError,
};
use core::time::Duration;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicU32, Ordering};
#[cfg(feature = "tracing")]
use tracing::instrument;

/// Outcome of a single send/wait round trip.
#[derive(Debug)]
enum Attempt {
    /// A reply carrying our echo token.
    Matched(Message),
    /// A well-formed reply for some other request, e.g. a late answer to an
    /// earlier attempt.
    Stale { echo: u32 },
    /// A datagram from an address other than the agent asked this attempt.
    Foreign { from: SocketAddr },
    /// Timeout, socket error, short send, garbled datagram, or a reply of
    /// the wrong type.
    Failed(TransportError),
}

/// Sends requests to the agent pool and correlates replies by echo token.
///
/// Transport failures are retried, each retry re-picking an agent, until the
/// attempt budget is spent. An explicit agent error ends the call at once.
///
/// The transport sits behind a mutex held for a whole attempt (send and
/// wait), so concurrent callers on one requester are serialized per attempt
/// and can never consume each other's replies. Echo tokens come from an
/// atomic counter seeded from the random source, and are unique per
/// requester until the `u32` wraps. Replies count only when they come from
/// the agent asked in that attempt.
#[derive(Debug)]
pub struct Requester<T = UdpSocket, R = ThreadRandom>
where
    T: Transport,
    R: RandSource<u64>,
{
    transport: Mutex<T>,
    selector: EndpointSelector<R>,
    echo: AtomicU32,
    timeout: Duration,
    max_attempts: u8,
}

impl<T, R> Requester<T, R>
where
    T: Transport,
    R: RandSource<u64>,
{
    /// # Errors
    ///
    /// [`Error::Config`] if the config carries no agents.
    pub fn new(config: &ClientConfig, transport: T, rng: R) -> Result<Self> {
        let first_echo = rng.rand() as u32;
        let selector = EndpointSelector::new(config.agents().to_vec(), rng)?;
        Ok(Self {
            transport: Mutex::new(transport),
            selector,
            echo: AtomicU32::new(first_echo),
            timeout: config.timeout(),
            max_attempts: config.max_attempts(),
        })
    }

    /// Performs one request with retries.
    ///
    /// # Errors
    ///
    /// - [`Error::Agent`] when the agent answers with an error response
    /// - [`Error::Transport`] when the budget runs out and at least one
    ///   attempt failed at the transport level; carries the last such failure
    /// - [`Error::NoResponse`] when the budget runs out on stale or foreign
    ///   replies only
    /// - [`Error::LockPoisoned`] if another caller panicked mid-attempt
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn request(&self, kind: MessageKind, value1: u64, value2: u64) -> Result<Message> {
        debug_assert!(kind.is_request(), "{kind:?} is not a request type");

        let echo = self.next_echo();
        let request = message::encode(kind, echo, value1, value2);
        let mut last_failure = None;

        for _attempt in 1..=self.max_attempts {
            let agent = self.selector.pick();
            match self.attempt(&request, kind.response_for(), echo, agent)? {
                Attempt::Matched(response) if response.kind.is_error() => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!("Agent {agent} rejected echo {echo} with code {}", response.value1);
                    return Err(Error::Agent {
                        code: response.value1,
                    });
                }
                Attempt::Matched(response) => return Ok(response),
                Attempt::Stale { echo: _stale } => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Attempt {_attempt}: discarding stale echo {_stale} from {agent}");
                }
                Attempt::Foreign { from: _from } => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Attempt {_attempt}: discarding reply from {_from}, asked {agent}");
                }
                Attempt::Failed(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Attempt {_attempt} to {agent} failed: {err}");
                    last_failure = Some(err);
                }
            }
        }

        let attempts = self.max_attempts;
        #[cfg(feature = "tracing")]
        tracing::warn!("Request echo {echo} exhausted {attempts} attempt(s)");
        Err(match last_failure {
            Some(source) => Error::Transport { attempts, source },
            None => Error::NoResponse { attempts },
        })
    }

    /// Returns the next echo token. Wraps at `u32::MAX`.
    pub fn next_echo(&self) -> u32 {
        self.echo.fetch_add(1, Ordering::Relaxed)
    }

    #[cfg(test)]
    pub(crate) fn set_next_echo(&self, echo: u32) {
        self.echo.store(echo, Ordering::Relaxed);
    }

    pub fn selector(&self) -> &EndpointSelector<R> {
        &self.selector
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    fn attempt(
        &self,
        request: &MessageBuf,
        expected: MessageKind,
        echo: u32,
        agent: AgentAddress,
    ) -> Result<Attempt> {
        let agent = agent.socket_addr();
        let mut transport = lock(&self.transport)?;
        let outcome = match exchange(&mut *transport, request, agent, self.timeout) {
            Ok((_, from)) if from != agent => Attempt::Foreign { from },
            Ok((response, _)) if response.echo != echo => Attempt::Stale {
                echo: response.echo,
            },
            Ok((response, _)) if response.kind == expected || response.kind.is_error() => {
                Attempt::Matched(response)
            }
            Ok((response, _)) => Attempt::Failed(TransportError::UnexpectedKind {
                expected,
                actual: response.kind,
            }),
            Err(err) => Attempt::Failed(err),
        };
        Ok(outcome)
    }
}

fn exchange<T>(
    transport: &mut T,
    request: &MessageBuf,
    agent: SocketAddr,
    timeout: Duration,
) -> Result<(Message, SocketAddr), TransportError>
where
    T: Transport,
{
    let sent = transport.send_to(request, agent)?;
    if sent != MESSAGE_SIZE {
        return Err(TransportError::ShortSend {
            sent,
            expected: MESSAGE_SIZE,
        });
    }

    // One spare byte so an oversized datagram shows up as a size mismatch
    // instead of being silently truncated to a valid-looking message.
    let mut buf = [0u8; MESSAGE_SIZE + 1];
    let (len, from) = transport.recv_from_timeout(&mut buf, timeout)?;
    Ok((message::decode(&buf[..len])?, from))
}
