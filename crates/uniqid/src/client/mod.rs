use crate::message::{Message, MessageKind};
use crate::{
    ClientConfig, Error, IdComposer, RandSource, Requester, Result, ThreadRandom, TimeSource, Transport,
    UniqueId, WallClock, transport,
};
use std::net::UdpSocket;
#[cfg(feature = "tracing")]
use tracing::instrument;


/// Client for a pool of unique-ID agents.
///
/// Every operation is one blocking request/response exchange (with retries)
/// against a randomly picked agent. The client is `Send + Sync` when its
/// transport is `Send`; share it behind an `Arc` or give each thread its own
/// instance to avoid serializing on the socket.
///
/// # Example
///
/// ```no_run
/// use uniqid::{ClientConfig, UniqIdClient};
///
/// let config = ClientConfig::with_agents("10.0.0.1:6200,10.0.0.2:6200")?;
/// let client = UniqIdClient::connect(&config)?;
///
/// let label = client.get_label()?;
/// let id = client.get_local_unique_id(7, 0)?;
/// println!("agent {label:02x} issued {id}");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct UniqIdClient<T = UdpSocket, R = ThreadRandom, C = WallClock>
where
    T: Transport,
    R: RandSource<u64>,
    C: TimeSource,
{
    requester: Requester<T, R>,
    composer: IdComposer<C>,
}

impl UniqIdClient {
    /// Builds a client on a freshly bound ephemeral UDP socket, the
    /// thread-local RNG and the wall clock.
    ///
    /// # Errors
    ///
    /// [`Error::Bind`] if the socket cannot be bound.
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let socket = transport::bind_ephemeral().map_err(Error::Bind)?;
        Self::from_components(config, socket, ThreadRandom, WallClock)
    }
}

impl<T, R, C> UniqIdClient<T, R, C>
where
    T: Transport,
    R: RandSource<u64>,
    C: TimeSource,
{
    /// Builds a client from explicit collaborators.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the config carries no agents.
    pub fn from_components(config: &ClientConfig, transport: T, rng: R, clock: C) -> Result<Self> {
        Ok(Self {
            requester: Requester::new(config, transport, rng)?,
            composer: IdComposer::new(clock),
        })
    }

    /// Asks an agent for its label.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn get_label(&self) -> Result<u8> {
        let response = self.request(MessageKind::RequestLabel, 0, 0)?;
        Ok(response.value1 as u8)
    }

    /// Asks an agent for the next sequence value of the current period.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn get_sequence(&self) -> Result<u32> {
        let response = self.request(MessageKind::RequestUniqSeq, 0, 0)?;
        Ok(response.value1 as u32)
    }

    /// Asks one agent for both its label and a sequence value in a single
    /// round trip.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn get_label_and_sequence(&self) -> Result<(u8, u32)> {
        let response = self.request(MessageKind::RequestLabelAndSeq, 0, 0)?;
        Ok((response.value1 as u8, response.value2 as u32))
    }

    /// Asks an agent to compose a full ID for `user` at `seconds` (epoch
    /// seconds; `0` lets the agent use its own clock).
    ///
    /// # Errors
    ///
    /// [`Error::Agent`] carries the agent's code when it cannot
    /// allocate, e.g. because its sequence store failed.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn get_unique_id(&self, user: u8, seconds: u64) -> Result<UniqueId> {
        let response = self.request(MessageKind::RequestUniqId, u64::from(user), seconds)?;
        Ok(UniqueId::from_raw(response.value1))
    }

    /// Fetches a label and sequence, then composes the ID locally from this
    /// host's calendar (`0` means now).
    ///
    /// The calendar fields depend on the local clock and time zone, so they
    /// can differ from what [`Self::get_unique_id`] would return under clock
    /// skew.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self)))]
    pub fn get_local_unique_id(&self, user: u8, seconds: u64) -> Result<UniqueId> {
        let (label, sequence) = self.get_label_and_sequence()?;
        self.composer.compose(user, label, seconds, sequence)
    }

    pub fn requester(&self) -> &Requester<T, R> {
        &self.requester
    }

    pub fn composer(&self) -> &IdComposer<C> {
        &self.composer
    }

    fn request(&self, kind: MessageKind, value1: u64, value2: u64) -> Result<Message> {
        self.requester.request(kind, value1, value2)
    }
}
