use std::time::Duration;

use strsim::jaro_winkler;

use super::{
    convert::{parse_bool, parse_duration, parse_enum, parse_i32, parse_tag_set},
    option_map::OptionMap,
    Credential,
    ServerAddress,
};
use crate::{
    concern::Acknowledgment,
    error::Result,
    selection_criteria::{ReadPreferenceMode, TagSet},
    trace,
    uuid_representation::UuidRepresentation,
};

/// Unrecognized names at least this similar to a known option are reported as likely typos.
const SIMILAR_OPTION_THRESHOLD: f64 = 0.84;

/// A recognized connection string option. Each variant decodes into exactly one field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum UriOption {
    AuthMechanism,
    AuthSource,
    ReplicaSet,
    Fsync,
    Ipv6,
    Journal,
    Ssl,
    SslVerifyCertificate,
    MaxPoolSize,
    MinPoolSize,
    WaitQueueMultiple,
    ConnectTimeout,
    MaxIdleTime,
    MaxLifeTime,
    SecondaryAcceptableLatency,
    SocketTimeout,
    WTimeout,
    WaitQueueTimeout,
    ReadPreference,
    UuidRepresentation,
    ReadPreferenceTags,
    W,
}

/// Lower-cased option names and the option each one sets. Duration options are also accepted
/// with an `ms` suffix, in which case the value is a bare number of milliseconds.
pub(crate) const URI_OPTIONS: &[(&str, UriOption)] = &[
    ("authmechanism", UriOption::AuthMechanism),
    ("authsource", UriOption::AuthSource),
    ("replicaset", UriOption::ReplicaSet),
    ("fsync", UriOption::Fsync),
    ("ipv6", UriOption::Ipv6),
    ("j", UriOption::Journal),
    ("journal", UriOption::Journal),
    ("ssl", UriOption::Ssl),
    ("sslverifycertificate", UriOption::SslVerifyCertificate),
    ("maxpoolsize", UriOption::MaxPoolSize),
    ("minpoolsize", UriOption::MinPoolSize),
    ("waitqueuemultiple", UriOption::WaitQueueMultiple),
    ("connecttimeout", UriOption::ConnectTimeout),
    ("connecttimeoutms", UriOption::ConnectTimeout),
    ("maxidletime", UriOption::MaxIdleTime),
    ("maxidletimems", UriOption::MaxIdleTime),
    ("maxlifetime", UriOption::MaxLifeTime),
    ("maxlifetimems", UriOption::MaxLifeTime),
    (
        "secondaryacceptablelatency",
        UriOption::SecondaryAcceptableLatency,
    ),
    (
        "secondaryacceptablelatencyms",
        UriOption::SecondaryAcceptableLatency,
    ),
    ("sockettimeout", UriOption::SocketTimeout),
    ("sockettimeoutms", UriOption::SocketTimeout),
    ("wtimeout", UriOption::WTimeout),
    ("wtimeoutms", UriOption::WTimeout),
    ("waitqueuetimeout", UriOption::WaitQueueTimeout),
    ("waitqueuetimeoutms", UriOption::WaitQueueTimeout),
    ("readpreference", UriOption::ReadPreference),
    ("guids", UriOption::UuidRepresentation),
    ("uuidrepresentation", UriOption::UuidRepresentation),
    ("readpreferencetags", UriOption::ReadPreferenceTags),
    ("w", UriOption::W),
];

impl UriOption {
    pub(crate) fn lookup(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        URI_OPTIONS
            .iter()
            .find(|(option, _)| *option == name)
            .map(|(_, option)| *option)
    }
}

/// The known option name most similar to `name`, if it is similar enough to suggest a typo.
pub(crate) fn similar_option(name: &str) -> Option<&'static str> {
    let name = name.to_lowercase();
    let (score, option) = URI_OPTIONS
        .iter()
        .fold((0.0, ""), |acc, &(option, _)| {
            let score = jaro_winkler(option, &name).abs();
            if score > acc.0 {
                return (score, option);
            }
            acc
        });
    (score >= SIMILAR_OPTION_THRESHOLD).then_some(option)
}

/// Mutable state accumulated over a single parse and then frozen into a `ConnectionString`.
#[derive(Debug, Default)]
pub(crate) struct ConnectionStringParser {
    pub(super) original_uri: String,
    pub(super) hosts: Vec<ServerAddress>,
    pub(super) credential: Option<Credential>,
    pub(super) database: Option<String>,
    pub(super) all_options: OptionMap,
    pub(super) unknown_options: OptionMap,

    pub(super) auth_mechanism: Option<String>,
    pub(super) auth_source: Option<String>,
    pub(super) replica_set: Option<String>,
    pub(super) fsync: Option<bool>,
    pub(super) ipv6: Option<bool>,
    pub(super) journal: Option<bool>,
    pub(super) ssl: Option<bool>,
    pub(super) ssl_verify_certificate: Option<bool>,
    pub(super) max_pool_size: Option<i32>,
    pub(super) min_pool_size: Option<i32>,
    pub(super) wait_queue_multiple: Option<i32>,
    pub(super) connect_timeout: Option<Duration>,
    pub(super) max_idle_time: Option<Duration>,
    pub(super) max_life_time: Option<Duration>,
    pub(super) secondary_acceptable_latency: Option<Duration>,
    pub(super) socket_timeout: Option<Duration>,
    pub(super) w_timeout: Option<Duration>,
    pub(super) wait_queue_timeout: Option<Duration>,
    pub(super) read_preference: Option<ReadPreferenceMode>,
    pub(super) uuid_representation: Option<UuidRepresentation>,
    pub(super) read_preference_tags: Vec<TagSet>,
    pub(super) w: Option<Acknowledgment>,
}

impl ConnectionStringParser {
    /// Records `name=value` and, if the name is recognized, decodes it into its field. A later
    /// occurrence of a single-valued option replaces an earlier one; tag sets accumulate.
    pub(super) fn parse_option_pair(&mut self, name: &str, value: &str) -> Result<()> {
        self.all_options.insert(name, value);

        let Some(option) = UriOption::lookup(name) else {
            trace::unrecognized_option(name, similar_option(name));
            self.unknown_options.insert(name, value);
            return Ok(());
        };

        match option {
            UriOption::AuthMechanism => self.auth_mechanism = Some(value.to_string()),
            UriOption::AuthSource => self.auth_source = Some(value.to_string()),
            UriOption::ReplicaSet => self.replica_set = Some(value.to_string()),
            UriOption::Fsync => self.fsync = Some(parse_bool(name, value)?),
            UriOption::Ipv6 => self.ipv6 = Some(parse_bool(name, value)?),
            UriOption::Journal => self.journal = Some(parse_bool(name, value)?),
            UriOption::Ssl => self.ssl = Some(parse_bool(name, value)?),
            UriOption::SslVerifyCertificate => {
                self.ssl_verify_certificate = Some(parse_bool(name, value)?)
            }
            UriOption::MaxPoolSize => self.max_pool_size = Some(parse_i32(name, value)?),
            UriOption::MinPoolSize => self.min_pool_size = Some(parse_i32(name, value)?),
            UriOption::WaitQueueMultiple => {
                self.wait_queue_multiple = Some(parse_i32(name, value)?)
            }
            UriOption::ConnectTimeout => self.connect_timeout = Some(parse_duration(name, value)?),
            UriOption::MaxIdleTime => self.max_idle_time = Some(parse_duration(name, value)?),
            UriOption::MaxLifeTime => self.max_life_time = Some(parse_duration(name, value)?),
            UriOption::SecondaryAcceptableLatency => {
                self.secondary_acceptable_latency = Some(parse_duration(name, value)?)
            }
            UriOption::SocketTimeout => self.socket_timeout = Some(parse_duration(name, value)?),
            UriOption::WTimeout => self.w_timeout = Some(parse_duration(name, value)?),
            UriOption::WaitQueueTimeout => {
                self.wait_queue_timeout = Some(parse_duration(name, value)?)
            }
            UriOption::ReadPreference => {
                self.read_preference = Some(parse_enum::<ReadPreferenceMode>(name, value)?)
            }
            UriOption::UuidRepresentation => {
                self.uuid_representation = Some(parse_enum::<UuidRepresentation>(name, value)?)
            }
            UriOption::ReadPreferenceTags => {
                let tag_set = parse_tag_set(name, value)?;
                self.read_preference_tags.push(tag_set);
            }
            UriOption::W => self.w = Some(Acknowledgment::from_uri_value(value)),
        }

        Ok(())
    }
}
