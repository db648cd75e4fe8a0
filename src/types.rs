mod bindable;
mod fingerprint;
mod key_id;
mod mpi;
mod packet;
mod timestamp;

pub use self::{
    bindable::Bindable,
    fingerprint::Fingerprint,
    key_id::KeyId,
    mpi::Mpi,
    packet::Tag,
    timestamp::{Timestamp, TimestampError},
};
