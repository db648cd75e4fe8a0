//! Derived keys composed of multiple packets.
//!
//! Keys are derived with [`KeyParamsBuilder`], which yields a [`Certificate`]
//! holding the primary key, the user id and the optional encryption subkey.

mod builder;
mod certificate;

pub use self::builder::{KeyParams, KeyParamsBuilder, KeyParamsBuilderError, MIN_USER_ID_LEN};
pub use self::certificate::Certificate;
